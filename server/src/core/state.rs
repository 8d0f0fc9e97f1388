//! Server state
//!
//! One cloneable handle holding every shared service. Arc-backed fields
//! make the clone cheap; the state is handed to axum as router state and
//! threaded through handlers from there.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, RolePolicy};
use crate::core::Config;
use crate::db;
use crate::notify::NotifyService;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub role_policy: Arc<RolePolicy>,
    pub notify: NotifyService,
}

impl ServerState {
    /// Open the database and assemble all services.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = db::connect(&config.work_dir).await?;
        let role_policy = RolePolicy::from_file(&config.staff_file)?;
        Ok(Self::with_db(config.clone(), db, role_policy))
    }

    /// Assemble state around an existing connection (tests use the
    /// in-memory engine here).
    pub fn with_db(config: Config, db: Surreal<Db>, role_policy: RolePolicy) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            role_policy: Arc::new(role_policy),
            notify: NotifyService::new(),
            config,
            db,
        }
    }
}
