//! Server configuration
//!
//! Every knob can be set through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Database and log storage |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| production |
//! | STAFF_FILE | ./staff.json | Staff allow-list for registration |
//! | LOG_DIR | (unset) | Daily rolling log files when set |
//! | JWT_SECRET | (generated) | Token signing secret, 32+ bytes |
//! | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |

use std::path::PathBuf;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the embedded database
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// development | production
    pub environment: String,
    /// Staff allow-list path
    pub staff_file: PathBuf,
    /// When set, mirror logs into daily files under this directory
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            staff_file: std::env::var("STAFF_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./staff.json")),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
        }
    }

    /// Override the filesystem-touching settings, used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.log_dir = None;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
