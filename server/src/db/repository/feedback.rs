//! Customer Feedback Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Feedback;

const FEEDBACK_TABLE: &str = "feedback";

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All feedback, newest first.
    pub async fn find_all(&self) -> RepoResult<Vec<Feedback>> {
        let feedbacks: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM feedback ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(feedbacks)
    }

    pub async fn create(
        &self,
        email: String,
        title: String,
        description: String,
    ) -> RepoResult<Feedback> {
        let feedback = Feedback {
            id: None,
            email,
            title,
            description,
            created_at: Utc::now(),
        };

        let created: Option<Feedback> = self
            .base
            .db()
            .create(FEEDBACK_TABLE)
            .content(feedback)
            .await?;
        created.ok_or_else(|| RepoError::Database("feedback was not created".into()))
    }
}
