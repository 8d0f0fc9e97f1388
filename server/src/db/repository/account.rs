//! Account Repository

use chrono::Utc;
use shared::types::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Account;

const ACCOUNT_TABLE: &str = "account";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Account>> {
        let record_id = parse_record_id(ACCOUNT_TABLE, id)?;
        let account: Option<Account> = self.base.db().select(record_id).await?;
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(accounts.into_iter().next())
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Register a new account. Email and username must be unique across
    /// all accounts (including soft-deleted orders' owners — accounts are
    /// never soft-deleted).
    pub async fn create(
        &self,
        username: String,
        email: String,
        phone: String,
        hash_pass: String,
        role: Role,
    ) -> RepoResult<Account> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!("email {email}")));
        }
        if self.find_by_username(&username).await?.is_some() {
            return Err(RepoError::Duplicate(format!("username {username}")));
        }

        let account = Account {
            id: None,
            username,
            email,
            phone,
            hash_pass,
            avatar: None,
            role,
            points: 0,
            voucher_used: vec![],
            created_at: Utc::now(),
        };

        let created: Option<Account> = self
            .base
            .db()
            .create(ACCOUNT_TABLE)
            .content(account)
            .await?;
        created.ok_or_else(|| RepoError::Database("account was not created".into()))
    }

    /// Edit profile fields. Only username and avatar are client-editable;
    /// points and the consumed-voucher set belong to settlement.
    pub async fn update_profile(
        &self,
        id: &str,
        username: Option<String>,
        avatar: Option<String>,
    ) -> RepoResult<Account> {
        let record_id = parse_record_id(ACCOUNT_TABLE, id)?;

        if let Some(ref name) = username {
            let taken = self.find_by_username(name).await?;
            if let Some(existing) = taken
                && existing.id.as_ref() != Some(&record_id)
            {
                return Err(RepoError::Duplicate(format!("username {name}")));
            }
        }

        let updated: Vec<Account> = self
            .base
            .db()
            .query("UPDATE $id MERGE $changes RETURN AFTER")
            .bind(("id", record_id))
            .bind(("changes", ProfileChanges { username, avatar }))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Account {id}")))
    }
}

#[derive(Debug, serde::Serialize)]
struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}
