//! Account Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::types::Role;
use surrealdb::RecordId;

use super::voucher::VoucherId;

/// Account ID type
pub type AccountId = RecordId;

/// Account model matching the `account` table
///
/// `points` and `voucher_used` are mutated only by order settlement;
/// everything else is profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// Argon2 password hash, never exposed through the API
    pub hash_pass: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: Role,
    /// Loyalty points balance; the settlement guard keeps it non-negative
    #[serde(default)]
    pub points: i64,
    /// Consumed voucher ids, treated as a set for already-used checks
    #[serde(default)]
    pub voucher_used: Vec<VoucherId>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Hash a plaintext password with argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Verify a candidate password against the stored hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Set-membership check against the consumed voucher list
    pub fn has_used_voucher(&self, voucher: &VoucherId) -> bool {
        self.voucher_used.iter().any(|v| v == voucher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with_hash(hash: String) -> Account {
        Account {
            id: None,
            username: "tester".into(),
            email: "tester@example.com".into(),
            phone: "000".into(),
            hash_pass: hash,
            avatar: None,
            role: Role::Customer,
            points: 0,
            voucher_used: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_roundtrip() {
        let hash = Account::hash_password("s3cret-pass").unwrap();
        let account = account_with_hash(hash);
        assert!(account.verify_password("s3cret-pass").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }
}
