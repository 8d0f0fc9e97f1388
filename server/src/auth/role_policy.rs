//! Role assignment at registration
//!
//! Staff accounts come from an allow-list file; everyone else registers
//! as a customer. The policy is injected into server state so the
//! classification rule is data, not code.

use std::path::Path;

use serde::Deserialize;
use shared::types::Role;

/// One allow-list entry. A registration matching either field (exact,
/// case-insensitive email) is classified as staff.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffEntry {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Injected `classify(username, email) -> Role` policy.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    staff: Vec<StaffEntry>,
}

impl RolePolicy {
    pub fn new(staff: Vec<StaffEntry>) -> Self {
        Self { staff }
    }

    /// Load the allow-list from a JSON file of [`StaffEntry`] objects.
    /// A missing file means no staff accounts can be registered.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "staff allow-list not found, all registrations are customers");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let staff: Vec<StaffEntry> = serde_json::from_str(&raw)?;
        tracing::info!(entries = staff.len(), "loaded staff allow-list");
        Ok(Self { staff })
    }

    pub fn classify(&self, username: &str, email: &str) -> Role {
        let email_lower = email.to_lowercase();
        let is_staff = self.staff.iter().any(|entry| {
            entry.username.as_deref() == Some(username)
                || entry
                    .email
                    .as_ref()
                    .is_some_and(|e| e.to_lowercase() == email_lower)
        });
        if is_staff { Role::Staff } else { Role::Customer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RolePolicy {
        RolePolicy::new(vec![
            StaffEntry {
                username: Some("manager".into()),
                email: None,
            },
            StaffEntry {
                username: None,
                email: Some("Boss@Example.com".into()),
            },
        ])
    }

    #[test]
    fn allow_list_matches_username() {
        assert_eq!(policy().classify("manager", "x@example.com"), Role::Staff);
    }

    #[test]
    fn allow_list_matches_email_case_insensitive() {
        assert_eq!(policy().classify("anyone", "boss@example.com"), Role::Staff);
    }

    #[test]
    fn everyone_else_is_customer() {
        assert_eq!(policy().classify("alice", "alice@example.com"), Role::Customer);
    }

    #[test]
    fn empty_policy_never_grants_staff() {
        let policy = RolePolicy::default();
        assert_eq!(policy.classify("manager", "boss@example.com"), Role::Customer);
    }
}
