//! Authentication types and the collaborator interfaces the login flow talks to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
        }
    }
}

/// Identity handed to the session store after a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
}

/// One entry of the in-memory credential table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

/// Credential-check collaborator. Total: a mismatch is `None`, never an error.
pub trait CredentialCheck {
    fn check(&self, username: &str, password: &str) -> Option<AuthenticatedUser>;
}

/// Session/store collaborator
pub trait SessionStore {
    fn set_user(&self, user: AuthenticatedUser);
}

/// Navigation collaborator
pub trait Navigator {
    fn navigate_to(&self, path: &str);
}

/// Notification kind for transient user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Error => "alert-error",
        }
    }
}

/// Notification collaborator
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Hardcoded lookup over a fixed credential table.
///
/// Stand-in for a real backend; matching is exact on both username and password.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    records: Vec<CredentialRecord>,
}

impl StaticCredentials {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// The two demo accounts shipped with the login page
    pub fn builtin() -> Self {
        Self::new(default_credentials())
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }
}

impl CredentialCheck for StaticCredentials {
    fn check(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        self.records
            .iter()
            .find(|r| r.username == username && r.password == password)
            .map(|r| AuthenticatedUser {
                username: r.username.clone(),
                role: r.role,
            })
    }
}

pub fn default_credentials() -> Vec<CredentialRecord> {
    vec![
        CredentialRecord::new("admin", "Admin123.", Role::Admin),
        CredentialRecord::new("editor", "Editor123.", Role::Editor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_known_records() {
        let creds = StaticCredentials::builtin();

        for record in creds.records() {
            let user = creds.check(&record.username, &record.password).unwrap();
            assert_eq!(user.username, record.username);
            assert_eq!(user.role, record.role);
        }
    }

    #[test]
    fn test_check_rejects_other_pairs() {
        let creds = StaticCredentials::builtin();

        assert_eq!(creds.check("admin", "wrong"), None);
        assert_eq!(creds.check("admin", "Editor123."), None);
        assert_eq!(creds.check("editor", "Admin123."), None);
        assert_eq!(creds.check("Admin", "Admin123."), None);
        assert_eq!(creds.check("", ""), None);
        assert_eq!(creds.check("admin ", "Admin123."), None);
    }

    #[test]
    fn test_admin_scenario() {
        let user = StaticCredentials::builtin().check("admin", "Admin123.");
        assert_eq!(
            user,
            Some(AuthenticatedUser {
                username: "admin".to_string(),
                role: Role::Admin,
            })
        );
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"editor\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
