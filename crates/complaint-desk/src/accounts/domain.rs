use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::credentials::{hash_password, CredentialError, PasswordSecret};
use crate::validation::{bounded_text, non_empty, FieldProblem, ValidationError};

pub const NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// How the account authenticates. Only `Credentials` accounts carry a password secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Credentials,
    Google,
}

/// Stored account. The password secret never leaves this type through serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub secret: Option<PasswordSecret>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Public projection returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Validated account awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub secret: Option<PasswordSecret>,
}

impl NewAccount {
    /// Validate profile fields and hash `password` for a credentials account.
    pub fn with_password(
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<Self, NewAccountError> {
        let name = bounded_text("name", Some(name), NAME_MAX_CHARS)?;
        let email = normalize_email(email)?;
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(ValidationError::new(
                "password",
                FieldProblem::TooShort {
                    min_chars: PASSWORD_MIN_CHARS,
                },
            )
            .into());
        }

        Ok(Self {
            name,
            email,
            role,
            provider: AuthProvider::Credentials,
            secret: Some(hash_password(password)?),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewAccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
            .expect("email pattern compiles")
    })
}

/// Lowercase and trim an email address, rejecting malformed input.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = non_empty(Some(raw))
        .ok_or_else(|| ValidationError::missing("email"))?
        .trim()
        .to_lowercase();
    if !email_pattern().is_match(&email) {
        return Err(ValidationError::new("email", FieldProblem::Malformed));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized() {
        assert_eq!(
            normalize_email("  Admin@Demo.COM ").expect("valid email"),
            "admin@demo.com"
        );
        assert_eq!(
            normalize_email("not-an-email").expect_err("malformed").problem,
            FieldProblem::Malformed
        );
    }

    #[test]
    fn new_accounts_hash_passwords() {
        let account = NewAccount::with_password(
            "Demo User",
            "user@demo.com",
            "password123",
            UserRole::User,
        )
        .expect("valid account");
        let secret = account.secret.expect("credentials account has secret");
        assert!(secret.verify("password123"));
        assert_ne!(secret.expose(), "password123");
    }

    #[test]
    fn short_passwords_and_long_names_are_rejected() {
        match NewAccount::with_password("Demo", "user@demo.com", "12345", UserRole::User) {
            Err(NewAccountError::Validation(err)) => assert_eq!(err.field, "password"),
            other => panic!("expected password validation error, got {other:?}"),
        }

        let long_name = "n".repeat(NAME_MAX_CHARS + 1);
        match NewAccount::with_password(&long_name, "user@demo.com", "password123", UserRole::User)
        {
            Err(NewAccountError::Validation(err)) => assert_eq!(err.field, "name"),
            other => panic!("expected name validation error, got {other:?}"),
        }
    }

    #[test]
    fn views_omit_the_secret() {
        let now = Utc::now();
        let account = UserAccount {
            id: AccountId("acct-1".to_string()),
            name: "Admin User".to_string(),
            email: "admin@demo.com".to_string(),
            role: UserRole::Admin,
            provider: AuthProvider::Credentials,
            secret: Some(PasswordSecret::from_stored("c2VjcmV0")),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(account.view()).expect("serializes");
        assert_eq!(json["role"], "admin");
        assert!(json.get("secret").is_none());
        assert!(!json.to_string().contains("c2VjcmV0"));
    }
}
