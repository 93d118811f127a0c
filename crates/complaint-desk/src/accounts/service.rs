use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{normalize_email, AccountView, NewAccount, NewAccountError, UserRole};
use super::repository::AccountRepository;
use crate::complaints::RepositoryError;

pub const DEMO_PASSWORD: &str = "password123";

const DEMO_ACCOUNTS: [(&str, &str, UserRole); 2] = [
    ("Admin User", "admin@demo.com", UserRole::Admin),
    ("Demo User", "user@demo.com", UserRole::User),
];

/// Password login and demo account provisioning.
pub struct AccountService<R> {
    repository: Arc<R>,
}

impl<R> AccountService<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Verify `password` for the account registered under `email`.
    ///
    /// Unknown emails, accounts without a password, and wrong passwords are indistinguishable
    /// to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccountView, LoginError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let email = match normalize_email(email) {
            Ok(email) => email,
            Err(_) => return Err(LoginError::InvalidCredentials),
        };

        let account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        let verified = account
            .secret
            .as_ref()
            .is_some_and(|secret| secret.verify(password));
        if !verified {
            warn!(account_id = %account.id.0, "login rejected");
            return Err(LoginError::InvalidCredentials);
        }

        info!(account_id = %account.id.0, role = ?account.role, "login succeeded");
        Ok(account.view())
    }

    /// Create the demo admin and user accounts if they do not exist yet.
    pub async fn seed_demo_users(&self) -> Result<SeedReport, AccountServiceError> {
        let mut report = SeedReport::default();

        for (name, email, role) in DEMO_ACCOUNTS {
            if self.repository.find_by_email(email).await?.is_some() {
                report.existing.push(email.to_string());
                continue;
            }

            let account = NewAccount::with_password(name, email, DEMO_PASSWORD, role)?;
            match self.repository.insert(account).await {
                Ok(stored) => {
                    info!(account_id = %stored.id.0, email, "demo account created");
                    report.created.push(email.to_string());
                }
                Err(RepositoryError::Conflict) => report.existing.push(email.to_string()),
                Err(err) => return Err(err.into()),
            }
        }

        Ok(report)
    }
}

/// Outcome of [`AccountService::seed_demo_users`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

impl SeedReport {
    pub fn message(&self) -> &'static str {
        if self.created.is_empty() {
            "Demo users already exist"
        } else {
            "Demo users created successfully"
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Please provide email and password")]
    MissingCredentials,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Account(#[from] NewAccountError),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
