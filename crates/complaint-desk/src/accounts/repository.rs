use async_trait::async_trait;

use super::domain::{NewAccount, UserAccount};
use crate::complaints::RepositoryError;

/// Storage collaborator for user accounts. Emails are stored lowercase.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;

    /// Persist a new account. Fails with [`RepositoryError::Conflict`] on a duplicate email.
    async fn insert(&self, account: NewAccount) -> Result<UserAccount, RepositoryError>;
}
