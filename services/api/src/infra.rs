use async_trait::async_trait;
use chrono::Utc;
use complaint_desk::accounts::{AccountId, AccountRepository, NewAccount, UserAccount};
use complaint_desk::complaints::{
    Complaint, ComplaintFilter, ComplaintId, ComplaintPatch, ComplaintRepository, NewComplaint,
    RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryComplaintRepository {
    records: Arc<Mutex<HashMap<ComplaintId, Complaint>>>,
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintId, RepositoryError> {
        let id = ComplaintId(Uuid::new_v4().to_string());
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id.clone(), complaint.into_complaint(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    async fn find_many(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, RepositoryError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|complaint| filter.matches(complaint))
            .cloned()
            .collect())
    }

    async fn update_fields(
        &self,
        id: &ComplaintId,
        patch: ComplaintPatch,
    ) -> Result<Option<Complaint>, RepositoryError> {
        let mut guard = lock(&self.records)?;
        Ok(guard.get_mut(id).map(|complaint| {
            patch.apply(complaint);
            complaint.clone()
        }))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, RepositoryError> {
        Ok(lock(&self.records)?.remove(id).is_some())
    }
}

/// Accounts keyed by their lowercase email.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<String, UserAccount>>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(lock(&self.accounts)?.get(email).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = lock(&self.accounts)?;
        if guard.contains_key(&account.email) {
            return Err(RepositoryError::Conflict);
        }

        let now = Utc::now();
        let stored = UserAccount {
            id: AccountId(Uuid::new_v4().to_string()),
            name: account.name,
            email: account.email,
            role: account.role,
            provider: account.provider,
            secret: account.secret,
            created_at: now,
            updated_at: now,
        };
        guard.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }
}
