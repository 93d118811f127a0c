//! User accounts and password login.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{AccountId, AccountView, AuthProvider, NewAccount, UserAccount, UserRole};
pub use repository::AccountRepository;
pub use router::account_router;
pub use service::{AccountService, AccountServiceError, LoginError, SeedReport};
