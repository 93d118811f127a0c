pub mod accounts;
pub mod complaints;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mail;
pub mod telemetry;
pub mod validation;
