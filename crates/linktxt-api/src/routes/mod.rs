//! Route modules.

pub mod batch;
pub mod credentials;
pub mod health;
