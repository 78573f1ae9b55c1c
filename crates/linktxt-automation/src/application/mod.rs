//! Application services for the automation context.

pub mod batch_runner;
pub mod credential_check;
pub mod row_processor;
