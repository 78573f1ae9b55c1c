//! Domain rules for the automation context.

pub mod naming;
pub mod outcome;
pub mod row;
pub mod target_url;
