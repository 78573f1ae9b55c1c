//! Link TXT automation context.
//!
//! Turns spreadsheet rows into vendor-side structure: a per-advertiser
//! "Link TXT" folder, an auto-numbered subfolder per row, and a link creative
//! inside it. Rows are processed one at a time and every row ends in a
//! success or failure result; nothing here aborts a batch.

pub mod application;
pub mod domain;
