//! Link TXT Core: shared abstractions.
//!
//! This crate defines the vendor API seam, the credential type, and the
//! determinism traits (clock, id generation) that the automation context and
//! the HTTP service depend on. It contains no infrastructure code.

pub mod clock;
pub mod credential;
pub mod error;
pub mod id;
pub mod vendor;
