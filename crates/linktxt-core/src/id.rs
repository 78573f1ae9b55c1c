//! Identifier generation abstraction.
//!
//! Every create call to the vendor carries identifiers minted on our side
//! before the request is sent. In production these are random v4 UUIDs; in
//! tests a predetermined sequence is injected.

use uuid::Uuid;

/// Source of client-side identifiers for vendor commands and entities.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn next_id(&self) -> Uuid;
}

/// Production generator backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
