//! Test id generator: deterministic `IdGenerator` implementation for tests.

use std::sync::Mutex;

use linktxt_core::id::IdGenerator;
use uuid::Uuid;

/// Yields `Uuid::from_u128(start)`, `Uuid::from_u128(start + 1)`, ... so tests
/// can predict the identifiers sent to the vendor.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: Mutex<u128>,
}

impl SequenceIdGenerator {
    /// Create a generator whose first id is `Uuid::from_u128(start)`.
    #[must_use]
    pub fn starting_at(start: u128) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> Uuid {
        let mut next = self.next.lock().unwrap();
        let id = Uuid::from_u128(*next);
        *next += 1;
        id
    }
}
