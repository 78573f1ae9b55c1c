//! Shared test fakes and utilities for the Link TXT automation service.

mod clock;
mod ids;
mod vendor;

pub use clock::FixedClock;
pub use ids::SequenceIdGenerator;
pub use vendor::{FakeCreativeSet, FakeFailure, FakeVendorApi, RecordedCall, VendorOperation};
