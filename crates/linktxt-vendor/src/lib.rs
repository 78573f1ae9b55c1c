//! Link TXT Vendor: `reqwest` implementation of the `VendorApi` trait.

pub mod http_vendor_api;

pub use http_vendor_api::{DEFAULT_BASE_URL, HttpVendorApi, VendorConfig};
