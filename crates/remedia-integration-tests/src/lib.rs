//! Integration test crate for the Remedia document exchange.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end document flows across multiple workspace
//! crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p remedia-integration-tests
//! ```
