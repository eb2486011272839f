//! Integration tests, one module per concern.

pub mod concurrency;
pub mod scenarios;
pub mod snapshot;
