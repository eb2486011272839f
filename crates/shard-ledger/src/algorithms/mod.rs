//! # Algorithms Module
//!
//! Destination routing and synthetic transaction sampling.

pub mod routing;
pub mod sampling;

pub use routing::*;
pub use sampling::*;
