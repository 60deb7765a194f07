//! # wdcompat Interfaces
//!
//! Contract between the legacy command layer and the automation engine it
//! fronts: the `CommandEngine` trait, the current command vocabulary
//! (`Method`), argument/reply types, locator strategies and `ApiError`.

mod common;
mod engine;
mod error;
mod method;
mod strategy;

pub use common::*;
pub use engine::*;
pub use error::*;
pub use method::*;
pub use strategy::*;

// Re-export Value for engine implementors
pub use serde_json::Value;
