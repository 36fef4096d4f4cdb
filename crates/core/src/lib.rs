//! Vitrine catalog domain logic.
//!
//! Pure building blocks shared by the database and API crates: the SKU draft
//! engine, catalog validation and the submission planner. Nothing in this
//! crate talks to the network or the database directly.

pub mod catalog;
pub mod diff;
pub mod error;
pub mod pagination;
pub mod sku;
pub mod submission;
pub mod types;
