//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! - **`outline`**: renders a tree as an indented, line-per-node outline for
//!   `insta` inline snapshots
//! - **`invariants`**: structural checks every parser-produced tree satisfies
//!   (heading levels, list levels, ordered/start agreement, no empty text runs)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
