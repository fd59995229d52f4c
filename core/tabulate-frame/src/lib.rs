//! FILENAME: core/tabulate-frame/src/lib.rs
//! Frame adapter for the tabulation engine.
//!
//! Holds named, equally long columns, extracts value and weight sequences
//! from them by name and delegates to `tabulate-engine`. Results can be
//! flattened back into long-format frames.
//!
//! Layers:
//! - `frame`: column storage and by-name tabulation
//! - `query`: serializable tabulation request over frame columns
//! - `export`: result table -> long-format frame

pub mod error;
pub mod frame;
pub mod query;
pub mod export;

/// Log category for the frame adapter.
pub const CATEGORY: &str = "FRAME";

pub use error::{FrameError, FrameResult};
pub use frame::{Column, Frame};
pub use query::FrameQuery;
pub use export::{counts_to_frame, proportions_to_frame};
