//! # cloudalign session
//!
//! The entry model at the heart of cloudalign: point clouds wrapped in
//! [`CloudEntry`] values that carry an undoable stack of rigid
//! transformations, a collection type with a working-copy editing
//! discipline, merging with provenance tracking, and a plain-text matrix
//! report.

pub mod collection;
pub mod entry;
pub mod merge;
pub mod report;

pub use collection::*;
pub use entry::*;
pub use merge::*;
pub use report::*;
