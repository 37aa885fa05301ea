//! Structural edits on document content
//!
//! - `entities`: cleanup of non-mutable entities split by a selection edge
//! - `operations`: range removal

pub mod entities;
pub mod operations;

pub use entities::remove_entities_at_edges;
pub use operations::{remove_range, RemovalDirection, RemovedRange};
