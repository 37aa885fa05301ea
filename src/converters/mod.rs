//! Converters between content and its transportable encodings
//!
//! - `raw`: order-preserving JSON encoding of blocks, styles, entities and data
//! - `embedded`: reading that encoding back out of exported HTML

pub mod embedded;
pub mod raw;

pub use embedded::{read_embedded_fragment, require_embedded_fragment};
pub use raw::{content_from_raw, content_to_raw, deserialize, serialize, RawContent};
