//! marv_core: Core utilities shared by every stage of the marv front end.
//!
//! Provides source positions and locations, name interning, and the small
//! collection types the translator and resolver index nodes with.

pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use collections::{MultiMap, OrderedMap};
pub use intern::{InternedString, StringInterner};
pub use text::{Position, SourceLocation, TextRange};
