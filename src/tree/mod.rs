//! Metadata Tree
//!
//! Three-level catalog types (Type → Object → Item) and the operations that
//! combine trees produced from different sources.

pub mod merge;
pub mod node;

pub use merge::{clear_checked, combine, count_nodes, remove_empty};
pub use node::{Container, Entity, MetadataItem, MetadataObject, MetadataType};
