//! Category Catalog
//!
//! Static configuration shared by every builder: category names, the
//! composite-collection relation and the folder layout families.

pub mod family;
pub mod names;
pub mod relation;

pub use family::LayoutFamily;
pub use relation::{composite, CollectionRelation, CompositeCategory, COMPOSITE_CATEGORIES};
