/// Entity metadata model
///
/// The types describing what the ORM layer knows about each persistent entity:
/// attributes with native value types and name-referenced relationships.

mod source;
mod types;

pub use source::MetadataSource;
pub use types::{Attribute, Cardinality, Entity, NativeType, Relationship};
