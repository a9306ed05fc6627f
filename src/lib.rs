pub mod config;
pub mod error;
pub mod metadata;
pub mod schema;

// Re-export commonly used types
pub use config::{Config, ServerConfig};
pub use error::{EntigraphError, Result};
pub use metadata::{Attribute, Cardinality, Entity, MetadataSource, NativeType, Relationship};
pub use schema::{DataContext, DataFetcher, NamedQuery, SchemaBuilder};
