/// GraphQL schema generation from entity metadata
///
/// This module maps ORM entity metadata into a dynamic GraphQL schema:
/// type mapping, default filter arguments, resolver binding, and the
/// schema builder itself.

mod builder;
mod filters;
mod resolver;
mod scalars;
mod type_mapping;

pub use builder::SchemaBuilder;
pub use filters::{default_filter_arguments, FilterOp};
pub use resolver::{
    extract_arguments, memory_fetcher_factory, DataContext, DataFetcher, FetcherFactory,
    MemoryFetcher, NamedQuery, QueryArguments,
};
pub use scalars::register_custom_scalars;
pub use type_mapping::{scalar_kind_of, ScalarKind};
