/// Resolver binding for generated fields
///
/// Every generated field is bound to a `DataFetcher` built by an explicit
/// factory from the active `DataContext`. The factory runs once per schema
/// build; if it fails, the whole build fails rather than leaving fields
/// silently unresolvable.

use crate::error::{EntigraphError, Result};
use crate::metadata::Relationship;
use crate::schema::filters::FilterOp;
use crate::schema::type_mapping::ScalarKind;

use async_graphql::dynamic::{ObjectAccessor, ValueAccessor};
use async_graphql::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// Arguments extracted from a generated field's GraphQL argument list:
/// per-attribute equality constraints plus per-operator filter value lists.
#[derive(Debug, Clone, Default)]
pub struct QueryArguments {
    /// Attribute name to required value, in argument order
    pub equals: IndexMap<String, Value>,

    /// Filter operator to supplied string values
    pub filters: IndexMap<FilterOp, Vec<String>>,
}

impl QueryArguments {
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.filters.is_empty()
    }

    /// Whether a row object satisfies every equality constraint
    pub fn matches(&self, row: &Value) -> bool {
        let Value::Object(obj) = row else {
            return false;
        };

        self.equals
            .iter()
            .all(|(name, want)| obj.get(name.as_str()) == Some(want))
    }
}

/// Extract `QueryArguments` from a field's argument accessor.
///
/// Attribute arguments are read with the accessor matching their scalar kind;
/// anything absent or mistyped is simply not constrained. Filter operator
/// arguments are lists of strings.
pub fn extract_arguments(
    args: &ObjectAccessor<'_>,
    attributes: &[(String, ScalarKind)],
) -> QueryArguments {
    let mut out = QueryArguments::default();

    for (name, kind) in attributes {
        if let Ok(accessor) = args.try_get(name) {
            if let Some(value) = scalar_argument(*kind, &accessor) {
                out.equals.insert(name.clone(), value);
            }
        }
    }

    for op in FilterOp::emitted() {
        if let Ok(accessor) = args.try_get(op.argument_name()) {
            if let Ok(list) = accessor.list() {
                let values: Vec<String> = list
                    .iter()
                    .filter_map(|item| item.string().ok().map(str::to_string))
                    .collect();
                out.filters.insert(op, values);
            }
        }
    }

    out
}

fn scalar_argument(kind: ScalarKind, accessor: &ValueAccessor<'_>) -> Option<Value> {
    match kind {
        ScalarKind::Boolean => accessor.boolean().ok().map(Value::Boolean),
        ScalarKind::String => accessor.string().ok().map(|s| Value::String(s.to_string())),
        ScalarKind::Int => accessor.i64().ok().map(|n| Value::Number(n.into())),
        // Long literals may arrive as numbers or numeric strings
        ScalarKind::Long => accessor.i64().ok().map(|n| Value::Number(n.into())).or_else(|| {
            accessor
                .string()
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .map(|n| Value::Number(n.into()))
        }),
        ScalarKind::Float => accessor
            .f64()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
    }
}

/// A user-registered, pre-built query bound to one target entity.
///
/// Exposed as a dedicated root field named after its registration key; the
/// field resolver executes this query instead of the generic fetch.
#[derive(Debug, Clone)]
pub struct NamedQuery {
    root_entity: String,
    constraints: IndexMap<String, Value>,
}

impl NamedQuery {
    pub fn new(root_entity: impl Into<String>) -> Self {
        Self {
            root_entity: root_entity.into(),
            constraints: IndexMap::new(),
        }
    }

    /// Add a preset attribute equality constraint
    pub fn constraint(mut self, attribute: impl Into<String>, value: Value) -> Self {
        self.constraints.insert(attribute.into(), value);
        self
    }

    /// The entity this query selects from
    pub fn root_entity(&self) -> &str {
        &self.root_entity
    }

    pub fn constraints(&self) -> &IndexMap<String, Value> {
        &self.constraints
    }
}

/// The data-access context handed to the fetcher factory.
///
/// Holds in-memory rows per entity name; each row is a GraphQL object value.
/// Relationship values may be embedded in a row under the relationship name.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    rows: IndexMap<String, Vec<Value>>,
}

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, entity: impl Into<String>, rows: Vec<Value>) -> Self {
        self.insert_rows(entity, rows);
        self
    }

    pub fn insert_rows(&mut self, entity: impl Into<String>, rows: Vec<Value>) {
        self.rows.entry(entity.into()).or_default().extend(rows);
    }

    pub fn rows(&self, entity: &str) -> &[Value] {
        self.rows.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The configurable resolver implementation behind every generated field.
///
/// Filter operator values in `QueryArguments` are surfaced for fetchers that
/// can translate them to a real query layer; implementations are free to
/// ignore operators they cannot express.
pub trait DataFetcher: Send + Sync {
    /// Fetch rows of an entity matching the supplied arguments
    fn fetch(&self, entity: &str, args: &QueryArguments) -> Result<Vec<Value>>;

    /// Fetch rows related to a parent row through a relationship
    fn fetch_related(
        &self,
        parent: &Value,
        relationship: &Relationship,
        args: &QueryArguments,
    ) -> Result<Vec<Value>>;

    /// Execute a pre-built named query. The default implementation merges the
    /// query's preset constraints into the runtime arguments and delegates to
    /// the generic fetch; preset constraints win on conflict.
    fn fetch_query(&self, query: &NamedQuery, args: &QueryArguments) -> Result<Vec<Value>> {
        let mut merged = args.clone();
        for (name, value) in query.constraints() {
            merged.equals.insert(name.clone(), value.clone());
        }
        self.fetch(query.root_entity(), &merged)
    }
}

/// Factory for fetcher instances, run once per schema build
pub type FetcherFactory = Arc<dyn Fn(&DataContext) -> Result<Arc<dyn DataFetcher>> + Send + Sync>;

/// Factory producing the default in-memory fetcher
pub fn memory_fetcher_factory() -> FetcherFactory {
    Arc::new(|context: &DataContext| {
        let fetcher: Arc<dyn DataFetcher> = Arc::new(MemoryFetcher::new(context.clone()));
        Ok(fetcher)
    })
}

/// Default fetcher over the in-memory `DataContext`.
///
/// Applies attribute equality arguments; relationship values are read from the
/// parent row under the relationship name.
pub struct MemoryFetcher {
    context: DataContext,
}

impl MemoryFetcher {
    pub fn new(context: DataContext) -> Self {
        Self { context }
    }
}

impl DataFetcher for MemoryFetcher {
    fn fetch(&self, entity: &str, args: &QueryArguments) -> Result<Vec<Value>> {
        let rows = self
            .context
            .rows(entity)
            .iter()
            .filter(|row| args.matches(row))
            .cloned()
            .collect();

        Ok(rows)
    }

    fn fetch_related(
        &self,
        parent: &Value,
        relationship: &Relationship,
        args: &QueryArguments,
    ) -> Result<Vec<Value>> {
        let Value::Object(obj) = parent else {
            return Err(EntigraphError::Fetch(format!(
                "Parent value for relationship '{}' is not an object",
                relationship.name
            )));
        };

        let related = match obj.get(relationship.name.as_str()) {
            Some(Value::List(items)) => items.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![single.clone()],
        };

        Ok(related
            .into_iter()
            .filter(|row| args.matches(row))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Cardinality;
    use async_graphql::value;

    fn context() -> DataContext {
        DataContext::new().with_rows(
            "Customer",
            vec![
                value!({"id": 1, "name": "Ada", "orders": [{"id": 10, "total": 9.5}]}),
                value!({"id": 2, "name": "Brin", "orders": []}),
            ],
        )
    }

    #[test]
    fn test_fetch_without_arguments_returns_all_rows() {
        let fetcher = MemoryFetcher::new(context());
        let rows = fetcher.fetch("Customer", &QueryArguments::default()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_fetch_applies_equality_arguments() {
        let fetcher = MemoryFetcher::new(context());
        let mut args = QueryArguments::default();
        args.equals
            .insert("name".to_string(), Value::String("Ada".to_string()));

        let rows = fetcher.fetch("Customer", &args).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_fetch_unknown_entity_returns_empty() {
        let fetcher = MemoryFetcher::new(context());
        let rows = fetcher.fetch("Phantom", &QueryArguments::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_fetch_related_from_embedded_list() {
        let fetcher = MemoryFetcher::new(context());
        let parent = value!({"id": 1, "orders": [{"id": 10}, {"id": 11}]});
        let rel = Relationship {
            name: "orders".to_string(),
            target: "Order".to_string(),
            cardinality: Cardinality::Many,
        };

        let rows = fetcher
            .fetch_related(&parent, &rel, &QueryArguments::default())
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_fetch_related_single_value() {
        let fetcher = MemoryFetcher::new(context());
        let parent = value!({"id": 10, "customer": {"id": 1, "name": "Ada"}});
        let rel = Relationship {
            name: "customer".to_string(),
            target: "Customer".to_string(),
            cardinality: Cardinality::One,
        };

        let rows = fetcher
            .fetch_related(&parent, &rel, &QueryArguments::default())
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_fetch_related_missing_returns_empty() {
        let fetcher = MemoryFetcher::new(context());
        let parent = value!({"id": 2});
        let rel = Relationship {
            name: "orders".to_string(),
            target: "Order".to_string(),
            cardinality: Cardinality::Many,
        };

        let rows = fetcher
            .fetch_related(&parent, &rel, &QueryArguments::default())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_named_query_merges_preset_constraints() {
        let fetcher = MemoryFetcher::new(context());
        let query = NamedQuery::new("Customer")
            .constraint("name", Value::String("Brin".to_string()));

        let rows = fetcher
            .fetch_query(&query, &QueryArguments::default())
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_named_query_preset_wins_over_runtime_argument() {
        let fetcher = MemoryFetcher::new(context());
        let query = NamedQuery::new("Customer")
            .constraint("name", Value::String("Brin".to_string()));

        let mut args = QueryArguments::default();
        args.equals
            .insert("name".to_string(), Value::String("Ada".to_string()));

        let rows = fetcher.fetch_query(&query, &args).unwrap();
        assert_eq!(rows.len(), 1);
        if let Value::Object(obj) = &rows[0] {
            assert_eq!(obj.get("name"), Some(&Value::String("Brin".to_string())));
        } else {
            panic!("Expected Value::Object");
        }
    }

    #[test]
    fn test_query_arguments_match_requires_object() {
        let mut args = QueryArguments::default();
        args.equals.insert("id".to_string(), Value::Number(1.into()));
        assert!(!args.matches(&Value::Null));
    }
}
