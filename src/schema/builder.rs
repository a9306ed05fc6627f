/// GraphQL schema builder
///
/// This module provides the `SchemaBuilder` which walks entity metadata once
/// and generates a complete dynamic GraphQL schema: one object type per
/// entity, a `root` query type with generated find fields, and resolver
/// bindings for every field.

use crate::error::{EntigraphError, Result};
use crate::metadata::{Entity, MetadataSource};
use crate::schema::filters::default_filter_arguments;
use crate::schema::resolver::{
    extract_arguments, memory_fetcher_factory, DataContext, DataFetcher, FetcherFactory,
    NamedQuery,
};
use crate::schema::scalars::register_custom_scalars;
use crate::schema::type_mapping::{scalar_kind_of, ScalarKind};

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, Schema, TypeRef};
use async_graphql::Value;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Schema builder for generating GraphQL schemas from entity metadata.
///
/// Fluent configuration, then `build()`; each `build()` call constructs a
/// fresh, structurally identical schema from the same configuration.
pub struct SchemaBuilder {
    metadata: Arc<dyn MetadataSource>,
    context: DataContext,
    fetcher_factory: FetcherFactory,
    named_queries: IndexMap<String, NamedQuery>,
}

impl SchemaBuilder {
    /// Create a builder reading entities from the given metadata source
    pub fn new(metadata: impl MetadataSource + 'static) -> Self {
        Self {
            metadata: Arc::new(metadata),
            context: DataContext::new(),
            fetcher_factory: memory_fetcher_factory(),
            named_queries: IndexMap::new(),
        }
    }

    /// Set the data-access context handed to the fetcher factory
    pub fn data_context(mut self, context: DataContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the fetcher factory. The factory runs once per `build()`; a
    /// construction failure fails the build.
    pub fn fetcher<F>(mut self, factory: F) -> Self
    where
        F: Fn(&DataContext) -> Result<Arc<dyn DataFetcher>> + Send + Sync + 'static,
    {
        self.fetcher_factory = Arc::new(factory);
        self
    }

    /// Register a named query as a dedicated root field.
    ///
    /// The registration is resolved at build time against the entity set; a
    /// query whose root entity is unknown is skipped with a warning.
    pub fn named_query(mut self, name: impl Into<String>, query: NamedQuery) -> Self {
        self.named_queries.insert(name.into(), query);
        self
    }

    /// Build the GraphQL schema: custom scalars, one object type per entity,
    /// and the root query type, all in a single pass over the metadata.
    pub fn build(&self) -> Result<Schema> {
        let entities = self.metadata.entities()?;

        if entities.is_empty() {
            return Err(EntigraphError::SchemaGeneration(
                "No entities in metadata source".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for entity in &entities {
            entity.validate().map_err(EntigraphError::Metadata)?;
            if !names.insert(entity.name.as_str()) {
                return Err(EntigraphError::Metadata(format!(
                    "Duplicate entity name '{}'",
                    entity.name
                )));
            }
        }

        let fetcher = (self.fetcher_factory)(&self.context)
            .map_err(|e| EntigraphError::ResolverConstruction(e.to_string()))?;

        let mut schema_builder = Schema::build("root", None, None);

        for scalar in register_custom_scalars() {
            schema_builder = schema_builder.register(scalar);
        }

        for entity in &entities {
            tracing::debug!("Building object type for entity: {}", entity.name);
            schema_builder = schema_builder.register(entity_object(entity, &entities, &fetcher));
        }

        schema_builder = schema_builder.register(self.root_query_type(&entities, &fetcher));

        schema_builder
            .finish()
            .map_err(|e| EntigraphError::SchemaGeneration(format!("Failed to build schema: {}", e)))
    }

    /// Build the root query type: per entity, the `all<Name>s` and `<Name>`
    /// field pair, then one field per matched named query.
    fn root_query_type(&self, entities: &[Entity], fetcher: &Arc<dyn DataFetcher>) -> Object {
        let mut root = Object::new("root");

        for entity in entities {
            let attrs = attribute_kinds(entity);

            // The two generated fields are behaviorally identical; both are
            // emitted as found in the source metadata contract.
            for field_name in [format!("all{}s", entity.name), entity.name.clone()] {
                let entity_name = entity.name.clone();
                let attrs_for_closure = attrs.clone();
                let fetcher = Arc::clone(fetcher);

                let mut field = Field::new(
                    field_name,
                    TypeRef::named_list(&entity.name),
                    move |ctx| {
                        let entity_name = entity_name.clone();
                        let attrs = attrs_for_closure.clone();
                        let fetcher = Arc::clone(&fetcher);

                        FieldFuture::new(async move {
                            let args = extract_arguments(&ctx.args, &attrs);
                            let rows = fetcher
                                .fetch(&entity_name, &args)
                                .map_err(|e| e.to_string())?;

                            Ok(Some(FieldValue::list(
                                rows.into_iter().map(FieldValue::owned_any),
                            )))
                        })
                    },
                );

                for arg in find_arguments(entity) {
                    field = field.argument(arg);
                }

                root = root.field(field);
            }
        }

        for (key, query) in &self.named_queries {
            let Some(entity) = entities.iter().find(|e| e.name == query.root_entity()) else {
                tracing::warn!(
                    "Named query '{}' targets unknown entity '{}', skipping registration",
                    key,
                    query.root_entity()
                );
                continue;
            };

            let attrs = attribute_kinds(entity);
            let query_for_closure = query.clone();
            let fetcher = Arc::clone(fetcher);

            let mut field = Field::new(key, TypeRef::named_list(&entity.name), move |ctx| {
                let query = query_for_closure.clone();
                let attrs = attrs.clone();
                let fetcher = Arc::clone(&fetcher);

                FieldFuture::new(async move {
                    let args = extract_arguments(&ctx.args, &attrs);
                    let rows = fetcher
                        .fetch_query(&query, &args)
                        .map_err(|e| e.to_string())?;

                    Ok(Some(FieldValue::list(
                        rows.into_iter().map(FieldValue::owned_any),
                    )))
                })
            });

            for arg in find_arguments(entity) {
                field = field.argument(arg);
            }

            root = root.field(field);
        }

        root
    }
}

/// Build the object type for one entity: attribute fields typed by the scalar
/// mapper plus relationship fields referencing their target by name.
fn entity_object(entity: &Entity, all: &[Entity], fetcher: &Arc<dyn DataFetcher>) -> Object {
    let mut object = Object::new(&entity.name);

    if let Some(desc) = &entity.description {
        object = object.description(desc);
    }

    for attr in &entity.attributes {
        let kind = scalar_kind_of(attr.native_type);
        let field_name_for_closure = attr.name.clone();

        let field = Field::new(&attr.name, kind.type_ref(), move |ctx| {
            let field_name = field_name_for_closure.clone();

            FieldFuture::new(async move {
                // Extract the attribute value from the parent row object
                let parent = ctx.parent_value.try_downcast_ref::<Value>()?;

                if let Value::Object(obj) = parent {
                    if let Some(value) = obj.get(field_name.as_str()) {
                        return Ok(Some(FieldValue::value(value.clone())));
                    }
                }

                Ok(Some(FieldValue::NULL))
            })
        });

        object = object.field(field);
    }

    for rel in &entity.relationships {
        // Target resolution is by name only. A relationship naming an entity
        // absent from the build has no resolvable type reference, so the
        // field is skipped; an unknown target never fails the build.
        let Some(target) = all.iter().find(|e| e.name == rel.target) else {
            tracing::warn!(
                "Relationship '{}.{}' targets unknown entity '{}', skipping field",
                entity.name,
                rel.name,
                rel.target
            );
            continue;
        };

        let mut arguments = Vec::new();
        let mut seen = HashSet::new();
        for attr in &target.attributes {
            let kind = scalar_kind_of(attr.native_type);
            if seen.insert((attr.name.clone(), kind)) {
                arguments.push(InputValue::new(&attr.name, kind.type_ref()));
            }
        }
        arguments.extend(default_filter_arguments());

        let type_ref = if rel.is_to_many() {
            TypeRef::named_list(&rel.target)
        } else {
            TypeRef::named(&rel.target)
        };

        let to_many = rel.is_to_many();
        let rel_for_closure = rel.clone();
        let target_attrs = attribute_kinds(target);
        let fetcher = Arc::clone(fetcher);

        let mut field = Field::new(&rel.name, type_ref, move |ctx| {
            let rel = rel_for_closure.clone();
            let attrs = target_attrs.clone();
            let fetcher = Arc::clone(&fetcher);

            FieldFuture::new(async move {
                let args = extract_arguments(&ctx.args, &attrs);
                let parent = ctx.parent_value.try_downcast_ref::<Value>()?;
                let rows = fetcher
                    .fetch_related(parent, &rel, &args)
                    .map_err(|e| e.to_string())?;

                if to_many {
                    Ok(Some(FieldValue::list(
                        rows.into_iter().map(FieldValue::owned_any),
                    )))
                } else {
                    Ok(rows.into_iter().next().map(FieldValue::owned_any))
                }
            })
        });

        for arg in arguments {
            field = field.argument(arg);
        }

        object = object.field(field);
    }

    object
}

fn attribute_kinds(entity: &Entity) -> Vec<(String, ScalarKind)> {
    entity
        .attributes
        .iter()
        .map(|a| (a.name.clone(), scalar_kind_of(a.native_type)))
        .collect()
}

/// Argument list for a generated find field: the entity's own attributes plus
/// the default filter arguments.
fn find_arguments(entity: &Entity) -> Vec<InputValue> {
    let mut args: Vec<InputValue> = entity
        .attributes
        .iter()
        .map(|a| InputValue::new(&a.name, scalar_kind_of(a.native_type).type_ref()))
        .collect();

    args.extend(default_filter_arguments());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Attribute, Cardinality, NativeType, Relationship};

    fn customer() -> Entity {
        Entity {
            name: "Customer".to_string(),
            description: None,
            attributes: vec![
                Attribute {
                    name: "id".to_string(),
                    native_type: NativeType::Int64,
                },
                Attribute {
                    name: "name".to_string(),
                    native_type: NativeType::String,
                },
            ],
            relationships: vec![],
        }
    }

    #[test]
    fn test_empty_metadata_is_an_error() {
        let builder = SchemaBuilder::new(Vec::<Entity>::new());
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_duplicate_entity_names_rejected() {
        let builder = SchemaBuilder::new(vec![customer(), customer()]);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_invalid_entity_rejected() {
        let mut entity = customer();
        entity.name = "customer".to_string();
        let builder = SchemaBuilder::new(vec![entity]);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_fetcher_construction_failure_fails_build() {
        let builder = SchemaBuilder::new(vec![customer()]).fetcher(|_ctx| {
            Err(EntigraphError::Fetch("no backend available".to_string()))
        });

        let err = builder.build().unwrap_err();
        assert!(matches!(err, EntigraphError::ResolverConstruction(_)));
    }

    #[test]
    fn test_build_emits_find_field_pair() {
        let schema = SchemaBuilder::new(vec![customer()]).build().unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("allCustomers"));
        assert!(sdl.contains("Customer("));
        assert!(sdl.contains("type Customer"));
    }

    #[test]
    fn test_unknown_relationship_target_is_non_fatal() {
        let mut entity = customer();
        entity.relationships.push(Relationship {
            name: "ghosts".to_string(),
            target: "Phantom".to_string(),
            cardinality: Cardinality::Many,
        });

        let schema = SchemaBuilder::new(vec![entity])
            .build()
            .expect("Unknown relationship target must not fail the build");

        let sdl = schema.sdl();
        assert!(!sdl.contains("ghosts"));
        assert!(!sdl.contains("Phantom"));
        // the entity's own fields are unaffected
        assert!(sdl.contains("type Customer"));
        assert!(sdl.contains("allCustomers"));
    }

    #[test]
    fn test_unknown_named_query_is_skipped() {
        let schema = SchemaBuilder::new(vec![customer()])
            .named_query("phantoms", NamedQuery::new("Phantom"))
            .build()
            .unwrap();

        assert!(!schema.sdl().contains("phantoms"));
    }
}
