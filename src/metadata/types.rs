use serde::{Deserialize, Serialize};

/// Native scalar value types as reported by the ORM layer.
///
/// The schema builder never fails on a native type: anything without an
/// explicit scalar mapping falls back to the GraphQL `String` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    Boolean,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    BigInteger,
    Float32,
    Float64,
    Decimal,
    Date,
    Timestamp,
    Uuid,
    Binary,
}

/// Cardinality of a relationship: a single related row or a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

impl Default for Cardinality {
    fn default() -> Self {
        Cardinality::One
    }
}

/// A scalar attribute of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, unique within its entity
    pub name: String,

    /// Native value type as declared by the ORM
    pub native_type: NativeType,
}

/// A named, directional link to another entity.
///
/// The target is a name reference, not a direct link; it is resolved lazily
/// against the full entity set, so mutually referencing and self-referencing
/// entity graphs need no construction ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship (field) name, unique within its entity
    pub name: String,

    /// Target entity name
    pub target: String,

    #[serde(default)]
    pub cardinality: Cardinality,
}

impl Relationship {
    pub fn is_to_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }
}

/// A persistent entity definition: name, scalar attributes, relationships.
///
/// Declared in TOML as `[[entity]]` with nested `[[entity.attribute]]` and
/// `[[entity.relationship]]` tables, or constructed programmatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// GraphQL type name (PascalCase), unique within a build
    pub name: String,

    /// Optional description for the GraphQL schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "attribute")]
    pub attributes: Vec<Attribute>,

    #[serde(default, rename = "relationship")]
    pub relationships: Vec<Relationship>,
}

impl Entity {
    /// Validate an entity declaration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.name.chars().all(|c| c.is_alphanumeric()) {
            return Err(format!("Entity name '{}' must be alphanumeric", self.name));
        }

        if !self.name.chars().next().unwrap_or('_').is_uppercase() {
            return Err(format!(
                "Entity name '{}' must start with uppercase letter (PascalCase)",
                self.name
            ));
        }

        if self.attributes.is_empty() {
            return Err(format!("Entity '{}' has no attributes", self.name));
        }

        let mut seen = std::collections::HashSet::new();
        for attr in &self.attributes {
            if !seen.insert(attr.name.as_str()) {
                return Err(format!(
                    "Entity '{}' has duplicate attribute '{}'",
                    self.name, attr.name
                ));
            }
        }

        for rel in &self.relationships {
            if !seen.insert(rel.name.as_str()) {
                return Err(format!(
                    "Entity '{}' has duplicate field name '{}'",
                    self.name, rel.name
                ));
            }
        }

        Ok(())
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
