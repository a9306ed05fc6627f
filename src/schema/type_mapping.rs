/// Native type to GraphQL scalar mapping
///
/// A fixed, total translation from ORM-native value types to the small closed
/// set of GraphQL scalar kinds the generated schema uses.

use crate::metadata::NativeType;
use async_graphql::dynamic::TypeRef;

/// The closed set of output scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    String,
    Int,
    Long,
    Float,
}

impl ScalarKind {
    /// GraphQL type name for this kind. `Long` is a custom scalar registered
    /// by `register_custom_scalars`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "Boolean",
            ScalarKind::String => "String",
            ScalarKind::Int => "Int",
            ScalarKind::Long => "Long",
            ScalarKind::Float => "Float",
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::named(self.type_name())
    }
}

/// Map a native value type to its GraphQL scalar kind.
///
/// Pure and total; the match expression is the whole lookup table and anything
/// without an explicit row maps to `String`, so the mapping never fails.
///
/// # Type Mapping Rules
///
/// - `boolean` → `Boolean`
/// - `string` → `String`
/// - 8/16/32-bit integers → `Int`
/// - 64-bit and arbitrary-precision integers → `Long`
/// - 32/64-bit floats and arbitrary-precision decimals → `Float`
/// - everything else (dates, timestamps, uuids, binary) → `String`
pub fn scalar_kind_of(native: NativeType) -> ScalarKind {
    match native {
        NativeType::Boolean => ScalarKind::Boolean,
        NativeType::String => ScalarKind::String,
        NativeType::Int8 | NativeType::Int16 | NativeType::Int32 => ScalarKind::Int,
        NativeType::Int64 | NativeType::BigInteger => ScalarKind::Long,
        NativeType::Float32 | NativeType::Float64 | NativeType::Decimal => ScalarKind::Float,
        _ => ScalarKind::String,
    }
}
