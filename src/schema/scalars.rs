/// Custom GraphQL scalar types
///
/// `Long` covers the 64-bit and arbitrary-precision integer kinds the built-in
/// `Int` scalar cannot represent.

use async_graphql::dynamic::Scalar;
use async_graphql::Value;

/// Register custom scalars in the schema builder
pub fn register_custom_scalars() -> Vec<Scalar> {
    vec![long_scalar()]
}

/// Create the Long scalar
fn long_scalar() -> Scalar {
    Scalar::new("Long")
        .description("64-bit signed integer")
        .validator(is_valid_long)
}

/// Long values are integer literals or numeric strings
fn is_valid_long(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}
