/// Default filter arguments
///
/// Every generated field that supports filtering carries one optional
/// list-of-string argument per filter operator. Filter values are always
/// supplied as strings, whatever the field's own value type, since operators
/// like range and set membership take textual operands.

use async_graphql::dynamic::{InputValue, TypeRef};

/// The fixed filter operator set.
///
/// `Undefined` is a reserved marker and is never emitted as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Undefined,
    In,
    NotIn,
    Between,
    Like,
}

impl FilterOp {
    pub const ALL: [FilterOp; 5] = [
        FilterOp::Undefined,
        FilterOp::In,
        FilterOp::NotIn,
        FilterOp::Between,
        FilterOp::Like,
    ];

    /// Operators that become schema arguments, in emission order
    pub fn emitted() -> impl Iterator<Item = FilterOp> {
        Self::ALL
            .iter()
            .copied()
            .filter(|op| *op != FilterOp::Undefined)
    }

    /// GraphQL argument name for this operator
    pub fn argument_name(&self) -> &'static str {
        match self {
            FilterOp::Undefined => "_undefined",
            FilterOp::In => "_in",
            FilterOp::NotIn => "_notIn",
            FilterOp::Between => "_between",
            FilterOp::Like => "_like",
        }
    }
}

/// Build the default filter argument list: one `[String]` argument per emitted
/// operator. Deterministic, so callers may rebuild it per field.
pub fn default_filter_arguments() -> Vec<InputValue> {
    FilterOp::emitted()
        .map(|op| InputValue::new(op.argument_name(), TypeRef::named_list(TypeRef::STRING)))
        .collect()
}
