//! Primitive value source
//!
//! Supplies scalar kinds paired with their canonical type tag. Floats are
//! always finite.

use crate::types::TypeTag;
use crate::value::Value;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

/// Which primitive kinds the generator may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveSet {
    /// Integers, floats, text and bytes
    #[default]
    Full,
    /// Text and bytes only, for runtimes whose number formatting is unstable
    TextAndBytes,
}

impl PrimitiveSet {
    /// Kinds included in this set
    #[must_use]
    pub fn kinds(&self) -> Vec<PrimitiveKind> {
        match self {
            Self::Full => PrimitiveKind::all().to_vec(),
            Self::TextAndBytes => vec![PrimitiveKind::Text, PrimitiveKind::Bytes],
        }
    }
}

/// A primitive value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// `int`
    Integer,
    /// `float`, never NaN or infinite
    Float,
    /// `str`
    Text,
    /// `bytes`
    Bytes,
}

impl PrimitiveKind {
    /// Get all primitive kinds
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Integer, Self::Float, Self::Text, Self::Bytes]
    }

    /// Canonical type tag of this kind
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Integer => TypeTag::Int,
            Self::Float => TypeTag::Float,
            Self::Text => TypeTag::Str,
            Self::Bytes => TypeTag::Bytes,
        }
    }

    /// Strategy for values of this kind
    #[must_use]
    pub fn values(&self) -> BoxedStrategy<Value> {
        match self {
            Self::Integer => any::<i64>().prop_map(Value::Int).boxed(),
            Self::Float => finite_f64().prop_map(Value::Float).boxed(),
            Self::Text => any::<String>().prop_map(Value::Text).boxed(),
            Self::Bytes => prop::collection::vec(any::<u8>(), 0..32)
                .prop_map(Value::Bytes)
                .boxed(),
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_tag())
    }
}

/// Strategy for finite floats of either sign, including zero and subnormals
pub fn finite_f64() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

/// Strategy choosing a primitive kind uniformly from `set`
pub fn primitive_kinds(set: PrimitiveSet) -> impl Strategy<Value = PrimitiveKind> {
    prop::sample::select(set.kinds())
}

/// Strategy yielding `(value strategy, type tag)` pairs
pub fn primitive_strategies(
    set: PrimitiveSet,
) -> impl Strategy<Value = (BoxedStrategy<Value>, TypeTag)> {
    primitive_kinds(set).prop_map(|kind| (kind.values(), kind.type_tag()))
}

/// Strategy for a single primitive value together with its type tag
pub fn primitive_values(set: PrimitiveSet) -> impl Strategy<Value = (Value, TypeTag)> {
    primitive_kinds(set).prop_flat_map(|kind| (kind.values(), Just(kind.type_tag())))
}
