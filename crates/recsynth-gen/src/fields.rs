//! Field specifications and field lists
//!
//! A [`FieldSpec`] describes one field to be synthesized: its kind, default
//! policy, optional declared type, and a strategy for values that fit it.
//! A `FieldSpec` carries no name; the synthesizer assigns names from
//! [`crate::names::AttrNames`] once the list is ordered.

use crate::primitives::{PrimitiveKind, PrimitiveSet, finite_f64};
use crate::record::{DefaultFactory, FieldDefault};
use crate::types::TypeTag;
use crate::value::Value;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Upper bound on the number of fields in a generated list
pub const MAX_FIELDS: usize = 10;

/// Three-way switch for a per-field coin flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    /// Always off
    Never,
    /// Drawn per field
    #[default]
    Random,
    /// Always on
    Always,
}

impl Toggle {
    /// Strategy for the switch state
    #[must_use]
    pub fn draw(self) -> BoxedStrategy<bool> {
        match self {
            Self::Never => Just(false).boxed(),
            Self::Random => any::<bool>().boxed(),
            Self::Always => Just(true).boxed(),
        }
    }
}

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Always `None`
    Bare,
    /// Integer
    Integer,
    /// Finite float
    Float,
    /// Unicode text
    Text,
    /// Raw bytes
    Bytes,
    /// Dict of text to integer
    Dict,
    /// A nested record, directly or inside a list or dict
    NestedRecord,
}

/// Specification of one field plus a strategy for matching values
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Value kind
    pub kind: FieldKind,
    /// Default policy
    pub default: FieldDefault,
    /// Explicit annotation, `None` when unannotated
    pub declared_type: Option<TypeTag>,
    /// Values that satisfy the field
    pub values: BoxedStrategy<Value>,
}

impl FieldSpec {
    /// Create a field spec
    #[must_use]
    pub fn new(
        kind: FieldKind,
        default: FieldDefault,
        declared_type: Option<TypeTag>,
        values: BoxedStrategy<Value>,
    ) -> Self {
        Self {
            kind,
            default,
            declared_type,
            values,
        }
    }

    /// Returns true if the field carries a default value or factory
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.has_default()
    }
}

fn default_or_required(has_default: bool, value: Value) -> FieldDefault {
    if has_default {
        FieldDefault::Value(value)
    } else {
        FieldDefault::Required
    }
}

/// Field that only ever holds `None`
pub fn bare_field(defaults: Toggle) -> BoxedStrategy<FieldSpec> {
    defaults
        .draw()
        .prop_map(|has_default| {
            FieldSpec::new(
                FieldKind::Bare,
                default_or_required(has_default, Value::None),
                None,
                Just(Value::None).boxed(),
            )
        })
        .boxed()
}

/// Integer field
pub fn int_field(defaults: Toggle) -> BoxedStrategy<FieldSpec> {
    (defaults.draw(), any::<i64>())
        .prop_map(|(has_default, default)| {
            FieldSpec::new(
                FieldKind::Integer,
                default_or_required(has_default, Value::Int(default)),
                None,
                any::<i64>().prop_map(Value::Int).boxed(),
            )
        })
        .boxed()
}

/// Text field, declared as `str` when `annotations` comes up on
pub fn str_field(defaults: Toggle, annotations: Toggle) -> BoxedStrategy<FieldSpec> {
    (defaults.draw(), any::<String>(), annotations.draw())
        .prop_map(|(has_default, default, annotated)| {
            FieldSpec::new(
                FieldKind::Text,
                default_or_required(has_default, Value::Text(default)),
                annotated.then_some(TypeTag::Str),
                any::<String>().prop_map(Value::Text).boxed(),
            )
        })
        .boxed()
}

/// Finite float field
pub fn float_field(defaults: Toggle) -> BoxedStrategy<FieldSpec> {
    (defaults.draw(), finite_f64())
        .prop_map(|(has_default, default)| {
            FieldSpec::new(
                FieldKind::Float,
                default_or_required(has_default, Value::Float(default)),
                None,
                finite_f64().prop_map(Value::Float).boxed(),
            )
        })
        .boxed()
}

/// Bytes field
pub fn bytes_field(defaults: Toggle) -> BoxedStrategy<FieldSpec> {
    (defaults.draw(), PrimitiveKind::Bytes.values())
        .prop_map(|(has_default, default)| {
            FieldSpec::new(
                FieldKind::Bytes,
                default_or_required(has_default, default),
                None,
                PrimitiveKind::Bytes.values(),
            )
        })
        .boxed()
}

/// Dicts mapping text keys to integers
pub fn str_int_dicts() -> BoxedStrategy<Value> {
    btree_map(any::<String>().prop_map(Value::Text), any::<i64>().prop_map(Value::Int), 0..8)
        .prop_map(Value::Map)
        .boxed()
}

/// Dict field. Its default is a factory so instances never share one dict.
pub fn dict_field(defaults: Toggle) -> BoxedStrategy<FieldSpec> {
    (defaults.draw(), str_int_dicts())
        .prop_map(|(has_default, default)| {
            let default = if has_default {
                FieldDefault::Factory(DefaultFactory::cloning(default))
            } else {
                FieldDefault::Required
            };
            FieldSpec::new(FieldKind::Dict, default, None, str_int_dicts())
        })
        .boxed()
}

/// One simple field, builder chosen uniformly from those `primitives` allows.
///
/// The full set draws bare, integer, text, float and dict fields. The
/// text-and-bytes set holds no numbers anywhere, so it drops the integer,
/// float and integer-valued dict builders and draws bare, text and bytes
/// fields.
pub fn simple_fields(defaults: Toggle, primitives: PrimitiveSet) -> BoxedStrategy<FieldSpec> {
    match primitives {
        PrimitiveSet::Full => prop_oneof![
            bare_field(defaults),
            int_field(defaults),
            str_field(defaults, Toggle::Random),
            float_field(defaults),
            dict_field(defaults),
        ]
        .boxed(),
        PrimitiveSet::TextAndBytes => prop_oneof![
            bare_field(defaults),
            str_field(defaults, Toggle::Random),
            bytes_field(defaults),
        ]
        .boxed(),
    }
}

/// Stable-sort fields so that those without defaults come first.
///
/// Relative order inside each group is preserved.
#[must_use]
pub fn sort_fields(mut fields: Vec<FieldSpec>) -> Vec<FieldSpec> {
    fields.sort_by_key(FieldSpec::has_default);
    fields
}

/// Returns true if no defaulted field precedes a required one
#[must_use]
pub fn is_default_ordered(fields: &[FieldSpec]) -> bool {
    fields
        .windows(2)
        .all(|pair| !pair[0].has_default() || pair[1].has_default())
}

/// Ordered field lists of `min_size..=max_size` simple fields.
///
/// `max_size` is capped at [`MAX_FIELDS`], and `min_size` at `max_size`.
pub fn lists_of_fields(
    defaults: Toggle,
    primitives: PrimitiveSet,
    min_size: usize,
    max_size: usize,
) -> BoxedStrategy<Vec<FieldSpec>> {
    let max_size = max_size.min(MAX_FIELDS);
    let min_size = min_size.min(max_size);
    vec(simple_fields(defaults, primitives), min_size..=max_size)
        .prop_map(|fields| {
            trace!(count = fields.len(), "fields.drawn");
            sort_fields(fields)
        })
        .boxed()
}
