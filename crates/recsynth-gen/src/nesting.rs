//! Nesting combinator
//!
//! Wraps a simpler record type into a new one by appending a trailing,
//! defaulted field that holds an instance of the inner type: directly, in a
//! one-element list, or under the `"cls"` key of a one-entry dict.

use crate::fields::{FieldKind, FieldSpec, Toggle, lists_of_fields};
use crate::primitives::PrimitiveSet;
use crate::record::{DefaultFactory, FieldDefault, Record, RecordType};
use crate::synth::{SampleRecord, synthesize};
use crate::types::TypeTag;
use crate::value::Value;
use proptest::prelude::*;
use proptest::strategy::Union;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Key under which [`NestingVariant::HoldsDict`] stores the inner record
pub const DICT_KEY: &str = "cls";

/// How the outer record holds the inner one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NestingVariant {
    /// `Inner()`, unannotated
    HoldsOne,
    /// `Inner()`, declared as `Inner`
    HoldsOneTyped,
    /// `[Inner()]`, unannotated
    HoldsList,
    /// `[Inner()]`, declared as `List[Inner]`
    HoldsListTyped,
    /// `{"cls": Inner()}`, unannotated
    HoldsDict,
}

impl NestingVariant {
    /// Get all variants
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::HoldsOne,
            Self::HoldsOneTyped,
            Self::HoldsList,
            Self::HoldsListTyped,
            Self::HoldsDict,
        ]
    }

    /// Place an inner instance the way this variant holds it
    #[must_use]
    pub fn wrap(&self, inner: Record) -> Value {
        let inner = Value::Record(inner);
        match self {
            Self::HoldsOne | Self::HoldsOneTyped => inner,
            Self::HoldsList | Self::HoldsListTyped => Value::List(vec![inner]),
            Self::HoldsDict => Value::Map(BTreeMap::from([(Value::from(DICT_KEY), inner)])),
        }
    }

    /// Declared type of the nesting field
    #[must_use]
    pub fn declared_type(&self, inner: &Arc<RecordType>) -> Option<TypeTag> {
        match self {
            Self::HoldsOneTyped => Some(TypeTag::Record(Arc::clone(inner))),
            Self::HoldsListTyped => Some(TypeTag::list_of(TypeTag::Record(Arc::clone(inner)))),
            Self::HoldsOne | Self::HoldsList | Self::HoldsDict => None,
        }
    }

    /// Field holding `inner`. Its default factory builds a fresh inner
    /// instance on every call; `sample` is the value offered for
    /// positional construction.
    #[must_use]
    pub fn nested_field(self, inner: &Arc<RecordType>, sample: Record) -> FieldSpec {
        let factory_inner = Arc::clone(inner);
        let factory =
            DefaultFactory::new(move || factory_inner.default_instance().map(|r| self.wrap(r)));
        FieldSpec::new(
            FieldKind::NestedRecord,
            FieldDefault::Factory(factory),
            self.declared_type(inner),
            Just(self.wrap(sample)).boxed(),
        )
    }

    /// Append the nesting field to `base`.
    ///
    /// The new field has a default, so it stays last after the synthesizer's
    /// stable sort.
    #[must_use]
    pub fn extend(
        self,
        mut base: Vec<FieldSpec>,
        inner: &Arc<RecordType>,
        sample: Record,
    ) -> Vec<FieldSpec> {
        base.push(self.nested_field(inner, sample));
        base
    }
}

impl std::fmt::Display for NestingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoldsOne => write!(f, "holds-one"),
            Self::HoldsOneTyped => write!(f, "holds-one-typed"),
            Self::HoldsList => write!(f, "holds-list"),
            Self::HoldsListTyped => write!(f, "holds-list-typed"),
            Self::HoldsDict => write!(f, "holds-dict"),
        }
    }
}

/// Records that embed a record drawn from `simple`.
///
/// Each outer record gets a defaulted base field list of up to `max_fields`
/// fields drawn from `primitives`, plus one nesting field; the five variants
/// are equally likely. Inner records that cannot be built from defaults
/// alone are filtered out.
pub fn nested_records(
    simple: BoxedStrategy<SampleRecord>,
    primitives: PrimitiveSet,
    max_fields: usize,
) -> BoxedStrategy<SampleRecord> {
    let inner = simple
        .prop_filter_map("inner record must construct from defaults", |s| {
            s.record_type
                .default_instance()
                .ok()
                .map(|instance| (s.record_type, instance))
        })
        .boxed();
    let pairs = (lists_of_fields(Toggle::Always, primitives, 0, max_fields), inner);

    let arms = NestingVariant::all().map(|variant| {
        pairs
            .clone()
            .prop_flat_map(move |(base, (inner, instance))| {
                trace!(%variant, inner = inner.id(), "record.nesting");
                synthesize(variant.extend(base, &inner, instance))
            })
            .boxed()
    });
    Union::new(arms).boxed()
}
