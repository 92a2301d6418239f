//! Record synthesis
//!
//! Turns an ordered field list into a brand-new [`RecordType`] and a strategy
//! for positional value tuples that instantiate it.

use crate::error::Result;
use crate::fields::{FieldSpec, Toggle, lists_of_fields, sort_fields};
use crate::names::AttrNames;
use crate::primitives::PrimitiveSet;
use crate::record::{FieldDef, Record, RecordBuilder, RecordType};
use crate::value::Value;
use proptest::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Name given to every synthesized record type
pub const RECORD_NAME: &str = "HypClass";

/// A synthesized record type paired with values that instantiate it
#[derive(Debug, Clone)]
pub struct SampleRecord {
    /// The freshly built type
    pub record_type: Arc<RecordType>,
    /// One value per field, positionally aligned with the type's fields
    pub values: Vec<Value>,
}

impl SampleRecord {
    /// Construct the record positionally from the sample values.
    ///
    /// # Errors
    ///
    /// Propagates [`RecordType::instantiate`] errors.
    pub fn instantiate(&self) -> Result<Record> {
        self.record_type.instantiate(self.values.clone())
    }
}

/// Build the record type for an already ordered field list.
///
/// Names come from a fresh [`AttrNames`] sequence, zipped with the fields in
/// order.
///
/// # Errors
///
/// Fails if the list is longer than the name space, or if the builder
/// rejects the declaration.
pub fn build_record_type(fields: &[FieldSpec]) -> Result<Arc<RecordType>> {
    let names = AttrNames::take_names(fields.len())?;
    let defs = names.into_iter().zip(fields).map(|(name, spec)| {
        FieldDef::new(name, spec.declared_type.clone(), spec.default.clone())
    });
    RecordBuilder::new(RECORD_NAME).fields(defs).build()
}

/// Combine per-field strategies into one strategy for the whole tuple
fn value_tuples(strategies: Vec<BoxedStrategy<Value>>) -> BoxedStrategy<Vec<Value>> {
    strategies
        .into_iter()
        .fold(Just(Vec::new()).boxed(), |acc, field| {
            (acc, field)
                .prop_map(|(mut values, value)| {
                    values.push(value);
                    values
                })
                .boxed()
        })
}

/// Synthesize a record type from `fields` and pair it with value tuples.
///
/// Fields are stable-sorted by "has default" first. Each call builds a new
/// type; identities are never shared between calls.
///
/// # Panics
///
/// Panics if the record cannot be built, which only happens when a caller
/// asks for more fields than [`AttrNames`] can name. Generated lists are
/// capped well below that.
pub fn synthesize(fields: Vec<FieldSpec>) -> BoxedStrategy<SampleRecord> {
    let fields = sort_fields(fields);
    let record_type = match build_record_type(&fields) {
        Ok(ty) => ty,
        Err(e) => panic!("record synthesis rejected generated fields: {e}"),
    };
    debug!(
        record = %record_type.name(),
        id = record_type.id(),
        fields = fields.len(),
        "record.synthesized"
    );

    let strategies = fields.into_iter().map(|f| f.values).collect();
    (Just(record_type), value_tuples(strategies))
        .prop_map(|(record_type, values)| SampleRecord {
            record_type,
            values,
        })
        .boxed()
}

/// Simple records: no nested records, `min_fields..=max_fields` fields
/// drawn from the builders `primitives` allows
pub fn simple_records(
    defaults: Toggle,
    primitives: PrimitiveSet,
    min_fields: usize,
    max_fields: usize,
) -> BoxedStrategy<SampleRecord> {
    lists_of_fields(defaults, primitives, min_fields, max_fields)
        .prop_flat_map(synthesize)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldKind, MAX_FIELDS, bare_field};
    use crate::names::is_reserved;
    use crate::record::FieldDefault;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;
    use std::collections::HashSet;

    fn bare(n: usize) -> Vec<FieldSpec> {
        let mut runner = TestRunner::default();
        (0..n)
            .map(|_| {
                bare_field(Toggle::Never)
                    .new_tree(&mut runner)
                    .expect("Failed to generate")
                    .current()
            })
            .collect()
    }

    #[test]
    fn test_three_bare_fields_named_a_b_c() {
        let ty = build_record_type(&bare(3)).unwrap();
        let names: Vec<&str> = ty.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "_b", "c"]);
        assert_eq!(ty.name(), RECORD_NAME);
    }

    #[test]
    fn test_twenty_seven_fields_reach_two_letter_names() {
        let ty = build_record_type(&bare(27)).unwrap();
        assert_eq!(ty.fields()[25].name, "_z");
        assert_eq!(ty.fields()[26].name, "aa");
    }

    #[test]
    fn test_each_synthesis_builds_a_new_type() {
        let mut runner = TestRunner::default();
        let a = synthesize(bare(2))
            .new_tree(&mut runner)
            .expect("Failed to generate")
            .current();
        let b = synthesize(bare(2))
            .new_tree(&mut runner)
            .expect("Failed to generate")
            .current();
        assert_ne!(a.record_type.id(), b.record_type.id());
    }

    #[test]
    fn test_synthesize_sorts_fields() {
        let mut fields = bare(1);
        fields.insert(
            0,
            FieldSpec::new(
                FieldKind::Integer,
                FieldDefault::Value(Value::Int(1)),
                None,
                Just(Value::Int(2)).boxed(),
            ),
        );
        let mut runner = TestRunner::default();
        let sample = synthesize(fields)
            .new_tree(&mut runner)
            .expect("Failed to generate")
            .current();
        assert!(!sample.record_type.fields()[0].default.has_default());
        assert_eq!(sample.values, vec![Value::None, Value::Int(2)]);
    }

    #[test]
    fn test_empty_record() {
        let mut runner = TestRunner::default();
        let sample = synthesize(Vec::new())
            .new_tree(&mut runner)
            .expect("Failed to generate")
            .current();
        assert!(sample.values.is_empty());
        assert!(sample.instantiate().unwrap().values().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_samples_instantiate(sample in simple_records(Toggle::Random, PrimitiveSet::Full, 0, MAX_FIELDS)) {
            let record = sample
                .instantiate()
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(record.values(), sample.values.as_slice());
        }

        #[test]
        fn prop_names_unique_and_not_reserved(sample in simple_records(Toggle::Random, PrimitiveSet::Full, 0, MAX_FIELDS)) {
            let names: HashSet<&str> = sample
                .record_type
                .fields()
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            prop_assert_eq!(names.len(), sample.record_type.fields().len());
            prop_assert!(names.iter().all(|n| !is_reserved(n)));
        }

        #[test]
        fn prop_values_fit_declared_types(sample in simple_records(Toggle::Random, PrimitiveSet::Full, 0, MAX_FIELDS)) {
            for (field, value) in sample.record_type.fields().iter().zip(&sample.values) {
                if let Some(tag) = &field.declared_type {
                    prop_assert!(tag.admits(value), "{tag} rejects {value:?}");
                }
            }
        }

        #[test]
        fn prop_default_records_construct_without_arguments(sample in simple_records(Toggle::Always, PrimitiveSet::Full, 0, MAX_FIELDS)) {
            prop_assert!(sample.record_type.is_default_constructible());
            prop_assert!(sample.record_type.default_instance().is_ok());
        }
    }
}
