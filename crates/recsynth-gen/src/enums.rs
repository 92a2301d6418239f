//! Enum types with primitive member values

use crate::primitives::{PrimitiveSet, finite_f64};
use crate::record::next_type_id;
use crate::value::Value;
use proptest::collection::btree_set;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

const MAX_MEMBERS: usize = 6;

/// 2^63; integral floats below this magnitude have an exact `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A synthesized enum: distinct member names bound to distinct values
#[derive(Debug)]
pub struct EnumType {
    id: u64,
    name: String,
    members: Vec<(String, Value)>,
}

impl EnumType {
    /// Create a new enum type with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<(String, Value)>) -> Arc<Self> {
        Arc::new(Self {
            id: next_type_id(),
            name: name.into(),
            members,
        })
    }

    /// Process-unique id
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order
    #[must_use]
    pub fn members(&self) -> &[(String, Value)] {
        &self.members
    }

    /// Value bound to member `name`
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EnumType {}

fn member_names(set: PrimitiveSet) -> BoxedStrategy<String> {
    match set {
        PrimitiveSet::Full => "\\PC+".boxed(),
        PrimitiveSet::TextAndBytes => "[a-zA-Z]+".boxed(),
    }
}

fn member_values() -> BoxedStrategy<Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        finite_f64().prop_map(Value::Float),
        "\\PC+".prop_map(Value::Text),
    ]
    .boxed()
}

/// Key under which `1` and `1.0`, or `0.0` and `-0.0`, collide.
///
/// `Value`'s own order keeps ints and floats apart and separates signed
/// zeros, which is too fine for enum member values.
#[allow(clippy::cast_possible_truncation)]
fn numeric_key(value: &Value) -> Value {
    match value {
        Value::Float(f) if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(f) => {
            Value::Int(*f as i64)
        }
        other => other.clone(),
    }
}

fn numerically_distinct(values: &BTreeSet<Value>) -> bool {
    values.iter().map(numeric_key).collect::<BTreeSet<_>>().len() == values.len()
}

/// Enum types with at least one member whose values are distinct
/// integers, finite floats or non-empty strings.
///
/// No two values compare numerically equal, so `1` and `1.0` never both
/// appear.
pub fn enums_of_primitives(set: PrimitiveSet) -> BoxedStrategy<Arc<EnumType>> {
    btree_set(member_names(set), 1..=MAX_MEMBERS)
        .prop_flat_map(|names| {
            let n = names.len();
            let values = btree_set(member_values(), n..=n)
                .prop_filter("enum values must be numerically distinct", numerically_distinct);
            (Just(names), values)
        })
        .prop_map(|(names, values)| {
            trace!(members = names.len(), "enum.synthesized");
            EnumType::new("HypEnum", names.into_iter().zip(values).collect())
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;
    use std::collections::HashSet;

    #[test]
    fn test_member_lookup() {
        let e = EnumType::new(
            "Color",
            vec![("red".to_string(), Value::Int(1)), ("blue".to_string(), Value::Int(2))],
        );
        assert_eq!(e.member("blue"), Some(&Value::Int(2)));
        assert!(e.member("green").is_none());
        assert!(TypeTag::Enum(Arc::clone(&e)).admits(&Value::Int(1)));
        assert!(!TypeTag::Enum(e).admits(&Value::Int(3)));
    }

    #[test]
    fn test_each_enum_is_a_distinct_type() {
        let a = EnumType::new("E", vec![]);
        let b = EnumType::new("E", vec![]);
        assert_ne!(*a, *b);
    }

    #[test]
    fn test_numeric_key_merges_equal_numbers() {
        assert_eq!(numeric_key(&Value::Float(1.0)), Value::Int(1));
        assert_eq!(numeric_key(&Value::Float(-0.0)), numeric_key(&Value::Float(0.0)));
        assert_eq!(numeric_key(&Value::Float(1.5)), Value::Float(1.5));
        assert_eq!(numeric_key(&Value::Float(1e300)), Value::Float(1e300));
        assert_eq!(numeric_key(&Value::Text("1".into())), Value::Text("1".into()));
    }

    #[test]
    fn test_numerically_equal_values_rejected() {
        let mixed: BTreeSet<Value> = [Value::Int(1), Value::Float(1.0)].into_iter().collect();
        assert_eq!(mixed.len(), 2);
        assert!(!numerically_distinct(&mixed));

        let zeros: BTreeSet<Value> = [Value::Float(0.0), Value::Float(-0.0)].into_iter().collect();
        assert!(!numerically_distinct(&zeros));

        let apart: BTreeSet<Value> = [Value::Int(1), Value::Float(1.5), Value::Text("1".into())]
            .into_iter()
            .collect();
        assert!(numerically_distinct(&apart));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_enum_members_are_distinct(e in enums_of_primitives(PrimitiveSet::Full)) {
            prop_assert!(!e.members().is_empty());
            let names: HashSet<&str> = e.members().iter().map(|(n, _)| n.as_str()).collect();
            prop_assert_eq!(names.len(), e.members().len());
            let values: Vec<&Value> = e.members().iter().map(|(_, v)| v).collect();
            for (i, a) in values.iter().enumerate() {
                for b in &values[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
            prop_assert!(e.members().iter().all(|(n, v)| !n.is_empty() && v.all_floats_finite()));
            let keys: HashSet<String> = e
                .members()
                .iter()
                .map(|(_, v)| format!("{:?}", numeric_key(v)))
                .collect();
            prop_assert_eq!(keys.len(), e.members().len());
        }

        #[test]
        fn prop_restricted_enum_names_are_ascii(e in enums_of_primitives(PrimitiveSet::TextAndBytes)) {
            prop_assert!(e.members().iter().all(|(n, _)| n.chars().all(|c| c.is_ascii_alphabetic())));
        }
    }
}
