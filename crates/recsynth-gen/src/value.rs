//! Dynamic values held by generated records
//!
//! Values are totally ordered so that they can be collected into sets and
//! used as map keys. Floats order by [`f64::total_cmp`]; records order by
//! type identity first, then by field values.

use crate::record::Record;
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// A dynamically typed sample value
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value
    None,
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Unicode text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Mutable sequence
    List(Vec<Value>),
    /// Immutable sequence
    Tuple(Vec<Value>),
    /// Mutable set
    Set(BTreeSet<Value>),
    /// Immutable set
    FrozenSet(BTreeSet<Value>),
    /// Mapping
    Map(BTreeMap<Value, Value>),
    /// Instance of a synthesized record type
    Record(Record),
}

impl Value {
    /// Short name of the value's kind
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::FrozenSet(_) => "frozenset",
            Self::Map(_) => "dict",
            Self::Record(_) => "record",
        }
    }

    /// Returns true for [`Value::None`]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Integer payload, if any
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float payload, if any
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text payload, if any
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List items, if this is a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries, if this is a map
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Record instance, if this is one
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Number of record layers reachable from this value.
    ///
    /// Scalars have depth 0, a record without nested records has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Record(r) => r.depth(),
            Self::List(items) | Self::Tuple(items) => {
                items.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Set(items) | Self::FrozenSet(items) => {
                items.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Map(m) => m
                .iter()
                .map(|(k, v)| k.depth().max(v.depth()))
                .max()
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns true when no float anywhere inside the value is NaN or infinite
    #[must_use]
    pub fn all_floats_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            Self::List(items) | Self::Tuple(items) => items.iter().all(Self::all_floats_finite),
            Self::Set(items) | Self::FrozenSet(items) => items.iter().all(Self::all_floats_finite),
            Self::Map(m) => m
                .iter()
                .all(|(k, v)| k.all_floats_finite() && v.all_floats_finite()),
            Self::Record(r) => r.values().iter().all(Self::all_floats_finite),
            _ => true,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::Bytes(_) => 4,
            Self::List(_) => 5,
            Self::Tuple(_) => 6,
            Self::Set(_) => 7,
            Self::FrozenSet(_) => 8,
            Self::Map(_) => 9,
            Self::Record(_) => 10,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) | (Self::FrozenSet(a), Self::FrozenSet(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            (Self::Record(a), Self::Record(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.collect_seq(b),
            Self::List(items) | Self::Tuple(items) => serializer.collect_seq(items),
            Self::Set(items) | Self::FrozenSet(items) => serializer.collect_seq(items),
            // Keys are arbitrary values, so maps go out as [key, value] pairs.
            Self::Map(m) => serializer.collect_seq(m.iter()),
            Self::Record(r) => serializer.collect_map(r.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::None.kind_name(), "none");
        assert_eq!(Value::from(1i64).kind_name(), "int");
        assert_eq!(Value::from(1.5f64).kind_name(), "float");
        assert_eq!(Value::from("x").kind_name(), "str");
        assert_eq!(Value::from(vec![1u8]).kind_name(), "bytes");
        assert_eq!(Value::Map(BTreeMap::new()).kind_name(), "dict");
    }

    #[test]
    fn test_ordering_across_kinds_is_by_rank() {
        assert!(Value::None < Value::Int(0));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::MIN));
        assert!(Value::Float(0.0) < Value::Text(String::new()));
    }

    #[test]
    fn test_float_equality_uses_total_order() {
        assert_eq!(Value::Float(1.0), Value::Float(1.0));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn test_values_as_set_members() {
        let set: BTreeSet<Value> = [Value::Int(1), Value::Int(1), Value::from("a")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_all_floats_finite_is_recursive() {
        let ok = Value::List(vec![Value::Float(1.0), Value::Tuple(vec![Value::Float(2.0)])]);
        assert!(ok.all_floats_finite());
        let bad = Value::List(vec![Value::Tuple(vec![Value::Float(f64::INFINITY)])]);
        assert!(!bad.all_floats_finite());
    }

    #[test]
    fn test_scalar_depth_is_zero() {
        assert_eq!(Value::Int(3).depth(), 0);
        assert_eq!(Value::List(vec![Value::Int(3)]).depth(), 0);
    }

    #[test]
    fn test_serialize_scalars_and_collections() {
        let v = Value::List(vec![Value::Int(1), Value::None, Value::from("x")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,null,"x"]"#);
    }

    #[test]
    fn test_serialize_map_as_pairs() {
        let mut m = BTreeMap::new();
        m.insert(Value::Int(2), Value::from("two"));
        let json = serde_json::to_string(&Value::Map(m)).unwrap();
        assert_eq!(json, r#"[[2,"two"]]"#);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(4).as_int(), Some(4));
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert!(Value::None.is_none());
        assert!(Value::Int(1).as_record().is_none());
        assert!(Value::List(vec![]).as_list().is_some());
    }
}
