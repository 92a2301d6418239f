//! Declared type tags
//!
//! A [`TypeTag`] is the type annotation attached to a generated field or
//! collection. Generic collection tags come in bare and parameterised forms
//! so that both annotated and unannotated paths of the system under test get
//! exercised.

use crate::enums::EnumType;
use crate::record::RecordType;
use crate::value::Value;
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Flavour of a sequence annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// `List`
    List,
    /// `Sequence`, also satisfied by tuples
    Sequence,
    /// `MutableSequence`
    MutableSequence,
}

impl SeqKind {
    /// Get all sequence kinds
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::List, Self::Sequence, Self::MutableSequence]
    }

    /// Annotation name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Sequence => "Sequence",
            Self::MutableSequence => "MutableSequence",
        }
    }
}

/// Flavour of a set annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// `Set`, satisfied by mutable and frozen sets
    Set,
    /// `MutableSet`
    MutableSet,
}

impl SetKind {
    /// Get all set kinds
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Set, Self::MutableSet]
    }

    /// Annotation name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Set => "Set",
            Self::MutableSet => "MutableSet",
        }
    }
}

/// Flavour of a mapping annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// `Dict`
    Dict,
    /// `MutableMapping`
    MutableMapping,
    /// `Mapping`
    Mapping,
}

impl MapKind {
    /// Get all map kinds
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Dict, Self::MutableMapping, Self::Mapping]
    }

    /// Annotation name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dict => "Dict",
            Self::MutableMapping => "MutableMapping",
            Self::Mapping => "Mapping",
        }
    }
}

/// A declared type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    /// Unconstrained
    Any,
    /// Integer
    Int,
    /// Finite float
    Float,
    /// Unicode text
    Str,
    /// Raw bytes
    Bytes,
    /// Sequence, optionally parameterised by its item type
    Seq {
        /// Annotation flavour
        kind: SeqKind,
        /// Item type, `None` for the bare form
        item: Option<Box<TypeTag>>,
    },
    /// Homogeneous variadic tuple (`Tuple[T, ...]`)
    Tuple {
        /// Item type, `None` for the bare form
        item: Option<Box<TypeTag>>,
    },
    /// Set, optionally parameterised by its item type
    Set {
        /// Annotation flavour
        kind: SetKind,
        /// Item type, `None` for the bare form
        item: Option<Box<TypeTag>>,
    },
    /// Mapping, optionally parameterised by key and value types
    Map {
        /// Annotation flavour
        kind: MapKind,
        /// Key and value types, `None` for the bare form
        params: Option<(Box<TypeTag>, Box<TypeTag>)>,
    },
    /// A synthesized record type
    Record(Arc<RecordType>),
    /// A synthesized enum type
    Enum(Arc<EnumType>),
}

impl TypeTag {
    /// `List[item]`
    #[must_use]
    pub fn list_of(item: Self) -> Self {
        Self::Seq {
            kind: SeqKind::List,
            item: Some(Box::new(item)),
        }
    }

    /// Parameterised mapping
    #[must_use]
    pub fn map_of(kind: MapKind, key: Self, value: Self) -> Self {
        Self::Map {
            kind,
            params: Some((Box::new(key), Box::new(value))),
        }
    }

    /// Returns true when `value` satisfies this declared type
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Int, Value::Int(_))
            | (Self::Str, Value::Text(_))
            | (Self::Bytes, Value::Bytes(_)) => true,
            (Self::Float, Value::Float(f)) => f.is_finite(),
            (Self::Seq { item, .. }, Value::List(items)) => admits_all(item.as_deref(), items),
            (
                Self::Seq {
                    kind: SeqKind::Sequence,
                    item,
                },
                Value::Tuple(items),
            )
            | (Self::Tuple { item }, Value::Tuple(items)) => admits_all(item.as_deref(), items),
            (
                Self::Set {
                    kind: SetKind::Set,
                    item,
                },
                Value::Set(items) | Value::FrozenSet(items),
            )
            | (
                Self::Set {
                    kind: SetKind::MutableSet,
                    item,
                },
                Value::Set(items),
            ) => admits_all(item.as_deref(), items),
            (Self::Map { params, .. }, Value::Map(entries)) => match params {
                None => true,
                Some((k, v)) => entries.iter().all(|(key, val)| k.admits(key) && v.admits(val)),
            },
            (Self::Record(ty), Value::Record(r)) => r.record_type().id() == ty.id(),
            (Self::Enum(e), v) => e.members().iter().any(|(_, member)| member == v),
            _ => false,
        }
    }
}

fn admits_all<'a>(item: Option<&TypeTag>, values: impl IntoIterator<Item = &'a Value>) -> bool {
    item.map_or(true, |t| values.into_iter().all(|v| t.admits(v)))
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "str"),
            Self::Bytes => write!(f, "bytes"),
            Self::Seq { kind, item: None } => write!(f, "{}", kind.name()),
            Self::Seq {
                kind,
                item: Some(t),
            } => write!(f, "{}[{t}]", kind.name()),
            Self::Tuple { item: None } => write!(f, "Tuple"),
            Self::Tuple { item: Some(t) } => write!(f, "Tuple[{t}, ...]"),
            Self::Set { kind, item: None } => write!(f, "{}", kind.name()),
            Self::Set {
                kind,
                item: Some(t),
            } => write!(f, "{}[{t}]", kind.name()),
            Self::Map { kind, params: None } => write!(f, "{}", kind.name()),
            Self::Map {
                kind,
                params: Some((k, v)),
            } => write!(f, "{}[{k}, {v}]", kind.name()),
            Self::Record(ty) => write!(f, "{}#{}", ty.name(), ty.id()),
            Self::Enum(e) => write!(f, "{}#{}", e.name(), e.id()),
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
