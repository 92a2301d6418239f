//! Record type descriptors, their builder, and record instances
//!
//! A [`RecordType`] is built at run time from an ordered list of
//! [`FieldDef`]s. Every build gets a fresh process-unique id, and two record
//! types compare equal only if they are the same build.

use crate::error::{Error, Result};
use crate::names::{is_identifier, is_reserved};
use crate::types::TypeTag;
use crate::value::Value;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::debug;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique type id
pub(crate) fn next_type_id() -> u64 {
    NEXT_TYPE_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

type FactoryFn = dyn Fn() -> Result<Value> + Send + Sync;

/// Zero-argument closure that produces a fresh default on every instantiation
#[derive(Clone)]
pub struct DefaultFactory(Arc<FactoryFn>);

impl DefaultFactory {
    /// Wrap a closure
    pub fn new(f: impl Fn() -> Result<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Factory returning a fresh clone of `value` on each call
    #[must_use]
    pub fn cloning(value: Value) -> Self {
        Self::new(move || Ok(value.clone()))
    }

    /// Invoke the factory.
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped closure returns.
    pub fn produce(&self) -> Result<Value> {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFactory(..)")
    }
}

/// Default policy of a field
#[derive(Debug, Clone)]
pub enum FieldDefault {
    /// Must be passed at construction
    Required,
    /// Shared immutable default
    Value(Value),
    /// Fresh default per instance
    Factory(DefaultFactory),
}

impl FieldDefault {
    /// Returns true unless the field is required
    #[must_use]
    pub const fn has_default(&self) -> bool {
        !matches!(self, Self::Required)
    }
}

/// One field of a record type
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Explicit annotation, `None` when unannotated
    pub declared_type: Option<TypeTag>,
    /// Default policy
    pub default: FieldDefault,
}

impl FieldDef {
    /// Create a field
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: Option<TypeTag>, default: FieldDefault) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default,
        }
    }

    /// Required, unannotated field
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, None, FieldDefault::Required)
    }
}

/// A synthesized record type
#[derive(Debug)]
pub struct RecordType {
    id: u64,
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordType {
    /// Process-unique id of this build
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if every field has a default
    #[must_use]
    pub fn is_default_constructible(&self) -> bool {
        self.fields.iter().all(|f| f.default.has_default())
    }

    /// Construct an instance from positional arguments.
    ///
    /// Fields past the end of `args` take their defaults; factories are
    /// invoked once per omitted field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyArguments`] for surplus arguments,
    /// [`Error::MissingArgument`] for an omitted required field, or the
    /// error of a failing default factory.
    pub fn instantiate(self: &Arc<Self>, args: Vec<Value>) -> Result<Record> {
        if args.len() > self.fields.len() {
            return Err(Error::TooManyArguments {
                record: self.name.clone(),
                expected: self.fields.len(),
                got: args.len(),
            });
        }

        let mut values = args;
        for field in &self.fields[values.len()..] {
            let value = match &field.default {
                FieldDefault::Value(v) => v.clone(),
                FieldDefault::Factory(factory) => factory.produce()?,
                FieldDefault::Required => {
                    return Err(Error::MissingArgument {
                        record: self.name.clone(),
                        field: field.name.clone(),
                    });
                }
            };
            values.push(value);
        }

        Ok(Record {
            ty: Arc::clone(self),
            values,
        })
    }

    /// Construct an instance using only defaults.
    ///
    /// # Errors
    ///
    /// Same as [`RecordType::instantiate`].
    pub fn default_instance(self: &Arc<Self>) -> Result<Record> {
        self.instantiate(Vec::new())
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

/// Builder for [`RecordType`]
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordBuilder {
    /// Start a record type called `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Validate the declaration and build a brand-new type.
    ///
    /// # Errors
    ///
    /// Rejects invalid identifiers, reserved or duplicate field names, and a
    /// required field declared after a defaulted one.
    pub fn build(self) -> Result<Arc<RecordType>> {
        if !is_identifier(&self.name) {
            return Err(Error::InvalidIdentifier(self.name));
        }

        let mut seen = HashSet::new();
        let mut saw_default = false;
        for field in &self.fields {
            if !is_identifier(&field.name) {
                return Err(Error::InvalidIdentifier(field.name.clone()));
            }
            if is_reserved(&field.name) {
                return Err(Error::ReservedName(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
            if field.default.has_default() {
                saw_default = true;
            } else if saw_default {
                return Err(Error::RequiredAfterDefault {
                    field: field.name.clone(),
                });
            }
        }

        let ty = RecordType {
            id: next_type_id(),
            name: self.name,
            fields: self.fields,
        };
        debug!(record = %ty.name, id = ty.id, fields = ty.fields.len(), "record.built");
        Ok(Arc::new(ty))
    }
}

/// An instance of a synthesized record type.
///
/// Owns its field values, including nested record instances.
#[derive(Clone)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Value>,
}

impl Record {
    /// The type this record was built from
    #[must_use]
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Field values in declaration order
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Read a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty
            .fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|i| self.values.get(i))
    }

    /// Iterate `(field name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }

    /// Nesting depth: 1 plus the deepest record reachable from any field
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.values.iter().map(Value::depth).max().unwrap_or(0)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.ty.name);
        for (name, value) in self.iter() {
            s.field(name, value);
        }
        s.finish()
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ty
            .id
            .cmp(&other.ty.id)
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Record {}
