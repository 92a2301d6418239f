//! recsynth record generator
//!
//! Property-based generation of synthetic record types and matching sample
//! values, for exercising serialization and validation code.
//!
//! # Pipeline
//!
//! 1. [`primitives`] supplies scalar kinds with their type tags.
//! 2. [`fields`] draws field specs (kind, default policy, optional
//!    annotation) and orders them so defaulted fields trail.
//! 3. [`synth`] names the fields via [`names::AttrNames`] and builds a
//!    fresh [`RecordType`] plus a strategy for positional value tuples.
//! 4. [`nesting`] wraps a simpler record into a new one, directly, in a
//!    list, or in a dict.
//! 5. [`driver`] feeds nested records back into the combinator.
//!
//! # Usage
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use recsynth_gen::{Settings, nested_records};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(sample in nested_records(&Settings::from_env())) {
//!         let record = sample.instantiate().unwrap();
//!         // feed `record` to the serializer under test
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::redundant_closure_for_method_calls))]
#![cfg_attr(test, allow(clippy::redundant_clone))]

pub mod collections;
pub mod driver;
pub mod enums;
pub mod error;
pub mod fields;
pub mod names;
pub mod nesting;
pub mod primitives;
pub mod record;
pub mod sampler;
pub mod settings;
pub mod synth;
pub mod types;
pub mod value;

pub use collections::{
    dicts_of_primitives, frozen_sets_of_primitives, lists_of_primitives, mut_sets_of_primitives,
    seqs_of_primitives, sets_of_primitives, tuples_of_primitives,
};
pub use driver::{base_records, nested_records, records_of_depth};
pub use enums::{EnumType, enums_of_primitives};
pub use error::{Error, Result};
pub use fields::{FieldKind, FieldSpec, MAX_FIELDS, Toggle, lists_of_fields, simple_fields};
pub use names::AttrNames;
pub use nesting::NestingVariant;
pub use primitives::{PrimitiveKind, PrimitiveSet, primitive_strategies};
pub use record::{DefaultFactory, FieldDef, FieldDefault, Record, RecordBuilder, RecordType};
pub use sampler::{RecordSummary, Sampler};
pub use settings::{MAX_DEPTH, Profile, Settings};
pub use synth::{SampleRecord, simple_records, synthesize};
pub use types::{MapKind, SeqKind, SetKind, TypeTag};
pub use value::Value;
