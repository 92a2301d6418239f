//! Deterministic sampling outside of `proptest!`
//!
//! The sampler owns a seeded [`TestRunner`] and draws instantiated records
//! one example at a time, timing each draw against the settings' deadline.

use crate::driver::{nested_records, records_of_depth};
use crate::error::{Error, Result};
use crate::fields::Toggle;
use crate::record::Record;
use crate::settings::Settings;
use crate::synth::{SampleRecord, simple_records};
use crate::types::TypeTag;
use crate::value::Value;
use proptest::strategy::{BoxedStrategy, Strategy, ValueTree};
use proptest::test_runner::{RngAlgorithm, TestRng, TestRunner};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 0;

/// Draws records from the generator with a reproducible RNG
pub struct Sampler {
    settings: Settings,
    runner: TestRunner,
}

impl Sampler {
    /// Create a sampler seeded with [`DEFAULT_SEED`]
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::seeded(settings, DEFAULT_SEED)
    }

    /// Reseed the sampler
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self::seeded(self.settings, seed)
    }

    fn seeded(settings: Settings, seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        let runner = TestRunner::new_with_rng(settings.proptest_config(), rng);
        Self { settings, runner }
    }

    /// Settings in effect
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Draw `count` simple records with random defaults
    ///
    /// # Errors
    ///
    /// Returns an error if generation or instantiation fails.
    pub fn sample_simple(&mut self, count: usize) -> Result<Vec<Record>> {
        let strategy = simple_records(
            Toggle::Random,
            self.settings.primitives,
            0,
            self.settings.max_fields,
        );
        self.draw(&strategy, count)
    }

    /// Draw `count` records of engine-chosen nesting depth
    ///
    /// # Errors
    ///
    /// Returns an error if generation or instantiation fails.
    pub fn sample_nested(&mut self, count: usize) -> Result<Vec<Record>> {
        let strategy = nested_records(&self.settings);
        self.draw(&strategy, count)
    }

    /// Draw `count` records nested exactly `depth` times
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthExceeded`] if `depth` is above the configured
    /// `max_depth`, or an error if generation or instantiation fails.
    pub fn sample_of_depth(&mut self, depth: u32, count: usize) -> Result<Vec<Record>> {
        let strategy = records_of_depth(depth, &self.settings)?;
        self.draw(&strategy, count)
    }

    fn draw(&mut self, strategy: &BoxedStrategy<SampleRecord>, count: usize) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for index in 0..count {
            let started = Instant::now();
            let sample = strategy
                .new_tree(&mut self.runner)
                .map_err(|e| Error::Generation(e.to_string()))?
                .current();
            let record = sample.instantiate()?;
            let elapsed = started.elapsed();

            if self.settings.is_too_slow(elapsed) {
                warn!(
                    index,
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    deadline_ms = ?self.settings.deadline_ms,
                    "generation too slow"
                );
            }
            debug!(index, depth = record.depth(), fields = record.values().len(), "sample.drawn");
            records.push(record);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Serializable description of one field
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    /// Field name
    pub name: String,
    /// Declared type, if annotated
    pub declared_type: Option<TypeTag>,
    /// Whether the field has a default
    pub has_default: bool,
}

/// Serializable view of an instantiated record and its type
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    /// Type name
    pub type_name: String,
    /// Process-unique type id
    pub type_id: u64,
    /// Nesting depth of the instance
    pub depth: usize,
    /// Field declarations
    pub fields: Vec<FieldSummary>,
    /// Field values
    pub values: Value,
}

impl RecordSummary {
    /// Summarize `record`
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let ty = record.record_type();
        Self {
            type_name: ty.name().to_string(),
            type_id: ty.id(),
            depth: record.depth(),
            fields: ty
                .fields()
                .iter()
                .map(|f| FieldSummary {
                    name: f.name.clone(),
                    declared_type: f.declared_type.clone(),
                    has_default: f.default.has_default(),
                })
                .collect(),
            values: Value::Record(record.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PrimitiveSet;
    use crate::settings::Profile;

    fn settings() -> Settings {
        Settings::for_profile(Profile::Ci).with_max_fields(4)
    }

    fn count_numbers(value: &Value) -> usize {
        match value {
            Value::Int(_) | Value::Float(_) => 1,
            Value::List(items) | Value::Tuple(items) => items.iter().map(count_numbers).sum(),
            Value::Set(items) => items.iter().map(count_numbers).sum(),
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| count_numbers(k) + count_numbers(v))
                .sum(),
            Value::Record(record) => record.values().iter().map(count_numbers).sum(),
            _ => 0,
        }
    }

    fn numbers_in(records: &[Record]) -> usize {
        records
            .iter()
            .map(|r| r.values().iter().map(count_numbers).sum::<usize>())
            .sum()
    }

    #[test]
    fn test_same_seed_same_shapes() {
        let a = Sampler::new(settings()).with_seed(7).sample_simple(10).unwrap();
        let b = Sampler::new(settings()).with_seed(7).sample_simple(10).unwrap();
        let shape = |records: &[Record]| -> Vec<Vec<String>> {
            records
                .iter()
                .map(|r| r.iter().map(|(n, _)| n.to_string()).collect())
                .collect()
        };
        assert_eq!(shape(&a), shape(&b));
        let values_a: Vec<&[Value]> = a.iter().map(Record::values).collect();
        let values_b: Vec<&[Value]> = b.iter().map(Record::values).collect();
        assert_eq!(values_a, values_b);
    }

    #[test]
    fn test_sample_counts() {
        let mut sampler = Sampler::new(settings());
        assert_eq!(sampler.sample_simple(5).unwrap().len(), 5);
        assert_eq!(sampler.sample_nested(3).unwrap().len(), 3);
        assert!(sampler.sample_simple(0).unwrap().is_empty());
    }

    #[test]
    fn test_sample_of_depth() {
        let mut sampler = Sampler::new(settings());
        for record in sampler.sample_of_depth(2, 5).unwrap() {
            assert_eq!(record.depth(), 3);
        }
    }

    #[test]
    fn test_sample_of_depth_above_max_depth_fails() {
        let mut sampler = Sampler::new(settings().with_max_depth(2));
        let err = sampler.sample_of_depth(3000, 1).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { requested: 3000, max: 2 }));
        assert_eq!(sampler.sample_of_depth(2, 1).unwrap()[0].depth(), 3);
    }

    #[test]
    fn test_text_and_bytes_samples_hold_no_numbers() {
        let restricted = settings().with_primitives(PrimitiveSet::TextAndBytes);
        let mut sampler = Sampler::new(restricted).with_seed(3);
        let simple = sampler.sample_simple(200).unwrap();
        assert_eq!(numbers_in(&simple), 0);
        let nested = sampler.sample_nested(50).unwrap();
        assert_eq!(numbers_in(&nested), 0);

        let full = settings().with_primitives(PrimitiveSet::Full);
        let simple = Sampler::new(full).with_seed(3).sample_simple(200).unwrap();
        assert!(numbers_in(&simple) > 0);
    }

    #[test]
    fn test_summary_serializes() {
        let mut sampler = Sampler::new(settings());
        let record = sampler.sample_of_depth(1, 1).unwrap().remove(0);
        let summary = RecordSummary::from_record(&record);
        assert_eq!(summary.type_name, "HypClass");
        assert_eq!(summary.depth, 2);
        assert!(summary.fields.last().is_some_and(|f| f.has_default));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"type_name\":\"HypClass\""));
        let yaml = serde_yaml::to_string(&summary).unwrap();
        assert!(yaml.contains("type_name: HypClass"));
    }

    #[test]
    fn test_sampler_debug() {
        let sampler = Sampler::new(settings());
        assert!(format!("{sampler:?}").contains("Sampler"));
        assert_eq!(sampler.settings().profile, Profile::Ci);
    }
}
