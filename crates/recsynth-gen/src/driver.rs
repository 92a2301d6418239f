//! Recursive composition driver
//!
//! Seeds with default-constructible simple records and feeds the output of
//! the nesting combinator back into itself.

use crate::error::{Error, Result};
use crate::fields::Toggle;
use crate::nesting;
use crate::settings::Settings;
use crate::synth::{SampleRecord, simple_records};
use proptest::prelude::*;
use tracing::debug;

/// Target number of records in one generated tree
const DESIRED_SIZE: u32 = 32;

/// Simple records whose every field has a default
pub fn base_records(settings: &Settings) -> BoxedStrategy<SampleRecord> {
    simple_records(Toggle::Always, settings.primitives, 0, settings.max_fields)
}

/// Records of any nesting depth from 1 up to `settings.max_depth + 1`.
///
/// Depth is chosen by the test engine; `max_depth` is the ceiling.
pub fn nested_records(settings: &Settings) -> BoxedStrategy<SampleRecord> {
    let (primitives, max_fields) = (settings.primitives, settings.max_fields);
    base_records(settings)
        .prop_recursive(settings.max_depth, DESIRED_SIZE, 1, move |inner| {
            nesting::nested_records(inner, primitives, max_fields)
        })
        .boxed()
}

/// Records nested exactly `depth` times around a simple record.
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] if `depth` is above
/// `settings.max_depth`.
pub fn records_of_depth(depth: u32, settings: &Settings) -> Result<BoxedStrategy<SampleRecord>> {
    if depth > settings.max_depth {
        return Err(Error::DepthExceeded {
            requested: depth,
            max: settings.max_depth,
        });
    }
    debug!(depth, max_fields = settings.max_fields, "driver.fixed_depth");
    Ok((0..depth).fold(base_records(settings), |strategy, _| {
        nesting::nested_records(strategy, settings.primitives, settings.max_fields)
    }))
}
