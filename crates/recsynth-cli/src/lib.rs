//! recsynth CLI Library
//!
//! Library functions behind the `recsynth` command-line tool.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use recsynth_gen::{AttrNames, Profile, RecordSummary, Sampler, Settings};
use std::path::Path;

/// Which kind of record to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Flat records with random defaults
    Simple,
    /// Records of engine-chosen depth, capped by the settings
    Nested,
    /// Records nested exactly this many times
    Depth(u32),
}

impl SampleMode {
    /// Mode for the `--simple` and `--depth` flags
    pub fn from_flags(simple: bool, depth: Option<u32>) -> Self {
        match (simple, depth) {
            (true, _) => Self::Simple,
            (false, Some(depth)) => Self::Depth(depth),
            (false, None) => Self::Nested,
        }
    }
}

/// Output encoding for sampled records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// YAML documents separated by `---`
    Yaml,
}

/// Parse output format string to enum
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format {
        "json" => Ok(OutputFormat::Json),
        "yaml" => Ok(OutputFormat::Yaml),
        _ => Err(format!("Unknown format: {format}")),
    }
}

/// Resolve the effective settings.
///
/// A config file wins over the environment. `ci` forces the CI profile's
/// deadline and diagnostic behaviour on top of whatever was loaded.
pub fn load_settings(config: Option<&Path>, ci: bool) -> Result<Settings, String> {
    let settings = match config {
        Some(path) => Settings::from_file(path)
            .map_err(|e| format!("Error loading config {}: {e}", path.display()))?,
        None if ci => Settings::for_profile(Profile::Ci),
        None => Settings::from_env(),
    };
    Ok(if ci { force_ci(settings) } else { settings })
}

fn force_ci(settings: Settings) -> Settings {
    let ci = Settings::for_profile(Profile::Ci);
    Settings {
        profile: ci.profile,
        deadline_ms: ci.deadline_ms,
        suppress_too_slow: ci.suppress_too_slow,
        ..settings
    }
}

/// Draw `count` records and summarize them
pub fn sample_records(
    settings: Settings,
    seed: u64,
    count: usize,
    mode: SampleMode,
) -> Result<Vec<RecordSummary>, String> {
    let mut sampler = Sampler::new(settings).with_seed(seed);
    let records = match mode {
        SampleMode::Simple => sampler.sample_simple(count),
        SampleMode::Nested => sampler.sample_nested(count),
        SampleMode::Depth(depth) => sampler.sample_of_depth(depth, count),
    }
    .map_err(|e| format!("Error sampling records: {e}"))?;
    Ok(records.iter().map(RecordSummary::from_record).collect())
}

/// Format summaries as YAML
pub fn summaries_to_yaml(summaries: &[RecordSummary]) -> Result<String, String> {
    let mut output = String::new();
    for summary in summaries {
        match serde_yaml::to_string(summary) {
            Ok(yaml) => {
                output.push_str("---\n");
                output.push_str(&yaml);
            }
            Err(e) => return Err(format!("Error serializing record: {e}")),
        }
    }
    Ok(output)
}

/// Format summaries as JSON
pub fn summaries_to_json(summaries: &[RecordSummary]) -> Result<String, String> {
    serde_json::to_string_pretty(summaries).map_err(|e| format!("Error serializing records: {e}"))
}

/// Format summaries in the requested encoding
pub fn format_summaries(summaries: &[RecordSummary], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => summaries_to_json(summaries),
        OutputFormat::Yaml => summaries_to_yaml(summaries),
    }
}

/// First `count` attribute names
pub fn list_names(count: usize) -> Result<Vec<String>, String> {
    AttrNames::take_names(count).map_err(|e| e.to_string())
}

/// Render settings as YAML
pub fn settings_to_yaml(settings: &Settings) -> Result<String, String> {
    settings
        .to_yaml()
        .map_err(|e| format!("Error serializing settings: {e}"))
}
