//! Example: Generating Synthetic Records
//!
//! Draws a few nested record types with a seeded sampler and prints their
//! field declarations and values.
//!
//! Run with: `cargo run --example generate_records -p recsynth-gen`

#![allow(clippy::missing_panics_doc)]

use recsynth_gen::{Profile, RecordSummary, Sampler, Settings};

fn main() {
    let settings = Settings::for_profile(Profile::Ci)
        .with_max_depth(2)
        .with_max_fields(4);
    let mut sampler = Sampler::new(settings).with_seed(2024);

    let records = sampler
        .sample_of_depth(1, 3)
        .expect("sampling should succeed");

    for (i, record) in records.iter().enumerate() {
        let summary = RecordSummary::from_record(record);
        println!("Record {} ({}#{}, depth {}):", i + 1, summary.type_name, summary.type_id, summary.depth);
        for field in &summary.fields {
            let declared = field
                .declared_type
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            println!(
                "  {:<4} {:<28} default={}",
                field.name, declared, field.has_default
            );
        }
        println!(
            "  values: {}",
            serde_json::to_string(&summary.values).expect("values serialize")
        );
        println!();
    }
}
