//! Post-processing for the stereo matching benchmark.
//!
//! The benchmark writes one CSV results table per configuration (matrix size,
//! kernel size, block dimension) holding the timings of four implementations.
//! This crate annotates those tables with speed-up ratios and aggregates them
//! into per-size series that are rendered as charts.
//!
//! Names are parsed into a `ConfigKey`, tables are loaded into
//! `ResultTable`s, aggregated into `AggregatedSeries` and rendered by the
//! `chart` module.

#![recursion_limit = "1024"]
#![deny(missing_docs)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod errors;

mod aggregate;
mod config;
mod dataset;
mod samples;
mod setting;
mod speedup;
mod table;
mod variant;

pub mod chart;
pub mod logger;

pub use aggregate::{
    aggregate_speed_ups, aggregate_spread, aggregate_timings, Accumulator, AggregatedSeries,
    Aggregation, Column, EmptyPolicy, Reduction, Spread,
};
pub use config::{parse_name, ConfigKey, Dim, Group};
pub use dataset::{Dataset, ResultEntry};
pub use samples::{load_samples, RawSamples};
pub use setting::{ChartSetting, Setting};
pub use speedup::{
    annotate_dir, annotate_file, contains_marker, format_ratio, parse_ratio, round_ratio,
    AnnotateSummary, Outcome, SpeedUp, SpeedUpEntry,
};
pub use table::{BenchmarkRecord, ResultTable, SPEEDUP_MARKER};
pub use variant::{SpeedUpPair, Variant};
