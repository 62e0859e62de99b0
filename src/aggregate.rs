//! Per-size aggregation of the tables that belong to one chart group.
//!
//! Every chart shows one (kernel, block) group. For each matrix size the
//! values of all tables with that configuration are collected in an
//! `Accumulator` and reduced to a single point; the points form an
//! `AggregatedSeries` ordered by matrix size.

use crate::config::{ConfigKey, Dim, Group};
use crate::errors::*;
use crate::table::{BenchmarkRecord, ResultTable};
use crate::variant::{SpeedUpPair, Variant};
use average::{Estimate, MeanWithError};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Which timing of a results table feeds the time series.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// the `mean` column
    Mean,
    /// the `median` column
    Median,
}

impl Column {
    /// Picks this column out of a record.
    pub fn of(self, record: &BenchmarkRecord) -> f64 {
        match self {
            Column::Mean => record.mean,
            Column::Median => record.median,
        }
    }
}

/// How the values collected for one matrix size are combined.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// arithmetic mean
    Mean,
    /// median; the mean of the two middle values for an even count
    Median,
}

impl Reduction {
    /// Reduces `samples` to one value, `None` when there is nothing to
    /// reduce. The samples are sorted first so the result does not depend on
    /// the order they were collected in.
    pub fn reduce(self, samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let value = match self {
            Reduction::Mean => {
                let mut m = MeanWithError::new();
                sorted.iter().for_each(|&s| m.add(s));
                m.mean()
            }
            Reduction::Median => {
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 1 {
                    sorted[mid]
                } else {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                }
            }
        };
        Some(value)
    }
}

/// What to do with a matrix size no table contributed a value to.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    /// leave the point out and log a warning
    Skip,
    /// abort with `EmptyAggregation`
    Fail,
}

/// Aggregation options, usually taken from the `Setting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    /// timing column of the time series
    pub column: Column,

    /// how values of one size are combined
    pub reduction: Reduction,

    /// policy for sizes without values
    pub empty: EmptyPolicy,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation {
            column: Column::Mean,
            reduction: Reduction::Mean,
            empty: EmptyPolicy::Skip,
        }
    }
}

/// Values of one series, ordered by matrix size with at most one value per
/// size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSeries {
    points: BTreeMap<Dim, f64>,
}

impl AggregatedSeries {
    /// The value at `size`.
    pub fn get(&self, size: Dim) -> Option<f64> {
        self.points.get(&size).cloned()
    }

    /// Points in ascending size order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Dim, f64)> + 'a {
        self.points.iter().map(|(&size, &value)| (size, value))
    }

    /// Matrix sizes with a value, ascending.
    pub fn sizes(&self) -> Vec<Dim> {
        self.points.keys().cloned().collect()
    }

    /// Largest value, `None` for an empty series.
    pub fn max(&self) -> Option<f64> {
        self.points.values().cloned().fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Collects values per matrix size for one series. Built fresh for every
/// series and consumed by `finish`.
#[derive(Debug, Default)]
pub struct Accumulator {
    samples: BTreeMap<Dim, Vec<f64>>,
}

impl Accumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Accumulator::default()
    }

    /// Adds one value for `size`.
    pub fn add(&mut self, size: Dim, value: f64) {
        self.samples.entry(size).or_insert_with(Vec::new).push(value);
    }

    /// Reduces every size of `sizes` (and every size a value was added for).
    /// Sizes without a value are handled according to `empty`.
    pub fn finish(
        self,
        sizes: &[Dim],
        reduction: Reduction,
        empty: EmptyPolicy,
        group: &Group,
    ) -> Result<AggregatedSeries> {
        let (series, missing) = self.reduce(sizes, reduction);
        for size in missing {
            match empty {
                EmptyPolicy::Skip => warn!("no value for {} at matrix {}, point skipped", group, size),
                EmptyPolicy::Fail => {
                    bail!(ErrorKind::EmptyAggregation(group.to_string(), size.to_string()))
                }
            }
        }
        Ok(series)
    }

    fn reduce(self, sizes: &[Dim], reduction: Reduction) -> (AggregatedSeries, Vec<Dim>) {
        let all = sizes
            .iter()
            .chain(self.samples.keys())
            .cloned()
            .collect::<BTreeSet<_>>();

        let mut points = BTreeMap::new();
        let mut missing = Vec::new();
        for size in all {
            let value = self
                .samples
                .get(&size)
                .and_then(|samples| reduction.reduce(samples));
            match value {
                Some(v) => {
                    points.insert(size, v);
                }
                None => missing.push(size),
            }
        }
        (AggregatedSeries { points: points }, missing)
    }
}

/// Center and standard deviation series of one variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spread {
    /// reduced mean timings
    pub center: AggregatedSeries,

    /// reduced standard deviations; sizes whose tables carry no `std` are
    /// absent
    pub std: AggregatedSeries,
}

impl Spread {
    /// `(size, center - std, center + std)` for every size with both values.
    pub fn band(&self) -> Vec<(Dim, f64, f64)> {
        self.center
            .iter()
            .filter_map(|(size, c)| self.std.get(size).map(|s| (size, c - s, c + s)))
            .collect()
    }
}

fn members<'a>(
    tables: &'a [(ConfigKey, ResultTable)],
    group: &'a Group,
) -> impl Iterator<Item = &'a (ConfigKey, ResultTable)> + 'a {
    tables.iter().filter(move |(key, _)| key.group() == *group)
}

/// One series per variant: the `column` timing of the group's tables,
/// reduced per matrix size.
pub fn aggregate_timings(
    tables: &[(ConfigKey, ResultTable)],
    group: &Group,
    sizes: &[Dim],
    aggregation: &Aggregation,
) -> Result<BTreeMap<Variant, AggregatedSeries>> {
    let mut series = BTreeMap::new();
    for &variant in Variant::ALL.iter() {
        let mut acc = Accumulator::new();
        for (key, table) in members(tables, group) {
            acc.add(key.matrix, aggregation.column.of(table.record(variant)));
        }
        let s = acc.finish(sizes, aggregation.reduction, aggregation.empty, group)?;
        debug!("{} {}: {} points", group, variant, s.len());
        series.insert(variant, s);
    }
    Ok(series)
}

/// One mean ± std spread per variant, reduced per matrix size.
pub fn aggregate_spread(
    tables: &[(ConfigKey, ResultTable)],
    group: &Group,
    sizes: &[Dim],
    aggregation: &Aggregation,
) -> Result<BTreeMap<Variant, Spread>> {
    let mut spreads = BTreeMap::new();
    for &variant in Variant::ALL.iter() {
        let mut center = Accumulator::new();
        let mut std = Accumulator::new();
        for (key, table) in members(tables, group) {
            let record = table.record(variant);
            center.add(key.matrix, record.mean);
            if let Some(s) = record.std {
                std.add(key.matrix, s);
            }
        }
        let center = center.finish(sizes, aggregation.reduction, aggregation.empty, group)?;
        let (std, missing) = std.reduce(&center.sizes(), aggregation.reduction);
        if !missing.is_empty() {
            debug!("{} {}: no std at {} sizes", group, variant, missing.len());
        }
        spreads.insert(variant, Spread { center: center, std: std });
    }
    Ok(spreads)
}

/// One series per speed-up pair: the mean ratio of the group's tables,
/// reduced per matrix size. Annotated tables contribute their stored block,
/// the others have their ratios computed.
pub fn aggregate_speed_ups(
    tables: &[(ConfigKey, ResultTable)],
    group: &Group,
    sizes: &[Dim],
    aggregation: &Aggregation,
) -> Result<BTreeMap<SpeedUpPair, AggregatedSeries>> {
    let mut speed_ups = Vec::new();
    for (key, table) in members(tables, group) {
        let speed_up = table
            .speed_up()
            .chain_err(|| format!("no speed-up for {}", key))?;
        speed_ups.push((key.matrix, speed_up));
    }

    let mut series = BTreeMap::new();
    for &pair in SpeedUpPair::ALL.iter() {
        let mut acc = Accumulator::new();
        for &(size, ref speed_up) in &speed_ups {
            acc.add(size, speed_up.get(pair).mean_ratio);
        }
        series.insert(
            pair,
            acc.finish(sizes, aggregation.reduction, aggregation.empty, group)?,
        );
    }
    Ok(series)
}
