//! Speed-up ratios between the sequential and the parallel variants, and the
//! in-place annotation of results files with them.

use crate::config::{self, VALUES_SUFFIX};
use crate::errors::*;
use crate::table::{self, BenchmarkRecord, ResultTable};
use crate::variant::{SpeedUpPair, Variant};
use std::fs;
use std::path::{Path, PathBuf};

/// Rounds to one decimal, the precision ratios are stored with.
pub fn round_ratio(ratio: f64) -> f64 {
    // `{:.1}` rounds the exact binary value
    format!("{:.1}", ratio).parse().unwrap_or(ratio)
}

/// Formats a ratio the way it is stored in a results table, e.g. `5.0x`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}x", ratio)
}

/// Parses a stored ratio; the trailing `x` is optional.
pub fn parse_ratio(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    cell.strip_suffix('x').unwrap_or(cell).trim().parse().ok()
}

/// Baseline over target timing for one speed-up pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedUpEntry {
    /// baseline and target
    pub pair: SpeedUpPair,

    /// ratio of the mean timings, rounded to one decimal
    pub mean_ratio: f64,

    /// ratio of the median timings, rounded to one decimal
    pub median_ratio: f64,
}

impl SpeedUpEntry {
    /// Creates an entry.
    pub fn new(pair: SpeedUpPair, mean_ratio: f64, median_ratio: f64) -> Self {
        SpeedUpEntry {
            pair: pair,
            mean_ratio: mean_ratio,
            median_ratio: median_ratio,
        }
    }

    /// The slower variant.
    pub fn from_variant(&self) -> Variant {
        self.pair.baseline()
    }

    /// The faster variant.
    pub fn to_variant(&self) -> Variant {
        self.pair.target()
    }
}

/// The speed-up block of one table: an entry per `SpeedUpPair`, in block
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedUp {
    entries: Vec<SpeedUpEntry>,
}

impl SpeedUp {
    /// Computes all ratios from the four variant rows (table order).
    pub fn compute(records: &[BenchmarkRecord]) -> Result<SpeedUp> {
        if records.len() != Variant::ALL.len() {
            bail!(ErrorKind::SchemaMismatch(
                "<records>".to_string(),
                format!("expected {} variant rows, found {}", Variant::ALL.len(), records.len()),
            ));
        }
        let entries = SpeedUpPair::ALL
            .iter()
            .map(|&pair| -> Result<SpeedUpEntry> {
                let baseline = &records[pair.baseline().ordinal()];
                let target = &records[pair.target().ordinal()];
                Ok(SpeedUpEntry::new(
                    pair,
                    ratio(baseline.mean, target.mean, target.variant)?,
                    ratio(baseline.median, target.median, target.variant)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SpeedUp { entries: entries })
    }

    /// Wraps entries parsed back from a table. They have to be in block
    /// order.
    pub fn from_entries(entries: Vec<SpeedUpEntry>) -> Self {
        debug_assert!(entries
            .iter()
            .map(|e| e.pair)
            .eq(SpeedUpPair::ALL.iter().cloned()));
        SpeedUp { entries: entries }
    }

    /// All entries in block order.
    pub fn entries(&self) -> &[SpeedUpEntry] {
        &self.entries
    }

    /// The entry of one pair.
    pub fn get(&self, pair: SpeedUpPair) -> &SpeedUpEntry {
        &self.entries[pair.ordinal()]
    }
}

fn ratio(baseline: f64, target: f64, variant: Variant) -> Result<f64> {
    if !(target > 0.0) || !target.is_finite() {
        bail!(ErrorKind::InvalidTiming(variant.to_string(), target));
    }
    Ok(round_ratio(baseline / target))
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The speed-up block was appended.
    Annotated,
    /// The file already carried the marker and was left untouched.
    AlreadyAnnotated,
}

/// Scans the data rows of a results file for the marker cell without
/// validating its layout. The header row is not searched.
pub fn contains_marker<P: AsRef<Path>>(path: P) -> Result<bool> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())?;
    for record in reader.records() {
        if record?.iter().any(|c| c.trim() == table::SPEEDUP_MARKER) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Appends the speed-up block to the results file at `path`, unless the file
/// already contains the marker.
pub fn annotate_file<P: AsRef<Path>>(path: P) -> Result<Outcome> {
    let path = path.as_ref();
    if contains_marker(path)? {
        debug!("{} already annotated, skipping", path.display());
        return Ok(Outcome::AlreadyAnnotated);
    }
    let table = ResultTable::from_path(path)?;
    let speed_up = SpeedUp::compute(table.records())
        .chain_err(|| format!("failed to compute speed-up for {}", path.display()))?;
    table.annotated(speed_up)?.save(path)?;
    info!("annotated {}", path.display());
    Ok(Outcome::Annotated)
}

/// Files touched by `annotate_dir`.
#[derive(Debug, Default, Clone)]
pub struct AnnotateSummary {
    /// files the block was appended to
    pub annotated: Vec<PathBuf>,

    /// files that already carried the block
    pub skipped: Vec<PathBuf>,
}

/// Annotates every results file directly inside `dir`, in name order. Files
/// whose name does not encode a configuration are skipped with a warning;
/// hidden files and directories are ignored. Fails before touching any file when
/// `dir` does not exist; any other failure aborts the run.
pub fn annotate_dir<P: AsRef<Path>>(dir: P) -> Result<AnnotateSummary> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!(ErrorKind::MissingDirectory(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with('.') || !entry.file_type()?.is_file() {
            continue;
        }
        match config::parse_name(&name) {
            Ok((_, tail)) if tail != VALUES_SUFFIX => files.push(entry.path()),
            Ok(_) => warn!("skipping {}: unexpected entry", entry.path().display()),
            Err(e) => warn!("skipping {}: {}", entry.path().display(), e),
        }
    }
    files.sort();

    let mut summary = AnnotateSummary::default();
    for file in files {
        match annotate_file(&file)? {
            Outcome::Annotated => summary.annotated.push(file),
            Outcome::AlreadyAnnotated => summary.skipped.push(file),
        }
    }
    info!(
        "{}: {} annotated, {} already annotated",
        dir.display(),
        summary.annotated.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: [(f64, f64); 4]) -> Vec<BenchmarkRecord> {
        Variant::ALL
            .iter()
            .zip(values.iter())
            .map(|(&v, &(mean, median))| BenchmarkRecord::new(v, mean, median, None))
            .collect()
    }

    #[test]
    fn ratios_of_reference_table() {
        let r = records([(10.0, 10.0), (8.0, 8.0), (2.0, 2.0), (1.0, 1.0)]);
        let s = SpeedUp::compute(&r).unwrap();
        let means = s.entries().iter().map(|e| e.mean_ratio).collect::<Vec<_>>();
        let medians = s.entries().iter().map(|e| e.median_ratio).collect::<Vec<_>>();
        assert_eq!(means, vec![5.0, 10.0, 4.0, 8.0]);
        assert_eq!(medians, means);
        let e = s.get(SpeedUpPair::SeqToParWithCopy);
        assert_eq!(e.from_variant(), Variant::Seq);
        assert_eq!(e.to_variant(), Variant::ParWithCopy);
    }

    #[test]
    fn mean_and_median_are_independent() {
        let r = records([(9.0, 7.0), (6.0, 5.0), (3.0, 2.0), (2.0, 3.0)]);
        let s = SpeedUp::compute(&r).unwrap();
        let e = s.get(SpeedUpPair::SeqWithCopyToParWithCopy);
        assert_eq!((e.mean_ratio, e.median_ratio), (3.0, 3.5));
        let e = s.get(SpeedUpPair::SeqToPar);
        assert_eq!((e.mean_ratio, e.median_ratio), (3.0, round_ratio(5.0 / 3.0)));
        assert_eq!(e.median_ratio, 1.7);
    }

    #[test]
    fn ratios_are_rounded_to_one_decimal() {
        let r = records([(10.0, 10.0), (7.0, 7.0), (3.0, 3.0), (6.0, 6.0)]);
        let s = SpeedUp::compute(&r).unwrap();
        assert_eq!(s.get(SpeedUpPair::SeqWithCopyToParWithCopy).mean_ratio, 3.3);
        assert_eq!(s.get(SpeedUpPair::SeqWithCopyToPar).mean_ratio, 1.7);
        assert_eq!(s.get(SpeedUpPair::SeqToParWithCopy).mean_ratio, 2.3);
        assert_eq!(s.get(SpeedUpPair::SeqToPar).mean_ratio, 1.2);
    }

    #[test]
    fn zero_target_is_rejected() {
        let r = records([(10.0, 10.0), (8.0, 8.0), (0.0, 2.0), (1.0, 1.0)]);
        match SpeedUp::compute(&r) {
            Err(Error(ErrorKind::InvalidTiming(v, t), _)) => {
                assert_eq!(v, "par_with_copy");
                assert_eq!(t, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ratio_cells() {
        assert_eq!(format_ratio(5.0), "5.0x");
        assert_eq!(format_ratio(12.34), "12.3x");
        assert_eq!(parse_ratio("5.0x"), Some(5.0));
        assert_eq!(parse_ratio(" 12.3x "), Some(12.3));
        assert_eq!(parse_ratio("7"), Some(7.0));
        assert_eq!(parse_ratio("Mean"), None);
        assert_eq!(parse_ratio(""), None);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_ratio(1.04), 1.0);
        assert_eq!(round_ratio(1.06), 1.1);
        assert_eq!(round_ratio(19.96), 20.0);
    }
}
