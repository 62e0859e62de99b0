//! Raw per-run timings stored next to a results table.
//!
//! A `<config>_values` directory holds one file per variant, named after the
//! variant's benchmark label (`cpu_seq_c_exec.csv`, ...), with a header line
//! followed by one run time per line.

use crate::config::ConfigKey;
use crate::errors::*;
use crate::variant::Variant;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Every recorded run time of one configuration, per variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSamples {
    /// configuration the runs belong to
    pub key: ConfigKey,

    runs: BTreeMap<Variant, Vec<f64>>,
}

impl RawSamples {
    /// Run times of `variant`; empty when no file was found for it.
    pub fn get(&self, variant: Variant) -> &[f64] {
        self.runs.get(&variant).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Whether every variant has at least one run.
    pub fn is_complete(&self) -> bool {
        Variant::ALL.iter().all(|&v| !self.get(v).is_empty())
    }
}

/// Loads the sample directory `dir` of configuration `key`.
pub fn load_samples<P: AsRef<Path>>(key: ConfigKey, dir: P) -> Result<RawSamples> {
    let dir = dir.as_ref();
    let mut runs = BTreeMap::new();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    for path in files {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };
        let variant = match Variant::from_sample_file(&name) {
            Some(v) => v,
            None => {
                warn!("skipping {}: not a sample file", path.display());
                continue;
            }
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(&path)?;
        let values = runs.entry(variant).or_insert_with(Vec::new);
        for (line, value) in reader.deserialize::<(f64,)>().enumerate() {
            let (value,) = value.map_err(|e| {
                ErrorKind::SchemaMismatch(path.display().to_string(), format!("run {}: {}", line, e))
            })?;
            values.push(value);
        }
        trace!("{}: {} runs of {}", dir.display(), values.len(), variant);
    }

    let samples = RawSamples { key: key, runs: runs };
    if !samples.is_complete() {
        warn!("{}: not every variant has samples", dir.display());
    }
    Ok(samples)
}
