//! Results tables: one CSV file per configuration with a row per variant.
//!
//! ```text
//! id,mean,std,median
//! cpu_seq_c_exec,10.41,0.52,10.38
//! cpu_seq_exec,8.02,0.31,8.0
//! gpu_par_c_exec,2.11,0.05,2.1
//! gpu_par_exec,1.02,0.01,1.01
//! ```
//!
//! Rows are keyed by position, so loading validates the shape and tags every
//! row with its `Variant`. An annotated table additionally carries the
//! speed-up block below the variant rows (see `speedup`).

use crate::errors::*;
use crate::speedup::{self, SpeedUp, SpeedUpEntry};
use crate::variant::{SpeedUpPair, Variant};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Sentinel cell marking a table that already carries the speed-up block.
pub const SPEEDUP_MARKER: &str = "SpeedUp";

/// Columns every results table has to provide.
const REQUIRED_COLUMNS: [&str; 3] = ["mean", "median", "std"];

/// One variant row of a results table. Timings are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkRecord {
    /// Which implementation the row measures.
    pub variant: Variant,

    /// Mean run time.
    pub mean: f64,

    /// Median run time.
    pub median: f64,

    /// Standard deviation of the run time (blank cells load as `None`).
    pub std: Option<f64>,
}

impl BenchmarkRecord {
    /// Creates a record.
    pub fn new(variant: Variant, mean: f64, median: f64, std: Option<f64>) -> Self {
        BenchmarkRecord {
            variant: variant,
            mean: mean,
            median: median,
            std: std,
        }
    }
}

/// The row layout as written by the benchmark. Extra columns are ignored.
#[derive(Deserialize, Debug)]
struct Row {
    #[serde(default)]
    id: String,
    mean: f64,
    median: f64,
    std: Option<f64>,
}

#[derive(Debug, Clone)]
struct Columns {
    id: Option<usize>,
    mean: usize,
    median: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> ::std::result::Result<Columns, String> {
        for name in REQUIRED_COLUMNS.iter() {
            if position(headers, name).is_none() {
                return Err(format!("missing column '{}'", name));
            }
        }
        Ok(Columns {
            id: position(headers, "id"),
            mean: position(headers, "mean").unwrap_or(0),
            median: position(headers, "median").unwrap_or(0),
        })
    }
}

fn position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// A validated results table.
#[derive(Debug, Clone)]
pub struct ResultTable {
    origin: String,
    headers: StringRecord,
    rows: Vec<StringRecord>,
    columns: Columns,
    records: Vec<BenchmarkRecord>,
    speed_up: Option<SpeedUp>,
}

impl ResultTable {
    /// Loads and validates the table stored at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResultTable> {
        let path = path.as_ref();
        let file = File::open(path)
            .chain_err(|| format!("failed to open results table {}", path.display()))?;
        ResultTable::from_reader(file, &path.display().to_string())
    }

    /// Loads and validates a table from any reader; `origin` names the source
    /// in error messages.
    pub fn from_reader<R: Read>(rdr: R, origin: &str) -> Result<ResultTable> {
        let mismatch = |reason: String| ErrorKind::SchemaMismatch(origin.to_string(), reason);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);
        let headers = reader.headers()?.clone();
        let columns = Columns::locate(&headers).map_err(mismatch)?;
        let rows = reader.records().collect::<::std::result::Result<Vec<_>, _>>()?;

        let marker = rows
            .iter()
            .position(|r| r.iter().any(|c| c.trim() == SPEEDUP_MARKER));

        // variant rows end at the blank separator above the marker, or at the
        // trailing blank rows of a plain table
        let data_end = match marker {
            Some(m) if m > 0 && is_blank(&rows[m - 1]) => m - 1,
            Some(m) => m,
            None => {
                let mut end = rows.len();
                while end > 0 && is_blank(&rows[end - 1]) {
                    end -= 1;
                }
                end
            }
        };
        if data_end != Variant::ALL.len() {
            bail!(mismatch(format!(
                "expected {} variant rows, found {}",
                Variant::ALL.len(),
                data_end
            )));
        }

        let mut records = Vec::with_capacity(Variant::ALL.len());
        for (row, &variant) in rows.iter().zip(Variant::ALL.iter()) {
            let parsed: Row = row
                .deserialize(Some(&headers))
                .map_err(|e| mismatch(format!("row {} ({}): {}", variant.ordinal(), variant, e)))?;
            if !variant.accepts_id(parsed.id.trim()) {
                bail!(mismatch(format!(
                    "row {} is '{}', expected {}",
                    variant.ordinal(),
                    parsed.id,
                    variant.bench_id()
                )));
            }
            if !parsed.mean.is_finite() || !parsed.median.is_finite() {
                bail!(mismatch(format!("row {} has a non-finite timing", variant.ordinal())));
            }
            records.push(BenchmarkRecord::new(variant, parsed.mean, parsed.median, parsed.std));
        }

        let speed_up = match marker {
            Some(m) => Some(parse_block(&rows[m + 1..], &columns).map_err(mismatch)?),
            None => None,
        };
        trace!("loaded {} (annotated: {})", origin, speed_up.is_some());

        Ok(ResultTable {
            origin: origin.to_string(),
            headers: headers,
            rows: rows,
            columns: columns,
            records: records,
            speed_up: speed_up,
        })
    }

    /// The four variant rows in table order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// The row of one variant.
    pub fn record(&self, variant: Variant) -> &BenchmarkRecord {
        &self.records[variant.ordinal()]
    }

    /// Whether the table already carries the speed-up block.
    pub fn is_annotated(&self) -> bool {
        self.speed_up.is_some()
    }

    /// The speed-up block stored in the table, if any.
    pub fn stored_speed_up(&self) -> Option<&SpeedUp> {
        self.speed_up.as_ref()
    }

    /// The stored speed-up block, or the ratios computed from the variant
    /// rows when the table has not been annotated yet.
    pub fn speed_up(&self) -> Result<SpeedUp> {
        match self.speed_up {
            Some(ref s) => Ok(s.clone()),
            None => SpeedUp::compute(&self.records),
        }
    }

    /// Returns a copy of this table with the speed-up block appended. The
    /// header and the variant rows are carried over untouched.
    pub fn annotated(&self, speed_up: SpeedUp) -> Result<ResultTable> {
        let id = match self.columns.id {
            Some(id) => id,
            None => bail!(ErrorKind::SchemaMismatch(
                self.origin.clone(),
                "no id column to hold the speed-up block".to_string(),
            )),
        };
        let width = self.headers.len();
        let row = |cells: [&str; 3]| {
            let mut fields = vec![""; width];
            fields[id] = cells[0];
            fields[self.columns.mean] = cells[1];
            fields[self.columns.median] = cells[2];
            StringRecord::from(fields)
        };

        // trailing blank rows would otherwise count as variant rows on reload
        let mut rows = self.rows[..self.records.len()].to_vec();
        rows.push(StringRecord::from(vec![""; width]));
        rows.push(row([SPEEDUP_MARKER, "Mean", "Median"]));
        for entry in speed_up.entries() {
            let mean = speedup::format_ratio(entry.mean_ratio);
            let median = speedup::format_ratio(entry.median_ratio);
            rows.push(row([entry.pair.label(), mean.as_str(), median.as_str()]));
        }

        Ok(ResultTable {
            origin: self.origin.clone(),
            headers: self.headers.clone(),
            rows: rows,
            columns: self.columns.clone(),
            records: self.records.clone(),
            speed_up: Some(speed_up),
        })
    }

    /// Writes the table to `path`. The content goes to a temporary file next
    /// to `path` first and is renamed over it once complete.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file());
            writer.write_record(&self.headers)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| e.error)?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Parses the four pair rows that follow the marker row.
fn parse_block(rows: &[StringRecord], columns: &Columns) -> ::std::result::Result<SpeedUp, String> {
    if rows.len() < SpeedUpPair::ALL.len() {
        return Err(format!(
            "speed-up block has {} rows, expected {}",
            rows.len(),
            SpeedUpPair::ALL.len()
        ));
    }
    let mut entries = Vec::with_capacity(SpeedUpPair::ALL.len());
    for (row, &pair) in rows.iter().zip(SpeedUpPair::ALL.iter()) {
        if let Some(id) = columns.id {
            let label = row.get(id).unwrap_or("").trim();
            if label != pair.label() {
                return Err(format!("speed-up row '{}', expected '{}'", label, pair.label()));
            }
        }
        let cell = |i: usize| {
            let raw = row.get(i).unwrap_or("").trim();
            speedup::parse_ratio(raw).ok_or_else(|| format!("bad ratio '{}' for {}", raw, pair))
        };
        entries.push(SpeedUpEntry::new(pair, cell(columns.mean)?, cell(columns.median)?));
    }
    Ok(SpeedUp::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "id,mean,std,median
cpu_seq_c_exec,10,0.5,10
cpu_seq_exec,8,0.4,8
gpu_par_c_exec,2,0.1,2
gpu_par_exec,1,0.05,1
";

    fn load(s: &str) -> Result<ResultTable> {
        ResultTable::from_reader(s.as_bytes(), "test.csv")
    }

    fn reason(r: Result<ResultTable>) -> String {
        match r {
            Err(Error(ErrorKind::SchemaMismatch(_, reason), _)) => reason,
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("table accepted"),
        }
    }

    #[test]
    fn load_plain_table() {
        let table = load(PLAIN).unwrap();
        assert!(!table.is_annotated());
        assert_eq!(table.records().len(), 4);
        let seq = table.record(Variant::Seq);
        assert_eq!(seq.variant, Variant::Seq);
        assert_eq!(seq.mean, 8.0);
        assert_eq!(seq.std, Some(0.4));
        assert_eq!(table.record(Variant::Par).median, 1.0);
    }

    #[test]
    fn columns_are_found_by_name() {
        let table = load(
            "median,std,mean
1,0,10
2,0,20
3,0,30
4,0,40
",
        )
        .unwrap();
        assert_eq!(table.record(Variant::SeqWithCopy).mean, 10.0);
        assert_eq!(table.record(Variant::SeqWithCopy).median, 1.0);
        assert_eq!(table.record(Variant::Par).mean, 40.0);
    }

    #[test]
    fn blank_std_loads_as_none() {
        let table = load("id,mean,std,median\n,1,,1\n,1,,1\n,1,,1\n,1,,1\n").unwrap();
        assert_eq!(table.record(Variant::Seq).std, None);
    }

    #[test]
    fn reject_wrong_row_count() {
        let short = "id,mean,std,median\n,1,0,1\n,1,0,1\n,1,0,1\n";
        assert!(reason(load(short)).contains("found 3"));
        let long = "id,mean,std,median\n,1,0,1\n,1,0,1\n,1,0,1\n,1,0,1\n,1,0,1\n";
        assert!(reason(load(long)).contains("found 5"));
    }

    #[test]
    fn reject_missing_column() {
        assert!(reason(load("id,mean,median\n,1,1\n,1,1\n,1,1\n,1,1\n")).contains("'std'"));
    }

    #[test]
    fn reject_non_numeric_timing() {
        let bad = "id,mean,std,median\n,1,0,1\n,fast,0,1\n,1,0,1\n,1,0,1\n";
        assert!(reason(load(bad)).contains("row 1"));
    }

    #[test]
    fn reject_rows_out_of_order() {
        let swapped = "id,mean,std,median
cpu_seq_exec,8,0.4,8
cpu_seq_c_exec,10,0.5,10
gpu_par_c_exec,2,0.1,2
gpu_par_exec,1,0.05,1
";
        assert!(reason(load(swapped)).contains("expected cpu_seq_c_exec"));
    }

    #[test]
    fn annotate_then_reload() {
        let table = load(PLAIN).unwrap();
        let annotated = table.annotated(table.speed_up().unwrap()).unwrap();
        assert!(annotated.is_annotated());
        assert_eq!(annotated.rows.len(), 10);
        assert_eq!(annotated.rows[5].get(0), Some(SPEEDUP_MARKER));
        assert_eq!(annotated.rows[6].get(1), Some("5.0x"));
        assert_eq!(annotated.rows[6].get(2), Some(""));

        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            writer.write_record(&annotated.headers).unwrap();
            for row in &annotated.rows {
                writer.write_record(row).unwrap();
            }
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(PLAIN));
        assert!(text.contains("\n,,,\nSpeedUp,Mean,,Median\nseq_c → par_c,5.0x,,5.0x\n"));

        let reloaded = load(&text).unwrap();
        assert!(reloaded.is_annotated());
        assert_eq!(reloaded.records(), table.records());
        let stored = reloaded.stored_speed_up().unwrap();
        assert_eq!(stored.get(SpeedUpPair::SeqToPar).mean_ratio, 8.0);
        assert_eq!(stored.get(SpeedUpPair::SeqWithCopyToPar).median_ratio, 10.0);
    }

    #[test]
    fn annotation_needs_an_id_column() {
        let table = load("mean,std,median\n1,0,1\n1,0,1\n1,0,1\n1,0,1\n").unwrap();
        let speed_up = table.speed_up().unwrap();
        assert!(reason(table.annotated(speed_up)).contains("no id column"));
    }

    #[test]
    fn trailing_blank_rows_are_dropped_when_annotating() {
        let text = format!("{},,,\n,,,\n", PLAIN);
        let table = load(&text).unwrap();
        let annotated = table.annotated(table.speed_up().unwrap()).unwrap();
        assert_eq!(annotated.rows.len(), 10);
        assert_eq!(annotated.rows[4].len(), 4);
        assert_eq!(annotated.rows[5].get(0), Some(SPEEDUP_MARKER));
    }

    #[test]
    fn reject_truncated_block() {
        let text = format!("{},,,\nSpeedUp,Mean,,Median\nseq_c → par_c,5.0x,,5.0x\n", PLAIN);
        assert!(reason(load(&text)).contains("block has 1 rows"));
    }
}
