//! Run setting in TOML. Every field is optional.
//!
//! ```toml
//! output_base = "build"
//! wipe_output = true
//! column = "mean"
//! reduction = "mean"
//! empty = "skip"
//! kernels = [3, 5, 7, 9, 11]
//! block_dims = [8, 16, 32]
//!
//! [chart]
//! width = 2200
//! height = 1100
//! sizes_per_page = 2
//! ```

use crate::aggregate::{Aggregation, Column, EmptyPolicy, Reduction};
use crate::config::Group;
use crate::errors::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The run setting.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Setting {
    /// Charts are written below `<output_base>/benchmark/charts/`.
    pub output_base: PathBuf,

    /// Wipe each chart directory before writing into it.
    pub wipe_output: bool,

    /// Timing column of the time series.
    pub column: Column,

    /// How values of the same matrix size are combined.
    pub reduction: Reduction,

    /// What to do with matrix sizes without values.
    pub empty: EmptyPolicy,

    /// Square kernel sizes to draw; empty draws all.
    pub kernels: Vec<usize>,

    /// Square block dimensions to draw; empty draws all.
    pub block_dims: Vec<usize>,

    /// Image options.
    pub chart: ChartSetting,
}

/// Image options.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSetting {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// Matrix sizes per box plot image.
    pub sizes_per_page: usize,
}

impl Default for Setting {
    fn default() -> Self {
        Setting {
            output_base: PathBuf::from("build"),
            wipe_output: true,
            column: Column::Mean,
            reduction: Reduction::Mean,
            empty: EmptyPolicy::Skip,
            kernels: Vec::new(),
            block_dims: Vec::new(),
            chart: ChartSetting::default(),
        }
    }
}

impl Default for ChartSetting {
    fn default() -> Self {
        ChartSetting {
            width: 2200,
            height: 1100,
            sizes_per_page: 2,
        }
    }
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let path = path.as_ref();
        let mut file =
            File::open(path).chain_err(|| format!("failed to open setting {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Setting::parse(&contents).chain_err(|| format!("invalid setting {}", path.display()))
    }

    /// Reads `path` when given, the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Setting> {
        match path {
            Some(p) => Setting::init(p),
            None => Ok(Setting::default()),
        }
    }

    /// Parses and checks a TOML setting.
    pub fn parse(contents: &str) -> Result<Setting> {
        let setting: Setting = toml::from_str(contents)?;
        if setting.chart.width == 0 || setting.chart.height == 0 {
            bail!("chart size must not be zero");
        }
        if setting.chart.sizes_per_page == 0 {
            bail!("sizes_per_page must be at least 1");
        }
        Ok(setting)
    }

    /// The aggregation options.
    pub fn aggregation(&self) -> Aggregation {
        Aggregation {
            column: self.column,
            reduction: self.reduction,
            empty: self.empty,
        }
    }

    /// Whether charts are drawn for `group`.
    pub fn selects(&self, group: &Group) -> bool {
        let pick = |filter: &[usize], extent: usize| filter.is_empty() || filter.contains(&extent);
        pick(&self.kernels, group.kernel.x) && pick(&self.block_dims, group.block.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dim;

    #[test]
    fn empty_setting_is_default() {
        assert_eq!(Setting::parse("").unwrap(), Setting::default());
        assert_eq!(Setting::default().aggregation(), Aggregation::default());
    }

    #[test]
    fn parse_full_setting() {
        let setting = Setting::parse(
            r#"
output_base = "/tmp/out"
wipe_output = false
column = "median"
reduction = "median"
empty = "fail"
kernels = [3, 5]

[chart]
sizes_per_page = 3
"#,
        )
        .unwrap();
        assert_eq!(setting.output_base, PathBuf::from("/tmp/out"));
        assert!(!setting.wipe_output);
        assert_eq!(setting.column, Column::Median);
        assert_eq!(setting.empty, EmptyPolicy::Fail);
        assert_eq!(setting.chart.sizes_per_page, 3);
        assert_eq!(setting.chart.width, 2200);

        assert!(setting.selects(&Group::new(Dim::square(5), Dim::square(32))));
        assert!(!setting.selects(&Group::new(Dim::square(7), Dim::square(8))));
    }

    #[test]
    fn shipped_setting_parses() {
        let path = format!("{}/Setting.toml", env!("CARGO_MANIFEST_DIR"));
        let setting = Setting::init(&path).unwrap();
        assert_eq!(setting.kernels, vec![3, 5, 7, 9, 11]);
        assert_eq!(setting.chart, ChartSetting::default());
    }

    #[test]
    fn reject_bad_setting() {
        assert!(Setting::parse("column = \"mode\"").is_err());
        assert!(Setting::parse("[chart]\nsizes_per_page = 0").is_err());
    }
}
