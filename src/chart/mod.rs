//! Chart rendering.
//!
//! Every chart kind draws one PNG per (kernel, block) group of a dataset into
//! `<output_base>/benchmark/charts/<dataset>/<kind>/`.

mod boxplot;
mod error_band;
mod speed_up_bar;
mod time_series;

use crate::aggregate;
use crate::config::{Dim, Group};
use crate::dataset::Dataset;
use crate::errors::*;
use crate::setting::Setting;
use crate::variant::Variant;
use plotters::style::RGBColor;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const TITLE_FONT_SIZE: u32 = 44;
const SUBTITLE_FONT_SIZE: u32 = 30;
const AXIS_LABEL_FONT_SIZE: u32 = 26;
const TICK_LABEL_FONT_SIZE: u32 = 20;
const LEGEND_FONT_SIZE: u32 = 22;
const DATA_LABEL_FONT_SIZE: u32 = 18;

const FONT: &str = "sans-serif";

/// Series colors, in variant order.
const VARIANT_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
];

fn variant_color(variant: Variant) -> RGBColor {
    VARIANT_COLORS[variant.ordinal()]
}

/// Tick label of the `x`-th matrix size on a categorical axis.
fn size_label(sizes: &[Dim], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    sizes
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// The chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// one line per variant over the matrix sizes
    TimeSeries,
    /// lines with a mean ± std band
    TimeSeriesWithError,
    /// a bar chart per speed-up pair
    SpeedUpBar,
    /// box plots of the raw run times
    Boxplot,
}

impl ChartKind {
    /// Every kind, in rendering order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::TimeSeries,
        ChartKind::TimeSeriesWithError,
        ChartKind::SpeedUpBar,
        ChartKind::Boxplot,
    ];

    /// Output subdirectory of this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "time_series",
            ChartKind::TimeSeriesWithError => "time_series_with_error",
            ChartKind::SpeedUpBar => "speed_up_bar_chart",
            ChartKind::Boxplot => "time_series_boxplot",
        }
    }

    /// Heading printed above every chart of this kind.
    pub fn heading(self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "TIME BENCHMARK",
            ChartKind::TimeSeriesWithError => "TIME BENCHMARK WITH ERROR",
            ChartKind::SpeedUpBar => "SPEEDUP BENCHMARK",
            ChartKind::Boxplot => "TIME SERIES BOXPLOT",
        }
    }

    /// Human name, e.g. `Time series chart`.
    pub fn description(self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "Time series chart",
            ChartKind::TimeSeriesWithError => "Time series with error chart",
            ChartKind::SpeedUpBar => "Speed up bar chart",
            ChartKind::Boxplot => "Time series boxplot chart",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ChartKind::TimeSeries => "time-series",
            ChartKind::TimeSeriesWithError => "time-series-with-error",
            ChartKind::SpeedUpBar => "speed-up-bar",
            ChartKind::Boxplot => "boxplot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<ChartKind> {
        match ChartKind::ALL.iter().find(|k| k.name() == s) {
            Some(&kind) => Ok(kind),
            None => bail!(
                "unknown chart kind '{}', expected one of: {}",
                s,
                ChartKind::ALL
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Chart kinds picked on the command line: one kind, or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelection {
    /// every kind, in rendering order
    All,
    /// a single kind
    One(ChartKind),
}

impl KindSelection {
    /// The selected kinds.
    pub fn kinds(self) -> Vec<ChartKind> {
        match self {
            KindSelection::All => ChartKind::ALL.to_vec(),
            KindSelection::One(kind) => vec![kind],
        }
    }
}

impl Default for KindSelection {
    fn default() -> Self {
        KindSelection::All
    }
}

impl FromStr for KindSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<KindSelection> {
        match s {
            "all" => Ok(KindSelection::All),
            _ => s.parse().map(KindSelection::One),
        }
    }
}

/// Where the charts of one dataset go.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    dataset_dir: PathBuf,
}

impl OutputLayout {
    /// Layout below `base` for the dataset named `dataset`.
    pub fn new<P: AsRef<Path>>(base: P, dataset: &str) -> Self {
        OutputLayout {
            dataset_dir: base.as_ref().join("benchmark").join("charts").join(dataset),
        }
    }

    /// Directory of one chart kind.
    pub fn kind_dir(&self, kind: ChartKind) -> PathBuf {
        self.dataset_dir.join(kind.dir_name())
    }

    /// File of one chart. `page` is set for charts split over several
    /// images.
    pub fn chart_path(&self, kind: ChartKind, group: &Group, page: Option<usize>) -> PathBuf {
        let stem = match page {
            Some(p) => format!("{}__{}", group.label(), p),
            None => group.label(),
        };
        self.kind_dir(kind).join(format!("{}.png", stem))
    }

    /// Creates the directory of `kind`. With `wipe`, anything already in it
    /// is removed first.
    pub fn prepare(&self, kind: ChartKind, wipe: bool) -> Result<PathBuf> {
        let dir = self.kind_dir(kind);
        if wipe && dir.exists() {
            debug!("wiping {}", dir.display());
            fs::remove_dir_all(&dir)
                .chain_err(|| format!("failed to wipe {}", dir.display()))?;
        }
        fs::create_dir_all(&dir).chain_err(|| format!("failed to create {}", dir.display()))?;
        Ok(dir)
    }
}

/// Draws every chart of `kind` for `dataset` and returns the directory they
/// were written to.
pub fn render(kind: ChartKind, dataset: &Dataset, setting: &Setting) -> Result<PathBuf> {
    let layout = OutputLayout::new(&setting.output_base, dataset.name());
    let dir = layout.prepare(kind, setting.wipe_output)?;
    let sizes = dataset.matrix_sizes();

    for group in dataset.groups() {
        if !setting.selects(&group) {
            trace!("{} filtered out", group);
            continue;
        }
        let title = format!("{} → {}", kind.heading(), group.label().to_uppercase());
        if kind == ChartKind::Boxplot {
            boxplot::draw_group(&layout, dataset, &group, &title, setting)?;
            info!("{}: {} drawn", group.label(), kind);
            continue;
        }

        if dataset.results_for(&group).next().is_none() {
            warn!("{}: no results table, {} skipped", group.label(), kind);
            continue;
        }
        let tables = dataset.load_tables(&group)?;
        let aggregation = setting.aggregation();
        let path = layout.chart_path(kind, &group, None);
        match kind {
            ChartKind::TimeSeries => {
                let series = aggregate::aggregate_timings(&tables, &group, &sizes, &aggregation)?;
                time_series::draw(&path, &title, &series, setting)?;
            }
            ChartKind::TimeSeriesWithError => {
                let spreads = aggregate::aggregate_spread(&tables, &group, &sizes, &aggregation)?;
                error_band::draw(&path, &title, &spreads, setting)?;
            }
            ChartKind::SpeedUpBar => {
                let series = aggregate::aggregate_speed_ups(&tables, &group, &sizes, &aggregation)?;
                speed_up_bar::draw(&path, &title, &series, setting)?;
            }
            ChartKind::Boxplot => unreachable!(),
        }
        info!("{}: {} drawn", group.label(), kind);
    }
    Ok(dir)
}

/// Draws every chart kind in turn. Returns the output directory of each.
pub fn render_all(dataset: &Dataset, setting: &Setting) -> Result<Vec<(ChartKind, PathBuf)>> {
    ChartKind::ALL
        .iter()
        .map(|&kind| render(kind, dataset, setting).map(|dir| (kind, dir)))
        .collect()
}
