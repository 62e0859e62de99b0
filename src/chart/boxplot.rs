use super::*;
use crate::samples::{self, RawSamples};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const PARALLEL: [Variant; 2] = [Variant::ParWithCopy, Variant::Par];
const SEQUENTIAL: [Variant; 2] = [Variant::SeqWithCopy, Variant::Seq];

/// Draws the box plots of one group, `sizes_per_page` matrix sizes per
/// image. Pages are numbered from 1.
pub(super) fn draw_group(
    layout: &OutputLayout,
    dataset: &Dataset,
    group: &Group,
    title: &str,
    setting: &Setting,
) -> Result<()> {
    let dirs = dataset.sample_dirs(group);
    if dirs.is_empty() {
        warn!("{}: no sample directory, boxplot skipped", group.label());
        return Ok(());
    }
    let mut all = Vec::with_capacity(dirs.len());
    for (key, dir) in dirs {
        let s = samples::load_samples(key, dir)
            .chain_err(|| format!("failed to load samples from {}", dir.display()))?;
        all.push(s);
    }

    for (page, chunk) in all.chunks(setting.chart.sizes_per_page).enumerate() {
        let path = layout.chart_path(ChartKind::Boxplot, group, Some(page + 1));
        draw_page(&path, title, chunk, setting)?;
    }
    Ok(())
}

/// One row per matrix size: parallel variants left, sequential right.
fn draw_page(path: &Path, title: &str, rows: &[RawSamples], setting: &Setting) -> Result<()> {
    let root = BitMapBackend::new(path, (setting.chart.width, setting.chart.height))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, TITLE_FONT_SIZE))?;

    let cells = root.split_evenly((rows.len(), 2));
    for (row, s) in rows.iter().enumerate() {
        draw_cell(&cells[row * 2], s, &PARALLEL)?;
        draw_cell(&cells[row * 2 + 1], s, &SEQUENTIAL)?;
    }

    root.present()?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn draw_cell<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    samples: &RawSamples,
    variants: &[Variant; 2],
) -> Result<()> {
    let values = variants
        .iter()
        .flat_map(|&v| samples.get(v).iter().cloned())
        .collect::<Vec<_>>();
    let (lo, hi) = match value_range(&values) {
        Some(range) => range,
        None => {
            warn!("{}: no runs of {} and {}", samples.key, variants[0], variants[1]);
            return Ok(());
        }
    };

    let mut chart = ChartBuilder::on(area)
        .caption(samples.key.matrix.to_string(), (FONT, SUBTITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(170)
        .build_cartesian_2d(lo..hi, 0..3)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(4)
        .y_label_formatter(&|y| match *y {
            1 | 2 => variants[(*y - 1) as usize].name().replace('_', " "),
            _ => String::new(),
        })
        .x_desc("Time[ms]")
        .label_style((FONT, TICK_LABEL_FONT_SIZE))
        .axis_desc_style((FONT, AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (i, &variant) in variants.iter().enumerate() {
        let runs = samples.get(variant);
        if runs.is_empty() {
            continue;
        }
        let quartiles = Quartiles::new(runs);
        chart.draw_series(std::iter::once(
            Boxplot::new_horizontal(i as i32 + 1, &quartiles)
                .width(30)
                .whisker_width(0.5)
                .style(variant_color(variant)),
        ))?;
    }
    Ok(())
}

/// Value axis bounds with a margin of a tenth of the spread on both sides.
fn value_range(values: &[f64]) -> Option<(f32, f32)> {
    if values.is_empty() {
        return None;
    }
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let pad = if hi > lo { (hi - lo) / 10.0 } else { 1.0 };
    Some(((lo - pad) as f32, (hi + pad) as f32))
}
