use super::time_series::{axis_sizes, indexed};
use super::*;
use crate::aggregate::Spread;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Outline of the mean ± std band on the size axis: the upper edge left to
/// right, then the lower edge back.
fn band_outline(spread: &Spread, sizes: &[Dim]) -> Vec<(f64, f64)> {
    let band = spread
        .band()
        .into_iter()
        .filter_map(|(size, lo, hi)| sizes.binary_search(&size).ok().map(|i| (i as f64, lo, hi)))
        .collect::<Vec<_>>();
    band.iter()
        .map(|&(x, _, hi)| (x, hi))
        .chain(band.iter().rev().map(|&(x, lo, _)| (x, lo.max(0.0))))
        .collect()
}

/// One line per variant over a translucent band of one standard deviation.
pub(super) fn draw(
    path: &Path,
    title: &str,
    spreads: &BTreeMap<Variant, Spread>,
    setting: &Setting,
) -> Result<()> {
    let sizes = axis_sizes(spreads.values().map(|s| &s.center));
    let max = spreads
        .values()
        .flat_map(|s| s.band().into_iter().map(|b| b.2).chain(s.center.max()))
        .fold(0.0_f64, f64::max)
        * 1.15;

    let root = BitMapBackend::new(path, (setting.chart.width, setting.chart.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_FONT_SIZE))
        .margin(30)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..(sizes.len() as f64 - 0.5), 0.0..max.max(1.0))?;

    chart
        .configure_mesh()
        .x_labels(sizes.len().max(1))
        .x_label_formatter(&|x| size_label(&sizes, *x))
        .x_desc("Size")
        .y_desc("Time[ms]")
        .label_style((FONT, TICK_LABEL_FONT_SIZE))
        .axis_desc_style((FONT, AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (&variant, spread) in spreads {
        let color = variant_color(variant);
        let outline = band_outline(spread, &sizes);
        if outline.len() > 2 {
            chart.draw_series(std::iter::once(Polygon::new(outline, color.mix(0.3).filled())))?;
        }

        let data = indexed(&spread.center, &sizes);
        if data.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(data, color.stroke_width(2)))?
            .label(variant.series_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LEGEND_FONT_SIZE))
        .draw()?;

    root.present()?;
    debug!("wrote {}", path.display());
    Ok(())
}
