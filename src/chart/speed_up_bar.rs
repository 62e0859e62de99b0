use super::time_series::{axis_sizes, indexed};
use super::*;
use crate::aggregate::AggregatedSeries;
use crate::speedup::format_ratio;
use crate::variant::SpeedUpPair;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::Path;

const BAR_COLOR: RGBColor = RGBColor(166, 206, 227);
const BAR_WIDTH: f64 = 0.6;

/// A 2x2 grid with one bar chart per speed-up pair, in block order.
pub(super) fn draw(
    path: &Path,
    title: &str,
    series: &BTreeMap<SpeedUpPair, AggregatedSeries>,
    setting: &Setting,
) -> Result<()> {
    let sizes = axis_sizes(series.values());

    let root = BitMapBackend::new(path, (setting.chart.width, setting.chart.height))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, TITLE_FONT_SIZE))?;

    for (area, pair) in root.split_evenly((2, 2)).iter().zip(SpeedUpPair::ALL.iter()) {
        let empty = AggregatedSeries::default();
        let s = series.get(pair).unwrap_or(&empty);
        let data = indexed(s, &sizes);
        let max = s.max().unwrap_or(0.0) * 1.2;

        let mut chart = ChartBuilder::on(area)
            .caption(pair.title(), (FONT, SUBTITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5..(sizes.len() as f64 - 0.5), 0.0..max.max(1.0))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(sizes.len().max(1))
            .x_label_formatter(&|x| size_label(&sizes, *x))
            .x_desc("Size")
            .y_desc("SpeedUp[x]")
            .label_style((FONT, TICK_LABEL_FONT_SIZE))
            .axis_desc_style((FONT, AXIS_LABEL_FONT_SIZE))
            .draw()?;

        for &(x, ratio) in &data {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, ratio)],
                BAR_COLOR.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format_ratio(ratio),
                (x, ratio),
                (FONT, DATA_LABEL_FONT_SIZE)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))?;
        }
    }

    root.present()?;
    debug!("wrote {}", path.display());
    Ok(())
}
