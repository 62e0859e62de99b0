use super::*;
use crate::aggregate::AggregatedSeries;
use plotters::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Matrix sizes present in any of `series`, ascending.
pub(super) fn axis_sizes<'a, I: Iterator<Item = &'a AggregatedSeries>>(series: I) -> Vec<Dim> {
    series
        .flat_map(|s| s.sizes())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Points of `series` on the categorical size axis.
pub(super) fn indexed(series: &AggregatedSeries, sizes: &[Dim]) -> Vec<(f64, f64)> {
    series
        .iter()
        .filter_map(|(size, value)| {
            sizes
                .binary_search(&size)
                .ok()
                .map(|idx| (idx as f64, value))
        })
        .collect()
}

/// One line per variant.
pub(super) fn draw(
    path: &Path,
    title: &str,
    series: &BTreeMap<Variant, AggregatedSeries>,
    setting: &Setting,
) -> Result<()> {
    let sizes = axis_sizes(series.values());
    let max = series
        .values()
        .filter_map(|s| s.max())
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

    for (&variant, s) in series {
        let color = variant_color(variant);
        let data = indexed(s, &sizes);
        if data.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(3)))?
            .label(variant.series_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
        chart.draw_series(PointSeries::of_element(
            data,
            6,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Accumulator, EmptyPolicy, Reduction};

    fn series(points: &[(usize, f64)]) -> AggregatedSeries {
        let mut acc = Accumulator::new();
        for &(size, value) in points {
            acc.add(Dim::square(size), value);
        }
        let group = Group::new(Dim::square(3), Dim::square(8));
        acc.finish(&[], Reduction::Mean, EmptyPolicy::Fail, &group).unwrap()
    }

    #[test]
    fn points_sit_on_their_size_index() {
        let a = series(&[(64, 1.0), (256, 3.0)]);
        let b = series(&[(128, 2.0)]);
        let sizes = axis_sizes(vec![&a, &b].into_iter());
        assert_eq!(sizes, vec![Dim::square(64), Dim::square(128), Dim::square(256)]);
        assert_eq!(indexed(&a, &sizes), vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(indexed(&b, &sizes), vec![(1.0, 2.0)]);
    }
}
