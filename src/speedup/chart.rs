use std::{fmt::Display, path::Path};

use plotters::{
    coord::ranged1d::SegmentValue,
    prelude::*,
    style::{register_font, FontStyle},
};

use super::SpeedupTable;
use crate::Error;

const CHART_SIZE: (u32, u32) = (2800, 1000);
const FONT_FAMILY: &str = "sans-serif";
const CAPTION_FONT_SIZE: u32 = 48;
const LABEL_FONT_SIZE: u32 = 24;
const MARKER_RADIUS: u32 = 8;
const Y_AXIS_DESCRIPTION: &str = "Speedup (T1 / Tp)";
const Y_AXIS_HEADROOM: f64 = 1.1;
const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

fn to_chart_error<E: Display>(error: E) -> Error {
    Error::ChartRenderingFailed(error.to_string())
}

/// Registers the embedded font under [`FONT_FAMILY`].
/// Plotters draws no text without a registered font.
fn register_chart_font() -> crate::Result<()> {
    register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).map_err(|_| {
        Error::ChartRenderingFailed(format!("Embedded font for '{}' is invalid", FONT_FAMILY))
    })
}

fn label_of(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => {
            labels.get(*index as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

/// Line and marker chart of the speedup per configuration, one categorical
/// x position per table row.
pub fn render_speedup_chart(table: &SpeedupTable, path: &Path) -> crate::Result<()> {
    let rows = table.rows();
    let last_index = rows.len().saturating_sub(1) as u32;
    let labels: Vec<String> = rows.iter().map(|row| row.label.clone()).collect();
    let points: Vec<(SegmentValue<u32>, f64)> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.speedup.is_finite())
        .map(|(index, row)| (SegmentValue::CenterOf(index as u32), row.speedup))
        .collect();
    let y_max = (table.max_speedup() * Y_AXIS_HEADROOM).max(1.0);
    register_chart_font()?;
    log::info!(
        "Rendering {} configurations to '{}'",
        rows.len(),
        path.display()
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(to_chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(table.title(), (FONT_FAMILY, CAPTION_FONT_SIZE))
        .margin(24)
        .x_label_area_size(360)
        .y_label_area_size(110)
        .build_cartesian_2d((0..last_index).into_segmented(), 0.0..y_max)
        .map_err(to_chart_error)?;

    let x_label_formatter = |value: &SegmentValue<u32>| label_of(&labels, value);
    chart
        .configure_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&x_label_formatter)
        .x_label_style(
            (FONT_FAMILY, LABEL_FONT_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc(Y_AXIS_DESCRIPTION)
        .draw()
        .map_err(to_chart_error)?;

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &BLUE))
        .map_err(to_chart_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|point| Circle::new(point.clone(), MARKER_RADIUS, BLUE.filled())),
        )
        .map_err(to_chart_error)?;

    root.present().map_err(to_chart_error)
}
