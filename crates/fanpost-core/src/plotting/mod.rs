//! SVG chart rendering for the analysis artifacts.
//!
//! All charts use the vector backend so plots stay diffable and render in
//! headless environments without system fonts.

use crate::numerics::FieldMatrix;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const SCATTER_SIZE: (u32, u32) = (800, 600);
const SCATTER_PAIR_SIZE: (u32, u32) = (1200, 600);
const HEATMAP_SIZE: (u32, u32) = (900, 700);
const POINT_RADIUS: i32 = 3;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to prepare drawing area: {0}")]
    DrawingArea(String),
    #[error("failed to configure chart: {0}")]
    ChartConfig(String),
    #[error("failed to draw chart elements: {0}")]
    Drawing(String),
    #[error("invalid plot data: {0}")]
    InvalidData(String),
}

/// One scatter panel: samples plus the labels that frame them.
#[derive(Debug, Clone)]
pub struct ScatterPanel<'a> {
    pub points: &'a [(f64, f64)],
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
}

pub fn scatter_chart(panel: &ScatterPanel<'_>, output_path: &Path) -> Result<(), PlotError> {
    validate_points(panel.points)?;

    let root = SVGBackend::new(output_path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    draw_scatter_panel(&root, panel, &BLUE)?;
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Two scatter panels side by side, the original two-subplot figure layout.
pub fn scatter_pair(
    left: &ScatterPanel<'_>,
    right: &ScatterPanel<'_>,
    output_path: &Path,
) -> Result<(), PlotError> {
    validate_points(left.points)?;
    validate_points(right.points)?;

    let root = SVGBackend::new(output_path, SCATTER_PAIR_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, 2));
    draw_scatter_panel(&panels[0], left, &BLUE)?;
    draw_scatter_panel(&panels[1], right, &RED)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Field heatmap: one filled rectangle per grid cell, colored on a linear
/// two-stop gradient over the field's value range.
pub fn field_heatmap(
    field: &FieldMatrix,
    positions: &[f64],
    times: &[f64],
    title: &str,
    output_path: &Path,
) -> Result<(), PlotError> {
    if positions.len() < 2 || times.len() < 2 {
        return Err(PlotError::InvalidData(format!(
            "heatmap axes need at least 2 samples, got {}x{}",
            positions.len(),
            times.len()
        )));
    }
    if field.nrows() != times.len() || field.ncols() != positions.len() {
        return Err(PlotError::InvalidData(format!(
            "field shape {}x{} does not match axes {}x{}",
            field.nrows(),
            field.ncols(),
            times.len(),
            positions.len()
        )));
    }

    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for row in 0..field.nrows() {
        for col in 0..field.ncols() {
            let value = field[(row, col)];
            if !value.is_finite() {
                return Err(PlotError::InvalidData(format!(
                    "field value at ({row}, {col}) is not finite: {value}"
                )));
            }
            low = low.min(value);
            high = high.max(value);
        }
    }

    let root = SVGBackend::new(output_path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_span = positions[0]..positions[positions.len() - 1];
    let y_span = times[0]..times[times.len() - 1];
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_span, y_span)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x")
        .y_desc("t")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let x_edges = cell_edges(positions);
    let t_edges = cell_edges(times);
    chart
        .draw_series((0..field.nrows()).flat_map(|row| {
            let x_edges = &x_edges;
            let t_edges = &t_edges;
            (0..field.ncols()).map(move |col| {
                let color = gradient_color(field[(row, col)], low, high);
                Rectangle::new(
                    [
                        (x_edges[col], t_edges[row]),
                        (x_edges[col + 1], t_edges[row + 1]),
                    ],
                    color.filled(),
                )
            })
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn draw_scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    panel: &ScatterPanel<'_>,
    color: &RGBColor,
) -> Result<(), PlotError> {
    let (x_range, y_range) = point_ranges(panel.points)?;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let fill = color.filled();
    chart
        .draw_series(
            panel
                .points
                .iter()
                .map(|&point| Circle::new(point, POINT_RADIUS, fill)),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(&panel.series_label)
        .legend(move |(x, y)| Circle::new((x, y), POINT_RADIUS, fill));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn validate_points(points: &[(f64, f64)]) -> Result<(), PlotError> {
    if points.is_empty() {
        return Err(PlotError::InvalidData("scatter data cannot be empty".into()));
    }
    for (index, (x, y)) in points.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "scatter point {index} is not finite: ({x}, {y})"
            )));
        }
    }
    Ok(())
}

fn point_ranges(
    points: &[(f64, f64)],
) -> Result<(std::ops::Range<f64>, std::ops::Range<f64>), PlotError> {
    validate_points(points)?;

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    Ok((padded_range(x_min, x_max), padded_range(y_min, y_max)))
}

fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - pad)..(max + pad)
}

fn cell_edges(samples: &[f64]) -> Vec<f64> {
    let mut edges = Vec::with_capacity(samples.len() + 1);
    edges.push(samples[0]);
    for window in samples.windows(2) {
        edges.push(0.5 * (window[0] + window[1]));
    }
    edges.push(samples[samples.len() - 1]);
    edges
}

fn gradient_color(value: f64, low: f64, high: f64) -> RGBColor {
    let normalized = if high > low {
        ((value - low) / (high - low)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    let cold = (68.0, 1.0, 84.0);
    let warm = (253.0, 231.0, 37.0);
    let channel = |a: f64, b: f64| (a + (b - a) * normalized).round() as u8;
    RGBColor(
        channel(cold.0, warm.0),
        channel(cold.1, warm.1),
        channel(cold.2, warm.2),
    )
}
