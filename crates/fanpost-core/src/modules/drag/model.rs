use super::parser::parse_drag_table;
use crate::domain::{PostError, PostResult};
use crate::modules::serialization::{format_fixed_f64, write_text_artifact};
use crate::numerics::ForceTable;
use crate::plotting::{scatter_chart, PlotError, ScatterPanel};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub(super) struct DragModel {
    case_id: String,
    table: ForceTable,
}

#[derive(Debug, Clone, Serialize)]
struct DragSummary {
    case_id: String,
    rows: usize,
    time_min: f64,
    time_max: f64,
    fy_mean: f64,
}

impl DragModel {
    pub(super) fn from_source(case_id: &str, source: &str) -> PostResult<Self> {
        Ok(Self {
            case_id: case_id.to_string(),
            table: parse_drag_table(case_id, source)?,
        })
    }

    fn summary(&self) -> PostResult<DragSummary> {
        let times = self.column(0)?;
        Ok(DragSummary {
            case_id: self.case_id.clone(),
            rows: self.table.row_count(),
            time_min: times.iter().copied().fold(f64::INFINITY, f64::min),
            time_max: times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            fy_mean: self.column_mean(1)?,
        })
    }

    pub(super) fn write_artifact(
        &self,
        artifact_name: &str,
        output_path: &Path,
    ) -> PostResult<()> {
        match artifact_name {
            "drag_summary.dat" => write_text_artifact(output_path, &self.render_summary()?)
                .map_err(|source| write_error(output_path, source)),
            "drag_summary.json" => {
                let summary = self.summary()?;
                let rendered = serde_json::to_string_pretty(&summary).map_err(|source| {
                    PostError::internal(
                        "SYS.DRAG_SUMMARY_ENCODE",
                        format!("failed to encode DRAG summary: {}", source),
                    )
                })?;
                write_text_artifact(output_path, &rendered)
                    .map_err(|source| write_error(output_path, source))
            }
            "drag_history.svg" => self.render_history_chart(output_path),
            other => Err(PostError::internal(
                "SYS.DRAG_OUTPUT_CONTRACT",
                format!("unsupported DRAG output artifact '{}'", other),
            )),
        }
    }

    fn render_summary(&self) -> PostResult<String> {
        let summary = self.summary()?;
        Ok(format!(
            "\
DRAG analysis\n\
case: {}\n\
input-artifacts: drag.dat\n\
output-artifacts: drag_summary.dat drag_summary.json drag_history.svg\n\
rows: {}\n\
time-min: {} time-max: {}\n\
fy-mean: {}\n",
            summary.case_id,
            summary.rows,
            format_fixed_f64(summary.time_min, 13, 6),
            format_fixed_f64(summary.time_max, 13, 6),
            format_fixed_f64(summary.fy_mean, 13, 6),
        ))
    }

    fn render_history_chart(&self, output_path: &Path) -> PostResult<()> {
        let times = self.column(0)?;
        let fy = self.column(1)?;
        let points: Vec<(f64, f64)> = times.iter().copied().zip(fy).collect();

        let panel = ScatterPanel {
            points: &points,
            title: "Fy vs t".to_string(),
            x_label: "t".to_string(),
            y_label: "Fy".to_string(),
            series_label: format!("mean Fy = {:.2}", self.column_mean(1)?),
        };

        scatter_chart(&panel, output_path).map_err(|error| plot_error(output_path, error))
    }

    fn column(&self, index: usize) -> PostResult<Vec<f64>> {
        self.table.column(index).map_err(|error| {
            PostError::internal(
                "SYS.DRAG_COLUMN",
                format!("case '{}': {}", self.case_id, error),
            )
        })
    }

    fn column_mean(&self, index: usize) -> PostResult<f64> {
        self.table.column_mean(index).map_err(|error| {
            PostError::internal(
                "SYS.DRAG_COLUMN",
                format!("case '{}': {}", self.case_id, error),
            )
        })
    }
}

fn write_error(output_path: &Path, source: std::io::Error) -> PostError {
    PostError::io_system(
        "IO.DRAG_OUTPUT_WRITE",
        format!(
            "failed to write DRAG artifact '{}': {}",
            output_path.display(),
            source
        ),
    )
}

fn plot_error(output_path: &Path, error: PlotError) -> PostError {
    match error {
        PlotError::InvalidData(message) => PostError::computation(
            "RUN.DRAG_PLOT_DATA",
            format!("cannot chart '{}': {}", output_path.display(), message),
        ),
        other => PostError::io_system(
            "IO.DRAG_PLOT_WRITE",
            format!(
                "failed to render DRAG chart '{}': {}",
                output_path.display(),
                other
            ),
        ),
    }
}
