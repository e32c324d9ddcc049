use super::parser::parse_force_table;
use crate::domain::{PostError, PostResult};
use crate::modules::serialization::{format_fixed_f64, write_text_artifact};
use crate::numerics::ForceTable;
use crate::plotting::{scatter_pair, PlotError, ScatterPanel};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub(super) struct ForcesModel {
    case_id: String,
    table: ForceTable,
}

#[derive(Debug, Clone, Serialize)]
struct ForcesSummary {
    case_id: String,
    rows: usize,
    time_min: f64,
    time_max: f64,
    fx_mean: f64,
    fy_mean: f64,
}

impl ForcesModel {
    pub(super) fn from_source(case_id: &str, source: &str) -> PostResult<Self> {
        Ok(Self {
            case_id: case_id.to_string(),
            table: parse_force_table(case_id, source)?,
        })
    }

    fn summary(&self) -> PostResult<ForcesSummary> {
        let times = self.column(0)?;
        let time_min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let time_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(ForcesSummary {
            case_id: self.case_id.clone(),
            rows: self.table.row_count(),
            time_min,
            time_max,
            fx_mean: self.column_mean(1)?,
            fy_mean: self.column_mean(2)?,
        })
    }

    pub(super) fn write_artifact(
        &self,
        artifact_name: &str,
        output_path: &Path,
    ) -> PostResult<()> {
        match artifact_name {
            "force_summary.dat" => {
                write_text_artifact(output_path, &self.render_summary()?)
                    .map_err(|source| write_error(output_path, source))
            }
            "force_summary.json" => {
                let summary = self.summary()?;
                let rendered = serde_json::to_string_pretty(&summary).map_err(|source| {
                    PostError::internal(
                        "SYS.FORCES_SUMMARY_ENCODE",
                        format!("failed to encode FORCES summary: {}", source),
                    )
                })?;
                write_text_artifact(output_path, &rendered)
                    .map_err(|source| write_error(output_path, source))
            }
            "force_history.svg" => self.render_history_chart(output_path),
            other => Err(PostError::internal(
                "SYS.FORCES_OUTPUT_CONTRACT",
                format!("unsupported FORCES output artifact '{}'", other),
            )),
        }
    }

    fn render_summary(&self) -> PostResult<String> {
        let summary = self.summary()?;
        Ok(format!(
            "\
FORCES analysis\n\
case: {}\n\
input-artifacts: forces.dat\n\
output-artifacts: force_summary.dat force_summary.json force_history.svg\n\
rows: {}\n\
time-min: {} time-max: {}\n\
fx-mean: {}\n\
fy-mean: {}\n",
            summary.case_id,
            summary.rows,
            format_fixed_f64(summary.time_min, 13, 6),
            format_fixed_f64(summary.time_max, 13, 6),
            format_fixed_f64(summary.fx_mean, 13, 6),
            format_fixed_f64(summary.fy_mean, 13, 6),
        ))
    }

    fn render_history_chart(&self, output_path: &Path) -> PostResult<()> {
        let times = self.column(0)?;
        let fx = self.column(1)?;
        let fy = self.column(2)?;
        let fx_points: Vec<(f64, f64)> = times.iter().copied().zip(fx).collect();
        let fy_points: Vec<(f64, f64)> = times.iter().copied().zip(fy).collect();

        let left = ScatterPanel {
            points: &fx_points,
            title: "Fx vs t".to_string(),
            x_label: "t".to_string(),
            y_label: "Fx".to_string(),
            series_label: format!("mean Fx = {:.2}", self.column_mean(1)?),
        };
        let right = ScatterPanel {
            points: &fy_points,
            title: "Fy vs t".to_string(),
            x_label: "t".to_string(),
            y_label: "Fy".to_string(),
            series_label: format!("mean Fy = {:.2}", self.column_mean(2)?),
        };

        scatter_pair(&left, &right, output_path).map_err(|error| plot_error(output_path, error))
    }

    fn column(&self, index: usize) -> PostResult<Vec<f64>> {
        self.table.column(index).map_err(|error| {
            PostError::internal(
                "SYS.FORCES_COLUMN",
                format!("case '{}': {}", self.case_id, error),
            )
        })
    }

    fn column_mean(&self, index: usize) -> PostResult<f64> {
        self.table.column_mean(index).map_err(|error| {
            PostError::internal(
                "SYS.FORCES_COLUMN",
                format!("case '{}': {}", self.case_id, error),
            )
        })
    }
}

fn write_error(output_path: &Path, source: std::io::Error) -> PostError {
    PostError::io_system(
        "IO.FORCES_OUTPUT_WRITE",
        format!(
            "failed to write FORCES artifact '{}': {}",
            output_path.display(),
            source
        ),
    )
}

fn plot_error(output_path: &Path, error: PlotError) -> PostError {
    match error {
        PlotError::InvalidData(message) => PostError::computation(
            "RUN.FORCES_PLOT_DATA",
            format!("cannot chart '{}': {}", output_path.display(), message),
        ),
        other => PostError::io_system(
            "IO.FORCES_PLOT_WRITE",
            format!(
                "failed to render FORCES chart '{}': {}",
                output_path.display(),
                other
            ),
        ),
    }
}
