use super::parser::BeamDeckInput;
use crate::domain::{PostError, PostResult};
use crate::modules::serialization::{
    format_fixed_f64, render_numeric_column, render_numeric_matrix, write_text_artifact,
};
use crate::numerics::{
    convolve_same, frequency_equation, linspace, sweep_brackets, FieldMatrix, ModalBasis,
    RootSweepOptions, SpaceTimeGrid,
};
use crate::plotting::{field_heatmap, PlotError};
use serde::Serialize;
use std::f64::consts::PI;
use std::path::Path;

#[derive(Debug, Clone)]
pub(super) struct BeamModel {
    case_id: String,
    deck: BeamDeckInput,
    eigenvalues: Vec<f64>,
    basis: ModalBasis,
    grid: SpaceTimeGrid,
    field: FieldMatrix,
}

#[derive(Debug, Clone, Serialize)]
struct BeamSummary {
    case_id: String,
    mode_count: usize,
    series_terms: usize,
    eigenvalues: Vec<f64>,
    angular_frequencies: Vec<f64>,
    position_samples: usize,
    time_samples: usize,
    sweep_steps: usize,
    field_min: f64,
    field_max: f64,
}

impl BeamModel {
    pub(super) fn from_deck(case_id: &str, deck: BeamDeckInput) -> PostResult<Self> {
        let brackets: Vec<(f64, f64)> = (0..deck.bracket_count)
            .map(|k| {
                (
                    k as f64 * deck.bracket_width,
                    (k + 1) as f64 * deck.bracket_width,
                )
            })
            .collect();
        let options = RootSweepOptions {
            dedup_tol: deck.dedup_tol,
            ..RootSweepOptions::default()
        };
        let eigenvalues = sweep_brackets(frequency_equation, &brackets, options)
            .map_err(|error| {
                PostError::computation(
                    "RUN.BEAM_ROOT_SWEEP",
                    format!("case '{}': {}", case_id, error),
                )
            })?;

        if eigenvalues.len() < deck.series_terms {
            return Err(PostError::computation(
                "RUN.BEAM_MODE_DEFICIT",
                format!(
                    "case '{}': root sweep converged {} modes, series truncation requests {}",
                    case_id,
                    eigenvalues.len(),
                    deck.series_terms
                ),
            ));
        }

        let betas = eigenvalues
            .iter()
            .map(|root| root / deck.length)
            .collect::<Vec<_>>();
        let stiffness_ratio =
            deck.flexural_rigidity / (deck.density * deck.section_area);
        let basis =
            ModalBasis::new(betas, deck.length, stiffness_ratio).map_err(|error| {
                PostError::computation(
                    "RUN.BEAM_MODAL_BASIS",
                    format!("case '{}': {}", case_id, error),
                )
            })?;

        let positions = linspace(
            deck.position_min,
            deck.position_max,
            deck.position_samples,
        )
        .map_err(|error| grid_error(case_id, error))?;
        let times = linspace(deck.time_min, deck.time_max, deck.time_samples)
            .map_err(|error| grid_error(case_id, error))?;
        let grid = SpaceTimeGrid::new(positions, times);

        let field = synthesize_field(case_id, &deck, &basis, &grid)?;

        Ok(Self {
            case_id: case_id.to_string(),
            deck,
            eigenvalues,
            basis,
            grid,
            field,
        })
    }

    fn summary(&self) -> BeamSummary {
        let mut field_min = f64::INFINITY;
        let mut field_max = f64::NEG_INFINITY;
        for row in 0..self.field.nrows() {
            for col in 0..self.field.ncols() {
                field_min = field_min.min(self.field[(row, col)]);
                field_max = field_max.max(self.field[(row, col)]);
            }
        }

        BeamSummary {
            case_id: self.case_id.clone(),
            mode_count: self.basis.mode_count(),
            series_terms: self.deck.series_terms,
            eigenvalues: self.eigenvalues.clone(),
            angular_frequencies: (0..self.deck.series_terms)
                .map(|mode| self.basis.angular_frequency(mode))
                .collect(),
            position_samples: self.grid.positions().len(),
            time_samples: self.grid.times().len(),
            sweep_steps: self.deck.sweep_steps,
            field_min,
            field_max,
        }
    }

    pub(super) fn write_artifact(
        &self,
        artifact_name: &str,
        output_path: &Path,
    ) -> PostResult<()> {
        match artifact_name {
            "deflection_field.dat" => {
                let rendered = render_numeric_matrix(
                    self.field.nrows(),
                    self.field.ncols(),
                    |row, col| self.field[(row, col)],
                );
                write_text_artifact(output_path, &rendered)
                    .map_err(|source| write_error(output_path, source))
            }
            "x_axis.dat" => {
                write_text_artifact(output_path, &render_numeric_column(self.grid.positions()))
                    .map_err(|source| write_error(output_path, source))
            }
            "t_axis.dat" => {
                write_text_artifact(output_path, &render_numeric_column(self.grid.times()))
                    .map_err(|source| write_error(output_path, source))
            }
            "beam_summary.dat" => write_text_artifact(output_path, &self.render_summary())
                .map_err(|source| write_error(output_path, source)),
            "beam_summary.json" => {
                let rendered =
                    serde_json::to_string_pretty(&self.summary()).map_err(|source| {
                        PostError::internal(
                            "SYS.BEAM_SUMMARY_ENCODE",
                            format!("failed to encode BEAM summary: {}", source),
                        )
                    })?;
                write_text_artifact(output_path, &rendered)
                    .map_err(|source| write_error(output_path, source))
            }
            "deflection_map.svg" => field_heatmap(
                &self.field,
                self.grid.positions(),
                self.grid.times(),
                "beam deflection w(x, t)",
                output_path,
            )
            .map_err(|error| plot_error(output_path, error)),
            other => Err(PostError::internal(
                "SYS.BEAM_OUTPUT_CONTRACT",
                format!("unsupported BEAM output artifact '{}'", other),
            )),
        }
    }

    fn render_summary(&self) -> String {
        let summary = self.summary();
        let mut lines = Vec::with_capacity(summary.mode_count + 16);

        lines.push("BEAM analysis".to_string());
        lines.push(format!("case: {}", self.case_id));
        lines.push("input-artifacts: beam.inp".to_string());
        lines.push(
            "output-artifacts: deflection_field.dat x_axis.dat t_axis.dat beam_summary.dat \
             beam_summary.json deflection_map.svg"
                .to_string(),
        );
        lines.push(format!(
            "length: {} flexural-rigidity: {} density: {} section-area: {}",
            format_fixed_f64(self.deck.length, 11, 6),
            format_fixed_f64(self.deck.flexural_rigidity, 11, 6),
            format_fixed_f64(self.deck.density, 11, 6),
            format_fixed_f64(self.deck.section_area, 11, 6),
        ));
        lines.push(format!(
            "impact-speed: {} load-amplitude: {} time-increment: {}",
            format_fixed_f64(self.deck.impact_speed, 11, 6),
            format_fixed_f64(self.deck.load_amplitude, 11, 6),
            format_fixed_f64(self.deck.time_increment, 11, 8),
        ));
        lines.push(format!(
            "grid: {}x{} positions x times",
            summary.position_samples, summary.time_samples
        ));
        lines.push(format!(
            "modes: {} series-terms: {} sweep-steps: {}",
            summary.mode_count, summary.series_terms, summary.sweep_steps
        ));
        lines.push(format!(
            "field-min: {} field-max: {}",
            format_fixed_f64(summary.field_min, 15, 6),
            format_fixed_f64(summary.field_max, 15, 6),
        ));
        lines.push("columns: mode eigenvalue angular_frequency".to_string());
        for (mode, (eigenvalue, frequency)) in summary
            .eigenvalues
            .iter()
            .zip(&summary.angular_frequencies)
            .enumerate()
        {
            lines.push(format!(
                "{:4} {} {}",
                mode + 1,
                format_fixed_f64(*eigenvalue, 13, 8),
                format_fixed_f64(*frequency, 13, 8),
            ));
        }

        lines.join("\n")
    }
}

/// Homogeneous modal response plus the convolution-sweep contribution of the
/// rotating source.
fn synthesize_field(
    case_id: &str,
    deck: &BeamDeckInput,
    basis: &ModalBasis,
    grid: &SpaceTimeGrid,
) -> PostResult<FieldMatrix> {
    let series = basis.truncate(deck.series_terms).map_err(|error| {
        PostError::computation(
            "RUN.BEAM_SERIES",
            format!("case '{}': {}", case_id, error),
        )
    })?;

    let mut field = grid.evaluate(|x, t| deck.impact_speed * series.value(x, t));
    if deck.sweep_steps == 0 {
        return Ok(field);
    }

    let stiffness_ratio = deck.flexural_rigidity / (deck.density * deck.section_area);
    let omega = stiffness_ratio.sqrt();
    let gamma = -0.5 * (deck.time_increment * stiffness_ratio).powi(2);
    let sigma = -2.0 * deck.kernel_width * deck.kernel_width;
    let prefactor = -PI * deck.load_amplitude * deck.time_increment / deck.flexural_rigidity;
    // One blade passage per source position along the fan circumference.
    let step_delay =
        (2.0 * PI * deck.source_radius / deck.source_count as f64) / deck.impact_speed;

    let kernel: Vec<f64> = grid
        .positions()
        .iter()
        .map(|&x| {
            let tau = guarded_offset(x - deck.kernel_center, deck.singularity_guard);
            (4.0 * gamma * tau).exp() * (2.0 * sigma * tau).exp()
        })
        .collect();

    let mut particular = FieldMatrix::zeros(field.nrows(), field.ncols());
    let mut signal = vec![0.0; grid.positions().len()];
    for step in 0..deck.sweep_steps {
        let delay = step as f64 * step_delay;
        for (row, &t) in grid.times().iter().enumerate() {
            for (col, &x) in grid.positions().iter().enumerate() {
                let doubled_tau =
                    2.0 * guarded_offset(x - deck.kernel_center, deck.singularity_guard);
                signal[col] = ((t - delay) * omega * doubled_tau).sin() / doubled_tau;
            }
            let convolved = convolve_same(&signal, &kernel).map_err(|error| {
                PostError::computation(
                    "RUN.BEAM_CONVOLUTION",
                    format!("case '{}': sweep step {}: {}", case_id, step, error),
                )
            })?;
            for (col, value) in convolved.into_iter().enumerate() {
                particular[(row, col)] += value;
            }
        }
    }

    for row in 0..field.nrows() {
        for col in 0..field.ncols() {
            field[(row, col)] += prefactor * particular[(row, col)];
        }
    }
    Ok(field)
}

/// Keep the singular abscissa away from zero without moving anything else.
fn guarded_offset(tau: f64, guard: f64) -> f64 {
    if tau.abs() < guard { guard } else { tau }
}

fn grid_error(case_id: &str, error: crate::numerics::GridError) -> PostError {
    PostError::input_validation(
        "INPUT.BEAM_GRID",
        format!("case '{}': {}", case_id, error),
    )
}

fn write_error(output_path: &Path, source: std::io::Error) -> PostError {
    PostError::io_system(
        "IO.BEAM_OUTPUT_WRITE",
        format!(
            "failed to write BEAM artifact '{}': {}",
            output_path.display(),
            source
        ),
    )
}

fn plot_error(output_path: &Path, error: PlotError) -> PostError {
    match error {
        PlotError::InvalidData(message) => PostError::computation(
            "RUN.BEAM_PLOT_DATA",
            format!("cannot chart '{}': {}", output_path.display(), message),
        ),
        other => PostError::io_system(
            "IO.BEAM_PLOT_WRITE",
            format!(
                "failed to render BEAM chart '{}': {}",
                output_path.display(),
                other
            ),
        ),
    }
}
