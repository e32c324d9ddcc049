use super::BEAM_REQUIRED_INPUTS;
use crate::domain::{AnalysisModule, AnalysisRequest, OutputArtifact, PostError, PostResult};
use std::fs;
use std::path::Path;

/// Beam parameter deck. Defaults reproduce the reference study: a 10 cm
/// clamped-free beam struck by a fan blade passing at 300 cm/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct BeamDeckInput {
    pub(super) length: f64,
    pub(super) flexural_rigidity: f64,
    pub(super) density: f64,
    pub(super) section_area: f64,
    pub(super) impact_speed: f64,
    pub(super) series_terms: usize,
    pub(super) bracket_count: usize,
    pub(super) bracket_width: f64,
    pub(super) dedup_tol: f64,
    pub(super) position_samples: usize,
    pub(super) position_min: f64,
    pub(super) position_max: f64,
    pub(super) time_samples: usize,
    pub(super) time_min: f64,
    pub(super) time_max: f64,
    pub(super) source_radius: f64,
    pub(super) source_count: usize,
    pub(super) kernel_width: f64,
    pub(super) sweep_steps: usize,
    pub(super) load_amplitude: f64,
    pub(super) time_increment: f64,
    pub(super) kernel_center: f64,
    pub(super) singularity_guard: f64,
}

impl Default for BeamDeckInput {
    fn default() -> Self {
        Self {
            length: 10.0,
            flexural_rigidity: 1.0,
            density: 1.0,
            section_area: 1.0,
            impact_speed: 300.0,
            series_terms: 19,
            bracket_count: 20,
            bracket_width: 2.0,
            dedup_tol: 1.0e-6,
            position_samples: 500,
            position_min: 0.0,
            position_max: 10.0,
            time_samples: 500,
            time_min: 0.0,
            time_max: 60.0,
            source_radius: 20.0,
            source_count: 20,
            kernel_width: 0.2,
            sweep_steps: 501,
            load_amplitude: 1.0,
            time_increment: 1.0e-3,
            kernel_center: 9.0,
            singularity_guard: 1.0e-6,
        }
    }
}

pub(super) fn validate_request_shape(request: &AnalysisRequest) -> PostResult<()> {
    if request.module != AnalysisModule::Beam {
        return Err(PostError::input_validation(
            "INPUT.BEAM_MODULE",
            format!("BEAM module expects BEAM, got {}", request.module),
        ));
    }

    let input_file_name = request
        .input_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PostError::input_validation(
                "INPUT.BEAM_INPUT_ARTIFACT",
                format!(
                    "BEAM module expects input artifact '{}' at '{}'",
                    BEAM_REQUIRED_INPUTS[0],
                    request.input_path.display()
                ),
            )
        })?;

    if !input_file_name.eq_ignore_ascii_case(BEAM_REQUIRED_INPUTS[0]) {
        return Err(PostError::input_validation(
            "INPUT.BEAM_INPUT_ARTIFACT",
            format!(
                "BEAM module requires input artifact '{}' but received '{}'",
                BEAM_REQUIRED_INPUTS[0], input_file_name
            ),
        ));
    }

    Ok(())
}

pub(super) fn read_input_source(path: &Path, artifact_name: &str) -> PostResult<String> {
    fs::read_to_string(path).map_err(|source| {
        PostError::io_system(
            "IO.BEAM_INPUT_READ",
            format!(
                "failed to read BEAM input '{}' ({}): {}",
                path.display(),
                artifact_name,
                source
            ),
        )
    })
}

/// `key value` per line, `#` comments, unknown keys rejected. An empty deck
/// is valid and yields the reference defaults.
pub(super) fn parse_beam_deck(case_id: &str, source: &str) -> PostResult<BeamDeckInput> {
    let mut deck = BeamDeckInput::default();

    for (line_index, line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        let value = tokens.next().ok_or_else(|| {
            deck_error(case_id, format!("line {line_number}: key '{key}' has no value"))
        })?;
        if tokens.next().is_some() {
            return Err(deck_error(
                case_id,
                format!("line {line_number}: key '{key}' has trailing tokens"),
            ));
        }

        match key.to_ascii_lowercase().as_str() {
            "length" => deck.length = parse_f64(case_id, line_number, key, value)?,
            "flexural_rigidity" => {
                deck.flexural_rigidity = parse_f64(case_id, line_number, key, value)?
            }
            "density" => deck.density = parse_f64(case_id, line_number, key, value)?,
            "section_area" => deck.section_area = parse_f64(case_id, line_number, key, value)?,
            "impact_speed" => deck.impact_speed = parse_f64(case_id, line_number, key, value)?,
            "series_terms" => deck.series_terms = parse_usize(case_id, line_number, key, value)?,
            "bracket_count" => {
                deck.bracket_count = parse_usize(case_id, line_number, key, value)?
            }
            "bracket_width" => deck.bracket_width = parse_f64(case_id, line_number, key, value)?,
            "dedup_tol" => deck.dedup_tol = parse_f64(case_id, line_number, key, value)?,
            "position_samples" => {
                deck.position_samples = parse_usize(case_id, line_number, key, value)?
            }
            "position_min" => deck.position_min = parse_f64(case_id, line_number, key, value)?,
            "position_max" => deck.position_max = parse_f64(case_id, line_number, key, value)?,
            "time_samples" => deck.time_samples = parse_usize(case_id, line_number, key, value)?,
            "time_min" => deck.time_min = parse_f64(case_id, line_number, key, value)?,
            "time_max" => deck.time_max = parse_f64(case_id, line_number, key, value)?,
            "source_radius" => deck.source_radius = parse_f64(case_id, line_number, key, value)?,
            "source_count" => deck.source_count = parse_usize(case_id, line_number, key, value)?,
            "kernel_width" => deck.kernel_width = parse_f64(case_id, line_number, key, value)?,
            "sweep_steps" => deck.sweep_steps = parse_usize(case_id, line_number, key, value)?,
            "load_amplitude" => {
                deck.load_amplitude = parse_f64(case_id, line_number, key, value)?
            }
            "time_increment" => {
                deck.time_increment = parse_f64(case_id, line_number, key, value)?
            }
            "kernel_center" => deck.kernel_center = parse_f64(case_id, line_number, key, value)?,
            "singularity_guard" => {
                deck.singularity_guard = parse_f64(case_id, line_number, key, value)?
            }
            unknown => {
                return Err(deck_error(
                    case_id,
                    format!("line {line_number}: unknown deck key '{unknown}'"),
                ));
            }
        }
    }

    validate_deck(case_id, &deck)?;
    Ok(deck)
}

fn validate_deck(case_id: &str, deck: &BeamDeckInput) -> PostResult<()> {
    let positive = [
        ("length", deck.length),
        ("flexural_rigidity", deck.flexural_rigidity),
        ("density", deck.density),
        ("section_area", deck.section_area),
        ("impact_speed", deck.impact_speed),
        ("bracket_width", deck.bracket_width),
        ("source_radius", deck.source_radius),
        ("kernel_width", deck.kernel_width),
        ("time_increment", deck.time_increment),
        ("singularity_guard", deck.singularity_guard),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(deck_error(
                case_id,
                format!("'{name}' must be finite and > 0, got {value}"),
            ));
        }
    }

    if !deck.dedup_tol.is_finite() || deck.dedup_tol < 0.0 {
        return Err(deck_error(
            case_id,
            format!("'dedup_tol' must be finite and >= 0, got {}", deck.dedup_tol),
        ));
    }
    if !deck.load_amplitude.is_finite() {
        return Err(deck_error(
            case_id,
            format!("'load_amplitude' must be finite, got {}", deck.load_amplitude),
        ));
    }
    if !deck.kernel_center.is_finite() {
        return Err(deck_error(
            case_id,
            format!("'kernel_center' must be finite, got {}", deck.kernel_center),
        ));
    }
    if deck.series_terms == 0 {
        return Err(deck_error(case_id, "'series_terms' must be >= 1"));
    }
    if deck.bracket_count == 0 {
        return Err(deck_error(case_id, "'bracket_count' must be >= 1"));
    }
    if deck.source_count == 0 {
        return Err(deck_error(case_id, "'source_count' must be >= 1"));
    }
    if deck.position_samples < 2 || deck.time_samples < 2 {
        return Err(deck_error(
            case_id,
            format!(
                "grid needs at least 2 samples per axis, got {}x{}",
                deck.position_samples, deck.time_samples
            ),
        ));
    }
    if deck.position_min >= deck.position_max {
        return Err(deck_error(
            case_id,
            format!(
                "position span must be ordered, got [{}, {}]",
                deck.position_min, deck.position_max
            ),
        ));
    }
    if deck.time_min >= deck.time_max {
        return Err(deck_error(
            case_id,
            format!(
                "time span must be ordered, got [{}, {}]",
                deck.time_min, deck.time_max
            ),
        ));
    }

    Ok(())
}

fn parse_f64(case_id: &str, line: usize, key: &str, token: &str) -> PostResult<f64> {
    token.parse::<f64>().map_err(|_| {
        deck_error(
            case_id,
            format!("line {line}: value '{token}' for key '{key}' is not numeric"),
        )
    })
}

fn parse_usize(case_id: &str, line: usize, key: &str, token: &str) -> PostResult<usize> {
    token.parse::<usize>().map_err(|_| {
        deck_error(
            case_id,
            format!("line {line}: value '{token}' for key '{key}' is not a non-negative integer"),
        )
    })
}

fn deck_error(case_id: &str, message: impl Into<String>) -> PostError {
    PostError::input_validation(
        "INPUT.BEAM_DECK",
        format!("case '{}': {}", case_id, message.into()),
    )
}

pub(super) fn artifact_list(paths: &[&str]) -> Vec<OutputArtifact> {
    paths.iter().copied().map(OutputArtifact::new).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_beam_deck, BeamDeckInput};

    #[test]
    fn empty_deck_yields_reference_defaults() {
        let deck = parse_beam_deck("CASE-BEAM-001", "# defaults only\n")
            .expect("empty deck should parse");
        assert_eq!(deck, BeamDeckInput::default());
        assert_eq!(deck.series_terms, 19);
        assert_eq!(deck.impact_speed, 300.0);
    }

    #[test]
    fn deck_overrides_selected_keys() {
        let source = "\
length 12.5\n\
series_terms 4\n\
position_samples 40\n\
sweep_steps 0\n";
        let deck = parse_beam_deck("CASE-BEAM-001", source).expect("deck should parse");
        assert_eq!(deck.length, 12.5);
        assert_eq!(deck.series_terms, 4);
        assert_eq!(deck.position_samples, 40);
        assert_eq!(deck.sweep_steps, 0);
        assert_eq!(deck.time_samples, BeamDeckInput::default().time_samples);
    }

    #[test]
    fn unknown_key_is_rejected_with_line_number() {
        let error = parse_beam_deck("CASE-BEAM-001", "length 10.0\nwobble 3\n")
            .expect_err("unknown key should fail");
        assert_eq!(error.code(), "INPUT.BEAM_DECK");
        assert!(error.message().contains("line 2"));
        assert!(error.message().contains("wobble"));
    }

    #[test]
    fn missing_value_and_trailing_tokens_are_rejected() {
        let error =
            parse_beam_deck("CASE-BEAM-001", "length\n").expect_err("missing value should fail");
        assert!(error.message().contains("no value"));

        let error = parse_beam_deck("CASE-BEAM-001", "length 10.0 extra\n")
            .expect_err("trailing tokens should fail");
        assert!(error.message().contains("trailing"));
    }

    #[test]
    fn non_positive_physical_parameters_are_rejected() {
        let error = parse_beam_deck("CASE-BEAM-001", "density 0\n")
            .expect_err("zero density should fail");
        assert!(error.message().contains("density"));

        let error = parse_beam_deck("CASE-BEAM-001", "series_terms 0\n")
            .expect_err("zero terms should fail");
        assert!(error.message().contains("series_terms"));
    }

    #[test]
    fn degenerate_spans_are_rejected() {
        let error = parse_beam_deck("CASE-BEAM-001", "time_min 60.0\n")
            .expect_err("collapsed time span should fail");
        assert!(error.message().contains("time span"));
    }
}
