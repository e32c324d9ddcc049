use std::fs;
use std::path::Path;

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Scientific notation keeps full round-trip precision in array artifacts.
pub fn format_scientific_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$e}", precision = precision)
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// One value per line; the axis-artifact format.
pub fn render_numeric_column(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format_scientific_f64(*value, 17))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row of space-separated values per line; the field-artifact format
/// (lines follow the matrix row order).
pub fn render_numeric_matrix(
    rows: usize,
    cols: usize,
    value_at: impl Fn(usize, usize) -> f64,
) -> String {
    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            if col > 0 {
                line.push(' ');
            }
            line.push_str(&format_scientific_f64(value_at(row, col), 17));
        }
        lines.push(line);
    }
    lines.join("\n")
}
