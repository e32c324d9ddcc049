use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("table has no data rows")]
    Empty,
    #[error("line {line}: expected {expected} columns, found {actual}")]
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: token '{token}' is not numeric")]
    NonNumericToken { line: usize, token: String },
    #[error("line {line}, column {column}: value must be finite, got {value}")]
    NonFiniteValue {
        line: usize,
        column: usize,
        value: f64,
    },
    #[error("column index {index} out of range for table with {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },
}

/// Whitespace-delimited numeric table, fully materialized.
///
/// Empty lines and lines starting with `#` are skipped. Every retained row
/// must carry exactly the expected column count.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceTable {
    columns: usize,
    values: Vec<f64>,
}

impl ForceTable {
    pub fn parse(source: &str, expected_columns: usize) -> Result<Self, TableError> {
        let mut values = Vec::new();

        for (line_index, line) in source.lines().enumerate() {
            let line_number = line_index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens = trimmed.split_whitespace().collect::<Vec<_>>();
            if tokens.len() != expected_columns {
                return Err(TableError::RaggedRow {
                    line: line_number,
                    expected: expected_columns,
                    actual: tokens.len(),
                });
            }

            for (column, token) in tokens.iter().enumerate() {
                let value = parse_numeric_token(token).ok_or_else(|| {
                    TableError::NonNumericToken {
                        line: line_number,
                        token: (*token).to_string(),
                    }
                })?;
                if !value.is_finite() {
                    return Err(TableError::NonFiniteValue {
                        line: line_number,
                        column,
                        value,
                    });
                }
                values.push(value);
            }
        }

        if values.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self {
            columns: expected_columns,
            values,
        })
    }

    pub fn row_count(&self) -> usize {
        self.values.len() / self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns + column]
    }

    pub fn column(&self, index: usize) -> Result<Vec<f64>, TableError> {
        self.check_column(index)?;
        Ok(self
            .values
            .iter()
            .copied()
            .skip(index)
            .step_by(self.columns)
            .collect())
    }

    pub fn column_mean(&self, index: usize) -> Result<f64, TableError> {
        self.check_column(index)?;
        let sum: f64 = self
            .values
            .iter()
            .copied()
            .skip(index)
            .step_by(self.columns)
            .sum();
        Ok(sum / self.row_count() as f64)
    }

    fn check_column(&self, index: usize) -> Result<(), TableError> {
        if index >= self.columns {
            return Err(TableError::ColumnOutOfRange {
                index,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    // Fortran-era outputs write exponents as 1.0D0; normalize before parsing.
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{ForceTable, TableError};

    #[test]
    fn parses_columns_and_skips_comments() {
        let source = "# time fx fy\n0.0 1.0 2.0\n\n1.0 3.0 4.0\n";
        let table = ForceTable::parse(source, 3).expect("table should parse");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column(0).expect("time column"), vec![0.0, 1.0]);
        assert_eq!(table.column(2).expect("fy column"), vec![2.0, 4.0]);
    }

    #[test]
    fn constant_column_mean_is_exact() {
        let source = "0 3.0\n1 3.0\n2 3.0\n";
        let table = ForceTable::parse(source, 2).expect("table should parse");
        assert_eq!(table.column_mean(1).expect("mean"), 3.0);
    }

    #[test]
    fn column_mean_is_order_independent() {
        let forward = ForceTable::parse("0 1.5\n1 -2.5\n2 4.0\n", 2).expect("table");
        let shuffled = ForceTable::parse("2 4.0\n0 1.5\n1 -2.5\n", 2).expect("table");
        assert_eq!(
            forward.column_mean(1).expect("mean"),
            shuffled.column_mean(1).expect("mean")
        );
    }

    #[test]
    fn fortran_exponent_tokens_are_accepted() {
        let table = ForceTable::parse("0.0 1.5D2\n", 2).expect("table should parse");
        assert_eq!(table.value(0, 1), 150.0);
    }

    #[test]
    fn ragged_row_is_rejected_with_line_number() {
        let error = ForceTable::parse("0.0 1.0 2.0\n1.0 3.0\n", 3)
            .expect_err("ragged row should fail");
        assert_eq!(
            error,
            TableError::RaggedRow {
                line: 2,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn non_numeric_and_non_finite_tokens_are_rejected() {
        let error =
            ForceTable::parse("0.0 abc\n", 2).expect_err("non-numeric token should fail");
        assert_eq!(
            error,
            TableError::NonNumericToken {
                line: 1,
                token: "abc".to_string(),
            }
        );

        let error = ForceTable::parse("0.0 inf\n", 2).expect_err("infinite value should fail");
        match error {
            TableError::NonFiniteValue { line, column, value } => {
                assert_eq!((line, column), (1, 1));
                assert!(value.is_infinite());
            }
            other => panic!("expected NonFiniteValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_source_is_rejected() {
        let error = ForceTable::parse("# only comments\n\n", 2)
            .expect_err("comment-only source should fail");
        assert_eq!(error, TableError::Empty);
    }

    #[test]
    fn column_index_is_bounds_checked() {
        let table = ForceTable::parse("0.0 1.0\n", 2).expect("table should parse");
        let error = table.column_mean(2).expect_err("out of range column");
        assert_eq!(
            error,
            TableError::ColumnOutOfRange {
                index: 2,
                columns: 2,
            }
        );
    }
}
