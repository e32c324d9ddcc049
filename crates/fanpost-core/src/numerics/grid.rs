use faer::Mat;
use thiserror::Error;

/// Dense field storage: rows index time samples, columns index positions.
pub type FieldMatrix = Mat<f64>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("linspace requires at least 2 samples, got {count}")]
    TooFewSamples { count: usize },
    #[error("linspace bounds must be finite, got [{start}, {stop}]")]
    NonFiniteBounds { start: f64, stop: f64 },
    #[error("linspace bounds must be strictly ordered, got [{start}, {stop}]")]
    UnorderedBounds { start: f64, stop: f64 },
}

/// Evenly spaced samples with inclusive endpoints.
pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, GridError> {
    if count < 2 {
        return Err(GridError::TooFewSamples { count });
    }
    if !start.is_finite() || !stop.is_finite() {
        return Err(GridError::NonFiniteBounds { start, stop });
    }
    if start >= stop {
        return Err(GridError::UnorderedBounds { start, stop });
    }

    let step = (stop - start) / (count - 1) as f64;
    let samples = (0..count)
        .map(|index| {
            if index == count - 1 {
                stop
            } else {
                start + step * index as f64
            }
        })
        .collect();
    Ok(samples)
}

/// Outer product of a position vector and a time vector, evaluated pointwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceTimeGrid {
    positions: Vec<f64>,
    times: Vec<f64>,
}

impl SpaceTimeGrid {
    pub fn new(positions: Vec<f64>, times: Vec<f64>) -> Self {
        Self { positions, times }
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn evaluate(&self, f: impl Fn(f64, f64) -> f64) -> FieldMatrix {
        let mut field = FieldMatrix::zeros(self.times.len(), self.positions.len());
        for (row, &t) in self.times.iter().enumerate() {
            for (col, &x) in self.positions.iter().enumerate() {
                field[(row, col)] = f(x, t);
            }
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::{linspace, GridError, SpaceTimeGrid};

    #[test]
    fn linspace_includes_both_endpoints() {
        let samples = linspace(0.0, 10.0, 5).expect("linspace should build");
        assert_eq!(samples, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(*samples.last().expect("non-empty"), 10.0);
    }

    #[test]
    fn linspace_rejects_bad_inputs() {
        assert_eq!(
            linspace(0.0, 1.0, 1).expect_err("single sample"),
            GridError::TooFewSamples { count: 1 }
        );
        assert_eq!(
            linspace(1.0, 1.0, 4).expect_err("degenerate span"),
            GridError::UnorderedBounds {
                start: 1.0,
                stop: 1.0,
            }
        );
        assert!(matches!(
            linspace(0.0, f64::INFINITY, 4).expect_err("infinite bound"),
            GridError::NonFiniteBounds { .. }
        ));
    }

    #[test]
    fn grid_evaluation_orients_rows_as_time() {
        let grid = SpaceTimeGrid::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0]);
        let field = grid.evaluate(|x, t| t + x);

        assert_eq!(field.nrows(), 2);
        assert_eq!(field.ncols(), 3);
        assert_eq!(field[(0, 0)], 10.0);
        assert_eq!(field[(0, 2)], 12.0);
        assert_eq!(field[(1, 1)], 21.0);
    }
}
