use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModalError {
    #[error("modal basis requires at least one eigenvalue")]
    EmptyBasis,
    #[error("beam length must be finite and > 0, got {value}")]
    InvalidLength { value: f64 },
    #[error("stiffness ratio must be finite and > 0, got {value}")]
    InvalidStiffnessRatio { value: f64 },
    #[error("eigenvalue at index {index} must be finite and > 0, got {value}")]
    InvalidEigenvalue { index: usize, value: f64 },
    #[error("series truncation of {requested} terms exceeds the {available} available modes")]
    TruncationTooLong { requested: usize, available: usize },
}

/// Clamped-free frequency equation whose positive roots are the spatial
/// eigenvalues `beta_n * L`.
pub fn frequency_equation(x: f64) -> f64 {
    x.cos() * x.cosh() + 1.0
}

/// Shape coefficient `alpha` tying the odd and even parts of a mode together.
pub fn shape_coefficient(beta: f64, length: f64) -> f64 {
    let argument = beta * length;
    (argument.sin() + argument.sinh()) / (argument.cos() + argument.cosh())
}

pub fn mode_shape(beta: f64, alpha: f64, x: f64) -> f64 {
    let argument = beta * x;
    argument.sin() - argument.sinh() - alpha * (argument.cos() - argument.cosh())
}

/// Truncated modal expansion of the clamped-free beam deflection.
///
/// Terms are summed strictly in ascending mode order, so extending the
/// truncation by one term changes the result by exactly that term.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalBasis {
    betas: Vec<f64>,
    length: f64,
    stiffness_ratio: f64,
}

impl ModalBasis {
    /// `betas` are the spatial eigenvalues (already divided by the beam
    /// length); `stiffness_ratio` is `EI / (rho * A)`.
    pub fn new(betas: Vec<f64>, length: f64, stiffness_ratio: f64) -> Result<Self, ModalError> {
        if betas.is_empty() {
            return Err(ModalError::EmptyBasis);
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(ModalError::InvalidLength { value: length });
        }
        if !stiffness_ratio.is_finite() || stiffness_ratio <= 0.0 {
            return Err(ModalError::InvalidStiffnessRatio {
                value: stiffness_ratio,
            });
        }
        for (index, beta) in betas.iter().copied().enumerate() {
            if !beta.is_finite() || beta <= 0.0 {
                return Err(ModalError::InvalidEigenvalue { index, value: beta });
            }
        }

        Ok(Self {
            betas,
            length,
            stiffness_ratio,
        })
    }

    pub fn mode_count(&self) -> usize {
        self.betas.len()
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.betas
    }

    pub fn angular_frequency(&self, mode: usize) -> f64 {
        let beta = self.betas[mode];
        beta * beta * self.stiffness_ratio.sqrt()
    }

    pub fn term(&self, mode: usize, x: f64, t: f64) -> f64 {
        let beta = self.betas[mode];
        let alpha = shape_coefficient(beta, self.length);
        (self.angular_frequency(mode) * t).sin() * mode_shape(beta, alpha, x)
    }

    /// Validate the truncation once and get an infallible pointwise evaluator.
    pub fn truncate(&self, num_terms: usize) -> Result<TruncatedSeries<'_>, ModalError> {
        if num_terms > self.betas.len() {
            return Err(ModalError::TruncationTooLong {
                requested: num_terms,
                available: self.betas.len(),
            });
        }
        Ok(TruncatedSeries {
            basis: self,
            num_terms,
        })
    }

    pub fn evaluate(&self, x: f64, t: f64, num_terms: usize) -> Result<f64, ModalError> {
        Ok(self.truncate(num_terms)?.value(x, t))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TruncatedSeries<'a> {
    basis: &'a ModalBasis,
    num_terms: usize,
}

impl TruncatedSeries<'_> {
    pub fn value(&self, x: f64, t: f64) -> f64 {
        let mut result = 0.0;
        for mode in 0..self.num_terms {
            result += self.basis.term(mode, x, t);
        }
        result
    }
}
