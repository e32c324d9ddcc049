use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSweepOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_iterations: usize,
    pub dedup_tol: f64,
}

impl Default for RootSweepOptions {
    fn default() -> Self {
        Self {
            abs_tol: 2.0e-12,
            rel_tol: 4.0 * f64::EPSILON,
            max_iterations: 100,
            dedup_tol: 1.0e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    #[error("absolute tolerance must be finite and > 0, got {value}")]
    InvalidAbsTolerance { value: f64 },
    #[error("relative tolerance must be finite and >= 0, got {value}")]
    InvalidRelTolerance { value: f64 },
    #[error("dedup tolerance must be finite and >= 0, got {value}")]
    InvalidDedupTolerance { value: f64 },
    #[error("iteration budget must be > 0")]
    ZeroIterationBudget,
    #[error("bracket endpoints must be finite and strictly ordered, got [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },
}

/// Brent's method over one bracket.
///
/// Returns `Ok(None)` when the bracket carries no sign change, the function
/// goes non-finite inside it, or the iteration budget runs out; callers that
/// sweep a bracket ladder treat all three as "no root here" and move on.
pub fn brent_root(
    f: impl Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    options: RootSweepOptions,
) -> Result<Option<f64>, RootError> {
    validate_options(options)?;
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(RootError::InvalidBracket { lower, upper });
    }

    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a);
    let mut fb = f(b);
    if !fa.is_finite() || !fb.is_finite() {
        return Ok(None);
    }
    if fa == 0.0 {
        return Ok(Some(a));
    }
    if fb == 0.0 {
        return Ok(Some(b));
    }
    if fa.signum() == fb.signum() {
        return Ok(None);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..options.max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 0.5 * (options.abs_tol + options.rel_tol * b.abs());
        let midpoint_offset = 0.5 * (c - b);
        if midpoint_offset.abs() <= tol || fb == 0.0 {
            return Ok(Some(b));
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, secant when only two points differ.
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * midpoint_offset * s, 1.0 - s)
            } else {
                let inv_q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * midpoint_offset * inv_q * (inv_q - r) - (b - a) * (r - 1.0)),
                    (inv_q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let accept_interpolation = 2.0 * p
                < (3.0 * midpoint_offset * q - (tol * q).abs())
                    .min((e * q).abs());
            if accept_interpolation {
                e = d;
                d = p / q;
            } else {
                d = midpoint_offset;
                e = d;
            }
        } else {
            d = midpoint_offset;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol {
            b += d;
        } else {
            b += tol.copysign(midpoint_offset);
        }
        fb = f(b);
        if !fb.is_finite() {
            return Ok(None);
        }
    }

    Ok(None)
}

/// Sweep a ladder of brackets and collect deduplicated roots in bracket order.
///
/// Brackets without a converged root contribute nothing; a converged root
/// within `dedup_tol` of an already accepted one is discarded.
pub fn sweep_brackets(
    f: impl Fn(f64) -> f64,
    brackets: &[(f64, f64)],
    options: RootSweepOptions,
) -> Result<Vec<f64>, RootError> {
    validate_options(options)?;

    let mut roots: Vec<f64> = Vec::new();
    for &(lower, upper) in brackets {
        let Some(root) = brent_root(&f, lower, upper, options)? else {
            continue;
        };
        let duplicate = roots
            .iter()
            .any(|accepted| (root - accepted).abs() <= options.dedup_tol);
        if !duplicate {
            roots.push(root);
        }
    }
    Ok(roots)
}

fn validate_options(options: RootSweepOptions) -> Result<(), RootError> {
    if !options.abs_tol.is_finite() || options.abs_tol <= 0.0 {
        return Err(RootError::InvalidAbsTolerance {
            value: options.abs_tol,
        });
    }
    if !options.rel_tol.is_finite() || options.rel_tol < 0.0 {
        return Err(RootError::InvalidRelTolerance {
            value: options.rel_tol,
        });
    }
    if !options.dedup_tol.is_finite() || options.dedup_tol < 0.0 {
        return Err(RootError::InvalidDedupTolerance {
            value: options.dedup_tol,
        });
    }
    if options.max_iterations == 0 {
        return Err(RootError::ZeroIterationBudget);
    }
    Ok(())
}
