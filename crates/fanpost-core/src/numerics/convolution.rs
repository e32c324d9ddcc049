use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvolutionError {
    #[error("convolution operands cannot be empty")]
    EmptyOperand,
    #[error("kernel length {kernel} exceeds signal length {signal}")]
    KernelLongerThanSignal { kernel: usize, signal: usize },
    #[error("signal value at index {index} must be finite, got {value}")]
    NonFiniteSignal { index: usize, value: f64 },
    #[error("kernel value at index {index} must be finite, got {value}")]
    NonFiniteKernel { index: usize, value: f64 },
}

/// Discrete linear convolution trimmed to the signal length.
///
/// Centering matches NumPy/SciPy `mode='same'`: for a kernel of length `m`
/// the output is `full[(m - 1) / 2 ..][..n]`.
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Result<Vec<f64>, ConvolutionError> {
    if signal.is_empty() || kernel.is_empty() {
        return Err(ConvolutionError::EmptyOperand);
    }
    if kernel.len() > signal.len() {
        return Err(ConvolutionError::KernelLongerThanSignal {
            kernel: kernel.len(),
            signal: signal.len(),
        });
    }
    for (index, value) in signal.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(ConvolutionError::NonFiniteSignal { index, value });
        }
    }
    for (index, value) in kernel.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(ConvolutionError::NonFiniteKernel { index, value });
        }
    }

    let signal_len = signal.len();
    let kernel_len = kernel.len();
    let offset = (kernel_len - 1) / 2;

    let mut output = vec![0.0; signal_len];
    for (out_index, slot) in output.iter_mut().enumerate() {
        let full_index = out_index + offset;
        let first = full_index.saturating_sub(kernel_len - 1);
        let last = full_index.min(signal_len - 1);

        let mut accumulated = 0.0;
        for signal_index in first..=last {
            accumulated += signal[signal_index] * kernel[full_index - signal_index];
        }
        *slot = accumulated;
    }

    Ok(output)
}
