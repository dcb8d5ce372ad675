use thiserror::Error;

/// Contract violations reported by [`crate::SpectrumAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("sample count {sample_count} is not a power of two >= 4")]
    InvalidSampleCount { sample_count: usize },

    #[error("top-n must be at least 1, got {top_n}")]
    InvalidTopN { top_n: usize },

    #[error("input length {actual} does not match sample count {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },
}
