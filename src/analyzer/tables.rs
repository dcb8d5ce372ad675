use std::f64::consts::PI;

use crate::error::AnalyzerError;

/// Everything that depends only on the transform size, built once.
#[derive(Debug, Clone)]
pub(crate) struct Tables {
    /// log2 of the sample count.
    pub power: u32,
    /// sin(2*pi*i/N) for i in [0, N).
    pub sines: Vec<f64>,
    /// Bit-reversal permutation of [0, N).
    pub permute: Vec<usize>,
    /// Half-bin-centered frequency label for each of the N/2 output bins.
    pub freq: Vec<f64>,
}

impl Tables {
    pub fn build(sample_rate: f64, sample_count: usize) -> Result<Self, AnalyzerError> {
        let power = power_of_two(sample_count)?;
        Ok(Self {
            power,
            sines: sine_table(sample_count),
            permute: permutation_table(power),
            freq: frequency_table(sample_rate, sample_count),
        })
    }
}

/// Returns log2(n), or `InvalidSampleCount` unless `n` is a power of two.
///
/// The butterfly reads cosines from the sine table a quarter period ahead,
/// which needs N/4 to be a whole index, so 1 and 2 are rejected as well.
pub(crate) fn power_of_two(sample_count: usize) -> Result<u32, AnalyzerError> {
    if sample_count < 4 || !sample_count.is_power_of_two() {
        return Err(AnalyzerError::InvalidSampleCount { sample_count });
    }
    Ok(sample_count.trailing_zeros())
}

pub(crate) fn sine_table(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (i as f64 * (2.0 * PI) / n as f64).sin())
        .collect()
}

/// Reverses the low `power` bits of every index in [0, 2^power).
pub(crate) fn permutation_table(power: u32) -> Vec<usize> {
    (0..1usize << power)
        .map(|index| {
            let mut result = 0;
            for bit in 0..power {
                if index & (1 << bit) != 0 {
                    result |= 1 << (power - 1 - bit);
                }
            }
            result
        })
        .collect()
}

pub(crate) fn frequency_table(sample_rate: f64, n: usize) -> Vec<f64> {
    let half = n / 2;
    (0..half)
        .map(|i| (sample_rate * i as f64 + half as f64) / n as f64)
        .collect()
}
