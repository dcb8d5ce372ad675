//! Fixed-size, power-of-two spectrum analyzer.
//!
//! All tables are derived once from `(sample_rate, sample_count, top_n)`.
//! Every call to [`SpectrumAnalyzer::calculate`] or
//! [`SpectrumAnalyzer::calculate_complex`] overwrites the working buffers,
//! the magnitude spectrum and the peak list in place, so one instance must
//! have a single owner at a time.

mod peaks;
mod tables;
mod transform;

use serde::Serialize;

use crate::error::AnalyzerError;
use peaks::PeakTracker;
use tables::Tables;

pub use peaks::NO_BIN;

/// One tracked peak resolved against the frequency labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub bin: usize,
    pub frequency: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    sample_rate: f64,
    sample_count: usize,
    tables: Tables,
    real: Vec<f64>,
    imag: Vec<f64>,
    spectrum: Vec<f64>,
    peaks: PeakTracker,
}

impl SpectrumAnalyzer {
    /// Builds the lookup tables and output storage for `sample_count`-point transforms.
    ///
    /// Fails with [`AnalyzerError::InvalidSampleCount`] unless `sample_count` is a
    /// power of two of at least 4, and with [`AnalyzerError::InvalidTopN`] when
    /// `top_n` is zero.
    pub fn new(sample_rate: f64, sample_count: usize, top_n: usize) -> Result<Self, AnalyzerError> {
        let tables = Tables::build(sample_rate, sample_count)?;
        if top_n < 1 {
            return Err(AnalyzerError::InvalidTopN { top_n });
        }

        log::debug!(
            "spectrum analyzer: n={} power={} top_n={} rate={}",
            sample_count,
            tables.power,
            top_n,
            sample_rate
        );

        Ok(Self {
            sample_rate,
            sample_count,
            tables,
            real: vec![0.0; sample_count],
            imag: vec![0.0; sample_count],
            spectrum: vec![0.0; sample_count / 2],
            peaks: PeakTracker::new(top_n),
        })
    }

    /// Transforms a real-only signal; the imaginary part is taken as zero.
    pub fn calculate(&mut self, real: &[f64]) -> Result<(), AnalyzerError> {
        self.check_len(real)?;
        transform::load_real(&mut self.real, &mut self.imag, real);
        self.run();
        Ok(())
    }

    /// Transforms a complex signal given as separate in-phase and quadrature arrays.
    pub fn calculate_complex(&mut self, real: &[f64], imag: &[f64]) -> Result<(), AnalyzerError> {
        self.check_len(real)?;
        self.check_len(imag)?;
        transform::load_complex(&mut self.real, &mut self.imag, real, imag);
        self.run();
        Ok(())
    }

    fn check_len(&self, input: &[f64]) -> Result<(), AnalyzerError> {
        if input.len() != self.sample_count {
            return Err(AnalyzerError::InputLengthMismatch {
                expected: self.sample_count,
                actual: input.len(),
            });
        }
        Ok(())
    }

    fn run(&mut self) {
        transform::run(&self.tables, &mut self.real, &mut self.imag, &mut self.spectrum);
        self.peaks.scan(&self.spectrum);
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn top_n(&self) -> usize {
        self.peaks.max().len()
    }

    /// Magnitude per output bin, `sample_count / 2` entries.
    pub fn spectrum(&self) -> &[f64] {
        &self.spectrum
    }

    /// Frequency label per output bin, parallel to [`Self::spectrum`].
    pub fn frequencies(&self) -> &[f64] {
        &self.tables.freq
    }

    /// Magnitudes of the tracked peaks, non-increasing, `top_n` entries.
    pub fn peak_magnitudes(&self) -> &[f64] {
        self.peaks.max()
    }

    /// Bin indices of the tracked peaks; unclaimed slots hold [`NO_BIN`].
    pub fn peak_bins(&self) -> &[usize] {
        self.peaks.index()
    }

    /// Claimed peak slots resolved to frequencies, strongest first.
    pub fn peaks(&self) -> impl Iterator<Item = Peak> + '_ {
        self.peaks
            .index()
            .iter()
            .zip(self.peaks.max())
            .filter(|&(&bin, _)| bin != NO_BIN)
            .map(|(&bin, &magnitude)| Peak {
                bin,
                frequency: self.tables.freq[bin],
                magnitude,
            })
    }
}
