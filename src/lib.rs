//! Fixed-size radix-2 spectrum analysis with top-N peak tracking.
//!
//! [`SpectrumAnalyzer`] is the core; `audio`, `report` and `config` wrap it
//! into the `peakscope` command-line tool.

pub mod analyzer;
pub mod audio;
pub mod config;
pub mod error;
pub mod report;

pub use analyzer::{Peak, SpectrumAnalyzer, NO_BIN};
pub use error::AnalyzerError;
