use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::analyzer::Peak;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

/// Peaks found in one analysis frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub index: usize,
    /// Start of the frame in seconds.
    pub time: f64,
    pub peaks: Vec<Peak>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sample_rate: u32,
    pub sample_count: usize,
    pub top_n: usize,
    pub frames: Vec<FrameReport>,
}

impl AnalysisReport {
    pub fn render(&self, format: OutputFormat, pretty: bool) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = write!(out, "{:>10.4}s", frame.time);
            for peak in &frame.peaks {
                let _ = write!(out, "  {:.1}Hz:{:.6}", peak.frequency, peak.magnitude);
            }
            out.push('\n');
        }
        out
    }

    /// The single strongest peak across all frames, if any frame had one.
    pub fn strongest(&self) -> Option<(&FrameReport, &Peak)> {
        self.frames
            .iter()
            .filter_map(|f| f.peaks.first().map(|p| (f, p)))
            .max_by(|a, b| a.1.magnitude.total_cmp(&b.1.magnitude))
    }
}
