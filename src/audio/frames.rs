use indicatif::ProgressBar;
use rayon::prelude::*;

use super::decode::AudioData;
use crate::analyzer::SpectrumAnalyzer;
use crate::error::AnalyzerError;
use crate::report::FrameReport;

/// Number of complete `sample_count`-sized frames in `audio`.
pub fn frame_count(audio: &AudioData, sample_count: usize) -> usize {
    let len = match &audio.quadrature {
        Some(q) => audio.samples.len().min(q.len()),
        None => audio.samples.len(),
    };
    len / sample_count
}

/// Runs the analyzer over consecutive, non-overlapping frames of `audio`.
///
/// A trailing partial frame is dropped. Each rayon worker owns its own clone
/// of the analyzer, so no instance is shared between threads. Results come
/// back in frame order.
pub fn analyze_frames(
    audio: &AudioData,
    sample_count: usize,
    top_n: usize,
    progress: &ProgressBar,
) -> Result<Vec<FrameReport>, AnalyzerError> {
    let prototype = SpectrumAnalyzer::new(audio.sample_rate as f64, sample_count, top_n)?;
    let frames = frame_count(audio, sample_count);
    let sample_rate = audio.sample_rate as f64;

    log::info!(
        "Analyzing {} frames of {} samples ({:.1} ms each)",
        frames,
        sample_count,
        sample_count as f64 * 1000.0 / sample_rate
    );

    (0..frames)
        .into_par_iter()
        .map_init(
            || (prototype.clone(), vec![0.0f64; sample_count], vec![0.0f64; sample_count]),
            |(analyzer, real, imag), frame_idx| -> Result<FrameReport, AnalyzerError> {
                let start = frame_idx * sample_count;
                let end = start + sample_count;
                widen(&audio.samples[start..end], real);

                match &audio.quadrature {
                    Some(q) => {
                        widen(&q[start..end], imag);
                        analyzer.calculate_complex(real, imag)?;
                    }
                    None => analyzer.calculate(real)?,
                }
                progress.inc(1);

                Ok(FrameReport {
                    index: frame_idx,
                    time: start as f64 / sample_rate,
                    peaks: analyzer.peaks().collect(),
                })
            },
        )
        .collect()
}

fn widen(src: &[f32], dst: &mut [f64]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s as f64;
    }
}
