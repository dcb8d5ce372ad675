mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use peakscope::audio::decode::{self, ChannelMode};
use peakscope::audio::frames;
use peakscope::config;
use peakscope::report::{AnalysisReport, OutputFormat};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    if let Some(path) = config::find_config(cli.config.clone()) {
        if let Some(cfg) = config::load_config(&path) {
            log::info!("Loaded config from {}", path.display());
            // Config values apply only when the CLI flag is at its default
            if cli.sample_count == config::default_sample_count() {
                cli.sample_count = cfg.analyzer.sample_count;
            }
            if cli.top_n == config::default_top_n() {
                cli.top_n = cfg.analyzer.top_n;
            }
            if cli.format == OutputFormat::Text {
                cli.format = cfg.output.format;
            }
            if !cli.pretty {
                cli.pretty = cfg.output.pretty;
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("peakscope - FFT spectrum peak analyzer");
    log::info!("Input: {}", cli.input.display());
    log::info!("Transform: {} samples, top {} peaks", cli.sample_count, cli.top_n);

    let mode = if cli.iq { ChannelMode::Iq } else { ChannelMode::Mono };
    let audio = decode::decode_audio(&cli.input, mode)?;

    let total_frames = frames::frame_count(&audio, cli.sample_count.max(1));
    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let frame_reports = frames::analyze_frames(&audio, cli.sample_count, cli.top_n, &pb)
        .context("Spectrum analysis failed")?;
    pb.finish_and_clear();

    if frame_reports.is_empty() {
        log::warn!(
            "Input is shorter than one {}-sample frame; nothing to analyze",
            cli.sample_count
        );
    }

    let report = AnalysisReport {
        sample_rate: audio.sample_rate,
        sample_count: cli.sample_count,
        top_n: cli.top_n,
        frames: frame_reports,
    };

    if let Some((frame, peak)) = report.strongest() {
        log::info!(
            "Strongest peak: {:.1} Hz (bin {}) magnitude {:.6} at {:.3}s",
            peak.frequency,
            peak.bin,
            peak.magnitude,
            frame.time
        );
    }

    let rendered = report.render(cli.format, cli.pretty)?;
    match cli.output {
        Some(ref path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            log::info!("Done! Output: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
