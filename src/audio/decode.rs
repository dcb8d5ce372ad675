use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// How decoded channels are mapped onto the analyzer's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Average all channels into one real signal.
    Mono,
    /// Left channel is in-phase (real), right channel is quadrature (imaginary).
    Iq,
}

pub struct AudioData {
    pub samples: Vec<f32>,
    /// Present only in [`ChannelMode::Iq`].
    pub quadrature: Option<Vec<f32>>,
    pub sample_rate: u32,
}

pub fn decode_audio(path: &Path, mode: ChannelMode) -> Result<AudioData> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe audio format")?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .context("No audio tracks found")?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track.codec_params.sample_rate.context("Unknown sample rate")?;

    if mode == ChannelMode::Iq && channels != 2 {
        anyhow::bail!(
            "IQ analysis needs a two-channel file, {} has {}",
            path.display(),
            channels
        );
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let mut in_phase: Vec<f32> = Vec::new();
    let mut quadrature: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(err)) => {
                log::debug!("Skipping undecodable packet: {}", err);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        split_channels(sample_buf.samples(), channels, mode, &mut in_phase, &mut quadrature);
    }

    log::info!(
        "Decoded audio: {} samples, {}Hz, {:.1}s, {:?}",
        in_phase.len(),
        sample_rate,
        in_phase.len() as f32 / sample_rate as f32,
        mode
    );

    Ok(AudioData {
        samples: in_phase,
        quadrature: match mode {
            ChannelMode::Mono => None,
            ChannelMode::Iq => Some(quadrature),
        },
        sample_rate,
    })
}

/// Appends interleaved `samples` to the output signals according to `mode`.
fn split_channels(
    samples: &[f32],
    channels: usize,
    mode: ChannelMode,
    in_phase: &mut Vec<f32>,
    quadrature: &mut Vec<f32>,
) {
    match mode {
        ChannelMode::Mono if channels == 1 => in_phase.extend_from_slice(samples),
        ChannelMode::Mono => {
            for frame in samples.chunks(channels) {
                in_phase.push(frame.iter().sum::<f32>() / channels as f32);
            }
        }
        ChannelMode::Iq => {
            for frame in samples.chunks_exact(2) {
                in_phase.push(frame[0]);
                quadrature.push(frame[1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_downmixes_interleaved_frames() {
        let mut i = Vec::new();
        let mut q = Vec::new();
        split_channels(&[1.0, 3.0, -2.0, 0.0], 2, ChannelMode::Mono, &mut i, &mut q);
        assert_eq!(i, vec![2.0, -1.0]);
        assert!(q.is_empty());
    }

    #[test]
    fn mono_passes_single_channel_through() {
        let mut i = vec![0.5];
        let mut q = Vec::new();
        split_channels(&[1.0, 2.0], 1, ChannelMode::Mono, &mut i, &mut q);
        assert_eq!(i, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn iq_separates_left_and_right() {
        let mut i = Vec::new();
        let mut q = Vec::new();
        split_channels(&[1.0, -1.0, 0.5, -0.5], 2, ChannelMode::Iq, &mut i, &mut q);
        assert_eq!(i, vec![1.0, 0.5]);
        assert_eq!(q, vec![-1.0, -0.5]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = decode_audio(Path::new("does/not/exist.wav"), ChannelMode::Mono)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to open audio file"));
    }
}
