//! Audio materialization
//!
//! The remote service only accepts file uploads, so every audio shape is
//! reduced to a path first: pre-existing files pass through untouched,
//! in-memory PCM buffers are encoded to a mono WAV in a uniquely named
//! temporary file, and raw upload bytes are spooled to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SttError};

/// Numeric element type of a raw PCM buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// Signed 16-bit integer samples
    I16,
    /// 32-bit float samples
    #[default]
    F32,
}

impl std::str::FromStr for SampleFormat {
    type Err = SttError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "i16" => Ok(Self::I16),
            "f32" => Ok(Self::F32),
            other => Err(SttError::InvalidAudioInput(format!(
                "unknown sample format `{other}` (expected i16 or f32)"
            ))),
        }
    }
}

/// Ordered mono PCM sample buffer
///
/// The WAV sample width is derived from the variant, mirroring how the
/// element size of the incoming buffer determines the encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    I16(Vec<i16>),
    F32(Vec<f32>),
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        match self {
            Self::I16(samples) => samples.len(),
            Self::F32(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn bits_per_sample(&self) -> u16 {
        match self {
            Self::I16(_) => 16,
            Self::F32(_) => 32,
        }
    }

    pub const fn wav_format(&self) -> hound::SampleFormat {
        match self {
            Self::I16(_) => hound::SampleFormat::Int,
            Self::F32(_) => hound::SampleFormat::Float,
        }
    }

    /// Decode a little-endian byte buffer into samples
    ///
    /// # Errors
    ///
    /// Returns `InvalidAudioInput` if the byte length is not a multiple of
    /// the sample width
    pub fn from_le_bytes(bytes: &[u8], format: SampleFormat) -> Result<Self> {
        let width = match format {
            SampleFormat::I16 => 2,
            SampleFormat::F32 => 4,
        };

        if bytes.len() % width != 0 {
            return Err(SttError::InvalidAudioInput(format!(
                "sample buffer of {} bytes is not a multiple of the {width}-byte sample width",
                bytes.len()
            )));
        }

        let buffer = match format {
            SampleFormat::I16 => Self::I16(
                bytes
                    .chunks_exact(2)
                    .map(|c| i16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            SampleFormat::F32 => Self::F32(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
        };

        Ok(buffer)
    }

    /// Collapse a planar layout into a mono buffer
    ///
    /// Recorder widgets sometimes hand over samples wrapped in a one-element
    /// channel container; unwrap it. Anything else is the wrong
    /// dimensionality.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAudioInput` unless exactly one channel is present
    pub fn mono_from_planar(mut channels: Vec<Vec<f32>>) -> Result<Self> {
        match channels.len() {
            1 => Ok(Self::F32(channels.remove(0))),
            n => Err(SttError::InvalidAudioInput(format!(
                "expected a single audio channel, got {n}"
            ))),
        }
    }
}

/// Audio handed to the transcription pipeline
///
/// Exactly one shape per call: an already-materialized file on disk, or an
/// in-memory sample buffer with its rate.
#[derive(Debug)]
pub enum AudioInput {
    /// Pre-existing file; the caller keeps ownership
    File(PathBuf),
    /// Raw PCM needing WAV encoding before upload
    Samples { data: SampleBuffer, sample_rate: u32 },
}

/// A filesystem path ready for upload, with cleanup responsibility attached
///
/// Paths materialized from sample buffers or spooled uploads are owned and
/// removed (best-effort) on drop. Caller-provided paths are never deleted.
#[derive(Debug)]
pub struct MaterializedAudio {
    path: PathBuf,
    owned: bool,
}

impl MaterializedAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn is_owned(&self) -> bool {
        self.owned
    }
}

impl Drop for MaterializedAudio {
    fn drop(&mut self) {
        if self.owned
            && let Err(e) = std::fs::remove_file(&self.path)
        {
            // Cleanup failure is never escalated
            tracing::debug!(path = %self.path.display(), "failed to remove temp audio: {e}");
        }
    }
}

/// Produce an uploadable file path for any audio input
///
/// Path inputs are returned unchanged; sample buffers are encoded as a
/// single-channel WAV at the given rate into a fresh temp file whose
/// ownership transfers to the returned guard.
///
/// # Errors
///
/// Returns `InvalidAudioInput` for empty buffers or a zero sample rate, and
/// i/o or encoding errors if the temp file cannot be written
pub fn materialize(input: AudioInput) -> Result<MaterializedAudio> {
    match input {
        AudioInput::File(path) => Ok(MaterializedAudio { path, owned: false }),
        AudioInput::Samples { data, sample_rate } => {
            if data.is_empty() {
                return Err(SttError::InvalidAudioInput("empty sample buffer".to_string()));
            }
            if sample_rate == 0 {
                return Err(SttError::InvalidAudioInput("sample rate must be positive".to_string()));
            }

            let path = temp_audio_path()?;
            let spec = hound::WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: data.bits_per_sample(),
                sample_format: data.wav_format(),
            };

            let mut writer = hound::WavWriter::create(&path, spec)?;
            match &data {
                SampleBuffer::I16(samples) => {
                    for sample in samples {
                        writer.write_sample(*sample)?;
                    }
                }
                SampleBuffer::F32(samples) => {
                    for sample in samples {
                        writer.write_sample(*sample)?;
                    }
                }
            }
            writer.finalize()?;

            tracing::debug!(
                path = %path.display(),
                samples = data.len(),
                sample_rate,
                "materialized sample buffer to temp wav"
            );

            Ok(MaterializedAudio { path, owned: true })
        }
    }
}

/// Spool uploaded audio bytes to an owned temp file
///
/// # Errors
///
/// Returns `InvalidAudioInput` for an empty upload, or an i/o error if the
/// temp file cannot be written
pub fn spool(bytes: &[u8], filename: &str) -> Result<MaterializedAudio> {
    if bytes.is_empty() {
        return Err(SttError::InvalidAudioInput("empty audio upload".to_string()));
    }

    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| ".bin".to_string(), |e| format!(".{e}"));

    let mut file = tempfile::Builder::new()
        .prefix("wlts-upload-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    let path = file.into_temp_path().keep().map_err(std::io::Error::from)?;

    Ok(MaterializedAudio { path, owned: true })
}

fn temp_audio_path() -> Result<PathBuf> {
    let file = tempfile::Builder::new().prefix("wlts-audio-").suffix(".wav").tempfile()?;
    let path = file.into_temp_path().keep().map_err(std::io::Error::from)?;
    Ok(path)
}
