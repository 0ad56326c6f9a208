//! Signal sources for the CLI harness and tests.
//!
//! The detection core consumes decoded mono PCM only. This module provides
//! the desktop-side collaborators that produce it: a WAV loader that mixes
//! down to mono, and deterministic synthetic generators used for
//! diagnostics and regression tests. No resampling happens here; signals keep
//! the rate they were recorded or generated at.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use crate::error::SignalError;
use crate::signal::AudioSignal;

/// Default sample rate for generated signals.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Supported deterministic waveform patterns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticPattern {
    /// All-zero samples
    Silence,
    /// Constant-frequency sine
    Sine,
    /// Seeded uniform noise
    WhiteNoise,
    /// Frequency-modulated tone gated into syllable-like bursts
    Vibrato,
}

/// Configuration for a synthetic signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntheticSpec {
    pub pattern: SyntheticPattern,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Vibrato depth as a fraction of the centre frequency
const VIBRATO_DEPTH: f32 = 0.5;
/// Vibrato rate in Hz
const VIBRATO_RATE_HZ: f32 = 2.5;
/// Syllable cycle; the first `SYLLABLE_VOICED_S` of each cycle is voiced
const SYLLABLE_PERIOD_S: f32 = 0.25;
const SYLLABLE_VOICED_S: f32 = 0.15;

fn default_frequency_hz() -> f32 {
    220.0
}

fn default_amplitude() -> f32 {
    0.5
}

fn default_duration_ms() -> u32 {
    1_000
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_seed() -> u64 {
    7
}

impl SyntheticSpec {
    pub fn new(pattern: SyntheticPattern) -> Self {
        Self {
            pattern,
            frequency_hz: default_frequency_hz(),
            amplitude: default_amplitude(),
            duration_ms: default_duration_ms(),
            sample_rate: default_sample_rate(),
            seed: default_seed(),
        }
    }

    pub fn with_frequency(mut self, frequency_hz: f32) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn sample_count(&self) -> usize {
        (self.sample_rate as u64 * self.duration_ms as u64 / 1_000) as usize
    }

    /// Generate the raw samples (empty when the duration rounds to zero)
    pub fn generate(&self) -> Vec<f32> {
        let len = self.sample_count();
        let sample_rate = self.sample_rate.max(1) as f32;
        let amplitude = self.amplitude.clamp(0.0, 1.0);

        match self.pattern {
            SyntheticPattern::Silence => vec![0.0; len],
            SyntheticPattern::Sine => (0..len)
                .map(|i| {
                    let t = i as f32 / sample_rate;
                    amplitude * (2.0 * PI * self.frequency_hz * t).sin()
                })
                .collect(),
            SyntheticPattern::WhiteNoise => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                (0..len)
                    .map(|_| amplitude * rng.gen_range(-1.0f32..=1.0))
                    .collect()
            }
            SyntheticPattern::Vibrato => {
                let mut phase = 0.0f32;
                (0..len)
                    .map(|i| {
                        let t = i as f32 / sample_rate;
                        let frequency = self.frequency_hz
                            * (1.0 + VIBRATO_DEPTH * (2.0 * PI * VIBRATO_RATE_HZ * t).sin());
                        phase = (phase + 2.0 * PI * frequency / sample_rate) % (2.0 * PI);
                        amplitude * syllable_envelope(t) * phase.sin()
                    })
                    .collect()
            }
        }
    }

    /// Generate and validate as an [`AudioSignal`]
    pub fn to_signal(&self) -> Result<AudioSignal, SignalError> {
        AudioSignal::new(self.generate(), self.sample_rate)
    }
}

/// Half-sine burst over the voiced part of each syllable cycle, zero between
fn syllable_envelope(t: f32) -> f32 {
    let position = t % SYLLABLE_PERIOD_S;
    if position < SYLLABLE_VOICED_S {
        (PI * position / SYLLABLE_VOICED_S).sin()
    } else {
        0.0
    }
}

/// Decode a PCM WAV file into a mono signal
///
/// Integer samples are scaled by their full-scale value; multi-channel audio
/// is mixed down by averaging the channels of each frame.
pub fn read_wav(path: &Path) -> Result<AudioSignal, SignalError> {
    let mut reader = hound::WavReader::open(path).map_err(|err| SignalError::ReadFailed {
        reason: format!("failed to open {}: {err}", path.display()),
    })?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(SignalError::UnsupportedFormat {
            reason: format!("{} has zero channels", path.display()),
        });
    }

    let read_error = |err: hound::Error| SignalError::ReadFailed {
        reason: format!("error reading {}: {err}", path.display()),
    };

    let interleaved = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|sample| sample.map_err(read_error))
            .collect::<Result<Vec<f32>, _>>()?,
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let full_scale = (1u64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|v| v as f32 / full_scale).map_err(read_error))
                .collect::<Result<Vec<f32>, _>>()?
        }
        (format, bits) => {
            return Err(SignalError::UnsupportedFormat {
                reason: format!(
                    "{:?} samples with bits_per_sample={} in {}",
                    format,
                    bits,
                    path.display()
                ),
            })
        }
    };

    let channels = spec.channels as usize;
    let mono = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    log::debug!(
        "[Fixtures] Loaded {} ({} Hz, {} channel(s), {} mono samples)",
        path.display(),
        spec.sample_rate,
        spec.channels,
        mono.len()
    );

    AudioSignal::new(mono, spec.sample_rate)
}

/// Write a mono signal as a 32-bit float WAV file
pub fn write_wav(path: &Path, signal: &AudioSignal) -> Result<(), SignalError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let write_error = |err: hound::Error| SignalError::WriteFailed {
        reason: format!("{}: {err}", path.display()),
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(write_error)?;
    for &sample in signal.samples() {
        writer.write_sample(sample).map_err(write_error)?;
    }
    writer.finalize().map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voice_detector_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_sample_count() {
        let spec = SyntheticSpec::new(SyntheticPattern::Sine).with_duration_ms(250);
        assert_eq!(spec.sample_count(), 4_000);
        assert_eq!(spec.generate().len(), 4_000);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let samples = SyntheticSpec::new(SyntheticPattern::Silence).generate();
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_white_noise_is_seeded() {
        let spec = SyntheticSpec::new(SyntheticPattern::WhiteNoise);
        assert_eq!(spec.generate(), spec.generate());
        assert!(spec.generate().iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn test_vibrato_has_gaps_and_bounds() {
        let samples = SyntheticSpec::new(SyntheticPattern::Vibrato).generate();
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
        // 0.20 s falls in the unvoiced part of the first syllable cycle
        assert_eq!(samples[3_200], 0.0);
        assert!(samples[800..1_600].iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn test_zero_duration_is_rejected_as_signal() {
        let spec = SyntheticSpec::new(SyntheticPattern::Sine).with_duration_ms(0);
        assert_eq!(spec.to_signal(), Err(SignalError::Empty));
    }

    #[test]
    fn test_wav_roundtrip() {
        let path = temp_path("roundtrip.wav");
        let signal = SyntheticSpec::new(SyntheticPattern::Sine)
            .with_duration_ms(100)
            .to_signal()
            .unwrap();

        write_wav(&path, &signal).unwrap();
        let loaded = read_wav(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, signal);
    }

    #[test]
    fn test_stereo_int_wav_is_mixed_down() {
        let path = temp_path("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(16_384i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = read_wav(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.sample_rate(), 8_000);
        assert_eq!(loaded.len(), 100);
        assert!(loaded.samples().iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_unwritable_wav_reports_write_failure() {
        let signal = SyntheticSpec::new(SyntheticPattern::Silence)
            .with_duration_ms(10)
            .to_signal()
            .unwrap();
        match write_wav(Path::new("/definitely/not/a/dir/out.wav"), &signal) {
            Err(err @ SignalError::WriteFailed { .. }) => {
                assert_eq!(err.code(), 1007);
                assert!(err.message().contains("out.wav"));
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_wav_reports_read_failure() {
        match read_wav(Path::new("/definitely/not/here.wav")) {
            Err(SignalError::ReadFailed { reason }) => assert!(reason.contains("here.wav")),
            other => panic!("expected ReadFailed, got {other:?}"),
        }
    }
}
