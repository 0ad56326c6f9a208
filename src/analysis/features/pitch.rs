// Pitch module - Fundamental frequency tracking and jitter
//
// Per frame, the normalized autocorrelation is evaluated over the lag range
// of the configured pitch band. The first local peak that reaches 90% of the
// strongest peak is taken as the period (which avoids octave-down errors on
// strongly periodic frames) and refined with parabolic interpolation. Frames
// that are too quiet or not periodic enough are unvoiced and dropped.

use super::frames::{ms_to_samples, FramePlan};
use super::stats;
use super::temporal::compute_rms;
use crate::config::PitchConfig;

/// Fraction of the strongest correlation peak a candidate must reach
const PEAK_ACCEPT_RATIO: f64 = 0.9;

/// Autocorrelation pitch tracker
pub struct PitchTracker {
    sample_rate: u32,
    plan: FramePlan,
    min_lag: usize,
    max_lag: usize,
    voicing_threshold: f64,
    silence_rms: f32,
}

impl PitchTracker {
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `config` - Pitch band, window and voicing parameters
    /// * `hop` - Hop between pitch frames in samples
    pub fn new(sample_rate: u32, config: &PitchConfig, hop: usize) -> Self {
        let sr = sample_rate as f64;
        let max_hz = (config.max_hz as f64).max(1.0);
        let min_hz = (config.min_hz as f64).clamp(f64::MIN_POSITIVE, max_hz);
        let min_lag = ((sr / max_hz).floor() as usize).max(1);
        let max_lag = ((sr / min_hz).ceil() as usize).max(min_lag);

        Self {
            sample_rate,
            plan: FramePlan {
                frame_len: ms_to_samples(sample_rate, config.window_ms),
                hop: hop.max(1),
            },
            min_lag,
            max_lag,
            voicing_threshold: config.voicing_threshold as f64,
            silence_rms: config.silence_rms,
        }
    }

    /// Voiced pitch estimates in Hz, in frame order
    pub fn track(&self, samples: &[f32]) -> Vec<f64> {
        self.plan
            .frames(samples)
            .filter_map(|frame| self.estimate_frame(frame))
            .collect()
    }

    /// Estimate the fundamental frequency of one frame
    ///
    /// # Returns
    /// `Some(hz)` for a voiced frame, `None` otherwise
    pub fn estimate_frame(&self, frame: &[f32]) -> Option<f64> {
        if compute_rms(frame) < self.silence_rms {
            return None;
        }

        let max_lag = self.max_lag.min(frame.len().saturating_sub(1));
        if max_lag < self.min_lag + 2 {
            return None;
        }

        let correlations: Vec<f64> = (self.min_lag..=max_lag)
            .map(|lag| normalized_autocorrelation(frame, lag))
            .collect();

        let best = correlations.iter().copied().fold(f64::MIN, f64::max);
        if best < self.voicing_threshold {
            return None;
        }

        let peak = (1..correlations.len() - 1)
            .find(|&i| {
                correlations[i] >= correlations[i - 1]
                    && correlations[i] > correlations[i + 1]
                    && correlations[i] >= PEAK_ACCEPT_RATIO * best
            })
            .or_else(|| correlations.iter().position(|&c| c == best))?;

        let offset = if peak > 0 && peak + 1 < correlations.len() {
            parabolic_offset(
                correlations[peak - 1],
                correlations[peak],
                correlations[peak + 1],
            )
        } else {
            0.0
        };

        let lag = (self.min_lag + peak) as f64 + offset;
        let pitch = self.sample_rate as f64 / lag;
        (pitch.is_finite() && pitch > 0.0).then_some(pitch)
    }
}

/// Σ x[n]·x[n+lag] / sqrt(Σ x[n]² · Σ x[n+lag]²) over the overlapping span
fn normalized_autocorrelation(frame: &[f32], lag: usize) -> f64 {
    let head = &frame[..frame.len() - lag];
    let tail = &frame[lag..];

    let mut cross = 0.0f64;
    let mut head_energy = 0.0f64;
    let mut tail_energy = 0.0f64;
    for (&a, &b) in head.iter().zip(tail) {
        let (a, b) = (a as f64, b as f64);
        cross += a * b;
        head_energy += a * a;
        tail_energy += b * b;
    }

    let denom = (head_energy * tail_energy).sqrt();
    if denom > 1e-12 {
        cross / denom
    } else {
        0.0
    }
}

/// Vertex offset of the parabola through three equally spaced points, in [-0.5, 0.5]
fn parabolic_offset(left: f64, center: f64, right: f64) -> f64 {
    let denom = left - 2.0 * center + right;
    if denom.abs() < 1e-12 {
        return 0.0;
    }
    (0.5 * (left - right) / denom).clamp(-0.5, 0.5)
}

/// Standard deviation and jitter of a voiced pitch track
///
/// * `pitch_std` - population standard deviation, 0 when empty
/// * `jitter` - mean absolute successive difference over mean pitch; 0 with
///   fewer than two voiced frames or a zero mean
pub fn pitch_statistics(pitches: &[f64]) -> (f64, f64) {
    let pitch_std = stats::std_dev(pitches);

    let jitter = if pitches.len() < 2 {
        0.0
    } else {
        let mean = stats::mean(pitches);
        if mean == 0.0 {
            0.0
        } else {
            stats::mean_abs_successive_difference(pitches) / mean
        }
    };

    (pitch_std, jitter)
}
