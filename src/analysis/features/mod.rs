// FeatureExtractor - acoustic statistics for synthetic speech detection
//
// This module reduces a whole signal to seven scalar statistics. Per-frame
// tracks are computed from time-domain and frequency-domain representations
// and then aggregated over the signal.
//
// Module organization:
// - types: Data structures (FeatureSet, FeatureName)
// - frames: Window/hop partitioning
// - fft: FFT computation with windowing
// - spectral: Frequency-domain features (centroid, rolloff)
// - mel: Mel filter bank and MFCC
// - temporal: Time-domain features (ZCR, RMS)
// - pitch: Autocorrelation pitch tracking and jitter
// - stats: Track aggregation
// - mod.rs: Coordinator (FeatureExtractor)
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

mod fft;
mod frames;
mod mel;
mod pitch;
mod spectral;
mod stats;
mod temporal;
mod types;

pub use frames::FramePlan;
pub use pitch::{pitch_statistics, PitchTracker};
pub use types::{FeatureName, FeatureSet};

use fft::FftProcessor;
use mel::MfccProcessor;
use spectral::SpectralShape;
use temporal::{compute_rms, compute_zcr};

use crate::config::AppConfig;
use crate::signal::AudioSignal;

/// FeatureExtractor coordinates the feature extraction pipeline
///
/// Holds only immutable configuration. Every sample-rate dependent table
/// (window, FFT plan, filter bank) is built inside `extract` and dropped when
/// it returns, so one extractor can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: AppConfig,
}

impl FeatureExtractor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Extract all features from a signal
    ///
    /// 1. Partition into analysis frames
    /// 2. Per frame: magnitude spectrum, centroid, rolloff, MFCC, ZCR, RMS
    /// 3. Track voiced pitch over longer pitch frames
    /// 4. Aggregate tracks into a FeatureSet
    pub fn extract(&self, signal: &AudioSignal) -> FeatureSet {
        let sample_rate = signal.sample_rate();
        let samples = signal.samples();
        let framing = &self.config.framing;

        let plan = FramePlan::from_millis(sample_rate, framing.window_ms, framing.hop_ms);
        // A signal shorter than one window is a single frame of its own length
        let analysis_len = plan.frame_len.min(samples.len());
        let fft_processor = FftProcessor::new(analysis_len);
        let fft_size = fft_processor.fft_size();
        let spectral_shape =
            SpectralShape::new(sample_rate, fft_size, self.config.spectral.rolloff_fraction);
        let mfcc_processor = MfccProcessor::new(sample_rate, fft_size, &self.config.mfcc);

        let frame_count = plan.frame_count(samples.len());
        let mut mfcc = Vec::with_capacity(frame_count * mfcc_processor.n_coefficients());
        let mut centroids = Vec::with_capacity(frame_count);
        let mut rolloffs = Vec::with_capacity(frame_count);
        let mut zcrs = Vec::with_capacity(frame_count);
        let mut rms = Vec::with_capacity(frame_count);

        for frame in plan.frames(samples) {
            let spectrum = fft_processor.compute_magnitude_spectrum(frame);
            centroids.push(spectral_shape.centroid(&spectrum) as f64);
            rolloffs.push(spectral_shape.rolloff(&spectrum) as f64);

            let power: Vec<f32> = spectrum.iter().map(|&mag| mag * mag).collect();
            mfcc.extend(mfcc_processor.coefficients(&power));

            zcrs.push(compute_zcr(frame) as f64);
            rms.push(compute_rms(frame) as f64);
        }

        let pitch_tracker = PitchTracker::new(sample_rate, &self.config.pitch, plan.hop);
        let pitches = pitch_tracker.track(samples);
        let (pitch_std, jitter) = pitch_statistics(&pitches);

        log::debug!(
            "[FeatureExtractor] samples={} sample_rate={} frames={} voiced_frames={}",
            samples.len(),
            sample_rate,
            frame_count,
            pitches.len()
        );

        FeatureSet {
            mfcc_variance: stats::variance(&mfcc),
            zero_crossing_rate_mean: stats::mean(&zcrs),
            spectral_centroid_variance: stats::variance(&centroids),
            spectral_rolloff_mean: stats::mean(&rolloffs),
            pitch_std,
            jitter,
            rms_variance: stats::variance(&rms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const SAMPLE_RATE: u32 = 16_000;

    /// Generate pure sine wave for testing
    fn generate_sine_wave(sample_rate: u32, frequency: f32, duration_samples: usize) -> Vec<f32> {
        (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    /// Generate seeded white noise for testing
    fn generate_white_noise(duration_samples: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..duration_samples)
            .map(|_| rng.gen_range(-0.5..0.5))
            .collect()
    }

    fn extract(samples: Vec<f32>) -> FeatureSet {
        let signal = AudioSignal::new(samples, SAMPLE_RATE).unwrap();
        FeatureExtractor::default().extract(&signal)
    }

    #[test]
    fn test_silence_features_are_finite_and_flat() {
        let features = extract(vec![0.0; SAMPLE_RATE as usize]);

        assert!(features.validate().is_ok());
        assert_eq!(features.rms_variance, 0.0);
        assert_eq!(features.zero_crossing_rate_mean, 0.0);
        assert_eq!(features.spectral_centroid_variance, 0.0);
        assert_eq!(features.spectral_rolloff_mean, 0.0);
        assert_eq!(features.pitch_std, 0.0);
        assert_eq!(features.jitter, 0.0);
        // Only the DC cepstral coefficient is non-zero on a flat -100 dB floor
        assert!(features.mfcc_variance > 100.0);
        println!("Silence features: {:?}", features);
    }

    #[test]
    fn test_sine_has_stable_pitch() {
        let features = extract(generate_sine_wave(SAMPLE_RATE, 220.0, 2 * SAMPLE_RATE as usize));

        assert!(features.pitch_std < 1.0, "pitch_std {}", features.pitch_std);
        assert!(features.jitter < 0.001, "jitter {}", features.jitter);
        assert!(features.rms_variance < 1e-4, "rms_variance {}", features.rms_variance);
        // 220 Hz crosses zero 440 times per second
        assert!(
            (features.zero_crossing_rate_mean - 440.0 / 16_000.0).abs() < 0.005,
            "zcr {}",
            features.zero_crossing_rate_mean
        );
        println!("Sine features: {:?}", features);
    }

    #[test]
    fn test_zcr_sine_vs_noise() {
        let sine = extract(generate_sine_wave(SAMPLE_RATE, 100.0, 8_000));
        let noise = extract(generate_white_noise(8_000));

        assert!(
            noise.zero_crossing_rate_mean > 0.3,
            "Expected noise ZCR > 0.3, got {}",
            noise.zero_crossing_rate_mean
        );
        assert!(
            sine.zero_crossing_rate_mean < 0.05,
            "Expected sine ZCR < 0.05, got {}",
            sine.zero_crossing_rate_mean
        );
    }

    #[test]
    fn test_rolloff_tracks_frequency() {
        let low = extract(generate_sine_wave(SAMPLE_RATE, 200.0, 8_000));
        let high = extract(generate_sine_wave(SAMPLE_RATE, 4_000.0, 8_000));

        assert!(high.spectral_rolloff_mean > low.spectral_rolloff_mean);
        assert!(high.spectral_rolloff_mean <= SAMPLE_RATE as f64 / 2.0);
    }

    #[test]
    fn test_alternating_tones_raise_centroid_variance() {
        let mut samples = generate_sine_wave(SAMPLE_RATE, 300.0, 4_000);
        samples.extend(generate_sine_wave(SAMPLE_RATE, 3_000.0, 4_000));
        let mixed = extract(samples);
        let steady = extract(generate_sine_wave(SAMPLE_RATE, 300.0, 8_000));

        assert!(mixed.spectral_centroid_variance > steady.spectral_centroid_variance * 10.0);
    }

    #[test]
    fn test_extract_with_short_audio() {
        // Fewer samples than one 400-sample analysis frame
        let features = extract(generate_sine_wave(SAMPLE_RATE, 1000.0, 120));

        assert!(features.validate().is_ok());
        assert_eq!(features.rms_variance, 0.0);
        assert_eq!(features.spectral_centroid_variance, 0.0);
        assert!(features.zero_crossing_rate_mean > 0.0);
    }

    #[test]
    fn test_short_signal_at_extreme_rate_sizes_tables_to_signal() {
        // 25 ms at 400 MHz would be a 10M-sample window
        let sample_rate = 400_000_000;
        let samples = generate_sine_wave(sample_rate, 50_000_000.0, 10);
        let signal = AudioSignal::new(samples, sample_rate).unwrap();

        let features = FeatureExtractor::default().extract(&signal);

        assert!(features.validate().is_ok(), "{features:?}");
        assert_eq!(features.rms_variance, 0.0);
        assert_eq!(features.pitch_std, 0.0);
    }

    #[test]
    fn test_single_sample_signal() {
        let features = extract(vec![0.25]);
        assert!(features.validate().is_ok());
        assert_eq!(features.zero_crossing_rate_mean, 0.0);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let signal = AudioSignal::new(generate_white_noise(6_000), SAMPLE_RATE).unwrap();
        let extractor = FeatureExtractor::default();
        assert_eq!(extractor.extract(&signal), extractor.extract(&signal));
    }

    #[test]
    fn test_other_sample_rates() {
        for sample_rate in [8_000u32, 22_050, 44_100] {
            let samples = generate_sine_wave(sample_rate, 220.0, sample_rate as usize / 2);
            let signal = AudioSignal::new(samples, sample_rate).unwrap();
            let features = FeatureExtractor::default().extract(&signal);
            assert!(features.validate().is_ok(), "{sample_rate}: {features:?}");
            assert!(features.pitch_std < 1.0, "{sample_rate}: {features:?}");
        }
    }
}
