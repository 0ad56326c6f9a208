//! Validated mono PCM input for the detection core.

use crate::error::SignalError;

/// Decoded mono PCM samples plus their sample rate
///
/// Always non-empty with a positive sample rate and finite samples in
/// [-1.0, 1.0]; the only way to build one is through the validating
/// constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Validate and wrap decoded samples
    ///
    /// # Errors
    /// * `SignalError::Empty` - no samples
    /// * `SignalError::InvalidSampleRate` - sample rate is 0
    /// * `SignalError::NonFiniteSample` - first NaN/Inf sample found
    /// * `SignalError::AmplitudeOutOfRange` - first sample with |s| > 1.0
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, SignalError> {
        if sample_rate == 0 {
            return Err(SignalError::InvalidSampleRate { sample_rate });
        }
        if samples.is_empty() {
            return Err(SignalError::Empty);
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(SignalError::NonFiniteSample { index });
        }
        if let Some(index) = samples.iter().position(|s| s.abs() > 1.0) {
            return Err(SignalError::AmplitudeOutOfRange {
                index,
                value: samples[index],
            });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build a signal from consecutive buffers, in order
    pub fn from_chunks(chunks: &[&[f32]], sample_rate: u32) -> Result<Self, SignalError> {
        let total = chunks.iter().map(|chunk| chunk.len()).sum();
        let mut samples = Vec::with_capacity(total);
        for chunk in chunks {
            samples.extend_from_slice(chunk);
        }
        Self::new(samples, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Release the sample buffer
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signal() {
        let signal = AudioSignal::new(vec![0.0, 0.5, -0.5], 16_000).unwrap();
        assert_eq!(signal.len(), 3);
        assert_eq!(signal.sample_rate(), 16_000);
        assert!(!signal.is_empty());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(AudioSignal::new(vec![], 16_000), Err(SignalError::Empty));
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert_eq!(
            AudioSignal::new(vec![0.1], 0),
            Err(SignalError::InvalidSampleRate { sample_rate: 0 })
        );
    }

    #[test]
    fn test_rejects_non_finite_samples() {
        assert_eq!(
            AudioSignal::new(vec![0.0, 0.2, f32::NAN, f32::INFINITY], 8_000),
            Err(SignalError::NonFiniteSample { index: 2 })
        );
        assert_eq!(
            AudioSignal::new(vec![f32::NEG_INFINITY], 8_000),
            Err(SignalError::NonFiniteSample { index: 0 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_amplitude() {
        let huge: Vec<f32> = (0..16_000)
            .map(|i| if i % 2 == 0 { 1e20 } else { -1e20 })
            .collect();
        assert_eq!(
            AudioSignal::new(huge, 16_000),
            Err(SignalError::AmplitudeOutOfRange {
                index: 0,
                value: 1e20
            })
        );
        assert_eq!(
            AudioSignal::new(vec![0.5, -1.0001], 16_000),
            Err(SignalError::AmplitudeOutOfRange {
                index: 1,
                value: -1.0001
            })
        );
        // Full scale itself is valid
        assert!(AudioSignal::new(vec![1.0, -1.0, 0.0], 16_000).is_ok());
    }

    #[test]
    fn test_from_chunks_concatenates_in_order() {
        let a = [0.1, 0.2];
        let b = [0.3];
        let signal = AudioSignal::from_chunks(&[&a, &b], 8_000).unwrap();
        assert_eq!(signal.samples(), &[0.1, 0.2, 0.3]);
        assert!(AudioSignal::from_chunks(&[], 8_000).is_err());
    }

    #[test]
    fn test_duration() {
        let signal = AudioSignal::new(vec![0.0; 8_000], 16_000).unwrap();
        assert!((signal.duration_secs() - 0.5).abs() < 1e-12);
    }
}
