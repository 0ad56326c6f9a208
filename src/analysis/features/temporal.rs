// Temporal module - Time-domain feature extraction
//
// Per-frame zero-crossing rate and RMS energy computed directly from the
// time-domain samples of a frame (no windowing, no padding).
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Compute zero-crossing rate (ZCR)
///
/// Fraction of adjacent sample pairs whose sign differs, where a sample
/// counts as non-negative when it is >= 0.0. An all-zero frame has no
/// crossings.
///
/// # Returns
/// Zero-crossing rate (0.0 to 1.0)
pub fn compute_zcr(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }

    let crossings = frame
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();

    crossings as f32 / (frame.len() - 1) as f32
}

/// Compute root-mean-square amplitude of a frame
pub fn compute_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let energy: f64 = frame.iter().map(|&x| x as f64 * x as f64).sum();
    (energy / frame.len() as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zcr_alternating() {
        assert_eq!(compute_zcr(&[1.0, -1.0, 1.0, -1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_zcr_silence_and_short() {
        assert_eq!(compute_zcr(&[0.0; 64]), 0.0);
        assert_eq!(compute_zcr(&[0.4]), 0.0);
        assert_eq!(compute_zcr(&[]), 0.0);
    }

    #[test]
    fn test_zcr_counts_zero_as_non_negative() {
        // 0.0 -> -0.1 is a crossing, -0.1 -> 0.0 is a crossing, 0.0 -> 0.2 is not
        assert_eq!(compute_zcr(&[0.0, -0.1, 0.0, 0.2]), 2.0 / 3.0);
    }

    #[test]
    fn test_rms_constant() {
        assert!((compute_rms(&[0.5; 100]) - 0.5).abs() < 1e-6);
        assert!((compute_rms(&[-0.5, 0.5]) - 0.5).abs() < 1e-6);
        assert_eq!(compute_rms(&[0.0; 10]), 0.0);
        assert_eq!(compute_rms(&[]), 0.0);
    }
}
