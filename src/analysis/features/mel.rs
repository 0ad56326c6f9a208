// Mel module - Mel filter bank and cepstral coefficients
//
// Power spectrum -> triangular mel filters (HTK mel scale, 0 Hz to Nyquist)
// -> log energy in dB -> orthonormal DCT-II -> first N coefficients.

use crate::config::MfccConfig;

/// Convert frequency to mel scale
pub fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel to frequency
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10f64.powf(mel / 2595.0) - 1.0)
}

/// Mel filter bank for converting a power spectrum to mel band energies
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    /// Filter weights (n_mels x n_fft/2+1)
    filters: Vec<Vec<f64>>,
}

impl MelFilterbank {
    /// Create mel filterbank spanning 0 Hz to Nyquist
    ///
    /// Weights are evaluated at each bin's centre frequency, so a narrow
    /// low-frequency filter never degenerates into a zero-width triangle.
    pub fn new(sample_rate: u32, fft_size: usize, n_mels: usize) -> Self {
        let n_freqs = fft_size / 2 + 1;
        let nyquist = sample_rate as f64 / 2.0;
        let mel_max = hz_to_mel(nyquist);

        let hz_points: Vec<f64> = (0..n_mels + 2)
            .map(|i| mel_to_hz(mel_max * i as f64 / (n_mels + 1) as f64))
            .collect();

        let bin_width = sample_rate as f64 / fft_size as f64;

        let filters = (0..n_mels)
            .map(|m| {
                let (left, center, right) = (hz_points[m], hz_points[m + 1], hz_points[m + 2]);
                (0..n_freqs)
                    .map(|k| {
                        let freq = k as f64 * bin_width;
                        let rising = (freq - left) / (center - left);
                        let falling = (right - freq) / (right - center);
                        rising.min(falling).max(0.0)
                    })
                    .collect()
            })
            .collect();

        Self { filters }
    }

    pub fn n_mels(&self) -> usize {
        self.filters.len()
    }

    /// Apply filterbank to a power spectrum
    pub fn apply(&self, power_spectrum: &[f32]) -> Vec<f64> {
        self.filters
            .iter()
            .map(|filter| {
                filter
                    .iter()
                    .zip(power_spectrum)
                    .map(|(&w, &p)| w * p as f64)
                    .sum()
            })
            .collect()
    }
}

/// MFCC computation for a single frame
pub struct MfccProcessor {
    filterbank: MelFilterbank,
    /// DCT-II basis rows (n_coefficients x n_mels), orthonormal scaling
    dct_basis: Vec<Vec<f64>>,
    log_floor: f64,
}

impl MfccProcessor {
    pub fn new(sample_rate: u32, fft_size: usize, config: &MfccConfig) -> Self {
        let n_mels = config.n_mels.max(1);
        let filterbank = MelFilterbank::new(sample_rate, fft_size, n_mels);
        let n_coefficients = config.n_coefficients.clamp(1, filterbank.n_mels());

        Self {
            filterbank,
            dct_basis: dct_ii_basis(n_coefficients, n_mels),
            log_floor: config.log_floor.max(f64::MIN_POSITIVE),
        }
    }

    pub fn n_coefficients(&self) -> usize {
        self.dct_basis.len()
    }

    /// Cepstral coefficients of one frame's power spectrum
    pub fn coefficients(&self, power_spectrum: &[f32]) -> Vec<f64> {
        let log_energies: Vec<f64> = self
            .filterbank
            .apply(power_spectrum)
            .into_iter()
            .map(|e| 10.0 * e.max(self.log_floor).log10())
            .collect();

        self.dct_basis
            .iter()
            .map(|row| row.iter().zip(&log_energies).map(|(b, x)| b * x).sum())
            .collect()
    }
}

/// Orthonormal DCT-II basis: c_k = s_k Σ x_n cos(π k (2n + 1) / 2N)
fn dct_ii_basis(n_out: usize, n_in: usize) -> Vec<Vec<f64>> {
    let n = n_in as f64;
    (0..n_out)
        .map(|k| {
            let scale = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            (0..n_in)
                .map(|i| {
                    scale
                        * (std::f64::consts::PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n))
                            .cos()
                })
                .collect()
        })
        .collect()
}
