// Spectral shape - per-frame centroid and rolloff
//
// Both features read a one-sided magnitude spectrum and report a frequency in
// Hz. Bin `i` sits at `i * sample_rate / fft_size`.

/// Silent-frame guard for magnitude and energy sums
const SILENCE_FLOOR: f32 = 1e-10;

/// Frequency-domain shape descriptors for one sample rate and FFT size
#[derive(Debug, Clone, Copy)]
pub struct SpectralShape {
    bin_hz: f32,
    rolloff_fraction: f32,
}

impl SpectralShape {
    /// `rolloff_fraction` is the share of spectral energy below the rolloff
    /// frequency (0.85 by default)
    pub fn new(sample_rate: u32, fft_size: usize, rolloff_fraction: f32) -> Self {
        Self {
            bin_hz: sample_rate as f32 / fft_size.max(1) as f32,
            rolloff_fraction,
        }
    }

    /// Magnitude-weighted mean frequency, 0.0 for a silent frame
    pub fn centroid(&self, spectrum: &[f32]) -> f32 {
        let (weighted, total) = spectrum
            .iter()
            .enumerate()
            .fold((0.0f32, 0.0f32), |(weighted, total), (bin, &mag)| {
                (weighted + bin as f32 * mag, total + mag)
            });

        if total > SILENCE_FLOOR {
            self.bin_hz * weighted / total
        } else {
            0.0
        }
    }

    /// Lowest bin frequency whose cumulative energy (|X|²) reaches
    /// `rolloff_fraction` of the frame energy, 0.0 for a silent frame
    pub fn rolloff(&self, spectrum: &[f32]) -> f32 {
        let energy: f32 = spectrum.iter().map(|&mag| mag * mag).sum();
        if energy < SILENCE_FLOOR {
            return 0.0;
        }

        let target = self.rolloff_fraction * energy;
        let bin = spectrum
            .iter()
            .scan(0.0f32, |cumulative, &mag| {
                *cumulative += mag * mag;
                Some(*cumulative)
            })
            .position(|cumulative| cumulative >= target)
            // float rounding can leave the running sum just short of the target
            .unwrap_or(spectrum.len() - 1);

        bin as f32 * self.bin_hz
    }
}
