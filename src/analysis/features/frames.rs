// Frames module - Fixed-hop partitioning of a signal into analysis windows
//
// Frames start at sample 0 and advance by `hop` samples. A trailing partial
// frame is dropped. A signal shorter than one window yields exactly one frame
// holding every sample, so every feature track has at least one entry.

/// Window length and hop, in samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub frame_len: usize,
    pub hop: usize,
}

impl FramePlan {
    /// Convert millisecond durations to sample counts (rounded, at least 1)
    pub fn from_millis(sample_rate: u32, window_ms: f32, hop_ms: f32) -> Self {
        Self {
            frame_len: ms_to_samples(sample_rate, window_ms),
            hop: ms_to_samples(sample_rate, hop_ms),
        }
    }

    /// Number of frames produced for a signal of `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        if len <= self.frame_len {
            1
        } else {
            1 + (len - self.frame_len) / self.hop
        }
    }

    /// Iterate frame slices over `samples`
    ///
    /// Only the degenerate single frame can be shorter than `frame_len`.
    pub fn frames<'a>(&self, samples: &'a [f32]) -> impl Iterator<Item = &'a [f32]> + 'a {
        let count = self.frame_count(samples.len());
        let frame_len = self.frame_len;
        let hop = self.hop;
        (0..count).map(move |i| {
            let start = i * hop;
            let end = (start + frame_len).min(samples.len());
            &samples[start..end]
        })
    }
}

pub fn ms_to_samples(sample_rate: u32, ms: f32) -> usize {
    // NaN and negative durations saturate to 0 before the floor of 1
    ((sample_rate as f64 * ms as f64 / 1000.0).round() as usize).max(1)
}
