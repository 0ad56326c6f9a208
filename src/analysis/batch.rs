// Batch - parallel classification of independent signals
//
// Every signal is an independent pure computation, so the batch is split
// into contiguous chunks and each chunk runs on its own scoped thread.
// Results are returned in input order.

use std::num::NonZeroUsize;
use std::thread;

use super::{ClassificationReport, VoiceDetector};
use crate::error::DetectionError;
use crate::language::LanguageIdentifier;
use crate::signal::AudioSignal;

/// Classify every signal, using up to the available parallelism
pub fn classify_batch(
    detector: &VoiceDetector,
    signals: &[AudioSignal],
    identifier: &dyn LanguageIdentifier,
) -> Vec<Result<ClassificationReport, DetectionError>> {
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    classify_batch_with_workers(detector, signals, identifier, workers)
}

/// Classify every signal on at most `workers` threads
pub fn classify_batch_with_workers(
    detector: &VoiceDetector,
    signals: &[AudioSignal],
    identifier: &dyn LanguageIdentifier,
    workers: usize,
) -> Vec<Result<ClassificationReport, DetectionError>> {
    if signals.is_empty() {
        return Vec::new();
    }

    let workers = workers.clamp(1, signals.len());
    if workers == 1 {
        return signals
            .iter()
            .map(|signal| detector.classify(signal, identifier))
            .collect();
    }

    let chunk_size = signals.len().div_ceil(workers);
    log::debug!(
        "[Batch] signals={} workers={} chunk_size={}",
        signals.len(),
        workers,
        chunk_size
    );

    thread::scope(|scope| {
        let handles: Vec<_> = signals
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|signal| detector.classify(signal, identifier))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
