/// Default number of trials between cooperative yields.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Batching for bulk simulations.
///
/// Only controls how often the host gets control back; the trials themselves and
/// the random stream they consume are the same for every batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub batch_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl SimConfig {
    /// A zero batch size is bumped to one.
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size: batch_size.max(1) }
    }

    /// Run everything in one pass with no yields.
    pub fn unbatched() -> Self {
        Self { batch_size: usize::MAX }
    }

    pub fn effective_batch_size(&self) -> u64 {
        self.batch_size.max(1) as u64
    }

    /// Batches needed for `trials` (the last one may be short).
    pub fn batch_count(&self, trials: u64) -> u64 {
        trials.div_ceil(self.effective_batch_size())
    }
}
