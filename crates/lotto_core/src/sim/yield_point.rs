/// Where the simulator hands control back to the host between batches.
///
/// Called after every batch except the last with the number of completed batches
/// and trials so far. A browser host would schedule a zero-delay timeout here; a
/// native host might pump its event loop or report progress.
pub trait YieldPoint {
    fn yield_now(&mut self, batches_done: u64, trials_done: u64);
}

/// Never yields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoYield;

impl YieldPoint for NoYield {
    fn yield_now(&mut self, _batches_done: u64, _trials_done: u64) {}
}

impl<F: FnMut(u64, u64)> YieldPoint for F {
    fn yield_now(&mut self, batches_done: u64, trials_done: u64) {
        self(batches_done, trials_done)
    }
}

/// Records every yield; handy for checking batching behaviour.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct CountingYield {
    /// `(batches_done, trials_done)` per yield
    pub calls: Vec<(u64, u64)>,
}

#[cfg(test)]
impl CountingYield {
    pub fn count(&self) -> usize {
        self.calls.len()
    }
}

#[cfg(test)]
impl YieldPoint for CountingYield {
    fn yield_now(&mut self, batches_done: u64, trials_done: u64) {
        self.calls.push((batches_done, trials_done));
    }
}
