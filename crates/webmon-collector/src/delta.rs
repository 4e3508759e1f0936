/// Previous-tick state for one cumulative upstream counter.
///
/// The upstream status page reports totals since server start, not
/// interval deltas, so each source keeps one tracker per counter and
/// feeds every reading through [`DeltaTracker::advance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaTracker {
    previous: Option<u64>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the forward delta against the previous reading.
    ///
    /// The first reading only establishes the baseline and yields zero.
    /// A reading less than or equal to the previous one (an upstream
    /// restart reset the counter) also yields zero, but the stored
    /// previous value advances to the new reading in every case.
    pub fn advance(&mut self, current: u64) -> u64 {
        let increase = match self.previous {
            Some(previous) if current > previous => current - previous,
            _ => 0,
        };
        self.previous = Some(current);
        increase
    }
}
