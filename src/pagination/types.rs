//! Pagination types
//!
//! Progress bookkeeping shared by the pager and its callers.

/// Progress of one pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Records emitted so far
    pub total_fetched: u64,
    /// `total_count` from the first page
    pub total_reported: Option<u64>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Account for one fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Record the API's declared total. Only the first call sticks.
    ///
    /// Returns `true` when this call set the value.
    pub fn report_total(&mut self, total: u64) -> bool {
        if self.total_reported.is_some() {
            return false;
        }
        self.total_reported = Some(total);
        true
    }

    /// Whether the fetched count agrees with the declared total.
    ///
    /// `None` until a total has been reported.
    pub fn matches_reported_total(&self) -> Option<bool> {
        self.total_reported.map(|total| total == self.total_fetched)
    }
}
