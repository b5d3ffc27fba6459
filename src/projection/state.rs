//! Forward state carried from one period to the next

/// New-client counts by period, indexed from period 0
///
/// Lookups before period 0 or past the last recorded period return zero, so
/// window and delay arithmetic never has to special-case the edges.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionHistory {
    by_period: Vec<u64>,
}

impl AcquisitionHistory {
    pub fn with_capacity(periods: usize) -> Self {
        Self {
            by_period: Vec::with_capacity(periods),
        }
    }

    /// Record the next period's acquisitions
    pub fn push(&mut self, acquired: u64) {
        self.by_period.push(acquired);
    }

    /// Number of periods recorded so far
    pub fn len(&self) -> usize {
        self.by_period.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_period.is_empty()
    }

    /// Clients acquired in `period`, zero outside the recorded range
    pub fn get(&self, period: i64) -> u64 {
        if period < 0 {
            return 0;
        }
        self.by_period.get(period as usize).copied().unwrap_or(0)
    }

    /// Clients acquired in the `len` periods ending at `end` (inclusive)
    pub fn window_sum(&self, end: i64, len: u32) -> u64 {
        if end < 0 || len == 0 {
            return 0;
        }
        let start = (end - i64::from(len) + 1).max(0);
        (start..=end).fold(0u64, |acc, p| acc.saturating_add(self.get(p)))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.by_period
    }
}

/// Accumulator owned by the engine for the duration of one run
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Cash balance at the end of the last finalized period
    pub cash_balance: f64,
    /// Clients on the books at the end of the last finalized period
    pub total_clients: u64,
    pub history: AcquisitionHistory,
}

impl ProjectionState {
    pub fn new(starting_cash: f64, starting_clients: u64, periods: usize) -> Self {
        Self {
            cash_balance: starting_cash,
            total_clients: starting_clients,
            history: AcquisitionHistory::with_capacity(periods),
        }
    }

    /// Index of the period about to be computed
    pub fn current_period(&self) -> i64 {
        self.history.len() as i64
    }

    /// Close out a period: carry cash forward and record its acquisitions
    pub fn finalize(&mut self, acquired: u64, cash_balance: f64) {
        self.cash_balance = cash_balance;
        self.total_clients = self.total_clients.saturating_add(acquired);
        self.history.push(acquired);
    }
}
