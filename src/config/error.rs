use thiserror::Error;

/// Rejected configuration. Raised before any period is computed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("period count must be at least 1")]
    ZeroPeriods,

    #[error("recognition window must be at least 1 period")]
    ZeroRecognitionWindow,

    #[error("payment delay must be at least 1 period")]
    ZeroPaymentDelay,

    #[error("cost to win must be positive, got {0}")]
    NonPositiveCostToWin(f64),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} magnitude must not exceed 1e15, got {value}")]
    AmountTooLarge { field: &'static str, value: f64 },

    #[error("starting client count {0} exceeds the client capacity of 2^53")]
    ClientCapacityExceeded(u64),

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} ratio must lie in [0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
