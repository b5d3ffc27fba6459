//! Projection parameters and the fixed accrual allocation ratios

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Largest magnitude accepted for any monetary input
pub const MAX_AMOUNT: f64 = 1e15;

/// Ceiling on clients on the books. Once reached, no further clients are won.
///
/// 2^53 keeps every count exactly representable as f64 and keeps window sums
/// and running totals clear of u64 overflow.
pub const CLIENT_CAPACITY: u64 = 1 << 53;

/// Accrual allocation ratios applied to each period's revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationRatios {
    /// Share of revenue booked as cost of sales (0.30)
    #[serde(default = "default_cost_of_sales_ratio")]
    pub cost_of_sales: f64,

    /// Share of revenue after cost of sales booked as operations (0.50)
    #[serde(default = "default_half")]
    pub operations: f64,

    /// Share of the remainder after operations budgeted for sales & marketing (0.50)
    #[serde(default = "default_half")]
    pub marketing: f64,
}

fn default_cost_of_sales_ratio() -> f64 { 0.30 }
fn default_half() -> f64 { 0.50 }

impl Default for AllocationRatios {
    fn default() -> Self {
        Self {
            cost_of_sales: 0.30,
            operations: 0.50,
            marketing: 0.50,
        }
    }
}

impl AllocationRatios {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cost_of_sales", self.cost_of_sales),
            ("operations", self.operations),
            ("marketing", self.marketing),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Inputs for a single projection run
///
/// Every field has a serde default, so a JSON file only needs the values it
/// wants to change. Defaults reproduce the two-year model starting Aug 2025.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of monthly periods to project
    #[serde(default = "default_period_count")]
    pub period_count: u32,

    /// Revenue recognized (and cash received) every period regardless of acquisitions
    #[serde(default = "default_base_recurring_revenue")]
    pub base_recurring_revenue: f64,

    /// Total value of one client over its recognition window
    #[serde(default = "default_client_annual_value")]
    pub client_annual_value: f64,

    /// Periods over which a client's annual value is recognized evenly
    #[serde(default = "default_recognition_window")]
    pub recognition_window: u32,

    /// Periods after acquisition when the client's lump-sum payment arrives
    #[serde(default = "default_payment_delay")]
    pub payment_delay: u32,

    /// Cash cost of acquiring exactly one client
    #[serde(default = "default_cost_to_win")]
    pub cost_to_win: f64,

    /// Cash balance before period 0
    #[serde(default)]
    pub starting_cash: f64,

    /// Clients on the books before period 0
    #[serde(default)]
    pub starting_client_count: u64,

    /// Minimum permissible end-of-period cash balance (may be negative)
    #[serde(default = "default_cash_floor")]
    pub cash_floor: f64,

    #[serde(default)]
    pub ratios: AllocationRatios,

    /// Calendar month of period 0, used only for report labels
    #[serde(default = "default_start_month")]
    pub start_month: NaiveDate,
}

fn default_period_count() -> u32 { 24 }
fn default_base_recurring_revenue() -> f64 { 50_000.0 }
fn default_client_annual_value() -> f64 { 10_000.0 }
fn default_recognition_window() -> u32 { 12 }
fn default_payment_delay() -> u32 { 4 }
fn default_cost_to_win() -> f64 { 800.0 }
fn default_cash_floor() -> f64 { -100_000.0 }

fn default_start_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 1).unwrap_or_default()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            period_count: default_period_count(),
            base_recurring_revenue: default_base_recurring_revenue(),
            client_annual_value: default_client_annual_value(),
            recognition_window: default_recognition_window(),
            payment_delay: default_payment_delay(),
            cost_to_win: default_cost_to_win(),
            starting_cash: 0.0,
            starting_client_count: 0,
            cash_floor: default_cash_floor(),
            ratios: AllocationRatios::default(),
            start_month: default_start_month(),
        }
    }
}

impl ModelConfig {
    /// Revenue recognized per period for each client inside its window
    pub fn monthly_recognition(&self) -> f64 {
        self.client_annual_value / self.recognition_window as f64
    }

    /// Check every parameter. Must pass before a projection starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_count == 0 {
            return Err(ConfigError::ZeroPeriods);
        }
        if self.recognition_window == 0 {
            return Err(ConfigError::ZeroRecognitionWindow);
        }
        if self.payment_delay == 0 {
            return Err(ConfigError::ZeroPaymentDelay);
        }

        for (field, value) in [
            ("base_recurring_revenue", self.base_recurring_revenue),
            ("client_annual_value", self.client_annual_value),
            ("cost_to_win", self.cost_to_win),
            ("starting_cash", self.starting_cash),
            ("cash_floor", self.cash_floor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value.abs() > MAX_AMOUNT {
                return Err(ConfigError::AmountTooLarge { field, value });
            }
        }
        if self.starting_client_count > CLIENT_CAPACITY {
            return Err(ConfigError::ClientCapacityExceeded(self.starting_client_count));
        }

        if self.cost_to_win <= 0.0 {
            return Err(ConfigError::NonPositiveCostToWin(self.cost_to_win));
        }
        for (field, value) in [
            ("base_recurring_revenue", self.base_recurring_revenue),
            ("client_annual_value", self.client_annual_value),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeAmount { field, value });
            }
        }

        self.ratios.validate()
    }
}
