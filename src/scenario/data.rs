use serde::Deserialize;

use crate::config::ModelConfig;

/// Named set of overrides applied on top of a base config
///
/// Empty or missing columns keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub period_count: Option<u32>,
    #[serde(default)]
    pub base_recurring_revenue: Option<f64>,
    #[serde(default)]
    pub client_annual_value: Option<f64>,
    #[serde(default)]
    pub recognition_window: Option<u32>,
    #[serde(default)]
    pub payment_delay: Option<u32>,
    #[serde(default)]
    pub cost_to_win: Option<f64>,
    #[serde(default)]
    pub starting_cash: Option<f64>,
    #[serde(default)]
    pub cash_floor: Option<f64>,
}

impl Scenario {
    /// Base config with this scenario's overrides applied. Not validated.
    pub fn apply(&self, base: &ModelConfig) -> ModelConfig {
        let mut config = base.clone();
        if let Some(v) = self.period_count { config.period_count = v; }
        if let Some(v) = self.base_recurring_revenue { config.base_recurring_revenue = v; }
        if let Some(v) = self.client_annual_value { config.client_annual_value = v; }
        if let Some(v) = self.recognition_window { config.recognition_window = v; }
        if let Some(v) = self.payment_delay { config.payment_delay = v; }
        if let Some(v) = self.cost_to_win { config.cost_to_win = v; }
        if let Some(v) = self.starting_cash { config.starting_cash = v; }
        if let Some(v) = self.cash_floor { config.cash_floor = v; }
        config
    }
}
