//! Main projection engine
//!
//! Each period runs the same six steps, strictly in order:
//! 1. Revenue: base recurring revenue plus the recognized share of every
//!    acquisition still inside the trailing recognition window
//! 2. Accrual split of that revenue into cost of sales, operations,
//!    planned sales & marketing and net profit
//! 3. Cash receipts: base revenue plus lump sums from clients won
//!    `payment_delay` periods ago
//! 4. Admission control: spend the planned budget in whole clients, but
//!    never enough to push cash below the floor
//! 5. Cash out and the new balance
//! 6. Running client total
//!
//! A period's own acquisitions are decided after its revenue is recognized,
//! so they first contribute revenue in the following period.
//!
//! Clients on the books never exceed `CLIENT_CAPACITY`; once it is reached
//! the engine stops acquiring and every later period runs on recognized
//! revenue and receipts alone.

use log::{debug, info, warn};

use super::{PeriodRow, ProjectionResult, ProjectionState};
use crate::config::{ConfigError, ModelConfig, CLIENT_CAPACITY};

/// Accrual allocation of one period's revenue
#[derive(Debug, Clone, Copy, PartialEq)]
struct AccrualSplit {
    cost_of_sales: f64,
    operations_cost: f64,
    planned_marketing: f64,
    net_profit: f64,
}

/// Runs the acquisition recurrence for a validated configuration
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ModelConfig,
}

impl ProjectionEngine {
    /// Validate the config up front; an engine never holds invalid parameters
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Project every period from the starting position
    pub fn project(&self) -> ProjectionResult {
        let periods = self.config.period_count as usize;
        info!(
            "Projecting {} periods: base revenue {:.2}, cost to win {:.2}, cash floor {:.2}",
            periods, self.config.base_recurring_revenue, self.config.cost_to_win, self.config.cash_floor
        );

        let mut state = ProjectionState::new(
            self.config.starting_cash,
            self.config.starting_client_count,
            periods,
        );
        let rows: Vec<PeriodRow> = (0..periods).map(|_| self.step(&mut state)).collect();

        info!(
            "Projection complete: {} clients, ending cash {:.2}",
            state.total_clients, state.cash_balance
        );
        ProjectionResult { rows }
    }

    /// Compute the next period from the carried state and finalize it
    fn step(&self, state: &mut ProjectionState) -> PeriodRow {
        let cfg = &self.config;
        let period = state.current_period();

        // 1) Revenue from the trailing window of recorded acquisitions
        let recognizing = state.history.window_sum(period, cfg.recognition_window);
        let revenue = cfg.base_recurring_revenue + recognizing as f64 * cfg.monthly_recognition();

        // 2) Accrual split
        let split = self.split_revenue(revenue);

        // 3) Receipts, including lump sums falling due this period
        let paying = state.history.get(period - i64::from(cfg.payment_delay));
        let cash_in = cfg.base_recurring_revenue + paying as f64 * cfg.client_annual_value;

        // 4) Admission control against the cash floor
        let cash_out_before_spend = split.cost_of_sales + split.operations_cost;
        let raw_headroom =
            (state.cash_balance + cash_in - cash_out_before_spend) - cfg.cash_floor;
        if raw_headroom < 0.0 {
            warn!(
                "Period {}: cash would sit {:.2} below the floor before any spend; no acquisitions",
                period, -raw_headroom
            );
        }
        let headroom = raw_headroom.max(0.0);
        let spend_cap = split.planned_marketing.min(headroom);
        // Float-to-int casts saturate; capacity bounds the count from there
        let affordable = (spend_cap / cfg.cost_to_win).floor() as u64;
        let remaining = CLIENT_CAPACITY.saturating_sub(state.total_clients);
        if affordable > remaining && remaining > 0 {
            warn!(
                "Period {}: client capacity of {} reached; acquisitions stop here",
                period, CLIENT_CAPACITY
            );
        }
        let acquired = affordable.min(remaining);
        let actual_marketing_spend = acquired as f64 * cfg.cost_to_win;
        let cash_constrained = (headroom / cfg.cost_to_win).floor()
            < (split.planned_marketing / cfg.cost_to_win).floor();

        // 5) Cash out and balance
        let cash_out = cash_out_before_spend + actual_marketing_spend;
        let cash_balance = state.cash_balance + cash_in - cash_out;

        // 6) Carry state forward
        state.finalize(acquired, cash_balance);

        debug!(
            "Period {}: revenue {:.2}, planned S&M {:.2}, headroom {:.2}, acquired {}, cash {:.2}",
            period, revenue, split.planned_marketing, headroom, acquired, cash_balance
        );

        PeriodRow {
            period: period as u32,
            revenue,
            cost_of_sales: split.cost_of_sales,
            operations_cost: split.operations_cost,
            planned_marketing: split.planned_marketing,
            actual_marketing_spend,
            net_profit: split.net_profit,
            acquired,
            total_clients: state.total_clients,
            cash_in,
            cash_out,
            cash_balance,
            cash_constrained,
        }
    }

    fn split_revenue(&self, revenue: f64) -> AccrualSplit {
        let ratios = &self.config.ratios;
        let cost_of_sales = ratios.cost_of_sales * revenue;
        let operations_cost = ratios.operations * (revenue - cost_of_sales);
        let planned_marketing = ratios.marketing * (revenue - cost_of_sales - operations_cost);
        AccrualSplit {
            cost_of_sales,
            operations_cost,
            planned_marketing,
            net_profit: revenue - cost_of_sales - operations_cost - planned_marketing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationRatios;
    use crate::projection::Metric;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    /// Absolute slack plus rounding proportional to the magnitudes involved
    fn tol(scale: f64) -> f64 {
        EPS + 1e-9 * scale
    }

    fn engine(config: ModelConfig) -> ProjectionEngine {
        ProjectionEngine::new(config).expect("valid config")
    }

    #[test]
    fn test_first_period_matches_worked_example() {
        let result = engine(ModelConfig::default()).project();
        let p0 = &result.rows[0];

        assert_relative_eq!(p0.revenue, 50_000.0);
        assert_relative_eq!(p0.cost_of_sales, 15_000.0);
        assert_relative_eq!(p0.operations_cost, 17_500.0);
        assert_relative_eq!(p0.planned_marketing, 8_750.0);
        assert_relative_eq!(p0.net_profit, 8_750.0);
        assert_relative_eq!(p0.cash_in, 50_000.0);
        assert_eq!(p0.acquired, 10);
        assert_relative_eq!(p0.actual_marketing_spend, 8_000.0);
        assert_relative_eq!(p0.cash_out, 40_500.0);
        assert_relative_eq!(p0.cash_balance, 9_500.0);
        assert_eq!(p0.total_clients, 10);
        assert!(!p0.cash_constrained);
    }

    #[test]
    fn test_second_period_recognizes_first_period_clients() {
        let result = engine(ModelConfig::default()).project();
        let p1 = &result.rows[1];

        assert_relative_eq!(p1.revenue, 50_000.0 + 10.0 * 10_000.0 / 12.0, epsilon = EPS);
        assert_relative_eq!(p1.cost_of_sales, 0.30 * p1.revenue, epsilon = EPS);
        assert_relative_eq!(p1.planned_marketing, 0.175 * p1.revenue, epsilon = EPS);
        // 10208.33 budget buys 12 clients at 800
        assert_eq!(p1.acquired, 12);
        assert_eq!(p1.total_clients, 22);
    }

    #[test]
    fn test_lump_sum_arrives_after_payment_delay() {
        let result = engine(ModelConfig::default()).project();
        assert_eq!(result.rows[0].acquired, 10);

        for i in 0..4 {
            assert_relative_eq!(result.rows[i].cash_in, 50_000.0);
        }
        assert_relative_eq!(result.rows[4].cash_in, 50_000.0 + 10.0 * 10_000.0);
        let expected_p5 = 50_000.0 + result.rows[1].acquired as f64 * 10_000.0;
        assert_relative_eq!(result.rows[5].cash_in, expected_p5);
    }

    #[test]
    fn test_window_boundary_drops_oldest_period() {
        let cfg = ModelConfig::default();
        let recognition = cfg.monthly_recognition();
        let base = cfg.base_recurring_revenue;
        let eng = engine(cfg);

        // Only period 0 acquired anything; period 11 still recognizes it
        let mut state = ProjectionState::new(0.0, 0, 13);
        state.finalize(10, 0.0);
        for _ in 1..11 {
            state.finalize(0, 0.0);
        }
        let mut at_eleven = state.clone();
        let p11 = eng.step(&mut at_eleven);
        assert_eq!(p11.period, 11);
        assert_relative_eq!(p11.revenue, base + 10.0 * recognition, epsilon = EPS);

        // Period 12's window is [1, 12]; period 0 has dropped out
        state.finalize(0, 0.0);
        let p12 = eng.step(&mut state);
        assert_eq!(p12.period, 12);
        assert_relative_eq!(p12.revenue, base);
    }

    #[test]
    fn test_no_acquisitions_when_budget_below_unit_cost() {
        let cfg = ModelConfig {
            cost_to_win: 1_000_000.0,
            starting_client_count: 40,
            ..Default::default()
        };
        let result = engine(cfg).project();

        assert_eq!(result.len(), 24);
        for row in &result.rows {
            assert_eq!(row.acquired, 0);
            assert_eq!(row.total_clients, 40);
            assert_eq!(row.actual_marketing_spend, 0.0);
            assert_relative_eq!(row.revenue, 50_000.0);
        }
    }

    #[test]
    fn test_cash_floor_limits_spend() {
        // Planned budget is 8750 but only 2000 sits above the floor
        let cfg = ModelConfig {
            cash_floor: 15_500.0,
            ..Default::default()
        };
        let result = engine(cfg).project();
        let p0 = &result.rows[0];

        assert!(p0.cash_constrained);
        assert_eq!(p0.acquired, 2);
        assert_relative_eq!(p0.actual_marketing_spend, 1_600.0);
        assert_relative_eq!(p0.cash_balance, 15_900.0);
        assert!(p0.cash_balance >= 15_500.0);
    }

    #[test]
    fn test_floor_below_budget_without_changing_client_count() {
        // Headroom 8700 against a budget of 8750 still buys 10 clients at 800
        let cfg = ModelConfig { cash_floor: 8_800.0, ..Default::default() };
        let p0 = engine(cfg).project().rows[0].clone();
        assert_eq!(p0.acquired, 10);
        assert!(!p0.cash_constrained);

        // Headroom 7900 only buys 9
        let cfg = ModelConfig { cash_floor: 9_600.0, ..Default::default() };
        let p0 = engine(cfg).project().rows[0].clone();
        assert_eq!(p0.acquired, 9);
        assert!(p0.cash_constrained);
    }

    #[test]
    fn test_custom_allocation_ratios() {
        let cfg = ModelConfig {
            ratios: AllocationRatios {
                cost_of_sales: 0.2,
                operations: 0.4,
                marketing: 0.55,
            },
            ..Default::default()
        };
        let p0 = engine(cfg).project().rows[0].clone();

        // 50000 revenue: 10000 cos, 0.4 * 40000 ops, 0.55 * 24000 budget
        assert_relative_eq!(p0.cost_of_sales, 10_000.0, epsilon = EPS);
        assert_relative_eq!(p0.operations_cost, 16_000.0, epsilon = EPS);
        assert_relative_eq!(p0.planned_marketing, 13_200.0, epsilon = EPS);
        assert_relative_eq!(p0.net_profit, 10_800.0, epsilon = EPS);
        // 13200 / 800 = 16.5, floored
        assert_eq!(p0.acquired, 16);
        assert_relative_eq!(p0.actual_marketing_spend, 12_800.0);
        assert_relative_eq!(p0.cash_out, 38_800.0, epsilon = EPS);
        assert_relative_eq!(p0.cash_balance, 11_200.0, epsilon = EPS);
    }

    #[test]
    fn test_breach_persists_without_spending() {
        // Start 200k below a -100k floor; receipts exceed payments by 17.5k a period
        let cfg = ModelConfig {
            starting_cash: -300_000.0,
            period_count: 6,
            ..Default::default()
        };
        let result = engine(cfg).project();

        for row in &result.rows {
            assert_eq!(row.acquired, 0);
            assert!(row.cash_balance < -100_000.0);
        }
        assert_relative_eq!(result.rows[5].cash_balance, -300_000.0 + 6.0 * 17_500.0);
    }

    #[test]
    fn test_breach_recovers_from_receipts() {
        let cfg = ModelConfig {
            starting_cash: -110_000.0,
            period_count: 3,
            ..Default::default()
        };
        let result = engine(cfg).project();

        // 10k under the floor, but the period's 17.5k surplus leaves 7.5k of headroom
        assert_eq!(result.rows[0].acquired, 9);
        assert!(result.rows[0].cash_balance >= -100_000.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_projection() {
        let cfg = ModelConfig { cost_to_win: 0.0, ..Default::default() };
        assert!(ProjectionEngine::new(cfg).is_err());

        let cfg = ModelConfig { period_count: 0, ..Default::default() };
        assert!(ProjectionEngine::new(cfg).is_err());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let eng = engine(ModelConfig::default());
        let a = eng.project();
        let b = eng.project();
        assert_eq!(a.acquisitions(), b.acquisitions());
        assert_eq!(a.series(Metric::CashBalance), b.series(Metric::CashBalance));
    }

    fn row_is_finite(row: &PeriodRow) -> bool {
        Metric::ALL.iter().all(|m| m.value(row).is_finite())
    }

    fn assert_bounded(result: &ProjectionResult, starting_clients: u64) {
        let mut clients = starting_clients;
        for row in &result.rows {
            assert!(row_is_finite(row), "non-finite value in period {}", row.period);
            assert!(row.total_clients >= clients);
            assert!(row.total_clients <= CLIENT_CAPACITY);
            assert!(row.actual_marketing_spend <= row.planned_marketing + tol(row.planned_marketing));
            clients = row.total_clients;
        }
    }

    #[test]
    fn test_thirty_year_horizon_stops_at_capacity() {
        let cfg = ModelConfig { period_count: 360, ..Default::default() };
        let result = engine(cfg).project();

        assert_eq!(result.len(), 360);
        assert_bounded(&result, 0);
        assert_eq!(result.rows[359].total_clients, CLIENT_CAPACITY);
        assert_eq!(result.rows[359].acquired, 0);
    }

    #[test]
    fn test_tiny_cost_to_win_stays_bounded() {
        let cfg = ModelConfig { cost_to_win: 0.01, ..Default::default() };
        let result = engine(cfg).project();

        assert_bounded(&result, 0);
        // 8750 / 0.01 clients in the first period alone
        assert!(result.rows[0].acquired > 800_000);
        assert_eq!(result.rows[23].total_clients, CLIENT_CAPACITY);
    }

    #[test]
    fn test_fast_growth_corner_stays_bounded() {
        let cfg = ModelConfig {
            period_count: 47,
            cost_to_win: 50.0,
            client_annual_value: 40_000.0,
            recognition_window: 24,
            payment_delay: 1,
            ..Default::default()
        };
        let result = engine(cfg).project();

        assert_bounded(&result, 0);
        assert_eq!(result.rows[46].total_clients, CLIENT_CAPACITY);
    }

    #[test]
    fn test_starting_at_capacity_acquires_nothing() {
        let cfg = ModelConfig {
            starting_client_count: CLIENT_CAPACITY,
            period_count: 3,
            ..Default::default()
        };
        let result = engine(cfg).project();

        assert!(result.rows.iter().all(|r| r.acquired == 0));
        assert_relative_eq!(result.rows[0].cash_balance, 17_500.0);
    }

    fn arb_config() -> impl Strategy<Value = ModelConfig> {
        (
            (1u32..36, 0.0f64..200_000.0, 0.0f64..40_000.0, 1u32..24, 1u32..9),
            (50.0f64..5_000.0, -100_000.0f64..100_000.0, 0u64..200, -250_000.0f64..50_000.0),
        )
            .prop_map(
                |(
                    (period_count, base, annual, window, delay),
                    (cost_to_win, starting_cash, starting_clients, floor),
                )| ModelConfig {
                    period_count,
                    base_recurring_revenue: base,
                    client_annual_value: annual,
                    recognition_window: window,
                    payment_delay: delay,
                    cost_to_win,
                    starting_cash,
                    starting_client_count: starting_clients,
                    cash_floor: floor,
                    ..Default::default()
                },
            )
    }

    proptest! {
        #[test]
        fn floor_never_newly_breached(cfg in arb_config()) {
            let floor = cfg.cash_floor;
            let mut prior = cfg.starting_cash;
            let result = engine(cfg).project();
            for row in &result.rows {
                if prior >= floor {
                    let scale = prior.abs() + floor.abs() + row.cash_in + row.cash_out;
                    prop_assert!(row.cash_balance >= floor - tol(scale));
                }
                prior = row.cash_balance;
            }
        }

        #[test]
        fn spend_is_whole_clients_within_budget(cfg in arb_config()) {
            let cost = cfg.cost_to_win;
            let result = engine(cfg).project();
            for row in &result.rows {
                prop_assert_eq!(row.actual_marketing_spend, row.acquired as f64 * cost);
                prop_assert!(row.actual_marketing_spend <= row.planned_marketing + tol(row.planned_marketing));
            }
        }

        #[test]
        fn clients_and_cash_accumulate(cfg in arb_config()) {
            let mut clients = cfg.starting_client_count;
            let mut cash = cfg.starting_cash;
            let result = engine(cfg).project();
            for row in &result.rows {
                prop_assert!(row.total_clients >= clients);
                prop_assert_eq!(row.total_clients, clients + row.acquired);
                prop_assert!(row.total_clients <= CLIENT_CAPACITY);
                let scale = cash.abs() + row.cash_in + row.cash_out;
                prop_assert!((row.cash_balance - (cash + row.cash_in - row.cash_out)).abs() <= tol(scale));
                clients = row.total_clients;
                cash = row.cash_balance;
            }
        }

        #[test]
        fn revenue_comes_from_window_only(cfg in arb_config()) {
            let window = cfg.recognition_window as usize;
            let base = cfg.base_recurring_revenue;
            let per_client = cfg.monthly_recognition();
            let result = engine(cfg).project();
            let acquired = result.acquisitions();
            for (i, row) in result.rows.iter().enumerate() {
                let start = (i + 1).saturating_sub(window);
                // Period i's own clients are won after its revenue is booked
                let in_window: u64 = acquired[start..i].iter().sum();
                let expected = base + in_window as f64 * per_client;
                prop_assert!((row.revenue - expected).abs() <= tol(expected));
                prop_assert!(row_is_finite(row));
            }
        }
    }
}
