//! Per-period output rows and projection results

use serde::Serialize;

/// Single period's accrual and cash figures. Values are unrounded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PeriodRow {
    /// Period index, starting at 0
    pub period: u32,

    // Accrual view
    pub revenue: f64,
    pub cost_of_sales: f64,
    pub operations_cost: f64,
    /// Sales & marketing budget set by the allocation ratios
    pub planned_marketing: f64,
    /// Cash actually spent winning clients (whole multiples of cost to win)
    pub actual_marketing_spend: f64,
    /// Net profit after the planned (not actual) marketing budget
    pub net_profit: f64,

    // Clients
    pub acquired: u64,
    pub total_clients: u64,

    // Cash view
    pub cash_in: f64,
    pub cash_out: f64,
    pub cash_balance: f64,

    /// True when the cash floor left room for fewer whole clients than the budget
    pub cash_constrained: bool,
}

/// Reportable series, in report row order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Revenue,
    CostOfSales,
    OperationsCost,
    PlannedMarketing,
    ActualMarketing,
    NetProfit,
    NewClients,
    TotalClients,
    CashIn,
    CashOut,
    CashBalance,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Revenue,
        Metric::CostOfSales,
        Metric::OperationsCost,
        Metric::PlannedMarketing,
        Metric::ActualMarketing,
        Metric::NetProfit,
        Metric::NewClients,
        Metric::TotalClients,
        Metric::CashIn,
        Metric::CashOut,
        Metric::CashBalance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Revenue => "Monthly Revenue",
            Metric::CostOfSales => "Cost of Sales",
            Metric::OperationsCost => "Operations Cost",
            Metric::PlannedMarketing => "Planned Sales & Marketing (Budget)",
            Metric::ActualMarketing => "Actual Sales & Marketing (Spent)",
            Metric::NetProfit => "Net Profit (Accrual)",
            Metric::NewClients => "New Clients Acquired",
            Metric::TotalClients => "Total Clients",
            Metric::CashIn => "Cash In (Receipts)",
            Metric::CashOut => "Cash Out (Payments)",
            Metric::CashBalance => "Cash Balance",
        }
    }

    /// Client counts; everything else is money
    pub fn is_count(self) -> bool {
        matches!(self, Metric::NewClients | Metric::TotalClients)
    }

    /// Exact count for client metrics, `None` for money
    pub fn count(self, row: &PeriodRow) -> Option<u64> {
        match self {
            Metric::NewClients => Some(row.acquired),
            Metric::TotalClients => Some(row.total_clients),
            _ => None,
        }
    }

    pub fn value(self, row: &PeriodRow) -> f64 {
        match self {
            Metric::Revenue => row.revenue,
            Metric::CostOfSales => row.cost_of_sales,
            Metric::OperationsCost => row.operations_cost,
            Metric::PlannedMarketing => row.planned_marketing,
            Metric::ActualMarketing => row.actual_marketing_spend,
            Metric::NetProfit => row.net_profit,
            Metric::NewClients => row.acquired as f64,
            Metric::TotalClients => row.total_clients as f64,
            Metric::CashIn => row.cash_in,
            Metric::CashOut => row.cash_out,
            Metric::CashBalance => row.cash_balance,
        }
    }
}

/// Headline figures for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectionSummary {
    pub periods: u32,
    pub total_acquired: u64,
    pub ending_total_clients: u64,
    pub ending_cash_balance: f64,
    pub min_cash_balance: f64,
    pub min_cash_period: u32,
    pub cumulative_revenue: f64,
    pub cumulative_net_profit: f64,
    pub cumulative_planned_marketing: f64,
    pub cumulative_actual_marketing: f64,
    /// Periods where the cash floor cost at least one client the budget allowed
    pub cash_constrained_periods: u32,
}

/// Complete output of one projection run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    pub rows: Vec<PeriodRow>,
}

impl ProjectionResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One metric across every period
    pub fn series(&self, metric: Metric) -> Vec<f64> {
        self.rows.iter().map(|row| metric.value(row)).collect()
    }

    /// New clients by period
    pub fn acquisitions(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.acquired).collect()
    }

    pub fn summary(&self) -> ProjectionSummary {
        let mut summary = ProjectionSummary {
            periods: self.rows.len() as u32,
            min_cash_balance: f64::INFINITY,
            ..Default::default()
        };

        for row in &self.rows {
            summary.total_acquired += row.acquired;
            summary.cumulative_revenue += row.revenue;
            summary.cumulative_net_profit += row.net_profit;
            summary.cumulative_planned_marketing += row.planned_marketing;
            summary.cumulative_actual_marketing += row.actual_marketing_spend;
            if row.cash_constrained {
                summary.cash_constrained_periods += 1;
            }
            if row.cash_balance < summary.min_cash_balance {
                summary.min_cash_balance = row.cash_balance;
                summary.min_cash_period = row.period;
            }
        }

        if let Some(last) = self.rows.last() {
            summary.ending_total_clients = last.total_clients;
            summary.ending_cash_balance = last.cash_balance;
        } else {
            summary.min_cash_balance = 0.0;
        }

        summary
    }
}
