//! Metric-by-period report table
//!
//! Rows are metrics, columns are periods. Money is rounded to cents here and
//! nowhere else; the projection itself stays unrounded.

use std::fmt;

use crate::projection::{Metric, PeriodRow, ProjectionResult};

/// Single formatted table value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportCell {
    /// Monetary amount, already rounded to 2 decimal places
    Money(f64),
    Count(u64),
}

impl ReportCell {
    fn from_row(metric: Metric, row: &PeriodRow) -> Self {
        match metric.count(row) {
            Some(n) => ReportCell::Count(n),
            None => ReportCell::Money(round_cents(metric.value(row))),
        }
    }
}

impl fmt::Display for ReportCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportCell::Money(v) => write!(f, "{:.2}", v),
            ReportCell::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Round to cents, folding negative zero into zero
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub label: &'static str,
    pub cells: Vec<ReportCell>,
}

#[derive(Debug, Clone)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Build the table; periods without a label get `P<index>`
    pub fn build(result: &ProjectionResult, labels: &[String]) -> Self {
        let columns = (0..result.len())
            .map(|i| labels.get(i).cloned().unwrap_or_else(|| format!("P{}", i)))
            .collect();

        let rows = Metric::ALL
            .iter()
            .map(|&metric| ReportRow {
                label: metric.label(),
                cells: result
                    .rows
                    .iter()
                    .map(|row| ReportCell::from_row(metric, row))
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn row(&self, metric: Metric) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.label == metric.label())
    }

    /// Fixed-width text rendering for the terminal
    pub fn render(&self) -> String {
        let label_width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        let formatted: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.to_string()).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                formatted
                    .iter()
                    .filter_map(|cells| cells.get(i).map(String::len))
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{:<label_width$}", ""));
        for (header, width) in self.columns.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {:>width$}", header));
        }
        out.push('\n');

        for (row, cells) in self.rows.iter().zip(&formatted) {
            out.push_str(&format!("{:<label_width$}", row.label));
            for (cell, width) in cells.iter().zip(widths.iter().copied()) {
                out.push_str(&format!("  {:>width$}", cell));
            }
            out.push('\n');
        }
        out
    }
}
