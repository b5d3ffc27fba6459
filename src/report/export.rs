//! CSV export of a report table
//!
//! Layout mirrors the terminal table: a header line with an empty corner cell
//! followed by the month labels, then one line per metric.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use thiserror::Error;

use super::ReportTable;

/// Default output file name
pub const DEFAULT_EXPORT_PATH: &str = "Financial_model.csv";

/// Failure reading or writing a report or scenario file
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the table to a CSV file, replacing any existing file
pub fn write_csv<P: AsRef<Path>>(table: &ReportTable, path: P) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv_to_writer(table, file)?;
    info!("Wrote {} metrics x {} periods to {}", table.rows().len(), table.columns().len(), path.display());
    Ok(())
}

/// Write the table as CSV to any writer
pub fn write_csv_to_writer<W: Write>(table: &ReportTable, writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(String::new());
    header.extend(table.columns().iter().cloned());
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.label.to_string());
        record.extend(row.cells.iter().map(|c| c.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
