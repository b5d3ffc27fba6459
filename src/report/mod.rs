//! Presentation of projection results: month labels, tables and CSV export

pub mod calendar;
pub mod table;
pub mod export;

pub use calendar::month_labels;
pub use table::{round_cents, ReportCell, ReportRow, ReportTable};
pub use export::{write_csv, write_csv_to_writer, ReportError};
