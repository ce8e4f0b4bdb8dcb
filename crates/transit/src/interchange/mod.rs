//! CSV import and export of routes and service ridership.
//!
//! Both formats are header-addressed, so column order in input files does not
//! matter. Rows that cannot be used are skipped with a warning and counted in
//! the returned [`ImportReport`]; I/O and CSV framing errors abort.

use std::fmt;

use crate::models::types::*;

pub mod route_csv;
pub mod service_csv;

pub use route_csv::{export_routes, import_routes, RouteRow};
pub use service_csv::{export_services, import_services, ServiceRow};

/// Outcome of one import
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data rows read, header excluded
    pub rows: usize,
    pub skipped: usize,
    /// Paths replaced (routes) or services created (services)
    pub groups: usize,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.rows - self.skipped
    }

    fn skip(&mut self, line: Option<u64>, reason: impl fmt::Display) {
        self.skipped += 1;
        match line {
            Some(line) => log::warn!("skipping line {line}: {reason}"),
            None => log::warn!("skipping row: {reason}"),
        }
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} imported, {} skipped, {} groups",
            self.rows,
            self.imported(),
            self.skipped,
            self.groups
        )
    }
}

fn reader<R: std::io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn require_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<()> {
    match required.iter().find(|name| !headers.iter().any(|h| h == **name)) {
        Some(missing) => Err(TransitError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}
