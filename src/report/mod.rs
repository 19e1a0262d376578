//! Extract performance metrics from the latest session report.
//!
//! The toolchain appends one row per stage to `report.csv`; only the final
//! row describes the completed run, so earlier rows are ignored.

use std::path::Path;

use csv::StringRecord;

use crate::{
    cli::ModeRequest,
    lib::{errors::ReportError, workspace},
};

pub const RUN_CYCLES_COLUMN: &str = "Run Cycles";
pub const RUN_INSTRUCTIONS_COLUMN: &str = "Run Instructions";
pub const RUN_CPI_COLUMN: &str = "Run CPI";

/// Performance counters of one simulated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    pub run_cycles: u64,
    pub run_instructions: u64,
    pub run_cpi: f64,
}

/// Collect metrics after a successful run. Deploy runs produce no report, so
/// the filesystem is not consulted at all for them.
pub fn collect_metrics(
    workspace_root: &Path,
    mode: &ModeRequest,
) -> Result<Option<RunMetrics>, ReportError> {
    match mode {
        ModeRequest::Deploy { .. } => Ok(None),
        ModeRequest::Simulate { .. } => parse_latest_report(workspace_root).map(Some),
    }
}

/// Read the last data row of the latest session report.
pub fn parse_latest_report(workspace_root: &Path) -> Result<RunMetrics, ReportError> {
    if !workspace_root.is_dir() {
        return Err(ReportError::WorkspaceMissing {
            path: workspace_root.to_path_buf(),
        });
    }

    let path = workspace::latest_report_path(workspace_root);
    let mut reader = csv::Reader::from_path(&path).map_err(|source| ReportError::Open {
        path: path.clone(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| ReportError::Read {
            path: path.clone(),
            source,
        })?
        .clone();

    let mut last: Option<StringRecord> = None;
    for record in reader.records() {
        last = Some(record.map_err(|source| ReportError::Read {
            path: path.clone(),
            source,
        })?);
    }
    let row = last.ok_or_else(|| ReportError::NoRows { path: path.clone() })?;

    Ok(RunMetrics {
        run_cycles: field(&path, &headers, &row, RUN_CYCLES_COLUMN)?,
        run_instructions: field(&path, &headers, &row, RUN_INSTRUCTIONS_COLUMN)?,
        run_cpi: field(&path, &headers, &row, RUN_CPI_COLUMN)?,
    })
}

fn field<T: std::str::FromStr>(
    path: &Path,
    headers: &StringRecord,
    row: &StringRecord,
    column: &'static str,
) -> Result<T, ReportError> {
    let index = headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| ReportError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })?;
    let value = row.get(index).ok_or_else(|| ReportError::MissingColumn {
        path: path.to_path_buf(),
        column,
    })?;
    value
        .trim()
        .parse()
        .map_err(|_| ReportError::InvalidValue {
            path: path.to_path_buf(),
            column,
            value: value.to_string(),
        })
}
