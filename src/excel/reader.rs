//! Workbook loading and sheet→grid conversion

use crate::error::{PricebookError, PricebookResult};
use crate::types::{Cell, Grid};
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use std::path::Path;
use tracing::debug;

/// A loaded workbook: every sheet materialized as a grid, in workbook order.
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<(String, Grid)>,
}

impl Workbook {
    /// Open and fully materialize a workbook.
    ///
    /// Fails with `SourceNotFound` when the path does not exist and with
    /// `UnreadableFormat` when the bytes cannot be parsed as a spreadsheet.
    pub fn open<P: AsRef<Path>>(path: P) -> PricebookResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PricebookError::SourceNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: XlsxError| PricebookError::UnreadableFormat {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names().to_vec() {
            if let Ok(range) = workbook.worksheet_range(&sheet_name) {
                let grid = grid_from_range(&range);
                debug!(
                    sheet = %sheet_name,
                    rows = grid.row_count(),
                    "materialized sheet"
                );
                sheets.push((sheet_name, grid));
            }
        }

        Ok(Self { sheets })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a sheet's grid by name: exact match first, then
    /// case-insensitive. A missing sheet is absence, not an error.
    pub fn grid(&self, name: &str) -> Option<&Grid> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .or_else(|| {
                self.sheets
                    .iter()
                    .find(|(sheet, _)| sheet.eq_ignore_ascii_case(name))
            })
            .map(|(_, grid)| grid)
    }

    /// First grid matching any of the candidate sheet names, in candidate
    /// order.
    pub fn grid_for<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&Grid> {
        candidates.iter().find_map(|name| self.grid(name.as_ref()))
    }
}

/// Convert a calamine range into a grid: native scalar types preserved,
/// missing cells blank, blank trailing rows dropped.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let mut rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    while rows.last().is_some_and(|row| row.iter().all(Cell::is_blank)) {
        rows.pop();
    }

    Grid::new(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}
