//! Settings-sheet extraction

use crate::types::{Grid, SettingsTable};

/// Fold a two-column sheet into the settings table.
///
/// Column 0 is the candidate key, column 1 the value. Rows with fewer than
/// two cells, or with a blank trimmed key, are skipped silently. Keys are
/// compared by exact trimmed equality (no case folding); on duplicates the
/// last row in grid order wins.
pub fn extract_settings(grid: &Grid) -> SettingsTable {
    grid.rows.iter().fold(SettingsTable::new(), |mut table, row| {
        if row.len() < 2 {
            return table;
        }
        let key = row[0].label();
        if key.is_empty() {
            return table;
        }
        table.insert(key, row[1].to_scalar());
        table
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Scalar};

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_two_column_rows_become_entries() {
        let grid = Grid::new(vec![
            vec![text("Currency"), text("PLN")],
            vec![text("VAT"), text("23")],
        ]);
        let table = extract_settings(&grid);

        assert_eq!(table.len(), 2);
        assert_eq!(table["Currency"], Scalar::Text("PLN".to_string()));
        assert_eq!(table["VAT"], Scalar::Text("23".to_string()));
    }

    #[test]
    fn test_short_and_blank_key_rows_are_skipped() {
        let grid = Grid::new(vec![
            vec![text("only-key")],
            vec![text("   "), text("ignored")],
            vec![Cell::Empty, text("ignored")],
            vec![text("kept"), Cell::Number(7.0)],
        ]);
        let table = extract_settings(&grid);

        assert_eq!(table.len(), 1);
        assert_eq!(table["kept"], Scalar::Number(7.0));
    }

    #[test]
    fn test_duplicate_keys_last_row_wins() {
        let grid = Grid::new(vec![
            vec![text("Margin"), Cell::Number(10.0)],
            vec![text("Margin"), Cell::Number(12.0)],
        ]);
        let table = extract_settings(&grid);

        assert_eq!(table["Margin"], Scalar::Number(12.0));
    }

    #[test]
    fn test_keys_are_trimmed_but_values_stay_raw() {
        let grid = Grid::new(vec![vec![text("  Currency  "), text(" PLN ")]]);
        let table = extract_settings(&grid);

        assert_eq!(table["Currency"], Scalar::Text(" PLN ".to_string()));
    }
}
