use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

//==============================================================================
// Raw Grid Types
//==============================================================================

/// A raw cell value as read from a sheet.
///
/// Missing cells materialize as `Empty`, and `Empty` renders as an empty
/// string, so label handling downstream never has to deal with absence.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Text cell, stored verbatim (trimming happens at label time)
    Text(String),
    /// Numeric cell, kept in its native scalar form
    Number(f64),
    /// Blank or absent cell
    #[default]
    Empty,
}

impl Cell {
    /// Render the cell as a lookup label: trimmed text, or the shortest
    /// decimal form for numbers (`5.0` → `"5"`). Blank cells give `""`.
    pub fn label(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }

    /// A cell is blank when it is empty or holds only whitespace.
    /// Numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
            Cell::Empty => true,
        }
    }

    /// Convert to an artifact scalar. Blank cells become the empty string.
    pub fn to_scalar(&self) -> Scalar {
        match self {
            Cell::Text(s) => Scalar::Text(s.clone()),
            Cell::Number(n) => Scalar::Number(*n),
            Cell::Empty => Scalar::Text(String::new()),
        }
    }
}

/// A rectangular grid of raw cell values, one per sheet.
///
/// Rows may be ragged (shorter than the widest row); readers treat cells
/// beyond a row's end as blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The conventional header row (row 0), empty when the grid is empty.
    pub fn header_row(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Header labels in column order, for traceability in the artifact.
    pub fn header_labels(&self) -> Vec<String> {
        self.header_row().iter().map(Cell::label).collect()
    }

    /// Body rows: everything after the header row.
    pub fn body_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }
}

//==============================================================================
// Artifact Types
//==============================================================================

/// A raw artifact value: a number or a string, exactly as entered in the
/// spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole-number prices serialize as JSON integers so the artifact
            // matches what the staff typed into the sheet.
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar::Text(v))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Flat key→value configuration extracted from the two-column settings sheet.
///
/// Keys are unique trimmed non-blank strings; on duplicates the last row in
/// sheet order wins (the documented merge policy, matching the upsert
/// semantics of the storage table this feeds).
pub type SettingsTable = BTreeMap<String, Scalar>;

/// One label→price lookup table for a single equipment/tier category.
pub type PriceMap = BTreeMap<String, Scalar>;

/// The four pricing lookup tables plus the original pricing-sheet headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTables {
    /// Power tier → price, tariff variant D
    pub pv_power_price_d: PriceMap,
    /// Power tier → price, tariff variant E (same key column as D)
    pub pv_power_price_e: PriceMap,
    /// Inverter model → price
    pub inverter_map: PriceMap,
    /// Battery model → price
    pub battery_map: PriceMap,
    /// Original header labels in column order, kept for traceability
    pub headers: Vec<String>,
}

impl PricingTables {
    /// Total number of price entries across the four maps.
    pub fn entry_count(&self) -> usize {
        self.pv_power_price_d.len()
            + self.pv_power_price_e.len()
            + self.inverter_map.len()
            + self.battery_map.len()
    }
}

/// The extraction artifact: the sole contract with the downstream quoting
/// component. Written once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricebook {
    pub settings: SettingsTable,
    pub pricing: PricingTables,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_label_trims_text() {
        assert_eq!(Cell::Text("  5kW  ".to_string()).label(), "5kW");
        assert_eq!(Cell::Empty.label(), "");
    }

    #[test]
    fn test_cell_label_renders_whole_numbers_without_fraction() {
        assert_eq!(Cell::Number(5.0).label(), "5");
        assert_eq!(Cell::Number(5.5).label(), "5.5");
    }

    #[test]
    fn test_cell_blankness() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".to_string()).is_blank());
        assert!(!Cell::Text("x".to_string()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_scalar_whole_numbers_serialize_as_integers() {
        let json = serde_json::to_string(&Scalar::Number(1000.0)).unwrap();
        assert_eq!(json, "1000");

        let json = serde_json::to_string(&Scalar::Number(1234.56)).unwrap();
        assert_eq!(json, "1234.56");
    }

    #[test]
    fn test_scalar_round_trip() {
        for scalar in [
            Scalar::Number(1000.0),
            Scalar::Number(0.125),
            Scalar::Text("PLN".to_string()),
            Scalar::Text(String::new()),
        ] {
            let json = serde_json::to_string(&scalar).unwrap();
            let back: Scalar = serde_json::from_str(&json).unwrap();
            assert_eq!(back, scalar);
        }
    }

    #[test]
    fn test_grid_header_row_of_empty_grid() {
        let grid = Grid::default();
        assert!(grid.header_row().is_empty());
        assert!(grid.header_labels().is_empty());
        assert_eq!(grid.body_rows().count(), 0);
    }
}
