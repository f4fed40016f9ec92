//! Pricing-map construction

use super::roles::{ResolvedColumn, RoleAssignment};
use crate::types::{Cell, Grid, PriceMap, PricingTables, Scalar};

/// Build the four pricing maps in one pass over the body rows.
///
/// The three label families (power tier, inverter, battery) are extracted
/// independently per row; one row may contribute to several maps. The
/// power-tier key column feeds both tariff variants, differing only in
/// which price column is read. Within each map, later rows overwrite
/// earlier rows with the same trimmed label; a blank price cell adds no
/// entry even when its label is present.
pub fn build_pricing_maps(grid: &Grid, roles: &RoleAssignment) -> PricingTables {
    let mut tables = PricingTables {
        headers: grid.header_labels(),
        ..PricingTables::default()
    };

    for row in grid.body_rows() {
        record_price(
            row,
            roles.power_key.as_ref(),
            roles.price_variant_d.as_ref(),
            &mut tables.pv_power_price_d,
        );
        record_price(
            row,
            roles.power_key.as_ref(),
            roles.price_variant_e.as_ref(),
            &mut tables.pv_power_price_e,
        );
        record_price(
            row,
            roles.inverter_key.as_ref(),
            roles.inverter_price.as_ref(),
            &mut tables.inverter_map,
        );
        record_price(
            row,
            roles.battery_key.as_ref(),
            roles.battery_price.as_ref(),
            &mut tables.battery_map,
        );
    }

    tables
}

/// Record one label→price entry from a row, when both the key and price
/// columns are resolved and both cells are non-blank. Cells beyond a short
/// row's end read as blank.
fn record_price(
    row: &[Cell],
    key_col: Option<&ResolvedColumn>,
    price_col: Option<&ResolvedColumn>,
    map: &mut PriceMap,
) {
    let (Some(key_col), Some(price_col)) = (key_col, price_col) else {
        return;
    };

    let label = label_at(row, key_col.index);
    if label.is_empty() {
        return;
    }
    if let Some(price) = scalar_at(row, price_col.index) {
        map.insert(label, price);
    }
}

fn label_at(row: &[Cell], index: usize) -> String {
    row.get(index).map(Cell::label).unwrap_or_default()
}

fn scalar_at(row: &[Cell], index: usize) -> Option<Scalar> {
    row.get(index)
        .filter(|cell| !cell.is_blank())
        .map(Cell::to_scalar)
}
