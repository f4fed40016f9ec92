//! Schema inference & extraction engine
//!
//! Given the materialized grids, builds the settings table and the four
//! pricing maps. The whole engine is a single deterministic pass: no I/O,
//! no retries, no partial results. Data anomalies (missing sheet, blank
//! key, blank price, unresolved role) are modeled as absence, never as
//! errors — a partially filled spreadsheet yields a partial artifact.

mod pricing;
mod roles;
mod settings;

pub use pricing::build_pricing_maps;
pub use roles::{infer_roles, ResolvedColumn, RoleAssignment};
pub use settings::extract_settings;

use crate::excel::Workbook;
use crate::profile::Profile;
use crate::types::{Pricebook, PricingTables, SettingsTable};
use tracing::debug;

/// Run the full extraction pass over a loaded workbook.
pub fn extract_pricebook(workbook: &Workbook, profile: &Profile) -> Pricebook {
    let settings = match workbook.grid_for(&profile.settings_sheets) {
        Some(grid) => extract_settings(grid),
        None => {
            debug!(
                candidates = ?profile.settings_sheets,
                "no settings sheet found, settings table left empty"
            );
            SettingsTable::new()
        }
    };

    let pricing = match workbook.grid_for(&profile.pricing_sheets) {
        Some(grid) => {
            let roles = infer_roles(grid.header_row(), &profile.roles);
            build_pricing_maps(grid, &roles)
        }
        None => {
            debug!(
                candidates = ?profile.pricing_sheets,
                "no pricing sheet found, pricing maps left empty"
            );
            PricingTables::default()
        }
    };

    Pricebook { settings, pricing }
}
