//! Extraction profile: which workbook to read, which sheets to consume,
//! and how pricing-sheet columns map to semantic roles.
//!
//! The compiled-in defaults encode the conventions of the historical sales
//! spreadsheet (Polish/English headers, roles pinned to columns C..I). A
//! partial YAML override file can adjust any part of the profile without
//! touching the rest.

use crate::error::{PricebookError, PricebookResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default override file, picked up from the working directory when present.
pub const DEFAULT_PROFILE_FILE: &str = "pricebook.yaml";

//==============================================================================
// Column Roles
//==============================================================================

/// Semantic purpose of a pricing-sheet column, independent of its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    PowerKey,
    PriceVariantD,
    PriceVariantE,
    InverterKey,
    InverterPrice,
    BatteryKey,
    BatteryPrice,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::PowerKey,
        Role::PriceVariantD,
        Role::PriceVariantE,
        Role::InverterKey,
        Role::InverterPrice,
        Role::BatteryKey,
        Role::BatteryPrice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::PowerKey => "power_key",
            Role::PriceVariantD => "price_variant_d",
            Role::PriceVariantE => "price_variant_e",
            Role::InverterKey => "inverter_key",
            Role::InverterPrice => "inverter_price",
            Role::BatteryKey => "battery_key",
            Role::BatteryPrice => "battery_price",
        }
    }

    /// Human-readable description for inspect output.
    pub fn describe(&self) -> &'static str {
        match self {
            Role::PowerKey => "power tier key",
            Role::PriceVariantD => "power price, tariff D",
            Role::PriceVariantE => "power price, tariff E",
            Role::InverterKey => "inverter model key",
            Role::InverterPrice => "inverter price",
            Role::BatteryKey => "battery model key",
            Role::BatteryPrice => "battery price",
        }
    }
}

/// Resolution recipe for one role: an ordered list of acceptable header
/// synonyms plus one positional fallback column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleSpec {
    /// Header texts that identify this column, matched case-insensitively
    /// against trimmed headers. First matching header in column order wins.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Column index to fall back to when no synonym matches. `None` (or an
    /// index beyond the header row) leaves the role unresolved.
    #[serde(default)]
    pub fallback: Option<usize>,
}

impl RoleSpec {
    fn new(synonyms: &[&str], fallback: usize) -> Self {
        Self {
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            fallback: Some(fallback),
        }
    }
}

/// Per-role resolution recipes for the pricing sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoleProfile {
    pub power_key: RoleSpec,
    pub price_variant_d: RoleSpec,
    pub price_variant_e: RoleSpec,
    pub inverter_key: RoleSpec,
    pub inverter_price: RoleSpec,
    pub battery_key: RoleSpec,
    pub battery_price: RoleSpec,
}

impl Default for RoleProfile {
    fn default() -> Self {
        // Headers drift in wording faster than in position, so every role
        // carries both its known spellings and its historical column (C..I).
        Self {
            power_key: RoleSpec::new(&["moc", "moc [kw]", "power"], 2),
            price_variant_d: RoleSpec::new(&["d", "cena d", "taryfa d", "price d"], 3),
            price_variant_e: RoleSpec::new(&["e", "cena e", "taryfa e", "price e"], 4),
            inverter_key: RoleSpec::new(&["falownik", "model falownika", "inverter"], 5),
            inverter_price: RoleSpec::new(&["cena falownika", "inverter price"], 6),
            battery_key: RoleSpec::new(&["magazyn", "magazyn energii", "bateria", "battery"], 7),
            battery_price: RoleSpec::new(&["cena magazynu", "cena baterii", "battery price"], 8),
        }
    }
}

impl RoleProfile {
    pub fn spec(&self, role: Role) -> &RoleSpec {
        match role {
            Role::PowerKey => &self.power_key,
            Role::PriceVariantD => &self.price_variant_d,
            Role::PriceVariantE => &self.price_variant_e,
            Role::InverterKey => &self.inverter_key,
            Role::InverterPrice => &self.inverter_price,
            Role::BatteryKey => &self.battery_key,
            Role::BatteryPrice => &self.battery_price,
        }
    }
}

//==============================================================================
// Profile
//==============================================================================

/// Full extraction profile: input candidates, sheet candidates, role
/// recipes and output location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Ordered workbook filename candidates; the first existing path wins.
    pub workbook_candidates: Vec<String>,
    /// Sheet name candidates for the settings sheet (case-insensitive).
    pub settings_sheets: Vec<String>,
    /// Sheet name candidates for the pricing sheet (case-insensitive).
    pub pricing_sheets: Vec<String>,
    /// Where the artifact is written.
    pub output: PathBuf,
    pub roles: RoleProfile,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            workbook_candidates: vec![
                "cennik.xlsx".to_string(),
                "pricing.xlsx".to_string(),
                "dane.xlsx".to_string(),
            ],
            settings_sheets: vec!["Ustawienia".to_string(), "Settings".to_string()],
            pricing_sheets: vec!["Cennik".to_string(), "Pricing".to_string()],
            output: PathBuf::from("data/pricebook.json"),
            roles: RoleProfile::default(),
        }
    }
}

impl Profile {
    /// Load a profile override from a YAML file. Missing fields keep their
    /// defaults; malformed YAML is a fatal configuration error.
    pub fn load(path: &Path) -> PricebookResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile = serde_yaml::from_str(&content)?;
        Ok(profile)
    }

    /// Resolve the effective profile: an explicit `--profile` path must
    /// exist; otherwise `pricebook.yaml` is used when present, and the
    /// compiled-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> PricebookResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_PROFILE_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Resolve the input workbook: an explicit path must exist, otherwise
    /// the first existing candidate wins. Fails with `SourceNotFound` when
    /// nothing resolves.
    pub fn resolve_workbook(&self, explicit: Option<&Path>) -> PricebookResult<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(PricebookError::SourceNotFound(path.display().to_string()));
        }

        self.workbook_candidates
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .ok_or_else(|| PricebookError::SourceNotFound(self.workbook_candidates.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_roles_pin_columns_c_through_i() {
        let roles = RoleProfile::default();
        assert_eq!(roles.power_key.fallback, Some(2));
        assert_eq!(roles.price_variant_d.fallback, Some(3));
        assert_eq!(roles.price_variant_e.fallback, Some(4));
        assert_eq!(roles.inverter_key.fallback, Some(5));
        assert_eq!(roles.inverter_price.fallback, Some(6));
        assert_eq!(roles.battery_key.fallback, Some(7));
        assert_eq!(roles.battery_price.fallback, Some(8));
    }

    #[test]
    fn test_partial_yaml_override_keeps_defaults() {
        let yaml = r#"
workbook_candidates:
  - custom.xlsx
roles:
  power_key:
    synonyms: ["leistung"]
    fallback: 0
"#;
        let profile: Profile = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(profile.workbook_candidates, vec!["custom.xlsx"]);
        assert_eq!(profile.roles.power_key.synonyms, vec!["leistung"]);
        assert_eq!(profile.roles.power_key.fallback, Some(0));
        // Untouched parts keep their defaults
        assert_eq!(profile.roles.battery_price, RoleProfile::default().battery_price);
        assert_eq!(profile.output, PathBuf::from("data/pricebook.json"));
        assert_eq!(profile.settings_sheets, vec!["Ustawienia", "Settings"]);
    }

    #[test]
    fn test_resolve_workbook_explicit_missing_is_source_not_found() {
        let profile = Profile::default();
        let err = profile
            .resolve_workbook(Some(Path::new("/nonexistent/cennik.xlsx")))
            .unwrap_err();
        assert!(matches!(err, PricebookError::SourceNotFound(_)));
    }

    #[test]
    fn test_resolve_workbook_reports_all_candidates() {
        let profile = Profile {
            workbook_candidates: vec!["a.xlsx".to_string(), "b.xlsx".to_string()],
            ..Profile::default()
        };
        let err = profile.resolve_workbook(None).unwrap_err();
        assert_eq!(err.to_string(), "no pricing workbook found (tried: a.xlsx, b.xlsx)");
    }
}
