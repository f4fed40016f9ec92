//! Column role inference
//!
//! Sales staff rename headers faster than they move columns (translations,
//! rebranding), so resolution is two-tier: recognized header synonyms
//! first, the role's historical column position as fallback. Resolution is
//! a pure function of the header row and the role profile.

use crate::profile::{Role, RoleProfile, RoleSpec};
use crate::types::Cell;
use tracing::debug;

/// A role resolved to a concrete pricing-sheet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Zero-based column index in the pricing sheet
    pub index: usize,
    /// Trimmed header label at that column (may be empty under fallback)
    pub header: String,
}

/// Role → column assignment for one extraction run. Produced once per run,
/// never mutated afterwards. An unresolved role simply contributes nothing
/// to extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    pub power_key: Option<ResolvedColumn>,
    pub price_variant_d: Option<ResolvedColumn>,
    pub price_variant_e: Option<ResolvedColumn>,
    pub inverter_key: Option<ResolvedColumn>,
    pub inverter_price: Option<ResolvedColumn>,
    pub battery_key: Option<ResolvedColumn>,
    pub battery_price: Option<ResolvedColumn>,
}

impl RoleAssignment {
    pub fn get(&self, role: Role) -> Option<&ResolvedColumn> {
        match role {
            Role::PowerKey => self.power_key.as_ref(),
            Role::PriceVariantD => self.price_variant_d.as_ref(),
            Role::PriceVariantE => self.price_variant_e.as_ref(),
            Role::InverterKey => self.inverter_key.as_ref(),
            Role::InverterPrice => self.inverter_price.as_ref(),
            Role::BatteryKey => self.battery_key.as_ref(),
            Role::BatteryPrice => self.battery_price.as_ref(),
        }
    }

    fn set(&mut self, role: Role, resolved: Option<ResolvedColumn>) {
        let slot = match role {
            Role::PowerKey => &mut self.power_key,
            Role::PriceVariantD => &mut self.price_variant_d,
            Role::PriceVariantE => &mut self.price_variant_e,
            Role::InverterKey => &mut self.inverter_key,
            Role::InverterPrice => &mut self.inverter_price,
            Role::BatteryKey => &mut self.battery_key,
            Role::BatteryPrice => &mut self.battery_price,
        };
        *slot = resolved;
    }
}

/// Resolve every role against a header row.
pub fn infer_roles(header_row: &[Cell], profile: &RoleProfile) -> RoleAssignment {
    let labels: Vec<String> = header_row.iter().map(Cell::label).collect();

    let mut assignment = RoleAssignment::default();
    for role in Role::ALL {
        let resolved = resolve_role(&labels, profile.spec(role));
        match &resolved {
            Some(col) => debug!(
                role = role.name(),
                column = col.index,
                header = %col.header,
                "role resolved"
            ),
            None => debug!(role = role.name(), "role unresolved"),
        }
        assignment.set(role, resolved);
    }
    assignment
}

/// Two-tier resolution for a single role: first header matching any
/// synonym (case-insensitive, trimmed) wins; otherwise the positional
/// fallback, which resolves to nothing when out of range.
fn resolve_role(labels: &[String], spec: &RoleSpec) -> Option<ResolvedColumn> {
    for (index, label) in labels.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        let folded = label.to_lowercase();
        if spec.synonyms.iter().any(|s| s.trim().to_lowercase() == folded) {
            return Some(ResolvedColumn {
                index,
                header: label.clone(),
            });
        }
    }

    let fallback = spec.fallback?;
    if fallback < labels.len() {
        return Some(ResolvedColumn {
            index: fallback,
            header: labels[fallback].clone(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(labels: &[&str]) -> Vec<Cell> {
        labels.iter().map(|s| Cell::Text(s.to_string())).collect()
    }

    fn spec(synonyms: &[&str], fallback: Option<usize>) -> RoleSpec {
        RoleSpec {
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            fallback,
        }
    }

    #[test]
    fn test_synonym_match_is_case_insensitive_and_trimmed() {
        let labels = vec!["Lp".to_string(), "  MOC  ".to_string()];
        // labels come pre-trimmed from Cell::label, simulate that
        let labels: Vec<String> = labels.iter().map(|s| s.trim().to_string()).collect();

        let resolved = resolve_role(&labels, &spec(&["moc"], Some(0))).unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.header, "MOC");
    }

    #[test]
    fn test_first_matching_header_wins() {
        let labels = vec!["D".to_string(), "d".to_string()];
        let resolved = resolve_role(&labels, &spec(&["d"], None)).unwrap();
        assert_eq!(resolved.index, 0);
    }

    #[test]
    fn test_fallback_used_when_no_synonym_matches() {
        let labels = vec!["Lp".to_string(), "Kolumna B".to_string(), "???".to_string()];
        let resolved = resolve_role(&labels, &spec(&["moc"], Some(2))).unwrap();
        assert_eq!(resolved.index, 2);
        assert_eq!(resolved.header, "???");
    }

    #[test]
    fn test_out_of_range_fallback_leaves_role_unresolved() {
        let labels = vec!["Lp".to_string()];
        assert_eq!(resolve_role(&labels, &spec(&["moc"], Some(7))), None);
        assert_eq!(resolve_role(&labels, &spec(&["moc"], None)), None);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let header_row = headers(&["Moc", "D", "E", "Falownik", "Cena falownika"]);
        let profile = RoleProfile::default();

        let first = infer_roles(&header_row, &profile);
        let second = infer_roles(&header_row, &profile);
        assert_eq!(first, second);

        assert_eq!(first.power_key.as_ref().unwrap().index, 0);
        assert_eq!(first.price_variant_d.as_ref().unwrap().index, 1);
        assert_eq!(first.price_variant_e.as_ref().unwrap().index, 2);
        assert_eq!(first.inverter_key.as_ref().unwrap().index, 3);
        assert_eq!(first.inverter_price.as_ref().unwrap().index, 4);
        // No battery columns and the default fallbacks (7, 8) are out of
        // range for a five-column header: the battery family drops out.
        assert_eq!(first.battery_key, None);
        assert_eq!(first.battery_price, None);
    }

    #[test]
    fn test_blank_headers_never_match_synonyms() {
        let labels = vec!["".to_string(), "Moc".to_string()];
        let resolved = resolve_role(&labels, &spec(&["moc"], None)).unwrap();
        assert_eq!(resolved.index, 1);
    }
}
