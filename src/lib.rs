//! Pricebook - pricing-configuration extractor
//!
//! This library reads the sales team's semi-structured pricing workbook
//! and emits a canonical JSON artifact for the downstream quoting
//! calculator.
//!
//! # Features
//!
//! - Workbook loading with fully materialized per-sheet grids
//! - Two-tier column-role inference (header synonyms, positional fallback)
//! - Flat settings table from a two-column sheet (last write wins)
//! - Four pricing lookup maps keyed by trimmed human-entered labels
//! - Atomic JSON artifact writes
//!
//! # Example
//!
//! ```no_run
//! use pricebook::excel::Workbook;
//! use pricebook::extract::extract_pricebook;
//! use pricebook::profile::Profile;
//!
//! let profile = Profile::default();
//! let source = profile.resolve_workbook(None)?;
//! let workbook = Workbook::open(&source)?;
//!
//! let book = extract_pricebook(&workbook, &profile);
//! println!("Settings: {}", book.settings.len());
//! println!("Price entries: {}", book.pricing.entry_count());
//! # Ok::<(), pricebook::error::PricebookError>(())
//! ```

pub mod artifact;
pub mod cli;
pub mod error;
pub mod excel;
pub mod extract;
pub mod profile;
pub mod types;

// Re-export commonly used types
pub use error::{PricebookError, PricebookResult};
pub use types::{Cell, Grid, Pricebook, PricingTables, Scalar, SettingsTable};
