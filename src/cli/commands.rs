use crate::artifact;
use crate::error::{PricebookError, PricebookResult};
use crate::excel::Workbook;
use crate::extract::{self, infer_roles};
use crate::profile::{Profile, Role};
use crate::types::Pricebook;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Execute the extract command: resolve workbook, extract, write artifact.
pub fn extract(
    workbook: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> PricebookResult<()> {
    println!("{}", "📒 Pricebook - Extracting pricing configuration".bold().green());

    let profile = Profile::resolve(profile_path.as_deref())?;
    let source = profile.resolve_workbook(workbook.as_deref())?;
    println!("   Workbook: {}", source.display());

    let book = run_extraction(&source, &profile, verbose)?;

    let output_path = output.unwrap_or_else(|| profile.output.clone());
    artifact::write_pricebook(&book, &output_path)?;

    println!();
    println!("{}", "✅ Extraction complete".bold().green());
    print_summary(&book);
    println!("   Artifact: {}", output_path.display().to_string().bold());
    Ok(())
}

/// Execute the inspect command: show sheets, headers and the resolved
/// column-role assignment without writing anything.
pub fn inspect(
    workbook: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    verbose: bool,
) -> PricebookResult<()> {
    println!("{}", "🔍 Pricebook - Inspecting workbook".bold().green());

    let profile = Profile::resolve(profile_path.as_deref())?;
    let source = profile.resolve_workbook(workbook.as_deref())?;
    println!("   Workbook: {}\n", source.display());

    let loaded = Workbook::open(&source)?;

    println!("{}", "Sheets:".bold());
    for name in loaded.sheet_names() {
        let rows = loaded.grid(name).map(|g| g.row_count()).unwrap_or(0);
        println!("   {} ({} rows)", name.cyan(), rows);
    }
    println!();

    let Some(grid) = loaded.grid_for(&profile.pricing_sheets) else {
        println!(
            "{} no pricing sheet found (tried: {})",
            "⚠️ ".yellow(),
            profile.pricing_sheets.join(", ")
        );
        return Ok(());
    };

    println!("{}", "Pricing headers:".bold());
    for (index, header) in grid.header_labels().iter().enumerate() {
        let shown = if header.is_empty() { "(blank)" } else { header.as_str() };
        println!("   {} [{}] {}", column_letter(index).cyan(), index, shown);
    }
    println!();

    let roles = infer_roles(grid.header_row(), &profile.roles);
    println!("{}", "Column roles:".bold());
    for role in Role::ALL {
        match roles.get(role) {
            Some(col) => println!(
                "   {:<24} → column {} ({})",
                role.describe(),
                column_letter(col.index).cyan().bold(),
                if col.header.is_empty() { "no header" } else { col.header.as_str() }
            ),
            None => println!("   {:<24} → {}", role.describe(), "unresolved".yellow()),
        }
    }

    if verbose {
        let book = extract::extract_pricebook(&loaded, &profile);
        println!();
        print_summary(&book);
    }
    Ok(())
}

/// Execute the watch command: re-run extraction whenever the workbook
/// changes on disk.
pub fn watch(
    workbook: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> PricebookResult<()> {
    println!("{}", "👁️  Pricebook - Watch Mode".bold().green());

    let profile = Profile::resolve(profile_path.as_deref())?;
    let source = profile.resolve_workbook(workbook.as_deref())?;
    let output_path = output.unwrap_or_else(|| profile.output.clone());

    println!("   Watching: {}", source.display());
    println!("   Artifact: {}", output_path.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    let canonical_source = source.canonicalize().map_err(PricebookError::Io)?;
    let parent_dir = canonical_source
        .parent()
        .ok_or_else(|| PricebookError::Io(std::io::Error::other("cannot determine parent directory")))?;

    let (tx, rx) = channel();

    // Debounce so mid-save events don't trigger half-written reads
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| PricebookError::Io(std::io::Error::other(e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| PricebookError::Io(std::io::Error::other(e)))?;

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&source, &profile, &output_path, verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_source {
                            return true;
                        }
                    }
                    event
                        .path
                        .file_name()
                        .map(|name| name == canonical_source.file_name().unwrap_or_default())
                        .unwrap_or(false)
                });

                if relevant {
                    println!("\n{} {}", "🔄 Change detected at".cyan(), timestamp().cyan());
                    run_watch_action(&source, &profile, &output_path, verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// One watch-mode extraction pass. Failures are reported, never fatal:
/// the next save retries.
fn run_watch_action(source: &Path, profile: &Profile, output: &Path, verbose: bool) {
    let result = run_extraction(source, profile, verbose)
        .and_then(|book| artifact::write_pricebook(&book, output).map(|_| book));
    match result {
        Ok(book) => {
            println!("{}", "✅ Artifact updated".bold().green());
            print_summary(&book);
        }
        Err(e) => println!("{} {}", "❌ Extraction failed:".bold().red(), e),
    }
}

fn run_extraction(source: &Path, profile: &Profile, verbose: bool) -> PricebookResult<Pricebook> {
    if verbose {
        println!("{}", "📖 Loading workbook...".cyan());
    }
    let workbook = Workbook::open(source)?;

    if verbose {
        println!("   Found {} sheets: {}", workbook.sheet_names().len(),
            workbook.sheet_names().join(", "));
        println!("{}", "🧮 Extracting settings and pricing maps...".cyan());
    }

    Ok(extract::extract_pricebook(&workbook, profile))
}

fn print_summary(book: &Pricebook) {
    println!("   Settings: {} entries", book.settings.len());
    println!(
        "   Pricing:  {} power D, {} power E, {} inverters, {} batteries",
        book.pricing.pv_power_price_d.len(),
        book.pricing.pv_power_price_e.len(),
        book.pricing.inverter_map.len(),
        book.pricing.battery_map.len()
    );
}

fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    format!("{:02}:{:02}:{:02} UTC", (secs / 3600) % 24, (secs / 60) % 60, secs % 60)
}

/// Convert a column index to its spreadsheet letter (0→A, 25→Z, 26→AA).
fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut num = index;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(2), "C");
        assert_eq!(column_letter(8), "I");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
    }
}
