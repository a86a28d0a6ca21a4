use crate::config::Config;
use crate::core::{AllocationReport, Pipeline, ReferenceLookup};
use crate::error::{BomError, BomResult};
use crate::sink::write_allocations;
use crate::table::{bom_rows, master_entries, read_table};
use crate::types::{BomRow, Role};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e4).round() / 1e4;
    format!("{:.4}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Load the configuration file, or the defaults when none is given
fn load_config(config: Option<&Path>) -> BomResult<Config> {
    match config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Config::load(path)
        }
        None => Ok(Config::default()),
    }
}

/// Read both source tables. Any failure here ends the run before row processing.
fn load_inputs(
    bom: &Path,
    master: &Path,
    config: &Config,
) -> BomResult<(Vec<BomRow>, ReferenceLookup)> {
    let master_table = read_table(master, config.master.sheet.as_deref(), "master")?;
    let lookup = ReferenceLookup::build(master_entries(&master_table, &config.master.columns)?);

    let bom_table = read_table(bom, config.bom.sheet.as_deref(), "BOM")?;
    let rows = bom_rows(&bom_table, &config.bom.columns)?;

    Ok((rows, lookup))
}

fn print_summary(report: &AllocationReport) {
    let counts = report.role_counts();
    println!("{}", "📋 Summary:".bold().cyan());
    println!("   Rows:     {}", report.rows.len());
    println!(
        "   Roles:    {} single, {} paired, {} skip{}",
        counts.single,
        counts.paired,
        counts.skip,
        if counts.unrecognized > 0 {
            format!(", {} unrecognized", counts.unrecognized)
        } else {
            String::new()
        }
    );
    println!("   Q1:       {}", format_number(report.normalizer.quantity));
    println!("   Records:  {}", report.records.len());

    if report.diagnostics.is_empty() {
        println!("   Warnings: {}", "0".green());
    } else {
        println!(
            "   Warnings: {}",
            report.diagnostics.len().to_string().yellow()
        );
        for diagnostic in report.diagnostics.iter() {
            println!("      {} {}", "⚠️".yellow(), diagnostic);
        }
    }
    println!();
}

/// Execute the allocate command
pub fn allocate(
    bom: PathBuf,
    master: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> BomResult<()> {
    println!("{}", "🌱 BOM-EPD - Material Allocation".bold().green());
    println!("   BOM:    {}", bom.display());
    println!("   Master: {}", master.display());
    println!("   Output: {}\n", output.display());

    let config = load_config(config.as_deref())?;

    if verbose {
        println!("{}", "📖 Reading source tables...".cyan());
    }
    let (rows, lookup) = load_inputs(&bom, &master, &config)?;
    if verbose {
        println!(
            "   Found {} BOM rows, {} master entries\n",
            rows.len(),
            lookup.len()
        );
        println!("{}", "🧮 Classifying rows and building allocations...".cyan());
    }

    let report = Pipeline::new(&lookup).run(rows);
    print_summary(&report);

    if verbose {
        println!("{}", "💾 Writing allocation table...".cyan());
    }
    write_allocations(&output, &report.records, &config.output)?;

    println!("{}", "✅ Allocation Complete!".bold().green());
    println!("   Output file: {}\n", output.display());

    Ok(())
}

/// Execute the classify command - show how each row was weighed and paired
pub fn classify(bom: PathBuf, master: PathBuf, config: Option<PathBuf>) -> BomResult<()> {
    println!("{}", "🔍 BOM-EPD - Row Classification".bold().green());
    println!("   BOM:    {}", bom.display());
    println!("   Master: {}\n", master.display());

    let config = load_config(config.as_deref())?;
    let (rows, lookup) = load_inputs(&bom, &master, &config)?;
    let report = Pipeline::new(&lookup).run(rows);

    println!(
        "   {:>5}  {:>3}  {:<6} {:>10} {:>10}  {:<8} {:>7}  {}",
        "Row", "Lvl", "U/M", "Quantity", "Weight", "Role", "Partner", "Description"
    );
    for (idx, row) in report.rows.iter().enumerate() {
        let role = format!("{:<8}", row.role.to_string());
        let role = match row.role {
            Role::Single => role.normal(),
            Role::Paired => role.green(),
            Role::Skip => role.bright_black(),
            Role::Unrecognized(_) => role.red(),
        };
        let partner = row
            .partner_index
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:>5}  {:>3}  {:<6} {:>10} {:>10}  {} {:>7}  {}",
            idx,
            row.row.level,
            row.row.unit.to_string(),
            format_number(row.row.quantity),
            format_number(row.weight),
            role,
            partner,
            row.row.description
        );
    }
    println!();

    print_summary(&report);
    Ok(())
}

/// Execute the init-config command - write the default configuration
pub fn init_config(path: PathBuf, force: bool) -> BomResult<()> {
    if path.exists() && !force {
        return Err(BomError::Config(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let yaml = Config::default().to_yaml()?;
    fs::write(&path, yaml)?;

    println!("{}", "✅ Configuration written".bold().green());
    println!("   File: {}\n", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
