use anyhow::Context;
use bom_epd::{cli, logging};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bom-epd")]
#[command(about = "Flatten a Bill of Materials into an EPD material allocation table.")]
#[command(long_about = "BOM-EPD - component → material allocation for EPD/LCA reporting

Reads a multi-level BOM and a master item table, weighs every row, pairs
components with their material rows, and writes one allocation record per
component/material relationship with its weight fraction and EPD material.

COMMANDS:
  allocate     - Build the allocation table (.xlsx, .csv or .json)
  classify     - Show each row's weight, role and partner without writing
  init-config  - Write the default YAML configuration

EXAMPLES:
  bom-epd allocate BOM.xlsx master.xlsx output.xlsx
  bom-epd allocate BOM.csv master.csv output.csv --config bom-epd.yaml
  bom-epd classify BOM.xlsx master.xlsx

LOGGING:
  Warnings for defaulted or dropped rows go to stderr.
  Use --verbose or RUST_LOG=bom_epd=debug for classification details.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Build the component → material allocation table.

INPUT COLUMNS (defaults, override with --config):
  BOM:    Lvl, U/M, Quantity, Component no, Description
  Master: Item no, Net weight, EPD Material

OUTPUT COLUMNS:
  EPDName, EPDQuantity, Comments, UnitCalc, Material Name

The output format follows the file extension: .xlsx, .csv or .json.")]
    /// Build the allocation table from a BOM and a master table
    Allocate {
        /// BOM table (.xlsx, .xls or .csv)
        bom: PathBuf,

        /// Master reference table (.xlsx, .xls or .csv)
        master: PathBuf,

        /// Output file (.xlsx, .csv or .json)
        output: PathBuf,

        /// YAML configuration file
        #[arg(short, long, env = "BOM_EPD_CONFIG")]
        config: Option<PathBuf>,

        /// Show verbose progress and debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how every BOM row was weighed and classified
    Classify {
        /// BOM table (.xlsx, .xls or .csv)
        bom: PathBuf,

        /// Master reference table (.xlsx, .xls or .csv)
        master: PathBuf,

        /// YAML configuration file
        #[arg(short, long, env = "BOM_EPD_CONFIG")]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the default YAML configuration
    InitConfig {
        /// Destination path
        #[arg(default_value = "bom-epd.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Allocate { verbose, .. } | Commands::Classify { verbose, .. } => *verbose,
        Commands::InitConfig { .. } => false,
    };
    logging::init(verbose);

    match cli.command {
        Commands::Allocate {
            bom,
            master,
            output,
            config,
            verbose,
        } => cli::allocate(bom, master, output.clone(), config, verbose)
            .with_context(|| format!("allocation to '{}' failed", output.display())),

        Commands::Classify {
            bom,
            master,
            config,
            verbose: _,
        } => cli::classify(bom.clone(), master, config)
            .with_context(|| format!("classification of '{}' failed", bom.display())),

        Commands::InitConfig { path, force } => cli::init_config(path.clone(), force)
            .with_context(|| format!("could not write '{}'", path.display())),
    }
}
