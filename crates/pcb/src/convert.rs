//! Convert command for exporting footprints to other EDA formats

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use pcb_kicad2easyeda::{convert_footprint, ConvertOptions, KicadFootprint};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the `convert` command
#[derive(Args, Debug)]
#[command(about = "Convert footprints to external formats")]
pub struct ConvertArgs {
    #[command(subcommand)]
    pub command: ConvertCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommands {
    /// Convert a KiCad footprint to EasyEDA JSON
    Easyeda(EasyedaArgs),
}

/// Arguments for the `convert easyeda` subcommand
#[derive(Args, Debug)]
pub struct EasyedaArgs {
    /// Path to the KiCad footprint (.kicad_mod)
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file path (defaults to <input>_easyeda.json next to the input)
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,

    /// KiCad layer to drop from pads before conversion (repeatable, e.g. F.Mask)
    #[arg(long = "ignore-layer", value_name = "LAYER")]
    pub ignore_layers: Vec<String>,
}

/// Execute the `convert` command
pub fn execute(args: ConvertArgs) -> Result<()> {
    match args.command {
        ConvertCommands::Easyeda(args) => execute_easyeda(args),
    }
}

/// Execute the `convert easyeda` subcommand
fn execute_easyeda(args: EasyedaArgs) -> Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    eprintln!("Parsing KiCad footprint: {}", args.input.display());
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read footprint: {}", args.input.display()))?;

    let options = ConvertOptions {
        ignored_layers: args.ignore_layers,
    };
    debug!("conversion options: {options:?}");

    let conversion = convert_footprint(&source, &options)
        .with_context(|| format!("Failed to convert footprint: {}", args.input.display()))?;

    report(&conversion.footprint);
    eprintln!("Generated {} shape elements", conversion.elements.len());
    eprintln!(
        "Origin set to: ({}, {})",
        conversion.origin.x, conversion.origin.y
    );

    if args.stdout {
        println!("{}", conversion.json);
    } else {
        let output_path = args
            .output
            .unwrap_or_else(|| default_output_path(&args.input));

        fs::write(&output_path, &conversion.json)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

        eprintln!("Wrote {}", output_path.display());
    }

    Ok(())
}

/// Summarize what was found in the footprint
fn report(footprint: &KicadFootprint) {
    if !footprint.description.is_empty() {
        eprintln!("  {}", footprint.description);
    }
    eprintln!(
        "  Found {} pads, {} circles",
        footprint.pads().count(),
        footprint.circles().count()
    );

    for (i, pad) in footprint.pads().enumerate() {
        let drill = pad
            .drill
            .map(|d| format!("{d}mm"))
            .unwrap_or_else(|| "none".to_string());
        eprintln!(
            "  Pad {}: num={}, type={}, shape={}, drill={}",
            i + 1,
            pad.number,
            pad.kind.keyword(),
            pad.shape.keyword(),
            drill
        );
    }
}

/// `foo.kicad_mod` → `foo_easyeda.json`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = match input.extension().and_then(|e| e.to_str()) {
        Some("kicad_mod") => input.file_stem(),
        _ => input.file_name(),
    }
    .and_then(|s| s.to_str())
    .unwrap_or("footprint");

    input.with_file_name(format!("{stem}_easyeda.json"))
}
