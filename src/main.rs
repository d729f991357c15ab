use std::fs;

use anyhow::Context;
use clap::Parser;
use cnc_warmup::config::{RampParameters, WarmupConfig};
use cnc_warmup::machine::MachineClass;
use cnc_warmup::program::WarmupGenerator;
use cnc_warmup::tool::Tool;
use itertools::Itertools;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate warmup routines for Heidenhain TNC 640 controllers",
    long_about = None
)]
struct Args {
    /// Machine size selection.
    #[arg(value_enum)]
    machine: MachineClass,

    /// Tool number (1-99).
    tool_number: u8,

    /// Tool length from gauge line in mm (e.g. 120.5).
    #[arg(long)]
    tool_length: f64,

    /// Tool radius in mm.
    #[arg(long, default_value_t = 5.0)]
    tool_radius: f64,

    /// Warmup duration in minutes (1-120).
    #[arg(short, long, default_value_t = 30)]
    duration: u32,

    /// Enable flood coolant (if the machine supports it).
    #[arg(short, long)]
    coolant: bool,

    /// A JSON description of the ramp percentages to echo into the program
    /// header, e.g. '{"start_feed_percent": 40}'.
    #[arg(long)]
    ramp: Option<String>,

    /// Output file path (default: prints to stdout).
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let ramp = match &args.ramp {
        Some(text) => serde_json::from_str::<RampParameters>(text)
            .context("Failed while parsing ramp JSON")?,
        None => RampParameters::default(),
    };
    let tool = Tool::new(args.tool_number, args.tool_length, args.tool_radius)?;
    let config = WarmupConfig::new(args.machine, tool, args.duration, args.coolant, ramp)?;

    let generator = WarmupGenerator::new(config)?;
    let lines = generator.generate();
    tracing::debug!("Generated {} lines for {}", lines.len(), generator.machine().name);

    let text = format!("{}\n", lines.iter().join("\n"));
    match &args.output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {}", path))?;
            tracing::info!("Warmup program saved to {}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}
