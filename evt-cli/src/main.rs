//! EVT CLI Tool
//!
//! Command-line interface for inspecting EVT command records and timelines.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use evt_core::{CommandCatalog, Event, Record};
use evt_timeline::Timeline;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evt")]
#[command(about = "EVT event inspector - decode command records and lay out timelines")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw parameter block and verify it re-encodes identically
    Decode {
        /// File holding the raw parameter bytes
        input: PathBuf,

        /// Four-character command code of the block
        #[arg(short, long)]
        code: String,
    },

    /// Build the timeline of an event described as JSON
    Timeline {
        /// Event JSON file
        input: PathBuf,

        /// List the commands starting on this frame
        #[arg(long)]
        frame: Option<usize>,

        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },

    /// List command codes with a known record layout
    Codes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = CommandCatalog::new();

    match cli.command {
        Commands::Decode { input, code } => decode_record(&catalog, input, &code)?,
        Commands::Timeline { input, frame, json } => show_timeline(&catalog, input, frame, json)?,
        Commands::Codes => list_codes(&catalog),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("evt={default},evt_core={default},evt_timeline={default}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn decode_record(catalog: &CommandCatalog, input: PathBuf, code: &str) -> Result<()> {
    let bytes = fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    if let Some(size) = catalog.record_size(code) {
        if bytes.len() != size {
            bail!("{code} blocks are {size} bytes, {} has {}", input.display(), bytes.len());
        }
    }

    let record = catalog
        .decode(code, &bytes)
        .with_context(|| format!("Failed to decode {code} block"))?;

    match &record {
        Record::Opaque(opaque) => {
            println!("{code}: no known layout, {} opaque bytes", opaque.bytes.len());
            print_hex(&opaque.bytes);
        }
        typed => println!("{typed:#?}"),
    }

    let encoded = catalog
        .encode(&record)
        .context("Failed to re-encode record")?;
    if encoded != bytes {
        bail!("Re-encoded {code} block differs from input");
    }
    println!("Round trip: OK ({} bytes)", encoded.len());

    Ok(())
}

fn show_timeline(catalog: &CommandCatalog, input: PathBuf, frame: Option<usize>, json: bool) -> Result<()> {
    let file = File::open(&input).context("Failed to open event file")?;
    let event: Event =
        serde_json::from_reader(BufReader::new(file)).context("Failed to parse event JSON")?;
    tracing::info!(
        frame_count = event.frame_count,
        commands = event.commands.len(),
        audio_commands = event.audio_commands.len(),
        "loaded event"
    );

    let failures = catalog
        .decode_all(&event.commands)
        .into_iter()
        .chain(catalog.decode_all(&event.audio_commands))
        .filter(|r| r.is_err())
        .count();
    if failures > 0 {
        tracing::warn!(failures, "some command parameters could not be decoded");
    }

    let timeline = Timeline::from_source(&event);

    if json {
        let out = serde_json::to_string_pretty(&timeline).context("Failed to serialize timeline")?;
        println!("{out}");
        return Ok(());
    }

    match frame {
        Some(frame) => print_frame(&timeline, frame),
        None => print_summary(&timeline),
    }

    Ok(())
}

fn print_summary(timeline: &Timeline) {
    println!("\n=== Timeline ===");
    println!("Frames: {}", timeline.frame_count());
    println!("Commands placed: {}", timeline.total_commands());

    println!("\n=== Categories ===");
    for category in timeline.categories() {
        if category.is_empty() {
            continue;
        }
        println!(
            "  [{:2}] {:<9} {:4} commands, up to {} per frame",
            category.index(),
            category.name(),
            category.commands().len(),
            category.max_in_one_frame()
        );
    }
}

fn print_frame(timeline: &Timeline, frame: usize) {
    let commands = timeline.commands_at(frame);
    println!("\n=== Frame {} ===", frame + 1);
    if commands.is_empty() {
        println!("  (no commands)");
        return;
    }
    for command in commands {
        println!(
            "  {} {} #{} slot {} for {} frames",
            command.code, command.kind, command.source_index, command.position_within_frame, command.duration
        );
    }
}

fn list_codes(catalog: &CommandCatalog) {
    for code in catalog.codes() {
        let size = catalog.record_size(code).unwrap_or_default();
        println!("{code}  {size} bytes");
    }
}

fn print_hex(bytes: &[u8]) {
    for (i, row) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = row.iter().map(|b| format!("{b:02x}")).collect();
        println!("  {:04x}: {}", i * 16, hex.join(" "));
    }
}
