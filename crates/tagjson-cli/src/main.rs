//! `tagjson` CLI — transform type-tagged JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Transform stdin → stdout (pretty-printed)
//! echo '{"name":{"S":" Alice "},"age":{"N":"030"}}' | tagjson transform
//!
//! # File to file, compact output, keep input key order at the top level
//! tagjson transform -i input.json -o output.json --compact --preserve-order
//!
//! # Report how long the transform took (on stderr)
//! tagjson transform -i input.json --timing
//!
//! # Count kept and omitted top-level fields
//! tagjson stats -i input.json
//! ```
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=tagjson_core=debug` logs every omitted field).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Read};
use std::time::{Duration, Instant};
use tagjson_core::{KeyOrder, TransformOptions, DEFAULT_MAX_DEPTH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tagjson",
    version,
    about = "Transform type-tagged JSON into plain JSON",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a tagged document into plain JSON
    Transform {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Keep the input order of top-level keys instead of sorting them
        #[arg(long)]
        preserve_order: bool,
        /// Maximum tag nesting; deeper values are omitted
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        /// Print the transform processing time to stderr
        #[arg(long)]
        timing: bool,
    },
    /// Show how many top-level fields survive the transform
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Summary printed by `tagjson stats`.
#[derive(Debug, Serialize)]
struct Stats {
    fields: usize,
    kept: usize,
    omitted: usize,
    elapsed_us: u128,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            input,
            output,
            compact,
            preserve_order,
            max_depth,
            timing,
        } => {
            let order = if preserve_order {
                KeyOrder::Insertion
            } else {
                KeyOrder::Sorted
            };
            let opts = TransformOptions::default()
                .with_top_level_order(order)
                .with_max_depth(max_depth);

            let document = parse_document(&read_input(input.as_deref())?)?;
            let (result, elapsed) = timed(|| tagjson_core::transform_document_with(&document, &opts));
            let result = result.context("Failed to transform document")?;

            let mut rendered = if compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            rendered.push('\n');
            write_output(output.as_deref(), &rendered)?;

            if timing {
                eprintln!("Processing time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
            }
        }
        Commands::Stats { input, json } => {
            let document = parse_document(&read_input(input.as_deref())?)?;
            let (result, elapsed) = timed(|| tagjson_core::transform_document(&document));
            let result = result.context("Failed to transform document")?;

            let fields = document.as_object().map_or(0, |m| m.len());
            let kept = result.as_object().map_or(0, |m| m.len());
            let stats = Stats {
                fields,
                kept,
                omitted: fields.saturating_sub(kept),
                elapsed_us: elapsed.as_micros(),
            };

            if json {
                println!("{}", serde_json::to_string(&stats)?);
            } else {
                println!("Fields:   {}", stats.fields);
                println!("Kept:     {}", stats.kept);
                println!("Omitted:  {}", stats.omitted);
                println!("Time:     {} us", stats.elapsed_us);
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays valid JSON. Defaults to `warn`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

fn parse_document(text: &str) -> Result<Value> {
    serde_json::from_str(text).context("Failed to parse input as JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
