//! `yaml2json` CLI — convert one YAML document to JSON.
//!
//! ## Usage
//!
//! ```sh
//! # YAML on stdin → compact JSON on stdout
//! echo 'key: value' | yaml2json
//!
//! # From file to file, pretty-printed
//! yaml2json -i config.yaml -o config.json --pretty
//!
//! # Accept integer/boolean mapping keys by writing them as strings
//! printf '1: one\n2: two\n' | yaml2json --stringify-keys
//!
//! # Reverse direction
//! echo '{"key":"value"}' | yaml2json --from json --to yaml
//! ```
//!
//! Exit status is 0 on success and non-zero on any failure. Diagnostics go to
//! stderr and name the failing stage; set `RUST_LOG=debug` for per-stage logs.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use yaml2json_core::{
    Bridge, Decoder, Encoder, Format, JsonDecoder, JsonEncoder, KeyPolicy, YamlDecoder,
    YamlEncoder,
};

#[derive(Parser)]
#[command(
    name = "yaml2json",
    version,
    about = "Convert a YAML document to JSON"
)]
struct Cli {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (writes to stdout if omitted). Only created when the
    /// conversion succeeds.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source format: yaml or json
    #[arg(long, default_value = "yaml")]
    from: Format,

    /// Target format: json or yaml
    #[arg(long, default_value = "json")]
    to: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write null, boolean and number mapping keys as JSON strings instead of failing
    #[arg(long)]
    stringify_keys: bool,

    /// Only accept true/false as YAML booleans (yes/no/on/off stay strings)
    #[arg(long)]
    strict_booleans: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(&cli)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let bridge = Bridge::new(build_decoder(cli), build_encoder(cli));
    let input = open_input(cli.input.as_deref())?;
    debug!(from = %cli.from, to = %cli.to, "starting conversion");

    let failed = || format!("Failed to convert {} to {}", cli.from, cli.to);
    match cli.output.as_deref() {
        Some(path) => {
            let mut buffer = Vec::new();
            bridge.convert(input, &mut buffer).with_context(failed)?;
            std::fs::write(path, buffer)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            bridge
                .convert(input, io::stdout().lock())
                .with_context(failed)?;
        }
    }
    Ok(())
}

fn build_decoder(cli: &Cli) -> Box<dyn Decoder> {
    match cli.from {
        Format::Yaml => Box::new(YamlDecoder::new().strict_booleans(cli.strict_booleans)),
        Format::Json => {
            if cli.strict_booleans {
                warn!("--strict-booleans has no effect on JSON input");
            }
            Box::new(JsonDecoder::new())
        }
    }
}

fn build_encoder(cli: &Cli) -> Box<dyn Encoder> {
    match cli.to {
        Format::Json => {
            let key_policy = if cli.stringify_keys {
                KeyPolicy::Stringify
            } else {
                KeyPolicy::Strict
            };
            Box::new(JsonEncoder::new().pretty(cli.pretty).key_policy(key_policy))
        }
        Format::Yaml => {
            if cli.pretty || cli.stringify_keys {
                warn!("--pretty and --stringify-keys only apply to JSON output");
            }
            Box::new(YamlEncoder::new())
        }
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
