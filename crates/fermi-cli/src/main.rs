use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use glob::glob;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FERMI_BUILD_INFO"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "fermi-analyze")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Analyze NextWindow Fermi USB packets from usbmon captures (offline, read-only).",
    long_about = None,
    after_help = "Examples:\n  # Analyze a usbmon capture\n  fermi-analyze usb_capture.log\n\n  # One JSON object per packet\n  fermi-analyze --json usb_capture.log\n\n  # Hex dump a binary file\n  fermi-analyze --hex-dump raw_data.bin"
)]
struct Cli {
    /// File to analyze (a glob pattern must match exactly one file)
    file: PathBuf,

    /// Show hex dump instead of parsing
    #[arg(long)]
    hex_dump: bool,

    /// Write one JSON object per recognized packet
    #[arg(long, conflicts_with = "hex_dump")]
    json: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = if cli.hex_dump {
        cmd_hex_dump(&cli.file)
    } else {
        cmd_analyze(&cli.file, cli.json)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.report();
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Fatal error shown as `error: ...` plus an optional `hint: ...` line.
#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn report(&self) {
        eprintln!("error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("hint: {hint}");
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"))
    }
}

fn cmd_analyze(input: &Path, json: bool) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    validate_input_file(&input)?;
    log::info!("Analyzing capture log {}", input.display());

    let analyses = fermi_core::analyze_log_file(&input)
        .with_context(|| format!("Failed to open capture log: {}", input.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if !json {
        writeln!(out, "Analyzing {}...\n", input.display()).context("Failed to write output")?;
    }

    let mut packets = 0u64;
    for analysis in analyses {
        let analysis = analysis.context("Capture log analysis failed")?;
        packets += 1;
        if json {
            serde_json::to_writer(&mut out, &analysis).context("JSON serialization failed")?;
            writeln!(out).context("Failed to write output")?;
        } else {
            write!(out, "{}", analysis).context("Failed to write output")?;
        }
    }
    out.flush().context("Failed to write output")?;

    log::info!("{} recognized packets in {}", packets, input.display());
    Ok(())
}

fn cmd_hex_dump(input: &Path) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    validate_input_file(&input)?;

    let data = fermi_core::read_binary(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "Hex dump of {} ({} bytes):\n", input.display(), data.len())
        .context("Failed to write output")?;
    fermi_core::write_hex_dump(&mut out, &data).context("Failed to write output")?;
    out.flush().context("Failed to write output")?;
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(format!("file '{}' not found", input.display()))
            .with_hint("check the path; glob patterns must be quoted"));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(
            CliError::new(format!("input is not a file: {}", input.display()))
                .with_hint("pass a usbmon text capture or, with --hex-dump, any file"),
        );
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    // An existing file wins even if its name contains glob metacharacters.
    if input.exists() || !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(format!("invalid input pattern '{pattern}'"))
            .with_hint(format!("pattern error: {}", err.msg))
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(format!("invalid input pattern '{pattern}'"))
                .with_hint(format!("pattern error: {err}"))
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(format!("no files match pattern '{pattern}'"))
            .with_hint("check the path or quote the pattern"));
    }
    if matches.len() > 1 {
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(
            CliError::new(message).with_hint("pass a single capture file, or run once per file")
        );
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
