use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use capstat_core::{
    AnalysisError, AnalysisReport, AnalyzerConfig, ConversationStrategy, PacketRecord,
    ReportFilter, ToolError, TsharkRunner,
};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use log::info;
use serde::Serialize;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CAPSTAT_BUILD_COMMIT"),
    " ",
    env!("CAPSTAT_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  capstat capture analyse capture.pcapng -o summary.json\n  capstat capture analyze capture.pcap --stdout --pretty --packets\n  capstat capture packets capture.pcapng --stdout";

#[derive(Parser, Debug)]
#[command(name = "capstat")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Summarise PCAP/PCAPNG captures through tshark: protocols, conversations, totals.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on PCAP/PCAPNG inputs.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Summarise a capture into a JSON report.
    #[command(alias = "analyze", after_help = EXAMPLES)]
    Analyse {
        #[command(flatten)]
        common: CommonArgs,

        /// Conversation source: `fields` (per-frame export) or `table` (tshark's table)
        #[arg(long, default_value_t = ConversationStrategy::Fields)]
        conversations: ConversationStrategy,

        /// Skip the protocol hierarchy report
        #[arg(long)]
        no_hierarchy: bool,

        /// Attach per-packet detail records
        #[arg(long)]
        packets: bool,

        /// Keep only protocols and conversations containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Export per-packet detail records (IP/TCP/UDP frames) as JSON.
    Packets {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to a .pcap or .pcapng file
    input: PathBuf,

    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// tshark executable
    #[arg(long, env = "CAPSTAT_TSHARK", default_value = "tshark")]
    tshark: PathBuf,
}

impl CommonArgs {
    fn pretty(&self) -> bool {
        self.pretty && !self.compact
    }
}

#[derive(Serialize)]
struct PacketExport<'a> {
    packets: &'a [PacketRecord],
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Analyse {
                common,
                conversations,
                no_hierarchy,
                packets,
                filter,
            } => {
                let config = AnalyzerConfig {
                    conversation_strategy: conversations,
                    protocol_hierarchy: !no_hierarchy,
                    packet_details: packets,
                };
                cmd_capture_analyse(common, config, filter)
            }
            CaptureCommands::Packets { common } => cmd_capture_packets(common),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_capture_analyse(
    common: CommonArgs,
    config: AnalyzerConfig,
    filter: Option<String>,
) -> Result<(), CliError> {
    let target = prepare(&common)?;
    let runner = TsharkRunner::new(&common.tshark);
    info!(
        "analysing {} (conversations: {})",
        target.input.display(),
        config.conversation_strategy
    );

    let report = capstat_core::analyze_capture(&runner, &target.input, &config)
        .map_err(|err| analysis_failure("capture analysis failed", err, &common.tshark))?;
    let report = match filter.as_deref() {
        Some(text) => ReportFilter::new(text).apply(&report),
        None => report,
    };

    let json = serialize(&report, common.pretty())?;
    emit(&json, &target, common.quiet, summary_line(&report))
}

fn cmd_capture_packets(common: CommonArgs) -> Result<(), CliError> {
    let target = prepare(&common)?;
    let runner = TsharkRunner::new(&common.tshark);

    let packets = capstat_core::extract_packets(&runner, &target.input)
        .map_err(|err| analysis_failure("packet extraction failed", err, &common.tshark))?;

    let json = serialize(&PacketExport { packets: &packets }, common.pretty())?;
    emit(
        &json,
        &target,
        common.quiet,
        format!("{} packets", packets.len()),
    )
}

/// Validated input and destination for one command.
struct Target {
    input: PathBuf,
    report: Option<PathBuf>,
}

fn prepare(common: &CommonArgs) -> Result<Target, CliError> {
    let input = resolve_input_path(&common.input)?;
    validate_input_file(&input)?;
    let input_abs = fs::canonicalize(&input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;

    if common.stdout {
        return Ok(Target {
            input,
            report: None,
        });
    }
    let report = common.report.clone().ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    if resolve_output_path(&report)?.is_some_and(|target| target == input_abs) {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }

    Ok(Target {
        input,
        report: Some(report),
    })
}

fn resolve_output_path(report: &Path) -> Result<Option<PathBuf>, CliError> {
    let parent = match report.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Ok(None),
    };
    if !parent.exists() {
        return Ok(None);
    }
    let dir = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report.display()))?;
    let file_name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report.display()))?;
    Ok(Some(dir.join(file_name)))
}

fn emit(json: &str, target: &Target, quiet: bool, summary: String) -> Result<(), CliError> {
    let Some(report) = target.report.as_ref() else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: {} -> {}", summary, report.display());
    }
    Ok(())
}

fn summary_line(report: &AnalysisReport) -> String {
    format!(
        "{} packets, {} bytes, {} protocols, {} conversations",
        report.packet_summary.total_packets,
        report.packet_summary.total_bytes,
        report.protocols.len(),
        report.conversations.len()
    )
}

fn analysis_failure(context: &str, err: AnalysisError, tshark: &Path) -> CliError {
    let hint = match &err {
        AnalysisError::Tool {
            source: ToolError::Spawn { .. },
            ..
        } => Some(format!(
            "install tshark or point --tshark / CAPSTAT_TSHARK at it (tried {})",
            tshark.display()
        )),
        _ => None,
    };
    CliError::new(format!("{context}: {err}"), hint)
}

fn serialize<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .pcap or .pcapng".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
