// crates/doc-contracts-cli/src/main.rs
// ============================================================================
// Module: Doc Contracts CLI Entry Point
// Description: Command dispatcher for documentation scanning and response checks.
// Purpose: Provide a fail-closed CLI over the Doc Contracts scanner and validator.
// Dependencies: clap, doc-contracts-core, doc-contracts-providers, doc-contracts-config,
// serde, thiserror.
// ============================================================================

//! ## Overview
//! The `doc-contracts` CLI scans markdown documentation into document models
//! and checks recorded HTTP responses against scenario expectations. All
//! user-facing strings are routed through the message catalog. Inputs are
//! untrusted; every file read is bounded by a configured size limit.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use doc_contracts_cli::t;
use doc_contracts_config::AuditSinkKind;
use doc_contracts_config::DocContractsConfig;
use doc_contracts_core::DocumentModel;
use doc_contracts_core::DocumentScanner;
use doc_contracts_core::ExpectationValidator;
use doc_contracts_core::HttpResponse;
use doc_contracts_core::NoopScanAuditSink;
use doc_contracts_core::ScanAuditSink;
use doc_contracts_core::ScenarioDefinition;
use doc_contracts_core::Severity;
use doc_contracts_core::StandardKeyClassifier;
use doc_contracts_core::ValidationDiagnostic;
use doc_contracts_core::load_scenarios;
use doc_contracts_providers::FileScanAuditSink;
use doc_contracts_providers::JsonPathEvaluator;
use doc_contracts_providers::MarkdownBlockParser;
use doc_contracts_providers::StderrScanAuditSink;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a scenario file.
const MAX_SCENARIO_FILE_BYTES: usize = 4 * 1024 * 1024;
/// Allowance for the status line and headers of a recorded response.
const MAX_RESPONSE_HEAD_BYTES: usize = 64 * 1024;
/// Maximum directory depth walked by `scan`.
const MAX_WALK_DEPTH: usize = 32;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "doc-contracts", version, disable_help_subcommand = true)]
struct Cli {
    /// Configuration file (overrides `DOC_CONTRACTS_CONFIG`).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan markdown documentation into document models.
    Scan(ScanCommand),
    /// Check a recorded HTTP response against scenario expectations.
    Check(CheckCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `scan`.
#[derive(Args, Debug)]
struct ScanCommand {
    /// Markdown files or directories to scan.
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// JSON file holding one scenario or an array of scenarios.
    #[arg(long, value_name = "FILE")]
    scenarios: PathBuf,
    /// Recorded raw HTTP response.
    #[arg(long, value_name = "FILE")]
    response: PathBuf,
    /// Only check the named scenario.
    #[arg(long, value_name = "NAME")]
    scenario: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Doc Contracts configuration file.
    Validate,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Scan(command) => command_scan(config_path, &command),
        Commands::Check(command) => command_check(config_path, &command),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(config_path),
    }
}

/// Loads configuration, mapping failures to a CLI error.
fn load_config(path: Option<&Path>) -> CliResult<DocContractsConfig> {
    DocContractsConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Scan Command
// ============================================================================

/// Executes the `scan` command.
fn command_scan(config_path: Option<&Path>, command: &ScanCommand) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let audit = build_audit_sink(&config)?;
    let models = scan_paths(&config, audit.as_ref(), &command.paths)?;
    let output = serde_json::to_string_pretty(&models)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the scan audit sink selected by configuration.
fn build_audit_sink(config: &DocContractsConfig) -> CliResult<Box<dyn ScanAuditSink>> {
    match (config.audit.sink, config.audit.path.as_deref()) {
        (AuditSinkKind::None, _) => Ok(Box::new(NoopScanAuditSink)),
        (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrScanAuditSink)),
        (AuditSinkKind::File, Some(path)) => FileScanAuditSink::new(Path::new(path))
            .map(|sink| Box::new(sink) as Box<dyn ScanAuditSink>)
            .map_err(|err| CliError::new(t!("audit.open_failed", path = path, error = err))),
        (AuditSinkKind::File, None) => Err(CliError::new(t!(
            "config.load_failed",
            error = "audit.path is required when audit.sink is file"
        ))),
    }
}

/// Scans every document reachable from `paths`, in argument then path order.
fn scan_paths(
    config: &DocContractsConfig,
    audit: &dyn ScanAuditSink,
    paths: &[PathBuf],
) -> CliResult<Vec<DocumentModel>> {
    let parser = MarkdownBlockParser;
    let scanner = DocumentScanner::new(&parser, audit).with_limits(config.scan.limits());
    let mut models = Vec::new();
    for root in paths {
        for (path, display_name) in collect_documents(config, root)? {
            let text = read_text(&path, &t!("input.kind.document"), config.scan.max_document_bytes)?;
            let model = scanner.scan(&display_name, &text).map_err(|err| {
                CliError::new(t!("scan.failed", path = path.display(), error = err))
            })?;
            models.push(model);
        }
    }
    Ok(models)
}

/// Lists documents under `root` with their display names.
///
/// A file argument is scanned regardless of extension; directories are
/// walked recursively in sorted order, keeping configured extensions.
fn collect_documents(
    config: &DocContractsConfig,
    root: &Path,
) -> CliResult<Vec<(PathBuf, String)>> {
    if !root.is_dir() {
        let name = root.file_name().map_or_else(
            || root.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        return Ok(vec![(root.to_path_buf(), format!("/{name}"))]);
    }
    let mut documents = Vec::new();
    walk_directory(config, root, root, 0, &mut documents)?;
    Ok(documents)
}

/// Recursively collects matching files below `dir`.
fn walk_directory(
    config: &DocContractsConfig,
    root: &Path,
    dir: &Path,
    depth: usize,
    documents: &mut Vec<(PathBuf, String)>,
) -> CliResult<()> {
    let walk_error =
        |err: std::io::Error| CliError::new(t!("scan.walk_failed", path = dir.display(), error = err));
    if depth > MAX_WALK_DEPTH {
        return Err(walk_error(std::io::Error::other("directory nesting too deep")));
    }
    let mut entries = fs::read_dir(dir)
        .map_err(walk_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_error)?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(walk_error)?;
        if file_type.is_dir() {
            walk_directory(config, root, &path, depth + 1, documents)?;
        } else if file_type.is_file() && config.scan.matches_extension(&path) {
            let display_name = display_name_for(root, &path);
            documents.push((path, display_name));
        }
    }
    Ok(())
}

/// Formats `/relative/path.md` using forward slashes.
fn display_name_for(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Diagnostics for one checked scenario.
#[derive(Debug, Serialize)]
struct ScenarioReport {
    /// Scenario name.
    scenario: String,
    /// True when the scenario has no failing diagnostics.
    passed: bool,
    /// Diagnostics in key order.
    diagnostics: Vec<ValidationDiagnostic>,
}

/// Executes the `check` command.
fn command_check(config_path: Option<&Path>, command: &CheckCommand) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let scenarios_text =
        read_text(&command.scenarios, &t!("input.kind.scenarios"), MAX_SCENARIO_FILE_BYTES)?;
    let scenarios = load_scenarios(&scenarios_text).map_err(|err| {
        CliError::new(t!("check.scenarios_invalid", path = command.scenarios.display(), error = err))
    })?;
    let selected = select_scenarios(scenarios, command.scenario.as_deref(), &command.scenarios)?;

    let response_limit = config.validation.max_body_bytes.saturating_add(MAX_RESPONSE_HEAD_BYTES);
    let response_text = read_text(&command.response, &t!("input.kind.response"), response_limit)?;
    let response = HttpResponse::from_raw(&response_text).map_err(|err| {
        CliError::new(t!("check.response_invalid", path = command.response.display(), error = err))
    })?;

    let fail_on_warnings = config.validation.fail_on_warnings;
    let evaluator = JsonPathEvaluator::new(config.validation.max_body_bytes);
    let validator = ExpectationValidator::new(&StandardKeyClassifier, &evaluator);
    let reports: Vec<ScenarioReport> = selected
        .iter()
        .map(|scenario| {
            let diagnostics = validator.validate_to_vec(scenario, &response);
            ScenarioReport {
                scenario: scenario.name.clone(),
                passed: !is_failing(&diagnostics, fail_on_warnings),
                diagnostics,
            }
        })
        .collect();

    let output = serde_json::to_string_pretty(&reports)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let (errors, warnings) = count_severities(&reports);
    write_stderr_line(&t!(
        "check.summary",
        errors = errors,
        warnings = warnings,
        scenarios = reports.len()
    ))
    .map_err(|err| CliError::new(output_error("stderr", &err)))?;

    if reports.iter().all(|report| report.passed) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Keeps every scenario, or only the named one.
fn select_scenarios(
    scenarios: Vec<ScenarioDefinition>,
    name: Option<&str>,
    path: &Path,
) -> CliResult<Vec<ScenarioDefinition>> {
    let Some(name) = name else {
        return Ok(scenarios);
    };
    let selected: Vec<ScenarioDefinition> =
        scenarios.into_iter().filter(|scenario| scenario.name == name).collect();
    if selected.is_empty() {
        return Err(CliError::new(t!(
            "check.scenario_not_found",
            name = name,
            path = path.display()
        )));
    }
    Ok(selected)
}

/// Returns true when diagnostics fail the check.
fn is_failing(diagnostics: &[ValidationDiagnostic], fail_on_warnings: bool) -> bool {
    diagnostics.iter().any(|diagnostic| {
        diagnostic.is_error() || (fail_on_warnings && diagnostic.severity == Severity::Warning)
    })
}

/// Counts error and warning diagnostics across reports.
fn count_severities(reports: &[ScenarioReport]) -> (usize, usize) {
    reports.iter().flat_map(|report| &report.diagnostics).fold(
        (0, 0),
        |(errors, warnings), diagnostic| match diagnostic.severity {
            Severity::Error => (errors + 1, warnings),
            Severity::Warning => (errors, warnings + 1),
        },
    )
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    load_config(config_path)?;
    let message = config_path.map_or_else(
        || t!("config.valid_defaults"),
        |path| t!("config.valid", path = path.display()),
    );
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads a bounded UTF-8 file, mapping failures to catalog messages.
fn read_text(path: &Path, kind: &str, max_bytes: usize) -> CliResult<String> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(t!("input.invalid_utf8", kind = kind, path = path.display())))
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
