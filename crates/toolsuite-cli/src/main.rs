// crates/toolsuite-cli/src/main.rs
// ============================================================================
// Module: Tool Suite CLI Entry Point
// Description: Command dispatcher for test suite generation workflows.
// Purpose: Generate, apply, remove, check, and preview generated tool test suites.
// Dependencies: clap, thiserror, toolsuite-config, toolsuite-core, toolsuite-gen, tracing
// ============================================================================

//! ## Overview
//! The `toolsuite` binary wires [`SuiteConfig`] into a file-backed
//! [`SuiteLifecycle`] and exposes one subcommand per lifecycle entry point:
//!
//! - `generate`: reconcile the output directory with the full tool registry.
//! - `apply`: process an incremental change set.
//! - `remove`: delete suites for named tools.
//! - `check`: report drift between stored suites and the registry.
//! - `plan`: print the assembled suite for one tool as JSON without writing.
//!
//! Per-tool failures never stop a batch; the process exits non-zero when any
//! tool failed, any input entry was rejected, or, for `check`, when any suite
//! is not up to date. Logs go to
//! stderr through `tracing`; command results go to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use toolsuite_config::SuiteConfig;
use toolsuite_core::Clock;
use toolsuite_core::SuiteAssembler;
use toolsuite_core::SystemClock;
use toolsuite_core::ToolName;
use toolsuite_gen::Applied;
use toolsuite_gen::ChangeSet;
use toolsuite_gen::FileSuiteStore;
use toolsuite_gen::LifecycleReport;
use toolsuite_gen::RenderOptions;
use toolsuite_gen::SuiteLifecycle;
use toolsuite_gen::SuiteStore;
use toolsuite_gen::ToolRegistry;
use toolsuite_gen::VolatileMask;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "toolsuite",
    version,
    about = "Template-driven test suite generator",
    disable_help_subcommand = true
)]
struct Cli {
    /// Config file path (overrides `TOOLSUITE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Output directory for generated suites (overrides `[output] dir`).
    #[arg(long, value_name = "DIR", global = true)]
    out: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate every registered tool and remove suites for unregistered tools.
    Generate(RegistryArgs),
    /// Apply an added/modified/removed change set.
    Apply(ApplyCommand),
    /// Remove generated suites for the named tools.
    Remove(RemoveCommand),
    /// Report suites that are missing, stale, or out of date.
    Check(RegistryArgs),
    /// Print the assembled suite for one tool as JSON.
    Plan(PlanCommand),
}

/// Registry selection shared by registry-driven commands.
#[derive(Args, Debug)]
struct RegistryArgs {
    /// Registry path (overrides `[registry] path`).
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,
}

/// Arguments for `apply`.
#[derive(Args, Debug)]
struct ApplyCommand {
    /// Change-set JSON file.
    #[arg(long, value_name = "PATH")]
    changes: PathBuf,
}

/// Arguments for `remove`.
#[derive(Args, Debug)]
struct RemoveCommand {
    /// Tool names whose suites should be removed.
    #[arg(required = true, value_name = "TOOL")]
    tools: Vec<String>,
}

/// Arguments for `plan`.
#[derive(Args, Debug)]
struct PlanCommand {
    /// Tool name to assemble.
    #[arg(value_name = "TOOL")]
    tool: String,
    /// Registry selection.
    #[command(flatten)]
    registry: RegistryArgs,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Lines to print and the overall status of a command.
#[derive(Debug, Default, PartialEq, Eq)]
struct CommandOutput {
    /// Lines written to stdout.
    lines: Vec<String>,
    /// False when any tool failed or drifted.
    success: bool,
}

impl CommandOutput {
    /// Maps the status to a process exit code.
    fn exit_code(&self) -> ExitCode {
        if self.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Executes the parsed command and prints its output.
fn run(cli: Cli) -> CliResult<ExitCode> {
    let output = execute(cli, SystemClock)?;
    for line in &output.lines {
        write_stdout_line(line)
            .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))?;
    }
    Ok(output.exit_code())
}

/// Dispatches a parsed command.
fn execute<C: Clock>(cli: Cli, clock: C) -> CliResult<CommandOutput> {
    let config = load_config(cli.config.as_deref(), cli.out)?;
    match cli.command {
        Commands::Generate(args) => command_generate(&config, &args, clock),
        Commands::Apply(command) => command_apply(&config, &command, clock),
        Commands::Remove(command) => command_remove(&config, &command, clock),
        Commands::Check(args) => command_check(&config, &args, clock),
        Commands::Plan(command) => command_plan(&config, &command, clock),
    }
}

// ============================================================================
// SECTION: Wiring
// ============================================================================

/// Loads configuration and applies command-line overrides.
fn load_config(path: Option<&Path>, out: Option<PathBuf>) -> CliResult<SuiteConfig> {
    let mut config = SuiteConfig::load(path).map_err(|err| CliError::new(err.to_string()))?;
    if let Some(out) = out {
        config.output.dir = out;
        config.validate().map_err(|err| CliError::new(err.to_string()))?;
    }
    Ok(config)
}

/// Builds the file-backed lifecycle manager described by `config`.
fn lifecycle<C: Clock>(config: &SuiteConfig, clock: C) -> SuiteLifecycle<FileSuiteStore, C> {
    let store = FileSuiteStore::with_extension(&config.output.dir, config.output.extension.as_str());
    SuiteLifecycle::new(store, assembler(config, clock), render_options(config))
}

/// Builds the suite assembler described by `config`.
fn assembler<C: Clock>(config: &SuiteConfig, clock: C) -> SuiteAssembler<C> {
    SuiteAssembler::new(clock).with_policy(config.synthesis.optional_params)
}

/// Extracts rendering options from `config`.
fn render_options(config: &SuiteConfig) -> RenderOptions {
    RenderOptions {
        client_import: config.output.client_import.clone(),
        client_type: config.output.client_type.clone(),
    }
}

/// Loads the registry from the override or the configured path.
fn load_registry(config: &SuiteConfig, args: &RegistryArgs) -> CliResult<ToolRegistry> {
    let path = args.registry.as_deref().unwrap_or(config.registry.path.as_path());
    ToolRegistry::load(path).map_err(|err| CliError::new(err.to_string()))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `generate`.
fn command_generate<C: Clock>(
    config: &SuiteConfig,
    args: &RegistryArgs,
    clock: C,
) -> CliResult<CommandOutput> {
    let registry = load_registry(config, args)?;
    let mut lifecycle = lifecycle(config, clock);
    let existing = lifecycle.store().list().map_err(|err| CliError::new(err.to_string()))?;
    let changes = ChangeSet::reconcile(&registry, &existing);
    Ok(report_output(&lifecycle.apply(&changes)))
}

/// Executes `apply`.
fn command_apply<C: Clock>(
    config: &SuiteConfig,
    command: &ApplyCommand,
    clock: C,
) -> CliResult<CommandOutput> {
    let changes =
        ChangeSet::load(&command.changes).map_err(|err| CliError::new(err.to_string()))?;
    let mut lifecycle = lifecycle(config, clock);
    Ok(report_output(&lifecycle.apply(&changes)))
}

/// Executes `remove`.
fn command_remove<C: Clock>(
    config: &SuiteConfig,
    command: &RemoveCommand,
    clock: C,
) -> CliResult<CommandOutput> {
    let names = command
        .tools
        .iter()
        .map(|tool| ToolName::parse(tool.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::new(err.to_string()))?;
    let mut lifecycle = lifecycle(config, clock);
    Ok(report_output(&lifecycle.apply(&ChangeSet::removing(names))))
}

/// Executes `check`.
fn command_check<C: Clock>(
    config: &SuiteConfig,
    args: &RegistryArgs,
    clock: C,
) -> CliResult<CommandOutput> {
    let registry = load_registry(config, args)?;
    let mask = VolatileMask::new()
        .map_err(|err| CliError::new(format!("invalid drift pattern: {err}")))?;
    let results = lifecycle(config, clock)
        .check(&registry, &mask)
        .map_err(|err| CliError::new(err.to_string()))?;
    let mut output = CommandOutput {
        success: true,
        ..CommandOutput::default()
    };
    let mut dirty = 0_usize;
    for entry in registry.rejected() {
        dirty += 1;
        output.lines.push(format!("{:<10} {}: {}", "rejected", entry.label(), entry.reason));
    }
    for (tool, status) in results {
        match status {
            Ok(status) => {
                if !status.is_clean() {
                    dirty += 1;
                }
                output.lines.push(format!("{:<10} {tool}", status.as_str()));
            }
            Err(err) => {
                dirty += 1;
                output.lines.push(format!("{:<10} {tool}: {err}", "error"));
            }
        }
    }
    output.success = dirty == 0;
    output.lines.push(if dirty == 0 {
        "all suites up to date".to_string()
    } else {
        format!("{dirty} suite(s) need regeneration")
    });
    Ok(output)
}

/// Executes `plan`.
fn command_plan<C: Clock>(
    config: &SuiteConfig,
    command: &PlanCommand,
    clock: C,
) -> CliResult<CommandOutput> {
    let registry = load_registry(config, &command.registry)?;
    let tool = registry
        .get(&command.tool)
        .ok_or_else(|| CliError::new(format!("tool `{}` is not in the registry", command.tool)))?;
    let suite =
        assembler(config, clock).assemble(tool).map_err(|err| CliError::new(err.to_string()))?;
    let json = serde_json::to_string_pretty(&suite)
        .map_err(|err| CliError::new(format!("failed to serialize suite: {err}")))?;
    Ok(CommandOutput {
        lines: vec![json],
        success: true,
    })
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Formats a lifecycle report as one line per action plus a summary.
fn report_output(report: &LifecycleReport) -> CommandOutput {
    let mut lines = Vec::with_capacity(report.rejected.len() + report.outcomes.len() + 1);
    for entry in &report.rejected {
        lines.push(format!("{} {}: rejected: {}", entry.section, entry.label(), entry.reason));
    }
    for outcome in &report.outcomes {
        let trigger = outcome.trigger.as_str();
        let tool = &outcome.tool;
        lines.push(match &outcome.result {
            Ok(Applied::Written {
                tests,
                location,
                ..
            }) => format!("{trigger} {tool}: wrote {tests} tests to {location}"),
            Ok(Applied::Removed) => format!("{trigger} {tool}: removed"),
            Ok(Applied::AlreadyAbsent) => format!("{trigger} {tool}: already absent"),
            Err(err) => format!("{trigger} {tool}: failed: {err}"),
        });
    }
    lines.push(format!(
        "summary: {} written, {} removed, {} failed",
        report.written(),
        report.removed(),
        report.failed()
    ));
    CommandOutput {
        lines,
        success: report.is_success(),
    }
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
