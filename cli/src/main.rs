//! CLI entrypoint for redteam-cli
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use redteam_application::{
    CheckScenarioUseCase, EditScenariosUseCase, ExecutePhaseUseCase, ExecutionParams,
    RunScenarioUseCase, RunToolUseCase,
};
use redteam_domain::{Catalog, RunContext};
use redteam_infrastructure::{
    ConfigLoader, FileLogSinkFactory, FileUserConfig, JsonScenarioRepository, TokioProcessRunner,
    discover_tools,
};
use redteam_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleLineSink, ConsoleProgress, ListTarget, ParseFailure,
    ScenarioAction, ToolAction, classify_parse_error, normalize_legacy_flags,
};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status after a second Ctrl-C (128 + SIGINT)
const FORCED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse_from(normalize_legacy_flags(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match classify_parse_error(err.kind()) {
            ParseFailure::Display => {
                err.print()?;
                return Ok(());
            }
            ParseFailure::ShowUsage => return print_usage(),
            ParseFailure::Fatal => err.exit(),
        },
    };

    // Initialize logging based on verbosity level. Diagnostics go to stderr
    // so they never mix with teed tool output.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Incomplete commands print usage before touching any file
    let command = match cli.command {
        None
        | Some(Command::Scenario { action: None })
        | Some(Command::Tool { action: None }) => return print_usage(),
        Some(ref command) => command,
    };

    info!("Starting redteam-cli");

    // === Configuration ===
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ConfigLoader::user_config_path()?,
    };
    let user_config = ConfigLoader::load_user_config(&config_path)?;

    let tool_db = cli
        .tool_db
        .clone()
        .unwrap_or_else(|| user_config.settings.tool_db.clone());
    let tools = ConfigLoader::load_tool_db(&tool_db)?;
    let catalog = Arc::new(Catalog::new(
        discover_tools(tools).tools,
        user_config.scenarios.clone(),
    ));

    // === Cancellation ===
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if watch_interrupts(tokio::signal::ctrl_c, cancel).await {
                warn!("Interrupted again, exiting without waiting for the tool");
                std::process::exit(FORCED_EXIT_CODE);
            }
        });
    }

    let ctx = RunContext::new(cli.target.clone(), cli.module.clone());

    match command {
        Command::List { what } => {
            if *what != Some(ListTarget::Tools) {
                print!("{}", ConsoleFormatter::format_scenarios(catalog.scenarios()));
            }
            if *what != Some(ListTarget::Scenarios) {
                print!("{}", ConsoleFormatter::format_tools(catalog.tools().iter()));
            }
        }

        Command::Scenario {
            action: Some(ScenarioAction::Run { name }),
        } => {
            let phases = phase_executor(&cli, &user_config, catalog, cancel.clone());
            let report = RunScenarioUseCase::new(phases)
                .with_cancellation(cancel)
                .execute_with_progress(name, &ctx, &ConsoleProgress::new())
                .await?;
            info!(
                "Scenario {} finished with {} of {} phases successful",
                report.scenario,
                report.succeeded(),
                report.attempted()
            );
        }

        Command::Scenario {
            action: Some(ScenarioAction::Check { name }),
        } => {
            let check = CheckScenarioUseCase::new(catalog).execute(name)?;
            print!("{}", ConsoleFormatter::format_check(&check));
        }

        Command::Scenario {
            action: Some(ScenarioAction::Create { name }),
        } => {
            let repo = Arc::new(JsonScenarioRepository::new(config_path.clone()));
            let scenario = EditScenariosUseCase::new(repo, catalog).create(name)?;
            println!(
                "Created scenario {} in {}",
                scenario.name,
                config_path.display()
            );
        }

        Command::Scenario {
            action:
                Some(ScenarioAction::AddPhase {
                    scenario,
                    tool,
                    args,
                }),
        } => {
            let repo = Arc::new(JsonScenarioRepository::new(config_path.clone()));
            let count = EditScenariosUseCase::new(repo, catalog).add_phase(
                scenario,
                tool,
                &args.join(" "),
            )?;
            println!("Added {} to {} as phase {}", tool, scenario, count);
        }

        Command::Tool {
            action: Some(ToolAction::Run { name }),
        } => {
            let phases = phase_executor(&cli, &user_config, catalog, cancel.clone());
            let outcome = RunToolUseCase::new(phases)
                .execute_with_progress(name, &ctx, &ConsoleProgress::new())
                .await
                .with_context(|| format!("Cannot run tool {}", name))?;
            if let Some(line) = ConsoleProgress::outcome_line(&outcome) {
                eprintln!("{}", line);
            }
            if cancel.is_cancelled() {
                bail!("Interrupted while running {}", name);
            }
        }

        Command::Scenario { action: None } | Command::Tool { action: None } => {
            return print_usage();
        }
    }

    Ok(())
}

/// Wire the process runner, log files and run settings together.
///
/// Command-line flags take precedence over the settings file.
fn phase_executor(
    cli: &Cli,
    config: &FileUserConfig,
    catalog: Arc<Catalog>,
    cancel: CancellationToken,
) -> ExecutePhaseUseCase<TokioProcessRunner> {
    let log_dir: PathBuf = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| config.settings.log_dir.clone());
    let params = ExecutionParams::from_timeout_seconds(
        cli.timeout.or(Some(config.settings.phase_timeout_secs)),
    );

    let runner =
        Arc::new(TokioProcessRunner::new(Arc::new(ConsoleLineSink)).with_cancellation(cancel));

    ExecutePhaseUseCase::new(catalog, runner, Arc::new(FileLogSinkFactory::new(log_dir)))
        .with_params(params)
}

/// Cancel the run on the first interrupt.
///
/// Returns `true` when a second interrupt arrives, which means the caller
/// should exit without waiting for the drains. Returns `false` if the signal
/// stream fails.
async fn watch_interrupts<F, Fut>(mut next_interrupt: F, cancel: CancellationToken) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if next_interrupt().await.is_err() {
        return false;
    }
    warn!("Interrupted, stopping the running tool");
    cancel.cancel();
    next_interrupt().await.is_ok()
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
