/*!
 * procwait - Main Entry Point
 *
 * - `flags`: print the wait option constants
 * - `run`:   spawn a command and report its state changes until it ends
 * - `wait`:  report on children this process already has
 */

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;

use procwait::cli::{Cli, Commands};
use procwait::wait::{flag_constants, render_flag_constants};
use procwait::{
    init_tracing, ExecutionConfig, JsonReporter, ProcessError, ProcessExecutor, StatusObserver,
    Supervisor, TextReporter, WaitConfig, WaitError, WaitTarget, Waiter,
};

fn reporter(json: bool) -> Box<dyn StatusObserver + Send> {
    if json {
        Box::new(JsonReporter::stdout())
    } else {
        Box::new(TextReporter::stdout())
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize structured tracing
    init_tracing();
    debug!(command = ?cli.command, "procwait starting");

    match cli.command {
        Commands::Flags => {
            let mut stdout = std::io::stdout();
            if cli.json {
                let flags = serde_json::to_string(&flag_constants()).into_diagnostic()?;
                writeln!(stdout, "{}", flags).into_diagnostic()?;
            } else {
                write!(stdout, "{}", render_flag_constants()).into_diagnostic()?;
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Run {
            wait,
            no_forward,
            command,
        } => {
            // SameGroup stands for the spawned child itself
            let config = WaitConfig::from_args(&wait, WaitTarget::SameGroup)?;
            let exec = ExecutionConfig::from_argv(&command)
                .ok_or_else(|| ProcessError::InvalidCommand("missing program".to_string()))?;

            let supervisor =
                Supervisor::new(ProcessExecutor::new(), config).with_forwarding(!no_forward);
            let outcome = supervisor.run(&exec, reporter(cli.json)).await?;

            Ok(exit_code(outcome.exit_code()))
        }

        Commands::Wait { wait } => {
            let config = WaitConfig::from_args(&wait, WaitTarget::SameGroup)?;
            let waiter = Waiter::from_config(&config);
            let mut observer = reporter(cli.json);

            let outcome = tokio::task::spawn_blocking(move || {
                waiter.wait_until_terminal(&mut observer)
            })
            .await
            .map_err(|e| WaitError::TaskFailed(e.to_string()))??;

            Ok(exit_code(outcome.exit_code()))
        }
    }
}
