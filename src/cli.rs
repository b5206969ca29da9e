//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for procwait using clap's derive macros.

use crate::config::{POLL_INTERVAL_ENV, TIMEOUT_ENV};
use crate::wait::WaitTarget;
use clap::{Args, Parser, Subcommand};

/// procwait - wait for child processes and report how they changed state
#[derive(Parser, Debug)]
#[command(name = "procwait")]
#[command(version)]
#[command(about = "Wait for child processes and report exit, signal, stop and continue status")]
#[command(long_about = None)]
pub struct Cli {
    /// Emit one JSON object per line instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the WNOHANG, WUNTRACED and WCONTINUED flag values
    Flags,

    /// Spawn a command and wait until it exits or is killed
    ///
    /// Usage: run [OPTIONS] -- <COMMAND> [ARGS]...
    Run {
        #[command(flatten)]
        wait: WaitArgs,

        /// Do not forward SIGINT, SIGTERM and SIGHUP to the child
        #[arg(long)]
        no_forward: bool,

        /// Program to run, followed by its arguments
        #[arg(last = true, required = true, num_args = 1..)]
        command: Vec<String>,
    },

    /// Wait on children this process already has (e.g. inherited through exec)
    Wait {
        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// Options shared by every command that runs the wait loop
#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
    /// Children to wait for: any, group, <PID> or pgid:<N>
    #[arg(long)]
    pub target: Option<WaitTarget>,

    /// Do not report stopped children (drops WUNTRACED)
    #[arg(long)]
    pub no_stopped: bool,

    /// Report children resumed by SIGCONT (adds WCONTINUED)
    #[arg(long)]
    pub continued: bool,

    /// Poll with WNOHANG instead of blocking
    #[arg(long)]
    pub nohang: bool,

    /// Sleep between polls, in milliseconds
    #[arg(long, env = POLL_INTERVAL_ENV, default_value_t = 50)]
    pub poll_interval_ms: u64,

    /// Give up after this many milliseconds (implies polling)
    #[arg(long, env = TIMEOUT_ENV)]
    pub timeout_ms: Option<u64>,

    /// Keep waiting until every selected child is gone
    #[arg(long)]
    pub all: bool,
}
