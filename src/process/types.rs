/*!
 * Process Types
 * Configuration for spawned child processes
 */

use crate::core::serde::{is_empty_vec, is_false, is_none};
use serde::{Deserialize, Serialize};

/// Configuration for process execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutionConfig {
    pub command: String,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub env_vars: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "is_none")]
    pub working_dir: Option<String>,
    /// Start from an empty environment instead of inheriting ours
    #[serde(default, skip_serializing_if = "is_false")]
    pub clear_env: bool,
    /// Connect the child's stdin/stdout/stderr to /dev/null
    #[serde(default, skip_serializing_if = "is_false")]
    pub detach_io: bool,
    /// Put the child in a new process group led by itself
    #[serde(default, skip_serializing_if = "is_false")]
    pub own_group: bool,
}

impl ExecutionConfig {
    pub fn new(command: String) -> Self {
        Self {
            command,
            args: vec![],
            env_vars: vec![],
            working_dir: None,
            clear_env: false,
            detach_io: false,
            own_group: false,
        }
    }

    /// First element is the program, the rest its arguments
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (command, args) = argv.split_first()?;
        Some(Self::new(command.clone()).with_args(args.to_vec()))
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_env(mut self, env_vars: Vec<(String, String)>) -> Self {
        self.env_vars = env_vars;
        self
    }

    pub fn with_working_dir(mut self, dir: String) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_clear_env(mut self, clear: bool) -> Self {
        self.clear_env = clear;
        self
    }

    pub fn with_detached_io(mut self, detach: bool) -> Self {
        self.detach_io = detach;
        self
    }

    pub fn with_own_group(mut self, own_group: bool) -> Self {
        self.own_group = own_group;
        self
    }
}
