/*!
 * Process Executor
 * Spawns OS processes whose reaping is left to the wait loop
 */

use super::types::ExecutionConfig;
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::Pid;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

/// Spawns child processes and remembers what each pid is running
pub struct ProcessExecutor {
    spawned: Arc<Mutex<HashMap<Pid, String>>>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        debug!("Process executor initialized");
        Self {
            spawned: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Spawn a new OS process and return its pid
    ///
    /// The std handle is dropped right away. The child stays unreaped until
    /// a wait call collects it.
    pub fn spawn(&self, config: &ExecutionConfig) -> ProcessResult<Pid> {
        self.validate_command(&config.command)?;

        let mut cmd = Command::new(&config.command);

        if !config.args.is_empty() {
            cmd.args(&config.args);
        }

        if config.clear_env {
            cmd.env_clear();
        }
        for (key, value) in &config.env_vars {
            cmd.env(key, value);
        }

        if let Some(ref dir) = config.working_dir {
            cmd.current_dir(dir);
        }

        if config.detach_io {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        } else {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }

        if config.own_group {
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", config.command, e)))?;

        let pid = Pid::try_from(child.id())
            .map_err(|e| ProcessError::SpawnFailed(format!("pid out of range: {}", e)))?;
        drop(child);

        info!(
            pid,
            command = %config.command,
            args = config.args.len(),
            own_group = config.own_group,
            "Spawned child process"
        );

        self.spawned.lock().insert(pid, config.command.clone());
        Ok(pid)
    }

    /// Command a spawned pid is running, if we spawned it and it is not yet forgotten
    pub fn command_of(&self, pid: Pid) -> Option<String> {
        self.spawned.lock().get(&pid).cloned()
    }

    /// Drop bookkeeping for a reaped child
    pub fn forget(&self, pid: Pid) -> bool {
        self.spawned.lock().remove(&pid).is_some()
    }

    /// Pids of tracked children
    pub fn pids(&self) -> Vec<Pid> {
        self.spawned.lock().keys().copied().collect()
    }

    /// Get count of tracked children
    pub fn count(&self) -> usize {
        self.spawned.lock().len()
    }

    /// Validate command for security
    fn validate_command(&self, command: &str) -> ProcessResult<()> {
        if command.trim().is_empty() {
            return Err(ProcessError::InvalidCommand("Empty command".to_string()));
        }

        // Shell injection prevention
        let dangerous_chars = [';', '|', '&', '\n', '\r', '\0', '`', '$', '(', ')'];
        if dangerous_chars.iter().any(|&c| command.contains(c)) {
            return Err(ProcessError::PermissionDenied(
                "Command contains dangerous characters".to_string(),
            ));
        }

        // Command traversal prevention
        if command.contains("..") {
            return Err(ProcessError::PermissionDenied(
                "Command contains path traversal".to_string(),
            ));
        }

        Ok(())
    }
}

impl Clone for ProcessExecutor {
    fn clone(&self) -> Self {
        Self {
            spawned: Arc::clone(&self.spawned),
        }
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}
