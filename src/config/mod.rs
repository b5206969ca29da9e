/*!
 * Configuration
 * Wait-loop settings assembled from command-line arguments and environment
 */

use crate::cli::WaitArgs;
use crate::core::errors::{WaitError, WaitResult};
use crate::core::serde::{duration_millis, optional_duration_millis};
use crate::wait::{UntilPolicy, WaitOptions, WaitTarget, DEFAULT_POLL_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment fallback for `--poll-interval-ms`
pub const POLL_INTERVAL_ENV: &str = "PROCWAIT_POLL_INTERVAL_MS";

/// Environment fallback for `--timeout-ms`
pub const TIMEOUT_ENV: &str = "PROCWAIT_TIMEOUT_MS";

/// Upper bound on the poll interval
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Settings for one wait loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WaitConfig {
    pub target: WaitTarget,
    pub options: WaitOptions,
    #[serde(rename = "poll_interval_ms", with = "duration_millis")]
    pub poll_interval: Duration,
    #[serde(rename = "timeout_ms", with = "optional_duration_millis")]
    pub timeout: Option<Duration>,
    pub until: UntilPolicy,
}

impl WaitConfig {
    pub fn new() -> Self {
        Self {
            target: WaitTarget::default(),
            options: WaitOptions::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            until: UntilPolicy::default(),
        }
    }

    /// Build from parsed arguments; `default_target` applies when `--target` is absent
    pub fn from_args(args: &WaitArgs, default_target: WaitTarget) -> WaitResult<Self> {
        let options = WaitOptions::new()
            .with_stopped(!args.no_stopped)
            .with_continued(args.continued)
            .with_nohang(args.nohang);

        let config = Self {
            target: args.target.unwrap_or(default_target),
            options,
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            timeout: args.timeout_ms.map(Duration::from_millis),
            until: if args.all {
                UntilPolicy::AllChildren
            } else {
                UntilPolicy::FirstTerminal
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_target(mut self, target: WaitTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_until(mut self, until: UntilPolicy) -> Self {
        self.until = until;
        self
    }

    pub fn validate(&self) -> WaitResult<()> {
        self.target.validate()?;
        if self.poll_interval.is_zero() {
            return Err(WaitError::InvalidConfig(
                "poll interval must be at least 1ms".to_string(),
            ));
        }
        if self.poll_interval > MAX_POLL_INTERVAL {
            return Err(WaitError::InvalidConfig(format!(
                "poll interval must not exceed {}ms",
                MAX_POLL_INTERVAL.as_millis()
            )));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(WaitError::InvalidConfig(
                "timeout must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args() -> WaitArgs {
        WaitArgs {
            target: None,
            no_stopped: false,
            continued: false,
            nohang: false,
            poll_interval_ms: 50,
            timeout_ms: None,
            all: false,
        }
    }

    #[test]
    fn test_defaults_follow_wuntraced_loop() {
        let config = WaitConfig::from_args(&args(), WaitTarget::SameGroup).unwrap();
        assert_eq!(config, WaitConfig::default());
        assert!(config.options.report_stopped);
        assert!(!config.options.report_continued);
    }

    #[test]
    fn test_args_mapping() {
        let args = WaitArgs {
            target: Some(WaitTarget::AnyChild),
            no_stopped: true,
            continued: true,
            nohang: true,
            poll_interval_ms: 5,
            timeout_ms: Some(100),
            all: true,
        };
        let config = WaitConfig::from_args(&args, WaitTarget::Child(9)).unwrap();

        assert_eq!(config.target, WaitTarget::AnyChild);
        assert_eq!(
            config.options,
            WaitOptions::terminal_only()
                .with_continued(true)
                .with_nohang(true)
        );
        assert_eq!(config.poll_interval, Duration::from_millis(5));
        assert_eq!(config.timeout, Some(Duration::from_millis(100)));
        assert_eq!(config.until, UntilPolicy::AllChildren);
    }

    #[test]
    fn test_default_target_applies() {
        let config = WaitConfig::from_args(&args(), WaitTarget::Child(77)).unwrap();
        assert_eq!(config.target, WaitTarget::Child(77));
    }

    #[test]
    fn test_validation() {
        let mut bad = args();
        bad.poll_interval_ms = 0;
        assert!(matches!(
            WaitConfig::from_args(&bad, WaitTarget::SameGroup),
            Err(WaitError::InvalidConfig(_))
        ));

        let mut bad = args();
        bad.timeout_ms = Some(0);
        assert!(WaitConfig::from_args(&bad, WaitTarget::SameGroup).is_err());

        let slow = WaitConfig::new().with_poll_interval(Duration::from_secs(120));
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_deserialized_target_checked() {
        for (kind, id) in [("group", i32::MIN), ("group", 1), ("child", -1)] {
            let mut json = serde_json::to_value(WaitConfig::new()).unwrap();
            json["target"] = serde_json::json!({ "kind": kind, "id": id });

            let config: WaitConfig = serde_json::from_value(json).unwrap();
            assert!(matches!(config.validate(), Err(WaitError::InvalidTarget(_))));
        }
    }

    #[test]
    fn test_serialized_shape() {
        let config = WaitConfig::new()
            .with_target(WaitTarget::Child(3))
            .with_timeout(Duration::from_millis(250));
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["target"]["kind"], "child");
        assert_eq!(json["target"]["id"], 3);
        assert_eq!(json["poll_interval_ms"], 50);
        assert_eq!(json["timeout_ms"], 250);
        assert_eq!(json["until"], "first_terminal");

        let back: WaitConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
