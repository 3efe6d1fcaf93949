//! Launching the local inference server.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tolk_core::config::TolkConfig;
use tolk_core::{Result, TolkError};

/// Starts the backend once and leaves it running.
///
/// The child is detached from our stdio and is not killed when the handle
/// drops, so the server outlives a front-end that exits first.
#[derive(Debug, Clone)]
pub struct BackendLauncher {
    command: String,
    args: Vec<String>,
    startup_delay: Duration,
}

impl BackendLauncher {
    pub fn new(command: impl Into<String>, args: Vec<String>, startup_delay: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            startup_delay,
        }
    }

    pub fn from_config(config: &TolkConfig) -> Self {
        Self::new(
            config.backend_command.clone(),
            config.backend_args.clone(),
            Duration::from_millis(config.startup_delay_ms),
        )
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Spawns the server, then waits out the start-up grace period.
    ///
    /// On spawn failure the delay is skipped and the error is returned for
    /// the caller to report; nothing here is fatal.
    pub async fn launch(&self) -> Result<Child> {
        tracing::info!("[BackendLauncher] Starting `{}`", self.command_line());

        let child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                tracing::error!("[BackendLauncher] Failed to start `{}`: {}", self.command, e);
                TolkError::backend_launch(format!("{}: {}", self.command_line(), e))
            })?;

        tracing::debug!(
            "[BackendLauncher] Spawned pid {:?}, waiting {:?}",
            child.id(),
            self.startup_delay
        );
        tokio::time::sleep(self.startup_delay).await;
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_from_config_uses_defaults() {
        let launcher = BackendLauncher::from_config(&TolkConfig::default());

        assert_eq!(launcher.command_line(), "ollama serve");
        assert_eq!(launcher.startup_delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_missing_executable_is_backend_launch_error_without_delay() {
        let launcher = BackendLauncher::new(
            "tolk-definitely-not-installed",
            vec!["serve".to_string()],
            Duration::from_secs(30),
        );

        let started = Instant::now();
        let err = launcher.launch().await.unwrap_err();

        assert!(err.is_backend_launch());
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_waits_for_grace_period() {
        let launcher = BackendLauncher::new("true", Vec::new(), Duration::from_millis(50));

        let started = Instant::now();
        let mut child = launcher.launch().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
        child.wait().await.unwrap();
    }
}
