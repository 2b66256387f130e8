use std::process::{Child, Command};
use std::time::{Duration, Instant};

use anyhow::Context;
use parking_lot::Mutex;
use taskdeck_core::config::BackendConfig;
use tracing::{debug, info, instrument, warn};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Owns the backend child process for the lifetime of the shell.
/// The renderer talks to the backend directly over HTTP; the shell
/// only starts it, waits for it to come up, and stops it on exit.
pub struct BackendProcess {
    config: BackendConfig,
    child: Mutex<Option<Child>>,
}

impl BackendProcess {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            child: Mutex::new(None),
        }
    }

    /// Starts the configured backend command unless autostart is off or
    /// a previously spawned child is still alive.
    #[instrument(skip(self), fields(command = %self.config.command))]
    pub fn spawn(&self) -> anyhow::Result<()> {
        if !self.config.autostart {
            info!("backend autostart disabled; expecting an external backend");
            return Ok(());
        }

        let mut guard = self.child.lock();
        if let Some(child) = guard.as_mut()
            && child.try_wait().context("failed to poll backend process")?.is_none()
        {
            debug!("backend process already running");
            return Ok(());
        }

        let child = Command::new(&self.config.command)
            .args(&self.config.args)
            .spawn()
            .with_context(|| {
                format!("failed to spawn backend command {}", self.config.command)
            })?;
        info!(pid = child.id(), "spawned backend process");
        *guard = Some(child);
        Ok(())
    }

    /// Polls the backend's task listing until it answers or the
    /// configured startup window runs out. Purely informational: the
    /// renderer retries on its own, so a slow backend only costs log
    /// noise here.
    pub async fn wait_ready(&self) {
        let url = format!("{}/tasks", self.config.base_url());
        let client = reqwest::Client::new();
        let deadline = Instant::now() + Duration::from_secs(self.config.startup_timeout_secs);

        loop {
            match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!(%url, "backend is ready");
                    return;
                }
                Ok(response) => {
                    debug!(status = %response.status(), "backend answered but is not ready");
                }
                Err(error) => {
                    debug!(%error, "backend not reachable yet");
                }
            }
            if Instant::now() >= deadline {
                warn!(
                    timeout_secs = self.config.startup_timeout_secs,
                    "backend did not become ready within the startup window"
                );
                return;
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    pub fn is_running(&self) -> bool {
        let mut guard = self.child.lock();
        match guard.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Kills and reaps the child if we own one. Failures are logged and
    /// swallowed since this runs during application exit.
    pub fn shutdown(&self) {
        let mut guard = self.child.lock();
        let Some(mut child) = guard.take() else {
            return;
        };
        if let Err(error) = child.kill() {
            warn!(%error, "failed to kill backend process");
        }
        match child.wait() {
            Ok(status) => info!(%status, "backend process exited"),
            Err(error) => warn!(%error, "failed to reap backend process"),
        }
    }
}
