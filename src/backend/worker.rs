//! Host worker thread
//!
//! Runs every [`ConfigHost`] call off the UI thread. The loop processes
//! queued commands, refreshes the sensor snapshot when it is due and then
//! waits for the next command or the next refresh, whichever comes first.

use super::bridge::HostBridge;
use super::{ConfigHost, HostCommand, HostMessage};
use crate::config::ConfigOptions;
use crate::error::{PanelError, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Upper bound on a single wait so the running flag is re-checked
const MAX_WAIT: Duration = Duration::from_millis(250);

/// The worker driving a host
pub struct HostWorker {
    host: Box<dyn ConfigHost>,
    command_rx: Receiver<HostCommand>,
    message_tx: Sender<HostMessage>,
    running: Arc<AtomicBool>,
    refresh_interval: Duration,
    last_refresh: Option<Instant>,
}

impl HostWorker {
    pub fn new(
        host: Box<dyn ConfigHost>,
        command_rx: Receiver<HostCommand>,
        message_tx: Sender<HostMessage>,
        running: Arc<AtomicBool>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            host,
            command_rx,
            message_tx,
            running,
            refresh_interval: refresh_interval.max(Duration::from_secs(1)),
            last_refresh: None,
        }
    }

    /// Spawn a worker thread for `host` and return the UI-side bridge
    pub fn spawn(
        host: Box<dyn ConfigHost>,
        refresh_interval: Duration,
    ) -> Result<(HostBridge, JoinHandle<()>)> {
        let (bridge, cmd_rx, msg_tx) = HostBridge::new();
        let running = Arc::new(AtomicBool::new(true));
        let mut worker = HostWorker::new(host, cmd_rx, msg_tx, running, refresh_interval);

        let handle = std::thread::Builder::new()
            .name("cyd-host".to_string())
            .spawn(move || worker.run())
            .map_err(|e| PanelError::Host(format!("Failed to spawn host worker: {}", e)))?;

        Ok((bridge, handle))
    }

    /// Run the main worker loop
    pub fn run(&mut self) {
        tracing::info!("Host worker started ({})", self.host.describe());

        while self.running.load(Ordering::SeqCst) {
            if self.refresh_due(Instant::now()) {
                self.refresh_snapshot();
            }

            match self.command_rx.recv_timeout(self.wait_time(Instant::now())) {
                Ok(cmd) => {
                    self.handle_command(cmd);
                    // Drain whatever queued up behind it
                    while let Ok(cmd) = self.command_rx.try_recv() {
                        self.handle_command(cmd);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    self.running.store(false, Ordering::SeqCst);
                }
            }
        }

        let _ = self.message_tx.send(HostMessage::Shutdown);
        tracing::info!("Host worker stopped");
    }

    fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.refresh_interval,
        }
    }

    fn wait_time(&self, now: Instant) -> Duration {
        let until_refresh = match self.last_refresh {
            None => Duration::ZERO,
            Some(last) => self
                .refresh_interval
                .saturating_sub(now.saturating_duration_since(last)),
        };
        until_refresh.min(MAX_WAIT)
    }

    /// Handle a single command
    fn handle_command(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::Load { entry_id } => self.load(entry_id),
            HostCommand::Save { entry_id, options } => self.save(entry_id, &options),
            HostCommand::RefreshSnapshot => self.refresh_snapshot(),
            HostCommand::SetRefreshInterval(interval) => {
                self.refresh_interval = interval.max(Duration::from_secs(1));
                tracing::debug!("Snapshot refresh interval set to {:?}", self.refresh_interval);
            }
            HostCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    fn load(&mut self, entry_id: String) {
        let msg = match self.host.load_config(&entry_id) {
            Ok(options) => {
                tracing::info!("Loaded {} option(s) for entry {}", options.len(), entry_id);
                HostMessage::Loaded { entry_id, options }
            }
            Err(e) => {
                tracing::warn!("Failed to load entry {}: {}", entry_id, e);
                HostMessage::LoadFailed {
                    entry_id,
                    error: e.to_string(),
                }
            }
        };
        self.send(msg);
    }

    fn save(&mut self, entry_id: String, options: &ConfigOptions) {
        let msg = match self.host.save_config(&entry_id, options) {
            Ok(()) => {
                tracing::info!("Saved entry {}", entry_id);
                HostMessage::Saved { entry_id }
            }
            Err(e) => {
                tracing::error!("Failed to save entry {}: {}", entry_id, e);
                HostMessage::SaveFailed {
                    entry_id,
                    error: e.to_string(),
                }
            }
        };
        self.send(msg);
    }

    fn refresh_snapshot(&mut self) {
        self.last_refresh = Some(Instant::now());
        let msg = match self.host.sensor_snapshot() {
            Ok(snapshot) => {
                tracing::trace!("Snapshot with {} sensor(s)", snapshot.len());
                HostMessage::Snapshot(snapshot)
            }
            Err(e) => {
                tracing::warn!("Snapshot refresh failed: {}", e);
                HostMessage::SnapshotFailed(e.to_string())
            }
        };
        self.send(msg);
    }

    fn send(&self, msg: HostMessage) {
        if self.message_tx.send(msg).is_err() {
            // UI is gone
            self.running.store(false, Ordering::SeqCst);
        }
    }
}
