//! Thread boundary between the host worker and the UI

use super::{HostCommand, HostMessage};
use crate::error::{PanelError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Channel capacity for commands (UI → worker)
const CMD_CHANNEL_CAPACITY: usize = 64;
/// Channel capacity for messages (worker → UI)
const MSG_CHANNEL_CAPACITY: usize = 256;

/// UI-side handle for communicating with the host worker
pub struct HostBridge {
    pub cmd_tx: Sender<HostCommand>,
    pub msg_rx: Receiver<HostMessage>,
}

impl HostBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The worker thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<HostCommand>, Sender<HostMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<HostMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking.
    pub fn try_recv(&self) -> Option<HostMessage> {
        self.msg_rx.try_recv().ok()
    }

    /// Send a command without blocking
    ///
    /// Fails with [`PanelError::Channel`] when the worker is gone or its
    /// queue is full.
    pub fn send_command(&self, cmd: HostCommand) -> Result<()> {
        self.cmd_tx
            .try_send(cmd)
            .map_err(|e| PanelError::Channel(format!("Host command dropped: {}", e)))
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(HostCommand::Shutdown);
    }
}
