//! In-memory link that records every line it carries.

use log::info;

use super::{ConnectionError, LinkTransport};

/// Records lines instead of sending them anywhere. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryLink {
    connected: bool,
    /// Refuse to open, as if no device had been picked.
    refuse_open: bool,
    /// Lines written while connected, newline included.
    sent: Vec<String>,
}

impl MemoryLink {
    pub fn new() -> MemoryLink {
        MemoryLink::default()
    }

    /// A link whose `open` always fails with `NoDeviceSelected`.
    pub fn refusing() -> MemoryLink {
        MemoryLink {
            refuse_open: true,
            ..MemoryLink::default()
        }
    }

    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Take the recorded lines, leaving the log empty.
    pub fn take_sent(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sent)
    }
}

impl LinkTransport for MemoryLink {
    fn open(&mut self) -> Result<(), ConnectionError> {
        if self.connected {
            return Err(ConnectionError::AlreadyConnected);
        }
        if self.refuse_open {
            return Err(ConnectionError::NoDeviceSelected);
        }
        info!("[link] Memory link connected");
        self.connected = true;
        Ok(())
    }

    fn write_line(&mut self, line: &[u8]) {
        if self.connected {
            self.sent.push(String::from_utf8_lossy(line).to_string());
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) {
        self.connected = false;
    }
}
