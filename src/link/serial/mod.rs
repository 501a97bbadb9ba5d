//! Serial port link, e.g. an Arduino on `/dev/ttyACM0`.

use std::io::{self, Write};

use log::{debug, info, warn};
use serialport::SerialPort;

use super::{ConnectionError, LinkTransport};

/// Baud rate the lamp firmware listens on.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Passes protocol lines to a lamp connected through a serial port.
pub struct SerialLink {
    /// Path to the serial device, if one was selected.
    path: Option<String>,
    baud_rate: u32,
    /// Output port, present while connected.
    port: Option<Box<dyn SerialPort>>,
}

impl SerialLink {
    pub fn new(path: Option<String>, baud_rate: u32) -> SerialLink {
        SerialLink {
            path,
            baud_rate,
            port: None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

fn open_error(path: &str, err: serialport::Error) -> ConnectionError {
    match err.kind() {
        serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied) => {
            ConnectionError::PermissionDenied {
                path: path.to_string(),
            }
        }
        _ => ConnectionError::Open {
            path: path.to_string(),
            source: err,
        },
    }
}

impl LinkTransport for SerialLink {
    fn open(&mut self) -> Result<(), ConnectionError> {
        if self.port.is_some() {
            return Err(ConnectionError::AlreadyConnected);
        }
        let path = self.path.as_ref().ok_or(ConnectionError::NoDeviceSelected)?;

        let mut port = serialport::open(path).map_err(|err| open_error(path, err))?;
        port.set_baud_rate(self.baud_rate)
            .map_err(|err| open_error(path, err))?;

        info!("[link] Serial connected at {} ({} baud)", path, self.baud_rate);
        self.port = Some(port);
        Ok(())
    }

    fn write_line(&mut self, line: &[u8]) {
        if let Some(port) = self.port.as_mut() {
            let result = port.write_all(line).and_then(|_| port.flush());
            match result {
                Ok(()) => debug!("[link] Wrote {} B", line.len()),
                // Nothing is retried; the line is lost.
                Err(err) => warn!("[link] Write failed: {}", err),
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            info!("[link] Serial disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let link = SerialLink::new(Some("/dev/null-lamp".to_string()), DEFAULT_BAUD_RATE);
        assert!(!link.is_connected());
        assert_eq!(link.path(), Some("/dev/null-lamp"));
    }

    #[test]
    fn open_without_path_needs_a_device() {
        let mut link = SerialLink::new(None, DEFAULT_BAUD_RATE);
        assert!(matches!(link.open(), Err(ConnectionError::NoDeviceSelected)));
        assert!(!link.is_connected());
    }

    #[test]
    fn writes_while_disconnected_are_dropped() {
        let mut link = SerialLink::new(None, DEFAULT_BAUD_RATE);
        link.write_line(b"AUTO\n");
        link.close();
        assert!(!link.is_connected());
    }
}
