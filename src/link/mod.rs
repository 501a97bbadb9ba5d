//! Links carry protocol lines from the panel to a single lamp.

use thiserror::Error;

use crate::config;

pub mod memory;
pub mod serial;
pub use self::memory::MemoryLink;
pub use self::serial::SerialLink;

/// A write-only connection to one lamp.
///
/// Writes are fire-and-forget: there is no acknowledgement channel, and a
/// link that is not connected discards whatever it is given.
pub trait LinkTransport {
    /// Open the connection. Fails with `AlreadyConnected` if it is already open.
    fn open(&mut self) -> Result<(), ConnectionError>;
    /// Write one complete protocol line.
    fn write_line(&mut self, line: &[u8]);
    fn is_connected(&self) -> bool;
    /// Drop the connection, if any.
    fn close(&mut self);
}

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("link is already connected")]
    AlreadyConnected,
    #[error("no device selected")]
    NoDeviceSelected,
    #[error("permission denied opening {path}")]
    PermissionDenied { path: String },
    #[error("unable to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },
}

impl<T: LinkTransport + ?Sized> LinkTransport for Box<T> {
    fn open(&mut self) -> Result<(), ConnectionError> {
        (**self).open()
    }

    fn write_line(&mut self, line: &[u8]) {
        (**self).write_line(line)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Build (but do not open) the link described by the configuration.
pub fn from_config(link: &config::Link) -> Box<dyn LinkTransport> {
    match link {
        config::Link::Serial { path, baud_rate } => {
            Box::new(SerialLink::new(path.clone(), *baud_rate))
        }
        config::Link::Memory => Box::new(MemoryLink::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_link_from_config() {
        let mut link = from_config(&config::Link::Memory);
        assert!(!link.is_connected());
        link.open().unwrap();
        assert!(link.is_connected());
        assert!(matches!(link.open(), Err(ConnectionError::AlreadyConnected)));
    }

    #[test]
    fn serial_link_without_path_from_config() {
        let mut link = from_config(&config::Link::Serial {
            path: None,
            baud_rate: serial::DEFAULT_BAUD_RATE,
        });
        assert!(matches!(link.open(), Err(ConnectionError::NoDeviceSelected)));
    }
}
