use std::path::Path;
use std::{fs, io};

use log::error;
use serde::{Deserialize, Serialize};

use crate::link::serial::DEFAULT_BAUD_RATE;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    /// The link to the lamp.
    pub link: Link,
}

/// Lamp link configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Link {
    Serial {
        /// Path to a serial device.
        path: Option<String>,
        #[serde(rename = "baudRate", default = "default_baud_rate")]
        baud_rate: u32,
    },
    /// Record commands in memory instead of sending them.
    Memory,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl Default for Root {
    fn default() -> Root {
        Root {
            link: Link::Serial {
                path: None,
                baud_rate: DEFAULT_BAUD_RATE,
            },
        }
    }
}

fn invalid_data(err: impl std::fmt::Debug) -> io::Error {
    error!("Error reading config file: {:?}", err);
    io::Error::from(io::ErrorKind::InvalidData)
}

pub fn parse_config_yaml(text: &str) -> io::Result<Root> {
    serde_yaml::from_str(text).map_err(invalid_data)
}

pub fn read_config_yaml<T: AsRef<Path>>(path: T) -> io::Result<Root> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    serde_yaml::from_reader(reader).map_err(invalid_data)
}

pub fn read_config_json<T: AsRef<Path>>(path: T) -> io::Result<Root> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(invalid_data)
}

/// Pick the reader by file extension; anything that isn't `.json` is YAML.
pub fn read_config<T: AsRef<Path>>(path: T) -> io::Result<Root> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => read_config_json(path),
        _ => read_config_yaml(path),
    }
}
