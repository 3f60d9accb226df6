//! Serial port transport
//!
//! Opens the controller port without flow control, 8N1 unless configured
//! otherwise, and exposes it through [`UartTx`] / [`UartRx`].

use std::io::{Read, Write};
use std::time::Duration;

use duoaxis_hal::{DataBits, ErrorType, Parity, StopBits, UartConfig, UartRx, UartTx};
use duoaxis_protocol::DEFAULT_BAUDRATE;
use serde::{Deserialize, Serialize};
use serialport::{ClearBuffer, FlowControl, SerialPort};
use tracing::{debug, info, warn};

/// Default read/write timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;

/// Errors from the host serial transport
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),
    #[error("serial write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("serial flush failed: {0}")]
    Flush(#[source] std::io::Error),
    /// Includes timeouts and short reads
    #[error("serial read failed: {0}")]
    Read(#[source] std::io::Error),
}

/// Serial port settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Port name, e.g. `/dev/ttyUSB0` or `COM3`
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// `"seven"` or `"eight"`
    pub data_bits: DataBits,
    /// `"none"`, `"even"` or `"odd"`
    pub parity: Parity,
    /// `"one"` or `"two"`
    pub stop_bits: StopBits,
    /// Bound on every read and write
    pub timeout_ms: u64,
}

impl Default for PortConfig {
    fn default() -> Self {
        let line = UartConfig::with_baudrate(DEFAULT_BAUDRATE);
        Self {
            port: default_port_name().to_owned(),
            baud_rate: line.baudrate,
            data_bits: line.data_bits,
            parity: line.parity,
            stop_bits: line.stop_bits,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl PortConfig {
    /// Config for `port` with default line settings
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }

    /// Line settings for this port
    pub fn line_settings(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baud_rate,
            data_bits: self.data_bits,
            parity: self.parity,
            stop_bits: self.stop_bits,
        }
    }

    /// Read/write timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(windows)]
fn default_port_name() -> &'static str {
    "COM1"
}

#[cfg(not(windows))]
fn default_port_name() -> &'static str {
    "/dev/ttyUSB0"
}

/// Convert our data bits to the serialport crate's type
pub fn to_serialport_data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

/// Convert our parity to the serialport crate's type
pub fn to_serialport_parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

/// Convert our stop bits to the serialport crate's type
pub fn to_serialport_stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}

/// An open serial port speaking to the controller
pub struct SerialUart {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialUart {
    /// Open the port described by `config`
    ///
    /// Stale input left in the OS buffer is discarded so the first reply
    /// read belongs to the first request sent.
    pub fn open(config: &PortConfig) -> Result<Self, SerialError> {
        let line = config.line_settings();

        let port = serialport::new(&config.port, line.baudrate)
            .data_bits(to_serialport_data_bits(line.data_bits))
            .parity(to_serialport_parity(line.parity))
            .stop_bits(to_serialport_stop_bits(line.stop_bits))
            .flow_control(FlowControl::None)
            .timeout(config.timeout())
            .open()
            .map_err(|source| SerialError::Open {
                port: config.port.clone(),
                source,
            })?;

        if let Err(e) = port.clear(ClearBuffer::All) {
            warn!(port = %config.port, error = %e, "Failed to clear serial buffers");
        }

        info!(
            port = %config.port,
            baud = line.baudrate,
            data_bits = ?line.data_bits,
            parity = ?line.parity,
            stop_bits = ?line.stop_bits,
            timeout_ms = config.timeout_ms,
            "Opened controller port"
        );

        Ok(Self::from_port(port, config.port.clone()))
    }

    /// Wrap an already opened port
    pub fn from_port(port: Box<dyn SerialPort>, name: impl Into<String>) -> Self {
        Self {
            port,
            name: name.into(),
        }
    }

    /// Port name this transport was opened on
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ErrorType for SerialUart {
    type Error = SerialError;
}

impl UartTx for SerialUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        debug!(port = %self.name, tx = ?data, "Serial write");
        self.port.write_all(data).map_err(SerialError::Write)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.port.flush().map_err(SerialError::Flush)
    }
}

impl UartRx for SerialUart {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<(), SerialError> {
        self.port.read_exact(buf).map_err(SerialError::Read)?;
        debug!(port = %self.name, rx = ?buf, "Serial read");
        Ok(())
    }
}

/// Names of the serial ports present on this machine
pub fn available_ports() -> Result<Vec<String>, SerialError> {
    let ports = serialport::available_ports().map_err(SerialError::Enumerate)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
