//! Serial port transport for the FTX-1.
//!
//! The FTX-1 presents its CAT port as a USB virtual COM port. It runs 8N1
//! without flow control at any rate in [`SUPPORTED_BAUD_RATES`]; the
//! factory setting is 38400.
//!
//! # Example
//!
//! ```no_run
//! use ftx1_transport::{SerialConfig, SerialTransport};
//! use ftx1_core::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> ftx1_core::Result<()> {
//! let config = SerialConfig::with_baud(115_200)?;
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", config).await?;
//!
//! transport.send(b"FA;").await?;
//! let mut buf = [0u8; 64];
//! let n = transport.receive(&mut buf, Duration::from_millis(500)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use ftx1_core::error::{Error, Result};
use ftx1_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

/// Baud rates the CAT port can be configured for.
pub const SUPPORTED_BAUD_RATES: [u32; 11] = [
    1_200, 2_400, 4_800, 9_600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

/// Factory-default CAT baud rate.
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

pub fn is_supported_baud_rate(baud_rate: u32) -> bool {
    SUPPORTED_BAUD_RATES.contains(&baud_rate)
}

/// Serial port configuration. Defaults to 38400 8N1, no flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
        }
    }
}

impl SerialConfig {
    /// Default settings at `baud_rate`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the rate is not in
    /// [`SUPPORTED_BAUD_RATES`].
    pub fn with_baud(baud_rate: u32) -> Result<Self> {
        let config = Self {
            baud_rate,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn data_bits(mut self, bits: DataBits) -> Self {
        self.data_bits = bits;
        self
    }

    pub fn stop_bits(mut self, bits: StopBits) -> Self {
        self.stop_bits = bits;
        self
    }

    pub fn parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub fn flow_control(mut self, flow: FlowControl) -> Self {
        self.flow_control = flow;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_supported_baud_rate(self.baud_rate) {
            return Err(Error::InvalidParameter(format!(
                "unsupported baud rate {} (supported: {:?})",
                self.baud_rate, SUPPORTED_BAUD_RATES
            )));
        }
        Ok(())
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    /// RTS/CTS.
    Hardware,
}

impl From<FlowControl> for tokio_serial::FlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::None => tokio_serial::FlowControl::None,
            FlowControl::Hardware => tokio_serial::FlowControl::Hardware,
        }
    }
}

/// Names of the serial ports the OS reports.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| Error::Transport(format!("cannot enumerate serial ports: {e}")))?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// [`Transport`] over a USB virtual COM port.
pub struct SerialTransport {
    port: Option<SerialStream>,
    port_name: String,
}

impl SerialTransport {
    /// Open `port` with `config`.
    ///
    /// DTR and RTS are de-asserted right after opening; the FTX-1 can map
    /// them to PTT and CW keying.
    pub async fn open(port: &str, config: SerialConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            data_bits = ?config.data_bits,
            stop_bits = ?config.stop_bits,
            parity = ?config.parity,
            flow_control = ?config.flow_control,
            "Opening serial port"
        );

        let mut stream = tokio_serial::new(port, config.baud_rate)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into())
            .flow_control(config.flow_control.into())
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("failed to open serial port {port}: {e}"))
            })?;

        if let Err(e) = stream.write_data_terminal_ready(false) {
            tracing::warn!(port = %port, error = %e, "Failed to de-assert DTR");
        }
        if let Err(e) = stream.write_request_to_send(false) {
            tracing::warn!(port = %port, error = %e, "Failed to de-assert RTS");
        }

        // Some USB bridges silently fall back to another rate.
        match stream.baud_rate() {
            Ok(actual) if actual != config.baud_rate => {
                tracing::warn!(
                    port = %port,
                    requested = config.baud_rate,
                    actual,
                    "Baud rate not applied exactly"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(port = %port, error = %e, "Cannot read back baud rate"),
        }

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened");

        Ok(Self {
            port: Some(stream),
            port_name: port.to_string(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::NotConnected => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = %String::from_utf8_lossy(data),
            "Sending"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send");
            map_io_error(e)
        })?;
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush");
            Error::Io(e)
        })?;
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, port.read(buf)).await {
            Ok(Ok(0)) => {
                tracing::warn!(port = %self.port_name, "Serial port returned end of stream");
                Err(Error::ConnectionLost)
            }
            Ok(Ok(n)) => {
                tracing::trace!(
                    port = %self.port_name,
                    bytes = n,
                    data = %String::from_utf8_lossy(&buf[..n]),
                    "Received"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive");
                Err(map_io_error(e))
            }
            Err(_) => {
                tracing::trace!(
                    port = %self.port_name,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            if let Err(e) = port.flush().await {
                tracing::warn!(port = %self.port_name, error = %e, "Flush before close failed");
            }
            tracing::info!(port = %self.port_name, "Serial port closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}
