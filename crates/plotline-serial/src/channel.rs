//! Byte channels to the device.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serialport::SerialPort;

use crate::error::{Result, StreamError};

/// A line-oriented, blocking byte channel to one device.
///
/// Exactly one owner writes and reads, on the calling thread.
pub trait DeviceChannel {
    /// Write every byte, blocking until done.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of received bytes that can be read without waiting.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read one line without its terminator.
    ///
    /// Returns `None` if nothing arrived before the channel's read timeout.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Close the channel. Further writes fail with [`StreamError::Closed`].
    fn close(&mut self) -> Result<()>;
}

/// Serial port settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    /// Device path, such as `/dev/ttyACM0` or `COM3`.
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Read timeout (ms).
    pub read_timeout_ms: u64,
    /// Delay after opening before first use (ms).
    pub open_settle_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".into(),
            baud_rate: 9600,
            read_timeout_ms: 1000,
            open_settle_ms: 2000,
        }
    }
}

impl SerialSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            return Err(StreamError::InvalidSettings("port must not be empty".into()));
        }
        if self.baud_rate == 0 {
            return Err(StreamError::InvalidSettings(
                "baud_rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A serial port opened once and closed once.
pub struct SerialChannel {
    port: Option<Box<dyn SerialPort>>,
    name: String,
}

impl SerialChannel {
    /// Open the port and wait for the device to settle.
    pub fn open(settings: &SerialSettings) -> Result<Self> {
        settings.validate()?;
        let port = serialport::new(&settings.port, settings.baud_rate)
            .timeout(Duration::from_millis(settings.read_timeout_ms))
            .open()?;
        info!(
            "opened {} at {} baud, settling {} ms",
            settings.port, settings.baud_rate, settings.open_settle_ms
        );
        std::thread::sleep(Duration::from_millis(settings.open_settle_ms));
        Ok(Self {
            port: Some(port),
            name: settings.port.clone(),
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(StreamError::Closed)
    }
}

impl DeviceChannel for SerialChannel {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let port = self.port()?;
        port.write_all(bytes)?;
        port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port()?.bytes_to_read()? as usize)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let port = self.port()?;
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => return Ok(Some(decode_line(&line))),
                Ok(_) => line.push(byte[0]),
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(decode_line(&line)))
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            info!("closed {}", self.name);
        }
        Ok(())
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

/// In-memory channel that records writes and replays canned replies.
#[derive(Debug, Default, Clone)]
pub struct MemoryChannel {
    written: Vec<u8>,
    incoming: VecDeque<u8>,
    closed: bool,
}

impl MemoryChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the host to read.
    pub fn push_incoming(&mut self, text: &str) {
        self.incoming.extend(text.bytes());
    }

    /// Everything the host wrote so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Written bytes as text.
    pub fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }

    /// Whether [`DeviceChannel::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DeviceChannel for MemoryChannel {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        debug!("memory channel: {} bytes written", bytes.len());
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.incoming.len())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        if self.incoming.is_empty() {
            return Ok(None);
        }
        let mut line = Vec::new();
        while let Some(b) = self.incoming.pop_front() {
            if b == b'\n' {
                break;
            }
            line.push(b);
        }
        Ok(Some(decode_line(&line)))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
