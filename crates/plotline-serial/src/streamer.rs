//! Command submission and image streaming over a device channel.

use std::time::Duration;

use log::{debug, info, trace, warn};
use plotline_gcode::{validate, Command, GrammarError};
use plotline_path::{PathPlan, Waypoint};
use serde::{Deserialize, Serialize};

use crate::channel::DeviceChannel;
use crate::error::Result;

/// Token written before an image-derived stream. No terminator.
pub const IMAGE_BEGIN: &str = "IMG";
/// Token written after an image-derived stream. No terminator.
pub const IMAGE_END: &str = "END";
/// Token written at shutdown. No terminator.
pub const SHUTDOWN: &str = "M02";

/// What goes between the image framing tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamMode {
    /// Each waypoint as two lines, x then y, in millimetres.
    #[default]
    Coordinates,
    /// Only the framing tokens; waypoints are logged, not sent.
    FramingOnly,
}

/// Fixed delays used for pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTiming {
    /// Wait between writing a command and draining replies.
    pub command_settle: Duration,
    /// Wait between the shutdown token and closing the channel.
    pub shutdown_settle: Duration,
}

impl Default for StreamTiming {
    fn default() -> Self {
        Self {
            command_settle: Duration::from_secs(1),
            shutdown_settle: Duration::from_secs(1),
        }
    }
}

impl StreamTiming {
    /// No delays at all.
    pub fn immediate() -> Self {
        Self {
            command_settle: Duration::ZERO,
            shutdown_settle: Duration::ZERO,
        }
    }
}

/// Outcome of submitting command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The command was valid and transmitted.
    Sent {
        /// The parsed command.
        command: Command,
        /// Lines the device sent back within the settle window.
        replies: Vec<String>,
    },
    /// The text was rejected; nothing was transmitted.
    Rejected(GrammarError),
}

/// Streams commands and waypoints to a device.
pub struct DeviceStreamer<C: DeviceChannel> {
    channel: C,
    timing: StreamTiming,
    mode: StreamMode,
}

impl<C: DeviceChannel> DeviceStreamer<C> {
    /// Wrap an open channel.
    pub fn new(channel: C, timing: StreamTiming, mode: StreamMode) -> Self {
        Self {
            channel,
            timing,
            mode,
        }
    }

    /// The underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutable access to the underlying channel.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        debug!("-> {line}");
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.channel.write_all(&bytes)
    }

    fn write_token(&mut self, token: &str) -> Result<()> {
        debug!("-> {token}");
        self.channel.write_all(token.as_bytes())
    }

    /// Validate `text` and send it if it is a valid command.
    ///
    /// Grammar errors are returned as [`Submission::Rejected`] without
    /// touching the channel; only channel failures are errors.
    pub fn submit(&mut self, text: &str) -> Result<Submission> {
        match validate(text) {
            Ok(command) => {
                let replies = self.send_command(&command)?;
                Ok(Submission::Sent { command, replies })
            }
            Err(err) => {
                warn!("{err}");
                Ok(Submission::Rejected(err))
            }
        }
    }

    /// Send a command, wait for the settle delay, then drain replies.
    pub fn send_command(&mut self, command: &Command) -> Result<Vec<String>> {
        info!("sending {} command {command}", command.opcode());
        for line in command.lines() {
            self.write_line(&line)?;
        }
        std::thread::sleep(self.timing.command_settle);
        self.drain()
    }

    /// Read every line currently available from the device.
    ///
    /// Never waits for more data than is already buffered; no reply is not
    /// an error.
    pub fn drain(&mut self) -> Result<Vec<String>> {
        let mut replies = Vec::new();
        while self.channel.bytes_available()? > 0 {
            match self.channel.read_line()? {
                Some(line) => {
                    info!("device: {line}");
                    replies.push(line);
                }
                None => break,
            }
        }
        Ok(replies)
    }

    /// Send waypoints wrapped in the image framing tokens.
    ///
    /// Returns the number of waypoints transmitted, which is zero in
    /// [`StreamMode::FramingOnly`].
    pub fn send_image_stream(&mut self, waypoints: &[Waypoint]) -> Result<usize> {
        info!("streaming {} waypoints ({:?})", waypoints.len(), self.mode);
        self.write_token(IMAGE_BEGIN)?;

        let mut sent = 0;
        for wp in waypoints {
            trace!("{wp}");
            if self.mode == StreamMode::Coordinates {
                self.write_line(&format!("{:.1}", wp.x_mm))?;
                self.write_line(&format!("{:.1}", wp.y_mm))?;
                sent += 1;
            }
        }

        self.write_token(IMAGE_END)?;
        info!("image stream complete");
        Ok(sent)
    }

    /// Stream a planned path.
    pub fn send_plan(&mut self, plan: &PathPlan) -> Result<usize> {
        self.send_image_stream(&plan.waypoints)
    }

    /// Send the end-of-program token, wait, and close the channel.
    pub fn shutdown(mut self) -> Result<C> {
        info!("shutting down");
        self.write_token(SHUTDOWN)?;
        std::thread::sleep(self.timing.shutdown_settle);
        self.channel.close()?;
        Ok(self.channel)
    }
}
