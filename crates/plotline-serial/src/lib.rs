#![warn(missing_docs)]

//! Device streaming for plotline.
//!
//! This crate owns the byte channel to the plotter and the line protocol
//! spoken over it:
//! - validated manual commands, one newline-terminated line per token
//! - image-derived waypoints between the `IMG` and `END` framing tokens
//! - a fixed settle delay followed by a drain of buffered replies
//! - an `M02` token before the channel is closed
//!
//! # Example
//!
//! ```no_run
//! use plotline_serial::{DeviceStreamer, SerialChannel, SerialSettings, StreamMode, StreamTiming};
//!
//! let channel = SerialChannel::open(&SerialSettings::default())?;
//! let mut streamer = DeviceStreamer::new(channel, StreamTiming::default(), StreamMode::Coordinates);
//!
//! streamer.submit("G21")?;
//! streamer.submit("G00 10 10")?;
//! streamer.shutdown()?;
//! # Ok::<(), plotline_serial::StreamError>(())
//! ```

pub mod channel;
pub mod error;
pub mod streamer;

pub use channel::{DeviceChannel, MemoryChannel, SerialChannel, SerialSettings};
pub use error::{Result, StreamError};
pub use streamer::{
    DeviceStreamer, StreamMode, StreamTiming, Submission, IMAGE_BEGIN, IMAGE_END, SHUTDOWN,
};
