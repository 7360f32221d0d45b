//! Plotter configuration file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use plotline_path::{EmissionMode, PaperSize};
use plotline_serial::{SerialSettings, StreamMode, StreamTiming};
use plotline_vision::TraceSettings;
use serde::{Deserialize, Serialize};

/// Everything the front-end needs to talk to a plotter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    pub serial: SerialConfig,
    pub paper: PaperSize,
    pub trace: TraceConfig,
}

/// Port settings plus pacing delays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    #[serde(flatten)]
    pub device: SerialSettings,
    /// Delay between a command write and the reply drain (ms).
    pub command_settle_ms: u64,
    /// Delay between the end-of-program token and closing (ms).
    pub shutdown_settle_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: SerialSettings::default(),
            command_settle_ms: 1000,
            shutdown_settle_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub clarity: f64,
    pub emission: EmissionMode,
    pub stream: StreamMode,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            clarity: TraceSettings::default().clarity,
            emission: EmissionMode::default(),
            stream: StreamMode::default(),
        }
    }
}

impl PlotterConfig {
    /// Read a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.serial
            .device
            .validate()
            .context("invalid [serial] section")?;
        self.trace_settings()
            .validate()
            .context("invalid [paper] or [trace] section")?;
        Ok(())
    }

    pub fn trace_settings(&self) -> TraceSettings {
        TraceSettings {
            paper: self.paper,
            clarity: self.trace.clarity,
        }
    }

    pub fn timing(&self) -> StreamTiming {
        StreamTiming {
            command_settle: Duration::from_millis(self.serial.command_settle_ms),
            shutdown_settle: Duration::from_millis(self.serial.shutdown_settle_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlotterConfig::default();
        assert_eq!(config.serial.device.baud_rate, 9600);
        assert_eq!(config.paper, PaperSize::letter());
        assert_eq!(config.trace.clarity, 0.01);
        assert_eq!(config.trace.emission, EmissionMode::Span);
        assert_eq!(config.timing(), StreamTiming::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config: PlotterConfig = toml::from_str(
            r#"
            [serial]
            port = "COM3"
            command_settle_ms = 250

            [trace]
            emission = "reference"
            stream = "framing-only"
            "#,
        )
        .unwrap();
        assert_eq!(config.serial.device.port, "COM3");
        assert_eq!(config.serial.device.baud_rate, 9600);
        assert_eq!(config.timing().command_settle, Duration::from_millis(250));
        assert_eq!(config.trace.emission, EmissionMode::Reference);
        assert_eq!(config.trace.stream, StreamMode::FramingOnly);
        assert_eq!(config.trace.clarity, 0.01);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = PlotterConfig::default();
        config.trace.clarity = 1.5;
        assert!(config.validate().is_err());

        let mut config = PlotterConfig::default();
        config.serial.device.baud_rate = 0;
        assert!(config.validate().is_err());

        let mut config = PlotterConfig::default();
        config.paper.height = -1.0;
        assert!(config.validate().is_err());
    }
}
