//! Image planning and the interactive command session.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use plotline_gcode::{Command, COMMAND_REFERENCE};
use plotline_path::{plan_path, Complexity, PathPlan};
use plotline_serial::{DeviceChannel, DeviceStreamer, Submission};
use plotline_vision::trace_file;

use crate::config::PlotterConfig;

/// Trace an image file and plan its traversal. Touches no device.
pub fn plan_image(path: &Path, complexity: Complexity, config: &PlotterConfig) -> Result<PathPlan> {
    let traced = trace_file(path, complexity, &config.trace_settings())
        .with_context(|| format!("tracing {}", path.display()))?;
    let plan = plan_path(&traced.approximations, &traced.scaler, config.trace.emission)
        .with_context(|| format!("planning {}", path.display()))?;
    info!(
        "{} approximation points, {} points emitted, {:.1} px pen-up travel",
        plan.stats.approximation_points, plan.stats.emitted_points, plan.stats.travel_px
    );
    Ok(plan)
}

/// Parse a `simple` / `complex` selector, logging a warning on failure.
pub fn parse_complexity(text: &str) -> Result<Complexity> {
    text.parse::<Complexity>().map_err(|err| {
        warn!("{err}");
        anyhow::Error::new(err)
    })
}

/// Send one validated command, then shut down.
///
/// `M02` goes straight to shutdown so the device sees it once.
pub fn send_once<C, W>(mut streamer: DeviceStreamer<C>, command: &Command, mut out: W) -> Result<C>
where
    C: DeviceChannel,
    W: Write,
{
    if *command != Command::EndOfProgram {
        for reply in streamer.send_command(command)? {
            writeln!(out, "{reply}")?;
        }
    }
    Ok(streamer.shutdown()?)
}

/// Read commands line by line until `M02` or end of input, then shut down.
///
/// Besides device commands the session understands `help` and
/// `draw <image> [simple|complex]`. Rejected commands and failed drawings
/// are reported and the session continues.
pub fn run_repl<C, R, W>(
    mut streamer: DeviceStreamer<C>,
    input: R,
    mut out: W,
    config: &PlotterConfig,
) -> Result<C>
where
    C: DeviceChannel,
    R: BufRead,
    W: Write,
{
    writeln!(out, "type `help` for the command list, `M02` to finish")?;
    for line in input.lines() {
        let line = line.context("reading input")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let mut words = text.split_whitespace();
        match words.next() {
            Some("help") => {
                writeln!(out, "{COMMAND_REFERENCE}")?;
                continue;
            }
            Some("draw") => {
                let Some(image) = words.next() else {
                    writeln!(out, "usage: draw <image> [simple|complex]")?;
                    continue;
                };
                let outcome = parse_complexity(words.next().unwrap_or("simple"))
                    .and_then(|c| plan_image(Path::new(image), c, config));
                match outcome {
                    Ok(plan) => {
                        let sent = streamer.send_plan(&plan)?;
                        writeln!(
                            out,
                            "drew {image}: {} points emitted, {sent} sent",
                            plan.stats.emitted_points
                        )?;
                    }
                    Err(err) => writeln!(out, "error: {err:#}")?,
                }
                continue;
            }
            _ => {}
        }

        if plotline_gcode::validate(text) == Ok(Command::EndOfProgram) {
            break;
        }
        match streamer.submit(text)? {
            Submission::Sent { replies, .. } => {
                for reply in replies {
                    writeln!(out, "{reply}")?;
                }
            }
            Submission::Rejected(err) => writeln!(out, "error: {err}")?,
        }
    }

    Ok(streamer.shutdown()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_serial::{MemoryChannel, StreamMode, StreamTiming};

    fn streamer() -> DeviceStreamer<MemoryChannel> {
        DeviceStreamer::new(
            MemoryChannel::new(),
            StreamTiming::immediate(),
            StreamMode::Coordinates,
        )
    }

    fn run(input: &str) -> (MemoryChannel, String) {
        let mut out = Vec::new();
        let channel = run_repl(
            streamer(),
            input.as_bytes(),
            &mut out,
            &PlotterConfig::default(),
        )
        .unwrap();
        (channel, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_session_stops_at_end_of_program() {
        let (channel, out) = run("G21\nG01 1 2\nM02\nG90\n");
        assert_eq!(channel.written_text(), "G21\nM02");
        assert!(channel.is_closed());
        assert!(out.contains("error: \"G01 1 2\""));
    }

    #[test]
    fn test_session_shuts_down_at_eof() {
        let (channel, _) = run("G90\n\nG00 10 5");
        assert_eq!(channel.written_text(), "G90\nG00\n10\n5\nM02");
        assert!(channel.is_closed());
    }

    #[test]
    fn test_failed_draw_keeps_session_open() {
        let (channel, out) = run("draw missing-image.png\ndraw x.png medium\nG91\n");
        assert!(out.matches("error:").count() >= 2);
        assert_eq!(channel.written_text(), "G91\nM02");
    }

    #[test]
    fn test_help_lists_commands() {
        let (channel, out) = run("help\n");
        assert!(out.contains("G00"));
        assert_eq!(channel.written_text(), "M02");
    }

    #[test]
    fn test_send_once_end_of_program_is_not_doubled() {
        let mut out = Vec::new();
        let command = plotline_gcode::validate("M02").unwrap();
        let channel = send_once(streamer(), &command, &mut out).unwrap();
        assert_eq!(channel.written_text(), "M02");
        assert!(channel.is_closed());
    }

    #[test]
    fn test_send_once_prints_replies() {
        let mut s = streamer();
        s.channel_mut().push_incoming("ok\n");
        let mut out = Vec::new();
        let command = plotline_gcode::validate("G00 010 5").unwrap();
        let channel = send_once(s, &command, &mut out).unwrap();
        assert_eq!(channel.written_text(), "G00\n010\n5\nM02");
        assert_eq!(String::from_utf8(out).unwrap(), "ok\n");
    }

    #[test]
    fn test_parse_complexity() {
        assert_eq!(parse_complexity("Complex").unwrap(), Complexity::Complex);
        assert!(parse_complexity("medium").is_err());
    }
}
