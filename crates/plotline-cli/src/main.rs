//! plotline CLI - trace images and drive a pen plotter
//!
//! Headless front-end over the plotline crates: image tracing and path
//! planning run before the device is opened, so bad input never reaches it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plotline_serial::{DeviceStreamer, SerialChannel};
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod session;

use config::PlotterConfig;
use session::{parse_complexity, plan_image, run_repl, send_once};

#[derive(Parser)]
#[command(name = "plotline")]
#[command(about = "Trace images and drive a pen plotter", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Serial device, overriding the configuration file
    #[arg(long, global = true)]
    port: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and send a single command
    Send {
        /// Command words, e.g. `G00 10 20`
        #[arg(required = true, num_args = 1..)]
        command: Vec<String>,
    },
    /// Trace an image and stream it to the plotter
    Draw {
        /// Input image (.png or .jpg)
        image: PathBuf,
        /// `simple` for line art, `complex` for shaded images
        #[arg(short, long, default_value = "simple")]
        complexity: String,
        /// Approximation tolerance as a fraction of contour length
        #[arg(long)]
        clarity: Option<f64>,
    },
    /// Trace an image and print its waypoints without a device
    Plan {
        /// Input image (.png or .jpg)
        image: PathBuf,
        #[arg(short, long, default_value = "simple")]
        complexity: String,
        #[arg(long)]
        clarity: Option<f64>,
    },
    /// Interactive command session
    Repl,
    /// List accepted commands
    Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = PlotterConfig::load_or_default(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.serial.device.port = port;
    }

    match cli.command {
        Commands::Send { command } => {
            send_command(&command.join(" "), &config)?;
        }
        Commands::Draw {
            image,
            complexity,
            clarity,
        } => {
            apply_clarity(&mut config, clarity)?;
            draw_image(&image, &complexity, &config)?;
        }
        Commands::Plan {
            image,
            complexity,
            clarity,
        } => {
            apply_clarity(&mut config, clarity)?;
            show_plan(&image, &complexity, &config)?;
        }
        Commands::Repl => {
            let streamer = open_streamer(&config)?;
            let stdin = io::stdin();
            run_repl(streamer, stdin.lock(), io::stdout(), &config)?;
        }
        Commands::Commands => {
            println!("{}", plotline_gcode::COMMAND_REFERENCE);
        }
    }

    Ok(())
}

fn apply_clarity(config: &mut PlotterConfig, clarity: Option<f64>) -> Result<()> {
    if let Some(clarity) = clarity {
        config.trace.clarity = clarity;
        config.validate()?;
    }
    Ok(())
}

fn open_streamer(config: &PlotterConfig) -> Result<DeviceStreamer<SerialChannel>> {
    let channel = SerialChannel::open(&config.serial.device)
        .with_context(|| format!("opening {}", config.serial.device.port))?;
    Ok(DeviceStreamer::new(
        channel,
        config.timing(),
        config.trace.stream,
    ))
}

fn send_command(text: &str, config: &PlotterConfig) -> Result<()> {
    // Reject before opening the port.
    let command = plotline_gcode::validate(text)?;
    let streamer = open_streamer(config)?;
    send_once(streamer, &command, io::stdout())?;
    Ok(())
}

fn draw_image(image: &Path, complexity: &str, config: &PlotterConfig) -> Result<()> {
    let complexity = parse_complexity(complexity)?;
    let plan = plan_image(image, complexity, config)?;

    let mut streamer = open_streamer(config)?;
    let sent = streamer.send_plan(&plan)?;
    streamer.shutdown()?;

    println!(
        "Drew {}: {} contours, {} approximation points, {} points emitted, {} sent",
        image.display(),
        plan.stats.contour_count,
        plan.stats.approximation_points,
        plan.stats.emitted_points,
        sent
    );
    Ok(())
}

fn show_plan(image: &Path, complexity: &str, config: &PlotterConfig) -> Result<()> {
    let complexity = parse_complexity(complexity)?;
    let plan = plan_image(image, complexity, config)?;

    for wp in &plan.waypoints {
        println!("{wp}");
    }
    println!();
    println!("Contours:             {}", plan.stats.contour_count);
    println!("Approximation points: {}", plan.stats.approximation_points);
    println!("Points emitted:       {}", plan.stats.emitted_points);
    println!("Pen-up travel:        {:.1} px", plan.stats.travel_px);
    println!("Visit order:          {:?}", plan.chain.order);
    Ok(())
}
