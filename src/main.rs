mod error;
mod replay;
mod script;


use std::path::PathBuf;
use std::process::ExitCode;

use canvas::config::EngineConfig;
use canvas::coords::CanvasRect;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::error::CliError;
use crate::replay::Replay;

#[derive(Parser, Debug)]
#[command(name = "boxboard", about = "Replay pointer sessions against the box board engine")]
struct Cli {
    /// Screen x of the canvas's left edge.
    #[arg(long, env = "BOXBOARD_CANVAS_LEFT", default_value_t = 0.0, allow_negative_numbers = true)]
    canvas_left: f64,

    /// Screen y of the canvas's top edge.
    #[arg(long, env = "BOXBOARD_CANVAS_TOP", default_value_t = 0.0, allow_negative_numbers = true)]
    canvas_top: f64,

    /// Start with an unmeasurable canvas.
    #[arg(long)]
    unmounted: bool,

    /// Resting stacking order of the template sidebar. Overrides
    /// `BOXBOARD_SIDEBAR_REST_Z`.
    #[arg(long, allow_negative_numbers = true)]
    sidebar_rest_z: Option<i64>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of events and print the final board.
    Replay { script: PathBuf },
    /// Run the built-in spawn/drag/delete walkthrough.
    Demo,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(z) = self.sidebar_rest_z {
            config.sidebar_rest_z = z;
        }
        config
    }

    fn canvas_rect(&self) -> Option<CanvasRect> {
        (!self.unmounted).then(|| CanvasRect::new(self.canvas_left, self.canvas_top))
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let events = match &cli.command {
        Command::Replay { script } => {
            let text = std::fs::read_to_string(script)
                .map_err(|source| CliError::ReadScript { path: script.clone(), source })?;
            script::parse_script(&text)?
        }
        Command::Demo => script::demo_script(),
    };

    let mut replay = Replay::new(cli.engine_config(), cli.canvas_rect());
    replay.run(&events)?;
    tracing::info!(events = events.len(), boxes = replay.core().boxes().len(), "replay finished");

    println!("{}", serde_json::to_string_pretty(&replay.report())?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "boxboard failed");
            ExitCode::FAILURE
        }
    }
}
