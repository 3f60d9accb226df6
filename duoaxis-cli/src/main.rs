use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duoaxis_drivers::MotorController;
use duoaxis_hal_serialport::{available_ports, SerialUart, StdDelay};
use duoaxis_protocol::{AxisStatus, CommandKind};
use tracing::info;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "duoaxis")]
#[command(about = "Drive a two-axis motor controller over its serial register protocol")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "duoaxis.toml")]
    config: PathBuf,

    /// Serial port, overrides the config file
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate, overrides the config file
    #[arg(short, long)]
    baud: Option<u32>,

    /// Settle interval between command and reply in microseconds
    #[arg(long)]
    settle_us: Option<u32>,

    /// Reject replies with a bad start marker or checksum
    #[arg(long)]
    verify: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stop both motors
    Stop,
    /// Move a motor to an absolute position
    Move {
        /// Axis index (0 or 1)
        axis: u8,
        /// Target position (0-65535)
        #[arg(allow_negative_numbers = true)]
        position: i32,
    },
    /// Print the current position of a motor
    Position {
        /// Axis index (0 or 1)
        axis: u8,
    },
    /// Print the travel limit of a motor
    Limit {
        /// Axis index (0 or 1)
        axis: u8,
    },
    /// Print the decoded status register of a motor
    Status {
        /// Axis index (0 or 1)
        axis: u8,
    },
    /// List serial ports on this machine
    Ports,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "duoaxis_cli=info,duoaxis_hal_serialport=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_overrides(cli.port, cli.baud, cli.settle_us, cli.verify);

    let open = |config: &Config| -> color_eyre::Result<_> {
        let uart = SerialUart::open(&config.port)?;
        Ok(MotorController::with_config(uart, StdDelay, config.controller))
    };

    match cli.command {
        Command::Ports => {
            for name in available_ports()? {
                println!("{name}");
            }
        }
        Command::Stop => {
            open(&config)?.stop()?;
            info!("Stopped both motors");
        }
        Command::Move { axis, position } => {
            open(&config)?.move_to(axis, position)?;
            info!(axis, position, "Move commanded");
        }
        Command::Position { axis } => {
            println!("{}", open(&config)?.get_position(axis)?);
        }
        Command::Limit { axis } => {
            println!("{}", open(&config)?.get_max_position(axis)?);
        }
        Command::Status { axis } => {
            let raw = open(&config)?.read_register(CommandKind::ReadStatus, axis)?;
            let status = AxisStatus::from_register(raw);
            println!(
                "state={:?} home={} limit={} raw=0x{raw:08X}",
                status.state, status.on_home, status.on_limit
            );
        }
    }

    Ok(())
}
