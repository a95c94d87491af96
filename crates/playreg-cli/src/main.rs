//! playreg: run the play register on a desktop host.
//!
//! The screen is printed to stdout, tones are logged, and lines typed at
//! the terminal feed the debug console (`BC:<code>`, `RFID:<uid>`).

mod config;
mod console;
mod host;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use playreg_core::Pins;
use playreg_hardware::mock::{
    MockByteStream, MockByteStreamHandle, MockCardReader, MockCardReaderHandle,
};
use playreg_hardware::serial::SerialByteStream;
use playreg_hardware::{AnyByteStream, AnyCardReader, SystemClock};
use playreg_register::{Peripherals, RegisterMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::console::ConsoleLine;
use crate::host::{HostPlatform, LogAudio, TerminalSurface};

/// Main loop period.
const TICK_INTERVAL_MS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "playreg", version)]
#[command(about = "Toy shop register driven by a barcode scanner and card reader")]
struct Args {
    /// JSON configuration file
    config: Option<PathBuf>,

    /// Barcode scanner serial port, overriding the config file
    #[arg(long)]
    barcode_port: Option<String>,

    /// Attach a simulated card reader (`card <hex>` on the console)
    #[arg(long)]
    card_reader_mock: bool,
}

/// Host-side ends of the simulated devices.
struct ConsoleHandles {
    debug: MockByteStreamHandle,
    card_reader: MockCardReaderHandle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if args.barcode_port.is_some() {
        config.barcode_port = args.barcode_port;
    }
    config.card_reader_mock |= args.card_reader_mock;

    tracing::info!(
        version = playreg_core::VERSION,
        barcode_port = ?config.barcode_port,
        card_reader_mock = config.card_reader_mock,
        "Starting play register"
    );

    let (peripherals, handles) = build_peripherals(&config)?;
    let mut register = RegisterMode::new(peripherals, config.register)
        .context("invalid register configuration")?;

    register.initialize(Pins::default());
    register.play_startup_tone();
    register.enter();
    register.peripherals_mut().surface.present();

    run(&mut register, &handles).await;

    tracing::info!("Shutting down");
    Ok(())
}

fn build_peripherals(
    config: &AppConfig,
) -> anyhow::Result<(Peripherals<HostPlatform>, ConsoleHandles)> {
    let (debug, debug_handle) = MockByteStream::new();

    let barcode = match &config.barcode_port {
        Some(port) => {
            let stream = SerialByteStream::open(port, config.register.barcode_baud_rate)
                .with_context(|| format!("failed to open barcode port {port}"))?;
            AnyByteStream::Serial(stream)
        }
        None => {
            tracing::warn!("No barcode port configured, scanner input disabled");
            AnyByteStream::Mock(MockByteStream::default())
        }
    };

    let (card_reader, card_reader_handle) = if config.card_reader_mock {
        MockCardReader::new()
    } else {
        MockCardReader::absent()
    };

    let peripherals = Peripherals {
        debug: AnyByteStream::Mock(debug),
        barcode,
        card_reader: AnyCardReader::Mock(card_reader),
        surface: TerminalSurface::default(),
        audio: LogAudio::default(),
        clock: SystemClock::new(),
    };

    let handles = ConsoleHandles {
        debug: debug_handle,
        card_reader: card_reader_handle,
    };

    Ok((peripherals, handles))
}

/// Tick the register until Ctrl-C, feeding it console input in between.
async fn run(register: &mut RegisterMode<HostPlatform>, handles: &ConsoleHandles) {
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                register.update();
                register.peripherals_mut().surface.present();
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => dispatch_line(register, handles, &line),
                Ok(None) => {
                    tracing::debug!("Console closed");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Console read failed");
                    stdin_open = false;
                }
            },
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                break;
            }
        }
    }
}

fn dispatch_line(
    register: &mut RegisterMode<HostPlatform>,
    handles: &ConsoleHandles,
    line: &str,
) {
    match ConsoleLine::parse(line) {
        ConsoleLine::Touch { x, y } => {
            register.on_touch(x, y);
            register.peripherals_mut().surface.present();
        }
        ConsoleLine::Card(uid) => {
            if !register.is_card_reader_ready() {
                tracing::warn!("No card reader attached, use RFID:<uid> or --card-reader-mock");
            }
            handles.card_reader.present_card(uid);
        }
        ConsoleLine::Debug(line) => handles.debug.inject_line(&line),
    }
}
