use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use slt_node::{slt, NodeConfig, NodeRegistry};
use slt_usb::{HidApiBackend, SltSession};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::{signal, task};

use crate::cli::{Cli, LevelFilter};
use crate::node_worker::spawn_node_worker;
use crate::settings::Settings;
use crate::stream::{read_messages, write_messages};

mod cli;
mod node_worker;
mod settings;
mod stream;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // stdout carries the outbound messages, so everything else goes to stderr.
    CombinedLogger::init(vec![TermLogger::new(
        match args.log_level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        },
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])
    .context("Could not configure the logger")?;
    log_panics::init();

    info!("Starting SLT Daemon v{}", VERSION);
    let settings = Settings::load(&args.config)?;
    let (node_config, config_value) = settings.node_config(args.read_timeout_ms)?;

    if args.list_devices {
        return list_devices(&node_config);
    }

    match node_config.read_timeout() {
        Some(timeout) => info!("Board reads time out after {:?}", timeout),
        None => warn!("No read timeout configured, a silent board will stall the node"),
    }

    let (input_tx, input_rx) = mpsc::channel(32);
    let (output_tx, output_rx) = mpsc::channel(32);

    let worker = spawn_node_worker(
        || {
            let mut registry = NodeRegistry::new();
            slt::register(&mut registry, HidApiBackend::new)?;
            Ok(registry)
        },
        config_value,
        input_rx,
        output_tx,
    )?;
    let writer = tokio::spawn(write_messages(tokio::io::stdout(), output_rx));

    // Dropping the reader, either at end of input or on Ctrl+C, closes the node's input and
    // lets the worker close the board and exit.
    let interrupted = tokio::select! {
        result = read_messages(BufReader::new(tokio::io::stdin()), input_tx) => {
            result?;
            false
        }
        _ = signal::ctrl_c() => true,
    };

    info!("Shutting down daemon");
    // A read that never completes keeps the worker busy; without a timeout this join waits on it.
    task::spawn_blocking(move || worker.join())
        .await
        .context("Could not join the node worker")?
        .map_err(|_| anyhow::anyhow!("Node worker panicked"))?;
    writer.await.context("Could not join the output writer")??;

    if interrupted {
        // tokio's stdin reader sits in a blocking thread that would hold the runtime open until
        // another line arrives.
        std::process::exit(0);
    }
    Ok(())
}

fn list_devices(config: &NodeConfig) -> Result<()> {
    let mut session = SltSession::new(HidApiBackend::new()).with_ids(config.ids());
    let devices = session
        .devices()
        .context("Could not enumerate HID devices")?;

    if devices.is_empty() {
        warn!("No SLT boards ({}) attached", config.ids());
    }
    for device in devices {
        println!(
            "{:04x}:{:04x}\t{}",
            device.vendor_id, device.product_id, device.path
        );
    }
    Ok(())
}
