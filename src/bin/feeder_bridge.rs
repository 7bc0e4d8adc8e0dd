//! Host bridge — drives a feeder over its USB-serial link.
//!
//! ```text
//! feeder-bridge [config.json]
//! ```
//!
//! Every line read on stdin queues one feed command (the line is its
//! label, `FEED_NOW` when blank).  Feeder output is logged, and each
//! `Feed Complete.` marks the oldest outstanding command executed.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use petfeeder::adapters::time::Esp32TimeAdapter;
use petfeeder::bridge::queue::MemoryQueue;
use petfeeder::bridge::serial_port::SerialTransport;
use petfeeder::bridge::FeedBridge;
use petfeeder::config::BridgeConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

fn load_config() -> Result<BridgeConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(BridgeConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    Ok(BridgeConfig::from_json(&json)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    config.validate()?;
    let transport = SerialTransport::open(&config)
        .with_context(|| format!("opening {}", config.port_path))?;
    let mut bridge = FeedBridge::new(transport, MemoryQueue::new(), config);
    let clock = Esp32TimeAdapter::new();

    let (tx, requests) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    bridge.on_subscribed()?;
    info!("Bridge: listening for feed requests on stdin");

    loop {
        while let Ok(line) = requests.try_recv() {
            let label = match line.trim() {
                "" => "FEED_NOW",
                other => other,
            };
            let cmd = bridge.queue_mut().push_pending(label);
            if let Err(e) = bridge.on_command_inserted(&cmd) {
                warn!("Bridge: command #{} not sent: {}", cmd.id, e);
            }
        }
        if let Err(e) = bridge.poll(clock.uptime_ms()) {
            warn!("Bridge: {}", e);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
