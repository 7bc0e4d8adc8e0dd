//! PetFeeder Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SerialAdapter   HardwareAdapter   LogEventSink          │
//! │  (CommandPort)   (ActuatorPort)    (EventSink)           │
//! │                                    Esp32Delay (DelayNs)  │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          AppService (pure logic)               │      │
//! │  │          FSM · Closed ⇄ Open                   │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use petfeeder::adapters::log_sink::LogEventSink;
use petfeeder::adapters::time::Esp32Delay;
use petfeeder::app::service::AppService;
use petfeeder::board::Board;
use petfeeder::config::FeederConfig;

fn main() -> Result<()> {
    // ── 1. Platform init ──────────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PetFeeder v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration + peripherals ────────────────────────
    let config = FeederConfig::default();
    let Board { mut serial, mut hw } = Board::bring_up(&config)?;

    // ── 3. Remaining adapters ─────────────────────────────────
    let mut delay = Esp32Delay::new();
    let mut sink = LogEventSink::new();

    // ── 4. Control loop (never returns) ───────────────────────
    let mut app = AppService::new(config);
    app.run(&mut serial, &mut hw, &mut delay, &mut sink)
}
