//! Concrete state handler functions and table builder.
//!
//! ```text
//!  CLOSED ──[Feed]──▶ OPEN
//!    ▲                  │
//!    └───[hold done]────┘
//! ```

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::app::commands::AppCommand;
use log::{debug, info};

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Closed
        StateDescriptor {
            id: StateId::Closed,
            name: "Closed",
            on_enter: Some(closed_enter),
            on_exit: None,
            on_update: closed_update,
        },
        // Index 1 — Open
        StateDescriptor {
            id: StateId::Open,
            name: "Open",
            on_enter: Some(open_enter),
            on_exit: Some(open_exit),
            on_update: open_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED state
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &mut FsmContext) {
    ctx.commands.servo_angle_deg = Some(ctx.config.closed_angle_deg);
    info!("CLOSED: servo at {}°", ctx.config.closed_angle_deg);
}

fn closed_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.pending.take() {
        Some(AppCommand::Feed) => Some(StateId::Open),
        None => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN state — food falls while the gate is held open
// ═══════════════════════════════════════════════════════════════════════════

fn open_enter(ctx: &mut FsmContext) {
    ctx.open_elapsed_ms = 0;
    ctx.commands.servo_angle_deg = Some(ctx.config.open_angle_deg);
    info!(
        "OPEN: servo at {}° for {}ms",
        ctx.config.open_angle_deg, ctx.config.hold_open_ms
    );
}

fn open_exit(ctx: &mut FsmContext) {
    debug!("OPEN: held for {}ms", ctx.open_elapsed_ms);
}

fn open_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.hold_elapsed() {
        return Some(StateId::Closed);
    }
    None
}
