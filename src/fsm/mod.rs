//! Table-driven state machine for the feeder gate.
//!
//! ```text
//!   ┌──────────┬──────────────┬─────────────┬──────────────────────────┐
//!   │ state    │ on_enter     │ on_exit     │ on_update                │
//!   ├──────────┼──────────────┼─────────────┼──────────────────────────┤
//!   │ Closed   │ servo→closed │ —           │ Feed pending → Open      │
//!   │ Open     │ servo→open   │ log hold    │ hold elapsed → Closed    │
//!   └──────────┴──────────────┴─────────────┴──────────────────────────┘
//! ```
//!
//! Handlers are plain `fn` pointers over [`FsmContext`].  `on_update` of
//! the active row decides the next state; the engine then runs the old
//! row's `on_exit` and the new row's `on_enter`, in that order.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

/// Position of the feeder mechanism.  Discriminants index the state table
/// built by [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Closed = 0,
    Open = 1,
}

impl StateId {
    /// Rows in the state table.
    pub const COUNT: usize = 2;

    /// Inverse of `id as usize`.  Anything unknown is treated as `Closed`,
    /// the resting position.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Closed,
            1 => Self::Open,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Closed
            }
        }
    }
}

/// Entry/exit hook.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-tick decision: `Some(next)` leaves the state.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ── Engine ────────────────────────────────────────────────────

pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
    ticks: u64,
    transitions: u64,
}

impl Fsm {
    /// Build an engine parked in `initial`.  No hook runs until
    /// [`start`](Self::start).
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id as usize == i),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial,
            ticks: 0,
            transitions: 0,
        }
    }

    /// Enter the initial state.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        let row = self.row(self.current);
        info!("FSM start: {}", row.name);
        if let Some(enter) = row.on_enter {
            enter(ctx);
        }
    }

    /// Run the active state's `on_update` once.  Returns the state entered,
    /// if the tick caused a transition.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<StateId> {
        self.ticks += 1;
        let next = (self.row(self.current).on_update)(ctx)?;
        self.enter(next, ctx);
        Some(next)
    }

    /// Move to `next` without consulting `on_update`.  Moving to the
    /// current state does nothing.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next != self.current {
            self.enter(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    fn row(&self, id: StateId) -> &StateDescriptor {
        &self.table[id as usize]
    }

    fn enter(&mut self, next: StateId, ctx: &mut FsmContext) {
        let (from, to) = (self.row(self.current), self.row(next));
        info!("FSM {} -> {}", from.name, to.name);
        let (exit, enter) = (from.on_exit, to.on_enter);

        if let Some(exit) = exit {
            exit(ctx);
        }
        self.current = next;
        self.transitions += 1;
        if let Some(enter) = enter {
            enter(ctx);
        }
    }
}
