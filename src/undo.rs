//! Undo Delete
//!
//! A single-slot soft delete: the task stays on the board, marked, for
//! [`UNDO_SECONDS`] one-second ticks before the deletion becomes final.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Countdown a scheduled deletion starts with
pub const UNDO_SECONDS: u32 = 5;
pub const UNDO_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeletion {
    pub board_id: u32,
    pub list_id: u32,
    pub task_id: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndoSlot {
    #[default]
    Empty,
    Pending {
        deletion: PendingDeletion,
        remaining: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoTick {
    /// Seconds left before the deletion becomes final
    Counting(u32),
    /// The countdown reached zero; the slot is empty again
    Expired(PendingDeletion),
}

impl UndoSlot {
    /// Stage `deletion` with a full countdown.
    /// Returns the deletion it displaced, which the caller must finalize.
    pub fn schedule(&mut self, deletion: PendingDeletion) -> Option<PendingDeletion> {
        let displaced = self.pending();
        *self = UndoSlot::Pending {
            deletion,
            remaining: UNDO_SECONDS,
        };
        displaced
    }

    pub fn cancel(&mut self) -> Option<PendingDeletion> {
        let cancelled = self.pending();
        *self = UndoSlot::Empty;
        cancelled
    }

    /// Advance the countdown by one. `None` when nothing is pending.
    pub fn tick(&mut self) -> Option<UndoTick> {
        match *self {
            UndoSlot::Empty => None,
            UndoSlot::Pending { deletion, remaining } if remaining <= 1 => {
                *self = UndoSlot::Empty;
                Some(UndoTick::Expired(deletion))
            }
            UndoSlot::Pending { deletion, remaining } => {
                *self = UndoSlot::Pending {
                    deletion,
                    remaining: remaining - 1,
                };
                Some(UndoTick::Counting(remaining - 1))
            }
        }
    }

    pub fn pending(&self) -> Option<PendingDeletion> {
        match *self {
            UndoSlot::Pending { deletion, .. } => Some(deletion),
            UndoSlot::Empty => None,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match *self {
            UndoSlot::Pending { remaining, .. } => Some(remaining),
            UndoSlot::Empty => None,
        }
    }
}

/// Interval task feeding one tick per second into a channel.
/// Aborted when dropped.
struct Ticker {
    handle: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

impl Ticker {
    fn start() -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(UNDO_TICK);
            // first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Self { handle, ticks }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// [`UndoSlot`] driven by a tokio interval.
///
/// The ticker runs only while a deletion is pending: it is started by
/// `schedule` (restarted on replace) and stopped on cancel, expiry and drop.
/// `schedule` must be called from within a tokio runtime.
#[derive(Default)]
pub struct UndoTimer {
    slot: UndoSlot,
    ticker: Option<Ticker>,
}

impl UndoTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> UndoSlot {
        self.slot
    }

    pub fn pending(&self) -> Option<PendingDeletion> {
        self.slot.pending()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.slot.remaining()
    }

    pub fn schedule(&mut self, deletion: PendingDeletion) -> Option<PendingDeletion> {
        let displaced = self.slot.schedule(deletion);
        self.ticker = Some(Ticker::start());
        log::debug!(
            "Scheduled deletion of task {} ({}s to undo)",
            deletion.task_id,
            UNDO_SECONDS
        );
        displaced
    }

    pub fn cancel(&mut self) -> Option<PendingDeletion> {
        self.ticker = None;
        self.slot.cancel()
    }

    /// Wait for the next tick and apply it.
    ///
    /// Returns `None` right away when nothing is pending. Safe to use as a
    /// `tokio::select!` branch; a dropped wait loses no tick.
    pub async fn next_tick(&mut self) -> Option<UndoTick> {
        let ticker = self.ticker.as_mut()?;
        ticker.ticks.recv().await?;
        let tick = self.slot.tick();
        if !matches!(tick, Some(UndoTick::Counting(_))) {
            self.ticker = None;
        }
        tick
    }
}
