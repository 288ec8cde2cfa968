//! Bridge service — the polling-loop core.
//!
//! [`BridgeService`] owns the lamp state and runs the steady-state loop:
//! poll the channel for at most one byte, dispatch it through the command
//! table, drive the lamps and echo the acknowledgment, then hand control
//! to the external USB stack's housekeeping.  All I/O flows through port
//! traits injected at call sites, making the entire loop testable with
//! mock adapters.
//!
//! ```text
//!  CommandChannel ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                     │    BridgeService      │
//!  IndicatorPort ◀────│  command table · state │
//!                     └──────────────────────┘
//! ```

use log::info;

use super::commands::{LampPattern, dispatch};
use super::events::AppEvent;
use super::ports::{CommandChannel, EventSink, IndicatorPort};

/// Result of one loop iteration, for observers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No byte was available this iteration.
    Idle,
    /// A recognized command was dispatched and acknowledged.
    Dispatched { input: u8, reply: u8 },
    /// A byte arrived but matched no rule; nothing changed.
    Ignored(u8),
}

/// The polling-loop core.  Single steady state, no terminal state: the
/// loop is the entire program lifetime.
pub struct BridgeService {
    lamps: LampPattern,
    polls: u64,
    dispatched: u64,
}

impl BridgeService {
    pub fn new() -> Self {
        Self {
            lamps: LampPattern::OFF,
            polls: 0,
            dispatched: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every lamp line to the known all-off state and announce
    /// start.  Performed exactly once before entering the loop.
    pub fn start(&mut self, indicator: &mut impl IndicatorPort, sink: &mut impl EventSink) {
        self.lamps = LampPattern::OFF;
        indicator.apply(self.lamps);
        sink.emit(&AppEvent::Started(self.lamps));
        info!("bridge started, lamps off");
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration of the polling loop.
    ///
    /// 1. Non-blocking receive of at most one byte.
    /// 2. Dispatch a received byte through the command table.
    /// 3. Apply the pattern and echo the acknowledgment (best-effort).
    /// 4. Service the external USB stack exactly once, unconditionally.
    pub fn poll_once(
        &mut self,
        channel: &mut impl CommandChannel,
        indicator: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        self.polls += 1;

        let outcome = match channel.try_receive_byte() {
            None => PollOutcome::Idle,
            Some(byte) => match dispatch(byte) {
                Some(cmd) => {
                    self.lamps = cmd.pattern;
                    indicator.apply(cmd.pattern);
                    channel.send_byte(cmd.reply);
                    self.dispatched += 1;
                    sink.emit(&AppEvent::CommandDispatched {
                        input: byte,
                        pattern: cmd.pattern,
                        reply: cmd.reply,
                    });
                    PollOutcome::Dispatched {
                        input: byte,
                        reply: cmd.reply,
                    }
                }
                None => PollOutcome::Ignored(byte),
            },
        };

        channel.service();
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    /// Pattern most recently applied to the lamp lines.
    pub fn lamp_state(&self) -> LampPattern {
        self.lamps
    }

    /// Total loop iterations since startup.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }

    /// Total recognized commands dispatched since startup.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched
    }
}

impl Default for BridgeService {
    fn default() -> Self {
        Self::new()
    }
}
