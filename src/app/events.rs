//! Outbound application events.
//!
//! The [`BridgeService`](super::service::BridgeService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log to the debug
//! console, record in a test, etc.

use super::commands::LampPattern;

/// Structured events emitted by the bridge core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The bridge started and drove the lamps to a known state.
    Started(LampPattern),

    /// A recognized command byte was dispatched and acknowledged.
    CommandDispatched {
        input: u8,
        pattern: LampPattern,
        reply: u8,
    },
}
