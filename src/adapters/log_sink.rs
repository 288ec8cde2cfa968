//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  No logger is registered on the AVR target, so the
//! records compile down to no-ops there; host tests and simulation runs
//! see them on the console.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(pattern) => {
                info!(
                    "START | red={} amber={} green={}",
                    pattern.red, pattern.amber, pattern.green
                );
            }
            AppEvent::CommandDispatched { input, pattern, reply } => {
                info!(
                    "CMD   | {:?} -> red={} amber={} green={} | ack={:?}",
                    *input as char, pattern.red, pattern.amber, pattern.green, *reply as char
                );
            }
        }
    }
}
