//! Port traits — the hexagonal boundary between the bridge core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (core)
//! ```
//!
//! Driven adapters (the USB-CDC channel, the lamp lines, event sinks)
//! implement these traits.  The
//! [`BridgeService`](super::service::BridgeService) consumes them via
//! generics, so the core never touches hardware directly and runs
//! unmodified in host tests.

use super::commands::LampPattern;

// ───────────────────────────────────────────────────────────────
// Command channel port (driven adapter: USB stack ↔ core)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented duplex channel owned by the external USB stack.
///
/// The core consumes exactly three operations: a non-blocking one-byte
/// receive, a best-effort one-byte send, and the stack's periodic
/// housekeeping entry point.
pub trait CommandChannel {
    /// Non-blocking receive of one byte.  `None` means no byte is
    /// currently available, which is a normal loop outcome, not a failure.
    fn try_receive_byte(&mut self) -> Option<u8>;

    /// Best-effort send of one byte.  If the stack cannot accept the byte
    /// it is dropped; the core imposes no retry or backpressure handling.
    fn send_byte(&mut self, byte: u8);

    /// Run the external stack's housekeeping (enumeration, control
    /// transfers, endpoint service).  Called exactly once per loop
    /// iteration, unconditionally.
    fn service(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: core → lamp lines)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the core calls this to drive the three lamp lines.
pub trait IndicatorPort {
    /// Drive all three lines to the given pattern.
    fn apply(&mut self, pattern: LampPattern);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (debug console,
/// test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// CDC control-plane hook (USB stack → firmware callbacks)
// ───────────────────────────────────────────────────────────────

/// Callbacks the external USB stack's contract requires the firmware to
/// supply.  The channel adapter invokes these as it observes the matching
/// control-plane activity during housekeeping.
///
/// All four are required methods so an implementation states its no-ops
/// explicitly rather than inheriting them silently.
pub trait CdcEventHook {
    /// The host selected a configuration; endpoints were (re)configured.
    fn configuration_changed(&mut self);

    /// A class-specific control request was delegated to the CDC class.
    fn control_request(&mut self);

    /// The host changed the line encoding (baud rate, framing).
    fn line_encoding_changed(&mut self, encoding: &LineEncoding);

    /// The host changed the control line state (DTR/RTS).
    fn control_line_state_changed(&mut self, dtr: bool, rts: bool);
}

/// Production hook: every callback is an intentional no-op.  The bridge
/// ignores line-encoding and control-line changes entirely; the virtual
/// serial port behaves the same at any host-side settings.
pub struct NullCdcHook;

impl CdcEventHook for NullCdcHook {
    fn configuration_changed(&mut self) {}

    fn control_request(&mut self) {}

    fn line_encoding_changed(&mut self, _encoding: &LineEncoding) {}

    fn control_line_state_changed(&mut self, _dtr: bool, _rts: bool) {}
}

// ───────────────────────────────────────────────────────────────
// Line encoding
// ───────────────────────────────────────────────────────────────

/// Port-level mirror of the CDC line-coding payload handed to
/// [`CdcEventHook::line_encoding_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEncoding {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

impl Default for LineEncoding {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            stop_bits: StopBits::One,
            parity: Parity::None,
        }
    }
}

/// Number of stop bits requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    OnePointFive,
    Two,
}

/// Parity mode requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
    Mark,
    Space,
}
