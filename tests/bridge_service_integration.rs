//! Integration tests: BridgeService polling loop against mock ports.

use std::collections::VecDeque;

use lightbridge::app::commands::LampPattern;
use lightbridge::app::events::AppEvent;
use lightbridge::app::ports::{CommandChannel, EventSink, IndicatorPort};
use lightbridge::app::service::{BridgeService, PollOutcome};

// ── Mock implementations ──────────────────────────────────────

struct MockChannel {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    service_calls: usize,
}

impl MockChannel {
    fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            service_calls: 0,
        }
    }

    fn with_input(bytes: &[u8]) -> Self {
        let mut channel = Self::new();
        channel.rx.extend(bytes);
        channel
    }
}

impl CommandChannel for MockChannel {
    fn try_receive_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn send_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }

    fn service(&mut self) {
        self.service_calls += 1;
    }
}

struct MockIndicator {
    applied: Vec<LampPattern>,
}

impl MockIndicator {
    fn new() -> Self {
        Self { applied: Vec::new() }
    }

    fn current(&self) -> LampPattern {
        self.applied.last().copied().unwrap_or(LampPattern::OFF)
    }
}

impl IndicatorPort for MockIndicator {
    fn apply(&mut self, pattern: LampPattern) {
        self.applied.push(pattern);
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

fn pat(red: bool, amber: bool, green: bool) -> LampPattern {
    LampPattern { red, amber, green }
}

fn make_bridge() -> (BridgeService, MockIndicator, RecordingSink) {
    let mut bridge = BridgeService::new();
    let mut lamps = MockIndicator::new();
    let mut sink = RecordingSink::new();
    bridge.start(&mut lamps, &mut sink);
    (bridge, lamps, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_all_lamps_off() {
    let (bridge, lamps, sink) = make_bridge();
    assert_eq!(lamps.applied, vec![LampPattern::OFF]);
    assert_eq!(sink.events, vec![AppEvent::Started(LampPattern::OFF)]);
    assert_eq!(bridge.lamp_state(), LampPattern::OFF);
}

// ── Loop liveness ─────────────────────────────────────────────

#[test]
fn idle_polls_service_the_stack_without_side_effects() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::new();

    for _ in 0..3 {
        assert_eq!(
            bridge.poll_once(&mut channel, &mut lamps, &mut sink),
            PollOutcome::Idle
        );
    }

    // Housekeeping ran exactly once per iteration; nothing else moved.
    assert_eq!(channel.service_calls, 3);
    assert!(channel.tx.is_empty());
    assert_eq!(lamps.applied.len(), 1, "only the startup all-off write");
    assert_eq!(sink.events.len(), 1, "only the Started event");
    assert_eq!(bridge.poll_count(), 3);
}

// ── End-to-end scenario A: '1' lights green ───────────────────

#[test]
fn command_one_lights_green_and_acks() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::with_input(b"1");

    let outcome = bridge.poll_once(&mut channel, &mut lamps, &mut sink);

    assert_eq!(outcome, PollOutcome::Dispatched { input: b'1', reply: b'1' });
    assert_eq!(lamps.current(), pat(false, false, true));
    assert_eq!(channel.tx, b"1");
    assert_eq!(channel.service_calls, 1);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::CommandDispatched {
            input: b'1',
            pattern: pat(false, false, true),
            reply: b'1',
        })
    );
}

// ── End-to-end scenario B: 'G' is equivalent to '1' ───────────

#[test]
fn uppercase_g_matches_digit_one() {
    let (mut bridge_digit, mut lamps_digit, mut sink_digit) = make_bridge();
    let mut digit = MockChannel::with_input(b"1");
    bridge_digit.poll_once(&mut digit, &mut lamps_digit, &mut sink_digit);

    let (mut bridge_alias, mut lamps_alias, mut sink_alias) = make_bridge();
    let mut alias = MockChannel::with_input(b"G");
    bridge_alias.poll_once(&mut alias, &mut lamps_alias, &mut sink_alias);

    assert_eq!(lamps_alias.current(), lamps_digit.current());
    assert_eq!(alias.tx, digit.tx, "alias echoes the canonical digit");
}

// ── End-to-end scenario C: unknown byte does nothing ──────────

#[test]
fn unknown_byte_changes_nothing() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::with_input(b"x");

    let outcome = bridge.poll_once(&mut channel, &mut lamps, &mut sink);

    assert_eq!(outcome, PollOutcome::Ignored(b'x'));
    assert_eq!(lamps.applied.len(), 1, "no lamp write beyond startup");
    assert!(channel.tx.is_empty(), "no reply for an unrecognized byte");
    assert_eq!(channel.service_calls, 1, "housekeeping still ran");
    assert_eq!(bridge.dispatch_count(), 0);
}

// ── End-to-end scenario D: '7' then '0' ───────────────────────

#[test]
fn seven_then_zero_transitions_all_on_to_all_off() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::with_input(b"70");

    bridge.poll_once(&mut channel, &mut lamps, &mut sink);
    assert_eq!(lamps.current(), pat(true, true, true));
    assert_eq!(channel.rx.len(), 1, "at most one byte consumed per iteration");

    bridge.poll_once(&mut channel, &mut lamps, &mut sink);
    assert_eq!(lamps.current(), pat(false, false, false));

    assert_eq!(channel.tx, b"70", "acknowledgments arrive in order");
    assert_eq!(channel.service_calls, 2);
    assert_eq!(bridge.dispatch_count(), 2);
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_command_yields_identical_pattern() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::with_input(b"44");

    bridge.poll_once(&mut channel, &mut lamps, &mut sink);
    let first = lamps.current();
    bridge.poll_once(&mut channel, &mut lamps, &mut sink);

    assert_eq!(first, pat(true, false, false));
    assert_eq!(lamps.current(), first, "no hidden state transition");
    assert_eq!(channel.tx, b"44");
}

// ── Mixed traffic ─────────────────────────────────────────────

#[test]
fn ignored_bytes_interleave_without_disturbing_state() {
    let (mut bridge, mut lamps, mut sink) = make_bridge();
    let mut channel = MockChannel::with_input(b"2\nx5");

    for _ in 0..4 {
        bridge.poll_once(&mut channel, &mut lamps, &mut sink);
    }

    assert_eq!(channel.tx, b"25");
    assert_eq!(lamps.current(), pat(true, false, true));
    assert_eq!(channel.service_calls, 4);
    assert_eq!(bridge.poll_count(), 4);
    assert_eq!(bridge.dispatch_count(), 2);
}
