//! Command dispatch — the byte-to-lamp-pattern mapping.
//!
//! The host writes single ASCII characters to the virtual serial port;
//! each recognized character selects one of eight lamp patterns and is
//! acknowledged by echoing the pattern's canonical digit.  Unrecognized
//! bytes produce no side effect and no reply.

/// State of the three indicator lamp lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LampPattern {
    pub red: bool,
    pub amber: bool,
    pub green: bool,
}

impl LampPattern {
    /// All lamps off, the known startup state.
    pub const OFF: Self = Self::new(false, false, false);

    pub const fn new(red: bool, amber: bool, green: bool) -> Self {
        Self { red, amber, green }
    }
}

/// One rule of the command table: a set of input aliases, the lamp
/// pattern they select, and the acknowledgment byte echoed to the host.
pub struct CommandRule {
    pub inputs: &'static [u8],
    pub pattern: LampPattern,
    pub reply: u8,
}

/// The fixed command table.
///
/// Each rule's first input is the canonical digit, which doubles as the
/// reply byte; the remaining inputs are mnemonic aliases (green, orange,
/// red/stop, all).  Exact byte match only: the listed letters are the
/// only aliases, nothing else is case-folded.
pub const COMMAND_TABLE: &[CommandRule] = &[
    CommandRule { inputs: b"0", pattern: LampPattern::new(false, false, false), reply: b'0' },
    CommandRule { inputs: b"1gG", pattern: LampPattern::new(false, false, true), reply: b'1' },
    CommandRule { inputs: b"2oO", pattern: LampPattern::new(false, true, false), reply: b'2' },
    CommandRule { inputs: b"3", pattern: LampPattern::new(false, true, true), reply: b'3' },
    CommandRule { inputs: b"4rRsS", pattern: LampPattern::new(true, false, false), reply: b'4' },
    CommandRule { inputs: b"5", pattern: LampPattern::new(true, false, true), reply: b'5' },
    CommandRule { inputs: b"6", pattern: LampPattern::new(true, true, false), reply: b'6' },
    CommandRule { inputs: b"7aA", pattern: LampPattern::new(true, true, true), reply: b'7' },
];

/// Result of dispatching one recognized command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub pattern: LampPattern,
    pub reply: u8,
}

/// Map one input byte to its lamp pattern and reply.
///
/// Stateless, and total only over recognized inputs: unrecognized bytes
/// return `None` and the caller changes nothing.
pub fn dispatch(byte: u8) -> Option<DispatchOutcome> {
    COMMAND_TABLE
        .iter()
        .find(|rule| rule.inputs.contains(&byte))
        .map(|rule| DispatchOutcome {
            pattern: rule.pattern,
            reply: rule.reply,
        })
}
