//! ANSI/VT escape-sequence state machine.
//!
//! The parser consumes decoded characters one at a time and dispatches
//! completed sequences as calls through [`TerminalActions`]. It covers:
//!
//! - printable characters -> `print_char`
//! - C0 controls -> dedicated actions
//! - CSI sequences (cursor, erase, SGR, DEC private modes)
//! - simple ESC sequences (index, next line, reverse index)
//! - SCS charset designation (`ESC ( 0` and friends)
//! - OSC/DCS/SOS/PM/APC strings, consumed and discarded
//!
//! Malformed input aborts the in-progress sequence and returns to ground;
//! the parser never raises an error and never desynchronizes.

use tracing::trace;

use crate::actions::TerminalActions;

/// Maximum number of numeric parameters kept per sequence; extras are dropped.
const MAX_PARAMS: usize = 16;
/// Maximum number of intermediate characters kept per sequence.
const MAX_INTERMEDIATES: usize = 16;

/// Parser states.
///
/// `Ground` is both the initial state and the state returned to after every
/// completed or aborted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    /// Inside an OSC/SOS/PM/APC string; payload is discarded.
    OscString,
    /// ESC seen inside an OSC string, possibly starting the ST terminator.
    OscEscape,
    /// Inside a DCS string; payload is discarded.
    DcsEntry,
    /// ESC seen inside a DCS string, possibly starting the ST terminator.
    DcsEscape,
}

/// Escape-sequence parser.
///
/// Holds only transient per-sequence state (bounded parameter and
/// intermediate accumulators); the terminal it drives is passed to
/// [`Parser::process`] per call, so a test harness can substitute a
/// recorder for the real screen.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    state: ParserState,
    params: Vec<i32>,
    intermediates: String,
}

impl Parser {
    /// Create a parser in ground state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current parser state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Return to ground state and discard any transient sequence state.
    pub fn reset(&mut self) {
        self.state = ParserState::Ground;
        self.clear_sequence_state();
    }

    /// Process one decoded character, dispatching actions as sequences
    /// complete.
    pub fn process<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match self.state {
            ParserState::Ground => self.ground(ch, actions),
            ParserState::Escape => self.escape(ch, actions),
            ParserState::EscapeIntermediate => self.escape_intermediate(ch, actions),
            ParserState::CsiEntry => self.csi_entry(ch, actions),
            ParserState::CsiParam => self.csi_param(ch, actions),
            ParserState::CsiIntermediate => self.csi_intermediate(ch, actions),
            ParserState::OscString => self.osc_string(ch),
            ParserState::OscEscape => self.osc_escape(ch),
            ParserState::DcsEntry => self.dcs_entry(ch),
            ParserState::DcsEscape => self.dcs_escape(ch),
        }
    }

    /// Process every character of `text` in order.
    pub fn process_str<A: TerminalActions>(&mut self, text: &str, actions: &mut A) {
        for ch in text.chars() {
            self.process(ch, actions);
        }
    }

    fn clear_sequence_state(&mut self) {
        self.params.clear();
        self.intermediates.clear();
    }

    /// Sequence finished (dispatched or aborted): transient state is
    /// consumed and the machine is back in ground.
    fn return_to_ground(&mut self) {
        self.clear_sequence_state();
        self.state = ParserState::Ground;
    }

    // ── State handlers ──────────────────────────────────────────────

    fn ground<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '\x1b' => {
                self.clear_sequence_state();
                self.state = ParserState::Escape;
            }
            '\n' => actions.line_feed(),
            '\r' => actions.carriage_return(),
            '\x08' => actions.backspace(),
            '\t' => actions.horizontal_tab(),
            '\x07' => actions.bell(),
            '\u{20}'..='\u{7F}' => actions.print_char(ch),
            ch if (ch as u32) >= 0x80 => actions.print_char(ch),
            // Remaining C0 controls: 0x00-0x06, 0x0B-0x0C, 0x0E-0x1A, 0x1C-0x1F.
            other => actions.execute_control_function(other),
        }
    }

    fn escape<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '[' => self.state = ParserState::CsiEntry,
            'P' => self.state = ParserState::DcsEntry,
            ']' | 'X' | '^' | '_' => self.state = ParserState::OscString,
            // SCS and other intermediates: ( ) * + , - . /
            '\u{28}'..='\u{2F}' => {
                self.collect_intermediate(ch);
                self.state = ParserState::EscapeIntermediate;
            }
            '\u{40}'..='\u{5F}' => {
                self.dispatch_escape(ch, actions);
                self.return_to_ground();
            }
            _ => self.return_to_ground(),
        }
    }

    fn escape_intermediate<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '\u{20}'..='\u{7E}' => {
                self.dispatch_escape(ch, actions);
                self.return_to_ground();
            }
            _ => self.return_to_ground(),
        }
    }

    fn csi_entry<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '0'..='9' => {
                self.param_digit(ch);
                self.state = ParserState::CsiParam;
            }
            ';' => {
                self.param_separator();
                self.state = ParserState::CsiParam;
            }
            // Private parameter markers: < = > ?
            '<'..='?' => {
                self.collect_intermediate(ch);
                self.state = ParserState::CsiIntermediate;
            }
            '\u{20}'..='\u{2F}' => {
                self.collect_intermediate(ch);
                self.state = ParserState::CsiIntermediate;
            }
            '\u{40}'..='\u{7E}' => {
                self.dispatch_csi(ch, actions);
                self.return_to_ground();
            }
            _ => self.return_to_ground(),
        }
    }

    fn csi_param<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '0'..='9' => self.param_digit(ch),
            ';' => self.param_separator(),
            '\u{20}'..='\u{2F}' => {
                self.collect_intermediate(ch);
                self.state = ParserState::CsiIntermediate;
            }
            '\u{40}'..='\u{7E}' => {
                self.dispatch_csi(ch, actions);
                self.return_to_ground();
            }
            _ => self.return_to_ground(),
        }
    }

    fn csi_intermediate<A: TerminalActions>(&mut self, ch: char, actions: &mut A) {
        match ch {
            '\u{20}'..='\u{2F}' => self.collect_intermediate(ch),
            '\u{40}'..='\u{7E}' => {
                self.dispatch_csi(ch, actions);
                self.return_to_ground();
            }
            _ => self.return_to_ground(),
        }
    }

    fn osc_string(&mut self, ch: char) {
        match ch {
            '\x07' => self.state = ParserState::Ground,
            '\x1b' => self.state = ParserState::OscEscape,
            _ => {} // payload, discarded
        }
    }

    fn osc_escape(&mut self, ch: char) {
        if ch == '\\' {
            // ST terminator.
            self.state = ParserState::Ground;
        } else {
            // False alarm; still inside the string.
            self.state = ParserState::OscString;
        }
    }

    fn dcs_entry(&mut self, ch: char) {
        match ch {
            '\x07' => self.state = ParserState::Ground,
            '\x1b' => self.state = ParserState::DcsEscape,
            _ => {} // payload, discarded
        }
    }

    fn dcs_escape(&mut self, ch: char) {
        if ch == '\\' {
            self.state = ParserState::Ground;
        } else {
            self.state = ParserState::DcsEntry;
        }
    }

    // ── Parameter / intermediate accumulation ───────────────────────

    fn param_digit(&mut self, digit: char) {
        if self.params.is_empty() {
            self.params.push(0);
        }
        let value = digit.to_digit(10).map_or(0, |d| d as i64);
        if let Some(last) = self.params.last_mut() {
            let accumulated = i64::from(*last) * 10 + value;
            *last = accumulated.min(i64::from(i32::MAX)) as i32;
        }
    }

    fn param_separator(&mut self) {
        if self.params.len() < MAX_PARAMS {
            if self.params.is_empty() {
                self.params.push(0);
            }
            self.params.push(0);
        }
    }

    fn collect_intermediate(&mut self, ch: char) {
        if self.intermediates.len() < MAX_INTERMEDIATES {
            self.intermediates.push(ch);
        }
    }

    /// Parameter at `index`, substituting `default` when absent or zero.
    ///
    /// 0 and omitted are both "use the default", per VT convention.
    fn param(&self, index: usize, default: i32) -> i32 {
        match self.params.get(index) {
            Some(&value) if value == 0 && default != 0 => default,
            Some(&value) => value,
            None => default,
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────

    fn dispatch_csi<A: TerminalActions>(&self, final_ch: char, actions: &mut A) {
        // Only bare sequences plus the `?` and `!` private prefixes are
        // understood; anything else is consumed and ignored.
        if !self.intermediates.is_empty() && self.intermediates != "?" && self.intermediates != "!"
        {
            trace!(
                intermediates = %self.intermediates,
                final_ch = %final_ch,
                "ignoring CSI with unhandled intermediates"
            );
            return;
        }
        let private = self.intermediates == "?";

        match final_ch {
            'A' if self.intermediates.is_empty() => actions.cursor_up(self.param(0, 1)),
            'B' if self.intermediates.is_empty() => actions.cursor_down(self.param(0, 1)),
            'C' if self.intermediates.is_empty() => actions.cursor_forward(self.param(0, 1)),
            'D' if self.intermediates.is_empty() => actions.cursor_back(self.param(0, 1)),
            'H' | 'f' if self.intermediates.is_empty() => {
                actions.cursor_position(self.param(0, 1), self.param(1, 1));
            }
            // ED / DECSED: the selective variant erases the same cells here.
            'J' if self.intermediates.is_empty() || private => {
                actions.erase_in_display(self.param(0, 0));
            }
            // EL / DECSEL.
            'K' if self.intermediates.is_empty() || private => {
                actions.erase_in_line(self.param(0, 0));
            }
            'm' if self.intermediates.is_empty() => {
                if self.params.is_empty() {
                    actions.set_graphics_rendition(&[0]);
                } else {
                    actions.set_graphics_rendition(&self.params);
                }
            }
            'h' | 'l' if private => {
                let enabled = final_ch == 'h';
                for &mode in &self.params {
                    actions.set_dec_private_mode(mode, enabled);
                }
            }
            _ => {
                trace!(
                    final_ch = %final_ch,
                    params = ?self.params,
                    intermediates = %self.intermediates,
                    "ignoring unhandled CSI final"
                );
            }
        }
    }

    fn dispatch_escape<A: TerminalActions>(&self, final_ch: char, actions: &mut A) {
        if self.intermediates.len() == 1 {
            let slot = match self.intermediates.chars().next() {
                Some('(') => Some(0),
                Some(')') | Some('-') => Some(1),
                Some('*') | Some('.') => Some(2),
                Some('+') | Some('/') => Some(3),
                _ => None,
            };
            if let Some(slot) = slot {
                actions.designate_charset(slot, final_ch);
                return;
            }
        }

        if self.intermediates.is_empty() {
            match final_ch {
                // IND: index, move down one line.
                'D' => actions.line_feed(),
                // NEL: next line.
                'E' => {
                    actions.carriage_return();
                    actions.line_feed();
                }
                // RI: reverse index.
                'M' => actions.reverse_index(),
                _ => {
                    trace!(final_ch = %final_ch, "ignoring unhandled ESC final");
                }
            }
        }
    }
}
