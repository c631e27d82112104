//! DEC private mode bookkeeping.
//!
//! Only a small set of modes changes engine behavior (auto-wrap, cursor
//! visibility, the alternate screen). The rest of the honored set is
//! tracked so the embedder can query it; everything else is accepted and
//! dropped by the screen.

/// Tracked DEC private modes and their current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecModes {
    /// Mode 1, DECCKM: cursor keys send application sequences.
    pub application_cursor_keys: bool,
    /// Mode 6, DECOM: cursor addressing relative to a margin region.
    pub origin_mode: bool,
    /// Mode 7, DECAWM: wrap to the next line when a row fills.
    pub autowrap: bool,
    /// Mode 25, DECTCEM: cursor is visible.
    pub cursor_visible: bool,
    /// Mode 66, DECNKM: keypad sends application sequences.
    pub application_keypad: bool,
    /// Mode 1049: alternate screen buffer is active.
    pub alternate_screen: bool,
}

impl Default for DecModes {
    fn default() -> Self {
        Self {
            application_cursor_keys: false,
            origin_mode: false,
            autowrap: true,
            cursor_visible: true,
            application_keypad: false,
            alternate_screen: false,
        }
    }
}

impl DecModes {
    /// Record a mode change. Returns `false` for modes this engine does not
    /// track (the caller decides whether to log the drop).
    ///
    /// Mode 1049 is tracked here but its screen-switching side effects are
    /// the screen's job.
    pub fn set(&mut self, mode: i32, enabled: bool) -> bool {
        match mode {
            1 => self.application_cursor_keys = enabled,
            6 => self.origin_mode = enabled,
            7 => self.autowrap = enabled,
            25 => self.cursor_visible = enabled,
            66 => self.application_keypad = enabled,
            1049 => self.alternate_screen = enabled,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_power_on_state() {
        let modes = DecModes::default();
        assert!(modes.autowrap);
        assert!(modes.cursor_visible);
        assert!(!modes.application_cursor_keys);
        assert!(!modes.application_keypad);
        assert!(!modes.origin_mode);
        assert!(!modes.alternate_screen);
    }

    #[test]
    fn tracked_modes_toggle() {
        let mut modes = DecModes::default();
        assert!(modes.set(25, false));
        assert!(!modes.cursor_visible);
        assert!(modes.set(25, true));
        assert!(modes.cursor_visible);
        assert!(modes.set(1, true));
        assert!(modes.application_cursor_keys);
        assert!(modes.set(66, true));
        assert!(modes.application_keypad);
    }

    #[test]
    fn unknown_modes_are_reported() {
        let mut modes = DecModes::default();
        assert!(!modes.set(2004, true));
        assert!(!modes.set(1006, false));
        assert_eq!(modes, DecModes::default());
    }
}
