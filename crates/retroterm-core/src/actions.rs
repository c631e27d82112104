//! The parser/screen boundary.
//!
//! The state machine knows nothing about cell storage; it dispatches every
//! completed sequence as one call through this trait. The screen is the
//! production implementation; tests substitute a recorder.
//!
//! Every method must be total over its documented input range: out-of-range
//! values are clamped or ignored, never rejected. No method may panic.
//! All methods default to no-ops so an implementation only overrides what it
//! observes.

/// Operations a terminal screen performs in response to parsed input.
pub trait TerminalActions {
    /// Write one printable character at the cursor.
    fn print_char(&mut self, _ch: char) {}

    /// A C0 control code with no dedicated handler (NUL, SO, SI, ...).
    fn execute_control_function(&mut self, _control: char) {}

    /// LF: move the cursor down one row, scrolling at the bottom.
    fn line_feed(&mut self) {}

    /// CR: move the cursor to column 0.
    fn carriage_return(&mut self) {}

    /// BS: move the cursor left one column, stopping at column 0.
    fn backspace(&mut self) {}

    /// HT: advance the cursor to the next tab stop.
    fn horizontal_tab(&mut self) {}

    /// BEL.
    fn bell(&mut self) {}

    /// CUU: cursor up `count` rows, clamped at the top.
    fn cursor_up(&mut self, _count: i32) {}

    /// CUD: cursor down `count` rows, clamped at the bottom.
    fn cursor_down(&mut self, _count: i32) {}

    /// CUF: cursor right `count` columns, clamped at the last column.
    fn cursor_forward(&mut self, _count: i32) {}

    /// CUB: cursor left `count` columns, clamped at column 0.
    fn cursor_back(&mut self, _count: i32) {}

    /// CUP/HVP: move to 1-based `(row, col)`, clamped into bounds.
    fn cursor_position(&mut self, _row: i32, _col: i32) {}

    /// RI: cursor up one row, scrolling down when already at the top.
    fn reverse_index(&mut self) {}

    /// ED: 0 = cursor to end, 1 = start to cursor, 2/3 = whole screen.
    fn erase_in_display(&mut self, _mode: i32) {}

    /// EL: 0 = cursor to end, 1 = start to cursor, 2 = whole line.
    fn erase_in_line(&mut self, _mode: i32) {}

    /// SGR: apply graphic-rendition parameters left to right.
    fn set_graphics_rendition(&mut self, _params: &[i32]) {}

    /// SCS: store a charset into designation slot G0-G3.
    fn designate_charset(&mut self, _slot: u8, _tag: char) {}

    /// Invoke designation slot G0-G3 into GL.
    fn invoke_charset(&mut self, _slot: u8) {}

    /// DECSET/DECRST: toggle a DEC private mode.
    fn set_dec_private_mode(&mut self, _mode: i32, _enabled: bool) {}
}
