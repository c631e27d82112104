//! The screen: grid + cursor + attribute, charset, and mode state.
//!
//! `Screen` is the production implementation of [`TerminalActions`]. All
//! operations are total: out-of-range inputs are clamped or dropped, and
//! the cursor is back inside `[0, rows) x [0, cols)` before any of them
//! returns.

use tracing::trace;

use crate::actions::TerminalActions;
use crate::cell::{Cell, Color, SgrAttrs, SgrFlags};
use crate::charset::{Charset, CharsetState};
use crate::cursor::{Cursor, SavedCursor};
use crate::grid::Grid;
use crate::modes::DecModes;

const DEFAULT_TAB_WIDTH: u16 = 8;

/// Primary-screen state parked while the alternate screen is active.
#[derive(Debug, Clone)]
struct SavedScreen {
    grid: Grid,
    cursor: SavedCursor,
}

/// In-memory terminal screen.
#[derive(Debug, Clone)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    current_attrs: SgrAttrs,
    default_attrs: SgrAttrs,
    charsets: CharsetState,
    modes: DecModes,
    saved_primary: Option<SavedScreen>,
    tab_width: u16,
    bell_count: u64,
}

impl Screen {
    /// Create a blank screen. Dimensions are clamped to at least 1.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self::with_tab_width(rows, cols, DEFAULT_TAB_WIDTH)
    }

    /// Create a blank screen with a specific tab width (clamped to >= 1).
    pub fn with_tab_width(rows: u16, cols: u16, tab_width: u16) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            cursor: Cursor::default(),
            current_attrs: SgrAttrs::default(),
            default_attrs: SgrAttrs::default(),
            charsets: CharsetState::default(),
            modes: DecModes::default(),
            saved_primary: None,
            tab_width: tab_width.max(1),
            bell_count: 0,
        }
    }

    // ── Read surface ────────────────────────────────────────────────

    /// Number of rows.
    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    /// The cell at `(row, col)`; a default blank cell when out of bounds.
    pub fn cell(&self, row: u16, col: u16) -> Cell {
        self.grid.cell(row, col).copied().unwrap_or_default()
    }

    /// Read-only view of the whole cell matrix.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cursor row, always in `[0, rows)`.
    pub fn cursor_row(&self) -> u16 {
        self.cursor.row
    }

    /// Cursor column, always in `[0, cols)`.
    pub fn cursor_col(&self) -> u16 {
        self.cursor.col
    }

    /// The SGR state that will be stamped onto the next written cell.
    pub fn current_attrs(&self) -> SgrAttrs {
        self.current_attrs
    }

    /// Current DEC private mode flags.
    pub fn modes(&self) -> DecModes {
        self.modes
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.modes.cursor_visible
    }

    pub fn is_application_cursor_keys_mode(&self) -> bool {
        self.modes.application_cursor_keys
    }

    pub fn is_application_keypad_mode(&self) -> bool {
        self.modes.application_keypad
    }

    pub fn is_alternate_screen_active(&self) -> bool {
        self.modes.alternate_screen
    }

    /// Number of BEL characters seen since creation or the last reset.
    pub fn bell_count(&self) -> u64 {
        self.bell_count
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Resize the screen, preserving the overlapping top-left region and
    /// re-clamping the cursor. The parked primary screen (if the alternate
    /// screen is active) is brought to size when restored.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.grid.resize(rows, cols);
        self.cursor.clamp(self.grid.rows(), self.grid.cols());
        self.cursor.pending_wrap = false;
    }

    /// Restore the power-on state, keeping the current dimensions.
    pub fn reset(&mut self) {
        self.grid.erase_all(SgrAttrs::default());
        self.cursor.home();
        self.current_attrs = SgrAttrs::default();
        self.default_attrs = SgrAttrs::default();
        self.charsets = CharsetState::default();
        self.modes = DecModes::default();
        self.saved_primary = None;
        self.bell_count = 0;
    }

    /// Scroll the screen up by `count` lines, blanking the bottom.
    ///
    /// Scrolling by at least the full height clears the screen and returns
    /// the cursor to the origin.
    pub fn scroll_up(&mut self, count: u16) {
        if count == 0 {
            return;
        }
        if count >= self.grid.rows() {
            self.grid.erase_all(self.default_attrs);
            self.cursor.home();
        } else {
            self.grid.scroll_up(count, self.default_attrs);
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn enter_alternate_screen(&mut self) {
        if self.saved_primary.is_some() {
            return;
        }
        self.saved_primary = Some(SavedScreen {
            grid: self.grid.clone(),
            cursor: SavedCursor {
                cursor: self.cursor,
                attrs: self.current_attrs,
            },
        });
        self.grid.erase_all(self.default_attrs);
        self.cursor.home();
        self.modes.alternate_screen = true;
    }

    fn leave_alternate_screen(&mut self) {
        let Some(saved) = self.saved_primary.take() else {
            return;
        };
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let mut grid = saved.grid;
        // The terminal may have been resized while the alternate screen
        // was active; bring the restored grid to the current size.
        grid.resize(rows, cols);
        self.grid = grid;
        self.cursor = saved.cursor.cursor;
        self.current_attrs = saved.cursor.attrs;
        self.cursor.clamp(rows, cols);
        self.cursor.pending_wrap = false;
        self.modes.alternate_screen = false;
    }

    /// Apply one `38;...` / `48;...` extended-color introducer starting at
    /// `params[i]`. Returns how many parameters beyond `params[i]` were
    /// consumed.
    fn apply_extended_color(&mut self, params: &[i32], i: usize, foreground: bool) -> usize {
        match params.get(i + 1).copied() {
            Some(5) => {
                if let Some(&index) = params.get(i + 2) {
                    if (0..16).contains(&index) {
                        let color = Color::Indexed(index as u8);
                        if foreground {
                            self.current_attrs.fg = color;
                        } else {
                            self.current_attrs.bg = color;
                        }
                    } else {
                        // The cell color model stops at the 16-color
                        // palette; higher indices are consumed and dropped.
                        trace!(index, "dropping 256-color palette index");
                    }
                }
                2
            }
            Some(2) => {
                // Direct RGB: structurally consumed, nowhere to store it.
                trace!("dropping direct-RGB color");
                4
            }
            _ => 0,
        }
    }

    fn clamp_count(count: i32) -> u16 {
        count.clamp(0, i32::from(u16::MAX)) as u16
    }
}

impl TerminalActions for Screen {
    fn print_char(&mut self, ch: char) {
        if self.cursor.pending_wrap {
            self.cursor.pending_wrap = false;
            if self.modes.autowrap {
                self.carriage_return();
                self.line_feed();
            }
            // With auto-wrap off the pending write lands on the last
            // column again.
        }
        let mapped = self.charsets.map(ch);
        let attrs = self.current_attrs;
        let (row, col) = (self.cursor.row, self.cursor.col);
        if let Some(cell) = self.grid.cell_mut(row, col) {
            cell.set(mapped, attrs);
        }
        if self.cursor.col + 1 >= self.grid.cols() {
            // Deferred wrap: the line is full but the cursor stays put
            // until the next character arrives.
            self.cursor.pending_wrap = true;
        } else {
            self.cursor.col += 1;
        }
    }

    fn execute_control_function(&mut self, control: char) {
        match control {
            // SO: invoke G1 into GL.
            '\x0e' => self.charsets.invoke_gl(1),
            // SI: invoke G0 into GL.
            '\x0f' => self.charsets.invoke_gl(0),
            _ => {
                trace!(control = control as u32, "ignoring control function");
            }
        }
    }

    fn line_feed(&mut self) {
        // Newline-mode line feed: the cursor returns to column 0 as well as
        // moving down a row.
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
        let rows = self.grid.rows();
        if self.cursor.row + 1 >= rows {
            self.scroll_up(1);
            self.cursor.row = rows - 1;
        } else {
            self.cursor.row += 1;
        }
    }

    fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
    }

    fn backspace(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
        self.cursor.pending_wrap = false;
    }

    fn horizontal_tab(&mut self) {
        let next = (u32::from(self.cursor.col) / u32::from(self.tab_width) + 1)
            * u32::from(self.tab_width);
        let last = u32::from(self.grid.cols()) - 1;
        self.cursor.col = next.min(last) as u16;
        self.cursor.pending_wrap = false;
    }

    fn bell(&mut self) {
        self.bell_count += 1;
    }

    fn cursor_up(&mut self, count: i32) {
        self.cursor.row = self.cursor.row.saturating_sub(Self::clamp_count(count));
        self.cursor.pending_wrap = false;
    }

    fn cursor_down(&mut self, count: i32) {
        let last = self.grid.rows() - 1;
        self.cursor.row = self.cursor.row.saturating_add(Self::clamp_count(count)).min(last);
        self.cursor.pending_wrap = false;
    }

    fn cursor_forward(&mut self, count: i32) {
        let last = self.grid.cols() - 1;
        self.cursor.col = self.cursor.col.saturating_add(Self::clamp_count(count)).min(last);
        self.cursor.pending_wrap = false;
    }

    fn cursor_back(&mut self, count: i32) {
        self.cursor.col = self.cursor.col.saturating_sub(Self::clamp_count(count));
        self.cursor.pending_wrap = false;
    }

    fn cursor_position(&mut self, row: i32, col: i32) {
        // 1-based coordinates; zero and negative both mean 1.
        self.cursor.row = Self::clamp_count(row.max(1) - 1).min(self.grid.rows() - 1);
        self.cursor.col = Self::clamp_count(col.max(1) - 1).min(self.grid.cols() - 1);
        self.cursor.pending_wrap = false;
    }

    fn reverse_index(&mut self) {
        self.cursor.pending_wrap = false;
        if self.cursor.row == 0 {
            self.grid.scroll_down(1, self.default_attrs);
        } else {
            self.cursor.row -= 1;
        }
    }

    fn erase_in_display(&mut self, mode: i32) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        match mode {
            0 => self.grid.erase_below(row, col, self.default_attrs),
            1 => self.grid.erase_above(row, col, self.default_attrs),
            // Mode 3 would also clear scrollback; there is none.
            2 | 3 => self.grid.erase_all(self.default_attrs),
            _ => trace!(mode, "ignoring unknown ED mode"),
        }
    }

    fn erase_in_line(&mut self, mode: i32) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        match mode {
            0 => self.grid.erase_line_right(row, col, self.default_attrs),
            1 => self.grid.erase_line_left(row, col, self.default_attrs),
            2 => self.grid.erase_line(row, self.default_attrs),
            _ => trace!(mode, "ignoring unknown EL mode"),
        }
    }

    fn set_graphics_rendition(&mut self, params: &[i32]) {
        let mut i = 0;
        while i < params.len() {
            match params[i] {
                // 0 replaces the whole accumulator, including anything set
                // earlier in this same sequence.
                0 => self.current_attrs = self.default_attrs,
                1 => self.current_attrs.flags.insert(SgrFlags::BOLD),
                2 => {
                    self.current_attrs.flags.insert(SgrFlags::DIM);
                    self.current_attrs.flags.remove(SgrFlags::BOLD);
                }
                3 => self.current_attrs.flags.insert(SgrFlags::ITALIC),
                4 | 21 => self.current_attrs.flags.insert(SgrFlags::UNDERLINE),
                7 => self.current_attrs.flags.insert(SgrFlags::INVERSE),
                8 => self.current_attrs.flags.insert(SgrFlags::CONCEALED),
                9 => self.current_attrs.flags.insert(SgrFlags::STRIKETHROUGH),
                22 => self
                    .current_attrs
                    .flags
                    .remove(SgrFlags::BOLD | SgrFlags::DIM),
                23 => self.current_attrs.flags.remove(SgrFlags::ITALIC),
                24 => self.current_attrs.flags.remove(SgrFlags::UNDERLINE),
                27 => self.current_attrs.flags.remove(SgrFlags::INVERSE),
                28 => self.current_attrs.flags.remove(SgrFlags::CONCEALED),
                29 => self.current_attrs.flags.remove(SgrFlags::STRIKETHROUGH),
                p @ 30..=37 => self.current_attrs.fg = Color::Indexed((p - 30) as u8),
                38 => i += self.apply_extended_color(params, i, true),
                39 => self.current_attrs.fg = Color::Foreground,
                p @ 40..=47 => self.current_attrs.bg = Color::Indexed((p - 40) as u8),
                48 => i += self.apply_extended_color(params, i, false),
                49 => self.current_attrs.bg = Color::Background,
                p @ 90..=97 => self.current_attrs.fg = Color::Indexed((p - 90 + 8) as u8),
                p @ 100..=107 => self.current_attrs.bg = Color::Indexed((p - 100 + 8) as u8),
                p => trace!(param = p, "ignoring unknown SGR parameter"),
            }
            i += 1;
        }
    }

    fn designate_charset(&mut self, slot: u8, tag: char) {
        match Charset::from_tag(tag) {
            Some(charset) => self.charsets.designate(slot, charset),
            None => trace!(slot, tag = %tag, "ignoring unknown charset tag"),
        }
    }

    fn invoke_charset(&mut self, slot: u8) {
        self.charsets.invoke_gl(slot);
    }

    fn set_dec_private_mode(&mut self, mode: i32, enabled: bool) {
        if mode == 1049 {
            if enabled {
                self.enter_alternate_screen();
            } else {
                self.leave_alternate_screen();
            }
            return;
        }
        if !self.modes.set(mode, enabled) {
            trace!(mode, enabled, "ignoring unhonored DEC private mode");
        }
    }
}
