//! Terminal cell: the fundamental unit of the screen grid.
//!
//! Each cell stores one Unicode scalar and its SGR attributes. Cells are
//! plain `Copy` values with no identity beyond their grid position.

use bitflags::bitflags;

bitflags! {
    /// SGR text attribute flags.
    ///
    /// Maps directly to the ECMA-48 / VT100 SGR parameter values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SgrFlags: u8 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const INVERSE       = 1 << 4;
        const CONCEALED     = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

/// Color of a cell's foreground or background.
///
/// The model is deliberately small: the 16-entry palette plus the two
/// "use the terminal default" sentinels. Direct RGB and 256-color indices
/// beyond 15 have no slot here; the SGR handler consumes those parameters
/// without storing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Palette index 0-15: standard 8 + bright 8.
    Indexed(u8),
    /// The terminal's configured default foreground (SGR 39).
    Foreground,
    /// The terminal's configured default background (SGR 49).
    Background,
}

/// SGR attributes stamped onto newly written cells: flags + colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SgrAttrs {
    pub flags: SgrFlags,
    pub fg: Color,
    pub bg: Color,
}

impl Default for SgrAttrs {
    fn default() -> Self {
        Self {
            flags: SgrFlags::empty(),
            fg: Color::Foreground,
            bg: Color::Background,
        }
    }
}

impl SgrAttrs {
    /// Reset all attributes to default (SGR 0).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A single cell in the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character content. A space for empty/erased cells.
    content: char,
    /// SGR text attributes, stored exactly as they were at write time.
    pub attrs: SgrAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            content: ' ',
            attrs: SgrAttrs::default(),
        }
    }
}

impl Cell {
    /// Create a new cell with the given character and default attributes.
    pub fn new(ch: char) -> Self {
        Self {
            content: ch,
            attrs: SgrAttrs::default(),
        }
    }

    /// Create a new cell with the given character and attributes.
    pub fn with_attrs(ch: char, attrs: SgrAttrs) -> Self {
        Self { content: ch, attrs }
    }

    /// The character content of this cell.
    pub fn content(&self) -> char {
        self.content
    }

    /// Set the character content and attribute snapshot.
    pub fn set(&mut self, ch: char, attrs: SgrAttrs) {
        self.content = ch;
        self.attrs = attrs;
    }

    /// Reset this cell to a blank space carrying the given attributes.
    ///
    /// Used by erase operations, which fill with the terminal's default
    /// attributes rather than the current SGR state.
    pub fn erase(&mut self, attrs: SgrAttrs) {
        self.content = ' ';
        self.attrs = attrs;
    }

    /// The `(fg, bg)` pair a renderer should present.
    ///
    /// Cells store the Inverse flag raw; the fg/bg swap happens here, at
    /// read time, and nowhere else.
    pub fn resolved_colors(&self) -> (Color, Color) {
        if self.attrs.flags.contains(SgrFlags::INVERSE) {
            (self.attrs.bg, self.attrs.fg)
        } else {
            (self.attrs.fg, self.attrs.bg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank_space() {
        let cell = Cell::default();
        assert_eq!(cell.content(), ' ');
        assert_eq!(cell.attrs, SgrAttrs::default());
    }

    #[test]
    fn default_attrs_use_sentinel_colors() {
        let attrs = SgrAttrs::default();
        assert_eq!(attrs.fg, Color::Foreground);
        assert_eq!(attrs.bg, Color::Background);
        assert!(attrs.flags.is_empty());
    }

    #[test]
    fn set_replaces_content_and_attrs() {
        let mut cell = Cell::default();
        let attrs = SgrAttrs {
            flags: SgrFlags::BOLD,
            fg: Color::Indexed(1),
            bg: Color::Background,
        };
        cell.set('X', attrs);
        assert_eq!(cell.content(), 'X');
        assert_eq!(cell.attrs, attrs);
    }

    #[test]
    fn erase_blanks_content_with_given_attrs() {
        let mut cell = Cell::with_attrs(
            'Q',
            SgrAttrs {
                flags: SgrFlags::BOLD | SgrFlags::ITALIC,
                fg: Color::Indexed(2),
                bg: Color::Indexed(4),
            },
        );
        cell.erase(SgrAttrs::default());
        assert_eq!(cell.content(), ' ');
        assert_eq!(cell.attrs, SgrAttrs::default());
    }

    #[test]
    fn sgr_attrs_reset() {
        let mut attrs = SgrAttrs {
            flags: SgrFlags::BOLD | SgrFlags::UNDERLINE,
            fg: Color::Indexed(9),
            bg: Color::Indexed(4),
        };
        attrs.reset();
        assert_eq!(attrs, SgrAttrs::default());
    }

    #[test]
    fn resolved_colors_swap_only_under_inverse() {
        let mut cell = Cell::with_attrs(
            'a',
            SgrAttrs {
                flags: SgrFlags::empty(),
                fg: Color::Indexed(1),
                bg: Color::Indexed(4),
            },
        );
        assert_eq!(
            cell.resolved_colors(),
            (Color::Indexed(1), Color::Indexed(4))
        );
        cell.attrs.flags.insert(SgrFlags::INVERSE);
        assert_eq!(
            cell.resolved_colors(),
            (Color::Indexed(4), Color::Indexed(1))
        );
    }

    #[test]
    fn resolved_colors_swap_sentinels() {
        let mut cell = Cell::default();
        cell.attrs.flags.insert(SgrFlags::INVERSE);
        assert_eq!(cell.resolved_colors(), (Color::Background, Color::Foreground));
    }
}
