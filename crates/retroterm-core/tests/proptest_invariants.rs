//! Property-based invariant tests.
//!
//! These verify structural invariants that must hold for **any** input:
//!
//! 1. The pipeline never panics on arbitrary byte streams.
//! 2. The cursor stays within grid bounds throughout.
//! 3. Identical streams produce identical state.
//! 4. Chunk boundaries never change the result.
//! 5. A string terminator always brings the parser back to ground.

use proptest::prelude::*;
use retroterm_core::{ParserState, Terminal};

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic_and_cursor_stays_bounded(
        bytes in proptest::collection::vec(any::<u8>(), 0..2048),
        rows in 1u16..=60,
        cols in 1u16..=120,
        chunk in 1usize..64,
    ) {
        let mut term = Terminal::new(rows, cols);
        for piece in bytes.chunks(chunk) {
            term.process(piece);
            prop_assert!(term.screen().cursor_row() < term.screen().rows());
            prop_assert!(term.screen().cursor_col() < term.screen().cols());
        }
    }

    #[test]
    fn identical_streams_produce_identical_state(
        bytes in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let mut a = Terminal::new(24, 80);
        let mut b = Terminal::new(24, 80);
        a.process(&bytes);
        b.process(&bytes);
        prop_assert_eq!(a.screen().grid(), b.screen().grid());
        prop_assert_eq!(a.screen().cursor_row(), b.screen().cursor_row());
        prop_assert_eq!(a.screen().cursor_col(), b.screen().cursor_col());
    }

    #[test]
    fn chunk_boundaries_never_change_the_result(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        chunk in 1usize..16,
    ) {
        let mut whole = Terminal::new(12, 40);
        whole.process(&bytes);

        let mut split = Terminal::new(12, 40);
        for piece in bytes.chunks(chunk) {
            split.process(piece);
        }

        prop_assert_eq!(whole.screen().grid(), split.screen().grid());
        prop_assert_eq!(whole.screen().cursor_row(), split.screen().cursor_row());
        prop_assert_eq!(whole.screen().cursor_col(), split.screen().cursor_col());
    }

    #[test]
    fn string_terminator_recovers_ground_from_any_state(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut term = Terminal::new(24, 80);
        term.process(&bytes);
        term.process(b"\x1b\\");
        prop_assert_eq!(term.parser().state(), ParserState::Ground);
        // And the engine keeps working: printables still print.
        term.process(b"Z");
        prop_assert_eq!(term.parser().state(), ParserState::Ground);
    }

    #[test]
    fn resize_storm_keeps_cursor_bounded(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        sizes in proptest::collection::vec((1u16..=50, 1u16..=100), 1..8),
    ) {
        let mut term = Terminal::new(24, 80);
        for (rows, cols) in sizes {
            term.process(&bytes);
            term.resize(rows, cols);
            prop_assert!(term.screen().cursor_row() < term.screen().rows());
            prop_assert!(term.screen().cursor_col() < term.screen().cols());
        }
    }
}
