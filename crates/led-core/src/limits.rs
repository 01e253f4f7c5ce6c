//! Hard limits of the line buffer.
//!
//! These are the only knobs the core has. Storage limits ([`MAX_LINE`],
//! [`LINE_CAPACITY`]) bound what a [`Document`](crate::document::Document)
//! can hold. [`MAX_INSERTABLE_WIDTH`] is a display limit: the insert command
//! shows the line under a ruler, and the ruler only makes sense while the
//! line fits the 80-column screen next to its `NNNN ` number.

/// Number of line slots in a document.
pub const MAX_LINE: usize = 9999;

/// Bytes per line slot, counting the terminator the storage used to carry.
pub const MAX_CH_PER_LINE: usize = 256;

/// Bytes of content a single line can hold.
pub const LINE_CAPACITY: usize = MAX_CH_PER_LINE - 1;

/// Longest line the insert command accepts (display width, not storage).
pub const MAX_INSERTABLE_WIDTH: usize = 74;

/// Largest offset the insert command accepts.
pub const MAX_INSERT_OFFSET: usize = MAX_INSERTABLE_WIDTH - 1;

/// Lines shown above and below the cursor on the main screen.
pub const WINDOW_RADIUS: usize = 2;

/// Page size of the plain "view all" command.
pub const DEFAULT_VIEW_PAGE: i64 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertable_width_is_below_storage() {
        assert_eq!(LINE_CAPACITY, 255);
        assert!(MAX_INSERTABLE_WIDTH < LINE_CAPACITY);
        assert_eq!(MAX_INSERT_OFFSET, 73);
    }
}
