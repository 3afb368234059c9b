#![forbid(unsafe_code)]

//! Display-width aware truncation for one-line previews.
//!
//! Widths are terminal cells, not bytes or chars: a CJK character counts two.
//! Cuts never split a grapheme cluster.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width used by list previews when none is given.
pub const DEFAULT_PREVIEW_WIDTH: usize = 100;

/// Ellipsis appended to truncated previews.
pub const ELLIPSIS: &str = "...";

/// Display width of `text` in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest grapheme-aligned prefix of `text` at most `max_width` cells wide.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = grapheme.width();
        if width + w > max_width {
            break;
        }
        width += w;
        end = offset + grapheme.len();
    }
    &text[..end]
}

/// Fit `text` into `max_width` cells, ending in [`ELLIPSIS`] when cut.
///
/// If the ellipsis alone does not fit, the text is cut without it.
#[must_use]
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis_width = display_width(ELLIPSIS);
    if ellipsis_width >= max_width {
        return truncate_to_width(text, max_width).to_string();
    }
    let mut out = truncate_to_width(text, max_width - ellipsis_width).to_string();
    out.push_str(ELLIPSIS);
    out
}
