use serde::{Deserialize, Serialize};

/// Cursor or highlighted range within the document, as byte offsets.
///
/// `start == end` is a bare caret. Offsets arrive from the host and may be
/// stale or out of range; splice operations clamp them before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether this is a bare caret rather than a range.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Byte length of the selected range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Clamp both offsets into `text`, snapping each to a `char` boundary
    /// and restoring `start <= end`. Out-of-range input is a host bug to
    /// absorb silently, not an error to surface.
    pub fn clamp_to(&self, text: &str) -> Selection {
        let a = snap_to_char_boundary(text, self.start);
        let b = snap_to_char_boundary(text, self.end);
        Selection {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// Largest char boundary at or below `offset`.
fn snap_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut at = offset.min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn caret_is_a_collapsed_range() {
        let sel = Selection::caret(4);
        assert!(sel.is_caret());
        assert_eq!(sel.len(), 0);
        assert_eq!(sel, Selection::new(4, 4));
    }

    #[test]
    fn len_spans_the_range() {
        assert_eq!(Selection::new(2, 7).len(), 5);
        assert!(!Selection::new(2, 7).is_caret());
    }

    // ============ Clamping ============

    #[rstest]
    #[case(Selection::new(0, 5), Selection::new(0, 5))] // in range, untouched
    #[case(Selection::new(3, 100), Selection::new(3, 11))] // end past the text
    #[case(Selection::new(50, 90), Selection::new(11, 11))] // fully past the text
    #[case(Selection::new(7, 2), Selection::new(2, 7))] // reversed offsets
    fn clamps_into_hello_world(#[case] input: Selection, #[case] expected: Selection) {
        assert_eq!(input.clamp_to("hello world"), expected);
    }

    #[test]
    fn snaps_offsets_inside_a_char_to_its_start() {
        // "é" occupies bytes 1..3; offset 2 is mid-char.
        let text = "héllo";
        assert_eq!(Selection::new(2, 2).clamp_to(text), Selection::caret(1));
        assert_eq!(Selection::new(2, 4).clamp_to(text), Selection::new(1, 4));
    }

    #[test]
    fn clamps_everything_to_zero_on_empty_text() {
        assert_eq!(Selection::new(3, 9).clamp_to(""), Selection::caret(0));
    }
}
