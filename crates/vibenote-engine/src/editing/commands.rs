//! Edit commands and the pure splice functions they compile to.

use crate::editing::search::{self, SearchQuery};
use crate::editing::selection::Selection;

/// An edit to apply to the document.
///
/// A command carries everything its splice needs; compiling one reads no
/// state beyond the current text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Replace the whole document (free typing in the input pane).
    SetText { text: String },
    /// Splice text in at the caret, replacing any selected range.
    InsertAtCursor { selection: Selection, text: String },
    /// Wrap the selected range in a prefix/suffix pair.
    WrapSelection {
        selection: Selection,
        before: String,
        after: String,
    },
    /// Replace every non-overlapping match of a query.
    ReplaceMatches {
        query: SearchQuery,
        replacement: String,
    },
}

/// Compile `cmd` against the current text into the next text plus the
/// selection the host should adopt.
pub(crate) fn compile_command(text: &str, cmd: &Cmd) -> (String, Selection) {
    match cmd {
        Cmd::SetText { text: new_text } => {
            let caret = Selection::caret(new_text.len());
            (new_text.clone(), caret)
        }
        Cmd::InsertAtCursor {
            selection,
            text: insert,
        } => insert_at_cursor(text, *selection, insert),
        Cmd::WrapSelection {
            selection,
            before,
            after,
        } => wrap_selection(text, *selection, before, after),
        Cmd::ReplaceMatches { query, replacement } => {
            let new_text = search::replace_matches(text, query, replacement);
            let caret = Selection::caret(new_text.len());
            (new_text, caret)
        }
    }
}

/// Splice `insert` in at `selection.start`, dropping the selected range
/// (a delete-then-insert). The returned caret sits just past the inserted
/// text, at `start + insert.len()`.
pub fn insert_at_cursor(text: &str, selection: Selection, insert: &str) -> (String, Selection) {
    let sel = selection.clamp_to(text);
    let mut out = String::with_capacity(text.len() - sel.len() + insert.len());
    out.push_str(&text[..sel.start]);
    out.push_str(insert);
    out.push_str(&text[sel.end..]);
    (out, Selection::caret(sel.start + insert.len()))
}

/// Wrap the selected range with `before` and `after`, keeping the wrapped
/// text selected (shifted right by `before.len()`). An empty selection
/// degenerates to inserting `before + after` with the caret between them.
pub fn wrap_selection(
    text: &str,
    selection: Selection,
    before: &str,
    after: &str,
) -> (String, Selection) {
    let sel = selection.clamp_to(text);
    let mut out = String::with_capacity(text.len() + before.len() + after.len());
    out.push_str(&text[..sel.start]);
    out.push_str(before);
    out.push_str(&text[sel.start..sel.end]);
    out.push_str(after);
    out.push_str(&text[sel.end..]);
    let shifted = Selection::new(sel.start + before.len(), sel.end + before.len());
    (out, shifted)
}

/// The formatting toolbar's fixed wrap pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownStyle {
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    Link,
}

impl MarkdownStyle {
    /// Prefix/suffix pair this style wraps a selection with.
    pub fn affixes(&self) -> (&'static str, &'static str) {
        match self {
            MarkdownStyle::Bold => ("**", "**"),
            MarkdownStyle::Italic => ("*", "*"),
            MarkdownStyle::InlineCode => ("`", "`"),
            MarkdownStyle::CodeBlock => ("```\n", "\n```"),
            MarkdownStyle::Link => ("[", "](url)"),
        }
    }

    /// The wrap command applying this style to `selection`.
    pub fn to_cmd(&self, selection: Selection) -> Cmd {
        let (before, after) = self.affixes();
        Cmd::WrapSelection {
            selection,
            before: before.to_string(),
            after: after.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ============ insert_at_cursor ============

    #[test]
    fn inserts_at_a_caret() {
        let (text, sel) = insert_at_cursor("hello world", Selection::caret(5), "X");
        assert_eq!(text, "helloX world");
        assert_eq!(sel, Selection::caret(6));
    }

    #[test]
    fn replaces_the_selected_range() {
        let (text, sel) = insert_at_cursor("hello world", Selection::new(0, 5), "goodbye");
        assert_eq!(text, "goodbye world");
        assert_eq!(sel, Selection::caret(7));
    }

    #[rstest]
    #[case(Selection::new(100, 200), "abcdefg!", 8)] // both offsets past the end
    #[case(Selection::new(7, 2), "ab!", 3)] // reversed range replaces [2,7]
    fn clamps_hostile_selections(
        #[case] selection: Selection,
        #[case] expected: &str,
        #[case] caret: usize,
    ) {
        let (text, sel) = insert_at_cursor("abcdefg", selection, "!");
        assert_eq!(text, expected);
        assert_eq!(sel, Selection::caret(caret));
    }

    #[test]
    fn snaps_mid_char_offsets_before_splicing() {
        // Offset 2 falls inside "é" (bytes 1..3) and snaps back to 1.
        let (text, sel) = insert_at_cursor("héllo", Selection::caret(2), "X");
        assert_eq!(text, "hXéllo");
        assert_eq!(sel, Selection::caret(2));
    }

    #[test]
    fn inserts_into_an_empty_document() {
        let (text, sel) = insert_at_cursor("", Selection::caret(0), "fresh");
        assert_eq!(text, "fresh");
        assert_eq!(sel, Selection::caret(5));
    }

    #[test]
    fn inserting_nothing_still_collapses_the_selection() {
        let (text, sel) = insert_at_cursor("hello world", Selection::new(5, 11), "");
        assert_eq!(text, "hello");
        assert_eq!(sel, Selection::caret(5));
    }

    // ============ wrap_selection ============

    #[test]
    fn wraps_and_keeps_the_text_selected() {
        let (text, sel) = wrap_selection("hello world", Selection::new(0, 5), "**", "**");
        assert_eq!(text, "**hello** world");
        assert_eq!(sel, Selection::new(2, 7));
        assert_eq!(&text[sel.start..sel.end], "hello");
    }

    #[test]
    fn empty_selection_places_the_caret_between_affixes() {
        let (text, sel) = wrap_selection("hello", Selection::caret(5), "**", "**");
        assert_eq!(text, "hello****");
        assert_eq!(sel, Selection::caret(7));
    }

    #[test]
    fn asymmetric_affixes_shift_by_the_prefix_only() {
        let (text, sel) = wrap_selection("see docs", Selection::new(4, 8), "[", "](url)");
        assert_eq!(text, "see [docs](url)");
        assert_eq!(sel, Selection::new(5, 9));
        assert_eq!(&text[sel.start..sel.end], "docs");
    }

    #[test]
    fn wraps_a_whole_line_as_a_code_block() {
        let (before, after) = MarkdownStyle::CodeBlock.affixes();
        let (text, sel) = wrap_selection("let x = 1;", Selection::new(0, 10), before, after);
        assert_eq!(text, "```\nlet x = 1;\n```");
        assert_eq!(&text[sel.start..sel.end], "let x = 1;");
    }

    #[test]
    fn clamps_wrap_offsets_past_the_end() {
        let (text, sel) = wrap_selection("hi", Selection::new(0, 99), "*", "*");
        assert_eq!(text, "*hi*");
        assert_eq!(sel, Selection::new(1, 3));
    }

    // ============ Styles ============

    #[rstest]
    #[case(MarkdownStyle::Bold, "**hello** world")]
    #[case(MarkdownStyle::Italic, "*hello* world")]
    #[case(MarkdownStyle::InlineCode, "`hello` world")]
    #[case(MarkdownStyle::Link, "[hello](url) world")]
    fn styles_wrap_with_their_affixes(#[case] style: MarkdownStyle, #[case] expected: &str) {
        let (text, _) = compile_command("hello world", &style.to_cmd(Selection::new(0, 5)));
        assert_eq!(text, expected);
    }

    // ============ Command compilation ============

    #[test]
    fn set_text_replaces_everything() {
        let cmd = Cmd::SetText {
            text: "fresh".to_string(),
        };
        let (text, sel) = compile_command("old content", &cmd);
        assert_eq!(text, "fresh");
        assert_eq!(sel, Selection::caret(5));
    }

    #[test]
    fn replace_matches_rewrites_the_document() {
        let cmd = Cmd::ReplaceMatches {
            query: SearchQuery::literal("a", false),
            replacement: "b".to_string(),
        };
        let (text, sel) = compile_command("aaa", &cmd);
        assert_eq!(text, "bbb");
        assert_eq!(sel, Selection::caret(3));
    }

    #[test]
    fn replace_with_no_matches_keeps_the_text() {
        let cmd = Cmd::ReplaceMatches {
            query: SearchQuery::literal("zzz", false),
            replacement: "b".to_string(),
        };
        let (text, _) = compile_command("aaa", &cmd);
        assert_eq!(text, "aaa");
    }
}
