use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How a find pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// The pattern is an exact substring (the default).
    #[default]
    Literal,
    /// The pattern is a regular expression. Explicit opt-in.
    Regex,
}

/// A find request: the pattern plus its matching options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
    /// Matching is case-insensitive unless set.
    pub case_sensitive: bool,
    pub mode: MatchMode,
}

impl SearchQuery {
    pub fn literal(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            case_sensitive,
            mode: MatchMode::Literal,
        }
    }

    pub fn regex(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            case_sensitive,
            mode: MatchMode::Regex,
        }
    }

    /// Compile to a [`Regex`], escaping the pattern first in literal mode.
    /// Empty and unparseable patterns compile to `None`, which callers treat
    /// as no-match / no-op.
    fn compile(&self) -> Option<Regex> {
        if self.pattern.is_empty() {
            return None;
        }
        let source = match self.mode {
            MatchMode::Literal => regex::escape(&self.pattern),
            MatchMode::Regex => self.pattern.clone(),
        };
        RegexBuilder::new(&source)
            .case_insensitive(!self.case_sensitive)
            .build()
            .ok()
    }
}

/// Byte span of one match within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// First match of `query` in `text`, searching from the start.
pub fn find(text: &str, query: &SearchQuery) -> Option<MatchSpan> {
    let re = query.compile()?;
    re.find(text).map(|m| MatchSpan {
        start: m.start(),
        end: m.end(),
    })
}

/// Replace every non-overlapping match of `query` with `replacement`.
///
/// The replacement goes in verbatim; `$` carries no group-expansion meaning.
pub fn replace_matches(text: &str, query: &SearchQuery, replacement: &str) -> String {
    match query.compile() {
        Some(re) => re.replace_all(text, NoExpand(replacement)).into_owned(),
        None => text.to_owned(),
    }
}

/// Transient find/replace panel state. Owned by the presentation layer;
/// never persisted and never part of the history log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FindReplaceState {
    pub find: String,
    pub replace: String,
    pub case_sensitive: bool,
    pub open: bool,
}

impl FindReplaceState {
    /// The literal query this panel state describes.
    pub fn query(&self) -> SearchQuery {
        SearchQuery::literal(self.find.clone(), self.case_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ============ find ============

    #[test]
    fn finds_the_first_match() {
        let query = SearchQuery::literal("world", false);
        assert_eq!(
            find("hello world, world", &query),
            Some(MatchSpan { start: 6, end: 11 })
        );
    }

    #[rstest]
    #[case("Hello World", "world", false, Some(6))]
    #[case("Hello World", "world", true, None)]
    #[case("Hello World", "World", true, Some(6))]
    fn case_flag_controls_matching(
        #[case] text: &str,
        #[case] pattern: &str,
        #[case] case_sensitive: bool,
        #[case] start: Option<usize>,
    ) {
        let query = SearchQuery::literal(pattern, case_sensitive);
        assert_eq!(find(text, &query).map(|m| m.start), start);
    }

    #[test]
    fn literal_mode_treats_metacharacters_as_text() {
        let query = SearchQuery::literal("2.5 * (x)", true);
        assert_eq!(
            find("value is 2.5 * (x) here", &query),
            Some(MatchSpan { start: 9, end: 18 })
        );
        // "." must not match an arbitrary character.
        assert_eq!(find("205", &SearchQuery::literal("2.5", true)), None);
    }

    #[test]
    fn regex_mode_matches_patterns() {
        let query = SearchQuery::regex(r"\d+", true);
        assert_eq!(
            find("order 42 shipped", &query),
            Some(MatchSpan { start: 6, end: 8 })
        );
    }

    #[test]
    fn empty_and_invalid_patterns_never_match() {
        assert_eq!(find("anything", &SearchQuery::literal("", false)), None);
        assert_eq!(find("anything", &SearchQuery::regex("(unclosed", false)), None);
    }

    #[test]
    fn match_spans_are_byte_offsets() {
        // "é" is two bytes, so "world" starts at byte 7.
        let query = SearchQuery::literal("world", false);
        assert_eq!(
            find("héllo world", &query),
            Some(MatchSpan { start: 7, end: 12 })
        );
    }

    // ============ replace_matches ============

    #[rstest]
    #[case("aaa", "a", "b", "bbb")]
    #[case("aaaa", "aa", "b", "bb")] // non-overlapping
    #[case("no hits here", "xyz", "b", "no hits here")]
    #[case("Cat cat CAT", "cat", "dog", "dog dog dog")]
    fn replaces_all_matches(
        #[case] text: &str,
        #[case] pattern: &str,
        #[case] replacement: &str,
        #[case] expected: &str,
    ) {
        let query = SearchQuery::literal(pattern, false);
        assert_eq!(replace_matches(text, &query, replacement), expected);
    }

    #[test]
    fn case_sensitive_replace_leaves_other_cases_alone() {
        let query = SearchQuery::literal("cat", true);
        assert_eq!(replace_matches("Cat cat CAT", &query, "dog"), "Cat dog CAT");
    }

    #[test]
    fn replacement_dollar_signs_stay_literal() {
        let query = SearchQuery::regex("(price)", false);
        assert_eq!(
            replace_matches("the price is right", &query, "$1 tag"),
            "the $1 tag is right"
        );
    }

    #[test]
    fn invalid_pattern_replace_is_a_noop() {
        let query = SearchQuery::regex("(unclosed", false);
        assert_eq!(replace_matches("text", &query, "x"), "text");
    }

    #[test]
    fn empty_pattern_replace_is_a_noop() {
        let query = SearchQuery::literal("", false);
        assert_eq!(replace_matches("text", &query, "x"), "text");
    }

    // ============ FindReplaceState ============

    #[test]
    fn panel_state_builds_a_literal_query() {
        let state = FindReplaceState {
            find: "a.b".to_string(),
            replace: "c".to_string(),
            case_sensitive: true,
            open: true,
        };
        let query = state.query();
        assert_eq!(query.mode, MatchMode::Literal);
        assert!(query.case_sensitive);
        // Metacharacters in the panel's find field stay literal.
        assert_eq!(find("xa.by", &query), Some(MatchSpan { start: 1, end: 4 }));
        assert_eq!(find("xaxby", &query), None);
    }

    #[test]
    fn default_panel_state_is_closed_and_insensitive() {
        let state = FindReplaceState::default();
        assert!(!state.open);
        assert!(!state.case_sensitive);
        assert_eq!(state.query().mode, MatchMode::Literal);
    }
}
