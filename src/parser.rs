//! Placeholder tokenization of resolved template text.
//!
//! This module splits fully include-resolved text into an ordered, alternating
//! sequence of [`Section`]s: literal spans and named placeholders. The
//! sequence always begins and ends with a [`Section::Raw`] (possibly empty),
//! with at most one placeholder between adjacent raw spans, so the raw count
//! is exactly one more than the placeholder count. Concatenating the raw
//! spans with each placeholder re-substituted as `${name}` reproduces the
//! input text.
//!
//! # Placeholder Syntax
//!
//! A placeholder is `${name}` where `name` is one or more word characters
//! (ASCII letters, digits, underscore). Whitespace inside the braces is
//! tolerated and stripped: `${ head }` yields the name `head`. Any `${` that
//! does not complete a well-formed placeholder is ordinary literal text.
//!
//! Names are taken verbatim - no case normalization and no validation against
//! a known set. Whether a name is *valid* is decided at render time by
//! handler lookup, not here.
//!
//! This step is pure text processing with no I/O.

/// One span of a parsed template, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A literal text span, passed verbatim to the raw handler. May be empty.
    Raw(String),
    /// A named slot. Carries no content of its own, only the identifier used
    /// for handler lookup at render time.
    Placeholder(String),
}

/// Split resolved template text into its alternating section sequence.
///
/// # Examples
///
/// ```
/// use slotted::{Section, parse_sections};
///
/// let sections = parse_sections("A${x}B");
/// assert_eq!(
///     sections,
///     vec![
///         Section::Raw("A".into()),
///         Section::Placeholder("x".into()),
///         Section::Raw("B".into()),
///     ]
/// );
/// ```
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut raw_start = 0;
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find("${") {
        let start = cursor + found;
        match match_placeholder_at(text, start) {
            Some((end, name)) => {
                sections.push(Section::Raw(text[raw_start..start].to_string()));
                sections.push(Section::Placeholder(name.to_string()));
                raw_start = end;
                cursor = end;
            }
            // Not a well-formed placeholder; the `${` is literal text.
            // Resume just past the `$` so an overlapping later match like
            // the `${y}` in `${x ${y}` is still found.
            None => cursor = start + 1,
        }
    }

    sections.push(Section::Raw(text[raw_start..].to_string()));

    tracing::trace!(
        "parsed {} section(s) ({} placeholder(s))",
        sections.len(),
        sections.len() / 2
    );

    sections
}

/// Try to match a placeholder whose `${` begins at byte offset `start`.
///
/// Returns the byte offset just past the closing `}` and the trimmed name.
fn match_placeholder_at(text: &str, start: usize) -> Option<(usize, &str)> {
    let mut i = skip_whitespace(text, start + 2);

    let name_start = i;
    while let Some(c) = text[i..].chars().next() {
        if c.is_ascii_alphanumeric() || c == '_' {
            i += c.len_utf8();
        } else {
            break;
        }
    }
    if i == name_start {
        return None;
    }
    let name_end = i;

    i = skip_whitespace(text, i);
    if text.as_bytes().get(i) == Some(&b'}') {
        Some((i + 1, &text[name_start..name_end]))
    } else {
        None
    }
}

/// Advance `i` past any whitespace, returning the new offset.
pub(crate) fn skip_whitespace(text: &str, mut i: usize) -> usize {
    while let Some(c) = text[i..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        i += c.len_utf8();
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> Section {
        Section::Raw(s.to_string())
    }

    fn placeholder(s: &str) -> Section {
        Section::Placeholder(s.to_string())
    }

    /// Rebuild the source text from a section sequence.
    fn reassemble(sections: &[Section]) -> String {
        sections
            .iter()
            .map(|s| match s {
                Section::Raw(content) => content.clone(),
                Section::Placeholder(name) => format!("${{{name}}}"),
            })
            .collect()
    }

    #[test]
    fn plain_text_is_a_single_raw_section() {
        assert_eq!(parse_sections("hello world"), vec![raw("hello world")]);
    }

    #[test]
    fn empty_input_yields_one_empty_raw_section() {
        assert_eq!(parse_sections(""), vec![raw("")]);
    }

    #[test]
    fn placeholders_alternate_with_raw_spans() {
        assert_eq!(
            parse_sections("A${x}B${y}C"),
            vec![
                raw("A"),
                placeholder("x"),
                raw("B"),
                placeholder("y"),
                raw("C"),
            ]
        );
    }

    #[test]
    fn adjacent_placeholders_get_an_empty_raw_between_them() {
        assert_eq!(
            parse_sections("${a}${b}"),
            vec![raw(""), placeholder("a"), raw(""), placeholder("b"), raw("")]
        );
    }

    #[test]
    fn whitespace_inside_braces_is_stripped() {
        assert_eq!(
            parse_sections("${ head }"),
            vec![raw(""), placeholder("head"), raw("")]
        );
    }

    #[test]
    fn names_are_taken_verbatim_without_case_normalization() {
        assert_eq!(
            parse_sections("${Head_2}"),
            vec![raw(""), placeholder("Head_2"), raw("")]
        );
    }

    #[test]
    fn non_word_content_in_braces_stays_literal() {
        assert_eq!(
            parse_sections("${not a name}"),
            vec![raw("${not a name}")]
        );
    }

    #[test]
    fn unterminated_brace_stays_literal() {
        assert_eq!(parse_sections("tail${x"), vec![raw("tail${x")]);
    }

    #[test]
    fn malformed_open_does_not_hide_a_later_placeholder() {
        assert_eq!(
            parse_sections("${x ${y}"),
            vec![raw("${x "), placeholder("y"), raw("")]
        );
    }

    #[test]
    fn raw_count_is_always_placeholder_count_plus_one() {
        for text in ["", "plain", "${a}", "A${a}B${b}", "${a}${b}${c}"] {
            let sections = parse_sections(text);
            let raws = sections
                .iter()
                .filter(|s| matches!(s, Section::Raw(_)))
                .count();
            let placeholders = sections.len() - raws;
            assert_eq!(raws, placeholders + 1, "for input {text:?}");
            assert!(matches!(sections.first(), Some(Section::Raw(_))));
            assert!(matches!(sections.last(), Some(Section::Raw(_))));
        }
    }

    #[test]
    fn canonical_placeholders_round_trip() {
        let text = "<html>${head}<body>${html}</body></html>";
        assert_eq!(reassemble(&parse_sections(text)), text);
    }
}
