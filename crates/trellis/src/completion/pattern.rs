//! Compiles raw user text into an escaped SQL wildcard pattern.

use std::sync::OnceLock;

use regex::Regex;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Compiles raw user input into a `LIKE` pattern.
///
/// Literal `%` and `_` are escaped with a backslash (the matching
/// statements carry `ESCAPE '\'`), each run of whitespace collapses to a
/// single `%` wildcard, and the whole pattern is wrapped in `%...%` for
/// substring matching.
///
/// Multi-word input therefore matches rows containing the words in the
/// typed order, with anything in between: the words collapse into one
/// merged wildcard string, which is neither AND nor OR semantics across
/// words. Empty input compiles to `%%` and matches everything.
///
/// # Example
///
/// ```
/// use trellis::completion::compile;
///
/// assert_eq!(compile("foo bar"), "%foo%bar%");
/// assert_eq!(compile("50% off"), "%50\\%%off%");
/// assert_eq!(compile(""), "%%");
/// ```
pub fn compile(raw: &str) -> String {
    // Escape first so user wildcards match literally; the collapsed
    // whitespace is the only wildcard the input can introduce.
    let escaped = raw.replace('%', "\\%").replace('_', "\\_");
    let merged = whitespace().replace_all(&escaped, "%");
    format!("%{merged}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matches_everything() {
        assert_eq!(compile(""), "%%");
    }

    #[test]
    fn test_plain_word_is_wrapped() {
        assert_eq!(compile("foo"), "%foo%");
    }

    #[test]
    fn test_words_collapse_to_wildcards() {
        assert_eq!(compile("foo bar"), "%foo%bar%");
        assert_eq!(compile("a b c"), "%a%b%c%");
    }

    #[test]
    fn test_whitespace_runs_collapse_to_one_wildcard() {
        assert_eq!(compile("foo   bar"), "%foo%bar%");
        assert_eq!(compile("foo\t bar"), "%foo%bar%");
        assert_eq!(compile("foo\nbar"), "%foo%bar%");
    }

    #[test]
    fn test_literal_percent_is_escaped() {
        assert_eq!(compile("50% off"), "%50\\%%off%");
    }

    #[test]
    fn test_literal_underscore_is_escaped() {
        assert_eq!(compile("snake_case"), "%snake\\_case%");
    }

    #[test]
    fn test_no_unescaped_metacharacters_leak() {
        // Every % in the output is either a wrapper, a word separator, or
        // escaped; every _ is escaped.
        let compiled = compile("a_b 100% x");
        assert_eq!(compiled, "%a\\_b%100\\%%x%");

        let mut chars = compiled.chars().peekable();
        let mut bare_wildcards = 0;
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    // Consumes the escaped metacharacter.
                    assert!(matches!(chars.next(), Some('%') | Some('_')));
                }
                '%' => bare_wildcards += 1,
                '_' => panic!("unescaped underscore"),
                _ => {}
            }
        }
        // Two wrapping wildcards plus one per word separator.
        assert_eq!(bare_wildcards, 4);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(compile(" foo "), "%%foo%%");
    }
}
