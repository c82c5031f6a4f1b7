//! Name selection patterns for libraries, buses and modules.

use regex::Regex;

/// Characters whose presence marks a pattern as a regular expression.
const REGEX_METACHARACTERS: &[char] = &[
    '*', '+', '?', '|', '[', ']', '(', ')', '{', '}', '^', '$', '\\', '.',
];

/// Errors produced when building a [`NamePattern`].
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern was empty or contained only whitespace.
    #[error("name pattern is empty")]
    Empty,

    /// The pattern looked like a regular expression but failed to compile.
    #[error("invalid name pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The pattern as written.
        pattern: String,
        /// The underlying regex compilation error.
        source: regex::Error,
    },
}

/// Selects names either exactly or by regular expression.
///
/// A pattern without regex metacharacters (`uart0`) matches only that exact
/// name. A pattern containing any metacharacter (`uart.*`, `^apb`) is compiled
/// as a regular expression and matches wherever the expression matches.
#[derive(Clone, Debug)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Builds a pattern from user input.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.trim().is_empty() {
            return Err(PatternError::Empty);
        }
        let expr = if is_regex(pattern) {
            pattern.to_string()
        } else {
            format!("^{}$", regex::escape(pattern))
        };
        let regex = Regex::new(&expr).map_err(|source| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// A pattern matching every name.
    pub fn any() -> Self {
        Self {
            source: ".*".to_string(),
            regex: Regex::new(".*").expect("static pattern compiles"),
        }
    }

    /// Returns `true` if `name` is selected by this pattern.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the pattern as written by the user.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Returns `true` if `pattern` contains regular expression syntax.
fn is_regex(pattern: &str) -> bool {
    pattern.contains(REGEX_METACHARACTERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_is_exact() {
        let p = NamePattern::new("uart").unwrap();
        assert!(p.is_match("uart"));
        assert!(!p.is_match("uart0"));
        assert!(!p.is_match("my_uart"));
    }

    #[test]
    fn regex_pattern_searches() {
        let p = NamePattern::new("uart.*").unwrap();
        assert!(p.is_match("uart"));
        assert!(p.is_match("uart0"));
        assert!(p.is_match("my_uart_lite"));
    }

    #[test]
    fn anchored_regex() {
        let p = NamePattern::new("^apb").unwrap();
        assert!(p.is_match("apb4"));
        assert!(!p.is_match("ahb_apb"));
    }

    #[test]
    fn any_matches_everything() {
        let p = NamePattern::any();
        assert!(p.is_match(""));
        assert!(p.is_match("anything"));
        assert_eq!(p.as_str(), ".*");
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(NamePattern::new(""), Err(PatternError::Empty)));
        assert!(matches!(NamePattern::new("   "), Err(PatternError::Empty)));
    }

    #[test]
    fn invalid_regex_rejected() {
        let err = NamePattern::new("uart(").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
        assert!(err.to_string().contains("uart("));
    }
}
