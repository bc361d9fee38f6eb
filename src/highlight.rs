//! Keyword highlighting for display text.
//!
//! Wraps every case-insensitive occurrence of a set of keywords in a text
//! with configurable marker tags, preserving the matched text's original
//! casing. Used by display templates to emphasize the terms of the active
//! search query.
//!
//! # Examples
//!
//! ```
//! use bibfmt::highlight::{highlight, HighlightOptions};
//!
//! let out = highlight("The Cat in the Hat", &["cat", "hat"], &HighlightOptions::default())?;
//! assert_eq!(out, "The <strong>Cat</strong> in the <strong>Hat</strong>");
//! # Ok::<(), bibfmt::FormatError>(())
//! ```
//!
//! # Matching contract
//!
//! By default keywords are treated as **raw pattern fragments**
//! ([`MatchMode::Pattern`]): a keyword containing regex metacharacters gets
//! regex semantics. This matches the historical behavior of the display
//! pipeline this crate was extracted from, and is a configuration contract,
//! not an escaping bug. Callers that want plain substring matching should use
//! [`MatchMode::Literal`], which escapes each keyword before the pattern is
//! built.
//!
//! Highlighting is not idempotent: re-applying [`highlight`] to its own
//! output may match text inside previously inserted tags (for example a
//! keyword that also occurs in the tag string). Callers are expected to
//! highlight once, on raw text.

use regex::RegexBuilder;

use crate::error::{FormatError, Result};

/// How keywords are interpreted when the match pattern is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Keywords are raw regex fragments; metacharacters keep their regex
    /// meaning. The historical behavior, and the default.
    #[default]
    Pattern,
    /// Keywords are literal substrings; metacharacters are escaped.
    Literal,
}

/// Configuration for [`highlight`].
///
/// # Examples
///
/// ```
/// use bibfmt::highlight::{HighlightOptions, MatchMode};
///
/// let options = HighlightOptions::new()
///     .with_tags("<span class='hl'>", "</span>")
///     .with_mode(MatchMode::Literal);
/// ```
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// String inserted before each match.
    pub prefix: String,
    /// String inserted after each match.
    pub suffix: String,
    /// Keyword interpretation mode.
    pub mode: MatchMode,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        HighlightOptions {
            prefix: "<strong>".to_string(),
            suffix: "</strong>".to_string(),
            mode: MatchMode::default(),
        }
    }
}

impl HighlightOptions {
    /// Creates options with the default `<strong>`/`</strong>` tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix and suffix marker tags.
    #[must_use]
    pub fn with_tags(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Sets the keyword interpretation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Highlight every occurrence of the given keywords in `text`.
///
/// Builds a single case-insensitive alternation over the keywords, tried in
/// the order given, and replaces every non-overlapping leftmost match with
/// `prefix + match + suffix`. The matched substring keeps its original
/// casing. An empty keyword list returns the text unchanged without building
/// a pattern.
///
/// # Errors
///
/// Returns [`FormatError::InvalidPattern`] if the keywords cannot be compiled
/// into a pattern (only possible in [`MatchMode::Pattern`]).
pub fn highlight<S: AsRef<str>>(
    text: &str,
    keywords: &[S],
    options: &HighlightOptions,
) -> Result<String> {
    if keywords.is_empty() {
        return Ok(text.to_string());
    }

    let fragments: Vec<String> = keywords
        .iter()
        .map(|k| match options.mode {
            MatchMode::Pattern => k.as_ref().to_string(),
            MatchMode::Literal => regex::escape(k.as_ref()),
        })
        .collect();

    let pattern = fragments.join("|");
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| FormatError::InvalidPattern(e.to_string()))?;

    let out = re.replace_all(text, |caps: &regex::Captures<'_>| {
        format!("{}{}{}", options.prefix, &caps[0], options.suffix)
    });

    Ok(out.into_owned())
}

/// Highlight with the default `<strong>`/`</strong>` tags and pattern-mode
/// matching.
///
/// # Errors
///
/// Returns [`FormatError::InvalidPattern`] if the keywords cannot be compiled
/// into a pattern.
pub fn highlight_default<S: AsRef<str>>(text: &str, keywords: &[S]) -> Result<String> {
    highlight(text, keywords, &HighlightOptions::default())
}
