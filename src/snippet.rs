//! Contextual snippet extraction.
//!
//! Scores the sentence-delimited segments of a text by keyword density and
//! returns the highest-scoring contiguous window of segments. Display
//! templates use this to show the part of an abstract most relevant to the
//! active search query.
//!
//! Segments are produced by splitting on `.`; split semantics are kept
//! as-is, so a text ending in a delimiter yields a trailing empty segment,
//! and no trimming or normalization is applied to the returned segments.
//!
//! # Examples
//!
//! ```
//! use bibfmt::snippet::contextual_segments;
//!
//! let text = "Cats are great. Dogs are great too. I love cats and dogs.";
//! let segments = contextual_segments(text, &["cats"], 2)?;
//! assert_eq!(segments, vec!["Cats are great", " Dogs are great too"]);
//! # Ok::<(), bibfmt::FormatError>(())
//! ```

use crate::error::{FormatError, Result};

/// Default window width, in segments.
pub const DEFAULT_MAX_LINES: usize = 2;

/// Score one segment: the total number of case-insensitive, non-overlapping
/// occurrences of the keywords within it.
///
/// An empty keyword contributes nothing. Counting it at every character
/// boundary instead would let a stray empty term outweigh real matches and
/// skew the window selection, so it is deliberately ignored.
pub fn segment_score<S: AsRef<str>>(segment: &str, keywords: &[S]) -> usize {
    let haystack = segment.to_uppercase();
    keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.as_ref().to_uppercase();
            if needle.is_empty() {
                0
            } else {
                haystack.matches(&needle).count()
            }
        })
        .sum()
}

/// Return the contiguous window of segments most relevant to the keywords.
///
/// The text is split into segments on `.`, each segment is scored with
/// [`segment_score`], and when `max_lines > 1` a sliding-window sum of width
/// `max_lines` ranks every window of consecutive segments. The window with
/// the greatest score wins; on a tie the **first** (lowest-index) window is
/// kept, since only a strictly greater score replaces the current maximum.
/// When every score is zero (no keyword matches anywhere, including an empty
/// keyword list), the leading window is returned. Empty keywords are ignored
/// by the scoring (see [`segment_score`]).
///
/// The returned vector holds the original segment strings, `max_lines` of
/// them, or fewer when the window runs past the end of the text. A text with
/// fewer segments than `max_lines` has no complete window, so the selection
/// degrades to the leading segments.
///
/// # Errors
///
/// Returns [`FormatError::InvalidArgument`] if `max_lines` is zero.
pub fn contextual_segments<S: AsRef<str>>(
    text: &str,
    keywords: &[S],
    max_lines: usize,
) -> Result<Vec<String>> {
    if max_lines == 0 {
        return Err(FormatError::InvalidArgument(
            "max_lines must be at least 1".to_string(),
        ));
    }

    let segments: Vec<&str> = text.split('.').collect();
    let scores: Vec<usize> = segments
        .iter()
        .map(|segment| segment_score(segment, keywords))
        .collect();

    let window_scores: Vec<usize> = if max_lines > 1 {
        scores
            .windows(max_lines)
            .map(|window| window.iter().sum())
            .collect()
    } else {
        scores
    };

    // First maximum wins; a later equal score does not replace it.
    let mut best_index = 0;
    let mut best_score = 0;
    for (index, &score) in window_scores.iter().enumerate() {
        if score > best_score {
            best_index = index;
            best_score = score;
        }
    }

    let end = (best_index + max_lines).min(segments.len());
    Ok(segments[best_index..end]
        .iter()
        .map(|segment| (*segment).to_string())
        .collect())
}
