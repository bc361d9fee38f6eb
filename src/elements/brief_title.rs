//! Brief-title element.
//!
//! Renders a one-line title suitable for search-result listings: the title
//! proper (`245__a`), then the title remainder (`245__b`) and the edition
//! statement (`250__a`) when present. When none of those exist the meeting
//! name (`111__a`) stands in, so conference proceedings still get a title
//! line. The active search terms can be highlighted in the output.

use std::fmt::Write;

use crate::elements::ElementContext;
use crate::error::Result;
use crate::highlight::{highlight, HighlightOptions};
use crate::storage::FieldStore;

/// Render the brief title line for the context's record.
///
/// With `highlight_terms` set, the context's search terms are wrapped in the
/// configured highlight tags.
///
/// # Errors
///
/// Returns a storage error from the field store, or
/// [`FormatError::InvalidPattern`](crate::FormatError::InvalidPattern) when
/// highlighting is requested and the search terms do not compile.
pub fn brief_title<S: FieldStore>(
    ctx: &ElementContext<'_, S>,
    highlight_terms: bool,
) -> Result<String> {
    let mut out = ctx.field("245__a")?.unwrap_or_default();

    if let Some(remainder) = ctx.field("245__b")? {
        if !remainder.is_empty() {
            write!(out, " : {remainder}").ok();
        }
    }
    if let Some(edition) = ctx.field("250__a")? {
        if !edition.is_empty() {
            write!(out, " ; {edition}").ok();
        }
    }

    if out.is_empty() {
        out = ctx.field("111__a")?.unwrap_or_default();
    }

    if highlight_terms && !ctx.search_terms.is_empty() {
        let options = HighlightOptions::new()
            .with_tags(&*ctx.config.highlight_prefix, &*ctx.config.highlight_suffix);
        out = highlight(&out, &ctx.search_terms, &options)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatConfig;
    use crate::field::StoredField;
    use crate::storage::MemoryFieldStore;

    fn store_with_title() -> MemoryFieldStore {
        let mut store = MemoryFieldStore::new();
        store.add_record(5, "2004-01-01", "2004-01-01");
        store
            .add_field(5, StoredField::new("245__", 'a', "Gravitation", 1))
            .unwrap();
        store
    }

    #[test]
    fn test_title_only() {
        let store = store_with_title();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 5);
        assert_eq!(brief_title(&ctx, false).unwrap(), "Gravitation");
    }

    #[test]
    fn test_title_with_remainder_and_edition() {
        let mut store = store_with_title();
        store
            .add_field(5, StoredField::new("245__", 'b', "an introduction", 1))
            .unwrap();
        store
            .add_field(5, StoredField::new("250__", 'a', "2nd ed.", 2))
            .unwrap();

        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 5);
        assert_eq!(
            brief_title(&ctx, false).unwrap(),
            "Gravitation : an introduction ; 2nd ed."
        );
    }

    #[test]
    fn test_meeting_name_fallback() {
        let mut store = MemoryFieldStore::new();
        store.add_record(6, "2004-01-01", "2004-01-01");
        store
            .add_field(6, StoredField::new("111__", 'a', "Workshop on Lattice QCD", 1))
            .unwrap();

        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 6);
        assert_eq!(brief_title(&ctx, false).unwrap(), "Workshop on Lattice QCD");
    }

    #[test]
    fn test_highlighting_search_terms() {
        let store = store_with_title();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 5)
            .with_search_terms(vec!["gravitation".to_string()]);

        assert_eq!(
            brief_title(&ctx, true).unwrap(),
            "<strong>Gravitation</strong>"
        );
    }

    #[test]
    fn test_highlighting_uses_configured_tags() {
        let store = store_with_title();
        let config = FormatConfig::default()
            .with_highlight_tags("<span style='font-weight: bolder'>", "</span>");
        let ctx = ElementContext::new(&store, &config, 5)
            .with_search_terms(vec!["grav".to_string()]);

        assert_eq!(
            brief_title(&ctx, true).unwrap(),
            "<span style='font-weight: bolder'>Grav</span>itation"
        );
    }

    #[test]
    fn test_no_terms_means_no_highlighting() {
        let store = store_with_title();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 5);
        assert_eq!(brief_title(&ctx, true).unwrap(), "Gravitation");
    }

    #[test]
    fn test_missing_record_renders_empty() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 99);
        assert_eq!(brief_title(&ctx, false).unwrap(), "");
    }
}
