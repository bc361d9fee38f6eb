//! Configuration for record formatting.
//!
//! This module provides the [`FormatConfig`] struct carrying the deployment
//! values the formatters need: the site base URL, the OAI identifier field
//! selector, and the default highlight tags. Configuration is always passed
//! explicitly; nothing in this crate reads process-wide state.

use serde::{Deserialize, Serialize};

use crate::field::TagSpec;

/// Deployment configuration for the formatters.
///
/// # Examples
///
/// ```
/// use bibfmt::FormatConfig;
///
/// let config = FormatConfig::default()
///     .with_base_url("https://repo.example.org")
///     .with_oai_id_spec("909C0o".parse()?);
/// assert_eq!(config.base_url, "https://repo.example.org");
/// # Ok::<(), bibfmt::FormatError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Site base URL, used by elements that render links. No trailing slash.
    pub base_url: String,
    /// Selector of the field holding a record's OAI identifier.
    pub oai_id_spec: TagSpec,
    /// Default prefix tag for search-term highlighting in elements.
    pub highlight_prefix: String,
    /// Default suffix tag for search-term highlighting in elements.
    pub highlight_suffix: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            base_url: "http://localhost".to_string(),
            oai_id_spec: TagSpec::new("909C0o").expect("default OAI selector is valid"),
            highlight_prefix: "<strong>".to_string(),
            highlight_suffix: "</strong>".to_string(),
        }
    }
}

impl FormatConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site base URL. A trailing slash is stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Sets the OAI identifier field selector.
    #[must_use]
    pub fn with_oai_id_spec(mut self, spec: TagSpec) -> Self {
        self.oai_id_spec = spec;
        self
    }

    /// Sets the default highlight tags used by formatting elements.
    #[must_use]
    pub fn with_highlight_tags(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.highlight_prefix = prefix.into();
        self.highlight_suffix = suffix.into();
        self
    }
}
