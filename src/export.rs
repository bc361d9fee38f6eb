//! XML export of bibliographic records.
//!
//! Serializes a record out of a [`FieldStore`] into one of four XML
//! dialects:
//! - **native XML** — the repository's internal `<record>` markup
//! - **MARCXML** — the same structure under the MARC21/slim namespace
//! - **OAI Dublin Core** — Dublin Core wrapped in an OAI harvesting envelope
//! - **Dublin Core XML** — the bare `<dc>` element
//!
//! The MARC-flavored dialects prefer a cached preformatted blob when the
//! store has one for a live record; otherwise the body is rebuilt from
//! stored fields. Soft-deleted records always serialize to a minimal stub
//! (identifier plus deletion marker) rather than full metadata.
//!
//! # Examples
//!
//! ```
//! use bibfmt::{export, FormatConfig, MemoryFieldStore, StoredField, XmlFormat};
//!
//! let mut store = MemoryFieldStore::new();
//! store.add_record(3, "2004-03-01", "2004-07-15");
//! store.add_field(3, StoredField::new("245__", 'a', "CERN Yellow Reports", 1))?;
//!
//! let xml = export::record_to_xml(&store, &FormatConfig::default(), 3, XmlFormat::MarcXml)?;
//! assert!(xml.contains("<controlfield tag=\"001\">3</controlfield>"));
//! # Ok::<(), bibfmt::FormatError>(())
//! ```

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FormatConfig;
use crate::dublin_core;
use crate::error::{FormatError, Result};
use crate::marcxml;
use crate::storage::{FieldStore, RecordId, RecordStatus};

/// Target XML dialect for record export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XmlFormat {
    /// Internal record XML (`native-xml`, historically `xm`).
    Native,
    /// MARCXML under the MARC21/slim namespace (`marc-xml`).
    MarcXml,
    /// Dublin Core in an OAI harvesting envelope (`oai-dc`).
    OaiDc,
    /// Bare Dublin Core XML (`dublin-core-xml`, historically `xd`).
    DublinCore,
}

impl XmlFormat {
    /// Canonical format tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native-xml",
            Self::MarcXml => "marc-xml",
            Self::OaiDc => "oai-dc",
            Self::DublinCore => "dublin-core-xml",
        }
    }

    /// Whether the body is MARC-structured (`<datafield>`/`<subfield>`).
    #[must_use]
    pub const fn is_marc_flavored(&self) -> bool {
        matches!(self, Self::Native | Self::MarcXml)
    }

    /// Whether the body is a Dublin Core `<dc>` element.
    #[must_use]
    pub const fn is_dc_flavored(&self) -> bool {
        matches!(self, Self::OaiDc | Self::DublinCore)
    }

    /// Whether the output is wrapped in an OAI `<record>` envelope with a
    /// `<header>` and `<metadata>` section.
    #[must_use]
    pub const fn has_oai_envelope(&self) -> bool {
        matches!(self, Self::MarcXml | Self::OaiDc)
    }
}

impl FromStr for XmlFormat {
    type Err = FormatError;

    /// Parses a format tag. The legacy short tags (`xm`, `marcxml`,
    /// `oai_dc`, `xd`) are accepted alongside the canonical ones.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "native-xml" | "xm" => Ok(Self::Native),
            "marc-xml" | "marcxml" => Ok(Self::MarcXml),
            "oai-dc" | "oai_dc" => Ok(Self::OaiDc),
            "dublin-core-xml" | "xd" => Ok(Self::DublinCore),
            other => Err(FormatError::InvalidArgument(format!(
                "unknown XML format tag: {other}"
            ))),
        }
    }
}

impl fmt::Display for XmlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape a field value for embedding in XML text content.
///
/// Ampersand first, then the angle bracket, so already-produced entities are
/// not double-escaped.
#[must_use]
pub fn escape_for_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;")
}

/// Serialize a record to the requested XML dialect.
///
/// A soft-deleted record serializes to a stub: its identifier and a deletion
/// marker for MARC-flavored formats, an empty `<dc>` wrapper for Dublin Core
/// flavors. For `marc-xml` and `oai-dc` the body is wrapped in an OAI
/// envelope carrying the record's OAI identifiers (looked up through
/// [`FormatConfig::oai_id_spec`]) and modification datestamp.
///
/// # Errors
///
/// Returns [`FormatError::RecordNotFound`] if the store has no record with
/// this id, or a storage error from the underlying [`FieldStore`]. Callers
/// that need the legacy "missing record is an empty string" boundary should
/// use [`record_xml_or_empty`].
pub fn record_to_xml<S: FieldStore>(
    store: &S,
    config: &FormatConfig,
    id: RecordId,
    format: XmlFormat,
) -> Result<String> {
    let status = store.status(id)?;
    if status == RecordStatus::NotFound {
        return Err(FormatError::RecordNotFound(id));
    }

    let mut out = String::new();

    if format.has_oai_envelope() {
        out.push_str("  <record>\n");
        out.push_str("   <header>\n");
        for oai_id in store.values(id, &config.oai_id_spec)? {
            writeln!(
                out,
                "    <identifier>{}</identifier>",
                escape_for_xml(&oai_id)
            )
            .ok();
        }
        let datestamp = store.modification_date(id)?.unwrap_or_default();
        writeln!(out, "    <datestamp>{datestamp}</datestamp>").ok();
        out.push_str("   </header>\n");
        out.push_str("   <metadata>\n");
    }

    if format.is_marc_flavored() {
        let cached = if status == RecordStatus::Live {
            store.cached_xml(id, format)?
        } else {
            None
        };
        match cached {
            Some(body) => out.push_str(&body),
            None => out.push_str(&marcxml::marc_body(store, config, id, status, format)?),
        }
    } else {
        out.push_str(&dublin_core::dc_body(store, id, status)?);
    }

    if format.has_oai_envelope() {
        out.push_str("   </metadata>\n");
        out.push_str("  </record>\n");
    }

    Ok(out)
}

/// Legacy-compatible variant of [`record_to_xml`]: a missing record yields
/// an empty string instead of an error.
///
/// # Errors
///
/// Propagates every error except [`FormatError::RecordNotFound`].
pub fn record_xml_or_empty<S: FieldStore>(
    store: &S,
    config: &FormatConfig,
    id: RecordId,
    format: XmlFormat,
) -> Result<String> {
    match record_to_xml(store, config, id, format) {
        Err(FormatError::RecordNotFound(_)) => Ok(String::new()),
        other => other,
    }
}
