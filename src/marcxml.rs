//! MARC-structured XML bodies for record export.
//!
//! Builds the `<record>` element shared by the native-XML and MARCXML
//! dialects: a `001` control field carrying the record identifier followed
//! by `<datafield>` groups assembled from the store's flat field list. The
//! MARCXML flavor adds the MARC21/slim namespace on the root element.

use std::fmt::Write;

use crate::config::FormatConfig;
use crate::error::Result;
use crate::export::{escape_for_xml, XmlFormat};
use crate::field::StoredField;
use crate::storage::{FieldStore, RecordId, RecordStatus};

/// The MARCXML namespace URI.
const MARCXML_NS: &str = "http://www.loc.gov/MARC21/slim";

/// Indicator character rendered into XML: `_` stands for blank.
fn indicator_attr(indicator: char) -> String {
    if indicator == '_' {
        String::new()
    } else {
        indicator.to_string()
    }
}

/// Build the MARC-structured `<record>` body for a record.
///
/// Fields arrive ordered by `(occurrence, tag)`; a new `<datafield>` opens
/// whenever the occurrence number or the field tag changes, so subfields of
/// the same field instance stay grouped. A deleted record emits only its
/// first OAI identifier (when present) and a `980 $c DELETED` marker.
///
/// # Errors
///
/// Propagates storage errors from the field store.
pub fn marc_body<S: FieldStore>(
    store: &S,
    config: &FormatConfig,
    id: RecordId,
    status: RecordStatus,
    format: XmlFormat,
) -> Result<String> {
    let mut out = String::new();

    if format == XmlFormat::MarcXml {
        writeln!(out, "    <record xmlns=\"{MARCXML_NS}\">").ok();
    } else {
        out.push_str("    <record>\n");
    }
    writeln!(out, "        <controlfield tag=\"001\">{id}</controlfield>").ok();

    if status == RecordStatus::Deleted {
        write_deleted_stub(&mut out, store, config, id)?;
    } else {
        write_datafields(&mut out, &store.fields(id)?);
    }

    out.push_str("    </record>\n");
    Ok(out)
}

fn write_deleted_stub<S: FieldStore>(
    out: &mut String,
    store: &S,
    config: &FormatConfig,
    id: RecordId,
) -> Result<()> {
    let oai_ids = store.values(id, &config.oai_id_spec)?;
    if let Some(oai_id) = oai_ids.first() {
        let spec = &config.oai_id_spec;
        writeln!(
            out,
            "        <datafield tag=\"{}\" ind1=\"{}\" ind2=\"{}\">",
            spec.tag(),
            indicator_attr(spec.indicator1()),
            indicator_attr(spec.indicator2()),
        )
        .ok();
        writeln!(
            out,
            "            <subfield code=\"{}\">{}</subfield>",
            spec.code().unwrap_or('a'),
            escape_for_xml(oai_id),
        )
        .ok();
        out.push_str("        </datafield>\n");
    }
    out.push_str("        <datafield tag=\"980\" ind1=\"\" ind2=\"\">\n");
    out.push_str("            <subfield code=\"c\">DELETED</subfield>\n");
    out.push_str("        </datafield>\n");
    Ok(())
}

fn write_datafields(out: &mut String, fields: &[StoredField]) {
    let mut current: Option<(u32, &str)> = None;

    for field in fields {
        let group = (field.occurrence, field.tag.as_str());
        if current != Some(group) {
            if current.is_some() {
                out.push_str("        </datafield>\n");
            }
            writeln!(
                out,
                "        <datafield tag=\"{}\" ind1=\"{}\" ind2=\"{}\">",
                escape_for_xml(field.marc_tag()),
                indicator_attr(field.indicator1()),
                indicator_attr(field.indicator2()),
            )
            .ok();
            current = Some(group);
        }
        writeln!(
            out,
            "            <subfield code=\"{}\">{}</subfield>",
            field.code,
            escape_for_xml(&field.value),
        )
        .ok();
    }

    if current.is_some() {
        out.push_str("        </datafield>\n");
    }
}
