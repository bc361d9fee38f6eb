//! Dublin Core bodies for record export.
//!
//! Builds the `<dc>` element used by the plain Dublin Core and OAI Dublin
//! Core dialects, crosswalking a fixed set of stored field selectors onto
//! Dublin Core elements:
//!
//! | selector | element          |
//! |----------|------------------|
//! | `041__a` | `<language>`     |
//! | `100__a` | `<creator>`      |
//! | `700__a` | `<creator>`      |
//! | `245__a` | `<title>`        |
//! | `65017a` | `<subject>`      |
//! | `8564_u` | `<identifier>`   |
//! | `520__a` | `<description>`  |
//!
//! plus the record's creation date as `<date>`. A soft-deleted record
//! yields the empty `<dc>` wrapper with no elements.

use std::fmt::Write;

use lazy_static::lazy_static;

use crate::error::Result;
use crate::export::escape_for_xml;
use crate::field::TagSpec;
use crate::storage::{FieldStore, RecordId, RecordStatus};

lazy_static! {
    static ref LANGUAGE: TagSpec = TagSpec::new("041__a").unwrap();
    static ref CREATOR: TagSpec = TagSpec::new("100__a").unwrap();
    static ref ADDED_CREATOR: TagSpec = TagSpec::new("700__a").unwrap();
    static ref TITLE: TagSpec = TagSpec::new("245__a").unwrap();
    static ref SUBJECT: TagSpec = TagSpec::new("65017a").unwrap();
    static ref URL: TagSpec = TagSpec::new("8564_u").unwrap();
    static ref ABSTRACT: TagSpec = TagSpec::new("520__a").unwrap();
}

const DC_OPEN: &str = "    <dc xmlns=\"http://purl.org/dc/elements/1.1/\"\n         \
     xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n         \
     xsi:schemaLocation=\"http://purl.org/dc/elements/1.1/\n                             \
     http://www.openarchives.org/OAI/1.1/dc.xsd\">\n";

/// Build the `<dc>` body for a record.
///
/// # Errors
///
/// Propagates storage errors from the field store.
pub fn dc_body<S: FieldStore>(
    store: &S,
    id: RecordId,
    status: RecordStatus,
) -> Result<String> {
    let mut out = String::from(DC_OPEN);

    if status != RecordStatus::Deleted {
        write_elements(&mut out, "language", &store.values(id, &LANGUAGE)?);
        write_elements(&mut out, "creator", &store.values(id, &CREATOR)?);
        write_elements(&mut out, "creator", &store.values(id, &ADDED_CREATOR)?);
        write_elements(&mut out, "title", &store.values(id, &TITLE)?);
        write_elements(&mut out, "subject", &store.values(id, &SUBJECT)?);
        write_elements(&mut out, "identifier", &store.values(id, &URL)?);
        write_elements(&mut out, "description", &store.values(id, &ABSTRACT)?);

        let date = store.creation_date(id)?.unwrap_or_default();
        writeln!(out, "        <date>{date}</date>").ok();
    }

    out.push_str("    </dc>\n");
    Ok(out)
}

fn write_elements(out: &mut String, element: &str, values: &[String]) {
    for value in values {
        writeln!(
            out,
            "        <{element}>{}</{element}>",
            escape_for_xml(value)
        )
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::StoredField;
    use crate::storage::MemoryFieldStore;

    fn sample_store() -> MemoryFieldStore {
        let mut store = MemoryFieldStore::new();
        store.add_record(9, "2004-03-01", "2004-07-15");
        store
            .add_field(9, StoredField::new("041__", 'a', "eng", 1))
            .unwrap();
        store
            .add_field(9, StoredField::new("100__", 'a', "Doe, Jane", 2))
            .unwrap();
        store
            .add_field(9, StoredField::new("700__", 'a', "Roe, Richard", 3))
            .unwrap();
        store
            .add_field(9, StoredField::new("245__", 'a', "Waves & Particles", 4))
            .unwrap();
        store
            .add_field(9, StoredField::new("65017", 'a', "Physics", 5))
            .unwrap();
        store
            .add_field(9, StoredField::new("8564_", 'u', "http://example.org/9", 6))
            .unwrap();
        store
            .add_field(9, StoredField::new("520__", 'a', "An abstract.", 7))
            .unwrap();
        store
    }

    #[test]
    fn test_all_elements_present() {
        let store = sample_store();
        let body = dc_body(&store, 9, RecordStatus::Live).unwrap();

        assert!(body.contains("<language>eng</language>"));
        assert!(body.contains("<creator>Doe, Jane</creator>"));
        assert!(body.contains("<creator>Roe, Richard</creator>"));
        assert!(body.contains("<title>Waves &amp; Particles</title>"));
        assert!(body.contains("<subject>Physics</subject>"));
        assert!(body.contains("<identifier>http://example.org/9</identifier>"));
        assert!(body.contains("<description>An abstract.</description>"));
        assert!(body.contains("<date>2004-03-01</date>"));
    }

    #[test]
    fn test_dc_namespace_declared() {
        let store = sample_store();
        let body = dc_body(&store, 9, RecordStatus::Live).unwrap();
        assert!(body.contains("xmlns=\"http://purl.org/dc/elements/1.1/\""));
        assert!(body.trim_end().ends_with("</dc>"));
    }

    #[test]
    fn test_deleted_record_has_empty_wrapper() {
        let store = sample_store();
        let body = dc_body(&store, 9, RecordStatus::Deleted).unwrap();
        assert!(body.contains("<dc"));
        assert!(body.contains("</dc>"));
        assert!(!body.contains("<title>"));
        assert!(!body.contains("<date>"));
    }

    #[test]
    fn test_subject_selector_requires_lcsh_indicators() {
        let mut store = sample_store();
        // 650 with the wrong indicators is not crosswalked.
        store
            .add_field(9, StoredField::new("650__", 'a', "Uncontrolled term", 8))
            .unwrap();

        let body = dc_body(&store, 9, RecordStatus::Live).unwrap();
        assert!(!body.contains("Uncontrolled term"));
    }

    #[test]
    fn test_record_without_fields_still_has_date() {
        let mut store = MemoryFieldStore::new();
        store.add_record(2, "2001-11-11", "2002-02-02");
        let body = dc_body(&store, 2, RecordStatus::Live).unwrap();
        assert!(body.contains("<date>2001-11-11</date>"));
    }
}
