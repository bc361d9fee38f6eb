//! Field store boundary and the bundled in-memory implementation.
//!
//! The export pipeline reads records through the [`FieldStore`] trait, one
//! logical capability covering record status, field lookup, record
//! timestamps, and the cached-export fast path. Backends are free to shard
//! storage however they like; [`MemoryFieldStore`] keeps the historical
//! layout of one shard per two-digit tag prefix as a private detail.
//!
//! # Examples
//!
//! ```
//! use bibfmt::storage::{FieldStore, MemoryFieldStore, RecordStatus};
//! use bibfmt::field::StoredField;
//!
//! let mut store = MemoryFieldStore::new();
//! store.add_record(7, "2003-01-20", "2003-05-02");
//! store.add_field(7, StoredField::new("245__", 'a', "On Shell Structure", 1))?;
//!
//! assert_eq!(store.status(7)?, RecordStatus::Live);
//! let values = store.values(7, &"245__a".parse()?)?;
//! assert_eq!(values, vec!["On Shell Structure"]);
//! # Ok::<(), bibfmt::FormatError>(())
//! ```

use std::io::Read;
use std::io::Write;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{FormatError, Result};
use crate::export::XmlFormat;
use crate::field::{StoredField, TagSpec};

/// Record identifier. Always positive.
pub type RecordId = u32;

/// Existence status of a record in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// No record with this identifier.
    NotFound,
    /// A live record with full metadata.
    Live,
    /// A soft-deleted record; only a minimal stub is retained.
    Deleted,
}

/// Read access to bibliographic records and their fields.
///
/// Implementations must return fields ordered by `(occurrence, tag)`; the
/// XML export relies on that order to group subfields into datafields.
pub trait FieldStore {
    /// Existence status of a record.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Storage`] if the backend cannot be queried.
    fn status(&self, id: RecordId) -> Result<RecordStatus>;

    /// All stored field values of a record, ordered by `(occurrence, tag)`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Storage`] if the backend cannot be queried.
    fn fields(&self, id: RecordId) -> Result<Vec<StoredField>>;

    /// Subfield values matching a selector, in field order.
    ///
    /// The record-identifier selector `001___` is answered with the record
    /// id itself and never touches field storage.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Storage`] if the backend cannot be queried.
    fn values(&self, id: RecordId, spec: &TagSpec) -> Result<Vec<String>> {
        if spec.is_record_id() {
            return Ok(vec![id.to_string()]);
        }
        Ok(self
            .fields(id)?
            .into_iter()
            .filter(|field| spec.matches(field))
            .map(|field| field.value)
            .collect())
    }

    /// Creation date of a record as `YYYY-MM-DD`, if known.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Storage`] if the backend cannot be queried.
    fn creation_date(&self, id: RecordId) -> Result<Option<String>>;

    /// Last modification date of a record as `YYYY-MM-DD`, if known.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Storage`] if the backend cannot be queried.
    fn modification_date(&self, id: RecordId) -> Result<Option<String>>;

    /// A preformatted export blob for this record and format, if one was
    /// stored. The export pipeline prefers this over rebuilding the XML
    /// from fields.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::CorruptCache`] if a stored blob cannot be
    /// inflated, or [`FormatError::Storage`] if the backend cannot be
    /// queried.
    fn cached_xml(&self, id: RecordId, format: XmlFormat) -> Result<Option<String>>;
}

/// One record's data inside [`MemoryFieldStore`].
#[derive(Debug, Clone)]
struct RecordEntry {
    deleted: bool,
    created: Option<String>,
    modified: Option<String>,
    /// Fields sharded by two-digit tag prefix, each shard sorted on read.
    shards: BTreeMap<u8, Vec<StoredField>>,
    /// zlib-compressed preformatted XML per format.
    cached: IndexMap<XmlFormat, Vec<u8>>,
}

impl RecordEntry {
    fn new(created: &str, modified: &str) -> Self {
        RecordEntry {
            deleted: false,
            created: Some(created.to_string()),
            modified: Some(modified.to_string()),
            shards: BTreeMap::new(),
            cached: IndexMap::new(),
        }
    }
}

/// In-memory [`FieldStore`] implementation.
///
/// Intended for tests and for embedders that load records from elsewhere.
/// Records iterate in insertion order; fields are sharded by two-digit tag
/// prefix internally and always read back ordered by `(occurrence, tag)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    records: IndexMap<RecordId, RecordEntry>,
}

impl MemoryFieldStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the store, deleted stubs included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a live record with its creation and modification dates.
    /// Re-adding an existing id replaces the record.
    pub fn add_record(&mut self, id: RecordId, created: &str, modified: &str) {
        self.records.insert(id, RecordEntry::new(created, modified));
    }

    /// Adds a field value to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RecordNotFound`] if the record was never
    /// added, or [`FormatError::InvalidTagSpec`] if the field tag is not a
    /// three-digit tag plus two indicator characters.
    pub fn add_field(&mut self, id: RecordId, field: StoredField) -> Result<()> {
        if !StoredField::is_valid_tag(&field.tag) {
            return Err(FormatError::InvalidTagSpec(field.tag));
        }
        let shard = shard_index(&field.tag)?;
        let entry = self
            .records
            .get_mut(&id)
            .ok_or(FormatError::RecordNotFound(id))?;
        entry.shards.entry(shard).or_default().push(field);
        Ok(())
    }

    /// Marks a record as soft-deleted. Its fields and dates are retained;
    /// only the export stub is served for it.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RecordNotFound`] if the record was never
    /// added.
    pub fn mark_deleted(&mut self, id: RecordId) -> Result<()> {
        let entry = self
            .records
            .get_mut(&id)
            .ok_or(FormatError::RecordNotFound(id))?;
        entry.deleted = true;
        Ok(())
    }

    /// Stores a preformatted export blob for a record and format. The blob
    /// is kept zlib-compressed.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RecordNotFound`] if the record was never
    /// added, or [`FormatError::Storage`] if compression fails.
    pub fn put_cached_xml(&mut self, id: RecordId, format: XmlFormat, xml: &str) -> Result<()> {
        let entry = self
            .records
            .get_mut(&id)
            .ok_or(FormatError::RecordNotFound(id))?;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(xml.as_bytes())
            .and_then(|()| encoder.finish())
            .map(|blob| {
                entry.cached.insert(format, blob);
            })
            .map_err(|e| FormatError::Storage(e.to_string()))
    }
}

impl FieldStore for MemoryFieldStore {
    fn status(&self, id: RecordId) -> Result<RecordStatus> {
        Ok(match self.records.get(&id) {
            None => RecordStatus::NotFound,
            Some(entry) if entry.deleted => RecordStatus::Deleted,
            Some(_) => RecordStatus::Live,
        })
    }

    fn fields(&self, id: RecordId) -> Result<Vec<StoredField>> {
        let Some(entry) = self.records.get(&id) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for shard in entry.shards.values() {
            let mut fields = shard.clone();
            fields.sort_by(|a, b| {
                (a.occurrence, &a.tag, a.code).cmp(&(b.occurrence, &b.tag, b.code))
            });
            out.extend(fields);
        }
        Ok(out)
    }

    fn creation_date(&self, id: RecordId) -> Result<Option<String>> {
        Ok(self.records.get(&id).and_then(|e| e.created.clone()))
    }

    fn modification_date(&self, id: RecordId) -> Result<Option<String>> {
        Ok(self.records.get(&id).and_then(|e| e.modified.clone()))
    }

    fn cached_xml(&self, id: RecordId, format: XmlFormat) -> Result<Option<String>> {
        let Some(blob) = self
            .records
            .get(&id)
            .and_then(|entry| entry.cached.get(&format))
        else {
            return Ok(None);
        };

        let mut decoder = ZlibDecoder::new(blob.as_slice());
        let mut xml = String::new();
        decoder
            .read_to_string(&mut xml)
            .map_err(|e| FormatError::CorruptCache(e.to_string()))?;
        Ok(Some(xml))
    }
}

/// Two-digit shard index for a field tag.
fn shard_index(tag: &str) -> Result<u8> {
    let prefix = tag.get(0..2).unwrap_or("");
    prefix
        .parse::<u8>()
        .map_err(|_| FormatError::InvalidTagSpec(tag.to_string()))
}
