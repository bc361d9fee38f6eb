//! Stored field values and tag selectors.
//!
//! This module provides the data model shared by the field store and the XML
//! export pipeline:
//! - [`StoredField`] — one subfield value of one field instance of a record
//! - [`TagSpec`] — a six-character field selector with wildcard support
//!
//! A field tag is five characters: a three-digit MARC tag followed by two
//! indicator characters, with `_` standing for a blank indicator (`245__`,
//! `8564_`). A selector appends a subfield code and may use `%` as a
//! wildcard in any position (`245__a`, `909C0%`).

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

lazy_static! {
    static ref TAG_SPEC_RE: Regex =
        Regex::new(r"^[0-9%]{3}[0-9A-Za-z_%]{2}[0-9A-Za-z_%]?$").unwrap();
    static ref FIELD_TAG_RE: Regex = Regex::new(r"^[0-9]{3}[0-9A-Za-z_]{2}$").unwrap();
}

/// The selector answered with the record identifier itself rather than
/// stored field values.
pub const RECORD_ID_SPEC: &str = "001___";

/// One subfield value of one field instance of a record.
///
/// Repeated fields of the same tag are distinguished by `occurrence`;
/// subfields belonging to the same field instance share an occurrence
/// number. Fields are ordered by `(occurrence, tag)` everywhere in this
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredField {
    /// Five-character field tag (`245__`, `65017`, `8564_`).
    pub tag: String,
    /// Subfield code.
    pub code: char,
    /// Subfield value.
    pub value: String,
    /// Field instance number within the record.
    pub occurrence: u32,
}

impl StoredField {
    /// Creates a stored field value.
    #[must_use]
    pub fn new(tag: impl Into<String>, code: char, value: impl Into<String>, occurrence: u32) -> Self {
        StoredField {
            tag: tag.into(),
            code,
            value: value.into(),
            occurrence,
        }
    }

    /// Whether a tag is a well-formed five-character field tag: three
    /// digits plus two indicator characters, no wildcards.
    ///
    /// [`MemoryFieldStore::add_field`](crate::MemoryFieldStore::add_field)
    /// enforces this shape, so fields read back from a store always satisfy
    /// it. The accessors below stay total on shorter tags regardless.
    #[must_use]
    pub fn is_valid_tag(tag: &str) -> bool {
        FIELD_TAG_RE.is_match(tag)
    }

    /// The three-digit MARC tag.
    #[must_use]
    pub fn marc_tag(&self) -> &str {
        self.tag.get(0..3).unwrap_or(&self.tag)
    }

    /// First indicator character (`_` = blank).
    #[must_use]
    pub fn indicator1(&self) -> char {
        self.tag.chars().nth(3).unwrap_or('_')
    }

    /// Second indicator character (`_` = blank).
    #[must_use]
    pub fn indicator2(&self) -> char {
        self.tag.chars().nth(4).unwrap_or('_')
    }
}

/// A validated field selector.
///
/// Six characters select a subfield (`245__a`); five characters select every
/// subfield of a field (`245__`). `%` is a wildcard in any position, `_` a
/// blank indicator.
///
/// # Examples
///
/// ```
/// use bibfmt::field::{StoredField, TagSpec};
///
/// let spec: TagSpec = "245__a".parse()?;
/// let field = StoredField::new("245__", 'a', "A title", 1);
/// assert!(spec.matches(&field));
/// # Ok::<(), bibfmt::FormatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagSpec {
    raw: String,
}

impl TagSpec {
    /// Parses and validates a selector.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidTagSpec`] if the selector is not five or
    /// six characters of digits, letters, `_`, and `%` in the accepted
    /// positions.
    pub fn new(spec: impl Into<String>) -> Result<Self> {
        let raw = spec.into();
        if TAG_SPEC_RE.is_match(&raw) {
            Ok(TagSpec { raw })
        } else {
            Err(FormatError::InvalidTagSpec(raw))
        }
    }

    /// The selector as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The three-digit tag part (may contain `%`).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.raw[0..3]
    }

    /// First indicator position.
    #[must_use]
    pub fn indicator1(&self) -> char {
        self.raw.chars().nth(3).unwrap_or('%')
    }

    /// Second indicator position.
    #[must_use]
    pub fn indicator2(&self) -> char {
        self.raw.chars().nth(4).unwrap_or('%')
    }

    /// Subfield code position, if the selector has one. A five-character
    /// selector matches any code.
    #[must_use]
    pub fn code(&self) -> Option<char> {
        self.raw.chars().nth(5)
    }

    /// Whether this selector asks for the record identifier itself.
    #[must_use]
    pub fn is_record_id(&self) -> bool {
        self.raw == RECORD_ID_SPEC
    }

    /// Whether a stored field matches this selector.
    #[must_use]
    pub fn matches(&self, field: &StoredField) -> bool {
        let positions = self.raw[0..5].chars().zip(field.tag.chars());
        for (want, have) in positions {
            if want != '%' && want != have {
                return false;
            }
        }
        match self.code() {
            None => true,
            Some('%') => true,
            Some(code) => code == field.code,
        }
    }
}

impl FromStr for TagSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        TagSpec::new(s)
    }
}

impl TryFrom<String> for TagSpec {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self> {
        TagSpec::new(value)
    }
}

impl From<TagSpec> for String {
    fn from(spec: TagSpec) -> String {
        spec.raw
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
