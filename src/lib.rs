#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Module overview
//!
//! - [`highlight`] — keyword highlighting of display text
//! - [`snippet`] — contextual snippet extraction by keyword density
//! - [`field`] — stored field values and tag selectors
//! - [`storage`] — the [`FieldStore`] boundary and the in-memory store
//! - [`export`] — XML serialization of records (native, MARCXML, OAI DC, DC)
//! - [`marcxml`] — MARC-structured XML bodies
//! - [`dublin_core`] — Dublin Core bodies
//! - [`elements`] — HTML fragment renderers for display templates
//! - [`config`] — explicitly-passed deployment configuration
//! - [`error`] — error types and result type
//!
//! All text utilities are pure functions over their arguments: no retained
//! state, no I/O, safe to call concurrently without coordination. The only
//! I/O boundary is the [`FieldStore`] trait, which embedders implement
//! against their storage system.

pub mod config;
pub mod dublin_core;
pub mod elements;
pub mod error;
pub mod export;
pub mod field;
pub mod highlight;
pub mod marcxml;
pub mod snippet;
pub mod storage;

pub use config::FormatConfig;
pub use elements::{AccessPolicy, ElementContext, ACTION_EDIT_RECORDS};
pub use error::{FormatError, Result};
pub use export::{escape_for_xml, record_to_xml, record_xml_or_empty, XmlFormat};
pub use field::{StoredField, TagSpec};
pub use highlight::{highlight, highlight_default, HighlightOptions, MatchMode};
pub use snippet::{contextual_segments, segment_score, DEFAULT_MAX_LINES};
pub use storage::{FieldStore, MemoryFieldStore, RecordId, RecordStatus};
