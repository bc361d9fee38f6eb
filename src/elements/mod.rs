//! Formatting elements: small HTML fragment renderers for display templates.
//!
//! Each element renders one piece of a record display page from an
//! [`ElementContext`] — the record being displayed, the field store to read
//! it from, the deployment configuration, and per-request state (user id,
//! active search terms). Elements never touch process-global state, so they
//! are independently testable with a [`MemoryFieldStore`](crate::MemoryFieldStore).
//!
//! Provided elements:
//! - [`edit_link`](edit_link::edit_link) — link to the record editor, shown
//!   only to authorized users
//! - [`brief_title`](brief_title::brief_title) — one-line title with
//!   optional search-term highlighting

pub mod brief_title;
pub mod edit_link;

use crate::config::FormatConfig;
use crate::error::Result;
use crate::field::TagSpec;
use crate::storage::{FieldStore, RecordId};

/// The action name elements check before offering record editing.
pub const ACTION_EDIT_RECORDS: &str = "edit-records";

/// Authorization decisions for formatting elements.
///
/// The engine behind this trait is out of scope for this crate; embedders
/// wire in their access-control system, tests use a closure or one of the
/// obvious constant policies.
pub trait AccessPolicy {
    /// Whether the user may perform the named action.
    fn authorize(&self, uid: u32, action: &str) -> bool;
}

impl<F> AccessPolicy for F
where
    F: Fn(u32, &str) -> bool,
{
    fn authorize(&self, uid: u32, action: &str) -> bool {
        self(uid, action)
    }
}

/// Everything an element needs to render one record.
#[derive(Debug)]
pub struct ElementContext<'a, S: FieldStore> {
    /// Field store the record lives in.
    pub store: &'a S,
    /// Deployment configuration.
    pub config: &'a FormatConfig,
    /// The record being displayed.
    pub record_id: RecordId,
    /// Current user id, if a user is logged in.
    pub uid: Option<u32>,
    /// Terms of the active search query, for highlighting.
    pub search_terms: Vec<String>,
}

impl<'a, S: FieldStore> ElementContext<'a, S> {
    /// Creates a context with no user and no search terms.
    pub fn new(store: &'a S, config: &'a FormatConfig, record_id: RecordId) -> Self {
        ElementContext {
            store,
            config,
            record_id,
            uid: None,
            search_terms: Vec::new(),
        }
    }

    /// Sets the current user id.
    #[must_use]
    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Sets the active search terms.
    #[must_use]
    pub fn with_search_terms(mut self, terms: Vec<String>) -> Self {
        self.search_terms = terms;
        self
    }

    /// First value of the field matching a selector, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidTagSpec`](crate::FormatError::InvalidTagSpec)
    /// for a malformed selector, or a storage error from the store.
    pub fn field(&self, spec: &str) -> Result<Option<String>> {
        let spec: TagSpec = spec.parse()?;
        Ok(self
            .store
            .values(self.record_id, &spec)?
            .into_iter()
            .next())
    }

    /// All values of the fields matching a selector.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidTagSpec`](crate::FormatError::InvalidTagSpec)
    /// for a malformed selector, or a storage error from the store.
    pub fn field_values(&self, spec: &str) -> Result<Vec<String>> {
        let spec: TagSpec = spec.parse()?;
        self.store.values(self.record_id, &spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::StoredField;
    use crate::storage::MemoryFieldStore;

    #[test]
    fn test_field_lookup() {
        let mut store = MemoryFieldStore::new();
        store.add_record(4, "2004-01-01", "2004-01-01");
        store
            .add_field(4, StoredField::new("245__", 'a', "A Title", 1))
            .unwrap();

        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 4);

        assert_eq!(ctx.field("245__a").unwrap().as_deref(), Some("A Title"));
        assert_eq!(ctx.field("245__b").unwrap(), None);
    }

    #[test]
    fn test_malformed_selector() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 4);
        assert!(ctx.field("not a tag").is_err());
    }

    #[test]
    fn test_closure_access_policy() {
        let allow_admins = |uid: u32, action: &str| uid == 1 && action == ACTION_EDIT_RECORDS;
        assert!(allow_admins.authorize(1, ACTION_EDIT_RECORDS));
        assert!(!allow_admins.authorize(2, ACTION_EDIT_RECORDS));
        assert!(!allow_admins.authorize(1, "delete-records"));
    }
}
