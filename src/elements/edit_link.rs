//! Edit-link element.
//!
//! Renders a link to the record editor's admin page when the context carries
//! a logged-in user authorized for the record-edit action. Everyone else
//! gets an empty fragment, so templates can include the element
//! unconditionally.

use crate::elements::{AccessPolicy, ElementContext, ACTION_EDIT_RECORDS};
use crate::storage::FieldStore;

/// Render an edit link for the context's record.
///
/// `style` is injected as a CSS `style` attribute when non-empty. Returns an
/// empty string when no user is logged in or the policy denies the
/// record-edit action.
pub fn edit_link<S: FieldStore, P: AccessPolicy>(
    ctx: &ElementContext<'_, S>,
    policy: &P,
    style: &str,
) -> String {
    let Some(uid) = ctx.uid else {
        return String::new();
    };
    if !policy.authorize(uid, ACTION_EDIT_RECORDS) {
        return String::new();
    }

    let style_attr = if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{style}\"")
    };

    format!(
        "<a href=\"{}/admin/record/edit?recid={}\"{}>Edit This Record</a>",
        ctx.config.base_url, ctx.record_id, style_attr
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatConfig;
    use crate::storage::MemoryFieldStore;

    fn allow_all(_uid: u32, _action: &str) -> bool {
        true
    }

    fn deny_all(_uid: u32, _action: &str) -> bool {
        false
    }

    #[test]
    fn test_authorized_user_gets_link() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default().with_base_url("https://repo.example.org");
        let ctx = ElementContext::new(&store, &config, 123).with_uid(7);

        let out = edit_link(&ctx, &allow_all, "");
        assert_eq!(
            out,
            "<a href=\"https://repo.example.org/admin/record/edit?recid=123\">Edit This Record</a>"
        );
    }

    #[test]
    fn test_style_attribute() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 1).with_uid(7);

        let out = edit_link(&ctx, &allow_all, "color: red");
        assert!(out.contains(" style=\"color: red\">"));
    }

    #[test]
    fn test_unauthorized_user_gets_nothing() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 1).with_uid(7);

        assert_eq!(edit_link(&ctx, &deny_all, ""), "");
    }

    #[test]
    fn test_anonymous_user_gets_nothing() {
        let store = MemoryFieldStore::new();
        let config = FormatConfig::default();
        let ctx = ElementContext::new(&store, &config, 1);

        assert_eq!(edit_link(&ctx, &allow_all, ""), "");
    }
}
