//! Query keys identifying one fetched page of notes.

use crate::note::FetchNotesParams;
use crate::tag::NoteTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache namespace every notes listing lives under.
pub const NOTES_NAMESPACE: &str = "notes";

/// Composite key (search, page, tag) for one page of notes.
///
/// Equal keys identify identical results. Pages are 1-based; a zero page is
/// clamped to 1 on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub search: String,
    pub page: u32,
    pub tag: Option<NoteTag>,
}

impl QueryKey {
    pub fn new(search: impl Into<String>, page: u32, tag: Option<NoteTag>) -> Self {
        Self {
            search: search.into(),
            page: page.max(1),
            tag,
        }
    }

    /// Key of the first page with no search text.
    pub fn first_page(tag: Option<NoteTag>) -> Self {
        Self::new(String::new(), 1, tag)
    }

    pub fn namespace(&self) -> &'static str {
        NOTES_NAMESPACE
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self::new(self.search.clone(), page, self.tag)
    }

    /// Request parameters for this key. Empty search text is omitted.
    pub fn to_params(&self, per_page: u32) -> FetchNotesParams {
        FetchNotesParams {
            search: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
            page: self.page,
            per_page,
            tag: self.tag,
        }
    }
}

impl Default for QueryKey {
    fn default() -> Self {
        Self::first_page(None)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag.map(|t| t.as_str()).unwrap_or("*");
        write!(
            f,
            "{}[{:?}, {}, {}]",
            NOTES_NAMESPACE, self.search, self.page, tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &QueryKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_default_key() {
        let key = QueryKey::default();
        assert_eq!(key.search, "");
        assert_eq!(key.page, 1);
        assert_eq!(key.tag, None);
        assert_eq!(key.namespace(), "notes");
    }

    #[test]
    fn test_zero_page_clamped() {
        assert_eq!(QueryKey::new("x", 0, None).page, 1);
    }

    #[test]
    fn test_params_from_key() {
        let params = QueryKey::new("milk", 3, Some(NoteTag::Shopping)).to_params(12);
        assert_eq!(params.search.as_deref(), Some("milk"));
        assert_eq!(params.page, 3);
        assert_eq!(params.per_page, 12);
        assert_eq!(params.tag, Some(NoteTag::Shopping));

        let params = QueryKey::default().to_params(12);
        assert_eq!(params.search, None);
    }

    #[test]
    fn test_display() {
        let key = QueryKey::new("a", 2, Some(NoteTag::Work));
        assert_eq!(key.to_string(), "notes[\"a\", 2, Work]");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_tag() -> impl Strategy<Value = Option<NoteTag>> {
            prop_oneof![
                Just(None),
                proptest::sample::select(NoteTag::ALL.to_vec()).prop_map(Some),
            ]
        }

        proptest! {
            #[test]
            fn prop_key_is_deterministic(search in ".{0,40}", page in 1u32..1000, tag in arb_tag()) {
                let a = QueryKey::new(search.clone(), page, tag);
                let b = QueryKey::new(search, page, tag);
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(hash_of(&a), hash_of(&b));
                prop_assert_eq!(a.to_string(), b.to_string());
            }

            #[test]
            fn prop_different_page_different_key(search in ".{0,20}", page in 1u32..1000, tag in arb_tag()) {
                let a = QueryKey::new(search, page, tag);
                prop_assert_ne!(a.clone(), a.with_page(page + 1));
            }
        }
    }
}
