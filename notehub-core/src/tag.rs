//! Note tags and tag filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel tag parameter meaning "show every tag".
pub const ALL_TAGS_PARAM: &str = "All";

/// Fixed tag set a note can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// Every tag, in the order the form and the filter tabs present them.
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];

    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteTag::Todo => "Todo",
            NoteTag::Work => "Work",
            NoteTag::Personal => "Personal",
            NoteTag::Meeting => "Meeting",
            NoteTag::Shopping => "Shopping",
        }
    }

    /// Parse a tag, ignoring case.
    pub fn parse_loose(s: &str) -> Result<Self, TagParseError> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(NoteTag::Todo),
            "work" => Ok(NoteTag::Work),
            "personal" => Ok(NoteTag::Personal),
            "meeting" => Ok(NoteTag::Meeting),
            "shopping" => Ok(NoteTag::Shopping),
            _ => Err(TagParseError(s.to_string())),
        }
    }

    /// Position in [`NoteTag::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> NoteTag {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> NoteTag {
        let idx = self.index();
        let prev = if idx == 0 { Self::ALL.len() - 1 } else { idx - 1 };
        Self::ALL[prev]
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s)
    }
}

/// Error when parsing an invalid tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParseError(pub String);

impl fmt::Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid note tag: {}", self.0)
    }
}

impl std::error::Error for TagParseError {}

/// Normalize a raw tag parameter taken from the launch context.
///
/// Absent, empty, or "all" in any case means no filter. Any other value is
/// case-folded to first letter upper, remainder lower.
pub fn normalize_tag(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;
    if raw.eq_ignore_ascii_case(ALL_TAGS_PARAM) {
        return None;
    }
    let mut chars = raw.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    )
}

/// Tag filter applied to the notes listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(NoteTag),
}

impl TagFilter {
    /// Build a filter from a raw, unnormalized tag parameter.
    pub fn from_param(raw: Option<&str>) -> Result<Self, TagParseError> {
        match normalize_tag(raw) {
            None => Ok(TagFilter::All),
            Some(normalized) => Ok(TagFilter::Only(normalized.parse()?)),
        }
    }

    pub fn tag(&self) -> Option<NoteTag> {
        match self {
            TagFilter::All => None,
            TagFilter::Only(tag) => Some(*tag),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TagFilter::All => ALL_TAGS_PARAM,
            TagFilter::Only(tag) => tag.as_str(),
        }
    }
}

impl From<Option<NoteTag>> for TagFilter {
    fn from(tag: Option<NoteTag>) -> Self {
        tag.map_or(TagFilter::All, TagFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absent_and_all() {
        assert_eq!(normalize_tag(None), None);
        assert_eq!(normalize_tag(Some("")), None);
        assert_eq!(normalize_tag(Some("All")), None);
        assert_eq!(normalize_tag(Some("all")), None);
        assert_eq!(normalize_tag(Some("ALL")), None);
    }

    #[test]
    fn test_normalize_case_folds() {
        assert_eq!(normalize_tag(Some("work")).as_deref(), Some("Work"));
        assert_eq!(normalize_tag(Some("sHOPPING")).as_deref(), Some("Shopping"));
        assert_eq!(normalize_tag(Some("x")).as_deref(), Some("X"));
    }

    #[test]
    fn test_filter_from_param() {
        assert_eq!(TagFilter::from_param(None), Ok(TagFilter::All));
        assert_eq!(
            TagFilter::from_param(Some("meeting")),
            Ok(TagFilter::Only(NoteTag::Meeting))
        );
        assert_eq!(
            TagFilter::from_param(Some("groceries")),
            Err(TagParseError("Groceries".to_string()))
        );
    }

    #[test]
    fn test_tag_display_roundtrip() {
        for tag in NoteTag::ALL {
            assert_eq!(tag.to_string().parse::<NoteTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_tag_serde_uses_canonical_spelling() {
        let json = serde_json::to_string(&NoteTag::Shopping).unwrap();
        assert_eq!(json, "\"Shopping\"");
    }

    #[test]
    fn test_tag_cycle_wraps() {
        assert_eq!(NoteTag::Shopping.next(), NoteTag::Todo);
        assert_eq!(NoteTag::Todo.previous(), NoteTag::Shopping);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_normalized_tag_is_capitalized(raw in "[a-zA-Z]{1,12}") {
            prop_assume!(!raw.eq_ignore_ascii_case("all"));
            let normalized = normalize_tag(Some(&raw)).unwrap();
            let mut chars = normalized.chars();
            let first = chars.next().unwrap();
            prop_assert!(first.is_uppercase());
            prop_assert!(chars.all(|c| c.is_lowercase()));
            prop_assert_eq!(normalized.to_lowercase(), raw.to_lowercase());
        }

        #[test]
        fn prop_all_in_any_case_is_no_filter(mask in proptest::collection::vec(any::<bool>(), 3)) {
            let raw: String = "all"
                .chars()
                .zip(mask)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(normalize_tag(Some(&raw)), None);
            prop_assert_eq!(TagFilter::from_param(Some(&raw)), Ok(TagFilter::All));
        }
    }
}
