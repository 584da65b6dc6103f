//! Focus, paging, and tag filter navigation.

use notehub_core::{NoteTag, TagFilter};

/// Where browse-mode keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Notes,
    Search,
}

/// Filter tabs in display order.
pub const TAG_FILTERS: [TagFilter; 6] = [
    TagFilter::All,
    TagFilter::Only(NoteTag::Todo),
    TagFilter::Only(NoteTag::Work),
    TagFilter::Only(NoteTag::Personal),
    TagFilter::Only(NoteTag::Meeting),
    TagFilter::Only(NoteTag::Shopping),
];

pub fn filter_index(filter: TagFilter) -> usize {
    TAG_FILTERS
        .iter()
        .position(|f| *f == filter)
        .unwrap_or(0)
}

pub fn next_filter(filter: TagFilter) -> TagFilter {
    TAG_FILTERS[(filter_index(filter) + 1) % TAG_FILTERS.len()]
}

pub fn previous_filter(filter: TagFilter) -> TagFilter {
    let idx = filter_index(filter);
    let prev = if idx == 0 { TAG_FILTERS.len() - 1 } else { idx - 1 };
    TAG_FILTERS[prev]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Previous,
    Next,
    Last,
}

impl PageMove {
    /// Target page for this move, within `1..=total`.
    pub fn apply(&self, current: u32, total: u32) -> u32 {
        let last = total.max(1);
        let target = match self {
            PageMove::First => 1,
            PageMove::Previous => current.saturating_sub(1),
            PageMove::Next => current.saturating_add(1),
            PageMove::Last => last,
        };
        target.clamp(1, last)
    }
}
