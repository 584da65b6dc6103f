//! Namespace watermarks used for invalidation.
//!
//! Each namespace carries a monotonically increasing watermark. Entries
//! remember the watermark current when they were cached; an entry is
//! invalidated once its namespace watermark has moved past it.

use std::collections::HashMap;

/// Position in a namespace's invalidation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Watermark(u64);

impl Watermark {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }

    fn advanced(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Current watermark for every namespace that has been invalidated.
#[derive(Debug, Clone, Default)]
pub struct NamespaceJournal {
    marks: HashMap<String, Watermark>,
}

impl NamespaceJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current watermark for a namespace. Namespaces never invalidated are at zero.
    pub fn current(&self, namespace: &str) -> Watermark {
        self.marks.get(namespace).copied().unwrap_or_default()
    }

    /// Move a namespace past every entry cached so far.
    pub fn advance(&mut self, namespace: &str) -> Watermark {
        let next = self.current(namespace).advanced();
        self.marks.insert(namespace.to_string(), next);
        next
    }

    /// Whether an entry stamped with `mark` predates the namespace's last invalidation.
    pub fn is_invalidated(&self, namespace: &str, mark: Watermark) -> bool {
        mark < self.current(namespace)
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_namespace_is_zero() {
        let journal = NamespaceJournal::new();
        assert_eq!(journal.current("notes"), Watermark::zero());
        assert!(!journal.is_invalidated("notes", Watermark::zero()));
    }

    #[test]
    fn test_advance_invalidates_older_marks() {
        let mut journal = NamespaceJournal::new();
        let before = journal.current("notes");
        let after = journal.advance("notes");
        assert_eq!(after.sequence(), 1);
        assert!(journal.is_invalidated("notes", before));
        assert!(!journal.is_invalidated("notes", after));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut journal = NamespaceJournal::new();
        journal.advance("notes");
        assert!(!journal.is_invalidated("tags", Watermark::zero()));
    }
}
