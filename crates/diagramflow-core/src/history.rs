//! Bounded undo/redo history of canvas snapshots.

use crate::state::CanvasSnapshot;
use std::sync::Arc;

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 100;

/// Linear history of snapshots with a cursor.
///
/// Entries are immutable once pushed and shared between cloned states.
/// `index` points at the entry matching the live state; `None` means the
/// history is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Arc<CanvasSnapshot>>,
    index: Option<usize>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history holding a single starting entry.
    pub fn seeded(snapshot: CanvasSnapshot) -> Self {
        Self {
            entries: vec![Arc::new(snapshot)],
            index: Some(0),
        }
    }

    /// Record a new entry after the current one.
    ///
    /// Entries after the cursor (the redo branch) are discarded first. When
    /// the bound is exceeded the oldest entry is dropped and the cursor
    /// shifts with it. Returns true if an entry was evicted.
    pub fn push(&mut self, snapshot: CanvasSnapshot) -> bool {
        self.entries.truncate(self.index.map_or(0, |i| i + 1));
        self.entries.push(Arc::new(snapshot));

        let evicted = self.entries.len() > MAX_HISTORY;
        if evicted {
            self.entries.remove(0);
        }
        self.index = Some(self.entries.len() - 1);
        evicted
    }

    /// Step back one entry.
    /// Returns the snapshot to restore, or None at the oldest entry.
    pub fn undo(&mut self) -> Option<Arc<CanvasSnapshot>> {
        let index = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(index);
        Some(Arc::clone(&self.entries[index]))
    }

    /// Step forward one entry.
    /// Returns the snapshot to restore, or None at the newest entry.
    pub fn redo(&mut self) -> Option<Arc<CanvasSnapshot>> {
        let index = self.index.map_or(0, |i| i + 1);
        let snapshot = Arc::clone(self.entries.get(index)?);
        self.index = Some(index);
        Some(snapshot)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.entries.len()
    }

    /// Cursor position; None when empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&CanvasSnapshot> {
        self.index.map(|i| self.entries[i].as_ref())
    }

    /// Get an entry by position.
    pub fn get(&self, index: usize) -> Option<&CanvasSnapshot> {
        self.entries.get(index).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_zoom(zoom: f64) -> CanvasSnapshot {
        CanvasSnapshot {
            zoom_level: zoom,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert_eq!(history.index(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_push_moves_cursor() {
        let mut history = History::seeded(snapshot_with_zoom(1.0));
        history.push(snapshot_with_zoom(2.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), Some(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_cursor() {
        let mut history = History::seeded(snapshot_with_zoom(1.0));
        history.push(snapshot_with_zoom(2.0));

        let restored = history.undo().unwrap();
        assert!((restored.zoom_level - 1.0).abs() < f64::EPSILON);
        assert_eq!(history.index(), Some(0));
        assert!(history.undo().is_none());

        let restored = history.redo().unwrap();
        assert!((restored.zoom_level - 2.0).abs() < f64::EPSILON);
        assert!(history.redo().is_none());
        assert_eq!(history.index(), Some(1));
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::seeded(snapshot_with_zoom(1.0));
        history.push(snapshot_with_zoom(2.0));
        history.push(snapshot_with_zoom(3.0));
        history.undo();
        history.undo();

        history.push(snapshot_with_zoom(4.0));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!((history.current().unwrap().zoom_level - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_push_onto_empty_history() {
        let mut history = History::new();
        history.push(snapshot_with_zoom(2.0));
        assert_eq!(history.index(), Some(0));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut history = History::seeded(snapshot_with_zoom(0.0));
        let mut evictions = 0;
        for i in 1..=MAX_HISTORY {
            if history.push(snapshot_with_zoom(i as f64)) {
                evictions += 1;
            }
        }

        assert_eq!(evictions, 1);
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.index(), Some(MAX_HISTORY - 1));
        assert!((history.get(0).unwrap().zoom_level - 1.0).abs() < f64::EPSILON);
        assert!(
            (history.current().unwrap().zoom_level - MAX_HISTORY as f64).abs() < f64::EPSILON
        );
    }
}
