//! Whole-surface snapshot history with undo/redo
//!
//! The history is an ordered list of immutable encoded snapshots plus a
//! cursor counting how many steps back from the newest entry the surface
//! currently shows. Pushing while the cursor is non-zero discards the redo
//! tail: there is no branching, a new write replaces the undone future.
//!
//! Operations are synchronous and take the snapshot target explicitly, so
//! the surface stays owned by whoever paints on it. Callers must not push,
//! undo, or redo while a stroke is in progress.

mod error;

use std::sync::Arc;

use tracing::{debug, error, warn};

pub use error::{HistoryError, SnapshotError};

/// A surface that can be captured to bytes and restored from them
pub trait SnapshotTarget {
    /// Encode the full surface
    fn capture(&self) -> Result<Vec<u8>, SnapshotError>;

    /// Replace the surface contents (and size) with a captured snapshot
    fn restore(&mut self, snapshot: &[u8]) -> Result<(), SnapshotError>;

    /// Current surface size in pixels
    fn dimensions(&self) -> (u32, u32);
}

/// One immutable encoded snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    data: Arc<[u8]>,
}

impl HistoryEntry {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Snapshot stack with a cursor
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Steps back from the newest entry; always < entries.len() when non-empty
    cursor: usize,
    max_depth: Option<usize>,
    /// Size of the attached surface, None until `attach`
    attached: Option<(u32, u32)>,
}

impl History {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// History that evicts its oldest entries beyond `max_depth`
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.map(|d| d.max(1)),
            ..Self::default()
        }
    }

    /// Bind the history to a surface; required before the first push
    pub fn attach(&mut self, target: &(impl SnapshotTarget + ?Sized)) {
        let size = target.dimensions();
        debug!("History attached to {}x{} surface", size.0, size.1);
        self.attached = Some(size);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Capture the target and make it the newest entry
    ///
    /// Any undone entries are discarded first. A failed capture leaves the
    /// stack untouched.
    pub fn push_state(&mut self, target: &(impl SnapshotTarget + ?Sized)) -> Result<(), HistoryError> {
        if self.attached.is_none() {
            error!("push_state: history not initialised");
            return Err(HistoryError::NotInitialized);
        }

        let data = match target.capture() {
            Ok(data) if !data.is_empty() => data,
            Ok(_) => {
                warn!("push_state: capture produced no data, skipping");
                return Err(HistoryError::EncodeFailure);
            }
            Err(e) => {
                warn!("push_state: capture failed ({}), skipping", e);
                return Err(HistoryError::EncodeFailure);
            }
        };

        if self.cursor != 0 {
            let keep = self.entries.len() - self.cursor;
            debug!("push_state: discarding {} redo entries", self.cursor);
            self.entries.truncate(keep);
            self.cursor = 0;
        }

        self.entries.push(HistoryEntry::new(data));
        self.attached = Some(target.dimensions());

        if let Some(max) = self.max_depth {
            if self.entries.len() > max {
                let excess = self.entries.len() - max;
                self.entries.drain(..excess);
                debug!("push_state: evicted {} oldest entries", excess);
            }
        }

        debug!(
            "push_state: {} entries ({} bytes newest)",
            self.entries.len(),
            self.entries.last().map(HistoryEntry::len).unwrap_or(0)
        );
        Ok(())
    }

    /// Step one entry older and restore it onto the target
    pub fn undo(&mut self, target: &mut (impl SnapshotTarget + ?Sized)) -> Result<(), HistoryError> {
        if self.attached.is_none() {
            error!("undo: history not initialised");
            return Err(HistoryError::NotInitialized);
        }
        if !self.can_undo() {
            debug!("undo: already at oldest entry");
            return Err(HistoryError::NoOlderState);
        }

        let index = self.entries.len() - self.cursor - 2;
        target.restore(self.entries[index].bytes())?;
        self.cursor += 1;
        self.attached = Some(target.dimensions());
        debug!("undo: cursor now {} of {}", self.cursor, self.entries.len());
        Ok(())
    }

    /// Step one entry newer and restore it onto the target
    pub fn redo(&mut self, target: &mut (impl SnapshotTarget + ?Sized)) -> Result<(), HistoryError> {
        if self.attached.is_none() {
            error!("redo: history not initialised");
            return Err(HistoryError::NotInitialized);
        }
        if !self.can_redo() {
            debug!("redo: already at newest entry");
            return Err(HistoryError::NoNewerState);
        }

        let index = self.entries.len() - self.cursor;
        target.restore(self.entries[index].bytes())?;
        self.cursor -= 1;
        self.attached = Some(target.dimensions());
        debug!("redo: cursor now {} of {}", self.cursor, self.entries.len());
        Ok(())
    }

    /// More than one entry and not already viewing the oldest
    pub fn can_undo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor > 0
    }

    /// Drop every entry; the attachment is kept
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The entry the surface currently shows
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.len().checked_sub(self.cursor + 1).map(|i| &self.entries[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface stand-in whose whole content is a label
    #[derive(Debug, Default)]
    struct Board {
        content: String,
        fail_capture: bool,
    }

    impl Board {
        fn showing(content: &str) -> Self {
            Self {
                content: content.to_string(),
                fail_capture: false,
            }
        }
    }

    impl SnapshotTarget for Board {
        fn capture(&self) -> Result<Vec<u8>, SnapshotError> {
            if self.fail_capture {
                return Err(SnapshotError::Encode("no canvas".to_string()));
            }
            Ok(self.content.as_bytes().to_vec())
        }

        fn restore(&mut self, snapshot: &[u8]) -> Result<(), SnapshotError> {
            self.content = String::from_utf8(snapshot.to_vec())
                .map_err(|e| SnapshotError::Decode(e.to_string()))?;
            Ok(())
        }

        fn dimensions(&self) -> (u32, u32) {
            (1, 1)
        }
    }

    fn push(history: &mut History, board: &mut Board, content: &str) {
        board.content = content.to_string();
        history.push_state(&*board).unwrap();
    }

    #[test]
    fn test_push_before_attach_fails() {
        let mut history = History::new();
        let board = Board::showing("S1");
        assert!(matches!(history.push_state(&board), Err(HistoryError::NotInitialized)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_redo_before_attach_fails() {
        let mut history = History::new();
        let mut board = Board::default();
        assert!(matches!(history.undo(&mut board), Err(HistoryError::NotInitialized)));
        assert!(matches!(history.redo(&mut board), Err(HistoryError::NotInitialized)));
    }

    #[test]
    fn test_can_undo_after_pushes() {
        let mut history = History::new();
        let mut board = Board::default();
        history.attach(&board);

        push(&mut history, &mut board, "S1");
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        push(&mut history, &mut board, "S2");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_undo_redo_then_push_discards_tail() {
        let mut history = History::new();
        let mut board = Board::default();
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        push(&mut history, &mut board, "S2");
        push(&mut history, &mut board, "S3");

        history.undo(&mut board).unwrap();
        history.undo(&mut board).unwrap();
        assert_eq!(board.content, "S1");
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo(&mut board).unwrap();
        assert_eq!(board.content, "S2");
        assert_eq!(history.cursor(), 1);

        push(&mut history, &mut board, "S4");
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 0);
        assert!(matches!(history.redo(&mut board), Err(HistoryError::NoNewerState)));

        // S3 is gone: walking back goes S4 -> S2 -> S1
        history.undo(&mut board).unwrap();
        assert_eq!(board.content, "S2");
        history.undo(&mut board).unwrap();
        assert_eq!(board.content, "S1");
    }

    #[test]
    fn test_undo_at_oldest_fails() {
        let mut history = History::new();
        let mut board = Board::default();
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        assert!(matches!(history.undo(&mut board), Err(HistoryError::NoOlderState)));
        assert_eq!(board.content, "S1");
    }

    #[test]
    fn test_failed_capture_leaves_stack_intact() {
        let mut history = History::new();
        let mut board = Board::default();
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        push(&mut history, &mut board, "S2");
        history.undo(&mut board).unwrap();

        board.fail_capture = true;
        assert!(matches!(history.push_state(&board), Err(HistoryError::EncodeFailure)));
        // The redo tail survives a failed push
        assert_eq!(history.len(), 2);
        assert!(history.can_redo());
    }

    #[test]
    fn test_empty_capture_is_encode_failure() {
        let mut history = History::new();
        let board = Board::showing("");
        history.attach(&board);
        assert!(matches!(history.push_state(&board), Err(HistoryError::EncodeFailure)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let mut history = History::with_max_depth(Some(2));
        let mut board = Board::default();
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        push(&mut history, &mut board, "S2");
        push(&mut history, &mut board, "S3");

        assert_eq!(history.len(), 2);
        history.undo(&mut board).unwrap();
        assert_eq!(board.content, "S2");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_current_entry_follows_cursor() {
        let mut history = History::new();
        let mut board = Board::default();
        assert!(history.current().is_none());
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        push(&mut history, &mut board, "S2");
        assert_eq!(history.current().unwrap().bytes(), b"S2");
        history.undo(&mut board).unwrap();
        assert_eq!(history.current().unwrap().bytes(), b"S1");
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        let mut board = Board::default();
        history.attach(&board);
        push(&mut history, &mut board, "S1");
        push(&mut history, &mut board, "S2");
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(history.is_attached());
    }
}
