//! Snapshot history for the artboard

use tracing::{debug, warn};

use crate::context::PaintContext;
use crate::history::SnapshotTarget;

use super::Artboard;

impl<C: PaintContext + SnapshotTarget> Artboard<C> {
    /// Record the current surface; failures are logged and skipped
    pub(crate) fn record_snapshot(&mut self) -> bool {
        let (Some(history), Some(ctx)) = (self.history.as_mut(), self.context.as_ref()) else {
            return false;
        };
        match history.push_state(ctx) {
            Ok(()) => true,
            Err(e) => {
                warn!("Snapshot skipped: {}", e);
                false
            }
        }
    }

    /// Restore the previous snapshot
    ///
    /// Returns true if an undo was performed. Refused while a stroke is in
    /// progress.
    pub fn undo(&mut self) -> bool {
        if self.drawing {
            debug!("undo: refused while drawing");
            return false;
        }
        let (Some(history), Some(ctx)) = (self.history.as_mut(), self.context.as_mut()) else {
            return false;
        };
        match history.undo(ctx) {
            Ok(()) => true,
            Err(e) => {
                debug!("undo: {}", e);
                false
            }
        }
    }

    /// Restore the next snapshot after an undo
    pub fn redo(&mut self) -> bool {
        if self.drawing {
            debug!("redo: refused while drawing");
            return false;
        }
        let (Some(history), Some(ctx)) = (self.history.as_mut(), self.context.as_mut()) else {
            return false;
        };
        match history.redo(ctx) {
            Ok(()) => true,
            Err(e) => {
                debug!("redo: {}", e);
                false
            }
        }
    }

    /// False while drawing so hosts can grey out the control
    pub fn can_undo(&self) -> bool {
        !self.drawing && self.history.as_ref().is_some_and(|h| h.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        !self.drawing && self.history.as_ref().is_some_and(|h| h.can_redo())
    }

    /// Forget every snapshot, then record the current surface as the new
    /// starting point
    pub fn clear_history(&mut self) -> bool {
        if self.drawing {
            return false;
        }
        let Some(history) = self.history.as_mut() else {
            return false;
        };
        history.clear();
        self.record_snapshot()
    }
}
