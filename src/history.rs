use std::sync::Arc;

use crate::pixel_buffer::PixelBuffer;

/// Shared, immutable snapshot of the canvas
pub type SnapshotRef = Arc<PixelBuffer>;

/// Linear undo/redo over full bitmap snapshots.
///
/// `cursor` always indexes a valid entry. Committing truncates everything
/// after the cursor, so redoable states are lost on a new action.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<SnapshotRef>,
    cursor: usize,
}

impl History {
    /// Creates a history holding only `initial`, at cursor 0
    pub fn new(initial: PixelBuffer) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            cursor: 0,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> &PixelBuffer {
        &self.snapshots[self.cursor]
    }

    /// The last stored snapshot, which may sit past the cursor
    pub fn latest(&self) -> &PixelBuffer {
        // never empty: `new` seeds one entry and nothing removes the first
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Drops everything after the cursor, appends `snapshot` and moves onto it
    pub fn commit(&mut self, snapshot: PixelBuffer) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::new(snapshot));
        self.cursor += 1;
        log::debug!("History commit: {} entries, cursor {}", self.entry_count(), self.cursor);
    }

    /// Appends `snapshot` at the tail without moving the cursor.
    ///
    /// The next `commit` truncates after the cursor and so discards it.
    pub fn park(&mut self, snapshot: PixelBuffer) {
        self.snapshots.push(Arc::new(snapshot));
    }

    /// Steps back one entry, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&PixelBuffer> {
        if !self.can_undo() {
            log::trace!("Undo ignored at first entry");
            return None;
        }
        self.cursor -= 1;
        log::debug!("Undo to entry {}", self.cursor);
        Some(self.current())
    }

    /// Steps forward one entry, returning the snapshot to restore
    pub fn redo(&mut self) -> Option<&PixelBuffer> {
        if !self.can_redo() {
            log::trace!("Redo ignored at last entry");
            return None;
        }
        self.cursor += 1;
        log::debug!("Redo to entry {}", self.cursor);
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
