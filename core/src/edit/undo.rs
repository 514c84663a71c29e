use crate::DataPoint;

/// One committed move: the sequence position and the value it held
/// before the move.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UndoEntry {
    pub index: usize,
    pub prev: DataPoint,
}

/// Bounded LIFO of move deltas. Oldest entries are evicted when the
/// capacity is reached; the whole stack is discarded whenever the point
/// sequence changes structurally, since stored indices would no longer
/// refer to the same logical points.
#[derive(Debug, Default)]
pub(crate) struct UndoStack {
    entries: Vec<UndoEntry>,
    capacity: usize,
}

pub(crate) const DEFAULT_UNDO_CAPACITY: usize = 64;

impl UndoStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, entry: UndoEntry) {
        if self.capacity > 0 && self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
