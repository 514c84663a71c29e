use crate::calibrate::Calibration;
use crate::edit::undo::{UndoEntry, UndoStack, DEFAULT_UNDO_CAPACITY};
use crate::DataPoint;

/// Owns the live editable point sequence after extraction, manual entry,
/// or import, plus the bounded move-undo stack.
///
/// Only moves are undoable. Structural mutations (insert, delete, sort,
/// bulk replace) discard the whole undo stack rather than leave entries
/// whose indices point at different logical points; losing history there
/// is the simpler, safer contract.
pub struct EditSession {
    points: Vec<DataPoint>,
    calibration: Option<Calibration>,
    undo: UndoStack,
}

impl EditSession {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            points,
            calibration: None,
            undo: UndoStack::with_capacity(DEFAULT_UNDO_CAPACITY),
        }
    }

    /// Session whose drags clamp to the calibration's axis ranges.
    pub fn with_calibration(points: Vec<DataPoint>, calibration: Calibration) -> Self {
        Self {
            points,
            calibration: Some(calibration),
            undo: UndoStack::with_capacity(DEFAULT_UNDO_CAPACITY),
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Replaces the whole sequence. Structural: clears the undo stack.
    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        self.points = points;
        self.undo.clear();
    }

    /// Appends a point. Structural: clears the undo stack.
    pub fn insert_point(&mut self, point: DataPoint) {
        self.points.push(point);
        self.undo.clear();
    }

    /// Inserts the midpoint of the segment between `index` and
    /// `index + 1`, flagged as interpolated so exports can tell it apart
    /// from sampled points. Out-of-range (no right neighbor) is a silent
    /// no-op. Structural: clears the undo stack.
    pub fn insert_midpoint(&mut self, index: usize) {
        let (Some(a), Some(b)) = (
            self.points.get(index).copied(),
            self.points.get(index + 1).copied(),
        ) else {
            return;
        };
        let mut mid = DataPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        mid.interpolated = Some(true);
        self.points.insert(index + 1, mid);
        self.undo.clear();
    }

    /// Removes the point at `index`; out-of-range is a silent no-op.
    /// Structural: clears the undo stack.
    pub fn delete_point(&mut self, index: usize) {
        if index < self.points.len() {
            self.points.remove(index);
        }
        self.undo.clear();
    }

    /// Live visual feedback during a drag. Deliberately pushes no undo
    /// entry; otherwise every intermediate frame would flood the stack.
    pub fn update_in_place(&mut self, index: usize, point: DataPoint) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    /// Committed move: one undo entry capturing the current value, then
    /// the new position. For drag gestures, [`Self::commit_move`] takes
    /// the pre-drag origin instead so one gesture equals one undo step.
    pub fn move_point(&mut self, index: usize, new_x: f64, new_y: f64) {
        let Some(prev) = self.points.get(index).copied() else {
            return;
        };
        self.commit_move(index, prev, new_x, new_y);
    }

    /// Commits a move whose undo target is an explicit previous value
    /// (the position the point held before the drag began, not before
    /// the last intermediate update).
    pub fn commit_move(&mut self, index: usize, prev: DataPoint, new_x: f64, new_y: f64) {
        let Some(slot) = self.points.get_mut(index) else {
            return;
        };
        *slot = DataPoint::new(new_x, new_y);
        self.undo.push(UndoEntry { index, prev });
    }

    /// Restores the most recently moved point. Empty stack or a stale
    /// index (after a structural edit raced the stack clear) is a silent
    /// no-op; it must never panic.
    pub fn undo_last_move(&mut self) {
        if let Some(entry) = self.undo.pop() {
            if let Some(slot) = self.points.get_mut(entry.index) {
                *slot = entry.prev;
            }
        }
    }

    /// Stable sort by x. Structural: clears the undo stack.
    pub fn sort_by_x(&mut self, ascending: bool) {
        self.points.sort_by(|a, b| {
            if ascending {
                a.x.total_cmp(&b.x)
            } else {
                b.x.total_cmp(&a.x)
            }
        });
        self.undo.clear();
    }

    /// Clamps a candidate data coordinate into the calibrated axis
    /// ranges (normalized, so inverted axes clamp correctly). Without a
    /// calibration the candidate passes through untouched.
    pub fn clamp_to_axes(&self, x: f64, y: f64) -> (f64, f64) {
        match &self.calibration {
            Some(cal) => (cal.x_axis.clamp(x), cal.y_axis.clamp(y)),
            None => (x, y),
        }
    }
}
