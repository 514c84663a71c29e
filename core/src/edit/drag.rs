use crate::edit::session::EditSession;
use crate::DataPoint;

/// One in-flight drag gesture over a session point.
///
/// The lifecycle is encoded in ownership: `begin` captures the pre-drag
/// origin, `update` feeds throttled intermediate positions through
/// [`EditSession::update_in_place`], and exactly one of `commit` or
/// `cancel` consumes the gesture. Commit pushes a single undo entry
/// holding the origin, so one user-visible drag is one undo step no
/// matter how many intermediate frames ran. Cancel (pointer left the
/// surface) restores the origin and touches no undo state.
#[derive(Debug)]
pub struct DragGesture {
    index: usize,
    origin: DataPoint,
}

impl DragGesture {
    /// Starts a gesture on the hit-tested point; `None` if the index is
    /// out of range.
    pub fn begin(session: &EditSession, index: usize) -> Option<Self> {
        let origin = *session.points().get(index)?;
        Some(Self { index, origin })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn origin(&self) -> DataPoint {
        self.origin
    }

    /// Intermediate visual update; the candidate is clamped to the
    /// calibrated axis ranges before being applied.
    pub fn update(&self, session: &mut EditSession, candidate_x: f64, candidate_y: f64) {
        let (x, y) = session.clamp_to_axes(candidate_x, candidate_y);
        session.update_in_place(self.index, DataPoint::new(x, y));
    }

    /// Release: clamp the final candidate and commit one undoable move.
    pub fn commit(self, session: &mut EditSession, candidate_x: f64, candidate_y: f64) {
        let (x, y) = session.clamp_to_axes(candidate_x, candidate_y);
        session.commit_move(self.index, self.origin, x, y);
    }

    /// Aborts the gesture, restoring the pre-drag position.
    pub fn cancel(self, session: &mut EditSession) {
        session.update_in_place(self.index, self.origin);
    }
}
