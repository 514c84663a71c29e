pub mod drag;
pub mod session;
mod undo;

pub use drag::DragGesture;
pub use session::EditSession;
