//! Single-flight conversion session.
//!
//! At most one conversion runs at a time. A request accepted while idle is
//! handed to a background task; the session returns to idle before the
//! outcome is delivered, so the receiver can resubmit immediately.

pub mod session;
pub mod state;

pub use session::ConversionSession;
pub use state::{SessionState, StateGate};
