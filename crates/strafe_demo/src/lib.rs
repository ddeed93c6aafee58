//! STRAFE Demo Decoding Seam
//!
//! Demo binaries are decoded by external replay libraries; this crate owns
//! the boundary. Backends translate whatever a decoder natively emits into
//! a closed event vocabulary, and the rest of the workspace only ever sees
//! [`DemoEvent`] values delivered in stream order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod bridge;
pub mod error;
pub mod event;
pub mod journal;

pub use backend::{DemoBackend, DemoSession, EventSink};
pub use bridge::{CallbackBridge, EntityHandle};
pub use error::{DemoError, DemoResult};
pub use event::DemoEvent;
pub use journal::{JournalBackend, JournalSession, JournalWriter};
