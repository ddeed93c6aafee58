//! Backend traits: the seam between demo decoders and the analyzer.

use std::io::BufRead;

use crate::error::DemoResult;
use crate::event::DemoEvent;

/// Receives decoded events in stream order.
pub trait EventSink {
    /// Handle the next event.
    fn accept(&mut self, event: &DemoEvent);
}

impl<F: FnMut(&DemoEvent)> EventSink for F {
    fn accept(&mut self, event: &DemoEvent) {
        self(event);
    }
}

/// A decoding session over one demo stream.
///
/// A session is driven to completion exactly once. Implementations must
/// deliver a final [`DemoEvent::StreamEnd`] even when the stream itself
/// carries no explicit terminator.
pub trait DemoSession {
    /// Decode the whole stream, delivering every event to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream cannot be read or decoded; events
    /// delivered before the failure stand.
    fn run(&mut self, sink: &mut dyn EventSink) -> DemoResult<()>;
}

/// Factory for decoding sessions.
pub trait DemoBackend: Send + Sync {
    /// Open a session over a buffered byte stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream is not something this backend can
    /// decode.
    fn open(&self, reader: Box<dyn BufRead + Send>) -> DemoResult<Box<dyn DemoSession + Send>>;
}
