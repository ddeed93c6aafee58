//! JSON-lines demo journal: the bundled reference backend.
//!
//! A journal is a text file with one serde_json-encoded [`DemoEvent`] per
//! line. It is what the test-suite and the CLI run against out of the box;
//! real demo decoders integrate by implementing [`DemoBackend`] themselves,
//! usually on top of [`crate::CallbackBridge`].

use std::io::{BufRead, Write};

use crate::backend::{DemoBackend, DemoSession, EventSink};
use crate::error::{DemoError, DemoResult};
use crate::event::DemoEvent;

use strafe_core::Tick;

/// Backend that decodes JSON-lines journals.
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalBackend;

impl JournalBackend {
    /// Create the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DemoBackend for JournalBackend {
    fn open(&self, reader: Box<dyn BufRead + Send>) -> DemoResult<Box<dyn DemoSession + Send>> {
        Ok(Box::new(JournalSession {
            reader,
            line: 0,
            last_tick: Tick::zero(),
            ended: false,
        }))
    }
}

/// Decoding session over one journal stream.
pub struct JournalSession {
    reader: Box<dyn BufRead + Send>,
    line: usize,
    last_tick: Tick,
    ended: bool,
}

impl DemoSession for JournalSession {
    fn run(&mut self, sink: &mut dyn EventSink) -> DemoResult<()> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;
            let text = buf.trim();
            if text.is_empty() {
                continue;
            }
            let event: DemoEvent = serde_json::from_str(text).map_err(|source| {
                DemoError::MalformedEvent {
                    line: self.line,
                    source,
                }
            })?;
            if let Some(tick) = event.tick() {
                self.last_tick = tick;
            }
            if matches!(event, DemoEvent::StreamEnd { .. }) {
                self.ended = true;
            }
            sink.accept(&event);
        }
        // Journals are not required to carry their own terminator.
        if !self.ended {
            self.ended = true;
            sink.accept(&DemoEvent::StreamEnd {
                tick: self.last_tick,
            });
        }
        Ok(())
    }
}

/// Writes events back out as a journal.
pub struct JournalWriter<W: Write> {
    inner: W,
}

impl<W: Write> JournalWriter<W> {
    /// Wrap a writer.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Append one event as a line.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding or the underlying write fails.
    pub fn write(&mut self, event: &DemoEvent) -> DemoResult<()> {
        serde_json::to_writer(&mut self.inner, event).map_err(DemoError::Encode)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and hand the writer back.
    ///
    /// # Errors
    ///
    /// Returns an error when the flush fails.
    pub fn finish(mut self) -> DemoResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
