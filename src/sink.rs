use std::io::{self, Write};

/// Synchronous destination for serialized log lines.
///
/// Implementations receive one complete JSON object per call and are
/// responsible for appending the trailing newline atomically with the
/// line itself. The logger never opens or closes the underlying
/// resource; it only writes to the handle it was given.
///
/// Implementations must be internally synchronized: the same sink is
/// shared by every logger derived from a common root, and `write_line`
/// takes `&self`.
pub trait Sink: Send + Sync {
    /// Write a single serialized log line, followed by a newline.
    ///
    /// Blocking is acceptable; callers needing non-blocking behavior
    /// must buffer externally.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Flush any buffered output, if the destination buffers.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Default sink writing to the process's standard output stream.
///
/// `std::io::Stdout` is internally locked, so writing the line and its
/// newline under one lock keeps concurrent log lines intact.
#[derive(Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}
