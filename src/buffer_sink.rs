use crate::sink::Sink;
use std::io;
use std::sync::Mutex;

/// A sink that accumulates lines in memory.
///
/// Useful for unit tests that assert on the exact serialized output,
/// and for callers that want to capture log lines instead of writing
/// them to a stream.
#[derive(Default)]
pub struct BufferSink {
    buf: Mutex<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, newlines included.
    pub fn contents(&self) -> String {
        self.buf.lock().expect("buffer sink lock poisoned").clone()
    }

    /// Discard accumulated output.
    pub fn clear(&self) {
        self.buf.lock().expect("buffer sink lock poisoned").clear();
    }
}

impl Sink for BufferSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = self.buf.lock().expect("buffer sink lock poisoned");
        buf.push_str(line);
        buf.push('\n');
        Ok(())
    }
}
