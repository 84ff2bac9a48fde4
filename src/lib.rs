pub mod buffer_sink;
mod caller;
pub mod config;
pub mod logger;
pub mod payload;
pub mod severity;
pub mod sink;

pub use buffer_sink::BufferSink;
pub use config::Config;
pub use logger::Logger;
pub use payload::{Context, Fields, Payload, ReportLocation, ServiceContext};
pub use severity::{ParseSeverityError, Severity};
pub use sink::{Sink, StdoutSink};
