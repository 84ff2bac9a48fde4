use crate::caller::{self, CallSite};
use crate::config::Config;
use crate::payload::{Context, Fields, Payload, ServiceContext};
use crate::severity::Severity;
use crate::sink::{Sink, StdoutSink};
use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::panic::Location;
use std::process;
use std::sync::Arc;

/// Structured logger emitting one JSON object per call.
///
/// A `Logger` is a value: it holds the service identity and severity
/// threshold fixed at construction, an exclusively-owned context map,
/// and a shared handle to the output sink. [`with_context`] and
/// [`with_output`] return new values and never mutate the receiver, so
/// loggers derived from a common root branch independently and can be
/// used from concurrent call sites without synchronization.
///
/// Emission never returns an error and never panics: serialization or
/// write failures degrade to a diagnostic on stderr. The only
/// process-ending path is [`fatal`]/[`fatalf`], which is explicit in
/// its `-> !` signature.
///
/// [`with_context`]: Logger::with_context
/// [`with_output`]: Logger::with_output
/// [`fatal`]: Logger::fatal
/// [`fatalf`]: Logger::fatalf
#[derive(Clone)]
pub struct Logger {
    service_context: Option<ServiceContext>,
    threshold: Severity,
    context: Fields,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Create a root logger from an explicit configuration.
    ///
    /// The `serviceContext` is attached only when the configuration
    /// carries both a service name and a version. Context starts empty
    /// and output goes to stdout until redirected with
    /// [`with_output`](Logger::with_output).
    pub fn new(config: Config) -> Self {
        let service_context = match (config.service, config.version) {
            (Some(service), Some(version)) => Some(ServiceContext { service, version }),
            _ => None,
        };

        Logger {
            service_context,
            threshold: config.threshold,
            context: Fields::new(),
            sink: Arc::new(StdoutSink),
        }
    }

    /// Create a root logger configured from the process environment.
    ///
    /// Equivalent to `Logger::new(Config::from_env())`.
    pub fn from_env() -> Self {
        Logger::new(Config::from_env())
    }

    /// Create a root logger with an explicit identity and the
    /// threshold resolved from `LOG_LEVEL`.
    pub fn create(service: impl Into<String>, version: impl Into<String>) -> Self {
        Logger::new(
            Config::default()
                .with_threshold(crate::config::threshold_from_env())
                .with_service(service, version),
        )
    }

    /// Derive a logger whose context is this logger's context merged
    /// with `fields`, new values winning on key collision.
    ///
    /// The receiver keeps its own context map untouched; sibling
    /// loggers derived from the same parent never observe each other's
    /// fields.
    pub fn with_context(&self, fields: Fields) -> Self {
        let mut context = self.context.clone();
        context.extend(fields);

        Logger { context, ..self.clone() }
    }

    /// Derive a logger writing to a different sink.
    ///
    /// Affects only where serialized lines go; payload content is
    /// unchanged.
    pub fn with_output(&self, sink: Arc<dyn Sink>) -> Self {
        Logger { sink, ..self.clone() }
    }

    /// Emit a DEBUG entry.
    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(Severity::Debug, message.as_ref());
    }

    /// Emit a DEBUG entry from a format string, e.g.
    /// `log.debugf(format_args!("took {}ms", ms))`.
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Severity::Debug) {
            self.emit(Severity::Debug, &args.to_string());
        }
    }

    /// Emit an INFO entry.
    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Severity::Info, message.as_ref());
    }

    /// Emit an INFO entry from a format string.
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Severity::Info) {
            self.emit(Severity::Info, &args.to_string());
        }
    }

    /// Emit a WARN entry.
    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(Severity::Warn, message.as_ref());
    }

    /// Emit a WARN entry from a format string.
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Severity::Warn) {
            self.emit(Severity::Warn, &args.to_string());
        }
    }

    /// Emit an ERROR entry carrying the call site of this call and a
    /// stack trace of the current thread, alongside any accumulated
    /// context.
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.emit_error(Severity::Error, message.as_ref(), Location::caller());
    }

    /// Emit an ERROR entry from a format string.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Severity::Error) {
            self.emit_error(Severity::Error, &args.to_string(), Location::caller());
        }
    }

    /// Emit a CRITICAL entry on the error path, then terminate the
    /// process with exit status 1.
    ///
    /// The sink is flushed before exiting so the entry is not lost.
    /// This call never returns, whether or not emission succeeded.
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) -> ! {
        self.emit_error(Severity::Critical, message.as_ref(), Location::caller());
        self.exit()
    }

    /// Emit a CRITICAL entry from a format string, then terminate the
    /// process with exit status 1. Never returns.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_error(Severity::Critical, &args.to_string(), Location::caller());
        self.exit()
    }

    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    fn emit(&self, severity: Severity, message: &str) {
        if self.enabled(severity) {
            self.write(severity, message, None);
        }
    }

    fn emit_error(&self, severity: Severity, message: &str, location: &'static Location<'static>) {
        if self.enabled(severity) {
            self.write(severity, message, Some(caller::capture(location)));
        }
    }

    fn exit(&self) -> ! {
        if let Err(e) = self.sink.flush() {
            eprintln!("logger ERROR: cannot flush sink before exit: {}", e);
        }
        process::exit(1)
    }

    /// Build the payload for one entry, serialize it and write one
    /// line to the sink. Failures are reported on stderr and never
    /// reach the caller.
    fn write(&self, severity: Severity, message: &str, site: Option<CallSite>) {
        // The error path always gets a context object, report location
        // included, even when no fields were accumulated. Below ERROR
        // the context is omitted entirely when empty.
        let (context, stacktrace) = match site {
            Some(site) => (
                Some(Context {
                    data: self.context.clone(),
                    report_location: Some(site.location),
                }),
                Some(site.stacktrace),
            ),
            None if self.context.is_empty() => (None, None),
            None => (
                Some(Context {
                    data: self.context.clone(),
                    report_location: None,
                }),
                None,
            ),
        };

        let payload = Payload {
            severity,
            event_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message: message.to_string(),
            service_context: self.service_context.clone(),
            context,
            stacktrace,
        };

        let line = match serde_json::to_string(&payload) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("logger ERROR: cannot marshal payload: {}", e);
                return;
            }
        };

        if let Err(e) = self.sink.write_line(&line) {
            eprintln!("logger ERROR: cannot write log line: {}", e);
        }
    }
}
