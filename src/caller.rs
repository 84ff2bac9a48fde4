use crate::payload::ReportLocation;
use std::backtrace::Backtrace;
use std::panic::Location;

/// Call-site metadata for an ERROR/CRITICAL entry: where the logging
/// call happened plus the rendered stack trace of the calling thread.
pub(crate) struct CallSite {
    pub location: ReportLocation,
    pub stacktrace: String,
}

/// Capture the call site described by `location` together with a
/// textual stack trace.
///
/// `location` is the `#[track_caller]` location of the logging method's
/// direct caller. The function name is resolved best-effort by matching
/// the location against the captured trace; when symbols are stripped
/// it degrades to `"unknown"`.
pub(crate) fn capture(location: &'static Location<'static>) -> CallSite {
    let stacktrace = Backtrace::force_capture().to_string();
    let function_name = function_name_at(&stacktrace, location.file(), location.line())
        .unwrap_or_else(|| "unknown".to_string());

    CallSite {
        location: ReportLocation {
            file_path: location.file().to_string(),
            function_name,
            line_number: location.line(),
        },
        stacktrace,
    }
}

/// Scan a rendered backtrace for the frame whose source position is
/// `file:line` and return that frame's symbol name.
///
/// The std backtrace renderer emits frames as a numbered symbol line
/// followed by an indented `at <file>:<line>:<col>` line; the function
/// name of the logging call site is the symbol preceding the matching
/// `at` line.
fn function_name_at(stacktrace: &str, file: &str, line: u32) -> Option<String> {
    let needle = format!("{}:{}:", file, line);
    let mut last_symbol: Option<&str> = None;

    for text in stacktrace.lines() {
        let trimmed = text.trim_start();
        if let Some(rest) = trimmed.strip_prefix("at ") {
            if rest.contains(&needle) {
                return last_symbol.map(|s| s.to_string());
            }
        } else if let Some((_, symbol)) = trimmed.split_once(": ") {
            last_symbol = Some(symbol.trim());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENDERED: &str = "\
   0: std::backtrace::Backtrace::force_capture
             at /rustc/lib/std/src/backtrace.rs:313:9
   1: jsonline_logger::logger::Logger::error
             at src/logger.rs:120:24
   2: my_app::handlers::checkout
             at src/handlers.rs:42:9
   3: my_app::main
             at src/main.rs:10:5";

    #[test]
    fn resolves_symbol_for_matching_frame() {
        let name = function_name_at(RENDERED, "src/handlers.rs", 42);
        assert_eq!(name.as_deref(), Some("my_app::handlers::checkout"));
    }

    #[test]
    fn returns_none_when_no_frame_matches() {
        assert!(function_name_at(RENDERED, "src/other.rs", 1).is_none());
        assert!(function_name_at(RENDERED, "src/handlers.rs", 43).is_none());
    }

    #[test]
    fn capture_records_the_tracked_location() {
        let site = capture(Location::caller());
        assert!(site.location.file_path.ends_with("caller.rs"));
        assert!(site.location.line_number > 0);
        assert!(!site.stacktrace.is_empty());
    }
}
