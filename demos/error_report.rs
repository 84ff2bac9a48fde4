//! The error path: report location and stack trace capture.
//!
//! Run with:
//! `SERVICE=checkout VERSION=1.4.2 cargo run --example error_report`

use jsonline_logger::{Config, Fields, Logger, Severity};
use serde_json::json;

fn main() {
    let log = Logger::new(
        Config::default()
            .with_threshold(Severity::Info)
            .with_service("checkout", "1.4.2"),
    );

    let order_log = log.with_context(Fields::from([
        ("order_id".to_string(), json!("A-1041")),
    ]));

    // ERROR entries carry the accumulated context plus the call site
    // of this line and a stack trace.
    order_log.error("payment provider rejected the charge");

    // fatal would emit at CRITICAL and then exit(1); uncomment to try.
    // order_log.fatal("unrecoverable state");
}
