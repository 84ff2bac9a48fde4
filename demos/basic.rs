//! Root construction, severity filtering and context branching.
//!
//! Run with:
//! `LOG_LEVEL=DEBUG SERVICE=checkout VERSION=1.4.2 cargo run --example basic`

use jsonline_logger::{Fields, Logger};
use serde_json::json;

fn main() {
    // Threshold and identity come from LOG_LEVEL / SERVICE / VERSION.
    let log = Logger::from_env();

    log.info("service starting");
    log.debug("only visible with LOG_LEVEL=DEBUG");

    let request_log = log.with_context(Fields::from([
        ("request_id".to_string(), json!("9f1c")),
        ("user_id".to_string(), json!(42)),
    ]));
    request_log.infof(format_args!("handled in {}ms", 12));

    // The parent is untouched by the derivation above.
    log.info("no request fields here");
}
