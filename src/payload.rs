use crate::severity::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Contextual key/value data attached to log entries.
///
/// A `BTreeMap` keeps keys in lexicographic order so serialized output
/// is deterministic for tests and log aggregation.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// Identity of the emitting service, embedded in every entry that has
/// one. Required by the error-reporting ingestion format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceContext {
    pub service: String,
    pub version: String,
}

/// Source location of an ERROR/CRITICAL logging call, identifying the
/// direct caller of the logging method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocation {
    pub file_path: String,
    pub function_name: String,
    pub line_number: u32,
}

/// Accumulated context plus, on the error path, the report location.
///
/// Serialized only when at least one of the two parts is present.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Context {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: Fields,
    #[serde(rename = "reportLocation", skip_serializing_if = "Option::is_none")]
    pub report_location: Option<ReportLocation>,
}

impl Context {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.report_location.is_none()
    }
}

/// The single JSON record produced per log call.
///
/// Field declaration order matches the wire order of the ingestion
/// format; optional parts are omitted rather than serialized as null.
/// A payload is built fresh on every emit call and discarded after
/// serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub severity: Severity,
    pub event_time: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_context: Option<ServiceContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_payload() -> Payload {
        Payload {
            severity: Severity::Info,
            event_time: "2026-08-25T10:00:00Z".to_string(),
            message: "hello".to_string(),
            service_context: None,
            context: None,
            stacktrace: None,
        }
    }

    #[test]
    fn minimal_payload_omits_optional_parts() {
        let line = serde_json::to_string(&base_payload()).unwrap();
        assert_eq!(
            line,
            r#"{"severity":"INFO","eventTime":"2026-08-25T10:00:00Z","message":"hello"}"#
        );
    }

    #[test]
    fn service_context_is_serialized_in_order() {
        let mut p = base_payload();
        p.service_context = Some(ServiceContext {
            service: "svc".to_string(),
            version: "1.0".to_string(),
        });
        let line = serde_json::to_string(&p).unwrap();
        assert!(line.ends_with(r#""serviceContext":{"service":"svc","version":"1.0"}}"#));
    }

    #[test]
    fn context_data_keys_are_lexicographic() {
        let mut data = Fields::new();
        data.insert("zeta".to_string(), json!(1));
        data.insert("alpha".to_string(), json!("a"));
        let mut p = base_payload();
        p.context = Some(Context { data, report_location: None });
        let line = serde_json::to_string(&p).unwrap();
        assert!(line.contains(r#""context":{"data":{"alpha":"a","zeta":1}}"#));
    }

    #[test]
    fn empty_data_is_omitted_inside_context() {
        let mut p = base_payload();
        p.severity = Severity::Error;
        p.context = Some(Context {
            data: Fields::new(),
            report_location: Some(ReportLocation {
                file_path: "src/main.rs".to_string(),
                function_name: "main".to_string(),
                line_number: 7,
            }),
        });
        let line = serde_json::to_string(&p).unwrap();
        assert!(!line.contains("\"data\""));
        assert!(line.contains(
            r#""context":{"reportLocation":{"filePath":"src/main.rs","functionName":"main","lineNumber":7}}"#
        ));
    }
}
