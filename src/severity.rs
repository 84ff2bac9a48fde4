use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered log severity controlling entry filtering.
///
/// An entry is emitted only when its severity is at or above the
/// logger's configured threshold. `Critical` is the maximum and is
/// reserved for the fatal path, which terminates the process after
/// emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Severity {
    /// Upper-case name as it appears in the `severity` field of the
    /// emitted JSON line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity level: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Case-insensitive parse of a severity name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_totally_ordered() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("Info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        assert_eq!(err, ParseSeverityError("verbose".to_string()));
    }

    #[test]
    fn serializes_as_upper_case_name() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"WARN\"");
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }
}
