use crate::severity::Severity;

/// Environment variable naming the minimum severity threshold,
/// e.g. `LOG_LEVEL=WARN`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable naming the emitting service.
pub const SERVICE_ENV: &str = "SERVICE";

/// Environment variable naming the service version.
pub const VERSION_ENV: &str = "VERSION";

/// Logger configuration resolved once at construction time.
///
/// There is no process-wide singleton: the configuration is an explicit
/// value handed to [`Logger::new`](crate::logger::Logger::new). Use
/// [`Config::from_env`] to populate it from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Minimum severity an entry must have to be emitted.
    pub threshold: Severity,
    /// Service name, paired with `version`. Both must be present for a
    /// `serviceContext` to appear in emitted entries.
    pub service: Option<String>,
    /// Service version, paired with `service`.
    pub version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threshold: Severity::Info,
            service: None,
            version: None,
        }
    }
}

impl Config {
    /// Build a configuration from `LOG_LEVEL`, `SERVICE` and `VERSION`.
    ///
    /// An invalid or unset `LOG_LEVEL` falls back to INFO and a missing
    /// identity leaves `serviceContext` out of emitted entries; both
    /// conditions report a warning on stderr and neither is an error.
    pub fn from_env() -> Self {
        let threshold = threshold_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
        let service = non_empty(std::env::var(SERVICE_ENV).ok());
        let version = non_empty(std::env::var(VERSION_ENV).ok());

        if service.is_none() || version.is_none() {
            eprintln!(
                "logger WARN: {} and/or {} are not set, serviceContext will be omitted",
                SERVICE_ENV, VERSION_ENV
            );
        }

        Config { threshold, service, version }
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_service(mut self, service: impl Into<String>, version: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self.version = Some(version.into());
        self
    }
}

/// Resolve the threshold from `LOG_LEVEL` alone, leaving the identity
/// to the caller. Same fallback behavior as [`Config::from_env`].
pub fn threshold_from_env() -> Severity {
    threshold_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

/// Resolve the threshold from a raw environment value, defaulting to
/// INFO with a stderr warning when the value is missing or unknown.
fn threshold_from(raw: Option<&str>) -> Severity {
    match raw {
        Some(value) => match value.parse::<Severity>() {
            Ok(severity) => severity,
            Err(_) => {
                eprintln!(
                    "logger WARN: {} is not valid or not set, defaulting to INFO",
                    LOG_LEVEL_ENV
                );
                Severity::Info
            }
        },
        None => {
            eprintln!(
                "logger WARN: {} is not valid or not set, defaulting to INFO",
                LOG_LEVEL_ENV
            );
            Severity::Info
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_info_threshold_and_no_identity() {
        let config = Config::default();
        assert_eq!(config.threshold, Severity::Info);
        assert!(config.service.is_none());
        assert!(config.version.is_none());
    }

    #[test]
    fn threshold_falls_back_to_info_on_bad_values() {
        assert_eq!(threshold_from(None), Severity::Info);
        assert_eq!(threshold_from(Some("verbose")), Severity::Info);
        assert_eq!(threshold_from(Some("")), Severity::Info);
    }

    #[test]
    fn threshold_parses_known_levels() {
        assert_eq!(threshold_from(Some("DEBUG")), Severity::Debug);
        assert_eq!(threshold_from(Some("warn")), Severity::Warn);
    }

    #[test]
    fn builder_style_setters() {
        let config = Config::default()
            .with_threshold(Severity::Error)
            .with_service("svc", "1.0");
        assert_eq!(config.threshold, Severity::Error);
        assert_eq!(config.service.as_deref(), Some("svc"));
        assert_eq!(config.version.as_deref(), Some("1.0"));
    }
}
