use crate::environment::Environment;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

const LOCAL_PATTERN: &str = r"^(localhost|127\.0\.0\.1|0\.0\.0\.0|::1|\[::1\])";
const DEV_PATTERN: &str = r"^(dev|development)\.";
const STAGE_PATTERN: &str = r"^(stage|staging)\.";
const PRODUCTION_PATTERN: &str = r"^(prod|production|www)\.";

/// Hostname patterns used to classify a host into an environment.
///
/// Loopback forms always win: the `local` pattern is evaluated before the
/// others regardless of how they are customized. `Environment::Unknown`
/// carries no pattern; it is the fallback when nothing matches.
#[derive(Debug, Clone)]
pub struct HostnamePatterns {
    local: Regex,
    dev: Regex,
    stage: Regex,
    production: Regex,
}

impl Default for HostnamePatterns {
    fn default() -> Self {
        Self {
            local: builtin(LOCAL_PATTERN),
            dev: builtin(DEV_PATTERN),
            stage: builtin(STAGE_PATTERN),
            production: builtin(PRODUCTION_PATTERN),
        }
    }
}

fn builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in hostname pattern is valid")
}

impl HostnamePatterns {
    /// Replace the pattern for one environment, keeping evaluation order.
    ///
    /// The replacement is total for that environment: the default pattern is
    /// not consulted once overridden. Passing `Environment::Unknown` leaves
    /// the set unchanged, since unknown is a fallback rather than a class.
    #[must_use]
    pub fn with_pattern(mut self, environment: Environment, pattern: Regex) -> Self {
        match environment {
            Environment::Local => self.local = pattern,
            Environment::Dev => self.dev = pattern,
            Environment::Stage => self.stage = pattern,
            Environment::Production => self.production = pattern,
            Environment::Unknown => {}
        }
        self
    }

    /// Pattern currently associated with an environment
    #[must_use]
    pub fn pattern(&self, environment: Environment) -> Option<&Regex> {
        match environment {
            Environment::Local => Some(&self.local),
            Environment::Dev => Some(&self.dev),
            Environment::Stage => Some(&self.stage),
            Environment::Production => Some(&self.production),
            Environment::Unknown => None,
        }
    }
}

// Deserialized from a partial map of environment name to pattern source,
// e.g. {"dev": "^test\\."}; environments left out keep their defaults.
impl<'de> Deserialize<'de> for HostnamePatterns {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = HashMap::<String, String>::deserialize(deserializer)?;
        let mut patterns = Self::default();
        for (name, source) in entries {
            let environment = Environment::from_name(&name)
                .filter(|e| *e != Environment::Unknown)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("no hostname pattern slot for '{name}'"))
                })?;
            let pattern = Regex::new(&source).map_err(serde::de::Error::custom)?;
            patterns = patterns.with_pattern(environment, pattern);
        }
        Ok(patterns)
    }
}

/// Classify a host string using ordered pattern matching.
///
/// The `local` pattern is tried first and short-circuits the rest, then dev,
/// stage, and production in that order; a host nothing matches is
/// `Environment::Unknown`.
#[must_use]
pub fn classify_host(host: &str, patterns: &HostnamePatterns) -> Environment {
    if patterns.local.is_match(host) {
        return Environment::Local;
    }
    if patterns.dev.is_match(host) {
        return Environment::Dev;
    }
    if patterns.stage.is_match(host) {
        return Environment::Stage;
    }
    if patterns.production.is_match(host) {
        return Environment::Production;
    }
    Environment::Unknown
}

/// Detect the environment of the current execution context.
///
/// Reads the platform host identifier and classifies it against
/// `custom_patterns`, or the defaults when `None`. Without any host context
/// the result is `Environment::Unknown` and no pattern is evaluated.
#[must_use]
pub fn detect_environment(custom_patterns: Option<&HostnamePatterns>) -> Environment {
    // Built-ins are compiled once and shared by every detection call
    static DEFAULTS: LazyLock<HostnamePatterns> = LazyLock::new(HostnamePatterns::default);

    let Some(host) = current_host() else {
        return Environment::Unknown;
    };
    classify_host(&host, custom_patterns.unwrap_or(&DEFAULTS))
}

/// Host identifier of the current execution context, if there is one.
///
/// Browsers expose `window.location.hostname`; native processes can provide
/// a host through the `DEVELOG_HOST` environment variable. Absence is a
/// normal state, not an error.
#[must_use]
pub fn current_host() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.location().hostname().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::var("DEVELOG_HOST").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_hosts_are_local() {
        let patterns = HostnamePatterns::default();
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "::1", "[::1]"] {
            assert_eq!(
                classify_host(host, &patterns),
                Environment::Local,
                "{host} should classify as local"
            );
        }
        assert_eq!(
            classify_host("localhost:3000", &patterns),
            Environment::Local
        );
    }

    #[test]
    fn test_prefixed_hosts_classify_by_tier() {
        let patterns = HostnamePatterns::default();
        assert_eq!(
            classify_host("dev.example.com", &patterns),
            Environment::Dev
        );
        assert_eq!(
            classify_host("development.example.com", &patterns),
            Environment::Dev
        );
        assert_eq!(
            classify_host("stage.example.com", &patterns),
            Environment::Stage
        );
        assert_eq!(
            classify_host("staging.example.com", &patterns),
            Environment::Stage
        );
        assert_eq!(
            classify_host("prod.example.com", &patterns),
            Environment::Production
        );
        assert_eq!(
            classify_host("production.example.com", &patterns),
            Environment::Production
        );
        assert_eq!(
            classify_host("www.example.com", &patterns),
            Environment::Production
        );
    }

    #[test]
    fn test_unmatched_hosts_are_unknown() {
        let patterns = HostnamePatterns::default();
        assert_eq!(
            classify_host("example.com", &patterns),
            Environment::Unknown
        );
        assert_eq!(
            classify_host("app.internal.example.com", &patterns),
            Environment::Unknown
        );
        assert_eq!(classify_host("", &patterns), Environment::Unknown);
    }

    #[test]
    fn test_custom_pattern_replaces_default() {
        let patterns = HostnamePatterns::default().with_pattern(
            Environment::Dev,
            Regex::new(r"^test\.").expect("valid pattern"),
        );
        assert_eq!(
            classify_host("test.example.com", &patterns),
            Environment::Dev
        );
        // The default dev prefixes are gone once overridden
        assert_eq!(
            classify_host("dev.example.com", &patterns),
            Environment::Unknown
        );
    }

    #[test]
    fn test_custom_pattern_keeps_evaluation_order() {
        let patterns = HostnamePatterns::default().with_pattern(
            Environment::Stage,
            Regex::new(r"^qa\.").expect("valid pattern"),
        );
        assert_eq!(
            classify_host("qa.example.com", &patterns),
            Environment::Stage
        );
        // Other classes are untouched by a stage override
        assert_eq!(
            classify_host("dev.example.com", &patterns),
            Environment::Dev
        );
        assert_eq!(classify_host("127.0.0.1", &patterns), Environment::Local);
    }

    #[test]
    fn test_local_wins_over_custom_patterns() {
        let patterns = HostnamePatterns::default().with_pattern(
            Environment::Production,
            Regex::new("localhost").expect("valid pattern"),
        );
        assert_eq!(classify_host("localhost", &patterns), Environment::Local);
    }

    #[test]
    fn test_unknown_has_no_pattern_slot() {
        let patterns = HostnamePatterns::default().with_pattern(
            Environment::Unknown,
            Regex::new("anything").expect("valid pattern"),
        );
        assert!(patterns.pattern(Environment::Unknown).is_none());
        assert_eq!(
            classify_host("anything.example.com", &patterns),
            Environment::Unknown
        );
    }

    #[test]
    fn test_deserialize_partial_map_keeps_defaults() {
        let patterns: HostnamePatterns =
            serde_json::from_str(r#"{"dev": "^test\\."}"#).expect("deserialization should succeed");
        assert_eq!(
            classify_host("test.example.com", &patterns),
            Environment::Dev
        );
        assert_eq!(
            classify_host("staging.example.com", &patterns),
            Environment::Stage
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_input() {
        assert!(serde_json::from_str::<HostnamePatterns>(r#"{"qa": "^qa\\."}"#).is_err());
        assert!(serde_json::from_str::<HostnamePatterns>(r#"{"unknown": "x"}"#).is_err());
        assert!(serde_json::from_str::<HostnamePatterns>(r#"{"dev": "["}"#).is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_detection_reads_host_from_process_environment() {
        // The only test touching DEVELOG_HOST, so the asserts can share it
        std::env::remove_var("DEVELOG_HOST");
        assert_eq!(current_host(), None);
        assert_eq!(detect_environment(None), Environment::Unknown);

        std::env::set_var("DEVELOG_HOST", "staging.example.com");
        assert_eq!(current_host().as_deref(), Some("staging.example.com"));
        assert_eq!(detect_environment(None), Environment::Stage);

        // Repeated detection keeps classifying through the shared defaults
        std::env::set_var("DEVELOG_HOST", "www.example.com");
        assert_eq!(detect_environment(None), Environment::Production);
        std::env::set_var("DEVELOG_HOST", "127.0.0.1");
        assert_eq!(detect_environment(None), Environment::Local);
        std::env::remove_var("DEVELOG_HOST");
    }
}
