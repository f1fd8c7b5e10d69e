use crate::console::{platform_console, ConsoleSink, Level};
use crate::detect::{detect_environment, HostnamePatterns};
use crate::environment::{Environment, EnvironmentSet};
use crate::namespace::{join_path, namespace_enabled};
use crate::timestamp::{format_timestamp, TimestampFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// Prefix stamped on output when none is configured
pub const DEFAULT_PREFIX: &str = "[develog]";

/// Options accepted at logger construction.
///
/// Missing fields keep their defaults, both in code via
/// `..LoggerOptions::default()` and when deserializing from configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Environments in which logging stays active
    pub enabled_environments: EnvironmentSet,
    /// Replacement hostname patterns for environment detection
    pub custom_hostname_patterns: Option<HostnamePatterns>,
    /// String stamped at the start of every line
    pub prefix: String,
    /// Skip detection entirely and use this environment
    pub force_environment: Option<Environment>,
    /// Append the current time to the prefix
    pub show_timestamp: bool,
    /// Rendering used when `show_timestamp` is on
    pub timestamp_format: TimestampFormat,
    /// Namespace allow-list; `None` enables every namespace
    pub enabled_namespaces: Option<Vec<String>>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            enabled_environments: EnvironmentSet::DEFAULT,
            custom_hostname_patterns: None,
            prefix: DEFAULT_PREFIX.to_string(),
            force_environment: None,
            show_timestamp: false,
            timestamp_format: TimestampFormat::Time,
            enabled_namespaces: None,
        }
    }
}

/// Environment-gated console logger.
///
/// The enabled verdict is computed once at construction, from the resolved
/// environment and the namespace allow-list, and never re-evaluated: a
/// disabled logger's operations return before any formatting happens, and an
/// enabled one never flips off mid-flight.
pub struct Develog {
    environment: Environment,
    enabled: bool,
    path: Option<String>,
    display_prefix: String,
    prefix: String,
    enabled_environments: EnvironmentSet,
    show_timestamp: bool,
    timestamp_format: TimestampFormat,
    enabled_namespaces: Option<Vec<String>>,
    sink: Arc<dyn ConsoleSink>,
    children: Mutex<HashMap<String, Arc<Develog>>>,
}

impl fmt::Debug for Develog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Develog")
            .field("environment", &self.environment)
            .field("enabled", &self.enabled)
            .field("path", &self.path)
            .field("display_prefix", &self.display_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for Develog {
    fn default() -> Self {
        Self::new(LoggerOptions::default())
    }
}

impl Develog {
    /// Create a logger against the platform console
    #[must_use]
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_sink(options, platform_console())
    }

    /// Create a logger against an explicit sink.
    ///
    /// This is the isolation point for tests and for consumers that capture
    /// their own output; see [`crate::console::MemoryConsole`].
    #[must_use]
    pub fn with_sink(options: LoggerOptions, sink: Arc<dyn ConsoleSink>) -> Self {
        Self::build(options, None, sink)
    }

    fn build(options: LoggerOptions, path: Option<String>, sink: Arc<dyn ConsoleSink>) -> Self {
        let LoggerOptions {
            enabled_environments,
            custom_hostname_patterns,
            prefix,
            force_environment,
            show_timestamp,
            timestamp_format,
            enabled_namespaces,
        } = options;

        let environment = force_environment
            .unwrap_or_else(|| detect_environment(custom_hostname_patterns.as_ref()));
        let environment_open = enabled_environments.allows(environment);
        let namespace_open = namespace_enabled(path.as_deref(), enabled_namespaces.as_deref());
        let display_prefix = match path.as_deref() {
            Some(path) => format!("{prefix}:{path}"),
            None => prefix.clone(),
        };

        Self {
            environment,
            enabled: environment_open && namespace_open,
            path,
            display_prefix,
            prefix,
            enabled_environments,
            show_timestamp,
            timestamp_format,
            enabled_namespaces,
            sink,
            children: Mutex::new(HashMap::new()),
        }
    }

    /// Environment resolved at construction
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Cached enable verdict; false means every operation is a no-op
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fully-qualified namespace path; `None` for a root logger
    #[must_use]
    pub fn namespace_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Child logger scoped under `name`.
    ///
    /// The first call for a name constructs the child; every later call with
    /// that name returns the same instance. Children copy this logger's
    /// configuration and keep its resolved environment instead of re-running
    /// detection, so a tree always agrees on where it is deployed.
    pub fn namespace(&self, name: &str) -> Arc<Self> {
        let mut children = self.children.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(children.entry(name.to_string()).or_insert_with(|| {
            let path = join_path(self.path.as_deref(), name);
            Arc::new(Self::build(
                LoggerOptions {
                    enabled_environments: self.enabled_environments,
                    custom_hostname_patterns: None,
                    prefix: self.prefix.clone(),
                    force_environment: Some(self.environment),
                    show_timestamp: self.show_timestamp,
                    timestamp_format: self.timestamp_format,
                    enabled_namespaces: self.enabled_namespaces.clone(),
                },
                Some(path),
                Arc::clone(&self.sink),
            ))
        }))
    }

    /// Plain message
    pub fn log(&self, args: &[&dyn Display]) {
        self.forward(Level::Log, args);
    }

    /// Informational message
    pub fn info(&self, args: &[&dyn Display]) {
        self.forward(Level::Info, args);
    }

    /// Warning message
    pub fn warn(&self, args: &[&dyn Display]) {
        self.forward(Level::Warn, args);
    }

    /// Error message
    pub fn error(&self, args: &[&dyn Display]) {
        self.forward(Level::Error, args);
    }

    /// Debug message
    pub fn debug(&self, args: &[&dyn Display]) {
        self.forward(Level::Debug, args);
    }

    fn forward(&self, level: Level, args: &[&dyn Display]) {
        if !self.enabled {
            return;
        }
        let mut line = Vec::with_capacity(args.len() + 1);
        line.push(self.prefix_with_timestamp());
        line.extend(args.iter().map(|arg| arg.to_string()));
        self.sink.write(level, &line);
    }

    /// Open a console group; `None` opens it unlabeled
    pub fn group(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        match label {
            Some(label) => self.sink.group(Some(&self.compose(label))),
            None => self.sink.group(None),
        }
    }

    /// Open a collapsed console group; `None` opens it unlabeled
    pub fn group_collapsed(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        match label {
            Some(label) => self.sink.group_collapsed(Some(&self.compose(label))),
            None => self.sink.group_collapsed(None),
        }
    }

    /// Close the innermost open group
    pub fn group_end(&self) {
        if !self.enabled {
            return;
        }
        self.sink.group_end();
    }

    /// Render `data` as a table, preceded by a prefix-only line.
    ///
    /// Data that cannot be serialized is rendered as null; the call itself
    /// never fails.
    pub fn table<T: Serialize>(&self, data: &T) {
        if !self.enabled {
            return;
        }
        self.sink.write(Level::Log, &[self.display_prefix.clone()]);
        let value = serde_json::to_value(data).unwrap_or(Value::Null);
        self.sink.table(&value);
    }

    /// Start a named timer; without a label the display prefix is the name
    pub fn time(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        self.sink.time(&self.label_or_prefix(label));
    }

    /// Stop a named timer and report its duration
    pub fn time_end(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        self.sink.time_end(&self.label_or_prefix(label));
    }

    /// Increment a named counter and report its value
    pub fn count(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        self.sink.count(&self.label_or_prefix(label));
    }

    /// Reset a named counter
    pub fn count_reset(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        self.sink.count_reset(&self.label_or_prefix(label));
    }

    /// Clear the console
    pub fn clear(&self) {
        if !self.enabled {
            return;
        }
        self.sink.clear();
    }

    fn label_or_prefix(&self, label: Option<&str>) -> String {
        match label {
            Some(label) => self.compose(label),
            None => self.display_prefix.clone(),
        }
    }

    fn compose(&self, message: &str) -> String {
        format!("{} {message}", self.prefix_with_timestamp())
    }

    fn prefix_with_timestamp(&self) -> String {
        if self.show_timestamp {
            let timestamp = format_timestamp(self.timestamp_format);
            format!("{} [{timestamp}]", self.display_prefix)
        } else {
            self.display_prefix.clone()
        }
    }
}

/// Process-wide default logger, constructed with all defaults on first use.
#[must_use]
pub fn develog() -> &'static Develog {
    static DEVELOG: LazyLock<Develog> = LazyLock::new(Develog::default);
    &DEVELOG
}
