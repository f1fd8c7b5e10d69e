use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Severity a message is forwarded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    /// Resolve a severity from its name, falling back to `Log` for
    /// unrecognized values.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            "debug" => Self::Debug,
            _ => Self::Log,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console-style output target loggers forward to.
///
/// Implementations mirror the browser console contract: writes carry ordered
/// arguments, groups nest, timers and counters are addressed by label, and
/// `clear` wipes the surface. Every operation is infallible; a sink that
/// cannot render something drops it silently.
pub trait ConsoleSink: Send + Sync {
    /// Emit one message at the given severity
    fn write(&self, level: Level, args: &[String]);

    /// Open a group; `None` opens it unlabeled
    fn group(&self, label: Option<&str>);

    /// Open a collapsed group; `None` opens it unlabeled
    fn group_collapsed(&self, label: Option<&str>);

    /// Close the innermost open group
    fn group_end(&self);

    /// Render tabular data
    fn table(&self, data: &Value);

    /// Start the named interval timer
    fn time(&self, label: &str);

    /// Stop the named interval timer and report its duration
    fn time_end(&self, label: &str);

    /// Increment the named counter and report its value
    fn count(&self, label: &str);

    /// Reset the named counter to zero
    fn count_reset(&self, label: &str);

    /// Clear the output surface
    fn clear(&self);
}

/// Forwards every operation to the browser console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserConsole {
    fn write(&self, level: Level, args: &[String]) {
        let data = js_args(args);
        match level {
            Level::Log => web_sys::console::log(&data),
            Level::Info => web_sys::console::info(&data),
            Level::Warn => web_sys::console::warn(&data),
            Level::Error => web_sys::console::error(&data),
            Level::Debug => web_sys::console::debug(&data),
        }
    }

    fn group(&self, label: Option<&str>) {
        match label {
            Some(label) => web_sys::console::group_1(&label.into()),
            None => web_sys::console::group_0(),
        }
    }

    fn group_collapsed(&self, label: Option<&str>) {
        match label {
            Some(label) => web_sys::console::group_collapsed_1(&label.into()),
            None => web_sys::console::group_collapsed_0(),
        }
    }

    fn group_end(&self) {
        web_sys::console::group_end();
    }

    fn table(&self, data: &Value) {
        web_sys::console::table_with_data(&json_to_js(data));
    }

    fn time(&self, label: &str) {
        web_sys::console::time_with_label(label);
    }

    fn time_end(&self, label: &str) {
        web_sys::console::time_end_with_label(label);
    }

    fn count(&self, label: &str) {
        web_sys::console::count_with_label(label);
    }

    fn count_reset(&self, label: &str) {
        web_sys::console::count_reset_with_label(label);
    }

    fn clear(&self) {
        web_sys::console::clear();
    }
}

#[cfg(target_arch = "wasm32")]
fn js_args(args: &[String]) -> js_sys::Array {
    args.iter()
        .map(|arg| wasm_bindgen::JsValue::from(arg.as_str()))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn json_to_js(data: &Value) -> wasm_bindgen::JsValue {
    js_sys::JSON::parse(&data.to_string()).unwrap_or(wasm_bindgen::JsValue::NULL)
}

/// Browser-style console emulation over stderr.
///
/// stderr has none of the browser console's state, so the sink keeps its
/// own group indentation, named timers, and named counters. Severities the
/// browser would render with styling are tagged on the line instead; plain
/// `log` lines stay bare.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct StderrConsole {
    state: Mutex<StderrState>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct StderrState {
    depth: usize,
    timers: HashMap<String, Instant>,
    counters: HashMap<String, u64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl StderrConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Logging must not fail, so a poisoned lock keeps being used
    fn state(&self) -> MutexGuard<'_, StderrState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(depth: usize, line: &str) {
    eprintln!("{}{line}", "  ".repeat(depth));
}

#[cfg(not(target_arch = "wasm32"))]
impl ConsoleSink for StderrConsole {
    fn write(&self, level: Level, args: &[String]) {
        let depth = self.state().depth;
        let line = args.join(" ");
        if level == Level::Log {
            emit(depth, &line);
        } else {
            emit(depth, &format!("{level}: {line}"));
        }
    }

    fn group(&self, label: Option<&str>) {
        let mut state = self.state();
        if let Some(label) = label {
            emit(state.depth, label);
        }
        state.depth += 1;
    }

    fn group_collapsed(&self, label: Option<&str>) {
        // No collapsing in a terminal
        self.group(label);
    }

    fn group_end(&self) {
        let mut state = self.state();
        state.depth = state.depth.saturating_sub(1);
    }

    fn table(&self, data: &Value) {
        let depth = self.state().depth;
        let rendered =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| Value::Null.to_string());
        for line in rendered.lines() {
            emit(depth, line);
        }
    }

    fn time(&self, label: &str) {
        self.state().timers.insert(label.to_string(), Instant::now());
    }

    fn time_end(&self, label: &str) {
        let mut state = self.state();
        let line = match state.timers.remove(label) {
            Some(started) => {
                format!("{label}: {:.3}ms", started.elapsed().as_secs_f64() * 1000.0)
            }
            None => format!("Timer '{label}' does not exist"),
        };
        emit(state.depth, &line);
    }

    fn count(&self, label: &str) {
        let mut state = self.state();
        let counter = state.counters.entry(label.to_string()).or_insert(0);
        *counter += 1;
        let line = format!("{label}: {counter}");
        emit(state.depth, &line);
    }

    fn count_reset(&self, label: &str) {
        self.state().counters.remove(label);
    }

    fn clear(&self) {
        // Wipe the terminal; open groups and named state stay live,
        // matching what browsers do on console.clear()
        eprint!("\x1b[2J\x1b[1;1H");
    }
}

/// One recorded sink operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Write { level: Level, args: Vec<String> },
    Group { label: Option<String> },
    GroupCollapsed { label: Option<String> },
    GroupEnd,
    Table { data: Value },
    Time { label: String },
    TimeEnd { label: String },
    Count { label: String },
    CountReset { label: String },
    Clear,
}

/// Recording sink for tests and embedding consumers.
///
/// Stores every call in emission order; nothing is rendered anywhere.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    calls: Mutex<Vec<SinkCall>>,
}

impl MemoryConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded call, in order
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock().clone()
    }

    /// Number of recorded calls
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: SinkCall) {
        self.lock().push(call);
    }
}

impl ConsoleSink for MemoryConsole {
    fn write(&self, level: Level, args: &[String]) {
        self.record(SinkCall::Write {
            level,
            args: args.to_vec(),
        });
    }

    fn group(&self, label: Option<&str>) {
        self.record(SinkCall::Group {
            label: label.map(str::to_string),
        });
    }

    fn group_collapsed(&self, label: Option<&str>) {
        self.record(SinkCall::GroupCollapsed {
            label: label.map(str::to_string),
        });
    }

    fn group_end(&self) {
        self.record(SinkCall::GroupEnd);
    }

    fn table(&self, data: &Value) {
        self.record(SinkCall::Table { data: data.clone() });
    }

    fn time(&self, label: &str) {
        self.record(SinkCall::Time {
            label: label.to_string(),
        });
    }

    fn time_end(&self, label: &str) {
        self.record(SinkCall::TimeEnd {
            label: label.to_string(),
        });
    }

    fn count(&self, label: &str) {
        self.record(SinkCall::Count {
            label: label.to_string(),
        });
    }

    fn count_reset(&self, label: &str) {
        self.record(SinkCall::CountReset {
            label: label.to_string(),
        });
    }

    fn clear(&self) {
        self.record(SinkCall::Clear);
    }
}

/// Shared handle to the platform console sink.
///
/// Default-constructed loggers all forward here, so group nesting and named
/// timers behave like a single console across the whole process.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn platform_console() -> Arc<dyn ConsoleSink> {
    static CONSOLE: LazyLock<Arc<BrowserConsole>> = LazyLock::new(|| Arc::new(BrowserConsole));
    CONSOLE.clone()
}

/// Shared handle to the platform console sink.
///
/// Default-constructed loggers all forward here, so group nesting and named
/// timers behave like a single console across the whole process.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn platform_console() -> Arc<dyn ConsoleSink> {
    static CONSOLE: LazyLock<Arc<StderrConsole>> = LazyLock::new(|| Arc::new(StderrConsole::new()));
    CONSOLE.clone()
}
