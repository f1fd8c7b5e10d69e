pub mod console;
pub mod detect;
pub mod environment;
pub mod logger;
pub mod namespace;
pub mod timestamp;

#[cfg(target_arch = "wasm32")]
pub use console::BrowserConsole;
#[cfg(not(target_arch = "wasm32"))]
pub use console::StderrConsole;
pub use console::{platform_console, ConsoleSink, Level, MemoryConsole, SinkCall};
pub use detect::{classify_host, current_host, detect_environment, HostnamePatterns};
pub use environment::{Environment, EnvironmentSet};
pub use logger::{develog, Develog, LoggerOptions, DEFAULT_PREFIX};
pub use namespace::namespace_enabled;
pub use timestamp::{format_instant, format_timestamp, TimestampFormat};
