use develog::{develog, Develog, Environment, LoggerOptions, TimestampFormat};

fn main() {
    // The shared instance detects its environment from the host context:
    // window.location.hostname in a browser, DEVELOG_HOST natively.
    println!("=== Default instance ===");
    println!("environment: {}", develog().environment());
    println!("enabled: {}", develog().is_enabled());
    println!();

    // Force an environment to see output regardless of the host context
    println!("=== Forced local logger (output goes to stderr) ===");
    let logger = Develog::new(LoggerOptions {
        force_environment: Some(Environment::Local),
        ..LoggerOptions::default()
    });
    logger.log(&[&"plain message"]);
    logger.info(&[&"request accepted", &200]);
    logger.warn(&[&"cache miss for", &"user:42"]);
    logger.error(&[&"upstream timed out after", &2500, &"ms"]);

    logger.group(Some("startup"));
    logger.log(&[&"loading settings"]);
    logger.log(&[&"connecting"]);
    logger.group_end();

    logger.time(Some("sum"));
    let total: u64 = (0..1_000_000).sum();
    logger.time_end(Some("sum"));
    logger.log(&[&"summed to", &total]);

    logger.count(Some("retries"));
    logger.count(Some("retries"));
    logger.count_reset(Some("retries"));
    logger.count(Some("retries"));

    logger.table(&[("GET /users", 12), ("GET /orders", 48), ("POST /orders", 7)]);
    println!();

    println!("=== Timestamped logger ===");
    let stamped = Develog::new(LoggerOptions {
        force_environment: Some(Environment::Local),
        show_timestamp: true,
        timestamp_format: TimestampFormat::Iso,
        ..LoggerOptions::default()
    });
    stamped.log(&[&"stamped line"]);
    println!();

    // A production logger goes quiet without touching any call site
    println!("=== Forced production logger ===");
    let silent = Develog::new(LoggerOptions {
        force_environment: Some(Environment::Production),
        ..LoggerOptions::default()
    });
    silent.error(&[&"this line never reaches the console"]);
    println!("enabled: {}", silent.is_enabled());
}
