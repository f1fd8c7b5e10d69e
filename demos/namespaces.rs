use develog::{Develog, Environment, LoggerOptions};
use std::sync::Arc;

fn main() {
    println!("=== Namespace tree with an API:* allow-list ===");
    let root = Develog::new(LoggerOptions {
        force_environment: Some(Environment::Local),
        enabled_namespaces: Some(vec!["API:*".to_string()]),
        ..LoggerOptions::default()
    });

    let api = root.namespace("API");
    let users = api.namespace("User");
    let db = root.namespace("DB");

    // The root is never filtered; DB is outside the allow-list
    root.log(&[&"root always speaks"]);
    api.log(&[&"listed by the wildcard"]);
    users.log(&[&"descendants inherit the wildcard"]);
    db.log(&[&"this one is filtered out"]);

    println!();
    println!("=== Enable verdicts ===");
    for logger in [&api, &users, &db] {
        println!(
            "{:<16} enabled: {}",
            logger.namespace_path().unwrap_or("(root)"),
            logger.is_enabled()
        );
    }

    // Asking again for a name hands back the same child
    println!();
    println!("=== Identity ===");
    let api_again = root.namespace("API");
    println!("same instance: {}", Arc::ptr_eq(&api, &api_again));
}
