//! Namespace paths and the allow-list filter.
//!
//! Paths are colon-delimited segments (`API:User:Detail`). The filter is an
//! allow-list with three entry kinds: `*` enables everything, `stem:*`
//! enables the stem and all of its descendants, and anything else enables
//! exactly one path. An exact entry does not cascade to children.

/// Build a child's fully-qualified namespace path
#[must_use]
pub fn join_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(path) => format!("{path}:{name}"),
        None => name.to_string(),
    }
}

/// Decide whether a namespace path passes an allow-list.
///
/// Root loggers (`None` path) are never suppressed. An absent or empty
/// allow-list enables everything.
#[must_use]
pub fn namespace_enabled(path: Option<&str>, allow_list: Option<&[String]>) -> bool {
    let Some(path) = path else {
        return true;
    };
    let Some(allow_list) = allow_list else {
        return true;
    };
    if allow_list.is_empty() {
        return true;
    }
    allow_list.iter().any(|entry| entry_matches(entry, path))
}

fn entry_matches(entry: &str, path: &str) -> bool {
    if entry == "*" {
        return true;
    }
    if let Some(stem) = entry.strip_suffix(":*") {
        // The stem itself plus everything below it, but not mere
        // string prefixes like "APIX" under "API:*"
        return path == stem
            || path
                .strip_prefix(stem)
                .is_some_and(|rest| rest.starts_with(':'));
    }
    entry == path
}
