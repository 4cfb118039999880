#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Theme storage ownership lint.
//!
//! The theme controller is the only writer of the preference. Browser storage
//! and cookies are touched exclusively through the channels in
//! `src/app/platform.rs`, and every system listener registered there is also
//! removed there.
//!
//! These are source-scanning checks: a first line of defense, not a
//! replacement for the behavior tests in theme_scenarios.rs.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Calls that write browser storage or cookies directly
const STORAGE_WRITES: &[&str] = &["set_item(", "remove_item(", "set_cookie(", "localStorage.setItem"];

/// The one module allowed to make them
const STORAGE_OWNER: &str = "src/app/platform.rs";

/// Inline page script for pages served without the client bundle
const INLINE_SCRIPT_OWNER: &str = "src/app/components/theme.rs";

fn rust_sources() -> Vec<(String, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    WalkDir::new(root.join("src"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "rs"))
        .filter_map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .ok()?
                .to_string_lossy()
                .replace('\\', "/");
            let content = fs::read_to_string(e.path()).ok()?;
            Some((rel, content))
        })
        .collect()
}

#[test]
fn storage_written_only_by_platform_channels() {
    let mut violations = Vec::new();

    for (path, content) in rust_sources() {
        if path == STORAGE_OWNER || path == INLINE_SCRIPT_OWNER {
            continue;
        }
        for (line_no, line) in content.lines().enumerate() {
            let code = line.trim();
            if code.starts_with("//") {
                continue;
            }
            for pattern in STORAGE_WRITES {
                if code.contains(pattern) {
                    violations.push(format!("{}:{}: {}", path, line_no + 1, code));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "\n\nDirect storage writes outside {} and {}:\n  {}\n\
         Route preference changes through ThemeController::set_preference.\n",
        STORAGE_OWNER,
        INLINE_SCRIPT_OWNER,
        violations.join("\n  ")
    );
}

#[test]
fn every_added_listener_is_removed() {
    let content = fs::read_to_string(STORAGE_OWNER).expect("Failed to read platform.rs");

    let added = content.matches("add_event_listener_with_callback(").count();
    let removed = content.matches("remove_event_listener_with_callback(").count();

    assert!(added > 0, "platform.rs should watch the system color scheme");
    assert_eq!(
        added, removed,
        "Each add_event_listener_with_callback needs a matching removal in a Subscription teardown"
    );
}

#[test]
fn storage_key_is_not_hardcoded_elsewhere() {
    // The key lives in THEME_STORAGE_KEY; string literals for it drift.
    let mut violations = Vec::new();

    for (path, content) in rust_sources() {
        if path.ends_with("theme/mod.rs") {
            continue;
        }
        let code: String = content
            .split("#[cfg(test)]")
            .next()
            .unwrap_or("")
            .to_string();
        if code.contains(r#"get_item("theme")"#) || code.contains(r#"cookie_value(header, "theme")"#)
        {
            violations.push(path);
        }
    }

    assert!(
        violations.is_empty(),
        "Use THEME_STORAGE_KEY instead of a literal key in: {:?}",
        violations
    );
}
