//! Stamps the build with `DOCSITE_VERSION` and `DOCSITE_GIT_SHA`.
//!
//! CI sets both; local builds fall back to the package version and `git`.

use std::env;
use std::process::Command;

fn main() {
    let version =
        env::var("DOCSITE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    let git_sha = env::var("DOCSITE_GIT_SHA")
        .ok()
        .or_else(|| {
            env::var("GITHUB_SHA")
                .ok()
                .map(|sha| sha.chars().take(7).collect())
        })
        .or_else(short_head)
        .unwrap_or_else(|| "unknown".to_string());

    for (key, value) in [("DOCSITE_VERSION", &version), ("DOCSITE_GIT_SHA", &git_sha)] {
        println!("cargo:rustc-env={key}={value}");
    }
    for var in ["DOCSITE_VERSION", "DOCSITE_GIT_SHA", "GITHUB_SHA"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}

fn short_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}
