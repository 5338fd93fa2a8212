//! Build script for NutriCalc
//!
//! Keeps a persistent build counter and stamps build metadata into the
//! binary as `NUTRICALC_BUILD_*` environment variables.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

/// Read, increment and store the counter; an unreadable file restarts at 1
fn next_build_number(counter: &Path) -> u64 {
    let previous = fs::read_to_string(counter)
        .ok()
        .and_then(|text| text.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let next = previous + 1;

    if let Err(err) = fs::write(counter, next.to_string()) {
        println!("cargo:warning=could not update {}: {}", counter.display(), err);
    }
    next
}

fn stamp(key: &str, value: impl std::fmt::Display) {
    println!("cargo:rustc-env=NUTRICALC_BUILD_{}={}", key, value);
}

fn main() {
    // Sources and the embedded dataset both end up in the binary
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=data");

    stamp("NUMBER", next_build_number(Path::new(COUNTER_FILE)));
    stamp(
        "TIMESTAMP",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
    );
    stamp(
        "PROFILE",
        std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string()),
    );
}
