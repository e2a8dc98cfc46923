#![allow(dead_code)]

use cstrip::strip_comments;

/// Helper: strip `input` and compare against `expected` line by line.
pub fn assert_stripped(input: &[&str], expected: &[&str]) {
    let output = strip_comments(input);
    assert_eq!(
        output, expected,
        "strip mismatch:\n--- input ---\n{input:#?}\n--- got ---\n{output:#?}"
    );
}

/// Helper: a fresh path under the system temp dir for a test file.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("cstrip-{}-{name}", std::process::id()))
}
