mod incomplete_tests;
mod unclosed_tests;
mod unexpected_tests;

use crate::Transform;

/// Parse, assert errors, and summarize the surviving diagnostics one per line.
#[track_caller]
fn expect_errors(source: &str) -> String {
    let transform = Transform::try_from(source).expect("out of fuel");
    assert!(
        !transform.is_valid(),
        "expected diagnostics, but the unit is valid"
    );
    transform
        .diagnostics()
        .filtered()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
