//! Tests for the small shared helpers in the crate root.

use stackle::{clamp, normalize_submission};

#[test]
fn clamp_limits_both_ends() {
    assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
}

#[test]
fn submission_is_trimmed() {
    assert_eq!(normalize_submission("  buy milk  "), Some("buy milk".to_string()));
    assert_eq!(normalize_submission("buy milk\n"), Some("buy milk".to_string()));
}

#[test]
fn empty_and_whitespace_submissions_are_rejected() {
    assert_eq!(normalize_submission(""), None);
    assert_eq!(normalize_submission("   "), None);
    assert_eq!(normalize_submission("\n\t "), None);
}

#[test]
fn interior_whitespace_is_preserved() {
    assert_eq!(
        normalize_submission(" call  the dentist "),
        Some("call  the dentist".to_string())
    );
}
