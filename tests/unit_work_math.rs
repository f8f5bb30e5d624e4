use farmledger::modules::work::service::{parse_time_str, resolve_minutes, total_amount};

#[test]
fn test_total_amount_basic() {
    // 90 minutes at 200 per hour.
    assert_eq!(total_amount(90.0, 200.0), 300.0);
}

#[test]
fn test_total_amount_full_hours() {
    assert_eq!(total_amount(60.0, 150.0), 150.0);
    assert_eq!(total_amount(120.0, 150.0), 300.0);
}

#[test]
fn test_total_amount_fractional_hour() {
    assert_eq!(total_amount(30.0, 100.0), 50.0);
}

#[test]
fn test_parse_time_str_hours_and_minutes() {
    assert_eq!(parse_time_str("2.30"), Some(150.0));
    assert_eq!(parse_time_str("0.45"), Some(45.0));
    assert_eq!(parse_time_str("1.05"), Some(65.0));
}

#[test]
fn test_parse_time_str_whole_hours() {
    assert_eq!(parse_time_str("3"), Some(180.0));
    assert_eq!(parse_time_str("0"), Some(0.0));
}

#[test]
fn test_parse_time_str_single_fractional_digit_is_tens() {
    // "1.5" reads as 1h50m, not 1h05m.
    assert_eq!(parse_time_str("1.5"), Some(110.0));
    assert_eq!(parse_time_str("2.1"), Some(130.0));
}

#[test]
fn test_parse_time_str_extra_digits_truncated() {
    assert_eq!(parse_time_str("1.555"), Some(115.0));
}

#[test]
fn test_parse_time_str_rejects_absurd_hours() {
    // Large hour parts must fail cleanly, never overflow.
    assert_eq!(parse_time_str("71582789"), None);
    assert_eq!(parse_time_str("100001"), None);
    assert_eq!(parse_time_str("4294967295.59"), None);
    assert_eq!(parse_time_str("99999999999999999999"), None);
}

#[test]
fn test_parse_time_str_accepts_large_sane_hours() {
    assert_eq!(parse_time_str("100000"), Some(6_000_000.0));
}

#[test]
fn test_parse_time_str_invalid() {
    assert_eq!(parse_time_str(""), None);
    assert_eq!(parse_time_str("abc"), None);
    assert_eq!(parse_time_str("1.x"), None);
    assert_eq!(parse_time_str("-1.30"), None);
    assert_eq!(parse_time_str("."), None);
}

#[test]
fn test_resolve_minutes_direct_value_wins() {
    let resolved = resolve_minutes(Some(90.0), Some("2.30")).unwrap();
    assert_eq!(resolved, 90.0);
}

#[test]
fn test_resolve_minutes_falls_back_to_time_str() {
    let resolved = resolve_minutes(None, Some("1.30")).unwrap();
    assert_eq!(resolved, 90.0);
}

#[test]
fn test_resolve_minutes_requires_one_input() {
    assert!(resolve_minutes(None, None).is_err());
}

#[test]
fn test_resolve_minutes_rejects_non_positive() {
    assert!(resolve_minutes(Some(0.0), None).is_err());
    assert!(resolve_minutes(Some(-15.0), None).is_err());
    assert!(resolve_minutes(None, Some("0")).is_err());
}

#[test]
fn test_resolve_minutes_rejects_absurd_time_str() {
    assert!(resolve_minutes(None, Some("71582789")).is_err());
}

#[test]
fn test_derived_total_tracks_time_str() {
    let minutes = resolve_minutes(None, Some("1.30")).unwrap();
    assert_eq!(total_amount(minutes, 200.0), 300.0);
}
