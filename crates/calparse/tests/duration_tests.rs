use calparse::{parse_duration, Duration, ParseError};

fn none(positive: bool) -> Duration {
    Duration {
        positive,
        week: None,
        day: None,
        hour: None,
        minute: None,
        second: None,
    }
}

fn assert_invalid(literal: &str) {
    match parse_duration(literal) {
        Err(ParseError::InvalidDuration { input, .. }) => assert_eq!(input, literal),
        other => panic!("{literal:?} should be an invalid duration, got {other:?}"),
    }
}

// ============================================================================
// Accepted forms
// ============================================================================

#[test]
fn hours_and_minutes() {
    assert_eq!(
        parse_duration("PT3H15M").unwrap(),
        Duration {
            hour: Some(3),
            minute: Some(15),
            ..none(true)
        }
    );
}

#[test]
fn leading_minus_only_flips_sign() {
    assert_eq!(
        parse_duration("-PT3H15M").unwrap(),
        Duration {
            hour: Some(3),
            minute: Some(15),
            ..none(false)
        }
    );
}

#[test]
fn leading_plus_is_positive() {
    assert_eq!(parse_duration("+PT1S").unwrap(), parse_duration("PT1S").unwrap());
}

#[test]
fn days_and_time() {
    assert_eq!(
        parse_duration("P60DT15M05S").unwrap(),
        Duration {
            day: Some(60),
            minute: Some(15),
            second: Some(5),
            ..none(true)
        }
    );
}

#[test]
fn weeks() {
    assert_eq!(
        parse_duration("P8W").unwrap(),
        Duration {
            week: Some(8),
            ..none(true)
        }
    );
}

#[test]
fn days_only() {
    assert_eq!(
        parse_duration("P2D").unwrap(),
        Duration {
            day: Some(2),
            ..none(true)
        }
    );
}

#[test]
fn zero_components_are_still_components() {
    assert_eq!(
        parse_duration("PT0S").unwrap(),
        Duration {
            second: Some(0),
            ..none(true)
        }
    );
}

#[test]
fn from_str_delegates() {
    let d: Duration = "P1DT12H".parse().unwrap();
    assert_eq!(d.day, Some(1));
    assert_eq!(d.hour, Some(12));
}

// ============================================================================
// Rejected forms
// ============================================================================

#[test]
fn weeks_mixed_with_day_time_form() {
    assert_invalid("P8W15M");
    assert_invalid("P8WT1H");
    assert_invalid("P1W2D");
}

#[test]
fn no_components() {
    assert_invalid("P");
    assert_invalid("-P");
    assert_invalid("PT");
    assert_invalid("P1DT");
}

#[test]
fn missing_or_misplaced_prefix() {
    assert_invalid("");
    assert_invalid("T3H");
    assert_invalid("3H");
    assert_invalid("p1D");
    assert_invalid("P-1D");
}

#[test]
fn time_components_out_of_order() {
    assert_invalid("PT15M3H");
    assert_invalid("PT1S1M");
    assert_invalid("PT1H1H");
}

#[test]
fn time_designator_without_t() {
    assert_invalid("P1H");
    assert_invalid("P1D2H");
}

#[test]
fn trailing_garbage() {
    assert_invalid("PT1H ");
    assert_invalid("P1DX");
    assert_invalid("P8W8");
}

#[test]
fn number_without_designator() {
    assert_invalid("P15");
    assert_invalid("PT15");
}

#[test]
fn component_too_large() {
    assert_invalid("PT99999999999S");
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn total_seconds_is_signed() {
    assert_eq!(parse_duration("PT3H15M").unwrap().total_seconds(), 11_700);
    assert_eq!(parse_duration("-PT15M").unwrap().total_seconds(), -900);
    assert_eq!(parse_duration("P1W").unwrap().total_seconds(), 604_800);
    assert_eq!(parse_duration("P1DT1S").unwrap().total_seconds(), 86_401);
}

#[test]
fn to_time_delta_matches_chrono() {
    let d = parse_duration("-P1DT2H").unwrap();
    assert_eq!(
        d.to_time_delta(),
        -(chrono::TimeDelta::days(1) + chrono::TimeDelta::hours(2))
    );
}

#[test]
fn display_renders_literal() {
    assert_eq!(parse_duration("P60DT15M05S").unwrap().to_string(), "P60DT15M5S");
    assert_eq!(parse_duration("-P8W").unwrap().to_string(), "-P8W");
    assert_eq!(parse_duration("+PT3H").unwrap().to_string(), "PT3H");
}

#[test]
fn serializes_without_absent_fields() {
    let json = serde_json::to_value(parse_duration("PT3H15M").unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"positive": true, "hour": 3, "minute": 15})
    );
}

#[test]
fn deserialization_applies_literal_rules() {
    let json = serde_json::json!({"positive": false, "day": 1, "hour": 2});
    let d: Duration = serde_json::from_value(json).unwrap();
    assert_eq!(d, parse_duration("-P1DT2H").unwrap());

    let mixed = serde_json::json!({"positive": true, "week": 1, "day": 2});
    let err = serde_json::from_value::<Duration>(mixed).unwrap_err();
    assert!(err.to_string().contains("weeks cannot be combined"));

    let empty = serde_json::json!({"positive": true});
    assert!(serde_json::from_value::<Duration>(empty).is_err());
}
