use std::cell::Cell;

use calparse::{
    parse_time, parse_time_with, parse_wall_clock, DstPolicy, IanaResolver, ParseError,
    TimeParser,
};
use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};

fn assert_invalid_date(literal: &str) {
    match parse_time(literal, "Europe/Berlin") {
        Err(ParseError::InvalidDate { input, .. }) => assert_eq!(input, literal),
        other => panic!("{literal:?} should be an invalid date, got {other:?}"),
    }
}

// ============================================================================
// UTC literals
// ============================================================================

#[test]
fn utc_literal_ignores_timezone() {
    assert_eq!(
        parse_time("20180115T214000Z", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2018, 1, 15, 21, 40, 0).unwrap()
    );
}

#[test]
fn utc_literal_with_unknown_timezone_still_parses() {
    assert_eq!(
        parse_time("20190531T083000Z", "Not/AZone").unwrap(),
        Utc.with_ymd_and_hms(2019, 5, 31, 8, 30, 0).unwrap()
    );
}

#[test]
fn utc_literal_never_consults_resolver() {
    let calls = Cell::new(0);
    let resolver = |_: &str, _: NaiveDateTime| -> Result<FixedOffset, ParseError> {
        calls.set(calls.get() + 1);
        Ok(FixedOffset::east_opt(0).unwrap())
    };
    parse_time_with("20180115T214000Z", "Europe/Berlin", &resolver).unwrap();
    assert_eq!(calls.get(), 0);
}

// ============================================================================
// Wall-clock literals
// ============================================================================

#[test]
fn wall_clock_in_winter_and_summer() {
    assert_eq!(
        parse_time("20180115T214000", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2018, 1, 15, 20, 40, 0).unwrap()
    );
    assert_eq!(
        parse_time("20180715T214000", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2018, 7, 15, 19, 40, 0).unwrap()
    );
}

#[test]
fn wall_clock_west_of_utc() {
    assert_eq!(
        parse_time("20260217T140000", "America/Los_Angeles").unwrap(),
        Utc.with_ymd_and_hms(2026, 2, 17, 22, 0, 0).unwrap()
    );
}

#[test]
fn date_only_is_local_midnight() {
    assert_eq!(
        parse_time("20190607", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2019, 6, 6, 22, 0, 0).unwrap()
    );
    assert_eq!(
        parse_time("20190607", "UTC").unwrap(),
        Utc.with_ymd_and_hms(2019, 6, 7, 0, 0, 0).unwrap()
    );
}

#[test]
fn unknown_timezone_for_wall_clock() {
    assert_eq!(
        parse_time("20190531T083000", "Not/AZone"),
        Err(ParseError::UnknownTimezone("Not/AZone".into()))
    );
}

#[test]
fn custom_resolver_supplies_offset() {
    let resolver = |tz: &str, _: NaiveDateTime| -> Result<FixedOffset, ParseError> {
        assert_eq!(tz, "Office");
        Ok(FixedOffset::east_opt(5 * 3600 + 1800).unwrap())
    };
    let parser = TimeParser::new(resolver);
    assert_eq!(
        parser.parse("20200101T053000", "Office").unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn dst_gap_shifts_forward_by_default() {
    // 02:30 does not exist on 2018-03-25 in Berlin; it reads as 03:30 CEST.
    assert_eq!(
        parse_time("20180325T023000", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2018, 3, 25, 1, 30, 0).unwrap()
    );
}

#[test]
fn dst_fold_takes_earlier_instant() {
    assert_eq!(
        parse_time("20181028T023000", "Europe/Berlin").unwrap(),
        Utc.with_ymd_and_hms(2018, 10, 28, 0, 30, 0).unwrap()
    );
}

#[test]
fn rejecting_policy_fails_in_gap() {
    let parser = TimeParser::new(IanaResolver::with_policy(DstPolicy::Reject));
    assert!(matches!(
        parser.parse("20180325T023000", "Europe/Berlin"),
        Err(ParseError::NonexistentLocalTime { .. })
    ));
}

// ============================================================================
// Validation order: shape, then range, then timezone
// ============================================================================

#[test]
fn month_zero_is_invalid() {
    assert_invalid_date("20180015T214000Z");
}

#[test]
fn day_zero_is_invalid() {
    assert_invalid_date("20180100T214000Z");
}

#[test]
fn out_of_range_fields() {
    assert_invalid_date("20181315T000000Z");
    assert_invalid_date("20180230T000000");
    assert_invalid_date("20180431");
    assert_invalid_date("20180115T240000Z");
    assert_invalid_date("20180115T236000Z");
    assert_invalid_date("20180115T235960Z");
}

#[test]
fn leap_years_are_honored() {
    assert!(parse_time("20200229T120000Z", "UTC").is_ok());
    assert!(parse_time("20000229", "UTC").is_ok());
    assert_invalid_date("20190229T120000Z");
    assert_invalid_date("19000229");
}

#[test]
fn wrong_shape() {
    assert_invalid_date("");
    assert_invalid_date("2018-01-15T21:40:00Z");
    assert_invalid_date("20180115T2140Z");
    assert_invalid_date("20180115 214000Z");
    assert_invalid_date("20180115Z");
    assert_invalid_date("2018011XT214000Z");
    assert_invalid_date("20180115T214000ZZ");
    assert_invalid_date("２0180115");
}

#[test]
fn range_error_comes_before_timezone_lookup() {
    let calls = Cell::new(0);
    let resolver = |tz: &str, _: NaiveDateTime| -> Result<FixedOffset, ParseError> {
        calls.set(calls.get() + 1);
        Err(ParseError::UnknownTimezone(tz.to_string()))
    };
    let err = parse_time_with("20180015T214000", "Nowhere", &resolver).unwrap_err();
    assert!(matches!(err, ParseError::InvalidDate { .. }));
    assert_eq!(calls.get(), 0);
}

#[test]
fn wall_clock_reports_shape() {
    let wall = parse_wall_clock("20190607").unwrap();
    assert!(wall.date_only);
    assert!(!wall.utc);
    assert_eq!(wall.datetime.to_string(), "2019-06-07 00:00:00");

    let wall = parse_wall_clock("20190531T083000Z").unwrap();
    assert!(!wall.date_only);
    assert!(wall.utc);
}
