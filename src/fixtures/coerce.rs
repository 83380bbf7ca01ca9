//! Temporal scalar coercion.
//!
//! A scalar matching the YAML timestamp pattern is parsed exactly as
//! written, with no timezone inference beyond the literal, and then
//! reinterpreted as UTC. The declared type of the target field decides the
//! shape of the result: a pure date, a wall-clock date-time, or a full UTC
//! instant. Every temporal value leaving this module is UTC-normalized no
//! matter how ambiguous the source literal was.

use chrono::{Duration, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FixtureError, FixtureResult};
use crate::model::{FieldType, FieldValue};

/// The YAML timestamp pattern: a date, optionally followed by a time with
/// fractional seconds and an explicit offset.
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
	Regex::new(
		r"(?x)^
		(\d{4})-(\d{1,2})-(\d{1,2})
		(?:
			(?:[Tt]|[\ \t]+)
			(\d{1,2}):(\d{2}):(\d{2})
			(?:\.(\d*))?
			(?:[\ \t]*(Z|[+-]\d{1,2}(?::?\d{2})?))?
		)?
		$",
	)
	.expect("timestamp pattern is valid")
});

/// Returns true if the scalar is recognized as a temporal literal.
///
/// # Examples
///
/// ```
/// use yaml_fixtures::fixtures::is_temporal_literal;
///
/// assert!(is_temporal_literal("2011-11-11"));
/// assert!(is_temporal_literal("2001-12-14 21:59:43.10 -5"));
/// assert!(!is_temporal_literal("family"));
/// ```
pub fn is_temporal_literal(raw: &str) -> bool {
	TIMESTAMP.is_match(raw)
}

/// Coerces a temporal literal into the representation implied by the
/// declared type of the target field.
///
/// A declared [`FieldType::Date`] yields a date-only value; a declared
/// [`FieldType::DateTime`] yields a UTC wall-clock date-time with no offset
/// semantics; any other (or no) declaration yields a UTC instant.
///
/// # Errors
///
/// Returns a parse error if the literal does not match the timestamp
/// pattern or names an impossible calendar date or time.
pub fn coerce_temporal(raw: &str, declared: Option<&FieldType>) -> FixtureResult<FieldValue> {
	let caps = TIMESTAMP
		.captures(raw)
		.ok_or_else(|| FixtureError::Parse(format!("not a timestamp literal: {raw}")))?;

	let date = NaiveDate::from_ymd_opt(
		capture_num(&caps, raw, 1)? as i32,
		capture_num(&caps, raw, 2)? as u32,
		capture_num(&caps, raw, 3)? as u32,
	)
	.ok_or_else(|| FixtureError::Parse(format!("invalid calendar date: {raw}")))?;

	let time = if caps.get(4).is_some() {
		NaiveTime::from_hms_nano_opt(
			capture_num(&caps, raw, 4)? as u32,
			capture_num(&caps, raw, 5)? as u32,
			capture_num(&caps, raw, 6)? as u32,
			fraction_nanos(caps.get(7).map_or("", |m| m.as_str())),
		)
		.ok_or_else(|| FixtureError::Parse(format!("invalid time of day: {raw}")))?
	} else {
		NaiveTime::MIN
	};

	let offset_seconds = match caps.get(8) {
		Some(m) => parse_offset(m.as_str(), raw)?,
		None => 0,
	};

	let instant = (date.and_time(time) - Duration::seconds(offset_seconds)).and_utc();

	Ok(match declared {
		Some(FieldType::Date) => FieldValue::Date(instant.date_naive()),
		Some(FieldType::DateTime) => FieldValue::DateTime(instant.naive_utc()),
		_ => FieldValue::Instant(instant),
	})
}

fn capture_num(caps: &regex::Captures<'_>, raw: &str, index: usize) -> FixtureResult<i64> {
	caps.get(index)
		.map_or("", |m| m.as_str())
		.parse::<i64>()
		.map_err(|_| FixtureError::Parse(format!("invalid timestamp literal: {raw}")))
}

/// Converts a fractional-seconds capture to nanoseconds; digits beyond
/// nanosecond precision are dropped.
fn fraction_nanos(digits: &str) -> u32 {
	let mut nanos = 0u32;
	for (i, c) in digits.chars().take(9).enumerate() {
		nanos += c.to_digit(10).unwrap_or(0) * 10u32.pow(8 - i as u32);
	}
	nanos
}

/// Parses an offset literal (`Z`, `-5`, `+05:30`, `-0800`) to seconds.
fn parse_offset(literal: &str, raw: &str) -> FixtureResult<i64> {
	if literal == "Z" {
		return Ok(0);
	}
	let sign: i64 = if literal.starts_with('-') { -1 } else { 1 };
	let body = &literal[1..];

	let parse = |s: &str| -> FixtureResult<i64> {
		s.parse::<i64>()
			.map_err(|_| FixtureError::Parse(format!("invalid timestamp offset: {raw}")))
	};

	let (hours, minutes) = match body.split_once(':') {
		Some((hours, minutes)) => (parse(hours)?, parse(minutes)?),
		None if body.len() > 2 => {
			let split = body.len() - 2;
			(parse(&body[..split])?, parse(&body[split..])?)
		}
		None => (parse(body)?, 0),
	};
	Ok(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{NaiveDateTime, TimeZone, Utc};
	use rstest::rstest;

	fn naive(s: &str) -> NaiveDateTime {
		NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
	}

	#[rstest]
	#[case("2011-11-11")]
	#[case("2011-1-1")]
	#[case("2011-11-11 12:30:45")]
	#[case("2011-11-11t12:30:45")]
	#[case("2001-12-14 21:59:43.10 -5")]
	#[case("2001-12-14T21:59:43.10-05:00")]
	#[case("2011-11-11 12:30:45Z")]
	fn test_recognizes_timestamp_forms(#[case] literal: &str) {
		assert!(is_temporal_literal(literal));
	}

	#[rstest]
	#[case("family")]
	#[case("11-11-2011")]
	#[case("2011-11-11 oops")]
	#[case("2011-11")]
	fn test_rejects_non_timestamps(#[case] literal: &str) {
		assert!(!is_temporal_literal(literal));
	}

	#[rstest]
	fn test_declared_date_drops_time_of_day() {
		let value = coerce_temporal("2011-11-11 12:30:45", Some(&FieldType::Date)).unwrap();
		assert_eq!(
			value,
			FieldValue::Date(NaiveDate::from_ymd_opt(2011, 11, 11).unwrap())
		);
	}

	#[rstest]
	fn test_declared_datetime_keeps_wall_clock() {
		let value = coerce_temporal("2011-11-11 12:30:45", Some(&FieldType::DateTime)).unwrap();
		assert_eq!(value, FieldValue::DateTime(naive("2011-11-11T12:30:45")));
	}

	#[rstest]
	fn test_undeclared_defaults_to_utc_instant() {
		let value = coerce_temporal("2011-11-11 12:30:45", None).unwrap();
		assert_eq!(
			value,
			FieldValue::Instant(Utc.with_ymd_and_hms(2011, 11, 11, 12, 30, 45).unwrap())
		);
	}

	#[rstest]
	fn test_explicit_offset_normalizes_to_utc() {
		let value = coerce_temporal("2001-12-14 21:59:43.10 -5", Some(&FieldType::Instant)).unwrap();
		let expected = Utc
			.with_ymd_and_hms(2001, 12, 15, 2, 59, 43)
			.unwrap()
			.checked_add_signed(Duration::milliseconds(100))
			.unwrap();
		assert_eq!(value, FieldValue::Instant(expected));
	}

	#[rstest]
	fn test_offset_affects_coerced_date() {
		// 23:30 at -02:00 is already the next day in UTC.
		let value = coerce_temporal("2011-11-11 23:30:00 -2", Some(&FieldType::Date)).unwrap();
		assert_eq!(
			value,
			FieldValue::Date(NaiveDate::from_ymd_opt(2011, 11, 12).unwrap())
		);
	}

	#[rstest]
	fn test_date_only_literal_in_datetime_field_is_midnight() {
		let value = coerce_temporal("2011-11-11", Some(&FieldType::DateTime)).unwrap();
		assert_eq!(value, FieldValue::DateTime(naive("2011-11-11T00:00:00")));
	}

	#[rstest]
	fn test_invalid_calendar_date_is_rejected() {
		let result = coerce_temporal("2011-13-41", Some(&FieldType::Date));
		assert!(matches!(result, Err(FixtureError::Parse(_))));
	}

	#[rstest]
	#[case("Z", 0)]
	#[case("-5", -18_000)]
	#[case("+05:30", 19_800)]
	#[case("-0800", -28_800)]
	fn test_offset_parsing(#[case] literal: &str, #[case] expected: i64) {
		assert_eq!(parse_offset(literal, literal).unwrap(), expected);
	}
}
