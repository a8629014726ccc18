// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Absolute instants on the UTC timeline.
//!
//! A `Timestamp` counts nanoseconds since the Unix epoch in a signed 64 bits integer, which covers the years 1677 to 2262. The two extremes of this range are the sentinels `Timestamp::MIN` and `Timestamp::MAX`: they stand for "since the beginning of time" and "until the end of time" and bound every complement computed by [IntervalSet](../interval_set/index.html).
//!
//! # Examples
//!
//! ```rust
//! use splitter::Timestamp;
//! use splitter::ops::Seconds;
//!
//! let a: Timestamp = "2007-11-30T16:17:00".parse().unwrap();
//! let b: Timestamp = "2007-11-30T16:17:10.5".parse().unwrap();
//! assert_eq!((b - a).to_seconds(), 10.5);
//! assert!(Timestamp::minimum() < a && b < Timestamp::maximum());
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use num_traits::Bounded;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Formats read as UTC when the string carries no offset. `%.f` also accepts a missing fraction.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Timestamp {
  nanos: i64
}

impl Timestamp
{
  /// Earliest representable instant.
  pub const MIN: Timestamp = Timestamp { nanos: i64::MIN };
  /// Latest representable instant.
  pub const MAX: Timestamp = Timestamp { nanos: i64::MAX };

  pub const fn minimum() -> Timestamp {
    Timestamp::MIN
  }

  pub const fn maximum() -> Timestamp {
    Timestamp::MAX
  }

  pub const fn from_nanos(nanos: i64) -> Timestamp {
    Timestamp { nanos }
  }

  /// Nanoseconds elapsed since 1970-01-01T00:00:00 UTC.
  pub const fn nanos(self) -> i64 {
    self.nanos
  }

  pub fn is_sentinel(self) -> bool {
    self == Timestamp::MIN || self == Timestamp::MAX
  }

  /// Parses an ISO-8601 absolute time such as `2007-11-30T16:17:10`.
  ///
  /// Fractional seconds, a space instead of `T`, an RFC 3339 offset (`Z`, `+01:00`) and a bare date are accepted. Times without an offset are read as UTC.
  pub fn parse(input: &str) -> Result<Timestamp> {
    let trimmed = input.trim();
    let datetime =
      if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        datetime.with_timezone(&Utc)
      }
      else if let Some(naive) = NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
      {
        naive.and_utc()
      }
      else {
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
          .and_then(|date| date.and_hms_opt(0, 0, 0))
          .map(|naive| naive.and_utc())
          .ok_or_else(|| Error::Parse(input.to_string()))?
      };
    Timestamp::from_datetime(datetime)
      .map_err(|_| Error::OutOfRange(input.to_string()))
  }

  pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Timestamp> {
    datetime.timestamp_nanos_opt()
      .map(Timestamp::from_nanos)
      .ok_or_else(|| Error::OutOfRange(datetime.to_rfc3339()))
  }

  pub fn to_datetime(self) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(self.nanos)
  }

  /// Signed number of seconds from `earlier` to `self`, exact even between the two sentinels.
  pub fn seconds_since(self, earlier: Timestamp) -> f64 {
    let nanos = i128::from(self.nanos) - i128::from(earlier.nanos);
    nanos as f64 / NANOS_PER_SEC as f64
  }

  /// Shifts the instant by a (possibly negative) number of seconds, saturating at the sentinels.
  pub fn plus_seconds(self, seconds: f64) -> Timestamp {
    // Float to integer casts saturate and map NaN to zero.
    let shift = (seconds * NANOS_PER_SEC as f64).round() as i64;
    Timestamp::from_nanos(self.nanos.saturating_add(shift))
  }
}

impl Bounded for Timestamp
{
  fn min_value() -> Timestamp {
    Timestamp::MIN
  }

  fn max_value() -> Timestamp {
    Timestamp::MAX
  }
}

impl Sub for Timestamp
{
  type Output = TimeDelta;

  fn sub(self, rhs: Timestamp) -> TimeDelta {
    // The difference of two `i64` can exceed `i64`, but never the range of `TimeDelta`.
    let nanos = i128::from(self.nanos) - i128::from(rhs.nanos);
    let seconds = nanos.div_euclid(NANOS_PER_SEC) as i64;
    let rest = nanos.rem_euclid(NANOS_PER_SEC) as i64;
    TimeDelta::seconds(seconds) + TimeDelta::nanoseconds(rest)
  }
}

impl Add<TimeDelta> for Timestamp
{
  type Output = Timestamp;

  fn add(self, delta: TimeDelta) -> Timestamp {
    match delta.num_nanoseconds() {
      Some(nanos) => Timestamp::from_nanos(self.nanos.saturating_add(nanos)),
      None if delta < TimeDelta::zero() => Timestamp::MIN,
      None => Timestamp::MAX
    }
  }
}

impl Sub<TimeDelta> for Timestamp
{
  type Output = Timestamp;

  fn sub(self, delta: TimeDelta) -> Timestamp {
    self + (-delta)
  }
}

impl FromStr for Timestamp
{
  type Err = Error;

  fn from_str(s: &str) -> Result<Timestamp> {
    Timestamp::parse(s)
  }
}

impl fmt::Display for Timestamp
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_datetime().format(DISPLAY_FORMAT))
  }
}

impl Serialize for Timestamp
{
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where
   S: Serializer
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl<'de> Deserialize<'de> for Timestamp
{
  fn deserialize<D>(deserializer: D) -> std::result::Result<Timestamp, D::Error> where
   D: Deserializer<'de>
  {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ops::Seconds;
  use serde_test::{assert_de_tokens_error, assert_tokens, Token};

  fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
  }

  #[test]
  fn parse_accepted_formats() {
    let reference = ts("2007-11-30T16:17:10");
    let cases = vec![
      (1, "2007-11-30T16:17:10"),
      (2, "2007-11-30 16:17:10"),
      (3, "2007-11-30T16:17:10Z"),
      (4, "2007-11-30T17:17:10+01:00"),
      (5, "2007-11-30T16:17:10.000"),
      (6, "  2007-11-30T16:17:10  "),
    ];
    for (id, input) in cases {
      assert_eq!(ts(input), reference, "test #{} | `{}`", id, input);
    }
    assert_eq!(ts("2007-11-30"), ts("2007-11-30T00:00:00"));
    assert_eq!(ts("1970-01-01T00:00:01").nanos(), 1_000_000_000);
    assert_eq!(ts("1969-12-31T23:59:59.5").nanos(), -500_000_000);
  }

  #[test]
  fn parse_rejects_malformed() {
    for input in vec!["", "yesterday", "2007-11-30T16:17", "2007-13-30T16:17:10", "16:17:10"] {
      assert_eq!(Timestamp::parse(input), Err(Error::Parse(input.to_string())));
    }
    assert_eq!(Timestamp::parse("2300-01-01T00:00:00"),
      Err(Error::OutOfRange("2300-01-01T00:00:00".to_string())));
  }

  #[test]
  fn total_order_matches_subtraction() {
    let a = ts("2007-11-30T16:17:00");
    let b = ts("2007-11-30T16:17:10.25");
    assert!(a < b && b > a && a <= a && a >= a);
    assert_eq!((b - a).to_seconds(), 10.25);
    assert_eq!((a - b).to_seconds(), -10.25);
    assert_eq!(b.seconds_since(a), 10.25);
    assert_eq!((a - a).to_seconds(), 0.0);
  }

  #[test]
  fn sentinels() {
    assert_eq!(Timestamp::minimum(), Timestamp::MIN);
    assert_eq!(Timestamp::maximum(), Timestamp::MAX);
    assert_eq!(<Timestamp as Bounded>::min_value(), Timestamp::MIN);
    assert_eq!(<Timestamp as Bounded>::max_value(), Timestamp::MAX);
    assert!(Timestamp::MIN < ts("1700-01-01T00:00:00"));
    assert!(Timestamp::MAX > ts("2200-01-01T00:00:00"));
    assert!(Timestamp::MIN.is_sentinel() && Timestamp::MAX.is_sentinel());
    assert!(!ts("2007-11-30T16:17:10").is_sentinel());

    let whole = Timestamp::MAX.seconds_since(Timestamp::MIN);
    assert!(whole > 1.8e10 && whole < 1.9e10);
    assert!(((Timestamp::MAX - Timestamp::MIN).to_seconds() - whole).abs() < 1.0);
  }

  #[test]
  fn shifting_saturates() {
    let a = ts("2007-11-30T16:17:00");
    assert_eq!(a + TimeDelta::seconds(10), ts("2007-11-30T16:17:10"));
    assert_eq!(a - TimeDelta::seconds(60), ts("2007-11-30T16:16:00"));
    assert_eq!(a.plus_seconds(0.5), ts("2007-11-30T16:17:00.5"));
    assert_eq!(a.plus_seconds(-1.0), ts("2007-11-30T16:16:59"));
    assert_eq!(Timestamp::MAX + TimeDelta::seconds(1), Timestamp::MAX);
    assert_eq!(Timestamp::MIN - TimeDelta::seconds(1), Timestamp::MIN);
    assert_eq!(a.plus_seconds(1e30), Timestamp::MAX);
    assert_eq!(a + TimeDelta::days(-400 * 365), Timestamp::MIN);
  }

  #[test]
  fn display_round_trip() {
    let cases = vec![
      (1, "2007-11-30T16:17:10"),
      (2, "2007-11-30T16:17:10.500"),
      (3, "1970-01-01T00:00:00"),
    ];
    for (id, input) in cases {
      assert_eq!(ts(input).to_string(), input, "test #{}", id);
    }
    for sentinel in vec![Timestamp::MIN, Timestamp::MAX] {
      assert_eq!(ts(&sentinel.to_string()), sentinel);
    }
  }

  #[test]
  fn serde() {
    assert_tokens(&ts("2007-11-30T16:17:10"), &[Token::Str("2007-11-30T16:17:10")]);
    assert_de_tokens_error::<Timestamp>(&[Token::Str("noon")],
      "cannot parse `noon` as an absolute time");
  }
}
