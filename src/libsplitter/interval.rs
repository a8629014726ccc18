// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Half-open time interval tagged with a destination index.
//!
//! An interval `[start, stop)` covers every instant `t` with `start <= t < stop`. Its index tells a splitter in which output the covered samples go; a filter leaves it to `DEFAULT_INDEX`.
//!
//! Construction never checks that `start <= stop`. A reversed interval (`start > stop`) is a legal value that every operation treats as empty: it has a negative duration, overlaps nothing and vanishes from set operations.
//!
//! # Examples
//!
//! ```rust
//! use splitter::Interval;
//!
//! let a = Interval::parse("2007-11-30T16:17:10", "2007-11-30T16:17:20", 0).unwrap();
//! let b = Interval::parse("2007-11-30T16:17:12", "2007-11-30T16:17:18", 1).unwrap();
//! assert!(a.overlaps(&b));
//! assert_eq!((a & b).duration(), 6.0);
//! assert_eq!((a & b).index(), 0);
//! ```

use crate::error::{Error, Result};
use crate::ops::{Hull, Whole};
use crate::timestamp::Timestamp;
use gcollections::ops::{Intersection, IsEmpty, Overlap};
use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Destination tag of an interval.
pub type Index = i32;

/// Index of intervals that do not designate any particular destination.
pub const DEFAULT_INDEX: Index = 0;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Interval {
  start: Timestamp,
  stop: Timestamp,
  index: Index
}

impl Interval
{
  pub fn new(start: Timestamp, stop: Timestamp) -> Interval {
    Interval::with_index(start, stop, DEFAULT_INDEX)
  }

  pub fn with_index(start: Timestamp, stop: Timestamp, index: Index) -> Interval {
    Interval { start, stop, index }
  }

  /// Builds an interval from two ISO-8601 absolute times.
  pub fn parse(start: &str, stop: &str, index: Index) -> Result<Interval> {
    Ok(Interval::with_index(start.parse()?, stop.parse()?, index))
  }

  pub fn start(self) -> Timestamp {
    self.start
  }

  pub fn stop(self) -> Timestamp {
    self.stop
  }

  pub fn index(self) -> Index {
    self.index
  }

  /// Same range with another destination.
  pub fn retag(self, index: Index) -> Interval {
    Interval { index, ..self }
  }

  /// `stop - start` in seconds, zero or negative for empty intervals.
  pub fn duration(self) -> f64 {
    self.stop.seconds_since(self.start)
  }

  pub fn is_degenerate(self) -> bool {
    self.start > self.stop
  }

  /// True when the interval covers no instant, that is when it is reversed or has a zero length.
  pub fn is_empty(self) -> bool {
    self.start >= self.stop
  }

  pub fn contains(self, t: Timestamp) -> bool {
    self.start <= t && t < self.stop
  }

  /// Both ranges share an instant, bounds included: two intervals touching at a single point overlap. A reversed interval never overlaps.
  pub fn overlaps(&self, other: &Interval) -> bool {
    !self.is_degenerate() && !other.is_degenerate()
      && self.start <= other.stop
      && other.start <= self.stop
  }
}

impl BitAnd for Interval
{
  type Output = Interval;

  /// Intersection carrying the index of `self`. Non-overlapping operands give an interval with `duration() <= 0`.
  fn bitand(self, rhs: Interval) -> Interval {
    Interval::with_index(
      max(self.start, rhs.start),
      min(self.stop, rhs.stop),
      self.index
    )
  }
}

impl BitOr for Interval
{
  type Output = Result<Interval>;

  /// Span of two overlapping (or touching) intervals carrying the index of `self`.
  fn bitor(self, rhs: Interval) -> Result<Interval> {
    if self.overlaps(&rhs) {
      Ok(self.hull(&rhs))
    }
    else {
      Err(Error::NonOverlapping { left: self, right: rhs })
    }
  }
}

impl Hull for Interval
{
  type Output = Interval;

  fn hull(&self, rhs: &Interval) -> Interval {
    if rhs.is_empty() { *self }
    else if self.is_empty() { rhs.retag(self.index) }
    else {
      Interval::with_index(
        min(self.start, rhs.start),
        max(self.stop, rhs.stop),
        self.index
      )
    }
  }
}

impl Whole for Interval
{
  fn whole() -> Interval {
    Interval::new(Timestamp::MIN, Timestamp::MAX)
  }
}

impl Intersection for Interval
{
  type Output = Interval;

  fn intersection(&self, rhs: &Interval) -> Interval {
    *self & *rhs
  }
}

impl Overlap for Interval
{
  fn overlap(&self, rhs: &Interval) -> bool {
    self.overlaps(rhs)
  }
}

impl IsEmpty for Interval
{
  fn is_empty(&self) -> bool {
    Interval::is_empty(*self)
  }
}

impl fmt::Display for Interval
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {})#{}", self.start, self.stop, self.index)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::{assert_tokens, Token};

  fn ts(time: &str) -> Timestamp {
    format!("2007-11-30T{}", time).parse().expect("valid timestamp")
  }

  fn iv(start: &str, stop: &str) -> Interval {
    Interval::new(ts(start), ts(stop))
  }

  #[test]
  fn accessors_and_duration() {
    let a = Interval::with_index(ts("16:17:10"), ts("16:17:20"), 3);
    assert_eq!(a.start(), ts("16:17:10"));
    assert_eq!(a.stop(), ts("16:17:20"));
    assert_eq!(a.index(), 3);
    assert_eq!(a.duration(), 10.0);
    assert_eq!(a.retag(5).index(), 5);
    assert_eq!(iv("16:17:10", "16:17:10").duration(), 0.0);
    assert_eq!(iv("16:17:20", "16:17:10").duration(), -10.0);
    assert_eq!(Interval::new(ts("16:17:10"), ts("16:17:20")).index(), DEFAULT_INDEX);
  }

  #[test]
  fn parse() {
    assert_eq!(Interval::parse("2007-11-30T16:17:10", "2007-11-30T16:17:20", 2),
      Ok(Interval::with_index(ts("16:17:10"), ts("16:17:20"), 2)));
    assert_eq!(Interval::parse("2007-11-30T16:17:10", "later", 0),
      Err(Error::Parse("later".to_string())));
  }

  #[test]
  fn emptiness() {
    let cases = vec![
      (1, iv("16:17:10", "16:17:20"), false, false),
      (2, iv("16:17:10", "16:17:10"), false, true),
      (3, iv("16:17:20", "16:17:10"), true, true),
    ];
    for (id, i, degenerate, empty) in cases {
      assert_eq!(i.is_degenerate(), degenerate, "test #{}", id);
      assert_eq!(i.is_empty(), empty, "test #{}", id);
      assert_eq!(IsEmpty::is_empty(&i), empty, "test #{}", id);
    }
  }

  #[test]
  fn contains_is_half_open() {
    let a = iv("16:17:10", "16:17:20");
    assert!(a.contains(ts("16:17:10")));
    assert!(a.contains(ts("16:17:19")));
    assert!(!a.contains(ts("16:17:20")));
    assert!(!a.contains(ts("16:17:09")));
    assert!(!iv("16:17:20", "16:17:10").contains(ts("16:17:15")));
  }

  #[test]
  fn overlaps() {
    let a = iv("16:17:10", "16:17:20");
    // (id, other, expected)
    let cases = vec![
      (1, iv("16:17:12", "16:17:18"), true),
      (2, iv("16:17:01", "16:17:02"), false),
      (3, iv("16:17:05", "16:17:12"), true),
      (4, iv("16:17:15", "16:17:25"), true),
      (5, iv("16:17:00", "16:17:30"), true),
      (6, iv("16:17:20", "16:17:30"), true),
      (7, iv("16:17:00", "16:17:10"), true),
      (8, iv("16:17:21", "16:17:30"), false),
      (9, iv("16:17:18", "16:17:12"), false),
    ];
    for (id, b, expected) in cases {
      assert_eq!(a.overlaps(&b), expected, "test #{} | {} overlaps {}", id, a, b);
      assert_eq!(b.overlaps(&a), expected, "test #{} | {} overlaps {}", id, b, a);
      assert_eq!(a.overlap(&b), expected, "test #{}", id);
    }
  }

  #[test]
  fn and() {
    let a = Interval::with_index(ts("16:17:10"), ts("16:17:20"), 1);
    let inside = Interval::with_index(ts("16:17:12"), ts("16:17:18"), 2);
    let c = a & inside;
    assert_eq!(c, Interval::with_index(ts("16:17:12"), ts("16:17:18"), 1));
    assert_eq!((inside & a).index(), 2);
    assert_eq!(a.intersection(&inside), c);

    let straddle = iv("16:17:05", "16:17:12");
    assert_eq!(a & straddle, Interval::with_index(ts("16:17:10"), ts("16:17:12"), 1));

    let before = iv("16:17:01", "16:17:02");
    assert!(!a.overlaps(&before));
    assert!((a & before).duration() <= 0.0);
    assert!((before & a).duration() <= 0.0);

    let touching = iv("16:17:20", "16:17:30");
    assert_eq!((a & touching).duration(), 0.0);
  }

  #[test]
  fn or() {
    let a = Interval::with_index(ts("16:17:10"), ts("16:17:20"), 1);
    assert_eq!(a | iv("16:17:15", "16:17:30"),
      Ok(Interval::with_index(ts("16:17:10"), ts("16:17:30"), 1)));
    assert_eq!(a | iv("16:17:12", "16:17:18"), Ok(a));
    assert_eq!(a | iv("16:17:20", "16:17:30"),
      Ok(Interval::with_index(ts("16:17:10"), ts("16:17:30"), 1)));

    let far = iv("16:17:30", "16:17:42");
    assert_eq!(a | far, Err(Error::NonOverlapping { left: a, right: far }));
    let reversed = iv("16:17:18", "16:17:12");
    assert!((a | reversed).is_err());
  }

  #[test]
  fn hull_and_whole() {
    let a = Interval::with_index(ts("16:17:10"), ts("16:17:20"), 4);
    let b = iv("16:17:30", "16:17:40");
    assert_eq!(a.hull(&b), Interval::with_index(ts("16:17:10"), ts("16:17:40"), 4));
    assert_eq!(a.hull(&iv("16:17:40", "16:17:30")), a);
    assert_eq!(iv("16:17:40", "16:17:30").hull(&a), a.retag(DEFAULT_INDEX));
    let whole = Interval::whole();
    assert_eq!((whole.start(), whole.stop()), (Timestamp::MIN, Timestamp::MAX));
    assert!(whole.contains(ts("16:17:10")));
  }

  #[test]
  fn ordering_by_start() {
    let mut v = vec![iv("16:17:30", "16:17:40"), iv("16:17:10", "16:17:50"), iv("16:17:10", "16:17:20")];
    v.sort();
    assert_eq!(v, vec![iv("16:17:10", "16:17:20"), iv("16:17:10", "16:17:50"), iv("16:17:30", "16:17:40")]);
  }

  #[test]
  fn serde() {
    let a = Interval::with_index(ts("16:17:10"), ts("16:17:20"), 2);
    assert_tokens(&a, &[
      Token::Struct { name: "Interval", len: 3 },
      Token::Str("start"),
      Token::Str("2007-11-30T16:17:10"),
      Token::Str("stop"),
      Token::Str("2007-11-30T16:17:20"),
      Token::Str("index"),
      Token::I32(2),
      Token::StructEnd,
    ]);
  }
}
