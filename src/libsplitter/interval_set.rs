// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered sequence of tagged time intervals and its algebra.
//!
//! An `IntervalSet` is either a *filter*, a mask of the time to keep whose indices are all `DEFAULT_INDEX`, or a *splitter*, a partition of time whose indices designate destinations. Callers append intervals in any order; the operators discard empty intervals, sort their operands and return new sets sorted by start time:
//!
//! * `a & b` keeps every non-empty pairwise intersection with the index of the `a` piece. Operands are only sorted, not merged, so contiguous pieces stay distinct.
//! * `a | b` merges overlapping or touching intervals into maximal spans. It fails when both operands are non-empty but never share any time (see [UnionPolicy](../options/enum.UnionPolicy.html)).
//! * `!a` is the complement within `[Timestamp::MIN, Timestamp::MAX)`.
//! * `filter + splitter` merges the filter, then keeps its pieces covered by the splitter, tagged with the splitter index. It fails when the left operand is not a filter.
//!
//! Empty and reversed intervals cover no time and are discarded by every operator.
//!
//! # Examples
//!
//! ```rust
//! use splitter::{Interval, IntervalSet, Timestamp};
//!
//! let at = |t: &str| -> Timestamp { format!("2007-11-30T{}", t).parse().unwrap() };
//! let splitter: IntervalSet = vec![
//!   Interval::with_index(at("16:17:00"), at("16:18:00"), 1),
//!   Interval::with_index(at("16:18:00"), at("16:19:00"), 2),
//! ].into();
//! let filter: IntervalSet = vec![Interval::new(at("16:17:40"), at("16:18:10"))].into();
//!
//! let split = (&filter + &splitter).unwrap();
//! assert_eq!(split.len(), 2);
//! assert_eq!(split[0], Interval::with_index(at("16:17:40"), at("16:18:00"), 1));
//! assert_eq!(split[1], Interval::with_index(at("16:18:00"), at("16:18:10"), 2));
//! ```

use crate::error::{Error, Result};
use crate::interval::{Interval, DEFAULT_INDEX};
use crate::ops::Hull;
use crate::options::UnionPolicy;
use crate::timestamp::Timestamp;
use gcollections::ops::{Cardinality, Complement, Empty, Intersection, Union};
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::iter::FromIterator;
use std::ops::{Add, BitAnd, BitOr, Index, Not};
use std::slice;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSet {
  intervals: Vec<Interval>
}

impl IntervalSet
{
  pub fn new() -> IntervalSet {
    IntervalSet { intervals: vec![] }
  }

  pub fn len(&self) -> usize {
    self.intervals.len()
  }

  pub fn is_empty(&self) -> bool {
    self.intervals.is_empty()
  }

  /// Appends `x` as is, without sorting nor merging.
  pub fn push(&mut self, x: Interval) {
    self.intervals.push(x);
  }

  pub fn get(&self, i: usize) -> Option<&Interval> {
    self.intervals.get(i)
  }

  pub fn iter(&self) -> slice::Iter<'_, Interval> {
    self.intervals.iter()
  }

  pub fn as_slice(&self) -> &[Interval] {
    &self.intervals
  }

  pub fn into_vec(self) -> Vec<Interval> {
    self.intervals
  }

  /// Smallest interval covering every non-empty interval of the set, with the index of the first one.
  pub fn span(&self) -> Option<Interval> {
    non_empty(&self.intervals).into_iter()
      .reduce(|span, x| span.hull(&x))
  }

  /// Sum of the positive durations, in seconds. Overlapping intervals are counted twice.
  pub fn total_duration(&self) -> f64 {
    self.intervals.iter()
      .map(|i| i.duration())
      .filter(|d| *d > 0.0)
      .sum()
  }

  /// True when no interval designates a destination, so the set can be the left operand of `+`.
  pub fn is_filter(&self) -> bool {
    self.intervals.iter().all(|i| i.index() == DEFAULT_INDEX)
  }

  /// Stable sort by start time.
  pub fn sorted(&self) -> IntervalSet {
    let mut intervals = self.intervals.clone();
    sort_by_start(&mut intervals);
    IntervalSet { intervals }
  }

  /// Drops empty and reversed intervals then merges overlapping or touching ones, keeping the index of the first interval of each merged group.
  pub fn normalized(&self) -> IntervalSet {
    IntervalSet { intervals: merge(non_empty(&self.intervals)) }
  }

  /// Union of `self` and `rhs`.
  ///
  /// With `UnionPolicy::RequireOverlap`, two non-empty operands (once empty and reversed intervals are discarded) must share a positive amount of time, otherwise the merge would need two outputs from a single slot and `Error::DisjointUnion` is returned. Touching intervals are still merged together.
  pub fn union_with(&self, rhs: &IntervalSet, policy: UnionPolicy) -> Result<IntervalSet> {
    let a = non_empty(&self.intervals);
    let b = non_empty(&rhs.intervals);
    if policy == UnionPolicy::RequireOverlap
     && !a.is_empty() && !b.is_empty()
     && !shares_time(&a, &b)
    {
      debug!(left = a.len(), right = b.len(), "union of disjoint interval sets");
      return Err(Error::DisjointUnion);
    }
    let mut intervals = a;
    intervals.extend(b);
    let res = IntervalSet { intervals: merge(intervals) };
    trace!(left = self.len(), right = rhs.len(), result = res.len(), "union");
    Ok(res)
  }

  /// Applies the splitter to the filter `self`: every piece of a filter interval covered by a splitter interval, tagged with the index of the latter.
  pub fn plus(&self, splitter: &IntervalSet) -> Result<IntervalSet> {
    if let Some((position, x)) = self.intervals.iter().enumerate()
      .find(|(_, x)| x.index() != DEFAULT_INDEX)
    {
      debug!(position, index = x.index(), "left operand of `+` is a splitter");
      return Err(Error::NotAFilter { position, index: x.index() });
    }
    // Every index is the default one, so merging the filter loses nothing.
    let res = IntervalSet { intervals: overlapping_pieces(&self.normalized(), splitter, |f, s| *s & *f) };
    trace!(filter = self.len(), splitter = splitter.len(), result = res.len(), "plus");
    Ok(res)
  }
}

fn sort_by_start(intervals: &mut Vec<Interval>) {
  intervals.sort_by_key(|i| i.start());
}

fn non_empty(intervals: &[Interval]) -> Vec<Interval> {
  let kept: Vec<Interval> = intervals.iter()
    .copied()
    .filter(|i| !i.is_empty())
    .collect();
  let dropped = intervals.len() - kept.len();
  if dropped > 0 {
    debug!(dropped, "discarded empty or reversed intervals");
  }
  kept
}

fn joinable(first: &Interval, second: &Interval) -> bool {
  second.start() <= first.stop()
}

// Precondition: `x` does not start before the last interval of `res`.
fn join_or_push(res: &mut Vec<Interval>, x: Interval) {
  if let Some(last) = res.last_mut() {
    if joinable(last, &x) {
      *last = Interval::with_index(last.start(), max(last.stop(), x.stop()), last.index());
      return;
    }
  }
  res.push(x);
}

fn merge(mut intervals: Vec<Interval>) -> Vec<Interval> {
  sort_by_start(&mut intervals);
  let mut res = Vec::with_capacity(intervals.len());
  for x in intervals {
    join_or_push(&mut res, x);
  }
  res
}

fn shares_time(a: &[Interval], b: &[Interval]) -> bool {
  a.iter().any(|x| b.iter().any(|y| !(*x & *y).is_empty()))
}

/// Every non-empty `piece(l, r)` for `l` in `left` and `r` in `right` that overlap, sorted by start.
///
/// Both operands are sorted first. The right intervals stopping before the current left start are skipped for good, and the scan of the right operand stops as soon as its starts pass the current left stop.
fn overlapping_pieces<F>(left: &IntervalSet, right: &IntervalSet, piece: F) -> Vec<Interval> where
 F: Fn(&Interval, &Interval) -> Interval
{
  let mut left = non_empty(&left.intervals);
  let mut right = non_empty(&right.intervals);
  sort_by_start(&mut left);
  sort_by_start(&mut right);

  let mut res = vec![];
  let mut first_alive = 0;
  for l in &left {
    while first_alive < right.len() && right[first_alive].stop() <= l.start() {
      first_alive += 1;
    }
    for r in right[first_alive..].iter().take_while(|r| r.start() < l.stop()) {
      let p = piece(l, r);
      if !p.is_empty() {
        res.push(p);
      }
    }
  }
  sort_by_start(&mut res);
  res
}

impl From<Vec<Interval>> for IntervalSet
{
  fn from(intervals: Vec<Interval>) -> IntervalSet {
    IntervalSet { intervals }
  }
}

impl FromIterator<Interval> for IntervalSet
{
  fn from_iter<I>(iterable: I) -> IntervalSet where
   I: IntoIterator<Item=Interval>
  {
    IntervalSet { intervals: iterable.into_iter().collect() }
  }
}

impl Extend<Interval> for IntervalSet
{
  fn extend<I>(&mut self, iterable: I) where
   I: IntoIterator<Item=Interval>
  {
    self.intervals.extend(iterable);
  }
}

impl IntoIterator for IntervalSet
{
  type Item = Interval;
  type IntoIter = ::std::vec::IntoIter<Interval>;

  fn into_iter(self) -> Self::IntoIter {
    self.intervals.into_iter()
  }
}

impl<'a> IntoIterator for &'a IntervalSet
{
  type Item = &'a Interval;
  type IntoIter = slice::Iter<'a, Interval>;

  fn into_iter(self) -> Self::IntoIter {
    self.intervals.iter()
  }
}

impl Index<usize> for IntervalSet
{
  type Output = Interval;

  fn index(&self, i: usize) -> &Interval {
    &self.intervals[i]
  }
}

impl Empty for IntervalSet
{
  fn empty() -> IntervalSet {
    IntervalSet::new()
  }
}

impl Cardinality for IntervalSet
{
  type Size = usize;

  fn size(&self) -> usize {
    self.intervals.len()
  }
}

impl Intersection for IntervalSet
{
  type Output = IntervalSet;

  fn intersection(&self, rhs: &IntervalSet) -> IntervalSet {
    let res = IntervalSet { intervals: overlapping_pieces(self, rhs, |l, r| *l & *r) };
    trace!(left = self.len(), right = rhs.len(), result = res.len(), "intersection");
    res
  }
}

impl Union for IntervalSet
{
  type Output = Result<IntervalSet>;

  fn union(&self, rhs: &IntervalSet) -> Result<IntervalSet> {
    self.union_with(rhs, UnionPolicy::default())
  }
}

impl Complement for IntervalSet
{
  fn complement(&self) -> IntervalSet {
    let mut res = IntervalSet::new();
    let mut gap_start = Timestamp::MIN;
    for x in merge(non_empty(&self.intervals)) {
      if gap_start < x.start() {
        res.push(Interval::new(gap_start, x.start()));
      }
      gap_start = x.stop();
    }
    if gap_start < Timestamp::MAX {
      res.push(Interval::new(gap_start, Timestamp::MAX));
    }
    trace!(operand = self.len(), result = res.len(), "complement");
    res
  }
}

impl<'a> BitAnd for &'a IntervalSet
{
  type Output = IntervalSet;

  fn bitand(self, rhs: &'a IntervalSet) -> IntervalSet {
    self.intersection(rhs)
  }
}

impl<'a> BitOr for &'a IntervalSet
{
  type Output = Result<IntervalSet>;

  fn bitor(self, rhs: &'a IntervalSet) -> Result<IntervalSet> {
    self.union(rhs)
  }
}

impl<'a> Add for &'a IntervalSet
{
  type Output = Result<IntervalSet>;

  fn add(self, rhs: &'a IntervalSet) -> Result<IntervalSet> {
    self.plus(rhs)
  }
}

impl<'a> Not for &'a IntervalSet
{
  type Output = IntervalSet;

  fn not(self) -> IntervalSet {
    self.complement()
  }
}

macro_rules! owned_binop_impl
{
  ( $( $t: ident, $m: ident, $out: ty );* ) =>
  {$(
    impl $t for IntervalSet
    {
      type Output = $out;

      fn $m(self, rhs: IntervalSet) -> $out {
        (&self).$m(&rhs)
      }
    }
  )*}
}

owned_binop_impl!(
  BitAnd, bitand, IntervalSet;
  BitOr, bitor, Result<IntervalSet>;
  Add, add, Result<IntervalSet>
);

impl Not for IntervalSet
{
  type Output = IntervalSet;

  fn not(self) -> IntervalSet {
    (&self).not()
  }
}
