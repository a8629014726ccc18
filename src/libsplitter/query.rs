// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-sample lookups for log filtering and splitting.
//!
//! A run log is a series of timestamped samples. Filtering keeps the samples covered by a filter; splitting sends every sample to the output designated by the index of the splitter interval covering it. Samples outside every interval are excluded.
//!
//! # Examples
//!
//! ```rust
//! use splitter::{Interval, IntervalSet, Timestamp};
//!
//! let at = |t: &str| -> Timestamp { format!("2007-11-30T{}", t).parse().unwrap() };
//! let periods: IntervalSet = vec![
//!   Interval::with_index(at("16:17:00"), at("16:18:00"), 1),
//!   Interval::with_index(at("16:18:00"), at("16:19:00"), 2),
//! ].into();
//!
//! let samples = vec![at("16:16:59"), at("16:17:30"), at("16:18:00"), at("16:18:30")];
//! let outputs = periods.split_times(&samples);
//! assert_eq!(outputs[&1], vec![1]);
//! assert_eq!(outputs[&2], vec![2, 3]);
//! ```

use crate::interval::{Index, Interval};
use crate::interval_set::IntervalSet;
use crate::timestamp::Timestamp;
use gcollections::kind::Collection;
use gcollections::ops::Contains;
use std::collections::BTreeMap;
use tracing::trace;

impl IntervalSet
{
  /// Index of the first interval, in set order, covering `t`.
  pub fn destination(&self, t: Timestamp) -> Option<Index> {
    self.covering(t).map(|i| i.index())
  }

  /// Positions of the samples covered by the set.
  pub fn filter_times(&self, times: &[Timestamp]) -> Vec<usize> {
    let intervals = self.as_slice();
    let sorted = is_sorted_disjoint(intervals);
    let kept: Vec<usize> = times.iter()
      .enumerate()
      .filter(|(_, t)| covering_in(intervals, sorted, **t).is_some())
      .map(|(position, _)| position)
      .collect();
    trace!(samples = times.len(), kept = kept.len(), sorted, "filter");
    kept
  }

  /// Positions of the samples grouped by destination index. Samples covered by no interval are left out.
  pub fn split_times(&self, times: &[Timestamp]) -> BTreeMap<Index, Vec<usize>> {
    let intervals = self.as_slice();
    let sorted = is_sorted_disjoint(intervals);
    let mut outputs: BTreeMap<Index, Vec<usize>> = BTreeMap::new();
    for (position, t) in times.iter().enumerate() {
      if let Some(x) = covering_in(intervals, sorted, *t) {
        outputs.entry(x.index()).or_default().push(position);
      }
    }
    trace!(samples = times.len(), outputs = outputs.len(), sorted, "split");
    outputs
  }

  fn covering(&self, t: Timestamp) -> Option<&Interval> {
    let intervals = self.as_slice();
    covering_in(intervals, is_sorted_disjoint(intervals), t)
  }
}

/// First interval covering `t`. `sorted` tells whether `intervals` is sorted and disjoint, enabling a binary search.
fn covering_in(intervals: &[Interval], sorted: bool, t: Timestamp) -> Option<&Interval> {
  if sorted {
    // Every interval before the last one starting at or before `t` stops before `t`.
    let after = intervals.partition_point(|i| i.start() <= t);
    after.checked_sub(1)
      .map(|last| &intervals[last])
      .filter(|i| i.contains(t))
  }
  else {
    intervals.iter().find(|i| i.contains(t))
  }
}

fn is_sorted_disjoint(intervals: &[Interval]) -> bool {
  intervals.windows(2)
    .all(|w| w[0].start() <= w[1].start() && w[0].stop() <= w[1].start())
}

impl Collection for IntervalSet
{
  type Item = Timestamp;
}

impl Contains for IntervalSet
{
  fn contains(&self, value: &Timestamp) -> bool {
    self.covering(*value).is_some()
  }
}
