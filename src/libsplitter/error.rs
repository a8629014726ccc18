// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised by timestamp parsing and by the `|` and `+` operators.

use crate::interval::{Index, Interval};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// The string is not a recognized absolute-time format.
  #[error("cannot parse `{0}` as an absolute time")]
  Parse(String),

  /// The string is well-formed but the instant cannot be represented.
  #[error("`{0}` lies outside the representable time range")]
  OutOfRange(String),

  /// The two intervals given to `Interval | Interval` do not overlap.
  #[error("cannot apply `|` to the non-overlapping intervals {left} and {right}")]
  NonOverlapping { left: Interval, right: Interval },

  /// Both operands of `|` are non-empty but never share any time, so the merge
  /// would need two outputs from a single slot.
  #[error("cannot merge disjoint interval sets: two outputs would be required from one merge slot")]
  DisjointUnion,

  /// The left operand of `+` must be a filter (every index is the default one).
  #[error("left operand of `+` is not a filter: interval #{position} carries index {index}")]
  NotAFilter { position: usize, index: Index },
}
