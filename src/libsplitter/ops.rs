// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interval and duration specific operations.

use chrono::TimeDelta;

pub trait Hull<RHS = Self>
{
  type Output;
  fn hull(&self, rhs: &RHS) -> Self::Output;
}

/// The value covering the entire timeline, from `Timestamp::MIN` to `Timestamp::MAX`.
pub trait Whole
{
  fn whole() -> Self;
}

/// Conversion of a signed elapsed time into floating-point seconds.
pub trait Seconds
{
  fn to_seconds(&self) -> f64;
}

impl Seconds for TimeDelta
{
  fn to_seconds(&self) -> f64 {
    // `subsec_nanos` carries the same sign as the whole seconds.
    self.num_seconds() as f64 + f64::from(self.subsec_nanos()) / 1e9
  }
}
