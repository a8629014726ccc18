// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library represents a timeline as a set of half-open time intervals, each one tagged with a destination index, and combines such sets with a small algebra: intersection (`&`), union (`|`), complement (`!`) and the application of a splitter to a filter (`+`). A run-log manager uses the resulting sets to filter a time series, or to split it into several outputs keyed by index.
//!
//! Operators never mutate their operands. The union and the `+` operator return a `Result` because some operand combinations are configuration errors (see [Error](error/enum.Error.html)).
//!
//! # Examples
//!
//! For examples see the [interval module](interval/index.html), the [interval_set module](interval_set/index.html) or the [query module](query/index.html).
//!
//! # References
//! * [Boost Interval Container Library](http://www.boost.org/doc/libs/1_57_0/libs/icl/doc/html/index.html)
//!

pub mod error;
pub mod interval;
pub mod interval_set;
pub mod ops;
pub mod options;
pub mod query;
pub mod timestamp;

pub use crate::error::{Error, Result};
pub use crate::interval::{Index, Interval, DEFAULT_INDEX};
pub use crate::interval_set::IntervalSet;
pub use crate::options::UnionPolicy;
pub use crate::timestamp::Timestamp;
