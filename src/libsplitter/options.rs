// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tunable behaviour of the set operators.

use serde::{Deserialize, Serialize};

/// What the union does with two non-empty operands that never share any time.
///
/// The `|` operator always uses the default, `RequireOverlap`. Consumers that load their settings from a file can deserialize this value from `"require_overlap"` or `"allow_disjoint"` and call [union_with](../interval_set/struct.IntervalSet.html#method.union_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnionPolicy {
  /// Fail with `Error::DisjointUnion`.
  #[default]
  RequireOverlap,
  /// Return the plain union of both operands.
  AllowDisjoint
}
