/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `counter-reset` and `counter-increment`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The directives one element applies to a single counter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CounterDirectives {
    pub reset: Option<i32>,
    pub increment: Option<i32>,
}

impl CounterDirectives {
    pub fn add_increment(&mut self, value: i32) {
        self.increment = Some(self.increment.unwrap_or(0).saturating_add(value));
    }

    #[inline]
    pub fn is_reset(&self) -> bool {
        self.reset.is_some()
    }

    #[inline]
    pub fn is_increment(&self) -> bool {
        self.increment.is_some()
    }

    /// Merges `other` into a copy of `self`. Later resets win, increments
    /// accumulate.
    pub fn combined(&self, other: &CounterDirectives) -> CounterDirectives {
        let mut result = *self;
        if other.reset.is_some() {
            result.reset = other.reset;
        }
        if let Some(increment) = other.increment {
            result.add_increment(increment);
        }
        result
    }
}

pub type CounterDirectiveMap = BTreeMap<String, CounterDirectives>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_accumulate() {
        let mut directives = CounterDirectives::default();
        directives.add_increment(2);
        directives.add_increment(3);
        assert_eq!(directives.increment, Some(5));

        let combined = directives.combined(&CounterDirectives {
            reset: Some(1),
            increment: Some(1),
        });
        assert_eq!(combined.reset, Some(1));
        assert_eq!(combined.increment, Some(6));
    }
}
