/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `quotes`.

use serde::{Deserialize, Serialize};

/// Pairs of open and close quotes, outermost first.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct QuotesData {
    pairs: Vec<(String, String)>,
}

impl QuotesData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        QuotesData { pairs }
    }

    pub fn add_pair(&mut self, open: &str, close: &str) {
        self.pairs.push((open.to_owned(), close.to_owned()));
    }

    /// The opening quote at nesting `depth`. Depths past the end reuse the
    /// innermost pair.
    pub fn open_quote(&self, depth: i32) -> &str {
        self.pair_at(depth).map_or("", |(open, _)| open.as_str())
    }

    pub fn close_quote(&self, depth: i32) -> &str {
        self.pair_at(depth).map_or("", |(_, close)| close.as_str())
    }

    fn pair_at(&self, depth: i32) -> Option<&(String, String)> {
        let depth = usize::try_from(depth).ok()?;
        self.pairs.get(depth).or_else(|| self.pairs.last())
    }
}
