/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `content` for generated boxes.

use serde::{Deserialize, Serialize};

use crate::image::StyleImage;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum QuoteType {
    OpenQuote,
    CloseQuote,
    NoOpenQuote,
    NoCloseQuote,
}

/// A `counter()` reference.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CounterContent {
    pub identifier: String,
    pub list_style: String,
    pub separator: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContentItem {
    Text(String),
    Image(StyleImage),
    Counter(CounterContent),
    Quote(QuoteType),
}

/// The items of a `content` value, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentData(pub Vec<ContentItem>);

impl ContentData {
    pub fn text(text: &str) -> Self {
        ContentData(vec![ContentItem::Text(text.to_owned())])
    }

    #[inline]
    pub fn items(&self) -> &[ContentItem] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, item: ContentItem) {
        self.0.push(item);
    }

    pub fn has_image(&self) -> bool {
        self.0
            .iter()
            .any(|item| matches!(item, ContentItem::Image(_)))
    }
}
