/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Handles to images referenced from style.
//!
//! Loading and decoding live outside of the style system; a style only needs
//! to know which resource it points at and a couple of facts about it that
//! influence painting shortcuts.

use std::fmt;

use servo_arc::Arc;

#[derive(Debug)]
struct ImageResource {
    url: String,
    is_loaded: bool,
    known_to_be_opaque: bool,
}

/// A shared reference to an image resource.
///
/// Two `StyleImage`s are equal only when they refer to the same resource
/// object, matching how the image cache hands out resources.
#[derive(Clone)]
pub struct StyleImage(Arc<ImageResource>);

impl StyleImage {
    pub fn new(url: &str) -> Self {
        StyleImage::with_state(url, false, false)
    }

    pub fn with_state(url: &str, is_loaded: bool, known_to_be_opaque: bool) -> Self {
        StyleImage(Arc::new(ImageResource {
            url: url.to_owned(),
            is_loaded,
            known_to_be_opaque,
        }))
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.0.url
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.0.is_loaded
    }

    #[inline]
    pub fn known_to_be_opaque(&self) -> bool {
        self.0.is_loaded && self.0.known_to_be_opaque
    }
}

impl PartialEq for StyleImage {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StyleImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StyleImage({:?})", self.0.url)
    }
}
