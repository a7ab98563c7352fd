/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use servo_arc::Arc;

use super::font_description::FontDescription;

/// Resolves family names to available faces, including web fonts.
///
/// The version changes whenever the set of available faces does, which
/// invalidates fallback lists built against an older version.
pub trait FontSelector {
    fn version(&self) -> u32;

    fn is_family_available(&self, _family: &str) -> bool {
        true
    }
}

/// The families a font will try, in order, as resolved by a selector.
#[derive(Debug, PartialEq)]
pub struct FontFallbackList {
    selector_version: Option<u32>,
    families: Vec<String>,
}

impl FontFallbackList {
    fn new(description: &FontDescription, selector: Option<&dyn FontSelector>) -> Self {
        let mut families: Vec<String> = description
            .family
            .iter()
            .filter(|family| selector.is_none_or(|selector| selector.is_family_available(family)))
            .map(str::to_owned)
            .collect();
        if families.is_empty() {
            if let Some(generic) = description.generic_family.family_name() {
                families.push(generic.to_owned());
            }
        }
        FontFallbackList {
            selector_version: selector.map(|selector| selector.version()),
            families,
        }
    }

    #[inline]
    pub fn selector_version(&self) -> Option<u32> {
        self.selector_version
    }

    #[inline]
    pub fn families(&self) -> &[String] {
        &self.families
    }
}

/// A font description together with the fallback list resolved for it.
#[derive(Clone, Debug, Default)]
pub struct Font {
    description: FontDescription,
    fallback_list: Option<Arc<FontFallbackList>>,
}

impl Font {
    pub fn new(description: FontDescription) -> Self {
        Font {
            description,
            fallback_list: None,
        }
    }

    #[inline]
    pub fn description(&self) -> &FontDescription {
        &self.description
    }

    #[inline]
    pub fn fallback_list(&self) -> Option<&FontFallbackList> {
        self.fallback_list.as_deref()
    }

    /// Rebuilds the fallback list against `selector`.
    pub fn update(&mut self, selector: Option<&dyn FontSelector>) {
        self.fallback_list = Some(Arc::new(FontFallbackList::new(&self.description, selector)));
    }

    /// Whether the fallback list was built against the current state of
    /// `selector`.
    pub fn is_fallback_valid(&self, selector: Option<&dyn FontSelector>) -> bool {
        self.fallback_list.as_ref().is_some_and(|list| {
            list.selector_version == selector.map(|selector| selector.version())
        })
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        if self.description != other.description {
            return false;
        }
        let version = |font: &Font| font.fallback_list.as_ref().and_then(|list| list.selector_version);
        version(self) == version(other)
    }
}
