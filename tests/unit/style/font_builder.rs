/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::cell::Cell;

use style::font::{FontBuilder, FontSelector, FontSizeValue, FontWeight, GenericFamily};
use style::render_style::{IsAtShadowBoundary, RenderStyle};
use style_config::FontSettings;

struct CountingSelector {
    version: Cell<u32>,
}

impl FontSelector for CountingSelector {
    fn version(&self) -> u32 {
        self.version.get()
    }
}

fn document_style(settings: &FontSettings) -> RenderStyle {
    let mut style = RenderStyle::create();
    let mut builder = FontBuilder::new(&mut style, settings.clone());
    builder.create_font_for_document(None);
    style
}

#[test]
fn document_font_uses_the_default_size() {
    let settings = FontSettings::default();
    let style = document_style(&settings);
    let description = style.font_description();
    assert_eq!(description.generic_family, GenericFamily::Standard);
    assert_eq!(description.family.first(), Some("Times"));
    assert_eq!(description.specified_size, 16.);
    assert_eq!(style.font_size(), 16.);
}

#[test]
fn switching_to_monospace_rescales_keyword_sizes() {
    let settings = FontSettings::default();
    let parent = document_style(&settings);

    let mut child = RenderStyle::create();
    child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
    let mut builder = FontBuilder::new(&mut child, settings);
    builder.set_font_family_value(&["monospace"]);
    assert!(builder.font_dirty());
    builder.create_font(None, parent.font_description());

    assert_eq!(child.font_description().generic_family, GenericFamily::Monospace);
    assert_eq!(child.font_size(), 13.);
    assert_eq!(parent.font_size(), 16.);
}

#[test]
fn relative_sizes_follow_the_parent() {
    let settings = FontSettings::default();
    let parent = document_style(&settings);

    let mut child = RenderStyle::create();
    child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
    let mut builder = FontBuilder::new(&mut child, settings);
    builder.set_font_size_value(FontSizeValue::Percentage(150.), parent.font_description());
    builder.set_weight(FontWeight::BOLD);
    builder.create_font(None, parent.font_description());

    assert_eq!(child.font_size(), 24.);
    assert!(child.font_description().weight.is_bold());
    assert_eq!(child.font_description().keyword_size, 0);
}

#[test]
fn zoom_scales_the_computed_size() {
    let settings = FontSettings::default();
    let parent = document_style(&settings);

    let mut child = RenderStyle::create();
    child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
    let changed = child.set_effective_zoom(2.);
    let mut builder = FontBuilder::new(&mut child, settings);
    builder.did_change_effective_zoom(changed);
    builder.create_font(None, parent.font_description());

    assert_eq!(child.font_description().specified_size, 16.);
    assert_eq!(child.font_size(), 32.);
}

#[test]
fn fallback_list_is_tied_to_the_selector_version() {
    let selector = CountingSelector {
        version: Cell::new(1),
    };
    let settings = FontSettings::default();
    let parent = document_style(&settings);

    let mut child = RenderStyle::create();
    child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
    let mut builder = FontBuilder::new(&mut child, settings);
    builder.set_font_size_value(FontSizeValue::Px(20.), parent.font_description());
    builder.create_font(Some(&selector), parent.font_description());
    assert!(child.font().is_fallback_valid(Some(&selector)));

    selector.version.set(2);
    assert!(!child.font().is_fallback_valid(Some(&selector)));
    child.update_font(Some(&selector));
    assert!(child.font().is_fallback_valid(Some(&selector)));
}
