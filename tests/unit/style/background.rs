/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use style::color::{Color, StyleColor};
use style::render_style::RenderStyle;
use style::values::fill_layer::{FillAttachment, FillRepeat};
use style_config::StyleSettings;

#[test]
fn background_layers_fill_down_through_the_style() {
    let mut style = RenderStyle::create();
    let layers = style.access_background_layers();
    layers.ensure_len(4);
    layers.first_mut().set_repeat_x(FillRepeat::NoRepeat);
    layers.first_mut().set_attachment(FillAttachment::Fixed);
    if let Some(second) = layers.get_mut(1) {
        second.set_attachment(FillAttachment::Local);
    }
    layers.fill_unset_properties();

    let repeats: Vec<_> = style
        .background_layers()
        .layers()
        .iter()
        .map(|layer| layer.repeat_x())
        .collect();
    assert_eq!(repeats, vec![FillRepeat::NoRepeat; 4]);

    let attachments: Vec<_> = style
        .background_layers()
        .layers()
        .iter()
        .map(|layer| layer.attachment())
        .collect();
    assert_eq!(
        attachments,
        vec![
            FillAttachment::Fixed,
            FillAttachment::Local,
            FillAttachment::Fixed,
            FillAttachment::Local,
        ]
    );
}

#[test]
fn editing_layers_does_not_touch_the_default_style() {
    let mut style = RenderStyle::create();
    style.access_background_layers().push_layer();
    assert_eq!(style.background_layers().len(), 2);
    assert_eq!(RenderStyle::create().background_layers().len(), 1);
}

#[test]
fn background_color_changes_only_repaint() {
    let old = RenderStyle::create();
    let mut new = old.clone();
    new.set_background_color(StyleColor::Color(Color::rgb(0, 128, 0)));

    let difference = old.visual_invalidation_diff(&new, &StyleSettings::default());
    assert!(difference.needs_paint_invalidation());
    assert!(!difference.needs_layout());
}
