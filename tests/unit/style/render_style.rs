/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use style::color::Color;
use style::length::Length;
use style::render_style::constants::{Display, Position};
use style::render_style::{
    IsAtShadowBoundary, RenderStyle, StyleDifference, StyleRecalcChange, default_style,
};
use style_config::StyleSettings;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn propagation(old: &RenderStyle, new: &RenderStyle) -> StyleRecalcChange {
    RenderStyle::style_propagation_diff(Some(old), Some(new))
}

#[test]
fn created_styles_equal_the_default_style() {
    let style = RenderStyle::create();
    assert_eq!(&style, default_style());
    assert_eq!(RenderStyle::create_default_style(), *default_style());
}

#[test]
fn equality_is_reflexive_and_symmetric() {
    let mut a = RenderStyle::create();
    a.set_display(Display::Block);
    a.set_opacity(0.25);
    a.set_text_indent(Length::Fixed(12.));
    assert_eq!(a, a);

    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(b, a);

    let mut c = b.clone();
    c.set_tab_size(4);
    assert_ne!(a, c);
    assert_ne!(c, a);
}

#[test]
fn writes_after_inheriting_leave_the_parent_alone() {
    let mut parent = RenderStyle::create();
    parent.set_color(Color::BLACK);
    parent.set_text_indent(Length::Fixed(3.));

    let mut child = RenderStyle::create();
    child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
    assert!(child.inherited_data_shared(&parent));
    assert!(!child.inherited_not_equal(&parent));

    child.set_color(Color::WHITE);
    child.set_text_indent(Length::Fixed(9.));
    assert_eq!(parent.color(), Color::BLACK);
    assert_eq!(parent.text_indent(), Length::Fixed(3.));
    assert!(!child.inherited_data_shared(&parent));
    assert!(child.inherited_not_equal(&parent));
}

#[test]
fn non_inherited_copy_makes_styles_indistinguishable() {
    init_logging();
    let mut source = RenderStyle::create();
    source.set_position(Position::Relative);
    source.set_width(Length::Fixed(40.));
    source.set_opacity(0.5);

    let mut target = RenderStyle::create();
    target.copy_non_inherited_from(&source);
    assert_eq!(target, source);
    assert_eq!(
        target.visual_invalidation_diff(&source, &StyleSettings::default()),
        StyleDifference::empty()
    );
    assert_eq!(propagation(&source, &target), StyleRecalcChange::NoChange);
}

#[test]
fn propagation_prefers_reattach_over_inherit() {
    let old = RenderStyle::create();

    let mut new = old.clone();
    new.set_display(Display::Block);
    assert!(!new.inherited_not_equal(&old));
    assert_eq!(propagation(&old, &new), StyleRecalcChange::Reattach);

    new.set_color(Color::WHITE);
    assert_eq!(propagation(&old, &new), StyleRecalcChange::Reattach);

    let mut recolored = old.clone();
    recolored.set_color(Color::WHITE);
    assert_eq!(propagation(&old, &recolored), StyleRecalcChange::Inherit);

    assert_eq!(
        RenderStyle::style_propagation_diff(None, Some(&old)),
        StyleRecalcChange::Reattach
    );
}

#[test]
fn absolutely_positioned_box_moving_is_not_a_relayout() {
    init_logging();
    let mut old = RenderStyle::create();
    old.set_position(Position::Absolute);
    old.set_width(Length::Fixed(200.));
    old.set_top(Length::Fixed(10.));
    old.set_left(Length::Fixed(10.));
    assert!(old.right().is_auto());
    assert!(old.bottom().is_auto());

    let mut new = old.clone();
    new.set_top(Length::Fixed(30.));
    new.set_left(Length::Fixed(50.));

    let difference = old.visual_invalidation_diff(&new, &StyleSettings::default());
    assert!(difference.needs_positioned_movement_layout());
    assert!(!difference.needs_full_layout());
}

#[test]
fn anonymous_boxes_inherit_from_their_parent() {
    let mut parent = RenderStyle::create();
    parent.set_color(Color::WHITE);
    parent.set_display(Display::Table);

    let anonymous = RenderStyle::create_anonymous_style_with_display(&parent, Display::Block);
    assert_eq!(anonymous.display(), Display::Block);
    assert_eq!(anonymous.color(), Color::WHITE);
    assert!(anonymous.inherited_data_shared(&parent));
}
