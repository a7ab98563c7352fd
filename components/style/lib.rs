/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The computed style model.
//!
//! A [`RenderStyle`](render_style::RenderStyle) is the fully resolved set of
//! property values for one box. Its rarely used properties are grouped into
//! reference counted records that are shared between styles until one of them
//! is written to, at which point the writer gets its own copy.
//!
//! Two styles can be compared at several levels of precision: structural
//! equality, the coarse [`StyleRecalcChange`](render_style::StyleRecalcChange)
//! used to decide whether descendants need restyling, and the finer
//! [`StyleDifference`](render_style::StyleDifference) which selects the
//! layout and paint work a change requires.

#![deny(unsafe_code)]

pub mod bezier;
pub mod color;
pub mod data_ref;
pub mod font;
pub mod image;
pub mod length;
pub mod properties;
pub mod render_style;
pub mod style_data;
pub mod values;

pub use layout_unit::LayoutUnit;
