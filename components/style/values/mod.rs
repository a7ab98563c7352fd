/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed value types shared by the style data groups.

pub mod animated;
pub mod basic_shape;
pub mod border;
pub mod clip_path;
pub mod content;
pub mod counter;
pub mod easing;
pub mod fill_layer;
pub mod filter;
pub mod nine_piece_image;
pub mod quotes;
pub mod shadow;
pub mod shape_value;
pub mod text_decoration;
pub mod transform;
