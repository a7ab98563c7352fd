/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The records a [`RenderStyle`](crate::render_style::RenderStyle) is made
//! of. Each record is held through a [`DataRef`](crate::data_ref::DataRef)
//! and shared between styles until written.
//!
//! Records compare structurally. Where a narrower notion of equality is
//! needed by invalidation, the record offers a separately named method.

mod background_data;
mod box_data;
mod inherited_data;
mod rare_inherited_data;
mod rare_non_inherited_data;
mod surround_data;
mod visual_data;

pub use self::background_data::StyleBackgroundData;
pub use self::box_data::StyleBoxData;
pub use self::inherited_data::StyleInheritedData;
pub use self::rare_inherited_data::StyleRareInheritedData;
pub use self::rare_non_inherited_data::{
    StyleFilterData, StyleFlexibleBoxData, StyleRareNonInheritedData, StyleTransformData,
    StyleWillChangeData,
};
pub use self::surround_data::StyleSurroundData;
pub use self::visual_data::StyleVisualData;
