/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Fixed-point layout units.
//!
//! Every geometric quantity produced during layout is stored as a [`LayoutUnit`]:
//! a signed 32-bit integer counting 1/64ths of a CSS pixel. All arithmetic
//! saturates at the representable bounds instead of wrapping.

#![deny(unsafe_code)]

mod layout_unit;

pub use crate::layout_unit::{
    FIXED_POINT_DENOMINATOR, INT_MAX_FOR_LAYOUT_UNIT, INT_MIN_FOR_LAYOUT_UNIT,
    LAYOUT_UNIT_FRACTIONAL_BITS, LayoutUnit, snap_size_to_pixel,
};
