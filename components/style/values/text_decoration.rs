/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Text decoration lines and the decorations propagated to descendants.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::StyleColor;

bitflags! {
    /// The lines drawn by `text-decoration-line`.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct TextDecoration: u8 {
        const UNDERLINE = 1 << 0;
        const OVERLINE = 1 << 1;
        const LINE_THROUGH = 1 << 2;
        const BLINK = 1 << 3;
    }
}

impl fmt::Display for TextDecoration {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(formatter, "none");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(formatter, " ")?;
            }
            first = false;
            write!(formatter, "{}", name.to_lowercase().replace('_', "-"))?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TextDecorationStyle {
    #[default]
    Solid,
    Double,
    Dotted,
    Dashed,
    Wavy,
}

/// A decoration established by an ancestor and painted across descendant
/// text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct AppliedTextDecoration {
    pub lines: TextDecoration,
    pub style: TextDecorationStyle,
    pub color: StyleColor,
}

impl AppliedTextDecoration {
    pub const fn new(lines: TextDecoration, style: TextDecorationStyle, color: StyleColor) -> Self {
        AppliedTextDecoration {
            lines,
            style,
            color,
        }
    }

    /// A solid underline in the text color. Styles record this common case
    /// with a flag instead of allocating a list.
    pub const fn simple_underline() -> Self {
        AppliedTextDecoration::new(
            TextDecoration::UNDERLINE,
            TextDecorationStyle::Solid,
            StyleColor::CurrentColor,
        )
    }

    pub fn is_simple_underline(&self) -> bool {
        self.lines == TextDecoration::UNDERLINE &&
            self.style == TextDecorationStyle::Solid &&
            self.color.is_current_color()
    }
}
