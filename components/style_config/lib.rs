/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Process-wide preferences for style computation.
//!
//! Preferences are stored as untyped key/value pairs. Consumers read them
//! through the typed snapshots ([`FontSettings`], [`StyleSettings`],
//! [`CompositorSettings`]) so that defaults live in one place.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

static PREFS: LazyLock<Preferences> = LazyLock::new(Preferences::default);

pub const FONT_SIZE_DEFAULT: &str = "font.size.default";
pub const FONT_SIZE_DEFAULT_FIXED: &str = "font.size.default_fixed";
pub const FONT_SIZE_MINIMUM: &str = "font.size.minimum";
pub const FONT_SIZE_MINIMUM_LOGICAL: &str = "font.size.minimum_logical";
pub const FONT_TEXT_ZOOM_FACTOR: &str = "font.text_zoom_factor";
pub const FONT_STANDARD_FAMILY: &str = "font.standard_family";
pub const LAYOUT_QUIRKS_MODE: &str = "layout.quirks_mode";
pub const LAYOUT_CSS_COMPOSITING_ENABLED: &str = "layout.css.compositing.enabled";
pub const LAYOUT_ANIMATIONS_ACCELERATED_ENABLED: &str = "layout.animations.accelerated.enabled";

#[derive(Debug, Default)]
pub struct Preferences {
    bool_prefs: RwLock<HashMap<String, bool>>,
    i32_prefs: RwLock<HashMap<String, i32>>,
    f64_prefs: RwLock<HashMap<String, f64>>,
    string_prefs: RwLock<HashMap<String, String>>,
}

impl Preferences {
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.bool_prefs.read().get(key).copied()
    }

    pub fn i32(&self, key: &str) -> Option<i32> {
        self.i32_prefs.read().get(key).copied()
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.f64_prefs.read().get(key).copied()
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.string_prefs.read().get(key).cloned()
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        debug!("Setting pref {key} to {value}");
        self.bool_prefs.write().insert(key.to_owned(), value);
    }

    pub fn set_i32(&self, key: &str, value: i32) {
        debug!("Setting pref {key} to {value}");
        self.i32_prefs.write().insert(key.to_owned(), value);
    }

    pub fn set_f64(&self, key: &str, value: f64) {
        debug!("Setting pref {key} to {value}");
        self.f64_prefs.write().insert(key.to_owned(), value);
    }

    pub fn set_string(&self, key: &str, value: &str) {
        debug!("Setting pref {key} to {value:?}");
        self.string_prefs
            .write()
            .insert(key.to_owned(), value.to_owned());
    }

    /// Drops every stored value so that typed settings fall back to defaults.
    pub fn reset(&self) {
        self.bool_prefs.write().clear();
        self.i32_prefs.write().clear();
        self.f64_prefs.write().clear();
        self.string_prefs.write().clear();
    }
}

pub fn get_bool(key: &str) -> bool {
    PREFS.bool(key).unwrap_or(false)
}

pub fn get_i32(key: &str) -> i32 {
    PREFS.i32(key).unwrap_or(0)
}

pub fn get_f64(key: &str) -> f64 {
    PREFS.f64(key).unwrap_or(0.)
}

pub fn set_bool(key: &str, value: bool) {
    PREFS.set_bool(key, value)
}

pub fn set_i32(key: &str, value: i32) {
    PREFS.set_i32(key, value)
}

pub fn set_f64(key: &str, value: f64) {
    PREFS.set_f64(key, value)
}

pub fn set_string(key: &str, value: &str) {
    PREFS.set_string(key, value)
}

pub fn reset() {
    PREFS.reset()
}

/// Settings that affect font size and family resolution.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FontSettings {
    pub default_font_size: i32,
    pub default_fixed_font_size: i32,
    pub minimum_font_size: i32,
    pub minimum_logical_font_size: i32,
    pub text_zoom_factor: f32,
    pub quirks_mode: bool,
    pub standard_font_family: String,
}

impl Default for FontSettings {
    fn default() -> Self {
        FontSettings {
            default_font_size: 16,
            default_fixed_font_size: 13,
            minimum_font_size: 0,
            minimum_logical_font_size: 6,
            text_zoom_factor: 1.,
            quirks_mode: false,
            standard_font_family: "Times".to_owned(),
        }
    }
}

impl FontSettings {
    pub fn from_prefs() -> Self {
        let defaults = FontSettings::default();
        FontSettings {
            default_font_size: PREFS
                .i32(FONT_SIZE_DEFAULT)
                .unwrap_or(defaults.default_font_size),
            default_fixed_font_size: PREFS
                .i32(FONT_SIZE_DEFAULT_FIXED)
                .unwrap_or(defaults.default_fixed_font_size),
            minimum_font_size: PREFS
                .i32(FONT_SIZE_MINIMUM)
                .unwrap_or(defaults.minimum_font_size),
            minimum_logical_font_size: PREFS
                .i32(FONT_SIZE_MINIMUM_LOGICAL)
                .unwrap_or(defaults.minimum_logical_font_size),
            text_zoom_factor: PREFS
                .f64(FONT_TEXT_ZOOM_FACTOR)
                .map(|factor| factor as f32)
                .unwrap_or(defaults.text_zoom_factor),
            quirks_mode: PREFS
                .bool(LAYOUT_QUIRKS_MODE)
                .unwrap_or(defaults.quirks_mode),
            standard_font_family: PREFS
                .string(FONT_STANDARD_FAMILY)
                .unwrap_or(defaults.standard_font_family),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Whether `mix-blend-mode` and `isolation` are honored.
    pub css_compositing_enabled: bool,
}

impl Default for StyleSettings {
    fn default() -> Self {
        StyleSettings {
            css_compositing_enabled: true,
        }
    }
}

impl StyleSettings {
    pub fn from_prefs() -> Self {
        StyleSettings {
            css_compositing_enabled: PREFS
                .bool(LAYOUT_CSS_COMPOSITING_ENABLED)
                .unwrap_or(true),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// When false no animation is ever handed to the compositor.
    pub accelerated_animations_enabled: bool,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        CompositorSettings {
            accelerated_animations_enabled: true,
        }
    }
}

impl CompositorSettings {
    pub fn from_prefs() -> Self {
        CompositorSettings {
            accelerated_animations_enabled: PREFS
                .bool(LAYOUT_ANIMATIONS_ACCELERATED_ENABLED)
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_settings_fall_back_to_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.i32(FONT_SIZE_DEFAULT), None);
        assert_eq!(FontSettings::default().default_font_size, 16);
        assert_eq!(FontSettings::default().default_fixed_font_size, 13);
        assert!(StyleSettings::default().css_compositing_enabled);
    }

    #[test]
    fn local_store_overrides() {
        let prefs = Preferences::default();
        prefs.set_i32(FONT_SIZE_MINIMUM, 9);
        prefs.set_i32(FONT_SIZE_MINIMUM, 10);
        assert_eq!(prefs.i32(FONT_SIZE_MINIMUM), Some(10));
        prefs.reset();
        assert_eq!(prefs.i32(FONT_SIZE_MINIMUM), None);
    }

    #[test]
    fn settings_deserialize_with_missing_fields() {
        let settings: FontSettings =
            serde_json::from_str(r#"{ "default_font_size": 20 }"#).unwrap();
        assert_eq!(settings.default_font_size, 20);
        assert_eq!(settings.minimum_logical_font_size, 6);
        assert_eq!(settings.standard_font_family, "Times");
    }
}
