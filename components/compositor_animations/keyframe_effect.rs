/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keyframe effects and their per-property views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use style::properties::CssPropertyId;
use style::values::easing::TimingFunction;

use crate::animatable_value::AnimatableValue;

/// How a keyframe value combines with the underlying value.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompositeOperation {
    #[default]
    Replace,
    Add,
}

/// A keyframe as authored: an optional offset and values for any number of
/// properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub offset: Option<f64>,
    /// Applies from this keyframe to the next one.
    pub easing: TimingFunction,
    pub composite: CompositeOperation,
    pub values: SmallVec<[(CssPropertyId, AnimatableValue); 1]>,
}

impl Keyframe {
    pub fn new(offset: Option<f64>) -> Self {
        Keyframe {
            offset,
            easing: TimingFunction::Linear,
            composite: CompositeOperation::Replace,
            values: SmallVec::new(),
        }
    }

    pub fn with_easing(mut self, easing: TimingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_composite(mut self, composite: CompositeOperation) -> Self {
        self.composite = composite;
        self
    }

    pub fn with_value(mut self, property: CssPropertyId, value: AnimatableValue) -> Self {
        self.values.push((property, value));
        self
    }
}

/// One property's value at one offset.
///
/// Keyframes the model synthesizes at 0% and 100% have no value and compose
/// additively, so they stand for the underlying value.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySpecificKeyframe {
    pub offset: f64,
    pub easing: TimingFunction,
    pub composite: CompositeOperation,
    pub value: Option<AnimatableValue>,
}

impl PropertySpecificKeyframe {
    fn neutral(offset: f64) -> Self {
        PropertySpecificKeyframe {
            offset,
            easing: TimingFunction::Linear,
            composite: CompositeOperation::Add,
            value: None,
        }
    }

    pub fn with_offset(&self, offset: f64) -> Self {
        PropertySpecificKeyframe {
            offset,
            ..self.clone()
        }
    }
}

/// A sequence of keyframes with every offset resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeEffectModel {
    keyframes: Vec<Keyframe>,
    groups: BTreeMap<CssPropertyId, Vec<PropertySpecificKeyframe>>,
}

impl KeyframeEffectModel {
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        let keyframes = normalized_keyframes(keyframes);

        let mut groups: BTreeMap<CssPropertyId, Vec<PropertySpecificKeyframe>> = BTreeMap::new();
        for keyframe in &keyframes {
            let offset = keyframe.offset.unwrap_or(0.);
            for (property, value) in &keyframe.values {
                groups
                    .entry(*property)
                    .or_default()
                    .push(PropertySpecificKeyframe {
                        offset,
                        easing: keyframe.easing,
                        composite: keyframe.composite,
                        value: Some(value.clone()),
                    });
            }
        }

        for group in groups.values_mut() {
            add_synthetic_keyframes_if_required(group);
        }

        KeyframeEffectModel { keyframes, groups }
    }

    /// The keyframes with their offsets filled in.
    #[inline]
    pub fn frames(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// The animated properties, in a stable order.
    pub fn properties(&self) -> impl Iterator<Item = CssPropertyId> + '_ {
        self.groups.keys().copied()
    }

    #[inline]
    pub fn has_properties(&self) -> bool {
        !self.groups.is_empty()
    }

    #[inline]
    pub fn affects(&self, property: CssPropertyId) -> bool {
        self.groups.contains_key(&property)
    }

    /// The keyframes for `property`, always starting at offset 0 and ending
    /// at offset 1. Empty if the property is not animated.
    pub fn property_specific_keyframes(
        &self,
        property: CssPropertyId,
    ) -> &[PropertySpecificKeyframe] {
        self.groups
            .get(&property)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_replace_only(&self) -> bool {
        self.keyframes
            .iter()
            .all(|keyframe| keyframe.composite == CompositeOperation::Replace)
    }
}

/// Fills in missing offsets. The last keyframe defaults to 1, the first to
/// 0 if there is more than one, and runs of missing offsets in between are
/// spaced evenly between their known neighbours.
fn normalized_keyframes(mut keyframes: Vec<Keyframe>) -> Vec<Keyframe> {
    if cfg!(debug_assertions) {
        let mut last_offset = 0.;
        for offset in keyframes.iter().filter_map(|keyframe| keyframe.offset) {
            debug_assert!((0. ..=1.).contains(&offset), "keyframe offset out of range");
            debug_assert!(offset >= last_offset, "keyframe offsets out of order");
            last_offset = offset;
        }
    }

    let length = keyframes.len();
    if length == 0 {
        return keyframes;
    }
    if let Some(last) = keyframes.last_mut() {
        last.offset.get_or_insert(1.);
    }
    if length > 1 {
        keyframes[0].offset.get_or_insert(0.);
    }

    let mut last_index = 0;
    let mut last_offset = keyframes[0].offset.unwrap_or(0.);
    for index in 1..length {
        let Some(offset) = keyframes[index].offset else {
            continue;
        };
        let gap = index - last_index;
        for step in 1..gap {
            keyframes[last_index + step].offset =
                Some(last_offset + (offset - last_offset) * step as f64 / gap as f64);
        }
        last_index = index;
        last_offset = offset;
    }
    keyframes
}

fn add_synthetic_keyframes_if_required(group: &mut Vec<PropertySpecificKeyframe>) {
    debug_assert!(!group.is_empty());
    if group.first().is_some_and(|keyframe| keyframe.offset != 0.) {
        group.insert(0, PropertySpecificKeyframe::neutral(0.));
    }
    if group.last().is_some_and(|keyframe| keyframe.offset != 1.) {
        group.push(PropertySpecificKeyframe::neutral(1.));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opacity(offset: Option<f64>, value: f64) -> Keyframe {
        Keyframe::new(offset).with_value(CssPropertyId::Opacity, AnimatableValue::Double(value))
    }

    fn offsets(model: &KeyframeEffectModel) -> Vec<f64> {
        model
            .frames()
            .iter()
            .map(|keyframe| keyframe.offset.unwrap_or(f64::NAN))
            .collect()
    }

    #[test]
    fn missing_offsets_are_distributed() {
        let model = KeyframeEffectModel::new(vec![
            opacity(None, 0.),
            opacity(None, 0.),
            opacity(None, 0.),
            opacity(Some(0.9), 0.),
            opacity(None, 0.),
        ]);
        let offsets = offsets(&model);
        assert_eq!(offsets[0], 0.);
        assert!((offsets[1] - 0.3).abs() < 1e-9);
        assert!((offsets[2] - 0.6).abs() < 1e-9);
        assert_eq!(offsets[3], 0.9);
        assert_eq!(offsets[4], 1.);
    }

    #[test]
    fn single_keyframe_is_placed_at_the_end() {
        let model = KeyframeEffectModel::new(vec![opacity(None, 0.5)]);
        assert_eq!(offsets(&model), vec![1.]);
        let keyframes = model.property_specific_keyframes(CssPropertyId::Opacity);
        assert_eq!(keyframes.len(), 2);
        assert_eq!(keyframes[0].offset, 0.);
        assert_eq!(keyframes[0].value, None);
        assert_eq!(keyframes[0].composite, CompositeOperation::Add);
        assert_eq!(keyframes[1].value, Some(AnimatableValue::Double(0.5)));
    }

    #[test]
    fn properties_are_grouped() {
        let model = KeyframeEffectModel::new(vec![
            opacity(Some(0.), 1.).with_value(
                CssPropertyId::Left,
                AnimatableValue::Unknown("10px".to_owned()),
            ),
            opacity(Some(1.), 0.),
        ]);
        let properties: Vec<_> = model.properties().collect();
        assert_eq!(properties, vec![CssPropertyId::Left, CssPropertyId::Opacity]);

        let left = model.property_specific_keyframes(CssPropertyId::Left);
        assert_eq!(left.len(), 2);
        assert_eq!(left[1].offset, 1.);
        assert_eq!(left[1].value, None);

        let opacity = model.property_specific_keyframes(CssPropertyId::Opacity);
        assert!(opacity.iter().all(|keyframe| keyframe.value.is_some()));
        assert!(model.property_specific_keyframes(CssPropertyId::Transform).is_empty());
    }

    #[test]
    fn replace_only() {
        let model = KeyframeEffectModel::new(vec![
            opacity(Some(0.), 1.),
            opacity(Some(1.), 0.).with_composite(CompositeOperation::Add),
        ]);
        assert!(!model.is_replace_only());
    }
}
