use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;

pub const DEFAULT_DIRECTION: Vec3 = glam::const_vec3!([0.0, -1.0, 0.0]);

const MIN_SHADOW_BIAS: f32 = 0.0;
const MAX_SHADOW_BIAS: f32 = 1.0;
const MIN_SHADOW_MAX_DISTANCE: f32 = 1.0;
const MAX_SHADOW_MAX_DISTANCE: f32 = 250.0;

/// The directional sun light of a zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyLight {
    pub color: Option<Color>,
    pub intensity: Option<f32>,
    pub direction: Option<Vec3>,
    pub cast_shadows: Option<bool>,
    pub shadow_bias: Option<f32>,
    pub shadow_max_distance: Option<f32>,
}

impl KeyLight {
    pub fn defaults() -> KeyLight {
        KeyLight {
            color: Some(Color::WHITE),
            intensity: Some(1.0),
            direction: Some(DEFAULT_DIRECTION),
            cast_shadows: Some(false),
            shadow_bias: Some(0.5),
            shadow_max_distance: Some(40.0),
        }
    }

    /// Copies every field `other` has set.
    pub fn merge(&mut self, other: &KeyLight) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.intensity.is_some() {
            self.intensity = other.intensity;
        }
        if other.direction.is_some() {
            self.direction = other.direction;
        }
        if other.cast_shadows.is_some() {
            self.cast_shadows = other.cast_shadows;
        }
        if other.shadow_bias.is_some() {
            self.shadow_bias = other.shadow_bias;
        }
        if other.shadow_max_distance.is_some() {
            self.shadow_max_distance = other.shadow_max_distance;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != KeyLight::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.color.is_some() {
            push("color");
        }
        if self.intensity.is_some() {
            push("intensity");
        }
        if self.direction.is_some() {
            push("direction");
        }
        if self.cast_shadows.is_some() {
            push("castShadows");
        }
        if self.shadow_bias.is_some() {
            push("shadowBias");
        }
        if self.shadow_max_distance.is_some() {
            push("shadowMaxDistance");
        }
    }

    /// Fills every untouched field from the defaults.
    pub fn mark_all_changed(&mut self) {
        let mut filled = KeyLight::defaults();
        filled.merge(self);
        *self = filled;
    }

    pub fn sanitize(&mut self) {
        if let Some(direction) = self.direction {
            if direction.length_squared() < f32::EPSILON {
                warn!("keyLight.direction is degenerate, resetting to default");
                self.direction = Some(DEFAULT_DIRECTION);
            } else {
                self.direction = Some(direction.normalize());
            }
        }
        if let Some(bias) = self.shadow_bias {
            if !(MIN_SHADOW_BIAS..=MAX_SHADOW_BIAS).contains(&bias) {
                warn!("clamping keyLight.shadowBias {} into [0, 1]", bias);
                self.shadow_bias = Some(bias.clamp(MIN_SHADOW_BIAS, MAX_SHADOW_BIAS));
            }
        }
        if let Some(distance) = self.shadow_max_distance {
            if !(MIN_SHADOW_MAX_DISTANCE..=MAX_SHADOW_MAX_DISTANCE).contains(&distance) {
                warn!("clamping keyLight.shadowMaxDistance {} into [1, 250]", distance);
                self.shadow_max_distance =
                    Some(distance.clamp(MIN_SHADOW_MAX_DISTANCE, MAX_SHADOW_MAX_DISTANCE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_set_fields() {
        let mut stored = KeyLight::defaults();
        let edit = KeyLight {
            intensity: Some(0.25),
            ..Default::default()
        };
        stored.merge(&edit);
        assert_eq!(stored.intensity, Some(0.25));
        assert_eq!(stored.color, Some(Color::WHITE));
    }

    #[test]
    fn test_sanitize_clamps_and_normalizes() {
        let mut light = KeyLight {
            direction: Some(Vec3::new(0.0, -2.0, 0.0)),
            shadow_bias: Some(3.0),
            shadow_max_distance: Some(0.1),
            ..Default::default()
        };
        light.sanitize();
        assert!(light.direction.unwrap().abs_diff_eq(DEFAULT_DIRECTION, 0.001));
        assert_eq!(light.shadow_bias, Some(1.0));
        assert_eq!(light.shadow_max_distance, Some(1.0));
    }

    #[test]
    fn test_changed_properties_use_script_names() {
        let light = KeyLight {
            cast_shadows: Some(true),
            ..Default::default()
        };
        let mut names = Vec::new();
        light.changed_properties("keyLight", &mut names);
        assert_eq!(names, vec!["keyLight.castShadows"]);
        assert!(light.is_changed());
        assert!(!KeyLight::default().is_changed());
    }
}
