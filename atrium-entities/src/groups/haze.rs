use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Distance and altitude fog for a zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Haze {
    pub haze_range: Option<f32>,
    pub haze_color: Option<Color>,
    pub haze_glare_color: Option<Color>,
    pub haze_enable_glare: Option<bool>,
    pub haze_glare_angle: Option<f32>,
    pub haze_altitude_effect: Option<bool>,
    pub haze_ceiling: Option<f32>,
    pub haze_base_ref: Option<f32>,
    pub haze_background_blend: Option<f32>,
    pub haze_attenuate_key_light: Option<bool>,
    pub haze_key_light_range: Option<f32>,
    pub haze_key_light_altitude: Option<f32>,
}

impl Haze {
    pub fn defaults() -> Haze {
        Haze {
            haze_range: Some(1000.0),
            haze_color: Some(Color::new(128, 154, 179)),
            haze_glare_color: Some(Color::new(255, 229, 179)),
            haze_enable_glare: Some(false),
            haze_glare_angle: Some(20.0),
            haze_altitude_effect: Some(false),
            haze_ceiling: Some(200.0),
            haze_base_ref: Some(0.0),
            haze_background_blend: Some(0.0),
            haze_attenuate_key_light: Some(false),
            haze_key_light_range: Some(1000.0),
            haze_key_light_altitude: Some(200.0),
        }
    }

    pub fn merge(&mut self, other: &Haze) {
        if other.haze_range.is_some() {
            self.haze_range = other.haze_range;
        }
        if other.haze_color.is_some() {
            self.haze_color = other.haze_color;
        }
        if other.haze_glare_color.is_some() {
            self.haze_glare_color = other.haze_glare_color;
        }
        if other.haze_enable_glare.is_some() {
            self.haze_enable_glare = other.haze_enable_glare;
        }
        if other.haze_glare_angle.is_some() {
            self.haze_glare_angle = other.haze_glare_angle;
        }
        if other.haze_altitude_effect.is_some() {
            self.haze_altitude_effect = other.haze_altitude_effect;
        }
        if other.haze_ceiling.is_some() {
            self.haze_ceiling = other.haze_ceiling;
        }
        if other.haze_base_ref.is_some() {
            self.haze_base_ref = other.haze_base_ref;
        }
        if other.haze_background_blend.is_some() {
            self.haze_background_blend = other.haze_background_blend;
        }
        if other.haze_attenuate_key_light.is_some() {
            self.haze_attenuate_key_light = other.haze_attenuate_key_light;
        }
        if other.haze_key_light_range.is_some() {
            self.haze_key_light_range = other.haze_key_light_range;
        }
        if other.haze_key_light_altitude.is_some() {
            self.haze_key_light_altitude = other.haze_key_light_altitude;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Haze::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.haze_range.is_some() {
            push("hazeRange");
        }
        if self.haze_color.is_some() {
            push("hazeColor");
        }
        if self.haze_glare_color.is_some() {
            push("hazeGlareColor");
        }
        if self.haze_enable_glare.is_some() {
            push("hazeEnableGlare");
        }
        if self.haze_glare_angle.is_some() {
            push("hazeGlareAngle");
        }
        if self.haze_altitude_effect.is_some() {
            push("hazeAltitudeEffect");
        }
        if self.haze_ceiling.is_some() {
            push("hazeCeiling");
        }
        if self.haze_base_ref.is_some() {
            push("hazeBaseRef");
        }
        if self.haze_background_blend.is_some() {
            push("hazeBackgroundBlend");
        }
        if self.haze_attenuate_key_light.is_some() {
            push("hazeAttenuateKeyLight");
        }
        if self.haze_key_light_range.is_some() {
            push("hazeKeyLightRange");
        }
        if self.haze_key_light_altitude.is_some() {
            push("hazeKeyLightAltitude");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Haze::defaults();
        filled.merge(self);
        *self = filled;
    }
}
