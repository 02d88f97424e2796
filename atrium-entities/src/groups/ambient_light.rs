use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Image-based ambient lighting of a zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbientLight {
    pub ambient_intensity: Option<f32>,
    #[serde(rename = "ambientURL")]
    pub ambient_url: Option<String>,
    pub ambient_color: Option<Color>,
}

impl AmbientLight {
    pub fn defaults() -> AmbientLight {
        AmbientLight {
            ambient_intensity: Some(0.5),
            ambient_url: Some(String::new()),
            ambient_color: Some(Color::BLACK),
        }
    }

    pub fn merge(&mut self, other: &AmbientLight) {
        if other.ambient_intensity.is_some() {
            self.ambient_intensity = other.ambient_intensity;
        }
        if other.ambient_url.is_some() {
            self.ambient_url = other.ambient_url.clone();
        }
        if other.ambient_color.is_some() {
            self.ambient_color = other.ambient_color;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != AmbientLight::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.ambient_intensity.is_some() {
            push("ambientIntensity");
        }
        if self.ambient_url.is_some() {
            push("ambientURL");
        }
        if self.ambient_color.is_some() {
            push("ambientColor");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = AmbientLight::defaults();
        filled.merge(self);
        *self = filled;
    }
}
