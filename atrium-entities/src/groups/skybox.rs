use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The cubemap (or flat color) drawn behind everything in a zone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skybox {
    pub color: Option<Color>,
    pub url: Option<String>,
}

impl Skybox {
    pub fn defaults() -> Skybox {
        Skybox {
            color: Some(Color::BLACK),
            url: Some(String::new()),
        }
    }

    pub fn merge(&mut self, other: &Skybox) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.url.is_some() {
            self.url = other.url.clone();
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Skybox::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.color.is_some() {
            push("color");
        }
        if self.url.is_some() {
            push("url");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Skybox::defaults();
        filled.merge(self);
        *self = filled;
    }
}
