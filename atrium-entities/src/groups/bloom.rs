use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bloom {
    pub bloom_intensity: Option<f32>,
    pub bloom_threshold: Option<f32>,
    pub bloom_size: Option<f32>,
}

impl Bloom {
    pub fn defaults() -> Bloom {
        Bloom {
            bloom_intensity: Some(0.25),
            bloom_threshold: Some(0.7),
            bloom_size: Some(0.9),
        }
    }

    pub fn merge(&mut self, other: &Bloom) {
        if other.bloom_intensity.is_some() {
            self.bloom_intensity = other.bloom_intensity;
        }
        if other.bloom_threshold.is_some() {
            self.bloom_threshold = other.bloom_threshold;
        }
        if other.bloom_size.is_some() {
            self.bloom_size = other.bloom_size;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Bloom::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.bloom_intensity.is_some() {
            push("bloomIntensity");
        }
        if self.bloom_threshold.is_some() {
            push("bloomThreshold");
        }
        if self.bloom_size.is_some() {
            push("bloomSize");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Bloom::defaults();
        filled.merge(self);
        *self = filled;
    }
}
