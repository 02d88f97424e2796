use serde::{Deserialize, Serialize};

use crate::kinds::PulseMode;

/// Periodic color/alpha modulation applied on top of an entity's base
/// appearance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pulse {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub period: Option<f32>,
    pub color_mode: Option<PulseMode>,
    pub alpha_mode: Option<PulseMode>,
}

impl Pulse {
    pub fn defaults() -> Pulse {
        Pulse {
            min: Some(0.0),
            max: Some(1.0),
            period: Some(1.0),
            color_mode: Some(PulseMode::None),
            alpha_mode: Some(PulseMode::None),
        }
    }

    pub fn merge(&mut self, other: &Pulse) {
        if other.min.is_some() {
            self.min = other.min;
        }
        if other.max.is_some() {
            self.max = other.max;
        }
        if other.period.is_some() {
            self.period = other.period;
        }
        if other.color_mode.is_some() {
            self.color_mode = other.color_mode;
        }
        if other.alpha_mode.is_some() {
            self.alpha_mode = other.alpha_mode;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Pulse::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.min.is_some() {
            push("min");
        }
        if self.max.is_some() {
            push("max");
        }
        if self.period.is_some() {
            push("period");
        }
        if self.color_mode.is_some() {
            push("colorMode");
        }
        if self.alpha_mode.is_some() {
            push("alphaMode");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Pulse::defaults();
        filled.merge(self);
        *self = filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_names() {
        let pulse = Pulse {
            color_mode: Some(PulseMode::InOut),
            ..Default::default()
        };
        let value = serde_json::to_value(&pulse).unwrap();
        assert_eq!(value["colorMode"], "inOut");
    }
}
