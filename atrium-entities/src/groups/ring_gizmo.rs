use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;

const MIN_ANGLE: f32 = 0.0;
const MAX_ANGLE: f32 = 360.0;
const MIN_RADIUS: f32 = 0.0;
const MAX_RADIUS: f32 = 1.0;
const MIN_ALPHA: f32 = 0.0;
const MAX_ALPHA: f32 = 1.0;
const MIN_TICK_MARK_LENGTH: f32 = -1.0;
const MAX_TICK_MARK_LENGTH: f32 = 1.0;

/// The annulus drawn by a ring gizmo entity: an angular span with inner and
/// outer color/alpha gradients, plus optional tick marks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RingGizmo {
    pub start_angle: Option<f32>,
    pub end_angle: Option<f32>,
    pub inner_radius: Option<f32>,
    pub inner_start_color: Option<Color>,
    pub inner_end_color: Option<Color>,
    pub outer_start_color: Option<Color>,
    pub outer_end_color: Option<Color>,
    pub inner_start_alpha: Option<f32>,
    pub inner_end_alpha: Option<f32>,
    pub outer_start_alpha: Option<f32>,
    pub outer_end_alpha: Option<f32>,
    pub has_tick_marks: Option<bool>,
    pub major_tick_marks_angle: Option<f32>,
    pub minor_tick_marks_angle: Option<f32>,
    pub major_tick_marks_length: Option<f32>,
    pub minor_tick_marks_length: Option<f32>,
    pub major_tick_marks_color: Option<Color>,
    pub minor_tick_marks_color: Option<Color>,
}

impl RingGizmo {
    pub fn defaults() -> RingGizmo {
        RingGizmo {
            start_angle: Some(0.0),
            end_angle: Some(360.0),
            inner_radius: Some(0.0),
            inner_start_color: Some(Color::WHITE),
            inner_end_color: Some(Color::WHITE),
            outer_start_color: Some(Color::WHITE),
            outer_end_color: Some(Color::WHITE),
            inner_start_alpha: Some(1.0),
            inner_end_alpha: Some(1.0),
            outer_start_alpha: Some(1.0),
            outer_end_alpha: Some(1.0),
            has_tick_marks: Some(false),
            major_tick_marks_angle: Some(30.0),
            minor_tick_marks_angle: Some(10.0),
            major_tick_marks_length: Some(0.2),
            minor_tick_marks_length: Some(0.05),
            major_tick_marks_color: Some(Color::WHITE),
            minor_tick_marks_color: Some(Color::WHITE),
        }
    }

    pub fn merge(&mut self, other: &RingGizmo) {
        if other.start_angle.is_some() {
            self.start_angle = other.start_angle;
        }
        if other.end_angle.is_some() {
            self.end_angle = other.end_angle;
        }
        if other.inner_radius.is_some() {
            self.inner_radius = other.inner_radius;
        }
        if other.inner_start_color.is_some() {
            self.inner_start_color = other.inner_start_color;
        }
        if other.inner_end_color.is_some() {
            self.inner_end_color = other.inner_end_color;
        }
        if other.outer_start_color.is_some() {
            self.outer_start_color = other.outer_start_color;
        }
        if other.outer_end_color.is_some() {
            self.outer_end_color = other.outer_end_color;
        }
        if other.inner_start_alpha.is_some() {
            self.inner_start_alpha = other.inner_start_alpha;
        }
        if other.inner_end_alpha.is_some() {
            self.inner_end_alpha = other.inner_end_alpha;
        }
        if other.outer_start_alpha.is_some() {
            self.outer_start_alpha = other.outer_start_alpha;
        }
        if other.outer_end_alpha.is_some() {
            self.outer_end_alpha = other.outer_end_alpha;
        }
        if other.has_tick_marks.is_some() {
            self.has_tick_marks = other.has_tick_marks;
        }
        if other.major_tick_marks_angle.is_some() {
            self.major_tick_marks_angle = other.major_tick_marks_angle;
        }
        if other.minor_tick_marks_angle.is_some() {
            self.minor_tick_marks_angle = other.minor_tick_marks_angle;
        }
        if other.major_tick_marks_length.is_some() {
            self.major_tick_marks_length = other.major_tick_marks_length;
        }
        if other.minor_tick_marks_length.is_some() {
            self.minor_tick_marks_length = other.minor_tick_marks_length;
        }
        if other.major_tick_marks_color.is_some() {
            self.major_tick_marks_color = other.major_tick_marks_color;
        }
        if other.minor_tick_marks_color.is_some() {
            self.minor_tick_marks_color = other.minor_tick_marks_color;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != RingGizmo::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.start_angle.is_some() {
            push("startAngle");
        }
        if self.end_angle.is_some() {
            push("endAngle");
        }
        if self.inner_radius.is_some() {
            push("innerRadius");
        }
        if self.inner_start_color.is_some() {
            push("innerStartColor");
        }
        if self.inner_end_color.is_some() {
            push("innerEndColor");
        }
        if self.outer_start_color.is_some() {
            push("outerStartColor");
        }
        if self.outer_end_color.is_some() {
            push("outerEndColor");
        }
        if self.inner_start_alpha.is_some() {
            push("innerStartAlpha");
        }
        if self.inner_end_alpha.is_some() {
            push("innerEndAlpha");
        }
        if self.outer_start_alpha.is_some() {
            push("outerStartAlpha");
        }
        if self.outer_end_alpha.is_some() {
            push("outerEndAlpha");
        }
        if self.has_tick_marks.is_some() {
            push("hasTickMarks");
        }
        if self.major_tick_marks_angle.is_some() {
            push("majorTickMarksAngle");
        }
        if self.minor_tick_marks_angle.is_some() {
            push("minorTickMarksAngle");
        }
        if self.major_tick_marks_length.is_some() {
            push("majorTickMarksLength");
        }
        if self.minor_tick_marks_length.is_some() {
            push("minorTickMarksLength");
        }
        if self.major_tick_marks_color.is_some() {
            push("majorTickMarksColor");
        }
        if self.minor_tick_marks_color.is_some() {
            push("minorTickMarksColor");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = RingGizmo::defaults();
        filled.merge(self);
        *self = filled;
    }

    pub fn sanitize(&mut self) {
        let clamp_angle = |name: &str, field: &mut Option<f32>| {
            if let Some(angle) = *field {
                if !(MIN_ANGLE..=MAX_ANGLE).contains(&angle) {
                    warn!("clamping ring.{} {} into [0, 360]", name, angle);
                    *field = Some(angle.clamp(MIN_ANGLE, MAX_ANGLE));
                }
            }
        };
        clamp_angle("startAngle", &mut self.start_angle);
        clamp_angle("endAngle", &mut self.end_angle);
        clamp_angle("majorTickMarksAngle", &mut self.major_tick_marks_angle);
        clamp_angle("minorTickMarksAngle", &mut self.minor_tick_marks_angle);

        if let Some(radius) = self.inner_radius {
            if !(MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
                warn!("clamping ring.innerRadius {} into [0, 1]", radius);
                self.inner_radius = Some(radius.clamp(MIN_RADIUS, MAX_RADIUS));
            }
        }

        let clamp_alpha = |name: &str, field: &mut Option<f32>| {
            if let Some(alpha) = *field {
                if !(MIN_ALPHA..=MAX_ALPHA).contains(&alpha) {
                    warn!("clamping ring.{} {} into [0, 1]", name, alpha);
                    *field = Some(alpha.clamp(MIN_ALPHA, MAX_ALPHA));
                }
            }
        };
        clamp_alpha("innerStartAlpha", &mut self.inner_start_alpha);
        clamp_alpha("innerEndAlpha", &mut self.inner_end_alpha);
        clamp_alpha("outerStartAlpha", &mut self.outer_start_alpha);
        clamp_alpha("outerEndAlpha", &mut self.outer_end_alpha);

        let clamp_length = |name: &str, field: &mut Option<f32>| {
            if let Some(length) = *field {
                if !(MIN_TICK_MARK_LENGTH..=MAX_TICK_MARK_LENGTH).contains(&length) {
                    warn!("clamping ring.{} {} into [-1, 1]", name, length);
                    *field = Some(length.clamp(MIN_TICK_MARK_LENGTH, MAX_TICK_MARK_LENGTH));
                }
            }
        };
        clamp_length("majorTickMarksLength", &mut self.major_tick_marks_length);
        clamp_length("minorTickMarksLength", &mut self.minor_tick_marks_length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_into_documented_ranges() {
        let mut ring = RingGizmo {
            start_angle: Some(-15.0),
            end_angle: Some(400.0),
            inner_radius: Some(2.0),
            outer_end_alpha: Some(1.5),
            major_tick_marks_length: Some(-3.0),
            ..Default::default()
        };
        ring.sanitize();
        assert_eq!(ring.start_angle, Some(0.0));
        assert_eq!(ring.end_angle, Some(360.0));
        assert_eq!(ring.inner_radius, Some(1.0));
        assert_eq!(ring.outer_end_alpha, Some(1.0));
        assert_eq!(ring.major_tick_marks_length, Some(-1.0));
    }

    #[test]
    fn test_mark_all_changed_keeps_edits() {
        let mut ring = RingGizmo {
            inner_radius: Some(0.5),
            ..Default::default()
        };
        ring.mark_all_changed();
        assert_eq!(ring.inner_radius, Some(0.5));
        assert_eq!(ring.end_angle, Some(360.0));
        assert!(ring.has_tick_marks.is_some());
    }
}
