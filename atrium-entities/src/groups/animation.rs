use serde::{Deserialize, Serialize};

/// The largest frame index an animation may name.
pub const MAXIMUM_POSSIBLE_FRAME: f32 = 100_000.0;

/// Playback state for a model entity's skeletal animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Animation {
    pub url: Option<String>,
    pub allow_translation: Option<bool>,
    pub fps: Option<f32>,
    pub current_frame: Option<f32>,
    pub running: Option<bool>,
    #[serde(rename = "loop")]
    pub looping: Option<bool>,
    pub first_frame: Option<f32>,
    pub last_frame: Option<f32>,
    pub hold: Option<bool>,
}

impl Animation {
    pub fn defaults() -> Animation {
        Animation {
            url: Some(String::new()),
            allow_translation: Some(true),
            fps: Some(30.0),
            current_frame: Some(0.0),
            running: Some(false),
            looping: Some(true),
            first_frame: Some(0.0),
            last_frame: Some(MAXIMUM_POSSIBLE_FRAME),
            hold: Some(false),
        }
    }

    pub fn merge(&mut self, other: &Animation) {
        if other.url.is_some() {
            self.url = other.url.clone();
        }
        if other.allow_translation.is_some() {
            self.allow_translation = other.allow_translation;
        }
        if other.fps.is_some() {
            self.fps = other.fps;
        }
        if other.current_frame.is_some() {
            self.current_frame = other.current_frame;
        }
        if other.running.is_some() {
            self.running = other.running;
        }
        if other.looping.is_some() {
            self.looping = other.looping;
        }
        if other.first_frame.is_some() {
            self.first_frame = other.first_frame;
        }
        if other.last_frame.is_some() {
            self.last_frame = other.last_frame;
        }
        if other.hold.is_some() {
            self.hold = other.hold;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Animation::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.url.is_some() {
            push("url");
        }
        if self.allow_translation.is_some() {
            push("allowTranslation");
        }
        if self.fps.is_some() {
            push("fps");
        }
        if self.current_frame.is_some() {
            push("currentFrame");
        }
        if self.running.is_some() {
            push("running");
        }
        if self.looping.is_some() {
            push("loop");
        }
        if self.first_frame.is_some() {
            push("firstFrame");
        }
        if self.last_frame.is_some() {
            push("lastFrame");
        }
        if self.hold.is_some() {
            push("hold");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Animation::defaults();
        filled.merge(self);
        *self = filled;
    }

    /// Wraps a frame into the [firstFrame, lastFrame] playback window.
    /// Unset bounds fall back to the defaults; an empty window pins playback
    /// to its first frame.
    pub fn compute_loop_frame(&self, frame: f32) -> f32 {
        let first = self.first_frame.unwrap_or(0.0);
        let last = self.last_frame.unwrap_or(MAXIMUM_POSSIBLE_FRAME);
        let range = last - first + 1.0;
        if range <= 0.0 {
            return first;
        }
        first + (frame - first).rem_euclid(range)
    }
}
