use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Whether entities start out grabbable by far/near grab.
pub const DEFAULT_GRABBABLE: bool = true;

/// How an entity responds to being grabbed or equipped by a controller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Grab {
    pub grabbable: Option<bool>,
    pub grab_kinematic: Option<bool>,
    pub grab_follows_controller: Option<bool>,
    pub triggerable: Option<bool>,
    pub equippable: Option<bool>,
    pub grab_delegate_to_parent: Option<bool>,
    pub equippable_left_position: Option<Vec3>,
    #[serde(with = "crate::quat_wire::option")]
    pub equippable_left_rotation: Option<Quat>,
    pub equippable_right_position: Option<Vec3>,
    #[serde(with = "crate::quat_wire::option")]
    pub equippable_right_rotation: Option<Quat>,
    #[serde(rename = "equippableIndicatorURL")]
    pub equippable_indicator_url: Option<String>,
    pub equippable_indicator_scale: Option<Vec3>,
    pub equippable_indicator_offset: Option<Vec3>,
}

impl Grab {
    pub fn defaults() -> Grab {
        Grab {
            grabbable: Some(DEFAULT_GRABBABLE),
            grab_kinematic: Some(true),
            grab_follows_controller: Some(true),
            triggerable: Some(false),
            equippable: Some(false),
            grab_delegate_to_parent: Some(true),
            equippable_left_position: Some(Vec3::ZERO),
            equippable_left_rotation: Some(Quat::IDENTITY),
            equippable_right_position: Some(Vec3::ZERO),
            equippable_right_rotation: Some(Quat::IDENTITY),
            equippable_indicator_url: Some(String::new()),
            equippable_indicator_scale: Some(Vec3::ONE),
            equippable_indicator_offset: Some(Vec3::ZERO),
        }
    }

    pub fn merge(&mut self, other: &Grab) {
        if other.grabbable.is_some() {
            self.grabbable = other.grabbable;
        }
        if other.grab_kinematic.is_some() {
            self.grab_kinematic = other.grab_kinematic;
        }
        if other.grab_follows_controller.is_some() {
            self.grab_follows_controller = other.grab_follows_controller;
        }
        if other.triggerable.is_some() {
            self.triggerable = other.triggerable;
        }
        if other.equippable.is_some() {
            self.equippable = other.equippable;
        }
        if other.grab_delegate_to_parent.is_some() {
            self.grab_delegate_to_parent = other.grab_delegate_to_parent;
        }
        if other.equippable_left_position.is_some() {
            self.equippable_left_position = other.equippable_left_position;
        }
        if other.equippable_left_rotation.is_some() {
            self.equippable_left_rotation = other.equippable_left_rotation;
        }
        if other.equippable_right_position.is_some() {
            self.equippable_right_position = other.equippable_right_position;
        }
        if other.equippable_right_rotation.is_some() {
            self.equippable_right_rotation = other.equippable_right_rotation;
        }
        if other.equippable_indicator_url.is_some() {
            self.equippable_indicator_url = other.equippable_indicator_url.clone();
        }
        if other.equippable_indicator_scale.is_some() {
            self.equippable_indicator_scale = other.equippable_indicator_scale;
        }
        if other.equippable_indicator_offset.is_some() {
            self.equippable_indicator_offset = other.equippable_indicator_offset;
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Grab::default()
    }

    pub fn changed_properties(&self, prefix: &str, out: &mut Vec<String>) {
        let mut push = |name: &str| out.push(format!("{}.{}", prefix, name));
        if self.grabbable.is_some() {
            push("grabbable");
        }
        if self.grab_kinematic.is_some() {
            push("grabKinematic");
        }
        if self.grab_follows_controller.is_some() {
            push("grabFollowsController");
        }
        if self.triggerable.is_some() {
            push("triggerable");
        }
        if self.equippable.is_some() {
            push("equippable");
        }
        if self.grab_delegate_to_parent.is_some() {
            push("grabDelegateToParent");
        }
        if self.equippable_left_position.is_some() {
            push("equippableLeftPosition");
        }
        if self.equippable_left_rotation.is_some() {
            push("equippableLeftRotation");
        }
        if self.equippable_right_position.is_some() {
            push("equippableRightPosition");
        }
        if self.equippable_right_rotation.is_some() {
            push("equippableRightRotation");
        }
        if self.equippable_indicator_url.is_some() {
            push("equippableIndicatorURL");
        }
        if self.equippable_indicator_scale.is_some() {
            push("equippableIndicatorScale");
        }
        if self.equippable_indicator_offset.is_some() {
            push("equippableIndicatorOffset");
        }
    }

    pub fn mark_all_changed(&mut self) {
        let mut filled = Grab::defaults();
        filled.merge(self);
        *self = filled;
    }
}
