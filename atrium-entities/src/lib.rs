//! Entity property system: the per-entity property aggregate, its property
//! groups, the script-facing JSON form, and the wire form for add/edit/erase/
//! clone messages.

pub mod color;
pub mod groups;
pub mod kinds;
pub mod packets;
pub mod properties;
pub mod quat_wire;
pub mod script_value;
pub mod settings;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use kinds::{BillboardMode, ComponentMode, EntityType, GizmoType, PulseMode, ShapeType};
pub use packets::{
    apply_message, read_message, split_edit, split_edit_for_wire, DecodeError, EditError,
    EntityMessage, EntityStore, Packet,
};
pub use properties::EntityProperties;
