//! Property groups: clusters of related entity properties that are edited,
//! merged, and listed as a unit. Every group follows the same shape: a struct
//! of `Option` fields where `None` means "not touched by this edit", a
//! `defaults()` constructor carrying the fully-populated default values, and
//! `merge`/`changed_properties` for applying and reporting edits.

mod ambient_light;
mod animation;
mod bloom;
mod grab;
mod haze;
mod key_light;
mod pulse;
mod ring_gizmo;
mod skybox;

pub use ambient_light::AmbientLight;
pub use animation::Animation;
pub use bloom::Bloom;
pub use grab::Grab;
pub use haze::Haze;
pub use key_light::KeyLight;
pub use pulse::Pulse;
pub use ring_gizmo::RingGizmo;
pub use skybox::Skybox;
