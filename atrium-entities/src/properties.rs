//! The aggregate property set of a single entity. Every property is optional;
//! a `None` means "not touched by this edit", which makes one type serve as
//! both the full state of an entity and the payload of a partial edit.

use std::time::{SystemTime, UNIX_EPOCH};

use atrium_core::AACube;
use glam::{Quat, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::color::Color;
use crate::groups::{Animation, AmbientLight, Bloom, Grab, Haze, KeyLight, Pulse, RingGizmo, Skybox};
use crate::kinds::{BillboardMode, ComponentMode, EntityType, GizmoType, ShapeType};
use crate::script_value::{strip_defaults, strip_nulls};
use crate::settings::GLOBAL_CONFIG;

pub const DEFAULT_REGISTRATION_POINT: Vec3 = glam::const_vec3!([0.5, 0.5, 0.5]);
pub const DEFAULT_DIMENSIONS: Vec3 = glam::const_vec3!([0.1, 0.1, 0.1]);
/// Per-second damping that loses about 2% of velocity each 1/60 s step.
pub const DEFAULT_DAMPING: f32 = 0.39347;
pub const DEFAULT_DENSITY: f32 = 1000.0;
pub const COLLISION_MASK_ALL: u16 = 0x1f;

const MIN_DENSITY: f32 = 100.0;
const MAX_DENSITY: f32 = 10000.0;
const MAX_FRICTION: f32 = 10.0;
const MAX_RESTITUTION: f32 = 0.99;

/// Script-facing keys never dropped by the skip-defaults filter.
const ALWAYS_KEPT: &[&str] = &["id", "type", "created", "lastEdited", "age", "ageAsText"];

/// Script-facing keys holding property groups, filtered member by member.
const GROUP_KEYS: &[&str] = &[
    "animation",
    "keyLight",
    "ambientLight",
    "skybox",
    "haze",
    "bloom",
    "ring",
    "grab",
    "pulse",
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityProperties {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Microseconds since the epoch; 0 means "not yet created".
    pub created: u64,
    pub last_edited: u64,

    // spatial and physics core, common to every type
    pub position: Option<Vec3>,
    pub dimensions: Option<Vec3>,
    #[serde(with = "crate::quat_wire::option")]
    pub rotation: Option<Quat>,
    pub registration_point: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub angular_velocity: Option<Vec3>,
    pub gravity: Option<Vec3>,
    pub damping: Option<f32>,
    pub angular_damping: Option<f32>,
    pub lifetime: Option<f32>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub can_cast_shadow: Option<bool>,
    pub collisionless: Option<bool>,
    pub collision_mask: Option<u16>,
    pub dynamic: Option<bool>,
    pub density: Option<f32>,
    pub friction: Option<f32>,
    pub restitution: Option<f32>,
    #[serde(rename = "parentID")]
    pub parent_id: Option<Uuid>,
    pub parent_joint_index: Option<i32>,

    // common content
    pub name: Option<String>,
    pub description: Option<String>,
    pub script: Option<String>,
    pub script_timestamp: Option<u64>,
    pub server_scripts: Option<String>,
    pub href: Option<String>,
    pub user_data: Option<String>,
    pub alpha: Option<f32>,
    pub color: Option<Color>,
    pub billboard_mode: Option<BillboardMode>,

    // shape entities
    pub shape: Option<String>,

    // model entities
    #[serde(rename = "modelURL")]
    pub model_url: Option<String>,
    pub model_scale: Option<Vec3>,
    pub shape_type: Option<ShapeType>,
    #[serde(rename = "compoundShapeURL")]
    pub compound_shape_url: Option<String>,
    pub animation: Animation,

    // light entities
    pub is_spotlight: Option<bool>,
    pub intensity: Option<f32>,
    pub exponent: Option<f32>,
    pub cutoff: Option<f32>,
    pub falloff_radius: Option<f32>,

    // text entities
    pub text: Option<String>,
    pub line_height: Option<f32>,
    pub text_color: Option<Color>,
    pub text_alpha: Option<f32>,
    pub background_color: Option<Color>,
    pub background_alpha: Option<f32>,
    pub unlit: Option<bool>,

    // web entities
    pub source_url: Option<String>,
    pub dpi: Option<u16>,

    // zone entities
    pub key_light: KeyLight,
    pub key_light_mode: Option<ComponentMode>,
    pub ambient_light: AmbientLight,
    pub ambient_light_mode: Option<ComponentMode>,
    pub skybox: Skybox,
    pub skybox_mode: Option<ComponentMode>,
    pub haze: Haze,
    pub haze_mode: Option<ComponentMode>,
    pub bloom: Bloom,
    pub bloom_mode: Option<ComponentMode>,
    pub flying_allowed: Option<bool>,
    pub ghosting_allowed: Option<bool>,
    #[serde(rename = "filterURL")]
    pub filter_url: Option<String>,

    // gizmo entities
    pub gizmo_type: Option<GizmoType>,
    pub ring: RingGizmo,

    // every type
    pub grab: Grab,
    pub pulse: Pulse,
}

/// Microseconds since the Unix epoch.
pub fn now_timestamp_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or(0)
}

/// Renders an age in seconds the way scripts display it, e.g.
/// "1 hours 2 minutes 17 seconds".
pub fn age_as_text(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{} hours {} minutes {} seconds",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

impl EntityProperties {
    /// An edit payload touching nothing, for building partial edits.
    pub fn empty(entity_type: EntityType) -> EntityProperties {
        EntityProperties {
            entity_type,
            ..Default::default()
        }
    }

    /// The fully-populated state of a fresh entity of the given type, with
    /// `created`/`lastEdited` stamped now. Fields that do not apply to the
    /// type stay `None`.
    pub fn default_for(entity_type: EntityType) -> EntityProperties {
        let now = now_timestamp_micros();
        let mut properties = EntityProperties {
            entity_type,
            created: now,
            last_edited: now,
            position: Some(Vec3::ZERO),
            dimensions: Some(DEFAULT_DIMENSIONS),
            rotation: Some(Quat::IDENTITY),
            registration_point: Some(DEFAULT_REGISTRATION_POINT),
            velocity: Some(Vec3::ZERO),
            angular_velocity: Some(Vec3::ZERO),
            gravity: Some(Vec3::ZERO),
            damping: Some(DEFAULT_DAMPING),
            angular_damping: Some(DEFAULT_DAMPING),
            lifetime: Some(GLOBAL_CONFIG.default_lifetime_secs),
            locked: Some(false),
            visible: Some(true),
            can_cast_shadow: Some(true),
            collisionless: Some(false),
            collision_mask: Some(COLLISION_MASK_ALL),
            dynamic: Some(false),
            density: Some(DEFAULT_DENSITY),
            friction: Some(0.5),
            restitution: Some(0.5),
            parent_joint_index: Some(-1),
            name: Some(String::new()),
            description: Some(String::new()),
            script: Some(String::new()),
            script_timestamp: Some(0),
            server_scripts: Some(String::new()),
            href: Some(String::new()),
            user_data: Some(String::new()),
            grab: Grab::defaults(),
            pulse: Pulse::defaults(),
            ..Default::default()
        };

        match entity_type {
            EntityType::Box => {
                properties.shape = Some("Cube".to_string());
                properties.color = Some(Color::WHITE);
                properties.alpha = Some(1.0);
            }
            EntityType::Sphere | EntityType::Shape => {
                properties.shape = Some("Sphere".to_string());
                properties.color = Some(Color::WHITE);
                properties.alpha = Some(1.0);
            }
            EntityType::Model => {
                properties.model_url = Some(String::new());
                properties.model_scale = Some(Vec3::ONE);
                properties.shape_type = Some(ShapeType::None);
                properties.compound_shape_url = Some(String::new());
                properties.animation = Animation::defaults();
                properties.color = Some(Color::WHITE);
                properties.billboard_mode = Some(BillboardMode::None);
            }
            EntityType::Light => {
                properties.color = Some(Color::WHITE);
                properties.is_spotlight = Some(false);
                properties.intensity = Some(1.0);
                properties.exponent = Some(0.0);
                properties.cutoff = Some(75.0);
                properties.falloff_radius = Some(0.1);
            }
            EntityType::Text => {
                properties.text = Some(String::new());
                properties.line_height = Some(0.06);
                properties.text_color = Some(Color::WHITE);
                properties.text_alpha = Some(1.0);
                properties.background_color = Some(Color::BLACK);
                properties.background_alpha = Some(0.9);
                properties.unlit = Some(false);
                properties.billboard_mode = Some(BillboardMode::None);
            }
            EntityType::Web => {
                properties.source_url = Some(String::new());
                properties.dpi = Some(30);
                properties.alpha = Some(1.0);
                properties.color = Some(Color::WHITE);
            }
            EntityType::Zone => {
                properties.shape_type = Some(ShapeType::Box);
                properties.compound_shape_url = Some(String::new());
                properties.key_light = KeyLight::defaults();
                properties.key_light_mode = Some(ComponentMode::Inherit);
                properties.ambient_light = AmbientLight::defaults();
                properties.ambient_light_mode = Some(ComponentMode::Inherit);
                properties.skybox = Skybox::defaults();
                properties.skybox_mode = Some(ComponentMode::Inherit);
                properties.haze = Haze::defaults();
                properties.haze_mode = Some(ComponentMode::Inherit);
                properties.bloom = Bloom::defaults();
                properties.bloom_mode = Some(ComponentMode::Inherit);
                properties.flying_allowed = Some(true);
                properties.ghosting_allowed = Some(true);
                properties.filter_url = Some(String::new());
            }
            EntityType::Gizmo => {
                properties.gizmo_type = Some(GizmoType::Ring);
                properties.ring = RingGizmo::defaults();
            }
            EntityType::Unknown => {}
        }
        properties
    }

    /// Applies `other` on top of this state: every field `other` has set wins,
    /// groups merge field by field, and `lastEdited` keeps the newer stamp.
    pub fn merge(&mut self, other: &EntityProperties) {
        if other.entity_type != EntityType::Unknown {
            self.entity_type = other.entity_type;
        }
        if other.created != 0 {
            self.created = other.created;
        }
        self.last_edited = self.last_edited.max(other.last_edited);
        if other.id.is_some() {
            self.id = other.id;
        }

        if other.position.is_some() {
            self.position = other.position;
        }
        if other.dimensions.is_some() {
            self.dimensions = other.dimensions;
        }
        if other.rotation.is_some() {
            self.rotation = other.rotation;
        }
        if other.registration_point.is_some() {
            self.registration_point = other.registration_point;
        }
        if other.velocity.is_some() {
            self.velocity = other.velocity;
        }
        if other.angular_velocity.is_some() {
            self.angular_velocity = other.angular_velocity;
        }
        if other.gravity.is_some() {
            self.gravity = other.gravity;
        }
        if other.damping.is_some() {
            self.damping = other.damping;
        }
        if other.angular_damping.is_some() {
            self.angular_damping = other.angular_damping;
        }
        if other.lifetime.is_some() {
            self.lifetime = other.lifetime;
        }
        if other.locked.is_some() {
            self.locked = other.locked;
        }
        if other.visible.is_some() {
            self.visible = other.visible;
        }
        if other.can_cast_shadow.is_some() {
            self.can_cast_shadow = other.can_cast_shadow;
        }
        if other.collisionless.is_some() {
            self.collisionless = other.collisionless;
        }
        if other.collision_mask.is_some() {
            self.collision_mask = other.collision_mask;
        }
        if other.dynamic.is_some() {
            self.dynamic = other.dynamic;
        }
        if other.density.is_some() {
            self.density = other.density;
        }
        if other.friction.is_some() {
            self.friction = other.friction;
        }
        if other.restitution.is_some() {
            self.restitution = other.restitution;
        }
        if other.parent_id.is_some() {
            self.parent_id = other.parent_id;
        }
        if other.parent_joint_index.is_some() {
            self.parent_joint_index = other.parent_joint_index;
        }

        if other.name.is_some() {
            self.name = other.name.clone();
        }
        if other.description.is_some() {
            self.description = other.description.clone();
        }
        if other.script.is_some() {
            self.script = other.script.clone();
        }
        if other.script_timestamp.is_some() {
            self.script_timestamp = other.script_timestamp;
        }
        if other.server_scripts.is_some() {
            self.server_scripts = other.server_scripts.clone();
        }
        if other.href.is_some() {
            self.href = other.href.clone();
        }
        if other.user_data.is_some() {
            self.user_data = other.user_data.clone();
        }
        if other.alpha.is_some() {
            self.alpha = other.alpha;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.billboard_mode.is_some() {
            self.billboard_mode = other.billboard_mode;
        }

        if other.shape.is_some() {
            self.shape = other.shape.clone();
        }

        if other.model_url.is_some() {
            self.model_url = other.model_url.clone();
        }
        if other.model_scale.is_some() {
            self.model_scale = other.model_scale;
        }
        if other.shape_type.is_some() {
            self.shape_type = other.shape_type;
        }
        if other.compound_shape_url.is_some() {
            self.compound_shape_url = other.compound_shape_url.clone();
        }
        self.animation.merge(&other.animation);

        if other.is_spotlight.is_some() {
            self.is_spotlight = other.is_spotlight;
        }
        if other.intensity.is_some() {
            self.intensity = other.intensity;
        }
        if other.exponent.is_some() {
            self.exponent = other.exponent;
        }
        if other.cutoff.is_some() {
            self.cutoff = other.cutoff;
        }
        if other.falloff_radius.is_some() {
            self.falloff_radius = other.falloff_radius;
        }

        if other.text.is_some() {
            self.text = other.text.clone();
        }
        if other.line_height.is_some() {
            self.line_height = other.line_height;
        }
        if other.text_color.is_some() {
            self.text_color = other.text_color;
        }
        if other.text_alpha.is_some() {
            self.text_alpha = other.text_alpha;
        }
        if other.background_color.is_some() {
            self.background_color = other.background_color;
        }
        if other.background_alpha.is_some() {
            self.background_alpha = other.background_alpha;
        }
        if other.unlit.is_some() {
            self.unlit = other.unlit;
        }

        if other.source_url.is_some() {
            self.source_url = other.source_url.clone();
        }
        if other.dpi.is_some() {
            self.dpi = other.dpi;
        }

        self.key_light.merge(&other.key_light);
        if other.key_light_mode.is_some() {
            self.key_light_mode = other.key_light_mode;
        }
        self.ambient_light.merge(&other.ambient_light);
        if other.ambient_light_mode.is_some() {
            self.ambient_light_mode = other.ambient_light_mode;
        }
        self.skybox.merge(&other.skybox);
        if other.skybox_mode.is_some() {
            self.skybox_mode = other.skybox_mode;
        }
        self.haze.merge(&other.haze);
        if other.haze_mode.is_some() {
            self.haze_mode = other.haze_mode;
        }
        self.bloom.merge(&other.bloom);
        if other.bloom_mode.is_some() {
            self.bloom_mode = other.bloom_mode;
        }
        if other.flying_allowed.is_some() {
            self.flying_allowed = other.flying_allowed;
        }
        if other.ghosting_allowed.is_some() {
            self.ghosting_allowed = other.ghosting_allowed;
        }
        if other.filter_url.is_some() {
            self.filter_url = other.filter_url.clone();
        }

        if other.gizmo_type.is_some() {
            self.gizmo_type = other.gizmo_type;
        }
        self.ring.merge(&other.ring);

        self.grab.merge(&other.grab);
        self.pulse.merge(&other.pulse);
    }

    /// Script names of every property this edit touches, with group members
    /// listed as "group.member".
    pub fn changed_properties(&self) -> Vec<String> {
        let mut out = Vec::new();
        {
            let mut push = |set: bool, name: &str| {
                if set {
                    out.push(name.to_string());
                }
            };
            push(self.position.is_some(), "position");
            push(self.dimensions.is_some(), "dimensions");
            push(self.rotation.is_some(), "rotation");
            push(self.registration_point.is_some(), "registrationPoint");
            push(self.velocity.is_some(), "velocity");
            push(self.angular_velocity.is_some(), "angularVelocity");
            push(self.gravity.is_some(), "gravity");
            push(self.damping.is_some(), "damping");
            push(self.angular_damping.is_some(), "angularDamping");
            push(self.lifetime.is_some(), "lifetime");
            push(self.locked.is_some(), "locked");
            push(self.visible.is_some(), "visible");
            push(self.can_cast_shadow.is_some(), "canCastShadow");
            push(self.collisionless.is_some(), "collisionless");
            push(self.collision_mask.is_some(), "collisionMask");
            push(self.dynamic.is_some(), "dynamic");
            push(self.density.is_some(), "density");
            push(self.friction.is_some(), "friction");
            push(self.restitution.is_some(), "restitution");
            push(self.parent_id.is_some(), "parentID");
            push(self.parent_joint_index.is_some(), "parentJointIndex");
            push(self.name.is_some(), "name");
            push(self.description.is_some(), "description");
            push(self.script.is_some(), "script");
            push(self.script_timestamp.is_some(), "scriptTimestamp");
            push(self.server_scripts.is_some(), "serverScripts");
            push(self.href.is_some(), "href");
            push(self.user_data.is_some(), "userData");
            push(self.alpha.is_some(), "alpha");
            push(self.color.is_some(), "color");
            push(self.billboard_mode.is_some(), "billboardMode");
            push(self.shape.is_some(), "shape");
            push(self.model_url.is_some(), "modelURL");
            push(self.model_scale.is_some(), "modelScale");
            push(self.shape_type.is_some(), "shapeType");
            push(self.compound_shape_url.is_some(), "compoundShapeURL");
            push(self.is_spotlight.is_some(), "isSpotlight");
            push(self.intensity.is_some(), "intensity");
            push(self.exponent.is_some(), "exponent");
            push(self.cutoff.is_some(), "cutoff");
            push(self.falloff_radius.is_some(), "falloffRadius");
            push(self.text.is_some(), "text");
            push(self.line_height.is_some(), "lineHeight");
            push(self.text_color.is_some(), "textColor");
            push(self.text_alpha.is_some(), "textAlpha");
            push(self.background_color.is_some(), "backgroundColor");
            push(self.background_alpha.is_some(), "backgroundAlpha");
            push(self.unlit.is_some(), "unlit");
            push(self.source_url.is_some(), "sourceUrl");
            push(self.dpi.is_some(), "dpi");
            push(self.key_light_mode.is_some(), "keyLightMode");
            push(self.ambient_light_mode.is_some(), "ambientLightMode");
            push(self.skybox_mode.is_some(), "skyboxMode");
            push(self.haze_mode.is_some(), "hazeMode");
            push(self.bloom_mode.is_some(), "bloomMode");
            push(self.flying_allowed.is_some(), "flyingAllowed");
            push(self.ghosting_allowed.is_some(), "ghostingAllowed");
            push(self.filter_url.is_some(), "filterURL");
            push(self.gizmo_type.is_some(), "gizmoType");
        }
        self.animation.changed_properties("animation", &mut out);
        self.key_light.changed_properties("keyLight", &mut out);
        self.ambient_light.changed_properties("ambientLight", &mut out);
        self.skybox.changed_properties("skybox", &mut out);
        self.haze.changed_properties("haze", &mut out);
        self.bloom.changed_properties("bloom", &mut out);
        self.ring.changed_properties("ring", &mut out);
        self.grab.changed_properties("grab", &mut out);
        self.pulse.changed_properties("pulse", &mut out);
        out
    }

    /// Fills every untouched field from the type's defaults, keeping what is
    /// already set.
    pub fn mark_all_changed(&mut self) {
        let mut filled = EntityProperties::default_for(self.entity_type);
        filled.merge(self);
        *self = filled;
    }

    /// Clamps every out-of-range property into its documented range,
    /// logging each correction.
    pub fn sanitize(&mut self) {
        let half_domain = GLOBAL_CONFIG.domain_size * 0.5;
        if let Some(position) = self.position {
            let clamped = position.clamp(Vec3::splat(-half_domain), Vec3::splat(half_domain));
            if clamped != position {
                warn!("clamping position {:?} into the domain bounds", position);
                self.position = Some(clamped);
            }
        }
        if let Some(registration) = self.registration_point {
            let clamped = registration.clamp(Vec3::ZERO, Vec3::ONE);
            if clamped != registration {
                warn!("clamping registrationPoint {:?} into the unit cube", registration);
                self.registration_point = Some(clamped);
            }
        }
        if let Some(density) = self.density {
            if !(MIN_DENSITY..=MAX_DENSITY).contains(&density) {
                warn!("clamping density {} into [{}, {}]", density, MIN_DENSITY, MAX_DENSITY);
                self.density = Some(density.clamp(MIN_DENSITY, MAX_DENSITY));
            }
        }
        if let Some(friction) = self.friction {
            if !(0.0..=MAX_FRICTION).contains(&friction) {
                warn!("clamping friction {} into [0, {}]", friction, MAX_FRICTION);
                self.friction = Some(friction.clamp(0.0, MAX_FRICTION));
            }
        }
        if let Some(restitution) = self.restitution {
            if !(0.0..=MAX_RESTITUTION).contains(&restitution) {
                warn!("clamping restitution {} into [0, {}]", restitution, MAX_RESTITUTION);
                self.restitution = Some(restitution.clamp(0.0, MAX_RESTITUTION));
            }
        }
        let clamp_alpha = |name: &str, field: &mut Option<f32>| {
            if let Some(alpha) = *field {
                if !(0.0..=1.0).contains(&alpha) {
                    warn!("clamping {} {} into [0, 1]", name, alpha);
                    *field = Some(alpha.clamp(0.0, 1.0));
                }
            }
        };
        clamp_alpha("alpha", &mut self.alpha);
        clamp_alpha("textAlpha", &mut self.text_alpha);
        clamp_alpha("backgroundAlpha", &mut self.background_alpha);

        self.key_light.sanitize();
        self.ring.sanitize();
    }

    /// The smallest axis-aligned cube guaranteed to contain the entity at any
    /// rotation: half-extent is the length of the worst-case registration
    /// offset times the dimensions. Falls back to a unit cube around the
    /// origin while position or dimensions are unset.
    pub fn query_aacube(&self) -> AACube {
        let (position, dimensions) = match (self.position, self.dimensions) {
            (Some(position), Some(dimensions)) => (position, dimensions),
            _ => return AACube::new(Vec3::splat(-0.5), 1.0),
        };
        let registration = self.registration_point.unwrap_or(DEFAULT_REGISTRATION_POINT);
        let furthest = registration.max(Vec3::ONE - registration) * dimensions;
        let radius = furthest.length();
        AACube::new(position - Vec3::splat(radius), 2.0 * radius)
    }

    /// Seconds since the entity was created, 0 for a never-created payload.
    pub fn age_seconds(&self) -> f32 {
        if self.created == 0 {
            return 0.0;
        }
        now_timestamp_micros().saturating_sub(self.created) as f32 / 1.0e6
    }

    /// The camelCase JSON map handed to scripts. Untouched properties are
    /// stripped; with `skip_defaults` properties equal to the type's defaults
    /// go too, apart from identity/time keys. The computed `age` and
    /// `ageAsText` entries are always added.
    pub fn to_script_value(&self, skip_defaults: bool) -> Value {
        // to_value only errors on maps with non-string keys; every key here
        // is a struct field name, and non-finite floats serialize as null
        let serialized =
            serde_json::to_value(self).expect("entity properties always serialize to JSON");
        let mut value = strip_nulls(serialized);

        if skip_defaults {
            let defaults = strip_nulls(
                serde_json::to_value(EntityProperties::default_for(self.entity_type))
                    .expect("entity defaults always serialize to JSON"),
            );
            value = strip_defaults(value, &defaults, ALWAYS_KEPT, GROUP_KEYS);
        }

        if let Some(map) = value.as_object_mut() {
            let age = self.age_seconds();
            map.insert("age".to_string(), age.into());
            map.insert("ageAsText".to_string(), age_as_text(age).into());
        }
        value
    }

    /// Parses a script-provided property map, honoring the legacy aliases
    /// `ignoreForCollisions` (now collisionless) and `collisionsWillMove`
    /// (now dynamic). Computed read-only keys are ignored.
    pub fn from_script_value(mut value: Value) -> Result<EntityProperties, serde_json::Error> {
        if let Some(map) = value.as_object_mut() {
            map.remove("age");
            map.remove("ageAsText");
            if let Some(ignore) = map.remove("ignoreForCollisions") {
                if !map.contains_key("collisionless") {
                    if let Some(ignore) = ignore.as_bool() {
                        map.insert("collisionless".to_string(), Value::Bool(ignore));
                    }
                }
            }
            if let Some(will_move) = map.remove("collisionsWillMove") {
                if !map.contains_key("dynamic") {
                    map.insert("dynamic".to_string(), will_move);
                }
            }
        }
        serde_json::from_value(value)
    }
}
