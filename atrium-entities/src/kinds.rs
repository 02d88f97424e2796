use serde::{Deserialize, Serialize};

/// Every concrete kind of entity that can live in a domain. Scripts spell
/// these with a leading capital ("Box", "Zone").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Unknown,
    Box,
    Sphere,
    Shape,
    Model,
    Light,
    Text,
    Web,
    Zone,
    Gizmo,
}

impl Default for EntityType {
    fn default() -> Self {
        EntityType::Unknown
    }
}

/// Collision shape family, spelled the way scripts write it ("capsule-y",
/// "static-mesh").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    None,
    Box,
    Sphere,
    CapsuleX,
    CapsuleY,
    CapsuleZ,
    CylinderX,
    CylinderY,
    CylinderZ,
    Hull,
    Compound,
    SimpleHull,
    SimpleCompound,
    StaticMesh,
    Ellipsoid,
    Circle,
    Plane,
}

impl Default for ShapeType {
    fn default() -> Self {
        ShapeType::None
    }
}

/// Whether a zone effect follows the enclosing zone, is forced off, or is
/// forced on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentMode {
    Inherit,
    Disabled,
    Enabled,
}

impl Default for ComponentMode {
    fn default() -> Self {
        ComponentMode::Inherit
    }
}

/// Easing applied to a pulsing color or alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PulseMode {
    None,
    In,
    Out,
    InOut,
    OutIn,
}

impl Default for PulseMode {
    fn default() -> Self {
        PulseMode::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoType {
    Ring,
}

impl Default for GizmoType {
    fn default() -> Self {
        GizmoType::Ring
    }
}

/// How an entity turns to face the camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillboardMode {
    None,
    Yaw,
    Full,
}

impl Default for BillboardMode {
    fn default() -> Self {
        BillboardMode::None
    }
}
