//! Serde adapter that sends rotations over the wire as the 8-byte packed
//! quaternion form while leaving script-facing JSON as plain [x, y, z, w].
//!
//! Apply with `#[serde(with = "quat_wire")]` on `Quat` fields or
//! `#[serde(with = "quat_wire::option")]` on `Option<Quat>` fields.

use atrium_core::util::{pack_quat_64, unpack_quat_64};
use glam::Quat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(rotation: &Quat, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if serializer.is_human_readable() {
        rotation.serialize(serializer)
    } else {
        pack_quat_64(*rotation).serialize(serializer)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Quat, D::Error>
where
    D: Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        Quat::deserialize(deserializer)
    } else {
        Ok(unpack_quat_64(<[u8; 8]>::deserialize(deserializer)?))
    }
}

pub mod option {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Packed(#[serde(with = "crate::quat_wire")] Quat);

    pub fn serialize<S>(rotation: &Option<Quat>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (*rotation).map(Packed).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Quat>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Packed>::deserialize(deserializer)?.map(|Packed(rotation)| rotation))
    }
}

#[cfg(test)]
mod tests {
    use bincode::Options;
    use glam::{Quat, Vec3};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Spin {
        #[serde(with = "crate::quat_wire::option")]
        rotation: Option<Quat>,
    }

    #[test]
    fn test_binary_form_is_packed() {
        let spin = Spin {
            rotation: Some(Quat::from_axis_angle(Vec3::Y, 1.25)),
        };
        let bytes = bincode::DefaultOptions::new().serialize(&spin).unwrap();
        // 1 byte Option tag + 8 packed bytes
        assert_eq!(bytes.len(), 9);

        let back: Spin = bincode::DefaultOptions::new().deserialize(&bytes).unwrap();
        let (a, b) = (spin.rotation.unwrap(), back.rotation.unwrap());
        assert!(a.abs_diff_eq(b, 1.0e-4));
    }

    #[test]
    fn test_json_form_stays_readable() {
        let spin = Spin {
            rotation: Some(Quat::IDENTITY),
        };
        let value = serde_json::to_value(&spin).unwrap();
        assert_eq!(value["rotation"][3], 1.0);
        let back: Spin = serde_json::from_value(value).unwrap();
        assert_eq!(back, spin);
    }

    #[test]
    fn test_none_round_trips() {
        let spin = Spin { rotation: None };
        let bytes = bincode::DefaultOptions::new().serialize(&spin).unwrap();
        assert_eq!(bytes.len(), 1);
        let back: Spin = bincode::DefaultOptions::new().deserialize(&bytes).unwrap();
        assert_eq!(back, spin);
    }
}
