//! Cross-module scenarios: a full edit's trip from script value through the
//! wire into a store and back out to a script value, and the query volume
//! feeding the spatial library.

use atrium_core::ViewFrustum;
use glam::{Mat4, Quat, Vec3};
use uuid::Uuid;

use crate::packets::{apply_message, read_message, split_edit, EntityMessage, EntityStore, Packet};
use crate::properties::EntityProperties;
use crate::EntityType;

#[test]
fn test_script_edit_through_wire_and_back() {
    // a script assembles a zone edit
    let mut edit = EntityProperties::from_script_value(serde_json::json!({
        "type": "Zone",
        "name": "sunset plaza",
        "position": [100.0, 0.0, -40.0],
        "dimensions": [64.0, 32.0, 64.0],
        "keyLight": { "intensity": 0.8, "castShadows": true },
        "haze": { "hazeRange": 400.0 },
    }))
    .unwrap();
    edit.last_edited = 1000;

    // entity created, then the edit travels as bytes
    let id = Uuid::new_v4();
    let mut store = EntityStore::new();
    apply_message(
        &mut store,
        EntityMessage::Add {
            id,
            entity_type: EntityType::Zone,
            properties: EntityProperties::empty(EntityType::Zone),
        },
    );

    let message = EntityMessage::Edit {
        id,
        last_edited: edit.last_edited,
        properties: edit,
    };
    let mut bytes = Vec::new();
    message.write_packet(&mut bytes).unwrap();
    apply_message(&mut store, read_message(&bytes).unwrap());

    let stored = &store[&id];
    assert_eq!(stored.name.as_deref(), Some("sunset plaza"));
    assert_eq!(stored.key_light.intensity, Some(0.8));
    assert_eq!(stored.key_light.cast_shadows, Some(true));
    assert_eq!(stored.haze.haze_range, Some(400.0));
    // Add filled the zone defaults the edit did not touch
    assert_eq!(stored.flying_allowed, Some(true));

    // and back out to a script
    let value = stored.to_script_value(true);
    assert_eq!(value["type"], "Zone");
    assert_eq!(value["name"], "sunset plaza");
    assert_eq!(value["keyLight"]["intensity"].as_f64().unwrap() as f32, 0.8);
    // zone defaults the edit did not touch are skipped
    assert!(value.get("flyingAllowed").is_none());
}

#[test]
fn test_split_edit_applies_identically_to_whole_edit() {
    let id = Uuid::new_v4();
    let mut edit = EntityProperties::default_for(EntityType::Zone);
    edit.mark_all_changed();
    edit.name = Some("fragmented".to_string());
    edit.last_edited = 500;

    let mut whole_store = EntityStore::new();
    let mut split_store = EntityStore::new();
    for store in [&mut whole_store, &mut split_store] {
        apply_message(
            store,
            EntityMessage::Add {
                id,
                entity_type: EntityType::Zone,
                properties: EntityProperties::empty(EntityType::Zone),
            },
        );
    }

    // both the whole edit and its fragments make the wire trip, so packed
    // rotations lose exactly one round of quantization on each side
    let whole = EntityMessage::Edit {
        id,
        last_edited: edit.last_edited,
        properties: edit.clone(),
    };
    let mut bytes = Vec::new();
    whole.write_packet(&mut bytes).unwrap();
    apply_message(&mut whole_store, read_message(&bytes).unwrap());

    for message in split_edit(id, &edit, 400).unwrap() {
        // each fragment makes the wire trip on its own
        let mut bytes = Vec::new();
        message.write_packet(&mut bytes).unwrap();
        apply_message(&mut split_store, read_message(&bytes).unwrap());
    }

    let whole = &whole_store[&id];
    let split = &split_store[&id];
    assert_eq!(whole.name, split.name);
    assert_eq!(whole.position, split.position);
    assert_eq!(whole.key_light, split.key_light);
    assert_eq!(whole.haze, split.haze);
    assert_eq!(whole.ring, split.ring);
    assert_eq!(whole.grab, split.grab);
    assert_eq!(whole.last_edited, split.last_edited);
}

#[test]
fn test_rotation_survives_wire_within_packing_error() {
    let id = Uuid::new_v4();
    let rotation = Quat::from_axis_angle(Vec3::new(0.3, 1.0, -0.2).normalize(), 1.1);
    let mut edit = EntityProperties::empty(EntityType::Box);
    edit.rotation = Some(rotation);

    let message = EntityMessage::Edit {
        id,
        last_edited: 1,
        properties: edit,
    };
    let mut bytes = Vec::new();
    message.write_packet(&mut bytes).unwrap();
    match read_message(&bytes).unwrap() {
        EntityMessage::Edit { properties, .. } => {
            let unpacked = properties.rotation.unwrap();
            assert!(unpacked.abs_diff_eq(rotation, 1.0e-4));
        }
        other => panic!("unexpected message {:?}", other),
    }
}

#[test]
fn test_query_cube_feeds_frustum_culling() {
    let mut visible = EntityProperties::empty(EntityType::Box);
    visible.position = Some(Vec3::new(0.0, 0.0, -20.0));
    visible.dimensions = Some(Vec3::ONE);

    let mut behind = EntityProperties::empty(EntityType::Box);
    behind.position = Some(Vec3::new(0.0, 0.0, 200.0));
    behind.dimensions = Some(Vec3::ONE);

    let mut frustum = ViewFrustum::new();
    frustum.set_position(Vec3::ZERO);
    frustum.set_orientation(Quat::IDENTITY);
    frustum.set_projection(Mat4::perspective_rh(
        60.0_f32.to_radians(),
        16.0 / 9.0,
        0.1,
        1000.0,
    ));
    frustum.calculate();

    assert!(frustum.cube_intersects_keyhole(&visible.query_aacube()));
    assert!(!frustum.cube_intersects_keyhole(&behind.query_aacube()));
}
