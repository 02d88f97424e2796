//! Wire form of entity edits: the `Packet` framing trait, the message enum,
//! budget-aware splitting of oversized edits, and application of messages to
//! an entity store.

use std::collections::HashMap;
use std::io::{Read, Write};

use bincode::{DefaultOptions, Options};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::kinds::EntityType;
use crate::properties::{now_timestamp_micros, EntityProperties};
use crate::script_value::strip_nulls;
use crate::settings::GLOBAL_CONFIG;

pub trait Packet: Serialize + DeserializeOwned {
    fn parse_packet<R: Read>(reader: &mut R) -> bincode::Result<Self> {
        DefaultOptions::new().deserialize_from(reader)
    }
    fn packet_size(&self) -> bincode::Result<u64> {
        DefaultOptions::new().serialized_size(self)
    }
    fn write_packet<W: Write>(&self, write: &mut W) -> bincode::Result<()> {
        DefaultOptions::new().serialize_into(write, self)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum EntityMessage {
    Add {
        id: Uuid,
        entity_type: EntityType,
        properties: EntityProperties,
    },
    Edit {
        id: Uuid,
        last_edited: u64,
        properties: EntityProperties,
    },
    Erase {
        ids: Vec<Uuid>,
    },
    Clone {
        source_id: Uuid,
        new_id: Uuid,
        properties: EntityProperties,
    },
}

impl Packet for EntityMessage {}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed entity message: {0}")]
    Malformed(#[from] bincode::Error),
    #[error("{0} trailing bytes after entity message")]
    TrailingBytes(usize),
}

/// Decodes a single message from a buffer, rejecting unconsumed bytes.
pub fn read_message(bytes: &[u8]) -> Result<EntityMessage, DecodeError> {
    let mut reader = bytes;
    let message = EntityMessage::parse_packet(&mut reader)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes(reader.len()));
    }
    Ok(message)
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("edit packet budget of {budget} bytes cannot fit property {property}")]
    BudgetTooSmall { budget: usize, property: String },
    #[error("entity property encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("entity property decomposition failed: {0}")]
    Decomposition(#[from] serde_json::Error),
}

/// Properties packed into the first edit message when an edit is split, so a
/// moving entity lands in the right place even if later fragments are lost.
const SPATIAL_CORE: &[&str] = &[
    "position",
    "rotation",
    "dimensions",
    "registrationPoint",
    "velocity",
    "angularVelocity",
    "gravity",
];

// keys carried structurally by every fragment rather than split off
fn is_framing_key(key: &str) -> bool {
    matches!(key, "id" | "type" | "created" | "lastEdited")
}

/// Splits an edit against the configured edit-packet budget.
pub fn split_edit_for_wire(
    id: Uuid,
    properties: &EntityProperties,
) -> Result<Vec<EntityMessage>, EditError> {
    split_edit(id, properties, GLOBAL_CONFIG.max_edit_packet_bytes)
}

/// Splits an edit into as many messages as its properties need to fit the
/// byte budget. Whole property groups stay together; the spatial core rides
/// in the first message. A single property that cannot fit on its own is an
/// error.
pub fn split_edit(
    id: Uuid,
    properties: &EntityProperties,
    budget: usize,
) -> Result<Vec<EntityMessage>, EditError> {
    let last_edited = properties.last_edited;
    let whole = EntityMessage::Edit {
        id,
        last_edited,
        properties: properties.clone(),
    };
    if whole.packet_size()? as usize <= budget {
        return Ok(vec![whole]);
    }

    // Decompose into one payload per property (per group for grouped
    // properties), spatial core first, otherwise in serialization order.
    let serialized = strip_nulls(serde_json::to_value(properties)?);
    let mut entries: Vec<(String, Value)> = match serialized {
        Value::Object(map) => map
            .into_iter()
            .filter(|(key, _)| !is_framing_key(key))
            .collect(),
        _ => Vec::new(),
    };
    entries.sort_by_key(|(key, _)| !SPATIAL_CORE.contains(&key.as_str()));

    let mut parts = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        let mut single = serde_json::Map::new();
        single.insert(key.clone(), entry);
        let mut part = EntityProperties::from_script_value(Value::Object(single))?;
        part.entity_type = properties.entity_type;
        part.last_edited = last_edited;
        parts.push((key, part));
    }

    let mut messages = Vec::new();
    let mut current = EntityProperties::empty(properties.entity_type);
    current.last_edited = last_edited;
    let mut current_count = 0;

    for (key, part) in parts {
        let mut candidate = current.clone();
        candidate.merge(&part);
        let size = EntityMessage::Edit {
            id,
            last_edited,
            properties: candidate.clone(),
        }
        .packet_size()? as usize;

        if size <= budget {
            current = candidate;
            current_count += 1;
            continue;
        }
        if current_count == 0 {
            return Err(EditError::BudgetTooSmall {
                budget,
                property: key,
            });
        }
        // flush and start a fresh message with this property alone
        messages.push(EntityMessage::Edit {
            id,
            last_edited,
            properties: current,
        });
        let alone = EntityMessage::Edit {
            id,
            last_edited,
            properties: part.clone(),
        };
        if alone.packet_size()? as usize > budget {
            return Err(EditError::BudgetTooSmall {
                budget,
                property: key,
            });
        }
        current = part;
        current_count = 1;
    }
    if current_count > 0 {
        messages.push(EntityMessage::Edit {
            id,
            last_edited,
            properties: current,
        });
    }
    debug!("split oversized edit into {} messages", messages.len());
    Ok(messages)
}

pub type EntityStore = HashMap<Uuid, EntityProperties>;

/// Applies one message to the store. Stale edits (older than the stored
/// `lastEdited`) and edits or clones naming unknown entities are dropped.
pub fn apply_message(store: &mut EntityStore, message: EntityMessage) {
    match message {
        EntityMessage::Add {
            id,
            entity_type,
            properties,
        } => {
            let mut fresh = EntityProperties::default_for(entity_type);
            fresh.id = Some(id);
            // the wire timestamp is authoritative; the default stamp would
            // shadow it and make every pre-dated edit look stale
            fresh.last_edited = 0;
            fresh.merge(&properties);
            fresh.sanitize();
            store.insert(id, fresh);
        }
        EntityMessage::Edit {
            id,
            last_edited,
            properties,
        } => match store.get_mut(&id) {
            Some(stored) => {
                if last_edited < stored.last_edited {
                    debug!("dropping stale edit for entity {}", id);
                    return;
                }
                stored.merge(&properties);
                stored.sanitize();
            }
            None => debug!("dropping edit for unknown entity {}", id),
        },
        EntityMessage::Erase { ids } => {
            for id in ids {
                store.remove(&id);
            }
        }
        EntityMessage::Clone {
            source_id,
            new_id,
            properties,
        } => match store.get(&source_id).cloned() {
            Some(mut cloned) => {
                cloned.id = Some(new_id);
                cloned.created = now_timestamp_micros();
                cloned.merge(&properties);
                cloned.sanitize();
                store.insert(new_id, cloned);
            }
            None => debug!("dropping clone of unknown entity {}", source_id),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn edit_with_name(name: &str, last_edited: u64) -> EntityProperties {
        let mut properties = EntityProperties::empty(EntityType::Box);
        properties.name = Some(name.to_string());
        properties.last_edited = last_edited;
        properties
    }

    #[test]
    fn test_read_message_round_trip() {
        let id = Uuid::new_v4();
        let message = EntityMessage::Edit {
            id,
            last_edited: 42,
            properties: edit_with_name("chair", 42),
        };
        let mut bytes = Vec::new();
        message.write_packet(&mut bytes).unwrap();
        assert_eq!(bytes.len() as u64, message.packet_size().unwrap());
        assert_eq!(read_message(&bytes).unwrap(), message);
    }

    #[test]
    fn test_read_message_rejects_trailing_bytes() {
        let message = EntityMessage::Erase {
            ids: vec![Uuid::new_v4()],
        };
        let mut bytes = Vec::new();
        message.write_packet(&mut bytes).unwrap();
        bytes.push(0xff);
        assert!(matches!(
            read_message(&bytes),
            Err(DecodeError::TrailingBytes(1))
        ));
    }

    #[test]
    fn test_split_edit_small_edit_stays_whole() {
        let id = Uuid::new_v4();
        let messages = split_edit_for_wire(id, &edit_with_name("chair", 7)).unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_split_edit_fragments_fit_budget_and_remerge() {
        let id = Uuid::new_v4();
        let mut properties = EntityProperties::default_for(EntityType::Zone);
        properties.mark_all_changed();
        properties.last_edited = 99;

        let budget = 300;
        let messages = split_edit(id, &properties, budget).unwrap();
        assert!(messages.len() > 1);

        let mut merged = EntityProperties::empty(EntityType::Zone);
        for message in &messages {
            let size = message.packet_size().unwrap() as usize;
            assert!(size <= budget, "fragment of {} bytes over budget", size);
            match message {
                EntityMessage::Edit {
                    id: edit_id,
                    properties: fragment,
                    ..
                } => {
                    assert_eq!(*edit_id, id);
                    merged.merge(fragment);
                }
                other => panic!("unexpected message {:?}", other),
            }
        }
        merged.created = properties.created;
        assert_eq!(merged, properties);

        // position travels in the first fragment
        match &messages[0] {
            EntityMessage::Edit { properties, .. } => assert!(properties.position.is_some()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_split_edit_impossible_budget() {
        let id = Uuid::new_v4();
        let mut properties = EntityProperties::default_for(EntityType::Box);
        properties.mark_all_changed();
        assert!(matches!(
            split_edit(id, &properties, 8),
            Err(EditError::BudgetTooSmall { .. })
        ));
    }

    #[test]
    fn test_apply_add_edit_erase() {
        let mut store = EntityStore::new();
        let id = Uuid::new_v4();

        apply_message(
            &mut store,
            EntityMessage::Add {
                id,
                entity_type: EntityType::Box,
                properties: edit_with_name("crate", 10),
            },
        );
        let stored = &store[&id];
        assert_eq!(stored.name.as_deref(), Some("crate"));
        // defaults filled in around the edit
        assert_eq!(stored.visible, Some(true));
        // the stored stamp is the add payload's, not the server clock
        assert_eq!(stored.last_edited, 10);

        apply_message(
            &mut store,
            EntityMessage::Edit {
                id,
                last_edited: 20,
                properties: edit_with_name("barrel", 20),
            },
        );
        assert_eq!(store[&id].name.as_deref(), Some("barrel"));

        // stale edit dropped
        apply_message(
            &mut store,
            EntityMessage::Edit {
                id,
                last_edited: 5,
                properties: edit_with_name("ghost", 5),
            },
        );
        assert_eq!(store[&id].name.as_deref(), Some("barrel"));

        apply_message(&mut store, EntityMessage::Erase { ids: vec![id] });
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_clone_copies_source() {
        let mut store = EntityStore::new();
        let source_id = Uuid::new_v4();
        let new_id = Uuid::new_v4();

        let mut source = EntityProperties::default_for(EntityType::Sphere);
        source.position = Some(Vec3::new(1.0, 2.0, 3.0));
        apply_message(
            &mut store,
            EntityMessage::Add {
                id: source_id,
                entity_type: EntityType::Sphere,
                properties: source,
            },
        );

        let mut overrides = EntityProperties::empty(EntityType::Sphere);
        overrides.position = Some(Vec3::ZERO);
        apply_message(
            &mut store,
            EntityMessage::Clone {
                source_id,
                new_id,
                properties: overrides,
            },
        );

        let cloned = &store[&new_id];
        assert_eq!(cloned.id, Some(new_id));
        assert_eq!(cloned.position, Some(Vec3::ZERO));
        assert_eq!(cloned.entity_type, EntityType::Sphere);
        assert!(store.contains_key(&source_id));

        // cloning an unknown source is a no-op
        apply_message(
            &mut store,
            EntityMessage::Clone {
                source_id: Uuid::new_v4(),
                new_id: Uuid::new_v4(),
                properties: EntityProperties::empty(EntityType::Unknown),
            },
        );
        assert_eq!(store.len(), 2);
    }
}
