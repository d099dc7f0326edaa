use log::warn;
use serde::{Deserialize, Serialize};

use crate::id_generator::generate_id;
use crate::object::RedactionObject;
use crate::util::time;

pub const SHAPE_CLIPBOARD_VERSION: u32 = 1;

/// Offset applied to pasted duplicates so they never land exactly on top of
/// their sources.
pub const PASTE_OFFSET: f32 = 16.0;

/// A serializable snapshot of copied objects, decoupled from the live
/// document so cross-document paste works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeClipboardPayload {
    pub version: u32,
    pub objects: Vec<RedactionObject>,
}

impl ShapeClipboardPayload {
    pub fn new(objects: &[RedactionObject]) -> Self {
        Self {
            version: SHAPE_CLIPBOARD_VERSION,
            objects: objects.to_vec(),
        }
    }
}

pub fn serialize(payload: &ShapeClipboardPayload) -> Result<String, serde_json::Error> {
    serde_json::to_string(payload)
}

/// Parse a payload from raw clipboard text.
///
/// Unparseable or wrong-version data yields `None`; paste simply does
/// nothing with foreign clipboard contents.
pub fn deserialize(raw: &str) -> Option<ShapeClipboardPayload> {
    let payload: ShapeClipboardPayload = match serde_json::from_str(raw) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Ignoring unparseable shape clipboard payload: {err}");
            return None;
        }
    };

    if payload.version != SHAPE_CLIPBOARD_VERSION {
        warn!(
            "Ignoring shape clipboard payload with version {}",
            payload.version
        );
        return None;
    }

    Some(payload)
}

/// Duplicate objects for paste: fresh ids, fresh timestamps, and geometry
/// offset by [`PASTE_OFFSET`] on both axes.
pub fn duplicate_with_offset(objects: &[RedactionObject]) -> Vec<RedactionObject> {
    let now = time::timestamp_millis();

    objects
        .iter()
        .map(|object| RedactionObject {
            id: generate_id(),
            kind: object.kind,
            shape: object.shape.translated(PASTE_OFFSET, PASTE_OFFSET),
            style: object.style,
            visible: object.visible,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
