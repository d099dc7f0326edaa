use pixelveil::clipboard::{
    self, PASTE_OFFSET, SHAPE_CLIPBOARD_VERSION, ShapeClipboardPayload,
};
use pixelveil::object::{Point, RedactionObject, ShapeGeometry, StyleParams};

fn freehand_object() -> RedactionObject {
    RedactionObject::new(
        ShapeGeometry::Freehand {
            points: vec![
                Point::new(5.0, 5.0),
                Point::new(12.0, 9.0),
                Point::new(20.0, 4.0),
            ],
        },
        StyleParams::default(),
    )
}

#[test]
fn test_duplicate_mints_fresh_ids_and_offsets_geometry() {
    let source = freehand_object();
    let duplicated = clipboard::duplicate_with_offset(std::slice::from_ref(&source));

    assert_eq!(duplicated.len(), 1);
    assert_ne!(duplicated[0].id, source.id);
    assert_eq!(duplicated[0].kind, source.kind);
    assert_eq!(duplicated[0].style, source.style);

    let source_bounds = source.shape.bounds();
    let duplicate_bounds = duplicated[0].shape.bounds();
    assert_eq!(duplicate_bounds.min_x, source_bounds.min_x + PASTE_OFFSET);
    assert_eq!(duplicate_bounds.min_y, source_bounds.min_y + PASTE_OFFSET);
}

#[test]
fn test_payload_serializes_and_round_trips() {
    let payload = ShapeClipboardPayload::new(&[freehand_object()]);
    let raw = clipboard::serialize(&payload).expect("serializable payload");

    let parsed = clipboard::deserialize(&raw).expect("round trip");
    assert_eq!(parsed.version, SHAPE_CLIPBOARD_VERSION);
    assert_eq!(parsed, payload);
}

#[test]
fn test_deserialize_rejects_garbage_and_foreign_versions() {
    assert!(clipboard::deserialize("not a payload").is_none());
    assert!(clipboard::deserialize("{\"objects\":[]}").is_none());

    let mut payload = ShapeClipboardPayload::new(&[freehand_object()]);
    payload.version = 99;
    let raw = clipboard::serialize(&payload).expect("serializable payload");
    assert!(clipboard::deserialize(&raw).is_none());
}
