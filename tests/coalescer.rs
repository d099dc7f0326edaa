use pixelveil::coalescer::DraftCoalescer;
use pixelveil::command::CommandKind;
use pixelveil::object::{RedactionObject, ShapeGeometry, StyleParams};
use pixelveil::state::{EditorAction, EditorState};

fn rect_object(x: f32) -> RedactionObject {
    RedactionObject::new(
        ShapeGeometry::Rect {
            x,
            y: 10.0,
            width: 40.0,
            height: 30.0,
        },
        StyleParams::default(),
    )
}

#[test]
fn test_rapid_updates_collapse_to_the_latest_value() {
    let mut coalescer = DraftCoalescer::new();
    coalescer.begin(0);

    for value in 1..=5 {
        coalescer.update(value);
    }

    // One pending tick holds only the last writer.
    assert_eq!(coalescer.take_tick(), Some(5));
    assert_eq!(coalescer.take_tick(), None);
    assert_eq!(coalescer.draft(), Some(&5));
}

#[test]
fn test_commit_cancels_pending_tick_and_yields_final_value() {
    let mut coalescer = DraftCoalescer::new();
    coalescer.begin(10);
    coalescer.update(11);
    coalescer.update(12);

    assert!(coalescer.has_pending_tick());
    assert_eq!(coalescer.commit(), Some(12));
    assert!(!coalescer.has_pending_tick());
    assert_eq!(coalescer.take_tick(), None);
    assert!(!coalescer.is_active());
}

#[test]
fn test_commit_equal_to_baseline_yields_nothing() {
    let mut coalescer = DraftCoalescer::new();
    coalescer.begin(7);
    coalescer.update(9);
    coalescer.update(7);

    assert_eq!(coalescer.commit(), None);
}

#[test]
fn test_commit_without_updates_yields_nothing() {
    let mut coalescer: DraftCoalescer<i32> = DraftCoalescer::new();
    coalescer.begin(3);
    assert_eq!(coalescer.commit(), None);
}

#[test]
fn test_cancel_discards_the_gesture() {
    let mut coalescer = DraftCoalescer::new();
    coalescer.begin(1);
    coalescer.update(2);
    coalescer.cancel();

    assert!(!coalescer.is_active());
    assert_eq!(coalescer.draft(), None);
    assert_eq!(coalescer.commit(), None);
}

#[test]
fn test_whole_drag_gesture_produces_exactly_one_command() {
    let object = rect_object(10.0);
    let base = EditorState::new().apply(EditorAction::AppendObject(object.clone()));
    let before = base.document.objects.clone();

    let mut coalescer = DraftCoalescer::new();
    coalescer.begin(before.clone());

    // Three pointer samples of a move gesture; each echoes into the document
    // transiently, none of them produce history.
    let mut live = base.clone();
    for dx in [15.0, 40.0, 90.0] {
        let moved: Vec<RedactionObject> = before
            .iter()
            .map(|item| RedactionObject {
                shape: item.shape.translated(dx, 0.0),
                ..item.clone()
            })
            .collect();
        coalescer.update(moved);

        if let Some(preview) = coalescer.take_tick() {
            live = live.apply(EditorAction::SetObjectsTransient(preview));
        }
    }
    assert_eq!(live.history.undo_depth(), base.history.undo_depth());

    let after = coalescer.commit().expect("gesture moved the object");
    let committed = live.apply(EditorAction::CommitObjects {
        before,
        after,
        kind: CommandKind::Update,
    });

    assert_eq!(committed.history.undo_depth(), base.history.undo_depth() + 1);
    assert_eq!(
        committed.document.objects[0].shape.bounds().min_x,
        100.0,
        "final state must match the last preview value"
    );

    // Releasing the pointer without moving back produces nothing further.
    let unchanged = committed.apply(EditorAction::CommitObjects {
        before: committed.document.objects.clone(),
        after: committed.document.objects.clone(),
        kind: CommandKind::Update,
    });
    assert_eq!(unchanged.history.undo_depth(), committed.history.undo_depth());
}
