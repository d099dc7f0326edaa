use image::{Rgba, RgbaImage};
use pixelveil::command::CommandKind;
use pixelveil::object::{ObjectKind, RedactionObject, ShapeGeometry, StyleMode, StyleParams};
use pixelveil::raster::ImageModel;
use pixelveil::state::{EditorAction, EditorState};
use pixelveil::tool::ToolType;

fn redaction_style() -> StyleParams {
    StyleParams::default()
}

fn markup_style() -> StyleParams {
    StyleParams {
        mode: StyleMode::Mark,
        ..StyleParams::default()
    }
}

fn rect_object(x: f32, style: StyleParams) -> RedactionObject {
    RedactionObject::new(
        ShapeGeometry::Rect {
            x,
            y: 10.0,
            width: 40.0,
            height: 30.0,
        },
        style,
    )
}

fn line_object(style: StyleParams) -> RedactionObject {
    RedactionObject::new(
        ShapeGeometry::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 50.0,
            y2: 20.0,
            width: 24.0,
        },
        style,
    )
}

fn test_image() -> ImageModel {
    ImageModel::from_pixels(RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255])))
}

#[test]
fn test_new_redaction_inserts_below_existing_markup() {
    let markup = rect_object(0.0, markup_style());
    let redaction = rect_object(5.0, redaction_style());

    let state = EditorState::new()
        .apply(EditorAction::AppendObject(markup.clone()))
        .apply(EditorAction::AppendObject(redaction.clone()));

    let kinds: Vec<ObjectKind> = state.document.objects.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![ObjectKind::Redaction, ObjectKind::Markup]);
    assert_eq!(state.document.objects[0].id, redaction.id);
    assert_eq!(state.document.objects[1].id, markup.id);
}

#[test]
fn test_new_markup_is_always_appended_last() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::AppendObject(rect_object(1.0, markup_style())))
        .apply(EditorAction::AppendObject(rect_object(2.0, markup_style())));

    assert_eq!(state.document.objects[2].kind, ObjectKind::Markup);
    assert_eq!(
        state.document.objects[2].shape.bounds().min_x,
        2.0,
        "second markup must land on top"
    );
}

#[test]
fn test_append_selects_the_new_object() {
    let object = rect_object(0.0, redaction_style());
    let state = EditorState::new().apply(EditorAction::AppendObject(object.clone()));

    assert_eq!(state.document.selected_ids, vec![object.id]);
    assert_eq!(state.history.undo_depth(), 1);
}

#[test]
fn test_switching_tool_away_from_select_clears_selection_and_draft() {
    let object = rect_object(0.0, redaction_style());
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(object.clone()))
        .apply(EditorAction::SetPendingDraft(Some(rect_object(
            9.0,
            redaction_style(),
        ))))
        .apply(EditorAction::SetTool(ToolType::Ellipse));

    assert!(state.document.selected_ids.is_empty());
    assert!(state.document.pending_draft.is_none());

    // Switching to select keeps whatever is selected.
    let state = state
        .apply(EditorAction::SetSelection(vec![object.id]))
        .apply(EditorAction::SetTool(ToolType::Select));
    assert_eq!(state.document.selected_ids, vec![object.id]);
}

#[test]
fn test_delete_selected_removes_objects_and_clears_selection() {
    let keep = rect_object(0.0, redaction_style());
    let drop = rect_object(5.0, redaction_style());

    let state = EditorState::new()
        .apply(EditorAction::AppendObject(keep.clone()))
        .apply(EditorAction::AppendObject(drop.clone()))
        .apply(EditorAction::DeleteSelected);

    assert_eq!(state.document.objects.len(), 1);
    assert_eq!(state.document.objects[0].id, keep.id);
    assert!(state.document.selected_ids.is_empty());
    assert_eq!(state.history.undo_depth(), 3);
}

#[test]
fn test_delete_with_empty_selection_is_a_noop() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::SetSelection(Vec::new()));

    let after = state.apply(EditorAction::DeleteSelected);
    assert_eq!(after, state);
}

#[test]
fn test_apply_style_rewrites_kind_and_line_geometry_width() {
    let line = line_object(redaction_style());
    let mut style = markup_style();
    style.markup.stroke_width = 9;

    let state = EditorState::new()
        .apply(EditorAction::AppendObject(line.clone()))
        .apply(EditorAction::SetStyle(style))
        .apply(EditorAction::ApplyStyleToSelection);

    let updated = &state.document.objects[0];
    assert_eq!(updated.kind, ObjectKind::Markup);
    assert_eq!(updated.style.mode, StyleMode::Mark);
    assert_eq!(updated.shape.line_width(), Some(9.0));
    assert_eq!(state.history.undo_depth(), 2);
}

#[test]
fn test_apply_style_with_empty_selection_is_a_noop() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::SetSelection(Vec::new()));

    let after = state.apply(EditorAction::ApplyStyleToSelection);
    assert_eq!(after.history.undo_depth(), state.history.undo_depth());
    assert_eq!(after.document.objects, state.document.objects);
}

#[test]
fn test_undo_redo_restore_collection_and_filter_selection() {
    let object = rect_object(0.0, redaction_style());
    let added = EditorState::new().apply(EditorAction::AppendObject(object.clone()));

    let undone = added.apply(EditorAction::Undo);
    assert!(undone.document.objects.is_empty());
    assert!(undone.document.selected_ids.is_empty());
    assert!(undone.can_redo());

    let redone = undone.apply(EditorAction::Redo);
    assert_eq!(redone.document.objects, added.document.objects);
}

#[test]
fn test_undo_drops_pending_draft() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::SetPendingDraft(Some(rect_object(
            9.0,
            redaction_style(),
        ))))
        .apply(EditorAction::Undo);

    assert!(state.document.pending_draft.is_none());
}

#[test]
fn test_reorder_preserves_relative_order_within_partitions() {
    let a = rect_object(0.0, redaction_style());
    let b = rect_object(1.0, redaction_style());
    let c = rect_object(2.0, redaction_style());
    let d = rect_object(3.0, redaction_style());

    let base = EditorState::new()
        .apply(EditorAction::AppendObject(a.clone()))
        .apply(EditorAction::AppendObject(b.clone()))
        .apply(EditorAction::AppendObject(c.clone()))
        .apply(EditorAction::AppendObject(d.clone()))
        .apply(EditorAction::SetSelection(vec![a.id, c.id]));

    let front = base.apply(EditorAction::BringSelectionToFront);
    let front_ids: Vec<_> = front.document.objects.iter().map(|o| o.id).collect();
    assert_eq!(front_ids, vec![b.id, d.id, a.id, c.id]);

    let back = base.apply(EditorAction::SendSelectionToBack);
    let back_ids: Vec<_> = back.document.objects.iter().map(|o| o.id).collect();
    assert_eq!(back_ids, vec![a.id, c.id, b.id, d.id]);
}

#[test]
fn test_reorder_with_empty_selection_is_a_noop() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::SetSelection(Vec::new()));

    let after = state.apply(EditorAction::BringSelectionToFront);
    assert_eq!(after, state);
}

#[test]
fn test_commit_of_unchanged_snapshot_produces_no_history_entry() {
    let state = EditorState::new().apply(EditorAction::AppendObject(rect_object(
        0.0,
        redaction_style(),
    )));
    let objects = state.document.objects.clone();

    let after = state.apply(EditorAction::CommitObjects {
        before: objects.clone(),
        after: objects,
        kind: CommandKind::Update,
    });

    assert_eq!(after.history.undo_depth(), state.history.undo_depth());
}

#[test]
fn test_set_image_resets_document_and_history() {
    let state = EditorState::new()
        .apply(EditorAction::AppendObject(rect_object(0.0, redaction_style())))
        .apply(EditorAction::SetPendingDraft(Some(rect_object(
            9.0,
            redaction_style(),
        ))))
        .apply(EditorAction::SetImage(test_image()));

    assert!(state.document.image.is_some());
    assert!(state.document.objects.is_empty());
    assert!(state.document.selected_ids.is_empty());
    assert!(state.document.pending_draft.is_none());
    assert!(!state.can_undo());
    assert!(!state.can_redo());
}

#[test]
fn test_copy_then_paste_duplicates_with_fresh_ids() {
    let object = rect_object(10.0, redaction_style());
    let state = EditorState::new().apply(EditorAction::AppendObject(object.clone()));

    let (state, payload) = state.copy_selection();
    let payload = payload.expect("selection was not empty");
    assert_eq!(payload.objects.len(), 1);

    let depth_before = state.history.undo_depth();
    let (state, pasted) = state.paste(&payload.objects);

    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0].id, object.id);
    assert_eq!(pasted[0].shape.bounds().min_x, 26.0);
    assert_eq!(state.document.objects.len(), 2);
    assert_eq!(state.history.undo_depth(), depth_before + 1);
    assert_eq!(state.placing_ids, vec![pasted[0].id]);
    assert_eq!(state.document.selected_ids, vec![pasted[0].id]);

    let cleared = state.apply(EditorAction::ClearPlacingIds);
    assert!(cleared.placing_ids.is_empty());
}
