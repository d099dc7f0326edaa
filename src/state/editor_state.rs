use log::{debug, info};

use crate::clipboard::{self, ShapeClipboardPayload};
use crate::command::{Command, CommandHistory, CommandKind};
use crate::document::{EditorDocument, insert_with_default_layer};
use crate::error::ExportError;
use crate::object::{ObjectId, RedactionObject, StyleParams};
use crate::raster::ImageModel;
use crate::render::{self, RenderOptions};
use crate::tool::ToolType;
use crate::util::time;

/// Every mutation the editor understands.
///
/// Continuous input never arrives here directly; the coalescer batches it
/// and only the gesture's commit boundary produces one of these.
#[derive(Debug, Clone)]
pub enum EditorAction {
    /// Replace the base image, resetting the whole document and history.
    SetImage(ImageModel),
    SetTool(ToolType),
    /// Replace the live style outright (committed changes only).
    SetStyle(StyleParams),
    SetSelection(Vec<ObjectId>),
    /// Update or clear the in-progress draft; does not touch history.
    SetPendingDraft(Option<RedactionObject>),
    /// Replace the collection without history (mid-gesture echo of a move).
    SetObjectsTransient(Vec<RedactionObject>),
    /// Finalize a draft into the collection at its default z position.
    AppendObject(RedactionObject),
    /// Finalize a multi-object mutation (paste, style apply, reorder).
    CommitObjects {
        before: Vec<RedactionObject>,
        after: Vec<RedactionObject>,
        kind: CommandKind,
    },
    DeleteSelected,
    Undo,
    Redo,
    SetClipboard(Option<ShapeClipboardPayload>),
    SetPlacingIds(Vec<ObjectId>),
    ClearPlacingIds,
    ApplyStyleToSelection,
    BringSelectionToFront,
    SendSelectionToBack,
}

/// The complete editor state.
///
/// This is the single authority over the document, tool, style and history;
/// [`apply`](EditorState::apply) is a pure transition function returning a
/// fresh state, so no caller ever observes a partial mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub document: EditorDocument,
    pub history: CommandHistory,
    pub tool: ToolType,
    pub style: StyleParams,
    pub clipboard: Option<ShapeClipboardPayload>,
    pub placing_ids: Vec<ObjectId>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply one action, producing the next state.
    pub fn apply(&self, action: EditorAction) -> EditorState {
        match action {
            EditorAction::SetImage(image) => {
                info!(
                    "Base image set ({}x{}), resetting document",
                    image.width(),
                    image.height()
                );

                let mut next = self.clone();
                next.document = EditorDocument {
                    image: Some(image),
                    objects: Vec::new(),
                    selected_ids: Vec::new(),
                    pending_draft: None,
                };
                next.history = CommandHistory::new();
                next.placing_ids = Vec::new();
                next
            }

            EditorAction::SetTool(tool) => {
                debug!("Active tool: {}", tool.name());

                let mut next = self.clone();
                next.tool = tool;
                next.document.pending_draft = None;
                if !tool.is_select() {
                    next.document.selected_ids = Vec::new();
                }
                next
            }

            EditorAction::SetStyle(style) => {
                let mut next = self.clone();
                next.style = style;
                next
            }

            EditorAction::SetSelection(selected_ids) => {
                let mut next = self.clone();
                next.document.selected_ids = selected_ids;
                next
            }

            EditorAction::SetPendingDraft(draft) => {
                let mut next = self.clone();
                next.document.pending_draft = draft;
                next
            }

            EditorAction::SetObjectsTransient(objects) => {
                let mut next = self.clone();
                next.document.objects = objects;
                next
            }

            EditorAction::AppendObject(object) => {
                let selected = vec![object.id];
                let before = self.document.objects.clone();
                let after = insert_with_default_layer(&before, object);

                self.with_command(CommandKind::Add, before, after, Some(selected))
            }

            EditorAction::CommitObjects {
                before,
                after,
                kind,
            } => self.with_command(kind, before, after, None),

            EditorAction::DeleteSelected => {
                if self.document.selected_ids.is_empty() {
                    return self.clone();
                }

                let before = self.document.objects.clone();
                let after: Vec<RedactionObject> = before
                    .iter()
                    .filter(|object| !self.document.is_selected(object.id))
                    .cloned()
                    .collect();

                self.with_command(CommandKind::Delete, before, after, Some(Vec::new()))
            }

            EditorAction::Undo => {
                let mut next = self.clone();
                next.document.objects = next.history.undo(&self.document.objects);
                next.retain_live_selection();
                next
            }

            EditorAction::Redo => {
                let mut next = self.clone();
                next.document.objects = next.history.redo(&self.document.objects);
                next.retain_live_selection();
                next
            }

            EditorAction::SetClipboard(payload) => {
                let mut next = self.clone();
                next.clipboard = payload;
                next
            }

            EditorAction::SetPlacingIds(ids) => {
                let mut next = self.clone();
                next.document.selected_ids = ids.clone();
                next.placing_ids = ids;
                next
            }

            EditorAction::ClearPlacingIds => {
                let mut next = self.clone();
                next.placing_ids = Vec::new();
                next
            }

            EditorAction::ApplyStyleToSelection => {
                if self.document.selected_ids.is_empty() {
                    return self.clone();
                }

                let now = time::timestamp_millis();
                let before = self.document.objects.clone();
                let after: Vec<RedactionObject> = before
                    .iter()
                    .map(|object| {
                        if self.document.is_selected(object.id) {
                            object.with_style(&self.style, now)
                        } else {
                            object.clone()
                        }
                    })
                    .collect();

                self.with_command(CommandKind::Update, before, after, None)
            }

            EditorAction::BringSelectionToFront => self.reorder_selection(true),

            EditorAction::SendSelectionToBack => self.reorder_selection(false),
        }
    }

    /// Copy the current selection: returns the next state (clipboard set)
    /// and the payload, or `None` when nothing is selected.
    pub fn copy_selection(&self) -> (EditorState, Option<ShapeClipboardPayload>) {
        let selected: Vec<RedactionObject> = self
            .document
            .selected_objects()
            .into_iter()
            .cloned()
            .collect();

        if selected.is_empty() {
            return (self.clone(), None);
        }

        let payload = ShapeClipboardPayload::new(&selected);
        let next = self.apply(EditorAction::SetClipboard(Some(payload.clone())));
        (next, Some(payload))
    }

    /// Paste objects as offset duplicates with fresh ids.
    ///
    /// The duplicates are appended, selected, and flagged as "placing"; the
    /// whole paste is one `add` command.
    pub fn paste(&self, objects: &[RedactionObject]) -> (EditorState, Vec<RedactionObject>) {
        let before = self.document.objects.clone();
        let duplicated = clipboard::duplicate_with_offset(objects);
        let mut after = before.clone();
        after.extend(duplicated.iter().cloned());

        let ids: Vec<ObjectId> = duplicated.iter().map(|object| object.id).collect();
        let next = self
            .apply(EditorAction::CommitObjects {
                before,
                after,
                kind: CommandKind::Add,
            })
            .apply(EditorAction::SetPlacingIds(ids));

        (next, duplicated)
    }

    /// One-shot export of the committed document as an encoded PNG.
    ///
    /// `Ok(None)` when no image is loaded.
    pub fn export_png(&self, options: RenderOptions) -> Result<Option<Vec<u8>>, ExportError> {
        render::export_png(&self.document, options)
    }

    /// Stable-partition the collection around the selection.
    fn reorder_selection(&self, to_front: bool) -> EditorState {
        if self.document.selected_ids.is_empty() {
            return self.clone();
        }

        let before = self.document.objects.clone();
        let (selected, remaining): (Vec<RedactionObject>, Vec<RedactionObject>) = before
            .iter()
            .cloned()
            .partition(|object| self.document.is_selected(object.id));

        let after = if to_front {
            [remaining, selected].concat()
        } else {
            [selected, remaining].concat()
        };

        self.with_command(CommandKind::Update, before, after, None)
    }

    /// Record a snapshot transition, pushing a history command unless it is
    /// a structural no-op.
    fn with_command(
        &self,
        kind: CommandKind,
        before: Vec<RedactionObject>,
        after: Vec<RedactionObject>,
        selected_ids: Option<Vec<ObjectId>>,
    ) -> EditorState {
        let mut next = self.clone();

        if let Some(command) = Command::new(kind, &before, &after) {
            next.history.push(command);
        }

        next.document.objects = after;
        if let Some(ids) = selected_ids {
            next.document.selected_ids = ids;
        }
        next
    }

    /// After undo/redo: keep only selections that still exist, and drop any
    /// pending draft and placing markers.
    fn retain_live_selection(&mut self) {
        let live: Vec<ObjectId> = self.document.objects.iter().map(|object| object.id).collect();
        self.document.selected_ids.retain(|id| live.contains(id));
        self.document.pending_draft = None;
        self.placing_ids = Vec::new();
    }
}
