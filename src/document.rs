use crate::geometry::hit_testing;
use crate::object::{ObjectId, ObjectKind, Point, RedactionObject};
use crate::raster::ImageModel;

/// The live document: base image, ordered object collection, selection, and
/// the in-progress draft.
///
/// Object order is paint order; earlier objects are painted first and sit
/// visually behind later ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorDocument {
    pub image: Option<ImageModel>,
    pub objects: Vec<RedactionObject>,
    pub selected_ids: Vec<ObjectId>,
    pub pending_draft: Option<RedactionObject>,
}

impl EditorDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Selected objects in paint order.
    pub fn selected_objects(&self) -> Vec<&RedactionObject> {
        self.objects
            .iter()
            .filter(|object| self.selected_ids.contains(&object.id))
            .collect()
    }

    /// The topmost visible object under `point`, if any.
    pub fn object_at(&self, point: Point) -> Option<&RedactionObject> {
        self.objects
            .iter()
            .rev()
            .filter(|object| object.visible)
            .find(|object| hit_testing::hit_test(object, point))
    }
}

/// Insert a freshly created object at its default z position.
///
/// Markup objects always go on top. A new redaction goes immediately below
/// the bottom-most existing markup, so annotations are never buried under
/// censoring shapes; with no markup present it is simply appended.
pub fn insert_with_default_layer(
    objects: &[RedactionObject],
    object: RedactionObject,
) -> Vec<RedactionObject> {
    let mut next: Vec<RedactionObject> = objects.to_vec();

    if object.kind == ObjectKind::Markup {
        next.push(object);
        return next;
    }

    match next.iter().position(|item| item.kind == ObjectKind::Markup) {
        Some(markup_index) => next.insert(markup_index, object),
        None => next.push(object),
    }

    next
}
