mod history;

use serde::{Deserialize, Serialize};

pub use history::CommandHistory;

use crate::object::RedactionObject;

/// What a command did to the object collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Add,
    Delete,
    Update,
}

/// A reversible document mutation.
///
/// Commands hold full deep-copied snapshots of the object collection before
/// and after the change, so undo/redo never has to re-derive anything and
/// never aliases live document state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    kind: CommandKind,
    before: Vec<RedactionObject>,
    after: Vec<RedactionObject>,
}

impl Command {
    /// Build a command from two snapshots.
    ///
    /// Returns `None` when the snapshots are equal by value, so structural
    /// no-ops never reach the history.
    pub fn new(
        kind: CommandKind,
        before: &[RedactionObject],
        after: &[RedactionObject],
    ) -> Option<Self> {
        if before == after {
            return None;
        }

        Some(Self {
            kind,
            before: before.to_vec(),
            after: after.to_vec(),
        })
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn before(&self) -> &[RedactionObject] {
        &self.before
    }

    pub fn after(&self) -> &[RedactionObject] {
        &self.after
    }
}
