mod editor_state;

pub use editor_state::{EditorAction, EditorState};
