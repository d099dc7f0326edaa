#![warn(clippy::all, rust_2018_idioms)]

pub mod clipboard;
pub mod coalescer;
pub mod command;
pub mod document;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod object;
pub mod pixelate;
pub mod preferences;
pub mod raster;
pub mod render;
pub mod state;
pub mod tool;
pub mod util;

pub use clipboard::ShapeClipboardPayload;
pub use coalescer::DraftCoalescer;
pub use command::{Command, CommandHistory, CommandKind};
pub use document::EditorDocument;
pub use error::{ExportError, ImageDecodeError};
pub use object::{
    HexColor, ObjectId, ObjectKind, Point, RedactionObject, ShapeGeometry, StyleMode, StyleParams,
};
pub use preferences::{PreferenceStore, Preferences};
pub use raster::ImageModel;
pub use render::{ContainFit, RenderOptions};
pub use state::{EditorAction, EditorState};
pub use tool::ToolType;
