#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod context;
pub mod document;
pub mod image_io;
pub mod input;
pub mod layer;
pub mod mask_view_mode;
pub mod message;
pub mod persistence;
pub mod renderer;
pub mod stroke;
pub mod tools;
pub mod util;
pub mod view;

pub use app::StrataApp;
pub use command::{Command, CommandHistory, DrawableTarget};
pub use context::EditorContext;
pub use document::Document;
pub use mask_view_mode::MaskViewMode;
pub use stroke::Stroke;
pub use tools::{Tool, ToolId, Tools};
pub use view::View;
