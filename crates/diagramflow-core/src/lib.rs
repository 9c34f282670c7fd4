//! DiagramFlow Core Library
//!
//! Platform-agnostic state core for the DiagramFlow whiteboard: shapes, the
//! action reducer with undo/redo history, the session store and its
//! persistence, plus the interfaces a rendering shell plugs into.

pub mod action;
pub mod history;
pub mod input;
pub mod reducer;
pub mod render;
pub mod shapes;
pub mod state;
pub mod storage;
pub mod store;
pub mod tools;

pub use action::{CanvasAction, StyleUpdate};
pub use history::{History, MAX_HISTORY};
pub use input::{PointerEvent, StrokeCapture, Viewport};
pub use reducer::reduce;
pub use render::{RenderSurface, StrokeParams, paint};
pub use shapes::{Shape, ShapeId, ShapeProperty, ShapeStyle, ShapeUpdate, StrokeStyle};
pub use state::{CanvasSnapshot, CanvasState, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use storage::{STORAGE_KEY, SnapshotStorage, Storage, StorageError, StorageResult};
pub use store::{
    CanvasHandle, CanvasProvider, CanvasStore, StoreConfig, StoreError, StoreResult, Subscription,
    use_canvas_state,
};
pub use tools::{ToolKind, ToolPanel};
