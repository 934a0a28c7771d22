//! Yabu Core: domain layer for touch-driven image filtering.
//!
//! This crate contains the filter catalog, the per-pixel blend pipeline,
//! the gesture state machine, and the editing session that ties them
//! together. No windowing, network, or decoder dependencies.

pub mod editor;
pub mod error;
pub mod export;
pub mod filter;
pub mod gesture;
pub mod image;
pub mod pipeline;
pub mod session;

// Re-exports for convenience.
pub use editor::{Editor, Notification, Presenter};
pub use error::CoreError;
pub use export::{ExportAsset, ShareTarget};
pub use filter::{FilterCatalog, FilterDefinition, FilterKind, Intensity};
pub use gesture::{
    Clock, GestureCommand, GestureConfig, GestureController, ManualClock, MonotonicClock,
    PermissionOutcome,
};
pub use crate::image::{ImageBuffer, Pixel};
pub use pipeline::apply;
pub use session::Session;
