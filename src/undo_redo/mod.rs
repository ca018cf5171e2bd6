mod strategy;
mod tracker;

pub use strategy::UndoRedoStrategy;
pub use tracker::{TrackerEvent, UndoRedoTracker};

/// No board can undo past its creation event.
pub const MIN_VERSION: u64 = 2;
