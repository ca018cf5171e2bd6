//! Event-sourced kanban board engine with non-linear undo/redo.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod event_log;
pub mod repository;
pub mod state_manager;
pub mod undo_redo;

pub use commands::{BoardEngine, RenderedBoard};
pub use config::BoardEngineConfig;
pub use error::{BoardError, Result};
