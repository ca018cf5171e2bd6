use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::config::BoardEngineConfig;
use crate::domain::{Board, Column};
use crate::error::Result;
use crate::event_log::{EventLog, InMemoryEventLog};
use crate::repository::Repository;
use crate::state_manager::StateManager;

/// The board as seen through the undo/redo cursor: what a client renders.
#[derive(Debug, Serialize)]
pub struct RenderedBoard {
    pub id: Uuid,
    pub title: String,
    pub columns: Vec<Column>,
    pub version_cursor: u64,
    pub latest_version: u64,
}

/// The full command surface of the engine. Every mutating command follows
/// `commit_undo_state -> mutate -> increment_version_cursor`, serialized
/// per board by a lock so concurrent commands against the same board never
/// interleave.
pub struct BoardEngine {
    log: Arc<dyn EventLog>,
    board_repo: Repository<Board>,
    state_manager: StateManager,
    board_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl BoardEngine {
    pub fn new() -> Self {
        Self::with_log(Arc::new(InMemoryEventLog::new()), BoardEngineConfig::default())
    }

    pub fn with_log(log: Arc<dyn EventLog>, config: BoardEngineConfig) -> Self {
        Self {
            board_repo: Repository::new(log.clone(), config.snapshot_frequency),
            state_manager: StateManager::new(log.clone(), &config),
            log,
            board_locks: DashMap::new(),
        }
    }

    fn with_board_lock<T>(&self, board_id: Uuid, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = self
            .board_locks
            .entry(board_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();
        f()
    }

    fn mutate(&self, board_id: Uuid, f: impl FnOnce(&mut Board) -> Result<()>) -> Result<()> {
        self.with_board_lock(board_id, || {
            let mut board = self.board_repo.get(board_id, None)?;
            self.state_manager.commit_undo_state(&mut board)?;
            f(&mut board)?;
            self.board_repo.save(&mut board)?;
            self.state_manager.increment_version_cursor(board_id)
        })
    }

    pub fn create_board(&self) -> Result<Uuid> {
        self.state_manager.create_board().map(|b| b.id())
    }

    pub fn edit_board_title(&self, board_id: Uuid, title: String) -> Result<()> {
        self.mutate(board_id, |board| {
            board.edit_title(title);
            Ok(())
        })
    }

    pub fn add_column(&self, board_id: Uuid) -> Result<Uuid> {
        let mut column_id = None;
        self.mutate(board_id, |board| {
            column_id = Some(board.add_column());
            Ok(())
        })?;
        Ok(column_id.expect("set during mutate"))
    }

    pub fn remove_column(&self, board_id: Uuid, column_id: Uuid) -> Result<()> {
        self.mutate(board_id, |board| board.remove_column(column_id))
    }

    pub fn move_column(&self, board_id: Uuid, column_id: Uuid, new_index: usize) -> Result<()> {
        self.mutate(board_id, |board| board.move_column(column_id, new_index))
    }

    pub fn edit_column_title(&self, board_id: Uuid, column_id: Uuid, title: String) -> Result<()> {
        self.mutate(board_id, |board| board.edit_column_title(column_id, title))
    }

    pub fn add_card(
        &self,
        board_id: Uuid,
        column_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Uuid> {
        let mut card_id = None;
        self.mutate(board_id, |board| {
            card_id = Some(board.add_card(column_id, title.clone(), content.clone())?);
            Ok(())
        })?;
        Ok(card_id.expect("set during mutate"))
    }

    pub fn remove_card(&self, board_id: Uuid, column_id: Uuid, card_id: Uuid) -> Result<()> {
        self.mutate(board_id, |board| board.remove_card(column_id, card_id))
    }

    pub fn edit_card_title(
        &self,
        board_id: Uuid,
        column_id: Uuid,
        card_id: Uuid,
        title: String,
    ) -> Result<()> {
        self.mutate(board_id, |board| board.edit_card_title(column_id, card_id, title))
    }

    pub fn edit_card_content(
        &self,
        board_id: Uuid,
        column_id: Uuid,
        card_id: Uuid,
        content: String,
    ) -> Result<()> {
        self.mutate(board_id, |board| {
            board.edit_card_content(column_id, card_id, content)
        })
    }

    /// Moves a card, possibly across columns. A cross-column move is three
    /// separate recorded events (remove, add, move-into-place) each with
    /// its own cursor increment, matching every other command in this
    /// engine one-for-one; a same-column move is just the one.
    pub fn move_card(
        &self,
        board_id: Uuid,
        from_column_id: Uuid,
        to_column_id: Uuid,
        card_id: Uuid,
        new_index: usize,
    ) -> Result<()> {
        self.with_board_lock(board_id, || {
            let mut board = self.board_repo.get(board_id, None)?;
            self.state_manager.commit_undo_state(&mut board)?;

            if from_column_id != to_column_id {
                let card = board.get_card(from_column_id, card_id)?.clone();
                board.remove_card(from_column_id, card_id)?;
                self.board_repo.save(&mut board)?;
                self.state_manager.increment_version_cursor(board_id)?;

                board.add_card_with_id(to_column_id, card_id, card.title, card.content)?;
                self.board_repo.save(&mut board)?;
                self.state_manager.increment_version_cursor(board_id)?;
            }

            board.move_card(to_column_id, card_id, new_index)?;
            self.board_repo.save(&mut board)?;
            self.state_manager.increment_version_cursor(board_id)
        })
    }

    pub fn undo(&self, board_id: Uuid) -> Result<u64> {
        self.with_board_lock(board_id, || self.state_manager.undo(board_id))
    }

    pub fn redo(&self, board_id: Uuid) -> Result<u64> {
        self.with_board_lock(board_id, || self.state_manager.redo(board_id))
    }

    pub fn render_board(&self, board_id: Uuid) -> Result<RenderedBoard> {
        let cursor = self.state_manager.version_cursor(board_id)?;
        let board = self.state_manager.render(board_id)?;
        Ok(RenderedBoard {
            id: board.id(),
            title: board.title,
            columns: board.columns,
            version_cursor: cursor,
            latest_version: self.log.max_version(board_id),
        })
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}
