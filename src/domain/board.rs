use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::error::{BoardError, Result};

use super::{event::BoardEvent, find_by_id, find_by_id_mut, move_by_id, remove_by_id, Card, Column};

/// A kanban board: a title and an ordered list of columns, each holding an
/// ordered list of cards. Every mutator validates against current state
/// before recording anything — a failed validation leaves no trace in the
/// event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub undo_redo_tracker_id: Option<Uuid>,
    #[serde(default)]
    version: u64,
    #[serde(skip)]
    pending: Vec<BoardEvent>,
}

impl Aggregate for Board {
    type Event = BoardEvent;

    fn aggregate_type() -> &'static str {
        "BOARD"
    }

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            columns: Vec::new(),
            undo_redo_tracker_id: None,
            version: 0,
            pending: Vec::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn version_mut(&mut self) -> &mut u64 {
        &mut self.version
    }

    fn pending_mut(&mut self) -> &mut Vec<BoardEvent> {
        &mut self.pending
    }

    fn apply(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::BoardCreated => {}
            BoardEvent::UndoRedoTrackerLinked { tracker_id } => {
                self.undo_redo_tracker_id = Some(*tracker_id);
            }
            BoardEvent::BoardTitleEdited { title } => {
                self.title = title.clone();
            }
            BoardEvent::ColumnAdded { column_id } => {
                self.columns.push(Column::new(*column_id));
            }
            BoardEvent::ColumnRemoved { column_id } => {
                remove_by_id(&mut self.columns, *column_id);
            }
            BoardEvent::ColumnMoved { column_id, new_index } => {
                move_by_id(&mut self.columns, *column_id, *new_index);
            }
            BoardEvent::ColumnTitleEdited { column_id, title } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                column.title = title.clone();
            }
            BoardEvent::CardAdded {
                column_id,
                card_id,
                title,
                content,
            } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                column
                    .cards
                    .push(Card::new(*card_id, title.clone(), content.clone()));
            }
            BoardEvent::CardRemoved { column_id, card_id } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                remove_by_id(&mut column.cards, *card_id);
            }
            BoardEvent::CardMoved {
                column_id,
                card_id,
                new_index,
            } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                move_by_id(&mut column.cards, *card_id, *new_index);
            }
            BoardEvent::CardTitleEdited {
                column_id,
                card_id,
                title,
            } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                let card = find_by_id_mut(&mut column.cards, *card_id)
                    .expect("card present (log invariant)");
                card.title = title.clone();
            }
            BoardEvent::CardContentEdited {
                column_id,
                card_id,
                content,
            } => {
                let column = find_by_id_mut(&mut self.columns, *column_id)
                    .expect("column present (log invariant)");
                let card = find_by_id_mut(&mut column.cards, *card_id)
                    .expect("card present (log invariant)");
                card.content = content.clone();
            }
            BoardEvent::CommitUndoState => {}
        }
    }
}

impl Board {
    pub fn create() -> Self {
        let mut board = Board::blank(Uuid::new_v4());
        board.record(BoardEvent::BoardCreated);
        board
    }

    pub fn link_undo_redo_tracker(&mut self, tracker_id: Uuid) {
        self.record(BoardEvent::UndoRedoTrackerLinked { tracker_id });
    }

    pub fn edit_title(&mut self, title: String) {
        self.record(BoardEvent::BoardTitleEdited { title });
    }

    pub fn add_column(&mut self) -> Uuid {
        let column_id = Uuid::new_v4();
        self.record(BoardEvent::ColumnAdded { column_id });
        column_id
    }

    pub fn remove_column(&mut self, column_id: Uuid) -> Result<()> {
        self.require_column(column_id)?;
        self.record(BoardEvent::ColumnRemoved { column_id });
        Ok(())
    }

    pub fn move_column(&mut self, column_id: Uuid, new_index: usize) -> Result<()> {
        self.require_column(column_id)?;
        self.record(BoardEvent::ColumnMoved { column_id, new_index });
        Ok(())
    }

    pub fn edit_column_title(&mut self, column_id: Uuid, title: String) -> Result<()> {
        self.require_column(column_id)?;
        self.record(BoardEvent::ColumnTitleEdited { column_id, title });
        Ok(())
    }

    pub fn add_card(
        &mut self,
        column_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Uuid> {
        let card_id = Uuid::new_v4();
        self.add_card_with_id(column_id, card_id, title, content)?;
        Ok(card_id)
    }

    /// Inserts a card under a caller-chosen id. Used when a card crosses
    /// columns: the id must survive the move, so the destination-side
    /// `CARD_ADDED` event carries the original id forward instead of
    /// minting a new one.
    pub fn add_card_with_id(
        &mut self,
        column_id: Uuid,
        card_id: Uuid,
        title: String,
        content: String,
    ) -> Result<()> {
        self.require_column(column_id)?;
        self.record(BoardEvent::CardAdded {
            column_id,
            card_id,
            title,
            content,
        });
        Ok(())
    }

    pub fn remove_card(&mut self, column_id: Uuid, card_id: Uuid) -> Result<()> {
        self.require_card(column_id, card_id)?;
        self.record(BoardEvent::CardRemoved { column_id, card_id });
        Ok(())
    }

    pub fn move_card(&mut self, column_id: Uuid, card_id: Uuid, new_index: usize) -> Result<()> {
        self.require_card(column_id, card_id)?;
        self.record(BoardEvent::CardMoved {
            column_id,
            card_id,
            new_index,
        });
        Ok(())
    }

    pub fn edit_card_title(&mut self, column_id: Uuid, card_id: Uuid, title: String) -> Result<()> {
        self.require_card(column_id, card_id)?;
        self.record(BoardEvent::CardTitleEdited {
            column_id,
            card_id,
            title,
        });
        Ok(())
    }

    pub fn edit_card_content(
        &mut self,
        column_id: Uuid,
        card_id: Uuid,
        content: String,
    ) -> Result<()> {
        self.require_card(column_id, card_id)?;
        self.record(BoardEvent::CardContentEdited {
            column_id,
            card_id,
            content,
        });
        Ok(())
    }

    pub fn commit_undo_state_marker(&mut self) {
        self.record(BoardEvent::CommitUndoState);
    }

    pub fn get_card(&self, column_id: Uuid, card_id: Uuid) -> Result<&Card> {
        let column = self.require_column(column_id)?;
        find_by_id(&column.cards, card_id)
            .ok_or_else(|| BoardError::not_found("card", card_id))
    }

    fn require_column(&self, column_id: Uuid) -> Result<&Column> {
        find_by_id(&self.columns, column_id)
            .ok_or_else(|| BoardError::not_found("column", column_id))
    }

    fn require_card(&self, column_id: Uuid, card_id: Uuid) -> Result<&Card> {
        let column = self.require_column(column_id)?;
        find_by_id(&column.cards, card_id)
            .ok_or_else(|| BoardError::not_found("card", card_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_move_card_across_columns_within_one_column() {
        let mut board = Board::create();
        let col_a = board.add_column();
        let card = board.add_card(col_a, "first".into(), String::new()).unwrap();
        board.add_card(col_a, "second".into(), String::new()).unwrap();
        board.move_card(col_a, card, 1).unwrap();
        assert_eq!(board.columns[0].cards[1].id, card);
    }

    #[test]
    fn removing_missing_column_fails_without_mutation() {
        let mut board = Board::create();
        let version_before = board.version();
        let err = board.remove_column(Uuid::new_v4());
        assert!(matches!(err, Err(BoardError::NotFound { .. })));
        assert_eq!(board.version(), version_before);
    }

    #[test]
    fn edit_card_title_requires_existing_column_and_card() {
        let mut board = Board::create();
        let col = board.add_column();
        let card = board.add_card(col, "t".into(), "c".into()).unwrap();
        board.edit_card_title(col, card, "new title".into()).unwrap();
        assert_eq!(board.columns[0].cards[0].title, "new title");
    }
}
