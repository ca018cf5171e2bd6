use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;

/// Every mutation a board can record. One variant per row of the
/// event-kind table: each is both the fact appended to the log and the
/// payload replayed to reconstruct state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum BoardEvent {
    BoardCreated,
    UndoRedoTrackerLinked {
        tracker_id: Uuid,
    },
    BoardTitleEdited {
        title: String,
    },
    ColumnAdded {
        column_id: Uuid,
    },
    ColumnRemoved {
        column_id: Uuid,
    },
    ColumnMoved {
        column_id: Uuid,
        new_index: usize,
    },
    ColumnTitleEdited {
        column_id: Uuid,
        title: String,
    },
    CardAdded {
        column_id: Uuid,
        card_id: Uuid,
        title: String,
        content: String,
    },
    CardRemoved {
        column_id: Uuid,
        card_id: Uuid,
    },
    CardMoved {
        column_id: Uuid,
        card_id: Uuid,
        new_index: usize,
    },
    CardTitleEdited {
        column_id: Uuid,
        card_id: Uuid,
        title: String,
    },
    CardContentEdited {
        column_id: Uuid,
        card_id: Uuid,
        content: String,
    },
    CommitUndoState,
}

impl DomainEvent for BoardEvent {
    fn kind(&self) -> &'static str {
        match self {
            BoardEvent::BoardCreated => "BOARD_CREATED",
            BoardEvent::UndoRedoTrackerLinked { .. } => "UNDO_TRACKER_LINKED",
            BoardEvent::BoardTitleEdited { .. } => "BOARD_TITLE_EDITED",
            BoardEvent::ColumnAdded { .. } => "COLUMN_ADDED",
            BoardEvent::ColumnRemoved { .. } => "COLUMN_REMOVED",
            BoardEvent::ColumnMoved { .. } => "COLUMN_MOVED",
            BoardEvent::ColumnTitleEdited { .. } => "COLUMN_TITLE_EDITED",
            BoardEvent::CardAdded { .. } => "CARD_ADDED",
            BoardEvent::CardRemoved { .. } => "CARD_REMOVED",
            BoardEvent::CardMoved { .. } => "CARD_MOVED",
            BoardEvent::CardTitleEdited { .. } => "CARD_TITLE_EDITED",
            BoardEvent::CardContentEdited { .. } => "CARD_CONTENT_EDITED",
            BoardEvent::CommitUndoState => "COMMIT_UNDO_STATE",
        }
    }
}
