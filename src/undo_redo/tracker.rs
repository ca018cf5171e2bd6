use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{Aggregate, DomainEvent};

use super::{UndoRedoStrategy, MIN_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrackerEvent {
    TrackerCreated { board_id: Uuid },
    VersionCursorIncremented,
    Undone,
    Redone { maximum_version: u64 },
    Committed { commit_version: u64, reference_version: u64 },
}

impl DomainEvent for TrackerEvent {
    fn kind(&self) -> &'static str {
        match self {
            TrackerEvent::TrackerCreated { .. } => "TRACKER_CREATED",
            TrackerEvent::VersionCursorIncremented => "INCR_VERSION_CURSOR",
            TrackerEvent::Undone => "UNDO",
            TrackerEvent::Redone { .. } => "REDO",
            TrackerEvent::Committed { .. } => "COMMIT",
        }
    }
}

/// The aggregate wrapper around `UndoRedoStrategy`: every state transition
/// of the strategy is recorded as its own event so the tracker can be
/// replayed and snapshotted exactly like the board it shadows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoRedoTracker {
    pub id: Uuid,
    pub board_id: Uuid,
    pub strategy: UndoRedoStrategy,
    #[serde(default)]
    version: u64,
    #[serde(skip)]
    pending: Vec<TrackerEvent>,
}

impl Aggregate for UndoRedoTracker {
    type Event = TrackerEvent;

    fn aggregate_type() -> &'static str {
        "UNDO_REDO_TRACKER"
    }

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            board_id: Uuid::nil(),
            strategy: UndoRedoStrategy::new(MIN_VERSION),
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

    fn pending_mut(&mut self) -> &mut Vec<TrackerEvent> {
        &mut self.pending
    }

    fn apply(&mut self, event: &TrackerEvent) {
        match event {
            TrackerEvent::TrackerCreated { board_id } => {
                self.board_id = *board_id;
                self.strategy = UndoRedoStrategy::new(MIN_VERSION);
            }
            TrackerEvent::VersionCursorIncremented => self.strategy.increment_version_cursor(),
            TrackerEvent::Undone => self.strategy.undo(),
            TrackerEvent::Redone { maximum_version } => self.strategy.redo(*maximum_version),
            TrackerEvent::Committed {
                commit_version,
                reference_version,
            } => self.strategy.commit(*commit_version, *reference_version),
        }
    }
}

impl UndoRedoTracker {
    pub fn create(board_id: Uuid) -> Self {
        let mut tracker = UndoRedoTracker::blank(Uuid::new_v4());
        tracker.record(TrackerEvent::TrackerCreated { board_id });
        tracker
    }

    pub fn increment_version_cursor(&mut self) {
        self.record(TrackerEvent::VersionCursorIncremented);
    }

    pub fn undo(&mut self) {
        self.record(TrackerEvent::Undone);
    }

    pub fn redo(&mut self, maximum_version: u64) {
        self.record(TrackerEvent::Redone { maximum_version });
    }

    pub fn commit(&mut self, commit_version: u64, reference_version: u64) {
        self.record(TrackerEvent::Committed {
            commit_version,
            reference_version,
        });
    }
}
