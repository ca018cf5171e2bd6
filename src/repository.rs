use std::marker::PhantomData;
use std::sync::Arc;

use uuid::Uuid;

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::{BoardError, Result};
use crate::event_log::EventLog;

/// Loads and saves aggregates of type `A` against an `EventLog`, snapshotting
/// every `snapshot_frequency` versions so replay never has to walk the
/// entire history of a long-lived aggregate.
pub struct Repository<A: Aggregate> {
    log: Arc<dyn EventLog>,
    snapshot_frequency: u64,
    _marker: PhantomData<A>,
}

impl<A: Aggregate> Repository<A> {
    pub fn new(log: Arc<dyn EventLog>, snapshot_frequency: u64) -> Self {
        Self {
            log,
            snapshot_frequency,
            _marker: PhantomData,
        }
    }

    /// Reconstructs `A` as of `version`, or at its latest recorded version
    /// when `version` is `None`.
    pub fn get(&self, id: Uuid, version: Option<u64>) -> Result<A> {
        let max_version = self.log.max_version(id);
        let target = version.unwrap_or(max_version);
        if target == 0 {
            return Err(BoardError::not_found(A::aggregate_type(), id));
        }

        let snapshot = self.log.latest_snapshot(id, target);
        let (mut state, from_version) = match snapshot {
            Some((v, blob)) => (serde_json::from_value::<A>(blob)?, v),
            None => (A::blank(id), 0),
        };

        let events = self.log.read(id, from_version + 1, target)?;
        for stored in events {
            let event: A::Event = serde_json::from_value(stored.payload)?;
            state.apply(&event);
            *state.version_mut() = stored.originator_version;
        }
        Ok(state)
    }

    /// Persists every event staged on `aggregate` since the last save, then
    /// snapshots at any version that lands on `snapshot_frequency`.
    pub fn save(&self, aggregate: &mut A) -> Result<()> {
        let pending = std::mem::take(aggregate.pending_mut());
        if pending.is_empty() {
            return Ok(());
        }
        let base_version = aggregate.version() - pending.len() as u64;
        for (offset, event) in pending.iter().enumerate() {
            let version = base_version + offset as u64 + 1;
            let payload = serde_json::to_value(event)?;
            self.log.append(aggregate.id(), version, event.kind(), payload)?;
        }
        if self.snapshot_frequency > 0 && aggregate.version().is_multiple_of(self.snapshot_frequency) {
            self.snapshot(aggregate)?;
        }
        Ok(())
    }

    /// Forces a snapshot at the aggregate's current version, independent of
    /// `snapshot_frequency`. Used to pin state reached by a marker event
    /// that carries no payload of its own (see `COMMIT_UNDO_STATE`).
    pub fn snapshot(&self, aggregate: &A) -> Result<()> {
        let blob = serde_json::to_value(aggregate)?;
        self.log.put_snapshot(aggregate.id(), aggregate.version(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Board;
    use crate::event_log::InMemoryEventLog;

    #[test]
    fn save_then_get_round_trips_state() {
        let log: Arc<dyn EventLog> = Arc::new(InMemoryEventLog::new());
        let repo: Repository<Board> = Repository::new(log, 10);
        let mut board = Board::create();
        let col = board.add_column();
        repo.save(&mut board).unwrap();

        let loaded = repo.get(board.id(), None).unwrap();
        assert_eq!(loaded.columns[0].id, col);
        assert_eq!(loaded.version(), board.version());
    }

    #[test]
    fn get_at_historical_version_excludes_later_events() {
        let log: Arc<dyn EventLog> = Arc::new(InMemoryEventLog::new());
        let repo: Repository<Board> = Repository::new(log, 10);
        let mut board = Board::create();
        repo.save(&mut board).unwrap();
        let v1 = board.version();
        board.add_column();
        repo.save(&mut board).unwrap();

        let historical = repo.get(board.id(), Some(v1)).unwrap();
        assert!(historical.columns.is_empty());
    }

    #[test]
    fn snapshot_bounds_replay_to_events_after_it() {
        let log: Arc<dyn EventLog> = Arc::new(InMemoryEventLog::new());
        let repo: Repository<Board> = Repository::new(log, 2);
        let mut board = Board::create();
        board.add_column();
        repo.save(&mut board).unwrap();
        assert_eq!(board.version(), 2);

        let loaded = repo.get(board.id(), None).unwrap();
        assert_eq!(loaded.columns.len(), 1);
    }
}
