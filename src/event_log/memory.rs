use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{BoardError, Result};

use super::{EventLog, StoredEvent};

/// Reference `EventLog` backed by `DashMap`, grounded on the same
/// sharded-map-over-mutex tradeoff the rest of this crate's concurrent
/// maps make: readers and writers for different aggregates never block
/// each other.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: DashMap<Uuid, Vec<StoredEvent>>,
    snapshots: DashMap<Uuid, Vec<(u64, Value)>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventLog for InMemoryEventLog {
    fn append(
        &self,
        originator_id: Uuid,
        originator_version: u64,
        kind: &str,
        payload: Value,
    ) -> Result<()> {
        let mut entry = self.events.entry(originator_id).or_default();
        if entry
            .iter()
            .any(|e| e.originator_version == originator_version)
        {
            return Err(BoardError::VersionConflict {
                originator_id,
                version: originator_version,
            });
        }
        entry.push(StoredEvent {
            originator_id,
            originator_version,
            kind: kind.to_string(),
            payload,
        });
        Ok(())
    }

    fn read(&self, originator_id: Uuid, from_version: u64, to_version: u64) -> Result<Vec<StoredEvent>> {
        let events = self
            .events
            .get(&originator_id)
            .map(|entry| {
                entry
                    .iter()
                    .filter(|e| e.originator_version >= from_version && e.originator_version <= to_version)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Ok(events)
    }

    fn max_version(&self, originator_id: Uuid) -> u64 {
        self.events
            .get(&originator_id)
            .and_then(|entry| entry.iter().map(|e| e.originator_version).max())
            .unwrap_or(0)
    }

    fn put_snapshot(&self, originator_id: Uuid, version: u64, state: Value) {
        let mut entry = self.snapshots.entry(originator_id).or_default();
        entry.push((version, state));
    }

    fn latest_snapshot(&self, originator_id: Uuid, at_or_below: u64) -> Option<(u64, Value)> {
        self.snapshots.get(&originator_id).and_then(|entry| {
            entry
                .iter()
                .filter(|(v, _)| *v <= at_or_below)
                .max_by_key(|(v, _)| *v)
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_duplicate_version() {
        let log = InMemoryEventLog::new();
        let id = Uuid::new_v4();
        log.append(id, 1, "X", json!({})).unwrap();
        let err = log.append(id, 1, "X", json!({}));
        assert!(matches!(err, Err(BoardError::VersionConflict { .. })));
    }

    #[test]
    fn latest_snapshot_picks_highest_at_or_below() {
        let log = InMemoryEventLog::new();
        let id = Uuid::new_v4();
        log.put_snapshot(id, 2, json!({"v": 2}));
        log.put_snapshot(id, 5, json!({"v": 5}));
        let (v, _) = log.latest_snapshot(id, 4).unwrap();
        assert_eq!(v, 2);
    }
}
