mod memory;

pub use memory::InMemoryEventLog;

use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;

/// A single fact recorded against one aggregate at one version.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredEvent {
    pub originator_id: Uuid,
    pub originator_version: u64,
    pub kind: String,
    pub payload: Value,
}

/// The append-only, per-aggregate event store every repository is built on.
/// Implementations must reject an append whose `(originator_id,
/// originator_version)` pair already exists rather than overwrite it.
pub trait EventLog: Send + Sync {
    fn append(
        &self,
        originator_id: Uuid,
        originator_version: u64,
        kind: &str,
        payload: Value,
    ) -> Result<()>;

    /// Events for `originator_id` with version in `[from_version, to_version]`.
    fn read(&self, originator_id: Uuid, from_version: u64, to_version: u64) -> Result<Vec<StoredEvent>>;

    /// The highest recorded version for `originator_id`, or 0 if none exist.
    fn max_version(&self, originator_id: Uuid) -> u64;

    fn put_snapshot(&self, originator_id: Uuid, version: u64, state: Value);

    /// The most recent snapshot at or below `at_or_below`, if any.
    fn latest_snapshot(&self, originator_id: Uuid, at_or_below: u64) -> Option<(u64, Value)>;
}
