/// Engine-wide tuning knobs. `min_version` itself is not configurable —
/// the cursor floor of 2 follows directly from `BOARD_CREATED` and
/// `UNDO_REDO_TRACKER_LINKED` always being the first two events of any
/// board — but how often aggregates snapshot is.
#[derive(Debug, Clone)]
pub struct BoardEngineConfig {
    pub snapshot_frequency: u64,
}

impl Default for BoardEngineConfig {
    fn default() -> Self {
        Self {
            snapshot_frequency: 10,
        }
    }
}
