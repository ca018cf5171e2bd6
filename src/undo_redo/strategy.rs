use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pure non-linear undo/redo cursor over a version-numbered event log.
///
/// `version_cursor` names the version the caller is "looking at". Undoing
/// just walks it backward; but once an edit is made after undoing, the
/// next commit glues the abandoned branch to its point of divergence via
/// `undo_commits`, a symmetric map (`m[m[k]] == k` for every key `k`) so a
/// later redo can find its way back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoRedoStrategy {
    min_version: u64,
    version_cursor: u64,
    undo_commits: HashMap<u64, u64>,
}

impl UndoRedoStrategy {
    pub fn new(min_version: u64) -> Self {
        Self {
            min_version,
            version_cursor: min_version,
            undo_commits: HashMap::new(),
        }
    }

    pub fn version_cursor(&self) -> u64 {
        self.version_cursor
    }

    pub fn increment_version_cursor(&mut self) {
        self.version_cursor += 1;
    }

    pub fn undo(&mut self) {
        self.version_cursor = self.min_version.max(self.version_cursor.saturating_sub(1));
        if let Some(&reference) = self.undo_commits.get(&self.version_cursor) {
            if reference < self.version_cursor {
                self.version_cursor = reference;
            }
        }
    }

    pub fn redo(&mut self, maximum_version: u64) {
        if let Some(&commit) = self.undo_commits.get(&self.version_cursor) {
            if commit > self.version_cursor {
                self.version_cursor = commit;
            }
        }
        self.version_cursor = maximum_version.min(self.version_cursor + 1);
    }

    /// Records that editing after an undo produced a new tip at
    /// `commit_version`, branching off the state last viewed at
    /// `reference_version`. Glues the two together and leaves the cursor
    /// at the new tip.
    pub fn commit(&mut self, commit_version: u64, reference_version: u64) {
        let reference_version = self.canonical(reference_version).min(reference_version);
        let commit_version = self.canonical(commit_version).max(commit_version);
        self.force_insert_pair(commit_version, reference_version);
        self.cleanup();
        self.version_cursor = commit_version;
    }

    fn canonical(&self, version: u64) -> u64 {
        *self.undo_commits.get(&version).unwrap_or(&version)
    }

    /// Inserts `(a, b)` and `(b, a)`, first discarding any existing pair
    /// that mentions `a` or `b` in either position so the map stays
    /// symmetric.
    fn force_insert_pair(&mut self, a: u64, b: u64) {
        let stale: Vec<u64> = self
            .undo_commits
            .iter()
            .filter_map(|(&k, &v)| (k == a || k == b || v == a || v == b).then_some(k))
            .collect();
        for k in stale {
            self.undo_commits.remove(&k);
        }
        self.undo_commits.insert(a, b);
        self.undo_commits.insert(b, a);
    }

    /// Drops pairs fully contained inside another, bounding the map's size
    /// to the number of genuinely divergent branches instead of growing
    /// with every commit.
    fn cleanup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut pairs: Vec<(u64, u64)> = Vec::new();
        for (&a, &b) in self.undo_commits.iter() {
            let pair = (a.min(b), a.max(b));
            if seen.insert(pair) {
                pairs.push(pair);
            }
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut kept: Vec<(u64, u64)> = Vec::new();
        for pair in pairs {
            let contained = kept.iter().any(|&(l, r)| l <= pair.0 && pair.1 <= r);
            if !contained {
                kept.push(pair);
            }
        }

        self.undo_commits.clear();
        for (l, r) in kept {
            self.undo_commits.insert(l, r);
            self.undo_commits.insert(r, l);
        }
    }
}
