//! feed.rs — append-only, newest-first in-memory store of analysis results.

use std::collections::VecDeque;
use std::sync::Mutex;

use uuid::Uuid;

use crate::result::AnalysisResult;

/// Thread-safe result store. Appends prepend; entries are never reordered,
/// mutated, or removed.
#[derive(Debug, Default)]
pub struct ResultFeed {
    inner: Mutex<VecDeque<AnalysisResult>>,
}

impl ResultFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend one result. Atomic with respect to concurrent appends.
    pub fn append(&self, result: AnalysisResult) {
        let mut buf = self.inner.lock().expect("feed mutex poisoned");
        buf.push_front(result);
    }

    /// Newest-first snapshot. The returned vector is the caller's to mutate.
    pub fn all(&self) -> Vec<AnalysisResult> {
        let buf = self.inner.lock().expect("feed mutex poisoned");
        buf.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("feed mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookup used by view selection.
    pub fn get(&self, id: Uuid) -> Option<AnalysisResult> {
        let buf = self.inner.lock().expect("feed mutex poisoned");
        buf.iter().find(|r| r.id == id).cloned()
    }
}
