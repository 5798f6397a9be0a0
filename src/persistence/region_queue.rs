//! In-memory write queue keyed by column position
//!
//! Re-enqueueing a column that is still pending replaces the earlier entry,
//! so a writer draining the queue sees each position once. Clones share the
//! same queue, which lets the owner of the window keep a handle to it.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::ColumnStore;
use crate::world::core::ColumnPos;
use crate::world::storage::SharedColumn;

#[derive(Default)]
struct QueueState {
    pending: FxHashMap<ColumnPos, SharedColumn>,
    /// First-enqueue order of pending positions
    order: Vec<ColumnPos>,
    total_enqueued: usize,
}

#[derive(Clone, Default)]
pub struct RegionQueue {
    state: Arc<Mutex<QueueState>>,
    writes_lights: bool,
}

impl RegionQueue {
    pub fn new(writes_lights: bool) -> Self {
        Self {
            state: Arc::default(),
            writes_lights,
        }
    }

    /// Number of distinct positions waiting to be written
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: ColumnPos) -> bool {
        self.state.lock().pending.contains_key(&pos)
    }

    /// Every `enqueue` call since creation, duplicates included
    pub fn total_enqueued(&self) -> usize {
        self.state.lock().total_enqueued
    }

    /// Take all pending columns in first-enqueue order
    pub fn drain(&self) -> Vec<SharedColumn> {
        let mut state = self.state.lock();
        let order = std::mem::take(&mut state.order);
        let mut pending = std::mem::take(&mut state.pending);
        order
            .into_iter()
            .filter_map(|pos| pending.remove(&pos))
            .collect()
    }
}

impl ColumnStore for RegionQueue {
    fn enqueue(&mut self, column: SharedColumn) {
        let pos = column.read().pos();
        let mut state = self.state.lock();
        state.total_enqueued += 1;
        if state.pending.insert(pos, column).is_none() {
            state.order.push(pos);
        }
        log::trace!("[RegionQueue] Enqueued column {:?} ({} pending)", pos, state.pending.len());
    }

    fn writes_lights(&self) -> bool {
        self.writes_lights
    }
}

impl std::fmt::Debug for RegionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionQueue")
            .field("pending", &self.len())
            .field("writes_lights", &self.writes_lights)
            .finish()
    }
}
