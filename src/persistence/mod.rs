//! Persistence seam for evicted and torn-down columns
//!
//! The window never writes to disk itself. It hands columns to a
//! `ColumnStore`; region encoding and file I/O live behind that trait.

mod region_queue;

pub use region_queue::RegionQueue;

use crate::world::storage::SharedColumn;

/// Receiver of columns that must eventually be written
pub trait ColumnStore: Send {
    /// Accept a column for a later durable write
    fn enqueue(&mut self, column: SharedColumn);

    /// Whether lightmaps are persisted alongside voxels
    fn writes_lights(&self) -> bool;
}
