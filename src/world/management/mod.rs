//! World management - the streaming window over loaded columns

mod chunk_grid;

pub use chunk_grid::ChunkGrid;
