//! Block definitions and the engine's built-in block set

pub mod basic_blocks;
pub mod block_data;

pub use basic_blocks::register_basic_blocks;
pub use block_data::{BlockDef, BlockShape};
