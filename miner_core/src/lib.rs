pub mod blocks;
pub mod engine;
pub mod error;
pub mod grid;
pub mod picker;
pub mod rng;
pub mod symbols;

pub use crate::blocks::{Block, BlockKind, BlockSequence, CHEST_MULTIPLIER_MAX, CHEST_MULTIPLIER_MIN};
pub use crate::engine::{
    generate_grid, resolve_column, resolve_spin, spin_once, spin_with_seeds, ColumnOutcome, DigEvent,
    EngineParams, SpinOutcome,
};
pub use crate::error::{CoreError, CoreResult};
pub use crate::grid::{Grid, GridSpec};
pub use crate::picker::WeightedTable;
pub use crate::rng::{derive_hash_hex, RandomSource, SeededRandom, ThreadRandom};
pub use crate::symbols::{default_symbol_weights, Symbol, ToolTier};
