use crate::{
    blocks::{BlockSequence, CHEST_MULTIPLIER_MAX, CHEST_MULTIPLIER_MIN},
    error::CoreResult,
    grid::{Grid, GridSpec},
    picker::WeightedTable,
    rng::{RandomSource, SeededRandom},
    symbols::{default_symbol_weights, Symbol, ToolTier},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct EngineParams {
    pub grid: GridSpec,
    pub symbols: WeightedTable<Symbol>,
    pub blocks: BlockSequence,
}

impl EngineParams {
    /// 5x5 reels, default weights, standard block sequence.
    pub fn standard() -> Self {
        Self {
            grid: GridSpec::default_5x5(),
            symbols: standard_symbol_table(),
            blocks: BlockSequence::standard(),
        }
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> CoreResult<Self> {
        Ok(Self {
            grid: GridSpec::new(rows, cols)?,
            ..Self::standard()
        })
    }
}

fn standard_symbol_table() -> WeightedTable<Symbol> {
    WeightedTable::new(default_symbol_weights()).expect("default symbol weights")
}

/// One step of a column's dig, in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigEvent {
    /// Block at `block` broke, leaving `power_left`.
    Break { block: usize, power_left: u32 },
    /// The chest at `block` opened with `multiplier`.
    Chest { block: usize, multiplier: u32 },
    /// Not enough power for the block at `block`.
    Stall { block: usize, power_left: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnOutcome {
    pub base_tier: ToolTier,
    pub final_power: u32,
    pub depth: usize,
    pub chest_reached: bool,
    pub chest_multiplier: u32,
    pub raw_reward: u64,
    pub final_reward: u64,
    pub events: Vec<DigEvent>,
}

impl Default for ColumnOutcome {
    fn default() -> Self {
        let tier = ToolTier::weakest();
        Self {
            base_tier: tier,
            final_power: tier.base_power(),
            depth: 0,
            chest_reached: false,
            chest_multiplier: 1,
            raw_reward: 0,
            final_reward: 0,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub columns: Vec<ColumnOutcome>,
    pub gain: u64,
}

/// Fills the grid row-major from the symbol table, then makes sure every
/// column holds a pickaxe by overwriting one random cell with a random tier.
pub fn generate_grid(
    rng: &mut dyn RandomSource,
    spec: &GridSpec,
    symbols: &WeightedTable<Symbol>,
) -> Grid {
    let (rows, cols) = (spec.rows(), spec.cols());
    let mut cells: Vec<Vec<Symbol>> = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for _ in 0..cols {
            row.push(symbols.pick(rng));
        }
        cells.push(row);
    }

    for c in 0..cols {
        let has_tool = (0..rows).any(|r| cells[r][c].tool_tier().is_some());
        if !has_tool {
            let r = rng.uniform_int(0, (rows - 1) as u32) as usize;
            let t = rng.uniform_int(0, (ToolTier::ALL.len() - 1) as u32) as usize;
            cells[r][c] = ToolTier::ALL[t].into();
        }
    }

    Grid::from_rows_unchecked(cells)
}

/// Base tier is the first pickaxe from the top; WOOD if there is none.
pub fn base_tier(column: &[Symbol]) -> ToolTier {
    column
        .iter()
        .find_map(|s| s.tool_tier())
        .unwrap_or_else(ToolTier::weakest)
}

/// Starting power with every UP2/TNT applied in top-to-bottom order.
pub fn column_power(column: &[Symbol]) -> u32 {
    column
        .iter()
        .fold(base_tier(column).base_power(), |power, s| s.apply_modifier(power))
}

pub fn resolve_column(
    rng: &mut dyn RandomSource,
    column: &[Symbol],
    blocks: &BlockSequence,
) -> ColumnOutcome {
    if column.is_empty() {
        return ColumnOutcome::default();
    }

    let base = base_tier(column);
    let mut power = column_power(column);
    let mut depth = 0usize;
    let mut raw_reward = 0u64;
    let mut chest_multiplier = 1u32;
    let mut chest_reached = false;
    let mut events = Vec::with_capacity(blocks.len() + 1);

    for (i, block) in blocks.iter().enumerate() {
        if power < block.hardness {
            events.push(DigEvent::Stall {
                block: i,
                power_left: power,
            });
            break;
        }
        power -= block.hardness;
        depth = i + 1;
        raw_reward += block.reward as u64;
        events.push(DigEvent::Break {
            block: i,
            power_left: power,
        });

        if block.kind.is_chest() {
            chest_reached = true;
            chest_multiplier = rng.uniform_int(CHEST_MULTIPLIER_MIN, CHEST_MULTIPLIER_MAX);
            events.push(DigEvent::Chest {
                block: i,
                multiplier: chest_multiplier,
            });
            break;
        }
    }

    ColumnOutcome {
        base_tier: base,
        final_power: power,
        depth,
        chest_reached,
        chest_multiplier,
        raw_reward,
        final_reward: raw_reward.saturating_mul(chest_multiplier as u64),
        events,
    }
}

pub fn resolve_spin(rng: &mut dyn RandomSource, grid: &Grid, blocks: &BlockSequence) -> SpinOutcome {
    let mut columns = Vec::with_capacity(grid.col_count());
    for col in grid.columns() {
        columns.push(resolve_column(rng, &col, blocks));
    }
    let gain = columns
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.final_reward));
    SpinOutcome {
        grid: grid.clone(),
        columns,
        gain,
    }
}

pub fn spin_once(rng: &mut dyn RandomSource, params: &EngineParams) -> SpinOutcome {
    let grid = generate_grid(rng, &params.grid, &params.symbols);
    resolve_spin(rng, &grid, &params.blocks)
}

/// Convenience: replay a spin from seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    params: &EngineParams,
) -> SpinOutcome {
    let mut rng = SeededRandom::new(server_seed, client_seed, nonce);
    spin_once(&mut rng, params)
}
