use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

pub const CHEST_MULTIPLIER_MIN: u32 = 1;
pub const CHEST_MULTIPLIER_MAX: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockKind {
    #[serde(rename = "DIRT")]
    Dirt,
    #[serde(rename = "STONE")]
    Stone,
    #[serde(rename = "ORE")]
    Ore,
    #[serde(rename = "GOLD")]
    Gold,
    #[serde(rename = "DIAM")]
    Diamond,
    #[serde(rename = "CHEST")]
    Chest,
}

impl BlockKind {
    pub fn id(self) -> &'static str {
        match self {
            BlockKind::Dirt => "DIRT",
            BlockKind::Stone => "STONE",
            BlockKind::Ore => "ORE",
            BlockKind::Gold => "GOLD",
            BlockKind::Diamond => "DIAM",
            BlockKind::Chest => "CHEST",
        }
    }

    /// Display name shown in the mine view.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Dirt => "Земля",
            BlockKind::Stone => "Камень",
            BlockKind::Ore => "Руда",
            BlockKind::Gold => "Золото",
            BlockKind::Diamond => "Алмаз",
            BlockKind::Chest => "Сундук",
        }
    }

    pub fn is_chest(self) -> bool {
        self == BlockKind::Chest
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub hardness: u32,
    pub reward: u32,
}

impl Block {
    pub const fn new(kind: BlockKind, hardness: u32, reward: u32) -> Self {
        Self {
            kind,
            hardness,
            reward,
        }
    }
}

/// Layers a pickaxe digs through, top first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockSequence(Vec<Block>);

impl BlockSequence {
    pub fn new(blocks: Vec<Block>) -> CoreResult<Self> {
        if blocks.is_empty() {
            return Err(CoreError::InvalidConfig("block sequence is empty".into()));
        }
        if let Some(b) = blocks.iter().find(|b| b.hardness == 0) {
            return Err(CoreError::InvalidConfig(format!(
                "block {} has zero hardness",
                b.kind.id()
            )));
        }
        Ok(Self(blocks))
    }

    pub fn standard() -> Self {
        Self(vec![
            Block::new(BlockKind::Dirt, 3, 0),
            Block::new(BlockKind::Stone, 4, 1),
            Block::new(BlockKind::Ore, 5, 2),
            Block::new(BlockKind::Gold, 6, 3),
            Block::new(BlockKind::Diamond, 7, 4),
            Block::new(BlockKind::Chest, 4, 0),
        ])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.0.iter()
    }
}

impl Default for BlockSequence {
    fn default() -> Self {
        Self::standard()
    }
}
