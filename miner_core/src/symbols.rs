use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbol {
    Wood,
    Stone,
    Iron,
    Diamond,
    Up2,
    Tnt,
    Empty,
}

/// Pickaxe tiers, weakest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolTier {
    Wood,
    Stone,
    Iron,
    Diamond,
}

/// Power added by each TNT symbol in a column.
pub const TNT_BONUS: u32 = 10;

impl Symbol {
    pub const ALL: [Symbol; 7] = [
        Symbol::Wood,
        Symbol::Stone,
        Symbol::Iron,
        Symbol::Diamond,
        Symbol::Up2,
        Symbol::Tnt,
        Symbol::Empty,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Symbol::Wood => "WOOD",
            Symbol::Stone => "STONE",
            Symbol::Iron => "IRON",
            Symbol::Diamond => "DIAMOND",
            Symbol::Up2 => "UP2",
            Symbol::Tnt => "TNT",
            Symbol::Empty => "EMPTY",
        }
    }

    pub fn tool_tier(self) -> Option<ToolTier> {
        match self {
            Symbol::Wood => Some(ToolTier::Wood),
            Symbol::Stone => Some(ToolTier::Stone),
            Symbol::Iron => Some(ToolTier::Iron),
            Symbol::Diamond => Some(ToolTier::Diamond),
            _ => None,
        }
    }

    /// Applies this symbol's modifier effect to a running power value.
    /// Non-modifiers leave power unchanged.
    pub fn apply_modifier(self, power: u32) -> u32 {
        match self {
            Symbol::Up2 => power.saturating_mul(2),
            Symbol::Tnt => power.saturating_add(TNT_BONUS),
            _ => power,
        }
    }
}

impl From<ToolTier> for Symbol {
    fn from(tier: ToolTier) -> Self {
        match tier {
            ToolTier::Wood => Symbol::Wood,
            ToolTier::Stone => Symbol::Stone,
            ToolTier::Iron => Symbol::Iron,
            ToolTier::Diamond => Symbol::Diamond,
        }
    }
}

impl ToolTier {
    pub const ALL: [ToolTier; 4] = [
        ToolTier::Wood,
        ToolTier::Stone,
        ToolTier::Iron,
        ToolTier::Diamond,
    ];

    pub fn weakest() -> Self {
        ToolTier::Wood
    }

    pub fn base_power(self) -> u32 {
        match self {
            ToolTier::Wood => 10,
            ToolTier::Stone => 16,
            ToolTier::Iron => 24,
            ToolTier::Diamond => 32,
        }
    }

    /// Multiplier shown on the pickaxe label. Display only.
    pub fn multiplier(self) -> u32 {
        match self {
            ToolTier::Wood => 2,
            ToolTier::Stone => 4,
            ToolTier::Iron => 8,
            ToolTier::Diamond => 12,
        }
    }

    pub fn label(self) -> String {
        format!("{} x{}", Symbol::from(self).tag(), self.multiplier())
    }

    pub fn tag(self) -> &'static str {
        Symbol::from(self).tag()
    }
}

/// Reel weights used by every spin, in draw order.
pub fn default_symbol_weights() -> Vec<(Symbol, u32)> {
    vec![
        (Symbol::Wood, 28),
        (Symbol::Stone, 20),
        (Symbol::Iron, 12),
        (Symbol::Diamond, 6),
        (Symbol::Up2, 10),
        (Symbol::Tnt, 8),
        (Symbol::Empty, 16),
    ]
}
