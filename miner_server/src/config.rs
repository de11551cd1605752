use anyhow::Context;
use miner_core::EngineParams;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub rows: usize,
    pub cols: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND`, `MINER_ROWS` and `MINER_COLS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind = lookup("BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let rows = parse_dim(&lookup, "MINER_ROWS", DEFAULT_ROWS)?;
        let cols = parse_dim(&lookup, "MINER_COLS", DEFAULT_COLS)?;
        Ok(Self { bind, rows, cols })
    }

    /// Fails on zero dimensions.
    pub fn engine_params(&self) -> anyhow::Result<EngineParams> {
        Ok(EngineParams::with_dimensions(self.rows, self.cols)?)
    }
}

fn parse_dim(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> anyhow::Result<usize> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{key} must be a positive integer, got {raw:?}")),
    }
}
