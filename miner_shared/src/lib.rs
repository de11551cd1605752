use serde::{Deserialize, Serialize};

/// Body of `POST /spin`. Carries no fields today; unknown fields are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SpinRequest {}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpinResponse {
    pub reels: Vec<Vec<String>>, // rows x cols symbol tags
    pub results: Vec<ColumnResult>,
    pub gain: u64,
    pub total_score: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ColumnResult {
    pub base_pickaxe: String,
    pub final_power: u32,
    pub depth_reached: usize,
    pub broke_chest: bool,
    pub chest_mult: u32,
    pub raw_reward: u64,
    pub final_reward: u64,
    pub events: Vec<DigStep>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigStep {
    Break { block: usize, power_left: u32 },
    Chest { block: usize, multiplier: u32 },
    Stall { block: usize, power_left: u32 },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    pub id: String,
    pub name: String,
    pub hardness: u32,
    pub reward: u32,
}

/// Pickaxe tier as shown on the reels, e.g. `WOOD x2`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub tag: String,
    pub label: String,
    pub power: u32,
}

/// What the page needs to draw an empty board.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    pub total_score: u64,
    pub reels_rows: usize,
    pub reels_cols: usize,
    pub blocks: Vec<BlockInfo>,
    pub tools: Vec<ToolInfo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("internal server error")]
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dig_steps_are_tagged() {
        let json = serde_json::to_string(&DigStep::Chest {
            block: 5,
            multiplier: 4,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"CHEST","block":5,"multiplier":4}"#);
    }

    #[test]
    fn spin_request_accepts_empty_object_and_extra_fields() {
        let _: SpinRequest = serde_json::from_str("{}").unwrap();
        let _: SpinRequest = serde_json::from_str(r#"{"bet": 1}"#).unwrap();
        assert!(serde_json::from_str::<SpinRequest>("42").is_err());
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::Invalid("bad body".into()).to_string(),
            "invalid request: bad body"
        );
        assert_eq!(ApiError::Internal.to_string(), "internal server error");
    }
}
