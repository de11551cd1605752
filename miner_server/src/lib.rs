pub mod app;
pub mod config;
pub mod session;

pub use crate::app::{render_index, router, spin_response, AppError, AppState};
pub use crate::config::ServerConfig;
pub use crate::session::{InMemoryScoreStore, ScoreStore, SessionId, SESSION_COOKIE};
