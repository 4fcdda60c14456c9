use crate::team::TeamId;
use crate::win_condition::Reason;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// Lockout co-leaders or a race stuck in sudden death
    ProvisionalTie { teams: Vec<TeamId> },
    Decided { winners: Vec<TeamId>, reason: Reason },
}

impl GameStatus {
    pub fn is_decided(&self) -> bool {
        matches!(self, GameStatus::Decided { .. })
    }

    pub fn winners(&self) -> &[TeamId] {
        match self {
            GameStatus::Decided { winners, .. } => winners,
            _ => &[],
        }
    }
}
