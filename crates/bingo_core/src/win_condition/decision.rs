use crate::team::TeamId;
use serde::{Deserialize, Serialize};

/// Why a team was declared the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Outright best by the mode's criteria.
    Complete,
    /// Picked at random among teams still tied after every tie-break.
    RandomTie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReason {
    pub team: TeamId,
    pub reason: Reason,
}

impl WinReason {
    pub fn complete(team: TeamId) -> Self {
        Self { team, reason: Reason::Complete }
    }

    pub fn random_tie(team: TeamId) -> Self {
        Self { team, reason: Reason::RandomTie }
    }
}

/// Outcome of a live check after a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WinDecision {
    /// Game continues.
    None,
    /// Co-leaders nobody can overtake; not final until the board settles or time runs out.
    Provisional { teams: Vec<TeamId> },
    Final { winner: WinReason },
}

impl WinDecision {
    pub fn is_none(&self) -> bool {
        matches!(self, WinDecision::None)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, WinDecision::Final { .. })
    }

    /// Every team currently named as a winner, final or not.
    pub fn winners(&self) -> Vec<TeamId> {
        match self {
            WinDecision::None => Vec::new(),
            WinDecision::Provisional { teams } => teams.clone(),
            WinDecision::Final { winner } => vec![winner.team],
        }
    }
}
