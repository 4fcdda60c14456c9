use crate::card::CardView;
use crate::error::{Result, WinConditionError};
use crate::team::{TeamId, TeamLedger};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_LINES: u32 = 1;
pub const MAX_LINES: u32 = 10;

/// The single active win predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VictoryMode {
    /// First team to complete `n` lines wins.
    Lines(u32),
    /// First team to collect every cell wins.
    FullCard,
    /// A cell locks once `k` teams hold it; the leader wins when nobody can pass them.
    Lockout(u32),
    /// Reaching `n` lines ends the race; the best score including the
    /// Golden Snitch bonus wins.
    Race(u32),
}

impl Default for VictoryMode {
    fn default() -> Self {
        VictoryMode::Lines(MIN_LINES)
    }
}

impl VictoryMode {
    pub fn lines(n: u32) -> Result<Self> {
        let mode = VictoryMode::Lines(n);
        mode.validate()?;
        Ok(mode)
    }

    pub fn race(n: u32) -> Result<Self> {
        let mode = VictoryMode::Race(n);
        mode.validate()?;
        Ok(mode)
    }

    pub fn lockout(k: u32) -> Result<Self> {
        let mode = VictoryMode::Lockout(k);
        mode.validate()?;
        Ok(mode)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            VictoryMode::Lines(n) | VictoryMode::Race(n)
                if !(MIN_LINES..=MAX_LINES).contains(&n) =>
            {
                Err(WinConditionError::invalid_argument(format!(
                    "cannot set number of lines to complete to {} (allowed {}..={})",
                    n, MIN_LINES, MAX_LINES
                )))
            }
            VictoryMode::Lockout(0) => Err(WinConditionError::invalid_argument(
                "lockout needs at least one completion to lock",
            )),
            _ => Ok(()),
        }
    }

    /// Zero unless a line-based mode is active.
    pub fn num_lines_to_complete(&self) -> u32 {
        match *self {
            VictoryMode::Lines(n) | VictoryMode::Race(n) => n,
            _ => 0,
        }
    }

    /// Zero unless lockout is active.
    pub fn completions_to_lock(&self) -> u32 {
        match *self {
            VictoryMode::Lockout(k) => k,
            _ => 0,
        }
    }

    pub fn is_full_card(&self) -> bool {
        matches!(self, VictoryMode::FullCard)
    }

    pub fn is_race(&self) -> bool {
        matches!(self, VictoryMode::Race(_))
    }

    /// Whether `team` meets the line or full-card objective. Lockout has no
    /// such objective.
    pub fn has_bingo<C: CardView + ?Sized>(&self, card: &C, team: TeamId) -> bool {
        match *self {
            VictoryMode::Lines(n) | VictoryMode::Race(n) => card.completed_line_count(team) >= n,
            VictoryMode::FullCard => card.is_fully_complete(team),
            VictoryMode::Lockout(_) => false,
        }
    }

    /// Primary ranking used when the timer runs out.
    pub fn timeout_score<C, L>(&self, card: &C, ledger: &L, team: TeamId) -> u32
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
    {
        match self {
            VictoryMode::FullCard | VictoryMode::Lockout(_) => ledger.collected_count(team),
            VictoryMode::Lines(_) | VictoryMode::Race(_) => card.completed_line_count(team),
        }
    }
}

impl fmt::Display for VictoryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VictoryMode::Lines(1) => write!(f, "1 line"),
            VictoryMode::Lines(n) => write!(f, "{} lines", n),
            VictoryMode::FullCard => write!(f, "full card"),
            VictoryMode::Lockout(k) => write!(f, "lockout ({} to lock)", k),
            VictoryMode::Race(n) => write!(f, "race to {} line(s)", n),
        }
    }
}
