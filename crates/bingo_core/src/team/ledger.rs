use super::TeamId;
use crate::error::{Result, WinConditionError};
use serde::{Deserialize, Serialize};

/// Per-team score bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTeam {
    pub id: TeamId,
    pub name: String,
    num_collected: u32,
    /// Set once per game, on the first team to reach the race threshold.
    got_golden_snitch: bool,
}

impl PlayerTeam {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            num_collected: 0,
            got_golden_snitch: false,
        }
    }

    pub fn num_collected(&self) -> u32 {
        self.num_collected
    }

    pub fn got_golden_snitch(&self) -> bool {
        self.got_golden_snitch
    }
}

/// Score storage the engine reads and writes.
pub trait TeamLedger {
    /// Participating teams in a stable order.
    fn team_ids(&self) -> Vec<TeamId>;

    fn collected_count(&self, team: TeamId) -> u32;

    fn increment_collected(&mut self, team: TeamId);

    fn first_to_threshold(&self, team: TeamId) -> bool;

    /// Marks `team` as first to the threshold. Returns `false` if another team
    /// already holds the flag.
    fn set_first_to_threshold(&mut self, team: TeamId) -> bool;

    fn first_to_threshold_holder(&self) -> Option<TeamId> {
        self.team_ids().into_iter().find(|t| self.first_to_threshold(*t))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: Vec<PlayerTeam>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_team(&mut self, id: TeamId, name: impl Into<String>) -> Result<()> {
        if self.get(id).is_some() {
            return Err(WinConditionError::invalid_argument(format!(
                "{} is already registered",
                id
            )));
        }
        self.teams.push(PlayerTeam::new(id, name));
        Ok(())
    }

    pub fn get(&self, id: TeamId) -> Option<&PlayerTeam> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TeamId) -> Option<&mut PlayerTeam> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn teams(&self) -> &[PlayerTeam] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.get(id).is_some()
    }

    /// Clears counts and flags before a new game.
    pub fn reset_for_new_game(&mut self) {
        for team in &mut self.teams {
            team.num_collected = 0;
            team.got_golden_snitch = false;
        }
    }

    /// Clears only the first-to-threshold flag, used when the victory mode changes.
    pub fn clear_golden_snitch(&mut self) {
        for team in &mut self.teams {
            team.got_golden_snitch = false;
        }
    }
}

impl TeamLedger for TeamRegistry {
    fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id).collect()
    }

    fn collected_count(&self, team: TeamId) -> u32 {
        self.get(team).map(|t| t.num_collected).unwrap_or(0)
    }

    fn increment_collected(&mut self, team: TeamId) {
        if let Some(t) = self.get_mut(team) {
            t.num_collected += 1;
        } else {
            log::warn!("Ignoring collection for unregistered {}", team);
        }
    }

    fn first_to_threshold(&self, team: TeamId) -> bool {
        self.get(team).map(|t| t.got_golden_snitch).unwrap_or(false)
    }

    fn set_first_to_threshold(&mut self, team: TeamId) -> bool {
        if let Some(holder) = self.first_to_threshold_holder() {
            return holder == team;
        }
        match self.get_mut(team) {
            Some(t) => {
                t.got_golden_snitch = true;
                true
            }
            None => false,
        }
    }
}
