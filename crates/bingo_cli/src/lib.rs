//! Scripted bingo games
//!
//! A scenario lists the teams, the victory mode and a sequence of events.
//! [`replay`] feeds the events through a [`GameSession`] and records what the
//! engine decided after each one.

use anyhow::{bail, Context, Result};
use bingo_core::{
    BingoCard, CellId, GameSession, GameStatus, TeamId, TeamRegistry, VictoryMode,
    WinConditionConfig, WinDecision, WinReason,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: WinConditionConfig,
    pub teams: Vec<String>,
    /// Overrides the mode the config would start in
    #[serde(default)]
    pub mode: Option<VictoryMode>,
    /// Item names row by row; placeholder names when absent
    #[serde(default)]
    pub items: Option<Vec<String>>,
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioEvent {
    Collect { team: String, row: usize, col: usize },
    CollectItem { team: String, item: String },
    Timeout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: ScenarioEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<WinDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<WinReason>,
    pub status: GameStatus,
    pub sudden_death: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoldenSnitch {
    pub team: String,
    pub bonus: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub mode: VictoryMode,
    pub steps: Vec<ReplayStep>,
    pub final_status: GameStatus,
    pub winners: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub golden_snitch: Vec<GoldenSnitch>,
    /// Events left unplayed because the game ended first
    pub skipped_events: usize,
}

/// Reads a scenario; `.yaml`/`.yml` files are YAML, anything else JSON.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml") | Some("yml"));

    let scenario = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML scenario {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON scenario {}", path.display()))?
    };
    Ok(scenario)
}

fn team_id(teams: &[String], name: &str) -> Result<TeamId> {
    match teams.iter().position(|t| t == name) {
        Some(i) => Ok(TeamId(i as u16 + 1)),
        None => bail!("unknown team '{}' in scenario", name),
    }
}

fn build_session(scenario: &Scenario, seed: Option<u64>) -> Result<GameSession> {
    let card = match &scenario.items {
        Some(items) => BingoCard::from_items(items.clone())?,
        None => BingoCard::new(scenario.config.grid_size)?,
    };
    let mut teams = TeamRegistry::new();
    for name in &scenario.teams {
        teams.add_team(team_id(&scenario.teams, name)?, name.as_str())?;
    }

    let mut session = GameSession::new(&scenario.config, card, teams)?;
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }
    if let Some(mode) = scenario.mode {
        session.configure(mode)?;
    }
    Ok(session)
}

/// Plays every event until the game is decided.
pub fn replay(scenario: &Scenario, seed: Option<u64>) -> Result<ReplayReport> {
    let mut session = build_session(scenario, seed)?;

    let awarded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&awarded);
    session.checker_mut().set_notifier(move |team, bonus| sink.borrow_mut().push((team, bonus)));

    let mut steps = Vec::new();
    for (index, event) in scenario.events.iter().enumerate() {
        if session.status().is_decided() {
            break;
        }

        let (decision, timeout) = match event {
            ScenarioEvent::Collect { team, row, col } => {
                let team = team_id(&scenario.teams, team)?;
                let decision = session
                    .collect(team, CellId::new(*row, *col))
                    .with_context(|| format!("event #{}", index))?;
                (Some(decision), None)
            }
            ScenarioEvent::CollectItem { team, item } => {
                let team = team_id(&scenario.teams, team)?;
                let decision = session
                    .collect_item(team, item)
                    .with_context(|| format!("event #{}", index))?;
                (Some(decision), None)
            }
            ScenarioEvent::Timeout => {
                let winner = session.expire_timer().with_context(|| format!("event #{}", index))?;
                (None, Some(winner))
            }
        };

        steps.push(ReplayStep {
            index,
            event: event.clone(),
            decision,
            timeout,
            status: session.status().clone(),
            sudden_death: session.is_in_sudden_death(),
        });
    }

    let skipped_events = scenario.events.len() - steps.len();
    if skipped_events > 0 {
        log::warn!("Game ended with {} event(s) left unplayed", skipped_events);
    }

    let name_of = |id: TeamId| scenario.teams[id.0 as usize - 1].clone();
    let golden_snitch = awarded
        .borrow()
        .iter()
        .map(|(team, bonus)| GoldenSnitch { team: name_of(*team), bonus: *bonus })
        .collect();

    Ok(ReplayReport {
        mode: session.checker().mode(),
        steps,
        final_status: session.status().clone(),
        winners: session.status().winners().iter().map(|id| name_of(*id)).collect(),
        golden_snitch,
        skipped_events,
    })
}
