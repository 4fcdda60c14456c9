//! One game of bingo from first collection to the final whistle.
//!
//! [`GameSession`] owns the card, the team registry and the checker, applies
//! collection events to all three, and tracks where the game stands:
//!
//! ```text
//! InProgress ──► ProvisionalTie ──► Decided
//!      │               ▲   │
//!      │               └───┘ (re-evaluated on every collection)
//!      └──────────────────────► Decided
//! ```
//!
//! `Decided` is terminal.

pub mod status;

use crate::card::{BingoCard, CellId};
use crate::config::WinConditionConfig;
use crate::error::{Result, WinConditionError};
use crate::team::{TeamId, TeamLedger, TeamRegistry};
use crate::win_condition::{Reason, VictoryMode, WinConditionChecker, WinDecision, WinReason};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use status::GameStatus;

#[derive(Debug)]
pub struct GameSession {
    card: BingoCard,
    teams: TeamRegistry,
    checker: WinConditionChecker,
    rng: ChaCha8Rng,
    status: GameStatus,
}

impl GameSession {
    pub fn new(config: &WinConditionConfig, card: BingoCard, teams: TeamRegistry) -> Result<Self> {
        config.validate()?;
        let checker = WinConditionChecker::new(config)?;
        let mut session = Self {
            card,
            teams,
            checker,
            rng: ChaCha8Rng::from_entropy(),
            status: GameStatus::InProgress,
        };
        session.sync_card_lock();
        Ok(session)
    }

    /// Session with a blank `grid_size` card and the given team names.
    pub fn from_config(config: &WinConditionConfig, team_names: &[&str]) -> Result<Self> {
        let card = BingoCard::new(config.grid_size)?;
        let mut teams = TeamRegistry::new();
        for (i, name) in team_names.iter().enumerate() {
            teams.add_team(TeamId(i as u16 + 1), *name)?;
        }
        Self::new(config, card, teams)
    }

    /// Fixes the tie-break RNG, for replays and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn card(&self) -> &BingoCard {
        &self.card
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    pub fn checker(&self) -> &WinConditionChecker {
        &self.checker
    }

    /// For installing a bonus notifier.
    pub fn checker_mut(&mut self) -> &mut WinConditionChecker {
        &mut self.checker
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_in_sudden_death(&self) -> bool {
        self.checker.is_in_sudden_death(&self.card, &self.teams)
    }

    /// Switches the victory mode and re-derives the status under it.
    ///
    /// An actual change of mode clears the Golden Snitch. Re-issuing the
    /// current mode keeps the holder, so the bonus is still awarded at most
    /// once per game.
    pub fn configure(&mut self, mode: VictoryMode) -> Result<()> {
        self.ensure_not_decided()?;
        let changed = mode != self.checker.mode();
        self.checker.configure(mode)?;
        if changed {
            self.teams.clear_golden_snitch();
        }
        self.sync_card_lock();
        self.apply_decision(&WinDecision::None);
        Ok(())
    }

    /// Applies a collection by `team` and re-evaluates the game.
    ///
    /// Collecting a cell the team already holds, or one locked for it, is a
    /// no-op that returns [`WinDecision::None`].
    pub fn collect(&mut self, team: TeamId, cell: CellId) -> Result<WinDecision> {
        self.ensure_not_decided()?;
        if !self.teams.contains(team) {
            return Err(WinConditionError::invalid_state(format!("{} is not playing", team)));
        }

        if !self.card.collect(cell, team)? {
            log::debug!("{} could not collect {}", team, cell);
            return Ok(WinDecision::None);
        }
        self.teams.increment_collected(team);

        let decision = self.checker.on_collection_event(&self.card, team, &mut self.teams);
        self.apply_decision(&decision);
        Ok(decision)
    }

    /// Collects by item name instead of position.
    pub fn collect_item(&mut self, team: TeamId, item: &str) -> Result<WinDecision> {
        let cell = self.card.find_item(item).ok_or_else(|| {
            WinConditionError::invalid_state(format!("{} is not on the card", item))
        })?;
        self.collect(team, cell)
    }

    /// Ends the game when the session clock runs out.
    pub fn expire_timer(&mut self) -> Result<WinReason> {
        self.ensure_not_decided()?;
        let winner = self.checker.on_timeout(&self.card, &self.teams, &mut self.rng)?;
        self.status = GameStatus::Decided { winners: vec![winner.team], reason: winner.reason };
        Ok(winner)
    }

    fn apply_decision(&mut self, decision: &WinDecision) {
        self.status = match decision {
            WinDecision::Final { winner } => {
                GameStatus::Decided { winners: vec![winner.team], reason: winner.reason }
            }
            WinDecision::Provisional { teams } => {
                if self.checker.is_board_settled(&self.card, &self.teams) {
                    GameStatus::Decided { winners: teams.clone(), reason: Reason::Complete }
                } else {
                    GameStatus::ProvisionalTie { teams: teams.clone() }
                }
            }
            WinDecision::None if self.is_in_sudden_death() => {
                GameStatus::ProvisionalTie { teams: self.checker.race_leaders(&self.teams) }
            }
            WinDecision::None => GameStatus::InProgress,
        };

        if let GameStatus::Decided { winners, reason } = &self.status {
            log::info!("Game over: {:?} ({:?})", winners, reason);
        }
    }

    fn sync_card_lock(&mut self) {
        let k = self.checker.completions_to_lock();
        self.card.set_lock_threshold(if k > 0 { Some(k) } else { None });
    }

    fn ensure_not_decided(&self) -> Result<()> {
        if self.status.is_decided() {
            return Err(WinConditionError::invalid_state("the game has already been decided"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardView;
    use std::cell::RefCell;
    use std::rc::Rc;

    const RED: TeamId = TeamId(1);
    const BLUE: TeamId = TeamId(2);
    const GREEN: TeamId = TeamId(3);

    fn session(config: WinConditionConfig, size: usize, teams: &[&str]) -> GameSession {
        let config = WinConditionConfig { grid_size: size, ..config };
        GameSession::from_config(&config, teams).unwrap().with_seed(42)
    }

    fn decided(winners: Vec<TeamId>, reason: Reason) -> GameStatus {
        GameStatus::Decided { winners, reason }
    }

    /// Race(1) on 3x3: BLUE holds the six cells off the main diagonal (no
    /// line), RED takes the diagonal and the snitch. Both score 6.
    fn enter_sudden_death(game: &mut GameSession) {
        for cell in [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)] {
            assert!(game.collect(BLUE, CellId::new(cell.0, cell.1)).unwrap().is_none());
        }
        assert_eq!(game.card().completed_line_count(BLUE), 0);

        game.collect(RED, CellId::new(0, 0)).unwrap();
        game.collect(RED, CellId::new(1, 1)).unwrap();
        let decision = game.collect(RED, CellId::new(2, 2)).unwrap();
        assert!(decision.is_none());
    }

    #[test]
    fn test_line_game_decides_and_stays_decided() {
        let mut game = session(WinConditionConfig::classic(), 3, &["Red", "Blue"]);
        game.collect(RED, CellId::new(0, 0)).unwrap();
        game.collect(RED, CellId::new(1, 1)).unwrap();
        assert_eq!(*game.status(), GameStatus::InProgress);

        let decision = game.collect(RED, CellId::new(2, 2)).unwrap();
        assert!(decision.is_final());
        assert_eq!(*game.status(), decided(vec![RED], Reason::Complete));

        assert!(game.collect(BLUE, CellId::new(0, 1)).is_err());
        assert!(game.expire_timer().is_err());
    }

    #[test]
    fn test_duplicate_collect_is_noop() {
        let mut game = session(WinConditionConfig::classic(), 3, &["Red"]);
        game.collect(RED, CellId::new(0, 0)).unwrap();
        assert!(game.collect(RED, CellId::new(0, 0)).unwrap().is_none());
        assert_eq!(game.teams().collected_count(RED), 1);
    }

    #[test]
    fn test_unknown_team_rejected() {
        let mut game = session(WinConditionConfig::classic(), 3, &["Red"]);
        assert!(game.collect(TeamId(9), CellId::new(0, 0)).is_err());
    }

    #[test]
    fn test_collect_by_item_name() {
        let mut game = session(WinConditionConfig::classic(), 2, &["Red"]);
        game.collect_item(RED, "item_00").unwrap();
        assert_eq!(game.teams().collected_count(RED), 1);
        assert!(game.collect_item(RED, "diamond").is_err());
    }

    #[test]
    fn test_configure_syncs_card_lock() {
        let mut game = session(WinConditionConfig::race(), 3, &["Red", "Blue"]);
        game.configure(VictoryMode::Lockout(2)).unwrap();
        assert_eq!(game.card().lock_threshold(), Some(2));

        game.configure(VictoryMode::FullCard).unwrap();
        assert_eq!(game.card().lock_threshold(), None);

        assert!(game.configure(VictoryMode::Lines(0)).is_err());
        assert_eq!(game.checker().mode(), VictoryMode::FullCard);
    }

    #[test]
    fn test_lockout_single_leader_wins() {
        let mut game = session(WinConditionConfig::classic(), 2, &["Red", "Blue"]);
        game.configure(VictoryMode::Lockout(1)).unwrap();

        game.collect(RED, CellId::new(0, 0)).unwrap();
        game.collect(BLUE, CellId::new(0, 1)).unwrap();
        // Locked cells cannot be taken by the other team
        assert!(game.collect(RED, CellId::new(0, 1)).unwrap().is_none());
        assert_eq!(game.teams().collected_count(RED), 1);

        let decision = game.collect(RED, CellId::new(1, 0)).unwrap();
        assert_eq!(decision.winners(), vec![RED]);
        assert_eq!(*game.status(), decided(vec![RED], Reason::Complete));
    }

    #[test]
    fn test_lockout_tie_becomes_shared_win() {
        let mut game = session(WinConditionConfig::classic(), 3, &["Red", "Blue", "Green"]);
        game.configure(VictoryMode::Lockout(1)).unwrap();

        // RED and BLUE alternate over eight cells, GREEN takes the last one
        let cells = game.card().all_cells();
        for (i, cell) in cells.iter().take(8).enumerate() {
            let team = if i % 2 == 0 { RED } else { BLUE };
            assert!(game.collect(team, *cell).unwrap().is_none());
        }
        assert_eq!(*game.status(), GameStatus::InProgress);

        let decision = game.collect(GREEN, cells[8]).unwrap();
        assert_eq!(decision, WinDecision::Provisional { teams: vec![RED, BLUE] });
        assert_eq!(*game.status(), decided(vec![RED, BLUE], Reason::Complete));
    }

    #[test]
    fn test_race_sudden_death_status() {
        let mut game = session(WinConditionConfig::race(), 3, &["Red", "Blue"]);
        enter_sudden_death(&mut game);
        // RED 3 + 3 bonus = 6 = BLUE
        assert!(game.teams().first_to_threshold(RED));
        assert!(game.is_in_sudden_death());
        assert_eq!(*game.status(), GameStatus::ProvisionalTie { teams: vec![RED, BLUE] });

        let decision = game.collect(BLUE, CellId::new(1, 1)).unwrap();
        assert_eq!(decision.winners(), vec![BLUE]);
        assert!(game.status().is_decided());
    }

    #[test]
    fn test_timeout_decides_with_seeded_rng() {
        let mut a = session(WinConditionConfig::blackout(), 3, &["Red", "Blue"]);
        let mut b = session(WinConditionConfig::blackout(), 3, &["Red", "Blue"]);
        for game in [&mut a, &mut b] {
            game.collect(RED, CellId::new(0, 0)).unwrap();
            game.collect(BLUE, CellId::new(1, 1)).unwrap();
        }

        let ra = a.expire_timer().unwrap();
        let rb = b.expire_timer().unwrap();
        assert_eq!(ra, rb);
        assert_eq!(ra.reason, Reason::RandomTie);
        assert_eq!(*a.status(), decided(vec![ra.team], Reason::RandomTie));
    }

    #[test]
    fn test_same_mode_configure_keeps_snitch() {
        let mut game = session(WinConditionConfig::race(), 3, &["Red", "Blue"]);
        let notified = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notified);
        game.checker_mut().set_notifier(move |team, bonus| sink.borrow_mut().push((team, bonus)));
        enter_sudden_death(&mut game);

        game.configure(VictoryMode::Race(1)).unwrap();
        assert_eq!(game.teams().first_to_threshold_holder(), Some(RED));
        assert_eq!(*game.status(), GameStatus::ProvisionalTie { teams: vec![RED, BLUE] });

        // BLUE completes row 1 after RED: no second bonus
        let decision = game.collect(BLUE, CellId::new(1, 1)).unwrap();
        assert_eq!(decision.winners(), vec![BLUE]);
        assert!(!game.teams().first_to_threshold(BLUE));
        assert_eq!(*notified.borrow(), vec![(RED, 3)]);
    }

    #[test]
    fn test_mode_switch_rederives_status() {
        let mut game = session(WinConditionConfig::race(), 3, &["Red", "Blue"]);
        enter_sudden_death(&mut game);
        assert!(matches!(game.status(), GameStatus::ProvisionalTie { .. }));

        game.configure(VictoryMode::FullCard).unwrap();
        assert!(!game.is_in_sudden_death());
        assert_eq!(game.teams().first_to_threshold_holder(), None);
        assert_eq!(*game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_race_sudden_death_resolved_at_timeout() {
        let mut game = session(WinConditionConfig::race(), 3, &["Red", "Blue"]);
        enter_sudden_death(&mut game);
        assert!(game.is_in_sudden_death());

        // Timeout ranks race by lines: RED has the diagonal, BLUE none
        let winner = game.expire_timer().unwrap();
        assert_eq!(winner, WinReason::complete(RED));
        assert_eq!(*game.status(), decided(vec![RED], Reason::Complete));
    }

    #[test]
    fn test_open_lockout_tie_resolved_at_timeout() {
        let config = WinConditionConfig { default_num_lines_complete: 10, ..Default::default() };
        let mut game = session(config, 3, &["Red", "Blue", "Green"]);

        // Ten lines never happen on 3x3, so RED and BLUE can both fill the card
        let cells = game.card().all_cells();
        for cell in &cells {
            assert!(game.collect(RED, *cell).unwrap().is_none());
            assert!(game.collect(BLUE, *cell).unwrap().is_none());
        }

        game.configure(VictoryMode::Lockout(3)).unwrap();
        assert_eq!(*game.status(), GameStatus::InProgress);

        // GREEN locks one cell; the rest stay open to GREEN only
        let decision = game.collect(GREEN, cells[0]).unwrap();
        assert_eq!(decision, WinDecision::Provisional { teams: vec![RED, BLUE] });
        assert!(!game.checker().is_board_settled(game.card(), game.teams()));
        assert_eq!(*game.status(), GameStatus::ProvisionalTie { teams: vec![RED, BLUE] });

        let winner = game.expire_timer().unwrap();
        assert_eq!(winner.reason, Reason::RandomTie);
        assert!(winner.team == RED || winner.team == BLUE);
        assert_eq!(*game.status(), decided(vec![winner.team], Reason::RandomTie));
    }

    #[test]
    fn test_huge_bonus_from_config_does_not_overflow() {
        let yaml = "default_race_mode: true\ngolden_snitch_bonus: 4294967295\n";
        let config = WinConditionConfig::from_yaml_str(yaml).unwrap();
        let mut game = session(config, 1, &["Red", "Blue"]);

        let decision = game.collect(RED, CellId::new(0, 0)).unwrap();
        assert_eq!(decision.winners(), vec![RED]);
        assert_eq!(game.checker().race_score(game.teams(), RED), u32::MAX);
    }

    #[test]
    fn test_timeout_without_teams_fails() {
        let mut game = session(WinConditionConfig::classic(), 3, &[]);
        let err = game.expire_timer().unwrap_err();
        assert!(matches!(err, WinConditionError::InvalidState { .. }));
        assert_eq!(*game.status(), GameStatus::InProgress);
    }
}
