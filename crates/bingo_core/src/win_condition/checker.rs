use super::decision::{WinDecision, WinReason};
use super::lockout::{is_board_settled, lockout_winners, possible_num_collections};
use super::mode::VictoryMode;
use super::tiebreak::find_max;
use crate::card::CardView;
use crate::config::WinConditionConfig;
use crate::error::{Result, WinConditionError};
use crate::team::{TeamId, TeamLedger};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Called with the team and bonus amount when the Golden Snitch is awarded.
pub type BonusNotifier = Box<dyn FnMut(TeamId, u32)>;

/// Holds the active victory mode and evaluates it against card and team state.
pub struct WinConditionChecker {
    mode: VictoryMode,
    /// Race mode only: extra score for the first team to reach the line threshold
    golden_snitch_bonus: u32,
    notifier: Option<BonusNotifier>,
}

impl fmt::Debug for WinConditionChecker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WinConditionChecker")
            .field("mode", &self.mode)
            .field("golden_snitch_bonus", &self.golden_snitch_bonus)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl Default for WinConditionChecker {
    fn default() -> Self {
        Self {
            mode: VictoryMode::default(),
            golden_snitch_bonus: WinConditionConfig::default().golden_snitch_bonus,
            notifier: None,
        }
    }
}

impl WinConditionChecker {
    pub fn new(config: &WinConditionConfig) -> Result<Self> {
        Ok(Self {
            mode: config.default_mode()?,
            golden_snitch_bonus: config.golden_snitch_bonus,
            notifier: None,
        })
    }

    pub fn with_mode(mode: VictoryMode, golden_snitch_bonus: u32) -> Result<Self> {
        mode.validate()?;
        Ok(Self { mode, golden_snitch_bonus, notifier: None })
    }

    pub fn set_notifier<F>(&mut self, notifier: F)
    where
        F: FnMut(TeamId, u32) + 'static,
    {
        self.notifier = Some(Box::new(notifier));
    }

    // ========== Configuration ==========

    /// Replaces the active mode. An invalid mode leaves the current one in place.
    pub fn configure(&mut self, mode: VictoryMode) -> Result<()> {
        if let Err(e) = mode.validate() {
            log::warn!("Rejected win condition {:?}: {}", mode, e);
            return Err(e);
        }
        if mode != self.mode {
            log::info!("Win condition changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        Ok(())
    }

    /// Number of lines to win, 1..=10. `race` selects the race variant.
    pub fn set_num_lines_to_complete(&mut self, num_lines: u32, race: bool) -> Result<()> {
        let mode = if race { VictoryMode::Race(num_lines) } else { VictoryMode::Lines(num_lines) };
        self.configure(mode)
    }

    pub fn set_full_card(&mut self) {
        self.mode = VictoryMode::FullCard;
        log::info!("Win condition changed: full card");
    }

    pub fn set_completions_to_lock(&mut self, completions: u32) -> Result<()> {
        self.configure(VictoryMode::Lockout(completions))
    }

    pub fn mode(&self) -> VictoryMode {
        self.mode
    }

    pub fn num_lines_to_complete(&self) -> u32 {
        self.mode.num_lines_to_complete()
    }

    pub fn is_full_card(&self) -> bool {
        self.mode.is_full_card()
    }

    pub fn completions_to_lock(&self) -> u32 {
        self.mode.completions_to_lock()
    }

    pub fn is_race_mode(&self) -> bool {
        self.mode.is_race()
    }

    pub fn golden_snitch_bonus(&self) -> u32 {
        self.golden_snitch_bonus
    }

    // ========== Live check ==========

    pub fn has_bingo<C: CardView + ?Sized>(&self, card: &C, team: TeamId) -> bool {
        self.mode.has_bingo(card, team)
    }

    /// Evaluates the game right after `team` collected an item.
    ///
    /// In race mode this may award the Golden Snitch; that happens at most
    /// once per game no matter how often this is called.
    pub fn on_collection_event<C, L>(
        &mut self,
        card: &C,
        team: TeamId,
        ledger: &mut L,
    ) -> WinDecision
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
    {
        match self.mode {
            VictoryMode::Lockout(_) => match lockout_winners(card, &*ledger).as_slice() {
                [] => WinDecision::None,
                [winner] => {
                    log::info!("{} wins the lockout", winner);
                    WinDecision::Final { winner: WinReason::complete(*winner) }
                }
                leaders => {
                    log::info!("Lockout leaders can no longer be passed: {:?}", leaders);
                    WinDecision::Provisional { teams: leaders.to_vec() }
                }
            },
            VictoryMode::Lines(_) | VictoryMode::FullCard => {
                if self.has_bingo(card, team) {
                    log::info!("{} completed the {} objective", team, self.mode);
                    WinDecision::Final { winner: WinReason::complete(team) }
                } else {
                    WinDecision::None
                }
            }
            VictoryMode::Race(_) => {
                let crossed = self.has_bingo(card, team);
                if crossed {
                    self.award_golden_snitch(team, &mut *ledger);
                }
                // Once someone has the snitch every collection can break a tie
                if !crossed && ledger.first_to_threshold_holder().is_none() {
                    return WinDecision::None;
                }
                self.decide_race_winner(&*ledger)
            }
        }
    }

    fn award_golden_snitch<L: TeamLedger + ?Sized>(&mut self, team: TeamId, ledger: &mut L) {
        if ledger.first_to_threshold_holder().is_some() {
            return;
        }
        if !ledger.set_first_to_threshold(team) {
            return;
        }

        log::info!(
            "{} gets the Golden Snitch and receives {} extra score",
            team,
            self.golden_snitch_bonus
        );
        if let Some(notify) = self.notifier.as_mut() {
            notify(team, self.golden_snitch_bonus);
        }
    }

    /// Collected count plus the bonus if `team` holds the Golden Snitch.
    pub fn race_score<L: TeamLedger + ?Sized>(&self, ledger: &L, team: TeamId) -> u32 {
        let bonus = if ledger.first_to_threshold(team) { self.golden_snitch_bonus } else { 0 };
        ledger.collected_count(team).saturating_add(bonus)
    }

    /// Teams sharing the best race score.
    pub fn race_leaders<L: TeamLedger + ?Sized>(&self, ledger: &L) -> Vec<TeamId> {
        find_max(&ledger.team_ids(), |t| self.race_score(ledger, t))
    }

    fn decide_race_winner<L: TeamLedger + ?Sized>(&self, ledger: &L) -> WinDecision {
        match self.race_leaders(ledger).as_slice() {
            [winner] => {
                let score = self.race_score(ledger, *winner);
                log::info!("{} wins the race with {} points", winner, score);
                WinDecision::Final { winner: WinReason::complete(*winner) }
            }
            leaders => {
                log::debug!("Sudden death between {:?}", leaders);
                WinDecision::None
            }
        }
    }

    /// Race mode only: someone reached the threshold but the top score is shared.
    pub fn is_in_sudden_death<C, L>(&self, card: &C, ledger: &L) -> bool
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
    {
        if !self.is_race_mode() {
            return false;
        }
        let teams = ledger.team_ids();
        let threshold_reached = teams.iter().any(|&t| self.has_bingo(card, t))
            || ledger.first_to_threshold_holder().is_some();
        threshold_reached && self.race_leaders(ledger).len() > 1
    }

    pub fn possible_num_collections<C: CardView + ?Sized>(&self, card: &C, team: TeamId) -> u32 {
        possible_num_collections(card, team)
    }

    pub fn is_board_settled<C, L>(&self, card: &C, ledger: &L) -> bool
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
    {
        is_board_settled(card, ledger)
    }

    // ========== Timeout ==========

    /// Picks a winner when the session timer runs out.
    pub fn on_timeout<C, L, R>(&self, card: &C, ledger: &L, rng: &mut R) -> Result<WinReason>
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
        R: Rng + ?Sized,
    {
        self.decide_winner(card, ledger, rng)
    }

    /// Ranks by the mode's timeout score; line modes fall back to collected
    /// count, then any remaining tie is settled at random.
    pub fn decide_winner<C, L, R>(&self, card: &C, ledger: &L, rng: &mut R) -> Result<WinReason>
    where
        C: CardView + ?Sized,
        L: TeamLedger + ?Sized,
        R: Rng + ?Sized,
    {
        let teams = ledger.team_ids();
        if teams.is_empty() {
            return Err(WinConditionError::invalid_state("cannot decide a winner without teams"));
        }

        let mut potential_winners = find_max(&teams, |t| self.mode.timeout_score(card, ledger, t));

        if potential_winners.len() > 1 && self.num_lines_to_complete() > 0 {
            potential_winners = find_max(&potential_winners, |t| ledger.collected_count(t));
        }

        let winner = match potential_winners.as_slice() {
            [only] => WinReason::complete(*only),
            tied => {
                let pick = tied.choose(rng).copied().ok_or_else(|| {
                    WinConditionError::invalid_state("tie-break produced no candidates")
                })?;
                log::debug!("Random tie-break between {:?} picked {}", tied, pick);
                WinReason::random_tie(pick)
            }
        };

        log::info!("Time is up: {} wins ({:?})", winner.team, winner.reason);
        Ok(winner)
    }
}
