//! Feasibility arithmetic for lockout games.

use crate::card::CardView;
use crate::team::{TeamId, TeamLedger};

/// Upper bound on how many cells `team` can end the game holding.
///
/// A cell the team already has always counts, locked or not. Any other cell
/// counts while it is still unlocked.
pub fn possible_num_collections<C: CardView + ?Sized>(card: &C, team: TeamId) -> u32 {
    card.all_cells()
        .into_iter()
        .filter(|&cell| card.has_collected(cell, team) || !card.is_cell_locked(cell))
        .count() as u32
}

/// Leaders that no trailing team can still overtake.
///
/// Empty while some other team's feasible maximum exceeds the leading count.
pub fn lockout_winners<C, L>(card: &C, ledger: &L) -> Vec<TeamId>
where
    C: CardView + ?Sized,
    L: TeamLedger + ?Sized,
{
    let teams = ledger.team_ids();
    let Some(max_collected) = teams.iter().map(|&t| ledger.collected_count(t)).max() else {
        return Vec::new();
    };

    let leaders: Vec<TeamId> =
        teams.iter().copied().filter(|&t| ledger.collected_count(t) == max_collected).collect();

    for &leader in &leaders {
        for &other in teams.iter().filter(|&&t| t != leader) {
            let possible = possible_num_collections(card, other);
            if possible > max_collected {
                log::debug!(
                    "Lockout undecided: {} can still reach {} (leader has {})",
                    other,
                    possible,
                    max_collected
                );
                return Vec::new();
            }
        }
    }

    leaders
}

/// True once no team can add anything: every cell is either held or locked
/// for each of them.
pub fn is_board_settled<C, L>(card: &C, ledger: &L) -> bool
where
    C: CardView + ?Sized,
    L: TeamLedger + ?Sized,
{
    ledger.team_ids().into_iter().all(|team| {
        let held = card
            .all_cells()
            .into_iter()
            .filter(|&cell| card.has_collected(cell, team))
            .count() as u32;
        possible_num_collections(card, team) == held
    })
}
