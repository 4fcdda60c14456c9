//! Decides when a bingo game ends and who won.
//!
//! The checker is driven by two events: an item being collected and the
//! session timer running out. Card and team state are passed in on every call;
//! the only state the checker keeps is the active [`VictoryMode`].

pub mod checker;
pub mod decision;
pub mod lockout;
pub mod mode;
pub mod tiebreak;

pub use checker::{BonusNotifier, WinConditionChecker};
pub use decision::{Reason, WinDecision, WinReason};
pub use lockout::{is_board_settled, lockout_winners, possible_num_collections};
pub use mode::{VictoryMode, MAX_LINES, MIN_LINES};
pub use tiebreak::find_max;
