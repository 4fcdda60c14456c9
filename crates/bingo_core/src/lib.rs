//! # bingo_core - Win-Condition Engine for Team Bingo
//!
//! Teams race to collect the items printed on a shared bingo card. This crate
//! decides, after every collection and when the session clock runs out,
//! whether the game is over and who won.
//!
//! ## Victory modes
//! - Lines: first team to complete N rows, columns or diagonals
//! - Full card: first team to collect every cell
//! - Lockout: cells lock once enough teams hold them; the leader wins once
//!   nobody can catch up
//! - Race: reaching N lines ends the race, best score plus the Golden Snitch
//!   bonus wins
//!
//! Card and team state are always passed in explicitly; the engine never
//! reaches for global state or an ambient RNG.

pub mod card;
pub mod config;
pub mod error;
pub mod session;
pub mod team;
pub mod win_condition;

pub use card::{BingoCard, BingoCell, CardView, CellId};
pub use config::WinConditionConfig;
pub use error::{Result, WinConditionError};
pub use session::{GameSession, GameStatus};
pub use team::{PlayerTeam, TeamId, TeamLedger, TeamRegistry};
pub use win_condition::{
    possible_num_collections, Reason, VictoryMode, WinConditionChecker, WinDecision, WinReason,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
