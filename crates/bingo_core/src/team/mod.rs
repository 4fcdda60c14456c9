pub mod ledger;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use ledger::{PlayerTeam, TeamLedger, TeamRegistry};

/// Opaque team handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u16);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "team#{}", self.0)
    }
}
