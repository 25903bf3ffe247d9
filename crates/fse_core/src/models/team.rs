use serde::{Deserialize, Serialize};

use super::player::{Player, ShotStats};

/// Roster slots per team. Slot 0 is the goalkeeper.
pub const SQUAD_SIZE: usize = 11;

/// Team-level tactical disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Attack,
    Defend,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub rating: u32,
    pub intent: Intent,
    pub team_id: u64,
    pub players: [Player; SQUAD_SIZE],
}

impl Team {
    pub fn goalkeeper(&self) -> &Player {
        &self.players[0]
    }

    /// True when the team's goalkeeper baseline lies in the top half, i.e. the team
    /// defends the `y = 0` goal and attacks downwards.
    pub fn defends_top(&self, pitch_height: f64) -> bool {
        self.goalkeeper().origin_pos.y < pitch_height / 2.0
    }

    pub fn index_of(&self, player_id: u64) -> Option<usize> {
        self.players.iter().position(|p| p.player_id == player_id)
    }

    pub fn carrier_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.has_ball)
    }
}

/// Per-team match statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub goals: u32,
    pub shots: ShotStats,
    pub corners: u32,
    pub free_kicks: u32,
    pub penalties: u32,
    pub fouls: u32,
}
