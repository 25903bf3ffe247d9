use serde::{Deserialize, Serialize};

use super::position::{Coord, Position};
use crate::engine::actions::Action;
use crate::error::Result;

/// Playing role.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    GK,
    CB,
    LB,
    RB,
    CM,
    LM,
    RM,
    ST,
}

impl Role {
    pub fn is_goalkeeper(self) -> bool {
        self == Role::GK
    }

    pub fn is_defender(self) -> bool {
        matches!(self, Role::CB | Role::LB | Role::RB)
    }

    pub fn is_midfielder(self) -> bool {
        matches!(self, Role::CM | Role::LM | Role::RM)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::GK => "GK",
            Role::CB => "CB",
            Role::LB => "LB",
            Role::RB => "RB",
            Role::CM => "CM",
            Role::LM => "LM",
            Role::RM => "RM",
            Role::ST => "ST",
        }
    }
}

/// Skill attributes, each roughly 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Skill {
    pub passing: f64,
    pub shooting: f64,
    pub tackling: f64,
    pub saving: f64,
    pub agility: f64,
    pub strength: f64,
    pub penalty_taking: f64,
    pub jumping: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotStats {
    pub total: u32,
    pub on: u32,
    pub off: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassStats {
    pub total: u32,
    pub on: u32,
    pub off: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TackleStats {
    pub total: u32,
    pub on: u32,
    pub off: u32,
    pub fouls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardStats {
    pub yellow: u32,
    pub red: u32,
}

/// Per-match player statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub goals: u32,
    pub shots: ShotStats,
    pub passes: PassStats,
    pub tackles: TackleStats,
    pub cards: CardStats,
    /// Goalkeepers only.
    pub saves: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    pub rating: u32,
    pub skill: Skill,
    pub current_pos: Position,
    /// Formation baseline.
    pub origin_pos: Coord,
    /// Tactically desired target.
    pub intent_pos: Coord,
    pub fitness: f64,
    pub injured: bool,
    pub player_id: u64,
    /// Action taken in the most recent iteration.
    pub action: Option<Action>,
    /// Externally provided action consumed by the next decision.
    #[serde(default)]
    pub queued_action: Option<Action>,
    pub offside: bool,
    pub has_ball: bool,
    pub stats: PlayerStats,
}

impl Player {
    pub fn is_goalkeeper(&self) -> bool {
        self.role.is_goalkeeper()
    }

    /// Active and not injured.
    pub fn is_available(&self) -> bool {
        self.current_pos.is_active() && !self.injured
    }

    pub fn pos(&self) -> Result<Coord> {
        self.current_pos.require(&self.name)
    }

    pub fn set_pos(&mut self, coord: Coord) {
        self.current_pos = Position::Active(coord);
    }

    /// Removes the player from active coordinate space (sent off).
    pub fn remove_from_play(&mut self) {
        self.current_pos = Position::Removed;
        self.has_ball = false;
        self.offside = false;
    }
}
