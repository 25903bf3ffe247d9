//! Shared match state: the records every engine subsystem reads and mutates.

pub mod ball;
pub mod match_state;
pub mod player;
pub mod position;
pub mod team;

pub use ball::{Ball, Direction, LastTouch, TrajectoryPoint};
pub use match_state::{Match, PitchSize, PlayerRef, Side};
pub use player::{
    CardStats, PassStats, Player, PlayerStats, Role, ShotStats, Skill, TackleStats,
};
pub use position::{Coord, Position};
pub use team::{Intent, Team, TeamStatistics, SQUAD_SIZE};
