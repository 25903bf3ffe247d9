use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::position::Coord;
use crate::engine::actions::Action;

/// Compass direction of the ball's most recent movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Wait,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Direction of travel between two points. `y` grows southwards.
    pub fn between(from: Coord, to: Coord) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0.0 {
            if dy == 0.0 {
                Direction::Wait
            } else if dy > 0.0 {
                Direction::South
            } else {
                Direction::North
            }
        } else if dy == 0.0 {
            if dx > 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else {
            match (dx > 0.0, dy > 0.0) {
                (true, true) => Direction::SouthEast,
                (true, false) => Direction::NorthEast,
                (false, true) => Direction::SouthWest,
                (false, false) => Direction::NorthWest,
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Wait => "wait",
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "northeast",
            Direction::NorthWest => "northwest",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
        }
    }

    pub fn is_eastward(self) -> bool {
        matches!(self, Direction::East | Direction::NorthEast | Direction::SouthEast)
    }

    pub fn is_westward(self) -> bool {
        matches!(self, Direction::West | Direction::NorthWest | Direction::SouthWest)
    }

    pub fn is_northward(self) -> bool {
        matches!(self, Direction::North | Direction::NorthEast | Direction::NorthWest)
    }

    pub fn is_southward(self) -> bool {
        matches!(self, Direction::South | Direction::SouthEast | Direction::SouthWest)
    }
}

/// Last player to touch the ball.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LastTouch {
    pub player_name: String,
    pub player_id: Option<u64>,
    pub team_id: Option<u64>,
    /// Kind of kick that sent the ball on its way, if it was kicked.
    #[serde(default)]
    pub action: Option<Action>,
}

/// A queued trajectory point `[x, y, height]`.
pub type TrajectoryPoint = [f64; 3];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ball {
    pub position: Coord,
    /// Non-zero only while the ball is mid-arc.
    pub height: f64,
    pub with_player: bool,
    pub player: Option<u64>,
    pub with_team: Option<u64>,
    pub direction: Direction,
    /// Upcoming trajectory points, consumed front first.
    pub ball_over_iterations: VecDeque<TrajectoryPoint>,
    pub last_touch: LastTouch,
}

impl Ball {
    pub fn at(position: Coord) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn is_moving(&self) -> bool {
        !self.ball_over_iterations.is_empty()
    }

    /// Drops any holder without touching the players themselves.
    pub fn release(&mut self) {
        self.with_player = false;
        self.player = None;
        self.with_team = None;
    }
}
