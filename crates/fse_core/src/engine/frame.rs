//! Attacking frame: one reflected coordinate system per team.
//!
//! In frame coordinates every team defends the `y = 0` goal and attacks towards
//! `y = pitch height`. The team whose goalkeeper starts in the top half needs no
//! transform; the other team is reflected in `y`. Mirrored top/bottom logic is
//! written once against the frame.

use crate::models::{Coord, Direction, Match, PitchSize, Side};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    height: f64,
    flipped: bool,
}

impl Frame {
    /// Frame for a team defending the top goal (`flipped = false`) or the bottom one.
    pub fn new(pitch: &PitchSize, defends_top: bool) -> Self {
        Self { height: pitch.height, flipped: !defends_top }
    }

    pub fn for_side(m: &Match, side: Side) -> Self {
        Self::new(&m.pitch_size, m.team(side).defends_top(m.pitch_size.height))
    }

    /// True for the team attacking towards `y = 0`.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn y(&self, y: f64) -> f64 {
        if self.flipped {
            self.height - y
        } else {
            y
        }
    }

    /// Pitch to frame. The transform is its own inverse.
    pub fn to_frame(&self, c: Coord) -> Coord {
        Coord::new(c.x, self.y(c.y))
    }

    /// Frame to pitch.
    pub fn to_pitch(&self, c: Coord) -> Coord {
        self.to_frame(c)
    }

    /// Sign of a forward step in pitch `y`.
    pub fn forward(&self) -> f64 {
        if self.flipped {
            -1.0
        } else {
            1.0
        }
    }

    /// Compass direction of attack.
    pub fn attack_direction(&self) -> Direction {
        if self.flipped {
            Direction::North
        } else {
            Direction::South
        }
    }

    /// Reflects a compass direction given in frame terms (south = forward).
    pub fn direction_to_pitch(&self, d: Direction) -> Direction {
        if !self.flipped {
            return d;
        }
        match d {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::NorthEast => Direction::SouthEast,
            Direction::NorthWest => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthEast,
            Direction::SouthWest => Direction::NorthWest,
            other => other,
        }
    }
}
