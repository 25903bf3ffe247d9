//! Pitch coordinates and the two-case player position.
//!
//! The pitch origin is the top-left corner. One goal sits on `y = 0`, the other on
//! `y = pitch height`.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Planar pitch coordinate. Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Straight-line planar distance.
    pub fn distance_to(self, other: Coord) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Rectangular proximity `(|dx|, |dy|)`, the metric every proximity window uses.
    pub fn proximity_to(self, other: Coord) -> (f64, f64) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// True when `other` lies strictly inside the `x_window × y_window` rectangle
    /// centred on `self`.
    pub fn within(self, other: Coord, x_window: f64, y_window: f64) -> bool {
        let (dx, dy) = self.proximity_to(other);
        dx < x_window && dy < y_window
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Coord {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coord> for [f64; 2] {
    fn from(coord: Coord) -> Self {
        [coord.x, coord.y]
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A player's current location: on the pitch, or removed from active play
/// (sent off). Serialized as `[x, y]` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Active(Coord),
    Removed,
}

impl Position {
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Position::Active(c) => Some(*c),
            Position::Removed => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Position::Active(_))
    }

    /// Concrete coordinate or an invariant error naming the player.
    pub fn require(&self, player: &str) -> Result<Coord> {
        self.coord().ok_or_else(|| MatchError::NoPlayerPosition { player: player.to_string() })
    }
}

impl From<Coord> for Position {
    fn from(coord: Coord) -> Self {
        Position::Active(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_serializes_as_pair() {
        let json = serde_json::to_string(&Coord::new(3.0, 4.5)).unwrap();
        assert_eq!(json, "[3.0,4.5]");
    }

    #[test]
    fn test_removed_position_round_trips_as_null() {
        let json = serde_json::to_string(&Position::Removed).unwrap();
        assert_eq!(json, "null");
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::Removed);

        let active: Position = serde_json::from_str("[10.0,20.0]").unwrap();
        assert_eq!(active, Position::Active(Coord::new(10.0, 20.0)));
    }

    #[test]
    fn test_require_fails_for_removed_player() {
        let err = Position::Removed.require("Keeper").unwrap_err();
        assert!(matches!(err, MatchError::NoPlayerPosition { ref player } if player == "Keeper"));
    }

    #[test]
    fn test_within_is_rectangular() {
        let a = Coord::new(0.0, 0.0);
        assert!(a.within(Coord::new(5.0, 5.0), 6.0, 6.0));
        assert!(!a.within(Coord::new(6.0, 0.0), 6.0, 6.0));
        // Diagonal distance ~8.4 but still inside the 6x6 window.
        assert!(a.within(Coord::new(5.9, 5.9), 6.0, 6.0));
    }
}
