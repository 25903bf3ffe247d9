use super::{by_distance, finish, place_at, reset_side, RestartKind, Touchline};
use crate::engine::frame::Frame;
use crate::engine::physics_constants::restart;
use crate::error::Result;
use crate::models::{Coord, Match, Side};

/// Throw-in from the touchline level with where the ball went out. Both shapes
/// slide half the distance from halfway towards the ball; one teammate offers
/// support and the nearest opponent marks.
pub(super) fn setup(m: &mut Match, side: Side, touchline: Touchline, point: Coord) -> Result<()> {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let (line, inward) = match touchline {
        Touchline::Left => (0.0, 1.0),
        Touchline::Right => (w, -1.0),
    };
    let spot = Coord::new(line, point.y.clamp(0.0, h));

    let shift = (spot.y - h / 2.0) / 2.0;
    for s in Side::BOTH {
        let forward = Frame::for_side(m, s).forward();
        reset_side(m, s, shift * forward);
    }

    let takers = by_distance(m, side, spot);
    let kicker = takers.first().copied();
    if let Some(&support) = takers.get(1) {
        let forward = Frame::for_side(m, side).forward();
        let at = Coord::new(line + inward * restart::THROW_SUPPORT, spot.y + forward * restart::THROW_SUPPORT);
        place_at(m, support, at);
    }
    if let Some(&marker) = by_distance(m, side.other(), spot).first() {
        place_at(m, marker, Coord::new(line + inward * restart::THROW_MARKER, spot.y));
    }

    let line = format!("Throw in to {}", m.team(side).name);
    finish(m, kicker, spot, RestartKind::ThrowIn { side, touchline }, line)
}
