//! Compass lookup tables for untargeted kicks and deflections.

use crate::engine::frame::Frame;
use crate::engine::physics_constants::kick;
use crate::engine::rng::SimContext;
use crate::models::{Coord, Direction};

use Direction::*;

/// Offset along one axis: `uniform(lo, hi)`, multiplied by kick power when
/// `scaled`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub lo: f64,
    pub hi: f64,
    pub scaled: bool,
}

impl Span {
    const fn power(lo: f64, hi: f64) -> Self {
        Self { lo, hi, scaled: true }
    }

    const fn fixed(lo: f64, hi: f64) -> Self {
        Self { lo, hi, scaled: false }
    }

    pub fn draw(self, ctx: &mut SimContext, power: f64) -> f64 {
        let v = ctx.uniform(self.lo, self.hi);
        if self.scaled {
            v * power
        } else {
            v
        }
    }
}

const SCATTER: Span = Span::fixed(-kick::LATERAL_SCATTER, kick::LATERAL_SCATTER);
const NUDGE: Span = Span::fixed(-kick::DEFLECTION_SCATTER, kick::DEFLECTION_SCATTER);

/// Where a kick in direction `d` lands relative to the kicker.
pub fn kick_offset(d: Direction) -> (Span, Span) {
    match d {
        Wait => (Span::power(0.0, 0.5), Span::power(0.0, 0.5)),
        North => (SCATTER, Span::power(-1.0, -0.5)),
        South => (SCATTER, Span::power(0.5, 1.0)),
        East => (Span::power(0.5, 1.0), SCATTER),
        West => (Span::power(-1.0, -0.5), SCATTER),
        NorthEast => (Span::power(0.0, 0.5), Span::power(-1.0, -0.5)),
        NorthWest => (Span::power(-0.5, 0.0), Span::power(-1.0, -0.5)),
        SouthEast => (Span::power(0.0, 0.5), Span::power(0.5, 1.0)),
        SouthWest => (Span::power(-0.5, 0.0), Span::power(0.5, 1.0)),
    }
}

/// Where a ball travelling in direction `d` rebounds to relative to the player
/// it struck. Straight hits come back along their line; `Wait` scatters.
pub fn deflection_offset(d: Direction) -> (Span, Span) {
    const BACK: Span = Span::power(-0.5, -0.5);
    const ON: Span = Span::power(0.5, 0.5);
    match d {
        Wait => (Span::power(-0.5, 0.5), Span::power(-0.5, 0.5)),
        East => (BACK, NUDGE),
        West => (ON, NUDGE),
        North => (NUDGE, ON),
        South => (NUDGE, BACK),
        NorthEast => (BACK, ON),
        NorthWest => (ON, ON),
        SouthEast => (BACK, BACK),
        SouthWest => (ON, BACK),
    }
}

/// Clearance pool in frame terms, forward being south.
const CLEARANCE_POOL: [Direction; 15] = [
    Wait, South, South, South, South, East, East, West, West, SouthEast, SouthEast, SouthEast,
    SouthWest, SouthWest, SouthWest,
];

/// Long upfield punts only.
const BOOT_POOL: [Direction; 7] = [South, South, South, SouthEast, SouthEast, SouthWest, SouthWest];

/// Draws a direction for an untargeted kick, reflected for the kicking team.
pub fn pick_direction(ctx: &mut SimContext, frame: &Frame, long: bool) -> Direction {
    let pool: &[Direction] = if long { &BOOT_POOL } else { &CLEARANCE_POOL };
    let d = ctx.pick(pool).copied().unwrap_or(Wait);
    frame.direction_to_pitch(d)
}

pub fn apply(ctx: &mut SimContext, origin: Coord, spans: (Span, Span), power: f64) -> Coord {
    let dx = spans.0.draw(ctx, power);
    let dy = spans.1.draw(ctx, power);
    origin.offset(dx, dy)
}
