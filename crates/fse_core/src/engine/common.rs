//! Numeric and geometry utilities shared by every subsystem.
//!
//! All functions are pure apart from the ones taking a [`SimContext`].

use super::physics_constants::{injury, kick};
use super::rng::SimContext;
use crate::models::{Coord, Match, PitchSize, PlayerRef, Side};

/// Strict range test: `lo < value < hi`.
#[inline]
pub fn is_between(value: f64, lo: f64, hi: f64) -> bool {
    value > lo && value < hi
}

/// Rounds to `places` decimals, halves rounding towards positive infinity.
pub fn round(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}

/// `1 + 2 + ... + n`
pub fn sum_from_1_to_x(n: usize) -> f64 {
    (n * (n + 1) / 2) as f64
}

/// `a * (b / (1 + 2 + ... + c))`
pub fn a_times_b_divided_by_c(a: f64, b: f64, c: usize) -> f64 {
    a * (b / sum_from_1_to_x(c))
}

/// Splits `total` across `n` steps with triangular weighting: step `i` carries
/// `round((n - i) * total / (1 + ... + n))`, so early steps move furthest.
pub fn split_number_into_n(total: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| round(a_times_b_divided_by_c((n - i) as f64, total, n), 0)).collect()
}

/// Penalty box at the `y = 0` end: `x ∈ (w/4, w - w/4)`, `y ∈ (-1, h/6 + 7)`.
pub fn in_top_penalty_box(pos: Coord, pitch_width: f64, pitch_height: f64) -> bool {
    let quarter = pitch_width / 4.0;
    is_between(pos.x, quarter, pitch_width - quarter)
        && is_between(pos.y, -1.0, pitch_height / 6.0 + 7.0)
}

/// Penalty box at the `y = height` end.
pub fn in_bottom_penalty_box(pos: Coord, pitch_width: f64, pitch_height: f64) -> bool {
    let quarter = pitch_width / 4.0;
    is_between(pos.x, quarter, pitch_width - quarter)
        && is_between(pos.y, pitch_height - pitch_height / 6.0 - 7.0, pitch_height + 1.0)
}

pub fn in_either_penalty_box(pos: Coord, pitch: &PitchSize) -> bool {
    in_top_penalty_box(pos, pitch.width, pitch.height)
        || in_bottom_penalty_box(pos, pitch.width, pitch.height)
}

/// Kick power: `floor(strength) * uniform(1, 5)`.
pub fn calculate_power(ctx: &mut SimContext, strength: f64) -> f64 {
    strength.floor() * ctx.uniform(kick::MULTIPLIER_MIN, kick::MULTIPLIER_MAX)
}

/// One-in-`odds + 1` injury roll.
pub fn is_injured(ctx: &mut SimContext, odds: i64) -> bool {
    ctx.random_int(0, odds) == injury::HIT
}

/// Sample points along the straight line from `from` towards `to`, with an arc
/// height, used to test who the ball passes on its way.
///
/// The ball advances one unit in `y` per point (x scaled accordingly) for
/// `round(from.y - to.y)` points, at least one. The arc peaks at
/// `sqrt(|(d/2)^2 - (p/2)^2|)` where `d` is the rounded planar distance and `p`
/// the kick power, inflated by `d` when the kick is weaker than the distance.
pub fn get_ball_trajectory(from: [f64; 3], to: [f64; 3], power: f64) -> Vec<[f64; 3]> {
    let x_movement = (from[0] - to[0]).powi(2);
    let y_movement = (from[1].trunc() - to[1].trunc()).powi(2);
    let distance = round((x_movement + y_movement).sqrt(), 0);

    let mut power = power;
    if distance >= power {
        power = power.trunc() + distance.trunc();
    }
    let height = ((distance / 2.0).powi(2) - (power / 2.0).powi(2)).abs().sqrt();

    let steps = round(from[1] - to[1], 0).max(1.0) as usize;
    let dy = to[1] - from[1];
    let change_in_x = (to[0] - from[0]) / dy.abs().max(1.0);
    let change_in_y = dy.signum() * if dy == 0.0 { 0.0 } else { 1.0 };
    let change_in_h = height / (steps as f64 / 2.0);

    let mut trajectory = Vec::with_capacity(steps + 1);
    trajectory.push([from[0], from[1], 0.0]);
    let mut rising = true;
    for _ in 0..steps {
        let [last_x, last_y, last_h] = trajectory[trajectory.len() - 1];
        let x = round(last_x + change_in_x, 5);
        let y = round(last_y + change_in_y, 5);
        let h = if rising {
            let h = round(last_h + change_in_h, 5);
            if h >= height {
                rising = false;
                height
            } else {
                h
            }
        } else {
            round(last_h - change_in_h, 5).max(0.0)
        };
        trajectory.push([x, y, h]);
    }
    trajectory
}

/// Closest active player of `side` to `pos` by the larger axis gap, skipping
/// `exclude`. Returns the slot and its `(|dx|, |dy|)` proximity.
pub fn closest_player_to_position(
    m: &Match,
    side: Side,
    pos: Coord,
    exclude: Option<PlayerRef>,
) -> Option<(PlayerRef, (f64, f64))> {
    let mut best: Option<(PlayerRef, (f64, f64))> = None;
    for (index, player) in m.team(side).players.iter().enumerate() {
        let r = PlayerRef::new(side, index);
        if Some(r) == exclude {
            continue;
        }
        let Some(c) = player.current_pos.coord() else { continue };
        let prox = c.proximity_to(pos);
        let better = match best {
            None => true,
            Some((_, (bx, by))) => prox.0.max(prox.1) < bx.max(by),
        };
        if better {
            best = Some((r, prox));
        }
    }
    best
}
