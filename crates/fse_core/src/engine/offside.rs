//! Offside flags.
//!
//! Flags are refreshed after tactics every iteration and punished only when a
//! flagged player receives a teammate's kick (see `collision::take_possession`).

use super::frame::Frame;
use super::rng::SimContext;
use crate::models::{Match, Side};

/// Frame `y` of the second-last opponent of `side`, keeper included.
fn second_last_defender(m: &Match, side: Side, frame: &Frame) -> f64 {
    let mut depths: Vec<f64> = m
        .team(side.other())
        .players
        .iter()
        .filter_map(|p| p.current_pos.coord())
        .map(|c| frame.y(c.y))
        .collect();
    depths.sort_by(|a, b| b.total_cmp(a));
    depths.get(1).copied().unwrap_or(m.pitch_size.height)
}

/// Flags attackers in the opposition half who are beyond both the ball and the
/// second-last defender.
pub fn check_offside(m: &mut Match, ctx: &SimContext) {
    let enabled = ctx.config.rules.offside_enabled;
    let half = m.pitch_size.height / 2.0;
    for side in Side::BOTH {
        let frame = Frame::for_side(m, side);
        let line = second_last_defender(m, side, &frame);
        let ball = frame.y(m.ball.position.y);
        for p in m.team_mut(side).players.iter_mut() {
            p.offside = enabled
                && !p.has_ball
                && p.current_pos.coord().map_or(false, |c| {
                    let fy = frame.y(c.y);
                    fy > half && fy > line && fy > ball
                });
        }
    }
}
