use super::{by_distance, finish, outfield, place_at, reset_side, RestartKind};
use crate::engine::frame::Frame;
use crate::engine::physics_constants::restart;
use crate::engine::rng::SimContext;
use crate::error::Result;
use crate::models::{Match, Side};

/// Both teams back to formation; the two most advanced players of `side` stand on
/// the centre spot and one of them, drawn at random, holds the ball.
pub fn kick_off(m: &mut Match, ctx: &mut SimContext, side: Side) -> Result<()> {
    reset_side(m, side, 0.0);
    reset_side(m, side.other(), 0.0);

    let frame = Frame::for_side(m, side);
    let mut forwards = outfield(m, side);
    forwards.sort_by(|&a, &b| {
        let ya = frame.y(m.player(a).origin_pos.y);
        let yb = frame.y(m.player(b).origin_pos.y);
        yb.total_cmp(&ya)
    });
    forwards.truncate(2);
    if forwards.len() == 2 && ctx.percent(50.0) {
        forwards.swap(0, 1);
    }

    let centre = m.pitch_size.centre();
    if let Some(&partner) = forwards.get(1) {
        place_at(m, partner, centre.offset(restart::KICK_OFF_PARTNER, 0.0));
    }
    let kicker = match forwards.first() {
        Some(&r) => Some(r),
        None => by_distance(m, side, centre).first().copied(),
    };

    let line = format!("{} kick off", m.team(side).name);
    finish(m, kicker, centre, RestartKind::KickOff { side }, line)
}
