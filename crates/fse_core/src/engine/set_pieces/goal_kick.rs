use super::{by_distance, finish, reset_side, End, RestartKind};
use crate::engine::frame::Frame;
use crate::engine::physics_constants::restart;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side};

/// Goal kick: the keeper takes it from just in front of goal, everyone else
/// returns to formation.
pub(super) fn setup(m: &mut Match, side: Side, end: End) -> Result<()> {
    reset_side(m, side, 0.0);
    reset_side(m, side.other(), 0.0);

    let frame = Frame::for_side(m, side);
    let spot = frame.to_pitch(Coord::new(m.pitch_size.width / 2.0, restart::GOAL_KICK_DEPTH));
    let keeper = PlayerRef::new(side, 0);
    let kicker = if m.player(keeper).is_available() {
        Some(keeper)
    } else {
        by_distance(m, side, spot).first().copied()
    };

    let line = format!("Goal kick to {}", m.team(side).name);
    finish(m, kicker, spot, RestartKind::GoalKick { side, end }, line)
}
