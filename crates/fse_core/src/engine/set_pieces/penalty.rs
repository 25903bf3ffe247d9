use super::{box_slots, finish, outfield, place_in_frame, reset_side, End, RestartKind};
use crate::engine::frame::Frame;
use crate::engine::physics_constants::restart;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side};

/// Penalty to `side`. The best penalty taker goes to the spot, the opposing keeper
/// to its line and every other outfield player waits outside the box.
pub(super) fn setup(m: &mut Match, side: Side) -> Result<()> {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let frame = Frame::for_side(m, side);
    let end = End::attacked_by(&frame);
    let spot = frame.to_pitch(Coord::new(w / 2.0, h - h * restart::PENALTY_SPOT));
    reset_side(m, side, 0.0);
    reset_side(m, side.other(), 0.0);

    let kicker = m
        .team(side)
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_available())
        .max_by(|(_, a), (_, b)| a.skill.penalty_taking.total_cmp(&b.skill.penalty_taking))
        .map(|(i, _)| PlayerRef::new(side, i));

    let waiting: Vec<PlayerRef> = outfield(m, side)
        .into_iter()
        .chain(outfield(m, side.other()))
        .filter(|&r| Some(r) != kicker)
        .collect();
    let edge = h - h / 6.0 - 7.0 - restart::PENALTY_ARC_GAP;
    let slots = box_slots(w, waiting.len());
    for (k, (r, x)) in waiting.into_iter().zip(slots).enumerate() {
        let depth = if k % 2 == 0 { edge } else { edge - 10.0 };
        place_in_frame(m, &frame, r, Coord::new(x, depth));
    }
    place_in_frame(m, &frame, PlayerRef::new(side.other(), 0), Coord::new(w / 2.0, h));

    m.stats_mut(side).penalties += 1;
    let line = format!("Penalty to {}", m.team(side).name);
    finish(m, kicker, spot, RestartKind::Penalty { side, end }, line)
}
