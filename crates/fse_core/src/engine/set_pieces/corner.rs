use super::{box_slots, by_distance, finish, outfield, place_in_frame, reset_side, End, RestartKind, Touchline};
use crate::engine::frame::Frame;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side};

/// Corner to `side` at the `end` they attack. Defenders fill their own box with
/// the keeper on the line; attacking midfielders and strikers crowd the same box
/// while the attacking back line holds at halfway.
pub(super) fn setup(m: &mut Match, side: Side, end: End, touchline: Touchline) -> Result<()> {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let spot = Coord::new(
        match touchline {
            Touchline::Left => 0.0,
            Touchline::Right => w,
        },
        match end {
            End::Top => 0.0,
            End::Bottom => h,
        },
    );
    let attack = Frame::for_side(m, side);
    let defend = Frame::for_side(m, side.other());
    reset_side(m, side, 0.0);
    reset_side(m, side.other(), 0.0);

    let defenders = outfield(m, side.other());
    let slots = box_slots(w, defenders.len());
    for (k, (r, x)) in defenders.into_iter().zip(slots).enumerate() {
        let depth = if k % 2 == 0 { h / 24.0 } else { h / 10.0 };
        place_in_frame(m, &defend, r, Coord::new(x, depth));
    }
    place_in_frame(m, &defend, PlayerRef::new(side.other(), 0), Coord::new(w / 2.0, 0.0));

    let (back_line, runners): (Vec<PlayerRef>, Vec<PlayerRef>) =
        outfield(m, side).into_iter().partition(|&r| m.player(r).role.is_defender());
    let slots = box_slots(w, runners.len());
    for (k, (r, x)) in runners.into_iter().zip(slots).enumerate() {
        let depth = if k % 2 == 0 { h - h / 12.0 } else { h - h / 8.0 };
        place_in_frame(m, &attack, r, Coord::new(x + 5.0, depth));
    }
    for r in back_line {
        let x = m.player(r).origin_pos.x;
        place_in_frame(m, &attack, r, Coord::new(x, h / 2.0));
    }

    m.stats_mut(side).corners += 1;
    let kicker = by_distance(m, side, spot).first().copied();
    let line = format!("Corner to {}", m.team(side).name);
    finish(m, kicker, spot, RestartKind::Corner { side, end, touchline }, line)
}
