use serde::{Deserialize, Serialize};

use super::{box_slots, by_distance, finish, outfield, place_at, place_in_frame, reset_side, RestartKind};
use crate::engine::actions::Action;
use crate::engine::common::is_between;
use crate::engine::frame::Frame;
use crate::engine::physics_constants::restart;
use crate::error::{MatchError, Result};
use crate::models::{Coord, Match, PlayerRef, Side};

/// Distance band of a free kick, measured in the kicking team's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeKickBand {
    /// Within 100 units of the kicking team's own byline.
    OwnHundred,
    ToHalfway,
    BeyondHalfway,
    UpperFinalQuarter,
    FinalSixth,
}

impl FreeKickBand {
    /// Bins a frame `y` into a band. The bands cover `[0, h)` with small overlaps;
    /// anything else is a defect.
    pub fn classify(fy: f64, h: f64) -> Result<Self> {
        if fy < restart::OWN_BAND + 1.0 {
            Ok(FreeKickBand::OwnHundred)
        } else if is_between(fy, restart::OWN_BAND, h / 2.0 + 1.0) {
            Ok(FreeKickBand::ToHalfway)
        } else if is_between(fy, h / 2.0, h - h / 4.0) {
            Ok(FreeKickBand::BeyondHalfway)
        } else if is_between(fy, h - h / 4.0 - 1.0, h - h / 6.0 - 5.0) {
            Ok(FreeKickBand::UpperFinalQuarter)
        } else if is_between(fy, h - h / 6.0 - 6.0, h) {
            Ok(FreeKickBand::FinalSixth)
        } else {
            Err(MatchError::UnhandledFreeKickBand { y: fy })
        }
    }

    pub fn forced_action(self) -> Action {
        match self {
            FreeKickBand::OwnHundred | FreeKickBand::ToHalfway => Action::Boot,
            FreeKickBand::BeyondHalfway => Action::Pass,
            FreeKickBand::UpperFinalQuarter | FreeKickBand::FinalSixth => Action::Shoot,
        }
    }

    /// Shift of the kicking outfield and of its keeper. Forward in the frame,
    /// except the own band, which moves along pitch y.
    fn advance(self, h: f64) -> (f64, f64) {
        match self {
            FreeKickBand::OwnHundred => (restart::OWN_BAND, 0.0),
            FreeKickBand::ToHalfway => (h / 6.0, h / 20.0),
            FreeKickBand::BeyondHalfway => (h / 3.0, h / 10.0),
            FreeKickBand::UpperFinalQuarter | FreeKickBand::FinalSixth => (h / 2.0, h / 6.0),
        }
    }
}

/// Free kick to `side` at `spot`. The band decides how far the kicking team
/// pushes up; close to goal the defence builds a wall or packs the box.
pub(super) fn setup(m: &mut Match, side: Side, spot: Coord) -> Result<()> {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let frame = Frame::for_side(m, side);
    let mut f = frame.to_frame(spot);
    f.x = f.x.clamp(0.0, w);
    f.y = f.y.clamp(0.0, h - 1.0);
    let band = FreeKickBand::classify(f.y, h)?;
    let spot = frame.to_pitch(f);

    let (outfield_advance, keeper_advance) = band.advance(h);
    if band == FreeKickBand::OwnHundred {
        // Own-byline free kicks shift the outfield along pitch y at either end.
        reset_side(m, side, 0.0);
        for r in outfield(m, side) {
            let origin = m.player(r).origin_pos;
            place_at(m, r, origin.offset(0.0, outfield_advance));
        }
    } else {
        reset_side(m, side, outfield_advance);
    }
    reset_side(m, side.other(), 0.0);
    let keeper = PlayerRef::new(side, 0);
    let keeper_origin = frame.to_frame(m.player(keeper).origin_pos);
    place_in_frame(m, &frame, keeper, keeper_origin.offset(0.0, keeper_advance));

    match band {
        FreeKickBand::UpperFinalQuarter => build_wall(m, side, &frame, f),
        FreeKickBand::FinalSixth => pack_box(m, side, &frame),
        _ => {}
    }

    m.stats_mut(side).free_kicks += 1;
    let kicker = by_distance(m, side, spot).first().copied();
    let line = format!("Free kick to {}", m.team(side).name);
    finish(m, kicker, spot, RestartKind::FreeKick { side, band }, line)
}

/// Four defenders shoulder to shoulder halfway between the ball and the goal,
/// keeper on the line.
fn build_wall(m: &mut Match, side: Side, frame: &Frame, ball: Coord) {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let mid = Coord::new((ball.x + w / 2.0) / 2.0, (ball.y + h) / 2.0);
    let mid_pitch = frame.to_pitch(mid);

    let mut defenders = outfield(m, side.other());
    defenders.sort_by(|&a, &b| {
        let da = m.player(a).current_pos.coord().map_or(f64::MAX, |c| c.distance_to(mid_pitch));
        let db = m.player(b).current_pos.coord().map_or(f64::MAX, |c| c.distance_to(mid_pitch));
        da.total_cmp(&db)
    });
    let centre = (restart::WALL_SIZE as f64 - 1.0) / 2.0;
    for (k, r) in defenders.into_iter().take(restart::WALL_SIZE).enumerate() {
        let x = mid.x + (k as f64 - centre) * restart::WALL_SPACING;
        place_in_frame(m, frame, r, Coord::new(x, mid.y));
    }
    place_in_frame(m, frame, PlayerRef::new(side.other(), 0), Coord::new(w / 2.0, h));
}

/// Attackers and defenders both crowd the box.
fn pack_box(m: &mut Match, side: Side, frame: &Frame) {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let attackers = outfield(m, side);
    let slots = box_slots(w, attackers.len());
    for (r, x) in attackers.into_iter().zip(slots) {
        place_in_frame(m, frame, r, Coord::new(x, h - h / 8.0));
    }
    let defenders = outfield(m, side.other());
    let slots = box_slots(w, defenders.len());
    for (r, x) in defenders.into_iter().zip(slots) {
        place_in_frame(m, frame, r, Coord::new(x + 4.0, h - h / 16.0));
    }
    place_in_frame(m, frame, PlayerRef::new(side.other(), 0), Coord::new(w / 2.0, h));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::fixture_match;
    use crate::models::Direction;

    #[test]
    fn test_band_edges() {
        let h = 1050.0;
        assert_eq!(FreeKickBand::classify(0.0, h).unwrap(), FreeKickBand::OwnHundred);
        assert_eq!(FreeKickBand::classify(100.5, h).unwrap(), FreeKickBand::OwnHundred);
        assert_eq!(FreeKickBand::classify(101.0, h).unwrap(), FreeKickBand::ToHalfway);
        assert_eq!(FreeKickBand::classify(526.0, h).unwrap(), FreeKickBand::BeyondHalfway);
        assert_eq!(FreeKickBand::classify(800.0, h).unwrap(), FreeKickBand::UpperFinalQuarter);
        assert_eq!(FreeKickBand::classify(1049.0, h).unwrap(), FreeKickBand::FinalSixth);
    }

    #[test]
    fn test_unreachable_band_is_an_error() {
        let err = FreeKickBand::classify(1050.0, 1050.0).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(FreeKickBand::classify(f64::NAN, 1050.0).is_err());
    }

    #[test]
    fn test_own_band_free_kick_for_bottom_team() {
        // The second team defends the bottom goal, so [340, 1040] is ten units from
        // its own byline and it attacks north.
        let mut m = fixture_match();
        setup(&mut m, Side::Second, Coord::new(340.0, 1040.0)).unwrap();

        assert_eq!(m.ball.direction, Direction::North);
        assert_eq!(m.ball.position, Coord::new(340.0, 1040.0));
        let keeper = &m.second_team.players[0];
        assert_eq!(keeper.current_pos.coord(), Some(keeper.origin_pos));

        let kicker = m.carrier().unwrap();
        assert_eq!(kicker.side, Side::Second);
        for (i, p) in m.second_team.players.iter().enumerate().skip(1) {
            if i == kicker.index {
                continue;
            }
            let shifted = p.origin_pos.offset(0.0, 100.0);
            assert_eq!(p.current_pos.coord(), Some(m.pitch_size.clamp(shifted)), "{}", p.name);
        }
        // Midfielders sit far enough from the byline to take the full shift.
        let midfielder = &m.second_team.players[6];
        assert_eq!(midfielder.current_pos.coord(), Some(Coord::new(450.0, 880.0)));
        assert!(matches!(
            m.pending_restart,
            Some(RestartKind::FreeKick { side: Side::Second, band: FreeKickBand::OwnHundred })
        ));
    }

    #[test]
    fn test_own_band_free_kick_for_top_team() {
        let mut m = fixture_match();
        setup(&mut m, Side::KickOff, Coord::new(340.0, 10.0)).unwrap();

        assert_eq!(m.ball.direction, Direction::South);
        let keeper = &m.kick_off_team.players[0];
        assert_eq!(keeper.current_pos.coord(), Some(keeper.origin_pos));
        let kicker = m.carrier().unwrap();
        for (i, p) in m.kick_off_team.players.iter().enumerate().skip(1) {
            if i != kicker.index {
                assert_eq!(p.current_pos.coord(), Some(p.origin_pos.offset(0.0, 100.0)), "{}", p.name);
            }
        }
    }

    #[test]
    fn test_wall_stands_between_ball_and_goal() {
        let mut m = fixture_match();
        // Kick-off team attacks the bottom goal; 800 is in the upper final quarter.
        setup(&mut m, Side::KickOff, Coord::new(340.0, 800.0)).unwrap();
        let wall: Vec<Coord> = m
            .second_team
            .players
            .iter()
            .filter_map(|p| p.current_pos.coord())
            .filter(|c| c.y == 925.0)
            .collect();
        assert_eq!(wall.len(), 4);
        assert!(wall.iter().all(|c| (c.x - 340.0).abs() <= 4.5));
    }
}
