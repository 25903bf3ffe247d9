//! Boundary and set-piece state machine
//!
//! When the ball leaves the pitch, or a foul or offside stops play, one restart
//! routine repositions all 22 players, hands the ball to a single kicker and sets
//! `end_iteration`. Ball movement resumes on the next iteration with the action
//! the restart forces on the kicker.
//!
//! Every routine is written once in the kicking team's attacking frame (see
//! [`Frame`]) so the top and bottom variants share code.

mod corner;
mod free_kick;
mod goal;
mod goal_kick;
mod kick_off;
mod penalty;
mod throw_in;

pub use free_kick::FreeKickBand;
pub use goal::score_goal;
pub use kick_off::kick_off;

use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::frame::Frame;
use super::physics_constants::restart;
use super::rng::SimContext;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side};

/// Goal end of the pitch: `Top` is the `y = 0` byline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Top,
    Bottom,
}

impl End {
    /// The end a team attacks.
    pub fn attacked_by(frame: &Frame) -> End {
        if frame.is_flipped() {
            End::Top
        } else {
            End::Bottom
        }
    }
}

/// `Left` is the `x = 0` touchline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Touchline {
    Left,
    Right,
}

/// A stoppage and the side that restarts play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RestartKind {
    KickOff { side: Side },
    ThrowIn { side: Side, touchline: Touchline },
    Corner { side: Side, end: End, touchline: Touchline },
    GoalKick { side: Side, end: End },
    /// `side` scored at `end`.
    Goal { side: Side, end: End },
    FreeKick { side: Side, band: FreeKickBand },
    Penalty { side: Side, end: End },
}

impl RestartKind {
    pub fn side(&self) -> Side {
        match *self {
            RestartKind::KickOff { side }
            | RestartKind::ThrowIn { side, .. }
            | RestartKind::Corner { side, .. }
            | RestartKind::GoalKick { side, .. }
            | RestartKind::Goal { side, .. }
            | RestartKind::FreeKick { side, .. }
            | RestartKind::Penalty { side, .. } => side,
        }
    }

    /// Action the kicker must play when the restart is taken.
    pub fn forced_action(&self) -> Option<Action> {
        match self {
            RestartKind::KickOff { .. } | RestartKind::ThrowIn { .. } => Some(Action::Pass),
            RestartKind::Corner { .. } => Some(Action::Cross),
            RestartKind::GoalKick { .. } => Some(Action::Boot),
            RestartKind::Penalty { .. } => Some(Action::Shoot),
            RestartKind::FreeKick { band, .. } => Some(band.forced_action()),
            RestartKind::Goal { .. } => None,
        }
    }
}

/// Classifies a resting point off the pitch. `kicking` is the side that last
/// touched the ball. Returns `None` while the point is on the pitch.
pub fn decide_restart(m: &Match, point: Coord, kicking: Side) -> Option<RestartKind> {
    let pitch = &m.pitch_size;
    if point.x < 0.0 || point.x > pitch.width {
        let touchline = if point.x < 0.0 { Touchline::Left } else { Touchline::Right };
        return Some(RestartKind::ThrowIn { side: kicking.other(), touchline });
    }

    let end = if point.y < 0.0 {
        End::Top
    } else if point.y > pitch.height {
        End::Bottom
    } else {
        return None;
    };
    let defending = Side::BOTH
        .into_iter()
        .find(|&s| m.team(s).defends_top(pitch.height) == (end == End::Top))
        .unwrap_or(Side::KickOff);
    let attacking = defending.other();

    let (post_lo, post_hi) = pitch.goal_mouth();
    if point.x >= post_lo && point.x <= post_hi {
        return Some(RestartKind::Goal { side: attacking, end });
    }
    if kicking == defending {
        let touchline = if point.x < pitch.width / 2.0 { Touchline::Left } else { Touchline::Right };
        Some(RestartKind::Corner { side: attacking, end, touchline })
    } else {
        Some(RestartKind::GoalKick { side: defending, end })
    }
}

/// Ball reached `point` outside the pitch: run the matching restart.
pub fn keep_in_boundaries(m: &mut Match, ctx: &mut SimContext, point: Coord) -> Result<()> {
    let kicking = m.last_touch_side();
    let Some(restart) = decide_restart(m, point, kicking) else {
        return Ok(());
    };
    m.remove_ball_from_all_players();
    m.ball.ball_over_iterations.clear();
    log::debug!("ball out at {}: {:?}", point, restart);

    match restart {
        RestartKind::ThrowIn { side, touchline } => throw_in::setup(m, side, touchline, point),
        RestartKind::Corner { side, end, touchline } => corner::setup(m, side, end, touchline),
        RestartKind::GoalKick { side, end } => goal_kick::setup(m, side, end),
        RestartKind::Goal { side, end } => score_goal(m, ctx, side, end),
        RestartKind::KickOff { side } => kick_off(m, ctx, side),
        RestartKind::FreeKick { side, .. } => free_kick::setup(m, side, point),
        RestartKind::Penalty { side, .. } => penalty::setup(m, side),
    }
}

/// A foul against `fouled` at `spot`: penalty inside the award zone of the box
/// `fouled` attacks, free kick anywhere else.
pub fn award_foul(m: &mut Match, fouled: Side, spot: Coord) -> Result<()> {
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);
    let f = Frame::for_side(m, fouled).to_frame(spot);
    let inset = w / 4.0 + restart::PENALTY_ZONE_INSET;
    let in_zone = f.x >= inset && f.x <= w - inset && f.y > h - h / 6.0 - 7.0 && f.y < h + 1.0;
    if in_zone {
        penalty::setup(m, fouled)
    } else {
        free_kick(m, fouled, spot)
    }
}

/// Free kick to `side` at `spot`, used for fouls outside the box and offside.
pub fn free_kick(m: &mut Match, side: Side, spot: Coord) -> Result<()> {
    free_kick::setup(m, side, spot)
}

// ============================================================
// Shared repositioning helpers
// ============================================================

/// Every active player of `side` back to origin, moved `advance` units forward.
fn reset_side(m: &mut Match, side: Side, advance: f64) {
    let frame = Frame::for_side(m, side);
    let pitch = m.pitch_size;
    for p in m.team_mut(side).players.iter_mut() {
        if !p.current_pos.is_active() {
            continue;
        }
        let origin = frame.to_frame(p.origin_pos);
        p.set_pos(pitch.clamp(frame.to_pitch(origin.offset(0.0, advance))));
    }
}

/// Places `r` at pitch coordinate `c`. Removed players stay removed.
fn place_at(m: &mut Match, r: PlayerRef, c: Coord) {
    let c = m.pitch_size.clamp(c);
    let player = m.player_mut(r);
    if player.current_pos.is_active() {
        player.set_pos(c);
    }
}

/// Places `r` at `c` given in the frame of `frame`.
fn place_in_frame(m: &mut Match, frame: &Frame, r: PlayerRef, c: Coord) {
    place_at(m, r, frame.to_pitch(c));
}

/// Available outfield players of `side` in shirt order.
fn outfield(m: &Match, side: Side) -> Vec<PlayerRef> {
    m.team(side)
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_available() && !p.is_goalkeeper())
        .map(|(i, _)| PlayerRef::new(side, i))
        .collect()
}

/// Available outfield players of `side`, closest to `spot` first. Keepers are
/// appended last so a side always finds a kicker while anyone is fit.
fn by_distance(m: &Match, side: Side, spot: Coord) -> Vec<PlayerRef> {
    let mut refs: Vec<(bool, f64, PlayerRef)> = m
        .team(side)
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_available())
        .filter_map(|(i, p)| {
            let c = p.current_pos.coord()?;
            Some((p.is_goalkeeper(), c.distance_to(spot), PlayerRef::new(side, i)))
        })
        .collect();
    refs.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    refs.into_iter().map(|(_, _, r)| r).collect()
}

/// x positions spread evenly across the width of the penalty box.
fn box_slots(width: f64, n: usize) -> impl Iterator<Item = f64> {
    let left = width / 4.0;
    let span = width / 2.0;
    (0..n).map(move |k| left + span * (k + 1) as f64 / (n + 1) as f64)
}

/// Hands the ball to `kicker` at `spot` and closes the iteration on `restart`.
fn finish(
    m: &mut Match,
    kicker: Option<PlayerRef>,
    spot: Coord,
    restart: RestartKind,
    line: String,
) -> Result<()> {
    let spot = m.pitch_size.clamp(spot);
    for r in Match::all_refs() {
        m.player_mut(r).offside = false;
    }
    match kicker {
        Some(k) => {
            m.player_mut(k).set_pos(spot);
            m.give_ball_to(k)?;
            m.ball.direction = Frame::for_side(m, restart.side()).attack_direction();
            m.pending_restart = Some(restart);
        }
        None => {
            m.remove_ball_from_all_players();
            m.ball.position = spot;
            m.pending_restart = None;
        }
    }
    m.ball_intended = None;
    m.end_iteration = true;
    log::debug!("{}", line);
    m.log(line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::test_fixtures::{fixture_match, with_ctx};
    use crate::models::Direction;

    #[test]
    fn test_touchline_gives_throw_in_to_other_side() {
        let m = fixture_match();
        assert_eq!(
            decide_restart(&m, Coord::new(-2.0, 400.0), Side::KickOff),
            Some(RestartKind::ThrowIn { side: Side::Second, touchline: Touchline::Left })
        );
        assert_eq!(
            decide_restart(&m, Coord::new(690.0, 400.0), Side::Second),
            Some(RestartKind::ThrowIn { side: Side::KickOff, touchline: Touchline::Right })
        );
        assert_eq!(decide_restart(&m, Coord::new(300.0, 400.0), Side::Second), None);
    }

    #[test]
    fn test_byline_restarts() {
        let m = fixture_match();
        // The kick-off team defends the top goal.
        assert_eq!(
            decide_restart(&m, Coord::new(340.0, -1.0), Side::Second),
            Some(RestartKind::Goal { side: Side::Second, end: End::Top })
        );
        assert_eq!(
            decide_restart(&m, Coord::new(340.0, 1051.0), Side::KickOff),
            Some(RestartKind::Goal { side: Side::KickOff, end: End::Bottom })
        );
        assert_eq!(
            decide_restart(&m, Coord::new(100.0, -1.0), Side::KickOff),
            Some(RestartKind::Corner { side: Side::Second, end: End::Top, touchline: Touchline::Left })
        );
        assert_eq!(
            decide_restart(&m, Coord::new(600.0, 1060.0), Side::KickOff),
            Some(RestartKind::GoalKick { side: Side::Second, end: End::Bottom })
        );
    }

    #[test]
    fn test_restart_serializes_with_kind_tag() {
        let r = RestartKind::Corner { side: Side::KickOff, end: End::Bottom, touchline: Touchline::Right };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"kind":"corner","side":"KickOff","end":"bottom","touchline":"right"}"#);
    }

    #[test]
    fn test_forced_actions() {
        let corner = RestartKind::Corner { side: Side::Second, end: End::Top, touchline: Touchline::Left };
        assert_eq!(corner.forced_action(), Some(Action::Cross));
        let goal_kick = RestartKind::GoalKick { side: Side::Second, end: End::Top };
        assert_eq!(goal_kick.forced_action(), Some(Action::Boot));
        assert_eq!(RestartKind::Penalty { side: Side::KickOff, end: End::Bottom }.forced_action(), Some(Action::Shoot));
        assert_eq!(RestartKind::Goal { side: Side::KickOff, end: End::Bottom }.forced_action(), None);
    }

    #[test]
    fn test_foul_in_zone_is_penalty() {
        let mut m = fixture_match();
        award_foul(&mut m, Side::KickOff, Coord::new(340.0, 1000.0)).unwrap();
        assert!(matches!(m.pending_restart, Some(RestartKind::Penalty { side: Side::KickOff, end: End::Bottom })));
        assert_eq!(m.kick_off_team_statistics.penalties, 1);
    }

    #[test]
    fn test_foul_outside_zone_is_free_kick() {
        let mut m = fixture_match();
        // Inside the box but wide of the award zone.
        award_foul(&mut m, Side::KickOff, Coord::new(172.0, 1000.0)).unwrap();
        assert!(matches!(m.pending_restart, Some(RestartKind::FreeKick { side: Side::KickOff, .. })));
        assert_eq!(m.kick_off_team_statistics.free_kicks, 1);
        assert_eq!(m.ball.direction, Direction::South);
    }

    fn restart_after_foul(fouled: Side, spot: Coord) -> Option<RestartKind> {
        let mut m = fixture_match();
        award_foul(&mut m, fouled, spot).unwrap();
        m.pending_restart
    }

    #[test]
    fn test_award_zone_edges_attacking_bottom() {
        // Zone for 680x1050: x in [175, 505], y in (868, 1051).
        let penalty = |spot| matches!(restart_after_foul(Side::KickOff, spot), Some(RestartKind::Penalty { .. }));
        assert!(penalty(Coord::new(175.0, 1000.0)));
        assert!(penalty(Coord::new(505.0, 869.0)));
        assert!(!penalty(Coord::new(174.9, 1000.0)));
        assert!(!penalty(Coord::new(505.1, 1000.0)));
        assert!(!penalty(Coord::new(340.0, 868.0)));
        assert!(matches!(
            restart_after_foul(Side::KickOff, Coord::new(174.9, 1000.0)),
            Some(RestartKind::FreeKick { side: Side::KickOff, .. })
        ));
    }

    #[test]
    fn test_award_zone_edges_attacking_top() {
        // Mirrored zone: x in [175, 505], y in (-1, 182).
        let penalty = |spot| matches!(restart_after_foul(Side::Second, spot), Some(RestartKind::Penalty { .. }));
        assert!(penalty(Coord::new(175.0, 50.0)));
        assert!(penalty(Coord::new(340.0, 181.0)));
        assert!(penalty(Coord::new(505.0, 0.0)));
        assert!(!penalty(Coord::new(174.9, 50.0)));
        assert!(!penalty(Coord::new(340.0, 182.0)));
        assert!(matches!(
            restart_after_foul(Side::Second, Coord::new(340.0, 182.0)),
            Some(RestartKind::FreeKick { side: Side::Second, .. })
        ));
        assert!(matches!(
            restart_after_foul(Side::Second, Coord::new(340.0, 100.0)),
            Some(RestartKind::Penalty { side: Side::Second, end: End::Top })
        ));
    }

    #[test]
    fn test_restart_leaves_single_carrier_on_kicking_side() {
        let mut m = fixture_match();
        with_ctx(3, &EngineConfig::test(), |ctx| {
            keep_in_boundaries(&mut m, ctx, Coord::new(700.0, 300.0)).unwrap()
        });
        assert_eq!(m.carrier_count(), 1);
        assert!(m.end_iteration);
        assert_eq!(m.iteration_log.len(), 1);
    }
}
