//! Multi-step ball flight.
//!
//! A kick turns into a queue of trajectory points on the ball. One point is
//! consumed per iteration; every consumed step is tested for contact with the
//! players around it before the ball is allowed to move there.

use std::collections::VecDeque;

use crate::engine::actions::Action;
use crate::engine::collision::{self, Contact};
use crate::engine::common::{round, split_number_into_n};
use crate::engine::physics_constants::kick;
use crate::engine::rng::SimContext;
use crate::engine::set_pieces;
use crate::error::Result;
use crate::models::{Coord, Direction, Match, PlayerRef, TrajectoryPoint};

/// Builds the trajectory from `from` to `target`.
///
/// `steps = max(1, round(distance / uniform(2, 3)))`. Per-step movement in x, y and
/// height is split triangularly so the ball decelerates. Height climbs to the apex
/// `sqrt(|(d/2)^2 - (p/2)^2|)` and then falls back, never below zero. The final
/// point is the target itself, on the ground.
pub fn flight_path(
    ctx: &mut SimContext,
    from: Coord,
    target: Coord,
    power: f64,
) -> VecDeque<TrajectoryPoint> {
    let distance = from.distance_to(target);
    let step_length = ctx.uniform(kick::STEP_MIN, kick::STEP_MAX);
    let steps = round(distance / step_length, 0).max(1.0) as usize;

    let mut power = power;
    if distance >= power {
        power = power.floor() + distance.floor();
    }
    let apex = ((distance / 2.0).powi(2) - (power / 2.0).powi(2)).abs().sqrt();

    let xs = split_number_into_n(target.x - from.x, steps);
    let ys = split_number_into_n(target.y - from.y, steps);
    let hs = split_number_into_n(apex * 2.0, steps);

    let mut path = VecDeque::with_capacity(steps);
    let (mut x, mut y, mut h) = (from.x, from.y, 0.0);
    let mut rising = true;
    for i in 0..steps {
        x += xs[i];
        y += ys[i];
        if rising {
            h += hs[i];
            if h >= apex {
                h = apex;
                rising = false;
            }
        } else {
            h = (h - hs[i]).max(0.0);
        }
        path.push_back([x, y, h]);
    }
    if let Some(last) = path.back_mut() {
        *last = [target.x, target.y, 0.0];
    }
    path
}

/// Replaces the ball's queue with a flight to `target` from where it lies now.
pub fn plan_flight(m: &mut Match, ctx: &mut SimContext, target: Coord, power: f64) {
    let from = m.ball.position;
    m.ball.ball_over_iterations = flight_path(ctx, from, target, power);
    m.ball.direction = Direction::between(from, target);
    m.ball_intended = Some(target);
}

/// Strikes the ball from the carrier at `r` towards `target`, then resolves the
/// first step immediately.
pub fn kick(
    m: &mut Match,
    ctx: &mut SimContext,
    r: PlayerRef,
    target: Coord,
    power: f64,
    action: Action,
) -> Result<()> {
    let player = m.player(r);
    let from = player.pos()?;
    let (id, name) = (player.player_id, player.name.clone());
    let team_id = m.team(r.side).team_id;

    m.remove_ball_from_all_players();
    m.ball.position = from;
    m.ball.height = 0.0;
    m.set_last_touch(&name, id, team_id);
    m.ball.last_touch.action = Some(action);
    m.pending_restart = None;

    if matches!(action, Action::Pass | Action::ThroughBall | Action::Cross) {
        m.player_mut(r).stats.passes.total += 1;
    }

    plan_flight(m, ctx, target, power);
    log::trace!("{} kicks towards {} with power {:.1}", name, target, power);
    advance_ball(m, ctx, power)
}

/// Consumes the next queued point: contact test, then move or restart.
pub fn advance_ball(m: &mut Match, ctx: &mut SimContext, power: f64) -> Result<()> {
    let Some(point) = m.ball.ball_over_iterations.pop_front() else {
        return Ok(());
    };
    let from = m.ball.position;
    let to = Coord::new(point[0], point[1]);
    if to != from {
        m.ball.direction = Direction::between(from, to);
    }

    let exclude = m.ball.last_touch.player_id.and_then(|id| m.locate(id));
    let contact = collision::resolve_ball_movement(m, ctx, from, point, power, exclude)?;
    if contact != Contact::Clear {
        return Ok(());
    }

    m.ball.position = to;
    m.ball.height = point[2];
    if !m.pitch_size.contains(to) {
        set_pieces::keep_in_boundaries(m, ctx, to)?;
    }
    Ok(())
}

/// Length of the path still queued on the ball.
pub fn remaining_distance(m: &Match) -> f64 {
    let mut last = m.ball.position;
    let mut total = 0.0;
    for p in &m.ball.ball_over_iterations {
        let next = Coord::new(p[0], p[1]);
        total += last.distance_to(next);
        last = next;
    }
    total
}

/// Per-iteration ball update. A held ball rides with its carrier; a ball in
/// flight advances one point, carrying the power of the path still ahead.
pub fn move_ball(m: &mut Match, ctx: &mut SimContext) -> Result<()> {
    if m.ball.with_player {
        match m.carrier() {
            Some(r) => {
                m.ball.position = m.player(r).pos()?;
                m.ball.height = 0.0;
            }
            None => m.ball.release(),
        }
        return Ok(());
    }
    if !m.ball.is_moving() {
        return Ok(());
    }
    let residual = remaining_distance(m);
    advance_ball(m, ctx, residual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::test_fixtures::{fixture_match, loose_ball_at, with_ctx};
    use crate::models::Side;

    #[test]
    fn test_flight_path_ends_on_target_at_ground_level() {
        with_ctx(1, &EngineConfig::default(), |ctx| {
            let path = flight_path(ctx, Coord::new(100.0, 100.0), Coord::new(160.0, 340.0), 150.0);
            assert!(path.len() > 1);
            assert_eq!(path.back(), Some(&[160.0, 340.0, 0.0]));
            assert!(path.iter().all(|p| p[2] >= 0.0));
            let apex = path.iter().map(|p| p[2]).fold(0.0, f64::max);
            assert!(apex > 0.0);
        });
    }

    #[test]
    fn test_flight_path_decelerates() {
        with_ctx(2, &EngineConfig::default(), |ctx| {
            let path = flight_path(ctx, Coord::new(340.0, 100.0), Coord::new(340.0, 400.0), 200.0);
            let first = path[0][1] - 100.0;
            let late = path[path.len() - 2][1] - path[path.len() - 3][1];
            assert!(first > late);
        });
    }

    #[test]
    fn test_zero_distance_flight_has_one_step() {
        with_ctx(3, &EngineConfig::default(), |ctx| {
            let c = Coord::new(50.0, 50.0);
            let path = flight_path(ctx, c, c, 80.0);
            assert_eq!(path.len(), 1);
            assert_eq!(path[0], [50.0, 50.0, 0.0]);
        });
    }

    #[test]
    fn test_kick_releases_possession_and_queues_flight() {
        let mut m = fixture_match();
        let r = m.carrier().unwrap();
        // Empty space ahead so nobody can reach the first step.
        let target = Coord::new(340.0, 700.0);
        with_ctx(4, &EngineConfig::test(), |ctx| {
            kick(&mut m, ctx, r, target, 120.0, Action::Boot).unwrap();
        });
        assert!(m.carrier().is_none());
        assert_eq!(m.ball.last_touch.action, Some(Action::Boot));
        assert_eq!(m.ball_intended, Some(target));
    }

    #[test]
    fn test_held_ball_follows_carrier() {
        let mut m = fixture_match();
        let r = m.carrier().unwrap();
        m.player_mut(r).set_pos(Coord::new(300.0, 530.0));
        with_ctx(5, &EngineConfig::default(), |ctx| move_ball(&mut m, ctx).unwrap());
        assert_eq!(m.ball.position, Coord::new(300.0, 530.0));
    }

    #[test]
    fn test_ball_running_out_restarts_play() {
        let mut m = fixture_match();
        loose_ball_at(&mut m, Coord::new(5.0, 300.0));
        let kicker = m.kick_off_team.players[1].clone();
        m.set_last_touch(&kicker.name, kicker.player_id, m.kick_off_team.team_id);
        m.ball.ball_over_iterations.push_back([-4.0, 300.0, 0.0]);
        with_ctx(6, &EngineConfig::test(), |ctx| move_ball(&mut m, ctx).unwrap());
        assert!(m.end_iteration);
        let thrower = m.carrier().unwrap();
        assert_eq!(thrower.side, Side::Second);
        assert_eq!(m.ball.position.x, 0.0);
    }
}
