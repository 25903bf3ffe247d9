//! Team tactics processor
//!
//! Walks one team's players in shirt order: decide an action, validate it, carry
//! it out. Processing stops as soon as an action ends the iteration.

use super::actions::{find_possible_actions, select_action, validate_action, Action};
use super::ball;
use super::collision::{self, TackleKind};
use super::movement::{dribble, move_towards};
use super::physics_constants::proximity;
use super::rng::SimContext;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side, SQUAD_SIZE};

/// Where the ball will be next: the head of its flight queue, or where it lies.
pub fn ball_target(m: &Match) -> Coord {
    m.ball
        .ball_over_iterations
        .front()
        .map_or(m.ball.position, |p| Coord::new(p[0], p[1]))
}

/// The player of each side closest to the ball's next point. Chasers run at the
/// ball; everyone else heads for their intent position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallChasers {
    kick_off: Option<PlayerRef>,
    second: Option<PlayerRef>,
}

impl BallChasers {
    pub fn find(m: &Match) -> Self {
        let target = ball_target(m);
        let closest = |side: Side| {
            m.team(side)
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_available() && !p.has_ball)
                .filter_map(|(i, p)| Some((p.current_pos.coord()?.distance_to(target), i)))
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, i)| PlayerRef::new(side, i))
        };
        Self { kick_off: closest(Side::KickOff), second: closest(Side::Second) }
    }

    pub fn is_chaser(&self, r: PlayerRef) -> bool {
        let chaser = match r.side {
            Side::KickOff => self.kick_off,
            Side::Second => self.second,
        };
        chaser == Some(r)
    }
}

/// Runs every available player of `side` until the iteration ends.
pub fn process_team(m: &mut Match, ctx: &mut SimContext, side: Side, chasers: &BallChasers) -> Result<()> {
    for index in 0..SQUAD_SIZE {
        if m.end_iteration {
            break;
        }
        let r = PlayerRef::new(side, index);
        if !m.player(r).is_available() {
            continue;
        }
        let action = decide(m, ctx, r)?;
        m.player_mut(r).action = Some(action);
        log::trace!("{} plays {}", m.player(r).name, action);

        perform(m, ctx, r, action, chasers)?;
        if !m.end_iteration {
            collision::collect_loose_ball(m, ctx, r)?;
        }
    }
    Ok(())
}

/// Forced restart action for the kicker, else a queued action, else a draw from
/// the weight tables; then the policy corrections.
fn decide(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<Action> {
    let pending = m.pending_restart.filter(|p| p.side() == r.side);
    if m.player(r).has_ball {
        if let Some(forced) = pending.and_then(|p| p.forced_action()) {
            return Ok(forced);
        }
    }

    let chosen = match m.player_mut(r).queued_action.take() {
        Some(action) => action,
        None => {
            let decision = find_possible_actions(m, r, ctx)?;
            if let Some(note) = decision.note {
                let line = format!("{}: {}", m.player(r).name, note);
                m.log(line);
            }
            select_action(ctx, &decision.weights)
        }
    };
    let action = validate_action(m, ctx, r, chosen);

    // Opponents stand off until a restart has been taken.
    let restart_for_other = m.pending_restart.map_or(false, |p| p.side() != r.side);
    if restart_for_other && action.is_defensive() {
        return Ok(Action::Run);
    }
    Ok(action)
}

fn perform(
    m: &mut Match,
    ctx: &mut SimContext,
    r: PlayerRef,
    action: Action,
    chasers: &BallChasers,
) -> Result<()> {
    match action {
        Action::Shoot => ball::shoot(m, ctx, r),
        Action::ThroughBall => ball::through_ball(m, ctx, r),
        Action::Pass => ball::pass(m, ctx, r),
        Action::Cross => ball::cross(m, ctx, r),
        Action::Cleared | Action::Boot => ball::clear(m, ctx, r, action),
        Action::Run | Action::Sprint => {
            let sprint = action == Action::Sprint;
            if m.player(r).has_ball {
                dribble(m, ctx, r, sprint)
            } else {
                let target = movement_target(m, r, chasers);
                move_towards(m, ctx, r, target, sprint)
            }
        }
        Action::Tackle | Action::Slide => {
            let Some(carrier) = m.carrier().filter(|c| c.side != r.side) else {
                let target = movement_target(m, r, chasers);
                return move_towards(m, ctx, r, target, false);
            };
            let target = m.player(carrier).pos()?;
            let close = proximity::BALL_CLOSE;
            if m.player(r).pos()?.within(target, close, close) {
                let kind = if action == Action::Slide { TackleKind::Slide } else { TackleKind::Standing };
                collision::resolve_tackle(m, ctx, r, kind)?;
                Ok(())
            } else {
                move_towards(m, ctx, r, target, true)
            }
        }
        Action::Intercept => {
            let target = ball_target(m);
            move_towards(m, ctx, r, target, true)
        }
    }
}

fn movement_target(m: &Match, r: PlayerRef, chasers: &BallChasers) -> Coord {
    if chasers.is_chaser(r) {
        ball_target(m)
    } else {
        m.player(r).intent_pos
    }
}
