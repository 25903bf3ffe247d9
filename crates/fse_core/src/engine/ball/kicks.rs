//! Ball actions of the carrier: shots, passes, through balls, crosses and
//! clearances.

use super::directions::{apply, kick_offset, pick_direction};
use super::flight::kick;
use crate::engine::actions::Action;
use crate::engine::common::calculate_power;
use crate::engine::frame::Frame;
use crate::engine::physics_constants::{kick as kick_consts, skills};
use crate::engine::rng::SimContext;
use crate::engine::set_pieces::RestartKind;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef};

/// Shot at the goal the carrier attacks. On target lands inside the goal mouth just
/// past the byline; off target lands wide of a post.
pub fn shoot(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let penalty = matches!(m.pending_restart, Some(RestartKind::Penalty { .. }));
    let player = m.player(r);
    let skill = if penalty { player.skill.penalty_taking } else { player.skill.shooting };
    let strength = player.skill.strength;
    let name = player.name.clone();

    let (post_lo, post_hi) = m.pitch_size.goal_mouth();
    let on_target = skill > ctx.uniform(0.0, skills::SHOT_ROLL);
    let x = if on_target {
        ctx.uniform(post_lo + 1.0, post_hi - 1.0)
    } else if ctx.percent(50.0) {
        post_lo - ctx.uniform(1.0, kick_consts::WIDE_MISS)
    } else {
        post_hi + ctx.uniform(1.0, kick_consts::WIDE_MISS)
    };
    let target = frame.to_pitch(Coord::new(x, m.pitch_size.height + 1.0));

    let shots = &mut m.player_mut(r).stats.shots;
    shots.total += 1;
    if on_target {
        shots.on += 1;
    } else {
        shots.off += 1;
    }
    let team_shots = &mut m.stats_mut(r.side).shots;
    team_shots.total += 1;
    if on_target {
        team_shots.on += 1;
    } else {
        team_shots.off += 1;
    }

    let verb = if penalty { "takes the penalty" } else { "shoots" };
    m.log(format!("{} {} {}", name, verb, if on_target { "on target" } else { "wide" }));
    log::debug!("{} shot, on target: {}", name, on_target);

    let power = calculate_power(ctx, strength);
    kick(m, ctx, r, target, power, Action::Shoot)
}

/// Pass to the nearest teammate ahead, else the nearest teammate, else an
/// untargeted kick. Accuracy falls with passing skill.
pub fn pass(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let here = m.player(r).pos()?;
    let own_fy = frame.y(here.y);

    let mut ahead: Option<(f64, Coord)> = None;
    let mut any: Option<(f64, Coord)> = None;
    for (i, mate) in m.team(r.side).players.iter().enumerate() {
        if i == r.index || !mate.is_available() {
            continue;
        }
        let Some(c) = mate.current_pos.coord() else { continue };
        let d = here.distance_to(c);
        if any.map_or(true, |(best, _)| d < best) {
            any = Some((d, c));
        }
        if frame.y(c.y) > own_fy && ahead.map_or(true, |(best, _)| d < best) {
            ahead = Some((d, c));
        }
    }

    let player = m.player(r);
    let (name, passing, strength) = (player.name.clone(), player.skill.passing, player.skill.strength);
    let power = calculate_power(ctx, strength);
    let target = match ahead.or(any) {
        Some((_, c)) => {
            let spread = (100.0 - passing).max(0.0) / kick_consts::PASS_ERROR_DIVISOR;
            c.offset(ctx.uniform(-spread, spread), ctx.uniform(-spread, spread))
        }
        None => {
            let d = pick_direction(ctx, &frame, false);
            apply(ctx, here, kick_offset(d), power)
        }
    };
    m.log(format!("{} passes the ball", name));
    kick(m, ctx, r, target, power, Action::Pass)
}

/// Ball into space ahead of the most advanced teammate.
pub fn through_ball(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let here = m.player(r).pos()?;

    let runner = m
        .team(r.side)
        .players
        .iter()
        .enumerate()
        .filter(|(i, p)| *i != r.index && p.is_available() && !p.is_goalkeeper())
        .filter_map(|(_, p)| p.current_pos.coord())
        .map(|c| frame.to_frame(c))
        .max_by(|a, b| a.y.total_cmp(&b.y));

    let player = m.player(r);
    let (name, strength) = (player.name.clone(), player.skill.strength);
    let power = calculate_power(ctx, strength);
    let target = match runner {
        Some(run) => {
            let (lo, hi) = kick_consts::THROUGH_BALL_LEAD;
            let lead = ctx.uniform(lo, hi);
            m.pitch_size.clamp(frame.to_pitch(run.offset(0.0, lead)))
        }
        None => {
            let d = pick_direction(ctx, &frame, true);
            apply(ctx, here, kick_offset(d), power)
        }
    };
    m.log(format!("{} plays a through ball", name));
    kick(m, ctx, r, target, power, Action::ThroughBall)
}

/// Cross into the far half of the opposition penalty box.
pub fn cross(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let here = m.player(r).pos()?;
    let (w, h) = (m.pitch_size.width, m.pitch_size.height);

    let x = if here.x < w / 2.0 {
        ctx.uniform(w / 2.0, w - w / 4.0)
    } else {
        ctx.uniform(w / 4.0, w / 2.0)
    };
    let fy = ctx.uniform(h - h / 6.0, h - h / 20.0);
    let target = frame.to_pitch(Coord::new(x, fy));

    let player = m.player(r);
    let (name, strength) = (player.name.clone(), player.skill.strength);
    let power = calculate_power(ctx, strength);
    m.log(format!("{} crosses the ball", name));
    kick(m, ctx, r, target, power, Action::Cross)
}

/// Untargeted kick drawn from the compass pools. `boot` only goes long.
pub fn clear(m: &mut Match, ctx: &mut SimContext, r: PlayerRef, action: Action) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let here = m.player(r).pos()?;
    let player = m.player(r);
    let (name, strength) = (player.name.clone(), player.skill.strength);

    let power = calculate_power(ctx, strength);
    let direction = pick_direction(ctx, &frame, action == Action::Boot);
    let target = apply(ctx, here, kick_offset(direction), power);
    m.log(format!("{} clears the ball {}", name, direction.name()));
    kick(m, ctx, r, target, power, action)
}
