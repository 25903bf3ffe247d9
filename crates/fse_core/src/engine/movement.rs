//! Player steps: running, sprinting and dribbling.
//!
//! Steps are per axis, so a diagonal run covers more ground than a straight one,
//! matching the rectangular proximity windows used everywhere else.

use super::frame::Frame;
use super::rng::SimContext;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef};

/// Moves `from` up to `step` units per axis towards `to`, never overshooting.
pub fn step_towards(from: Coord, to: Coord, step: f64) -> Coord {
    let dx = (to.x - from.x).clamp(-step, step);
    let dy = (to.y - from.y).clamp(-step, step);
    from.offset(dx, dy)
}

fn step_length(ctx: &SimContext, fitness: f64, sprint: bool) -> f64 {
    let physics = &ctx.config.physics;
    let step = if sprint { physics.sprint_step } else { physics.run_step };
    if fitness < physics.tired_threshold {
        step / 2.0
    } else {
        step
    }
}

fn tire(ctx: &SimContext, fitness: f64, sprint: bool) -> f64 {
    let physics = &ctx.config.physics;
    let cost = if sprint { physics.sprint_fitness_cost } else { physics.run_fitness_cost };
    (fitness - cost).max(0.0)
}

/// Runs or sprints `r` towards `target`. A carrier takes the ball along.
pub fn move_towards(m: &mut Match, ctx: &SimContext, r: PlayerRef, target: Coord, sprint: bool) -> Result<()> {
    let pitch = m.pitch_size;
    let player = m.player(r);
    let here = player.pos()?;
    let step = step_length(ctx, player.fitness, sprint);
    let fitness = tire(ctx, player.fitness, sprint);
    let next = pitch.clamp(step_towards(here, target, step));

    let player = m.player_mut(r);
    player.set_pos(next);
    player.fitness = fitness;
    if player.has_ball {
        m.ball.position = next;
    }
    Ok(())
}

/// Carries the ball forward in the attacking direction.
pub fn dribble(m: &mut Match, ctx: &mut SimContext, r: PlayerRef, sprint: bool) -> Result<()> {
    let frame = Frame::for_side(m, r.side);
    let physics = &ctx.config.physics;
    let (lo, hi) = if sprint { physics.dribble_sprint_step } else { physics.dribble_step };
    let player = m.player(r);
    let here = player.pos()?;
    let mut advance = ctx.uniform(lo, hi);
    if player.fitness < ctx.config.physics.tired_threshold {
        advance /= 2.0;
    }
    let fitness = tire(ctx, player.fitness, sprint);
    let next = m.pitch_size.clamp(here.offset(0.0, advance * frame.forward()));

    let player = m.player_mut(r);
    player.set_pos(next);
    player.fitness = fitness;
    if player.has_ball {
        m.ball.position = next;
        m.ball.direction = frame.attack_direction();
    }
    Ok(())
}
