//! Collision, possession and tackle resolution
//!
//! Every ball step is checked against the closest player of each side. Keepers try
//! to save, opponents deflect or intercept, teammates collect. Tackles share one
//! routine parameterised by [`TackleRules`].

use super::actions::Action;
use super::ball::{apply, deflection_offset, plan_flight};
use super::common::{in_either_penalty_box, is_between, is_injured};
use super::config::TackleRules;
use super::injury::injure;
use super::physics_constants::skills;
use super::rng::SimContext;
use super::set_pieces;
use crate::error::Result;
use crate::models::{Coord, Match, PlayerRef, Side, Skill, TrajectoryPoint};

/// What a ball step ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nobody touched the ball.
    Clear,
    Taken(PlayerRef),
    Saved(PlayerRef),
    Deflected(PlayerRef),
    /// The receiver was offside; play restarted with a free kick.
    Offside(PlayerRef),
}

/// Closest available player of `side` who can reach the ball at `at`, with the
/// larger axis gap as the distance. Keepers reach further.
fn reaching_player(
    m: &Match,
    ctx: &SimContext,
    side: Side,
    at: Coord,
    height: f64,
    exclude: &[PlayerRef],
) -> Option<(PlayerRef, f64)> {
    let physics = &ctx.config.physics;
    let mut best: Option<(PlayerRef, f64)> = None;
    for (index, player) in m.team(side).players.iter().enumerate() {
        let r = PlayerRef::new(side, index);
        if exclude.contains(&r) || !player.is_available() {
            continue;
        }
        let Some(c) = player.current_pos.coord() else { continue };
        let reach = if player.is_goalkeeper() { physics.save_box } else { physics.reach };
        if !c.within(at, reach, reach) || height > player.skill.jumping {
            continue;
        }
        let (dx, dy) = c.proximity_to(at);
        let gap = dx.max(dy);
        if best.map_or(true, |(_, g)| gap < g) {
            best = Some((r, gap));
        }
    }
    best
}

/// Points on the straight segment from `from` to `to`, at most `spacing` apart,
/// with the height interpolated between both ends.
fn contact_samples(from: TrajectoryPoint, to: TrajectoryPoint, spacing: f64) -> Vec<TrajectoryPoint> {
    let distance = Coord::new(from[0], from[1]).distance_to(Coord::new(to[0], to[1]));
    let steps = (distance / spacing.max(1.0)).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            [
                from[0] + (to[0] - from[0]) * t,
                from[1] + (to[1] - from[1]) * t,
                from[2] + (to[2] - from[2]) * t,
            ]
        })
        .collect()
}

/// Tests every sample between `from` and `point` for contact, in flight order.
/// `power` is the power the ball still carries.
pub fn resolve_ball_movement(
    m: &mut Match,
    ctx: &mut SimContext,
    from: Coord,
    point: TrajectoryPoint,
    power: f64,
    exclude: Option<PlayerRef>,
) -> Result<Contact> {
    let kicking = m.last_touch_side();
    let samples = contact_samples([from.x, from.y, m.ball.height], point, ctx.config.physics.reach);

    let mut skip: Vec<PlayerRef> = exclude.into_iter().collect();
    for sample in samples {
        let at = Coord::new(sample[0], sample[1]);
        let ours = reaching_player(m, ctx, kicking, at, sample[2], &skip);
        let theirs = reaching_player(m, ctx, kicking.other(), at, sample[2], &skip);
        let winner = match (ours, theirs) {
            (Some((a, ga)), Some((_, gb))) if ga <= gb => a,
            (_, Some((b, _))) => b,
            (Some((a, _)), None) => a,
            (None, None) => continue,
        };

        if winner.side == kicking {
            return take_possession(m, ctx, winner);
        }
        if m.player(winner).is_goalkeeper() {
            if attempt_save(m, ctx, winner, at)? {
                return Ok(Contact::Saved(winner));
            }
            skip.push(winner);
            continue;
        }
        return deflect(m, ctx, winner, from, at, power);
    }
    Ok(Contact::Clear)
}

/// Skill roll against `uniform(0, 100)`. A save inside either box is counted.
fn attempt_save(m: &mut Match, ctx: &mut SimContext, keeper: PlayerRef, at: Coord) -> Result<bool> {
    let saving = m.player(keeper).skill.saving;
    if saving <= ctx.uniform(0.0, skills::SAVE_ROLL) {
        return Ok(false);
    }
    m.give_ball_to(keeper)?;
    if in_either_penalty_box(at, &m.pitch_size) {
        m.player_mut(keeper).stats.saves += 1;
    }
    m.end_iteration = true;
    let name = m.player(keeper).name.clone();
    m.log(format!("{} makes a save", name));
    log::debug!("save by {}", name);
    Ok(true)
}

/// An opponent in the ball's path. Weak balls are controlled; strong ones rebound
/// off the player along the incoming direction.
fn deflect(
    m: &mut Match,
    ctx: &mut SimContext,
    r: PlayerRef,
    from: Coord,
    at: Coord,
    power: f64,
) -> Result<Contact> {
    let residual = power - from.distance_to(at);
    if residual < ctx.config.physics.deflection_control_power {
        return take_possession(m, ctx, r);
    }

    let player = m.player(r);
    let (id, name, here) = (player.player_id, player.name.clone(), player.pos()?);
    let team_id = m.team(r.side).team_id;
    m.ball.position = at;
    m.ball.height = 0.0;
    m.set_last_touch(&name, id, team_id);
    let target = apply(ctx, here, deflection_offset(m.ball.direction), residual);
    plan_flight(m, ctx, target, residual);
    m.log(format!("{} deflects the ball", name));
    Ok(Contact::Deflected(r))
}

/// Hands the ball to `r`, settling pass statistics of the last kick. A receiver
/// caught offside from a teammate's kick concedes an indirect free kick instead.
pub fn take_possession(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<Contact> {
    let passer = m.ball.last_touch.player_id.and_then(|id| m.locate(id)).filter(|&p| p != r);
    let kicked = m.ball.last_touch.action;

    if let Some(p) = passer {
        if matches!(kicked, Some(Action::Pass | Action::ThroughBall | Action::Cross)) {
            let passes = &mut m.player_mut(p).stats.passes;
            if p.side == r.side {
                passes.on += 1;
            } else {
                passes.off += 1;
            }
        }
    }

    let from_teammate = passer.map_or(false, |p| p.side == r.side);
    let name = m.player(r).name.clone();
    if ctx.config.rules.offside_enabled && m.player(r).offside && from_teammate && kicked.is_some() {
        let spot = m.player(r).pos()?;
        m.log(format!("{} is offside", name));
        log::debug!("offside against {}", name);
        set_pieces::free_kick(m, r.side.other(), spot)?;
        return Ok(Contact::Offside(r));
    }

    let turnover = passer.map_or(false, |p| p.side != r.side);
    m.give_ball_to(r)?;
    if turnover {
        m.end_iteration = true;
        m.log(format!("{} intercepts the ball", name));
    }
    Ok(Contact::Taken(r))
}

/// Picks up a ball lying still within reach.
pub fn collect_loose_ball(m: &mut Match, ctx: &mut SimContext, r: PlayerRef) -> Result<bool> {
    if m.ball.with_player || m.ball.is_moving() || !m.player(r).is_available() {
        return Ok(false);
    }
    let reach = ctx.config.physics.reach;
    if !m.player(r).pos()?.within(m.ball.position, reach, reach) {
        return Ok(false);
    }
    take_possession(m, ctx, r)?;
    Ok(true)
}

// ============================================================
// Tackles
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TackleKind {
    Standing,
    Slide,
}

impl TackleKind {
    fn rules(self, ctx: &SimContext) -> TackleRules {
        match self {
            TackleKind::Standing => ctx.config.rules.standing_tackle,
            TackleKind::Slide => ctx.config.rules.slide_tackle,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            TackleKind::Standing => "tackle",
            TackleKind::Slide => "slide tackle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TackleOutcome {
    Won,
    Lost,
    Foul,
    /// No opposing carrier to tackle.
    Missed,
}

/// `(floor(tackling) + floor(strength)) / 2 ± variance`
pub fn calc_tackle_score(ctx: &mut SimContext, skill: &Skill, variance: f64) -> f64 {
    (skill.tackling.floor() + skill.strength.floor()) / 2.0 + ctx.uniform(-variance, variance)
}

/// `(floor(agility) + floor(strength)) / 2 ± variance`
pub fn calc_retention_score(ctx: &mut SimContext, skill: &Skill, variance: f64) -> f64 {
    (skill.agility.floor() + skill.strength.floor()) / 2.0 + ctx.uniform(-variance, variance)
}

/// Foul when `random_int(0, draw)` falls strictly inside `(0, window / 2 - 1)`.
pub fn was_foul(ctx: &mut SimContext, draw: i64, window: i64) -> bool {
    let roll = ctx.random_int(0, draw);
    is_between(roll as f64, 0.0, (window / 2 - 1) as f64)
}

/// Tackle by `tackler` on the opposing carrier. The foul check comes first; then
/// the tackler must beat the carrier's retention score outright.
pub fn resolve_tackle(
    m: &mut Match,
    ctx: &mut SimContext,
    tackler: PlayerRef,
    kind: TackleKind,
) -> Result<TackleOutcome> {
    let Some(carrier) = m.carrier().filter(|c| c.side != tackler.side) else {
        return Ok(TackleOutcome::Missed);
    };
    let rules = kind.rules(ctx);
    let tackler_name = m.player(tackler).name.clone();
    let carrier_name = m.player(carrier).name.clone();
    m.player_mut(tackler).stats.tackles.total += 1;

    if was_foul(ctx, rules.foul_draw, rules.foul_window) {
        let spot = m.player(carrier).pos()?;
        m.player_mut(tackler).stats.tackles.fouls += 1;
        m.stats_mut(tackler.side).fouls += 1;
        m.log(format!("Foul by {} on {}", tackler_name, carrier_name));
        log::debug!("{} fouls {} with a {}", tackler_name, carrier_name, kind.describe());
        book(m, ctx, tackler, &rules);
        set_pieces::award_foul(m, carrier.side, spot)?;
        return Ok(TackleOutcome::Foul);
    }

    let tackle_score = calc_tackle_score(ctx, &m.player(tackler).skill, skills::TACKLE_VARIANCE);
    let retention = calc_retention_score(ctx, &m.player(carrier).skill, skills::TACKLE_VARIANCE);
    let outcome = if tackle_score > retention {
        m.player_mut(tackler).stats.tackles.on += 1;
        m.give_ball_to(tackler)?;
        displace(m, carrier, tackler, rules.displacement)?;
        m.log(format!("{} wins the ball from {}", tackler_name, carrier_name));
        TackleOutcome::Won
    } else {
        m.player_mut(tackler).stats.tackles.off += 1;
        displace(m, tackler, carrier, rules.displacement)?;
        TackleOutcome::Lost
    };

    if is_injured(ctx, rules.injury_high) {
        injure(m, tackler);
    }
    if is_injured(ctx, rules.injury_low) {
        injure(m, carrier);
    }
    Ok(outcome)
}

/// Pushes `loser` `amount` units along y, away from `winner`.
fn displace(m: &mut Match, loser: PlayerRef, winner: PlayerRef, amount: f64) -> Result<()> {
    let away = m.player(winner).pos()?;
    let here = m.player(loser).pos()?;
    let dy = if here.y >= away.y { amount } else { -amount };
    let moved = m.pitch_size.clamp(here.offset(0.0, dy));
    m.player_mut(loser).set_pos(moved);
    if m.player(loser).has_ball {
        m.ball.position = moved;
    }
    Ok(())
}

/// Card rolls for a foul: straight red first, then yellow. A second yellow is red.
fn book(m: &mut Match, ctx: &mut SimContext, r: PlayerRef, rules: &TackleRules) {
    let name = m.player(r).name.clone();
    let red = if ctx.percent(rules.red_pct) {
        true
    } else if ctx.percent(rules.yellow_pct) {
        let cards = &mut m.player_mut(r).stats.cards;
        cards.yellow += 1;
        let second = cards.yellow >= 2;
        m.log(format!("{} is shown a yellow card", name));
        second
    } else {
        false
    };
    if !red {
        return;
    }

    m.player_mut(r).stats.cards.red += 1;
    if m.player(r).has_ball {
        m.remove_ball_from_all_players();
    }
    m.player_mut(r).remove_from_play();
    m.log(format!("{} is sent off", name));
    log::debug!("red card for {}", name);
}
