//! Match controller: initiation, the per-iteration loop and half-time.

use super::ball::move_ball;
use super::injury::check_injuries;
use super::intent::update_intents;
use super::offside::check_offside;
use super::rng::SimContext;
use super::set_pieces::kick_off;
use super::tactics::{process_team, BallChasers};
use crate::error::Result;
use crate::models::{Ball, Coord, Intent, Match, PitchSize, Side, Team, TeamStatistics};

/// Builds a match from two rosters whose formations defend the `y = 0` goal.
///
/// The kick-off side is drawn at random and defends the top goal; the other team
/// is mirrored into the bottom half. Ids come from the random source so a seeded
/// context yields the same match every time.
pub fn initiate_game(first: Team, second: Team, pitch: PitchSize, ctx: &mut SimContext) -> Result<Match> {
    let (mut kick_off_team, mut second_team) = if ctx.percent(50.0) { (first, second) } else { (second, first) };

    let bits = (u128::from(ctx.next_u64()) << 64) | u128::from(ctx.next_u64());
    let match_id = uuid::Builder::from_random_bytes(bits.to_le_bytes()).into_uuid();

    prepare_team(&mut kick_off_team, team_id(ctx), &pitch, false);
    prepare_team(&mut second_team, team_id(ctx), &pitch, true);
    if second_team.team_id == kick_off_team.team_id {
        second_team.team_id += 1;
        renumber(&mut second_team);
    }

    let mut m = Match {
        match_id,
        kick_off_team,
        second_team,
        pitch_size: pitch,
        ball: Ball::at(pitch.centre()),
        half: 1,
        kick_off_team_statistics: TeamStatistics::default(),
        second_team_statistics: TeamStatistics::default(),
        iteration_log: Vec::new(),
        end_iteration: false,
        ball_intended: None,
        pending_restart: None,
    };
    log::debug!(
        "Match {} created: {} v {}",
        m.match_id,
        m.kick_off_team.name,
        m.second_team.name
    );

    kick_off(&mut m, ctx, Side::KickOff)?;
    m.kick_off_team.intent = Intent::Attack;
    m.second_team.intent = Intent::Defend;
    update_intents(&mut m);
    // Initiation is not an iteration: the first call to play_iteration runs.
    m.end_iteration = false;
    Ok(m)
}

fn team_id(ctx: &mut SimContext) -> u64 {
    // Small enough that team_id * 100 + shirt index never overflows.
    ctx.next_u64() % 1_000_000_000_000
}

fn prepare_team(team: &mut Team, id: u64, pitch: &PitchSize, mirror: bool) {
    team.team_id = id;
    team.intent = Intent::None;
    for p in team.players.iter_mut() {
        if mirror {
            p.origin_pos = mirrored(pitch, p.origin_pos);
        }
        p.origin_pos = pitch.clamp(p.origin_pos);
        p.intent_pos = p.origin_pos;
        p.set_pos(p.origin_pos);
        p.has_ball = false;
        p.offside = false;
        p.action = None;
        p.queued_action = None;
    }
    renumber(team);
}

fn renumber(team: &mut Team) {
    let id = team.team_id;
    for (i, p) in team.players.iter_mut().enumerate() {
        p.player_id = id * 100 + i as u64;
    }
}

fn mirrored(pitch: &PitchSize, c: Coord) -> Coord {
    Coord::new(pitch.width - c.x, pitch.height - c.y)
}

/// Advances the match by one iteration.
///
/// Order: injuries, ball movement, chaser lookup, kick-off team tactics, second
/// team tactics, offside flags, intents. Anything that ends the iteration early
/// skips the remaining team and offside stages.
pub fn play_iteration(m: &mut Match, ctx: &mut SimContext) -> Result<()> {
    m.iteration_log.clear();
    m.end_iteration = false;
    m.ball_intended = None;

    check_injuries(m, ctx);
    move_ball(m, ctx)?;

    if !m.end_iteration {
        let chasers = BallChasers::find(m);
        process_team(m, ctx, Side::KickOff, &chasers)?;
        if !m.end_iteration {
            process_team(m, ctx, Side::Second, &chasers)?;
        }
    }
    if !m.end_iteration {
        check_offside(m, ctx);
    }
    update_intents(m);
    log::trace!("Iteration done: {} log lines", m.iteration_log.len());
    Ok(())
}

/// Switches ends for the second half and restarts with a kick-off by the team
/// that received the first one.
pub fn start_second_half(m: &mut Match, ctx: &mut SimContext) -> Result<()> {
    let pitch = m.pitch_size;
    for side in Side::BOTH {
        for p in m.team_mut(side).players.iter_mut() {
            p.origin_pos = mirrored(&pitch, p.origin_pos);
            p.intent_pos = mirrored(&pitch, p.intent_pos);
            if p.current_pos.is_active() {
                p.set_pos(p.origin_pos);
            }
            p.offside = false;
            p.action = None;
            p.queued_action = None;
        }
    }
    m.half = 2;
    m.iteration_log.clear();
    m.ball.ball_over_iterations.clear();
    m.ball.height = 0.0;
    m.ball_intended = None;
    m.pending_restart = None;
    m.remove_ball_from_all_players();

    m.log("Second half");
    log::debug!("Second half of match {}", m.match_id);
    kick_off(m, ctx, Side::Second)?;
    m.team_mut(Side::Second).intent = Intent::Attack;
    m.team_mut(Side::KickOff).intent = Intent::Defend;
    update_intents(m);
    m.end_iteration = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::test_fixtures::{fixture_team, with_ctx, PITCH};
    use crate::models::PlayerRef;

    fn start(seed: u64) -> Match {
        let reds = fixture_team("Reds", 0, true);
        let blues = fixture_team("Blues", 0, true);
        with_ctx(seed, &EngineConfig::test(), |ctx| initiate_game(reds, blues, PITCH, ctx).unwrap())
    }

    #[test]
    fn test_initiate_game_sets_up_kick_off() {
        let m = start(5);
        assert!(!m.match_id.is_nil());
        assert_eq!(m.half, 1);
        assert!(m.kick_off_team.defends_top(PITCH.height));
        assert!(!m.second_team.defends_top(PITCH.height));
        assert_ne!(m.kick_off_team.team_id, m.second_team.team_id);
        assert_eq!(m.second_team.players[3].player_id, m.second_team.team_id * 100 + 3);

        let kicker = m.carrier().unwrap();
        assert_eq!(kicker.side, Side::KickOff);
        assert_eq!(m.ball.position, PITCH.centre());
        assert_eq!(m.kick_off_team.intent, Intent::Attack);
        assert_eq!(m.second_team.intent, Intent::Defend);
        assert!(!m.end_iteration);

        // Second team mirrored: its keeper guards the bottom goal.
        assert_eq!(m.second_team.players[0].origin_pos, Coord::new(340.0, 1050.0));
    }

    #[test]
    fn test_kick_off_side_is_random() {
        let names: Vec<String> = (0..20).map(|s| start(s).kick_off_team.name).collect();
        assert!(names.iter().any(|n| n == "Reds"));
        assert!(names.iter().any(|n| n == "Blues"));
    }

    #[test]
    fn test_initiation_is_deterministic() {
        assert_eq!(start(9), start(9));
    }

    #[test]
    fn test_first_iteration_takes_kick_off() {
        let mut m = start(3);
        let kicker = m.carrier().unwrap();
        with_ctx(4, &EngineConfig::test(), |ctx| play_iteration(&mut m, ctx).unwrap());
        assert_eq!(m.player(kicker).stats.passes.total, 1);
        assert!(m.pending_restart.is_none());
    }

    #[test]
    fn test_iterations_keep_invariants() {
        let mut m = start(11);
        let cfg = EngineConfig::default();
        with_ctx(12, &cfg, |ctx| {
            for _ in 0..300 {
                play_iteration(&mut m, ctx).unwrap();
                assert!(m.carrier_count() <= 1);
                assert!(m.half >= 1);
                for r in Match::all_refs() {
                    if let Some(c) = m.player(r).current_pos.coord() {
                        assert!(c.is_finite() && PITCH.contains(c));
                    }
                }
            }
        });
    }

    #[test]
    fn test_second_half_switches_ends() {
        let mut m = start(21);
        let cfg = EngineConfig::test();
        with_ctx(22, &cfg, |ctx| {
            for _ in 0..20 {
                play_iteration(&mut m, ctx).unwrap();
            }
            start_second_half(&mut m, ctx).unwrap();
        });
        assert_eq!(m.half, 2);
        assert!(!m.kick_off_team.defends_top(PITCH.height));
        assert!(m.second_team.defends_top(PITCH.height));
        assert_eq!(m.carrier().map(|r| r.side), Some(Side::Second));
        assert_eq!(m.ball.position, PITCH.centre());
        let keeper = m.player(PlayerRef::new(Side::KickOff, 0));
        assert_eq!(keeper.current_pos.coord(), Some(keeper.origin_pos));
        assert_eq!(m.iteration_log.first().map(String::as_str), Some("Second half"));
        let line = format!("{} kick off", m.second_team.name);
        assert!(m.iteration_log.contains(&line));
    }
}
