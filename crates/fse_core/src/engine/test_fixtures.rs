//! Shared fixtures for engine tests: a 680×1050 pitch and two 4-4-2 sides.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use super::config::EngineConfig;
use super::rng::SimContext;
use crate::models::{
    Ball, Coord, Intent, Match, PitchSize, Player, PlayerRef, PlayerStats, Position, Role, Side,
    Skill, Team, TeamStatistics,
};

pub const PITCH: PitchSize = PitchSize::new(680.0, 1050.0, 90.0);

/// 4-4-2 for a side defending the `y = 0` goal.
pub const FORMATION: [(Role, [f64; 2]); 11] = [
    (Role::GK, [340.0, 0.0]),
    (Role::LB, [80.0, 80.0]),
    (Role::CB, [230.0, 80.0]),
    (Role::CB, [420.0, 80.0]),
    (Role::RB, [600.0, 80.0]),
    (Role::LM, [80.0, 270.0]),
    (Role::CM, [230.0, 270.0]),
    (Role::CM, [420.0, 270.0]),
    (Role::RM, [600.0, 270.0]),
    (Role::ST, [280.0, 500.0]),
    (Role::ST, [440.0, 500.0]),
];

pub fn skill_for(role: Role) -> Skill {
    let mut skill = Skill {
        passing: 60.0,
        shooting: 60.0,
        tackling: 60.0,
        saving: 10.0,
        agility: 60.0,
        strength: 60.0,
        penalty_taking: 60.0,
        jumping: 60.0,
    };
    match role {
        Role::GK => skill.saving = 80.0,
        Role::ST => skill.shooting = 75.0,
        Role::CB => skill.tackling = 75.0,
        _ => {}
    }
    skill
}

/// A side whose origins are taken from [`FORMATION`], rotated into the bottom half
/// when `defends_top` is false.
pub fn fixture_team(name: &str, team_id: u64, defends_top: bool) -> Team {
    let players = FORMATION.map(|(role, [x, y])| {
        let origin = if defends_top {
            Coord::new(x, y)
        } else {
            Coord::new(PITCH.width - x, PITCH.height - y)
        };
        Player {
            name: format!("{} {}", name, role.as_str()),
            role,
            rating: 70,
            skill: skill_for(role),
            current_pos: Position::Active(origin),
            origin_pos: origin,
            intent_pos: origin,
            fitness: 100.0,
            injured: false,
            player_id: 0,
            action: None,
            queued_action: None,
            offside: false,
            has_ball: false,
            stats: PlayerStats::default(),
        }
    });
    let mut team = Team {
        name: name.to_string(),
        rating: 70,
        intent: Intent::None,
        team_id,
        players,
    };
    for (i, p) in team.players.iter_mut().enumerate() {
        p.player_id = team_id * 100 + i as u64;
        p.name = format!("{} {}", p.name, i);
    }
    team
}

/// Kick-off team defends the top goal and holds the ball at the centre spot with
/// its first striker; its second striker stands 20 units east.
pub fn fixture_match() -> Match {
    let mut m = Match {
        match_id: Uuid::nil(),
        kick_off_team: fixture_team("Reds", 1, true),
        second_team: fixture_team("Blues", 2, false),
        pitch_size: PITCH,
        ball: Ball::at(PITCH.centre()),
        half: 1,
        kick_off_team_statistics: TeamStatistics::default(),
        second_team_statistics: TeamStatistics::default(),
        iteration_log: Vec::new(),
        end_iteration: false,
        ball_intended: None,
        pending_restart: None,
    };
    let centre = PITCH.centre();
    place(&mut m, PlayerRef::new(Side::KickOff, 9), centre);
    place(&mut m, PlayerRef::new(Side::KickOff, 10), centre.offset(20.0, 0.0));
    m.kick_off_team.intent = Intent::Attack;
    m.second_team.intent = Intent::Defend;
    m.give_ball_to(PlayerRef::new(Side::KickOff, 9)).expect("fixture striker is positioned");
    m
}

/// Moves a player without touching the ball.
pub fn place(m: &mut Match, r: PlayerRef, c: Coord) {
    m.player_mut(r).set_pos(c);
}

/// Drops the ball loose at `c` with nobody holding it.
pub fn loose_ball_at(m: &mut Match, c: Coord) {
    m.remove_ball_from_all_players();
    m.ball.position = c;
    m.ball.ball_over_iterations.clear();
}

pub fn with_ctx<R>(seed: u64, cfg: &EngineConfig, f: impl FnOnce(&mut SimContext) -> R) -> R {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ctx = SimContext::new(&mut rng, cfg);
    f(&mut ctx)
}
