use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ball::Ball;
use super::player::Player;
use super::position::Coord;
use super::team::{Team, TeamStatistics};
use crate::engine::set_pieces::RestartKind;
use crate::error::{MatchError, Result};

/// Pitch geometry in pitch units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchSize {
    pub width: f64,
    pub height: f64,
    pub goal_width: f64,
}

impl PitchSize {
    pub const fn new(width: f64, height: f64, goal_width: f64) -> Self {
        Self { width, height, goal_width }
    }

    pub fn centre(&self) -> Coord {
        Coord::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0.0 && c.x <= self.width && c.y >= 0.0 && c.y <= self.height
    }

    pub fn clamp(&self, c: Coord) -> Coord {
        Coord::new(c.x.clamp(0.0, self.width), c.y.clamp(0.0, self.height))
    }

    /// Goal-mouth x range `[centre - goal/2, centre + goal/2]`.
    pub fn goal_mouth(&self) -> (f64, f64) {
        let half = self.width / 2.0;
        (half - self.goal_width / 2.0, half + self.goal_width / 2.0)
    }
}

/// Which of the two match teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    KickOff,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::KickOff => Side::Second,
            Side::Second => Side::KickOff,
        }
    }

    pub const BOTH: [Side; 2] = [Side::KickOff, Side::Second];
}

/// Index of a roster slot within the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub side: Side,
    pub index: usize,
}

impl PlayerRef {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Complete match state. Mutated in place by every iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: Uuid,
    pub kick_off_team: Team,
    pub second_team: Team,
    pub pitch_size: PitchSize,
    pub ball: Ball,
    /// 1-based.
    pub half: u8,
    pub kick_off_team_statistics: TeamStatistics,
    pub second_team_statistics: TeamStatistics,
    /// Cleared at the start of each iteration.
    pub iteration_log: Vec<String>,
    pub end_iteration: bool,
    /// Provisional resting point handed from ball physics to the boundary stage.
    pub ball_intended: Option<Coord>,
    /// Restart set up by the previous iteration and not yet played.
    #[serde(default)]
    pub pending_restart: Option<RestartKind>,
}

impl Match {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::KickOff => &self.kick_off_team,
            Side::Second => &self.second_team,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::KickOff => &mut self.kick_off_team,
            Side::Second => &mut self.second_team,
        }
    }

    pub fn stats_mut(&mut self, side: Side) -> &mut TeamStatistics {
        match side {
            Side::KickOff => &mut self.kick_off_team_statistics,
            Side::Second => &mut self.second_team_statistics,
        }
    }

    pub fn stats(&self, side: Side) -> &TeamStatistics {
        match side {
            Side::KickOff => &self.kick_off_team_statistics,
            Side::Second => &self.second_team_statistics,
        }
    }

    pub fn player(&self, r: PlayerRef) -> &Player {
        &self.team(r.side).players[r.index]
    }

    pub fn player_mut(&mut self, r: PlayerRef) -> &mut Player {
        &mut self.team_mut(r.side).players[r.index]
    }

    pub fn side_of_team(&self, team_id: u64) -> Option<Side> {
        Side::BOTH.into_iter().find(|&s| self.team(s).team_id == team_id)
    }

    pub fn locate(&self, player_id: u64) -> Option<PlayerRef> {
        Side::BOTH.into_iter().find_map(|side| {
            self.team(side).index_of(player_id).map(|index| PlayerRef::new(side, index))
        })
    }

    pub fn require_player(&self, player_id: u64) -> Result<PlayerRef> {
        self.locate(player_id).ok_or(MatchError::PlayerNotFound(player_id))
    }

    /// The single player flagged as holding the ball, if any.
    pub fn carrier(&self) -> Option<PlayerRef> {
        Side::BOTH.into_iter().find_map(|side| {
            self.team(side).carrier_index().map(|index| PlayerRef::new(side, index))
        })
    }

    pub fn carrier_count(&self) -> usize {
        Side::BOTH
            .into_iter()
            .map(|side| self.team(side).players.iter().filter(|p| p.has_ball).count())
            .sum()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.iteration_log.push(line.into());
    }

    /// Clears every `has_ball` flag and the ball's holder.
    pub fn remove_ball_from_all_players(&mut self) {
        for side in Side::BOTH {
            for p in self.team_mut(side).players.iter_mut() {
                p.has_ball = false;
            }
        }
        self.ball.release();
    }

    /// Hands exclusive possession to `r`. The ball moves to the player's feet, any
    /// in-flight trajectory is dropped and a pending restart is void.
    pub fn give_ball_to(&mut self, r: PlayerRef) -> Result<()> {
        self.remove_ball_from_all_players();
        let team_id = self.team(r.side).team_id;
        let player = self.player_mut(r);
        let pos = player.pos()?;
        player.has_ball = true;
        let (id, name) = (player.player_id, player.name.clone());
        self.ball.with_player = true;
        self.ball.player = Some(id);
        self.ball.with_team = Some(team_id);
        self.ball.position = pos;
        self.ball.height = 0.0;
        self.ball.ball_over_iterations.clear();
        self.pending_restart = None;
        self.set_last_touch(&name, id, team_id);
        Ok(())
    }

    pub fn set_last_touch(&mut self, name: &str, player_id: u64, team_id: u64) {
        self.ball.last_touch.player_name = name.to_string();
        self.ball.last_touch.player_id = Some(player_id);
        self.ball.last_touch.team_id = Some(team_id);
        self.ball.last_touch.action = None;
    }

    /// Side of the last player to touch the ball. Defaults to the kick-off team
    /// before anyone has touched it.
    pub fn last_touch_side(&self) -> Side {
        self.ball
            .last_touch
            .team_id
            .and_then(|id| self.side_of_team(id))
            .unwrap_or(Side::KickOff)
    }

    /// All roster slots on both teams.
    pub fn all_refs() -> impl Iterator<Item = PlayerRef> {
        Side::BOTH
            .into_iter()
            .flat_map(|side| (0..super::team::SQUAD_SIZE).map(move |i| PlayerRef::new(side, i)))
    }
}
