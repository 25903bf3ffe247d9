//! Roster and pitch input.
//!
//! Turns JSON match setup into the typed records the engine trusts. Every
//! structural check happens here; the engine never re-validates.
//!
//! ```rust
//! use fse_core::setup::PitchSetup;
//!
//! let pitch = PitchSetup::from_json(r#"{"width": 680, "height": 1050, "goal_width": 90}"#).unwrap();
//! assert!(pitch.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::{
    Coord, Intent, PitchSize, Player, PlayerStats, Position, Role, Skill, Team, SQUAD_SIZE,
};

/// Skill values above this are rejected as typos.
const MAX_SKILL: f64 = 200.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchSetup {
    pub width: f64,
    pub height: f64,
    pub goal_width: f64,
}

impl PitchSetup {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [self.width, self.height, self.goal_width];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(MatchError::InvalidPitch(format!(
                "dimensions must be positive, got {} x {} with goal {}",
                self.width, self.height, self.goal_width
            )));
        }
        if self.goal_width >= self.width {
            return Err(MatchError::InvalidPitch(format!(
                "goal width {} must be narrower than the pitch ({})",
                self.goal_width, self.width
            )));
        }
        Ok(())
    }

    pub fn into_pitch(&self) -> Result<PitchSize> {
        self.validate()?;
        Ok(PitchSize::new(self.width, self.height, self.goal_width))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub rating: u32,
    pub skill: Skill,
    /// Formation baseline for a side defending the `y = 0` goal.
    pub position: Coord,
    #[serde(default = "full_fitness")]
    pub fitness: f64,
    #[serde(default)]
    pub injured: bool,
}

fn full_fitness() -> f64 {
    100.0
}

impl PlayerSetup {
    fn validate(&self, pitch: &PitchSize) -> Result<()> {
        let skills = [
            self.skill.passing,
            self.skill.shooting,
            self.skill.tackling,
            self.skill.saving,
            self.skill.agility,
            self.skill.strength,
            self.skill.penalty_taking,
            self.skill.jumping,
        ];
        if skills.iter().any(|s| !s.is_finite() || *s < 0.0 || *s > MAX_SKILL) {
            return Err(MatchError::InvalidPosition(format!("{}: skill out of range", self.name)));
        }
        if !self.fitness.is_finite() || self.fitness < 0.0 {
            return Err(MatchError::InvalidPosition(format!("{}: fitness {}", self.name, self.fitness)));
        }
        if !self.position.is_finite() || !pitch.contains(self.position) {
            return Err(MatchError::InvalidPosition(format!(
                "{}: {} is off the pitch",
                self.name, self.position
            )));
        }
        if self.position.y > pitch.height / 2.0 {
            return Err(MatchError::InvalidPosition(format!(
                "{}: {} is outside the defending half",
                self.name, self.position
            )));
        }
        Ok(())
    }

    fn into_player(self) -> Player {
        Player {
            name: self.name,
            role: self.role,
            rating: self.rating,
            skill: self.skill,
            current_pos: Position::Active(self.position),
            origin_pos: self.position,
            intent_pos: self.position,
            fitness: self.fitness,
            injured: self.injured,
            player_id: 0,
            action: None,
            queued_action: None,
            offside: false,
            has_ball: false,
            stats: PlayerStats::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSetup {
    pub name: String,
    #[serde(default)]
    pub rating: u32,
    pub players: Vec<PlayerSetup>,
}

impl TeamSetup {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Exactly eleven players, a goalkeeper in slot 0 and formation positions
    /// inside the defending half.
    pub fn validate(&self, pitch: &PitchSize) -> Result<()> {
        if self.players.len() != SQUAD_SIZE {
            return Err(MatchError::InvalidTeamSize { expected: SQUAD_SIZE, found: self.players.len() });
        }
        if self.players.first().map(|p| p.role) != Some(Role::GK) {
            return Err(MatchError::InvalidPosition(format!(
                "{}: first player must be the goalkeeper",
                self.name
            )));
        }
        self.players.iter().try_for_each(|p| p.validate(pitch))
    }

    pub fn into_team(self, pitch: &PitchSize) -> Result<Team> {
        self.validate(pitch)?;
        let found = self.players.len();
        let players: Vec<Player> = self.players.into_iter().map(PlayerSetup::into_player).collect();
        let players: [Player; SQUAD_SIZE] = players
            .try_into()
            .map_err(|_| MatchError::InvalidTeamSize { expected: SQUAD_SIZE, found })?;
        Ok(Team {
            name: self.name,
            rating: self.rating,
            intent: Intent::None,
            team_id: 0,
            players,
        })
    }
}

/// Full match input: pitch plus both rosters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub pitch: PitchSetup,
    pub first_team: TeamSetup,
    pub second_team: TeamSetup,
}

/// Parses and validates a complete match setup.
pub fn load_match(json: &str) -> Result<(Team, Team, PitchSize)> {
    let setup: MatchSetup = serde_json::from_str(json)?;
    let pitch = setup.pitch.into_pitch()?;
    let first = setup.first_team.into_team(&pitch)?;
    let second = setup.second_team.into_team(&pitch)?;
    log::debug!("Loaded {} v {} on a {}x{} pitch", first.name, second.name, pitch.width, pitch.height);
    Ok((first, second, pitch))
}
