//! Rule evaluation for the weight tables.
//!
//! A table is an ordered slice of [`Rule`]s. Evaluation walks it front to back and
//! stops at the first rule whose [`Condition`] holds; its [`Outcome`] is either a
//! weight vector or a nested table evaluated the same way.

use super::{ActionWeights, Decision};
use crate::engine::common::{in_bottom_penalty_box, in_top_penalty_box};
use crate::engine::config::DecisionConfig;
use crate::engine::frame::Frame;
use crate::engine::physics_constants::proximity;
use crate::error::Result;
use crate::models::{Coord, Match, PitchSize, PlayerRef, Role};

/// Who holds the ball, relative to the deciding player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holder {
    Nobody,
    Teammate,
    Opponent,
}

/// Facts about one player, computed once per decision and all expressed in the
/// player's attacking frame.
#[derive(Debug, Clone)]
pub struct DecisionView {
    pub role: Role,
    pub has_ball: bool,
    pub shooting: f64,
    /// Own position in frame coordinates (own goal at `y = 0`).
    pub pos: Coord,
    pub pitch: PitchSize,
    pub ball_proximity: (f64, f64),
    pub ball_moving: bool,
    pub holder: Holder,
    /// `(|dx|, |dy|)` to every active opponent.
    pub opponents: Vec<(f64, f64)>,
    /// A teammate ahead of the player, inside the space rectangle, with no
    /// opponent tight on them.
    pub teammate_in_space: bool,
}

impl DecisionView {
    pub fn build(m: &Match, r: PlayerRef, cfg: &DecisionConfig) -> Result<Self> {
        let player = m.player(r);
        let frame = Frame::for_side(m, r.side);
        let here = player.pos()?;
        let pos = frame.to_frame(here);

        let own_team = m.team(r.side).team_id;
        let holder = match m.ball.with_team {
            _ if !m.ball.with_player => Holder::Nobody,
            Some(t) if t == own_team => Holder::Teammate,
            Some(_) => Holder::Opponent,
            None => Holder::Nobody,
        };

        let opponent_coords: Vec<Coord> = m
            .team(r.side.other())
            .players
            .iter()
            .filter_map(|p| p.current_pos.coord())
            .collect();
        let opponents = opponent_coords.iter().map(|c| here.proximity_to(*c)).collect();

        let teammate_in_space = m.team(r.side).players.iter().enumerate().any(|(i, mate)| {
            if i == r.index || mate.injured {
                return false;
            }
            let Some(c) = mate.current_pos.coord() else { return false };
            let ahead = frame.y(c.y) - pos.y;
            let in_rect = (c.x - here.x).abs() < cfg.teammate_space_x
                && ahead > 0.0
                && ahead < cfg.teammate_space_y;
            in_rect
                && !opponent_coords.iter().any(|o| {
                    c.within(*o, proximity::THREAT_OPPOSITION, proximity::THREAT_OPPOSITION)
                })
        });

        Ok(Self {
            role: player.role,
            has_ball: player.has_ball,
            shooting: player.skill.shooting,
            pos,
            pitch: m.pitch_size,
            ball_proximity: here.proximity_to(m.ball.position),
            ball_moving: m.ball.is_moving(),
            holder,
            opponents,
            teammate_in_space,
        })
    }

    fn opposition_within(&self, x: f64, y: f64) -> bool {
        self.opponents.iter().any(|&(dx, dy)| dx < x && dy < y)
    }

    fn ball_within(&self, band: f64) -> bool {
        self.ball_proximity.0 < band && self.ball_proximity.1 < band
    }

    fn in_corner(&self) -> bool {
        let zone = proximity::CORNER_ZONE;
        let (w, h) = (self.pitch.width, self.pitch.height);
        (self.pos.x < zone || self.pos.x > w - zone) && (self.pos.y < zone || self.pos.y > h - zone)
    }
}

/// Predicate over a [`DecisionView`].
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    Always,
    Goalkeeper,
    RoleIn(&'static [Role]),
    /// Ball inside a square band around the player.
    BallWithin(f64),
    BallLoose,
    BallInFlight,
    BallWithTeammate,
    BallWithOpponent,
    /// Any opponent inside the `x × y` rectangle.
    OppositionWithin(f64, f64),
    TeammateInSpace,
    InCorner,
    InAttackingBox,
    InDefendingBox,
    /// Frame `y > height - shooting / divisor`.
    ShootingRange(f64),
    ShootingAbove(f64),
    AttackingThird,
    MiddleThird,
}

impl Condition {
    pub fn holds(&self, v: &DecisionView) -> bool {
        let (w, h) = (v.pitch.width, v.pitch.height);
        match *self {
            Condition::Always => true,
            Condition::Goalkeeper => v.role.is_goalkeeper(),
            Condition::RoleIn(roles) => roles.contains(&v.role),
            Condition::BallWithin(band) => v.ball_within(band),
            Condition::BallLoose => v.holder == Holder::Nobody,
            Condition::BallInFlight => v.holder == Holder::Nobody && v.ball_moving,
            Condition::BallWithTeammate => v.holder == Holder::Teammate,
            Condition::BallWithOpponent => v.holder == Holder::Opponent,
            Condition::OppositionWithin(x, y) => v.opposition_within(x, y),
            Condition::TeammateInSpace => v.teammate_in_space,
            Condition::InCorner => v.in_corner(),
            Condition::InAttackingBox => in_bottom_penalty_box(v.pos, w, h),
            Condition::InDefendingBox => in_top_penalty_box(v.pos, w, h),
            Condition::ShootingRange(divisor) => v.pos.y > h - v.shooting / divisor,
            Condition::ShootingAbove(threshold) => v.shooting > threshold,
            Condition::AttackingThird => v.pos.y > h * 2.0 / 3.0,
            Condition::MiddleThird => v.pos.y > h / 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Weights(ActionWeights),
    Table(&'static [Rule]),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: Condition,
    pub then: Outcome,
    /// Event log line emitted when this rule decides.
    pub note: Option<&'static str>,
}

impl Rule {
    pub const fn weights(when: Condition, weights: [u32; 11]) -> Self {
        Self { when, then: Outcome::Weights(ActionWeights::new(weights)), note: None }
    }

    pub const fn table(when: Condition, table: &'static [Rule]) -> Self {
        Self { when, then: Outcome::Table(table), note: None }
    }

    pub const fn noted(self, note: &'static str) -> Self {
        Self { note: Some(note), ..self }
    }
}

/// First matching rule, descending into nested tables. A table with no match
/// yields zero weights, which selection turns into `run`.
pub fn evaluate(table: &'static [Rule], view: &DecisionView) -> Decision {
    let mut note = None;
    let mut current = table;
    'walk: loop {
        for rule in current {
            if !rule.when.holds(view) {
                continue;
            }
            note = rule.note.or(note);
            match rule.then {
                Outcome::Weights(weights) => return Decision { weights, note },
                Outcome::Table(next) => {
                    current = next;
                    continue 'walk;
                }
            }
        }
        return Decision { weights: ActionWeights::ZERO, note };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(pos: Coord, role: Role) -> DecisionView {
        DecisionView {
            role,
            has_ball: true,
            shooting: 80.0,
            pos,
            pitch: PitchSize::new(680.0, 1050.0, 90.0),
            ball_proximity: (0.0, 0.0),
            ball_moving: false,
            holder: Holder::Teammate,
            opponents: vec![(50.0, 50.0)],
            teammate_in_space: false,
        }
    }

    const INNER: &[Rule] = &[Rule::weights(Condition::Always, [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0])];
    const OUTER: &[Rule] = &[
        Rule::weights(Condition::Goalkeeper, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Rule::table(Condition::InCorner, INNER).noted("boxed in"),
        Rule::weights(Condition::Always, [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]),
    ];

    #[test]
    fn test_first_match_wins() {
        let d = evaluate(OUTER, &view(Coord::new(5.0, 5.0), Role::GK));
        assert_eq!(d.weights.0[0], 1);
        assert_eq!(d.note, None);
    }

    #[test]
    fn test_nested_table_keeps_note() {
        let d = evaluate(OUTER, &view(Coord::new(5.0, 1045.0), Role::ST));
        assert_eq!(d.weights.0[7], 1);
        assert_eq!(d.note, Some("boxed in"));
    }

    #[test]
    fn test_no_match_yields_zero() {
        const EMPTY: &[Rule] = &[Rule::weights(Condition::Goalkeeper, [1; 11])];
        let d = evaluate(EMPTY, &view(Coord::new(300.0, 300.0), Role::CM));
        assert_eq!(d.weights, ActionWeights::ZERO);
    }

    #[test]
    fn test_shooting_range_is_relative_to_height() {
        let mut v = view(Coord::new(340.0, 1011.0), Role::ST);
        assert!(Condition::ShootingRange(2.0).holds(&v));
        v.pos.y = 1009.0;
        assert!(!Condition::ShootingRange(2.0).holds(&v));
        assert!(Condition::ShootingRange(1.0).holds(&v));
    }

    #[test]
    fn test_opposition_window_is_rectangular() {
        let mut v = view(Coord::new(340.0, 500.0), Role::CM);
        v.opponents = vec![(9.9, 9.9)];
        assert!(Condition::OppositionWithin(10.0, 10.0).holds(&v));
        v.opponents = vec![(10.0, 0.0)];
        assert!(!Condition::OppositionWithin(10.0, 10.0).holds(&v));
    }
}
