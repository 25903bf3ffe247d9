//! Action decision engine
//!
//! Each iteration every available player receives an 11-entry weight vector over the
//! fixed action set and one action is drawn with probability proportional to its
//! weight. The weights come from ordered rule tables (see [`tables`]); the first
//! matching rule wins.

pub mod rules;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rng::SimContext;
use crate::error::{MatchError, Result};
use crate::models::{Match, PlayerRef};

pub use rules::{Condition, DecisionView, Outcome, Rule};

/// The fixed action set, in weight-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Shoot,
    ThroughBall,
    Pass,
    Cross,
    Tackle,
    Intercept,
    Slide,
    Run,
    Sprint,
    Cleared,
    Boot,
}

pub const ACTION_COUNT: usize = 11;

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::Shoot,
        Action::ThroughBall,
        Action::Pass,
        Action::Cross,
        Action::Tackle,
        Action::Intercept,
        Action::Slide,
        Action::Run,
        Action::Sprint,
        Action::Cleared,
        Action::Boot,
    ];

    /// Actions that require holding the ball.
    pub const BALL_ACTIONS: [Action; 6] = [
        Action::Shoot,
        Action::ThroughBall,
        Action::Pass,
        Action::Cross,
        Action::Cleared,
        Action::Boot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Shoot => "shoot",
            Action::ThroughBall => "throughBall",
            Action::Pass => "pass",
            Action::Cross => "cross",
            Action::Tackle => "tackle",
            Action::Intercept => "intercept",
            Action::Slide => "slide",
            Action::Run => "run",
            Action::Sprint => "sprint",
            Action::Cleared => "cleared",
            Action::Boot => "boot",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_ball_action(self) -> bool {
        Self::BALL_ACTIONS.contains(&self)
    }

    pub fn is_defensive(self) -> bool {
        matches!(self, Action::Tackle | Action::Intercept | Action::Slide)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| MatchError::UnknownAction(s.to_string()))
    }
}

/// Non-negative weights over [`Action::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionWeights(pub [u32; ACTION_COUNT]);

impl ActionWeights {
    pub const ZERO: ActionWeights = ActionWeights([0; ACTION_COUNT]);

    pub const fn new(weights: [u32; ACTION_COUNT]) -> Self {
        Self(weights)
    }

    pub fn weight(&self, action: Action) -> u32 {
        self.0[action.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, u32)> + '_ {
        Action::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Weights plus an optional diagnostic line for the event log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub weights: ActionWeights,
    pub note: Option<&'static str>,
}

/// Weighted draw over `weights`. A zero total falls back to `run`.
pub fn select_action(ctx: &mut SimContext, weights: &ActionWeights) -> Action {
    let total = weights.total();
    if total == 0 {
        return Action::Run;
    }
    let mut roll = ctx.random_int(0, total as i64 - 1) as u32;
    for (action, weight) in weights.iter() {
        if roll < weight {
            return action;
        }
        roll -= weight;
    }
    Action::Run
}

/// Weight vector for the player at `r`.
pub fn find_possible_actions(m: &Match, r: PlayerRef, ctx: &SimContext) -> Result<Decision> {
    let view = DecisionView::build(m, r, &ctx.config.decision)?;
    let root = if view.has_ball { tables::WITH_BALL } else { tables::WITHOUT_BALL };
    Ok(rules::evaluate(root, &view))
}

/// Downgrades an illegal choice to a safe one and records the correction.
pub fn validate_action(
    m: &mut Match,
    ctx: &mut SimContext,
    r: PlayerRef,
    action: Action,
) -> Action {
    let player = m.player(r);
    let has_ball = player.has_ball;
    let name = player.name.clone();
    let own_team = m.team(r.side).team_id;
    let ball_with_opponent = m.ball.with_player && m.ball.with_team != Some(own_team);

    let corrected = if !has_ball && action.is_ball_action() {
        Action::Run
    } else if has_ball && action.is_defensive() {
        ctx.pick(&Action::BALL_ACTIONS).copied().unwrap_or(Action::Pass)
    } else if matches!(action, Action::Tackle | Action::Slide) && !ball_with_opponent {
        Action::Run
    } else if action == Action::Intercept && !ball_with_opponent && !m.ball.is_moving() {
        Action::Run
    } else {
        action
    };

    if corrected != action {
        log::debug!("{} cannot {}, playing {} instead", name, action, corrected);
        m.log(format!("{} cannot {}, playing {} instead", name, action, corrected));
    }
    corrected
}

/// Queues an externally chosen action for the player's next decision.
pub fn set_player_action(m: &mut Match, player_id: u64, action_name: &str) -> Result<()> {
    let action: Action = action_name.parse()?;
    let r = m.require_player(player_id)?;
    m.player_mut(r).queued_action = Some(action);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::test_fixtures::{fixture_match, with_ctx};
    use crate::models::Side;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
        assert_eq!(serde_json::to_string(&Action::ThroughBall).unwrap(), "\"throughBall\"");
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let err = "dribble".parse::<Action>().unwrap_err();
        assert!(matches!(err, MatchError::UnknownAction(ref s) if s == "dribble"));
    }

    #[test]
    fn test_select_action_zero_total_runs() {
        with_ctx(1, &EngineConfig::default(), |ctx| {
            assert_eq!(select_action(ctx, &ActionWeights::ZERO), Action::Run);
        });
    }

    #[test]
    fn test_select_action_never_picks_zero_weight() {
        let weights = ActionWeights::new([0, 0, 50, 0, 0, 0, 0, 10, 0, 20, 20]);
        with_ctx(2, &EngineConfig::default(), |ctx| {
            for _ in 0..2000 {
                let a = select_action(ctx, &weights);
                assert!(weights.weight(a) > 0, "picked zero-weight {a}");
            }
        });
    }

    #[test]
    fn test_select_action_single_weight_is_deterministic() {
        let weights = ActionWeights::new([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7]);
        with_ctx(3, &EngineConfig::default(), |ctx| {
            for _ in 0..50 {
                assert_eq!(select_action(ctx, &weights), Action::Boot);
            }
        });
    }

    #[test]
    fn test_shoot_without_ball_is_downgraded() {
        let mut m = fixture_match();
        let r = PlayerRef::new(Side::Second, 9);
        with_ctx(4, &EngineConfig::default(), |ctx| {
            let action = validate_action(&mut m, ctx, r, Action::Shoot);
            assert_eq!(action, Action::Run);
        });
        assert!(m.iteration_log.iter().any(|l| l.contains("cannot shoot")));
    }

    #[test]
    fn test_carrier_tackle_becomes_ball_action() {
        let mut m = fixture_match();
        let carrier = m.carrier().unwrap();
        with_ctx(5, &EngineConfig::default(), |ctx| {
            let action = validate_action(&mut m, ctx, carrier, Action::Tackle);
            assert!(action.is_ball_action());
        });
    }

    #[test]
    fn test_set_player_action_parses_name() {
        let mut m = fixture_match();
        let id = m.second_team.players[4].player_id;
        set_player_action(&mut m, id, "sprint").unwrap();
        assert_eq!(m.second_team.players[4].queued_action, Some(Action::Sprint));
        assert!(set_player_action(&mut m, id, "moonwalk").is_err());
        assert!(matches!(
            set_player_action(&mut m, 1, "run"),
            Err(MatchError::PlayerNotFound(1))
        ));
    }

    #[test]
    fn test_removed_player_has_no_decision() {
        let mut m = fixture_match();
        let r = PlayerRef::new(Side::Second, 5);
        m.player_mut(r).remove_from_play();
        let cfg = EngineConfig::default();
        with_ctx(6, &cfg, |ctx| {
            let err = find_possible_actions(&m, r, ctx).unwrap_err();
            assert!(err.is_invariant_violation());
        });
    }
}
