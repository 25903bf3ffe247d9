//! Tuned weight tables.
//!
//! Columns: shoot, throughBall, pass, cross, tackle, intercept, slide, run, sprint,
//! cleared, boot. Rows are evaluated top to bottom. Everything is written in the
//! deciding player's frame, so one table covers both attacking directions.

use super::rules::{Condition as C, Rule};
use crate::engine::physics_constants::{proximity, skills};
use crate::models::Role;

const MIDFIELD: &[Role] = &[Role::LM, Role::CM, Role::RM];
const STRIKER: &[Role] = &[Role::ST];
const OPEN_PLAY: C = C::OppositionWithin(proximity::OPEN_PLAY_OPPOSITION, proximity::OPEN_PLAY_OPPOSITION);
const ELITE: C = C::ShootingAbove(skills::ELITE_SHOOTING);

// ============================================================
// Without the ball
// ============================================================

pub const WITHOUT_BALL: &[Rule] = &[
    Rule::weights(C::Goalkeeper, [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0]),
    Rule::table(C::BallWithin(proximity::BALL_CLOSE), CLOSE_TO_BALL),
    Rule::table(C::BallWithin(proximity::BALL_NEAR), NEAR_BALL),
    Rule::table(C::BallWithin(proximity::BALL_MID), MID_BALL),
    Rule::table(C::Always, FAR_FROM_BALL),
];

const CLOSE_TO_BALL: &[Rule] = &[
    Rule::weights(C::BallInFlight, [0, 0, 0, 0, 0, 60, 0, 20, 20, 0, 0]),
    Rule::weights(C::BallLoose, [0, 0, 0, 0, 0, 0, 0, 40, 60, 0, 0]),
    Rule::weights(C::BallWithTeammate, [0, 0, 0, 0, 0, 0, 0, 70, 30, 0, 0]),
    Rule::weights(C::InDefendingBox, [0, 0, 0, 0, 50, 0, 10, 20, 20, 0, 0]),
    Rule::weights(C::Always, [0, 0, 0, 0, 50, 0, 50, 0, 0, 0, 0]),
];

const NEAR_BALL: &[Rule] = &[
    Rule::weights(C::BallInFlight, [0, 0, 0, 0, 0, 40, 0, 30, 30, 0, 0]),
    Rule::weights(C::BallWithOpponent, [0, 0, 0, 0, 40, 0, 20, 10, 30, 0, 0]),
    Rule::weights(C::Always, [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0]),
];

const MID_BALL: &[Rule] = &[
    Rule::weights(C::BallWithOpponent, [0, 0, 0, 0, 0, 40, 0, 30, 30, 0, 0]),
    Rule::weights(C::Always, [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0]),
];

const FAR_FROM_BALL: &[Rule] = &[
    Rule::weights(C::BallWithOpponent, [0, 0, 0, 0, 0, 10, 0, 50, 30, 0, 0]),
    Rule::weights(C::Always, [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0]),
];

// ============================================================
// With the ball
// ============================================================

pub const WITH_BALL: &[Rule] = &[
    Rule::table(C::Goalkeeper, KEEPER),
    Rule::weights(C::InCorner, [0, 0, 0, 0, 0, 0, 0, 20, 80, 0, 0]).noted("boxed into the corner"),
    Rule::table(C::InAttackingBox, THREAT),
    Rule::table(C::AttackingThird, ATTACKING_THIRD),
    Rule::table(C::MiddleThird, MIDDLE_THIRD),
    Rule::table(C::Always, DEFENSIVE_THIRD),
];

const KEEPER: &[Rule] = &[
    Rule::weights(
        C::OppositionWithin(proximity::KEEPER_PRESSURE.0, proximity::KEEPER_PRESSURE.1),
        [0, 0, 10, 0, 0, 0, 0, 10, 0, 40, 40],
    )
    .noted("keeper under pressure"),
    Rule::weights(C::Always, [0, 0, 50, 0, 0, 0, 0, 10, 0, 20, 20]),
];

/// Inside the opposition penalty box.
const THREAT: &[Rule] = &[
    Rule::weights(
        C::OppositionWithin(proximity::THREAT_OPPOSITION, proximity::THREAT_OPPOSITION),
        [20, 0, 70, 0, 0, 0, 0, 10, 0, 0, 0],
    )
    .noted("closed down in the box"),
    Rule::weights(C::TeammateInSpace, [30, 0, 50, 0, 0, 0, 0, 20, 0, 0, 0]),
    Rule::weights(C::ShootingRange(2.0), [90, 0, 0, 0, 0, 0, 0, 10, 0, 0, 0]),
    Rule::weights(C::ShootingRange(1.0), [60, 0, 10, 10, 0, 0, 0, 20, 0, 0, 0]),
    Rule::weights(C::Always, [30, 0, 20, 20, 0, 0, 0, 30, 0, 0, 0]),
];

const ATTACKING_THIRD: &[Rule] = &[
    Rule::weights(OPEN_PLAY, [10, 20, 30, 20, 0, 0, 0, 20, 0, 0, 0]),
    Rule::weights(ELITE, [30, 20, 20, 10, 0, 0, 0, 20, 0, 0, 0]),
    Rule::weights(C::RoleIn(MIDFIELD), [0, 20, 30, 30, 0, 0, 0, 20, 0, 0, 0]),
    Rule::weights(C::RoleIn(STRIKER), [10, 20, 20, 0, 0, 0, 0, 30, 20, 0, 0]),
    Rule::weights(C::Always, [0, 10, 40, 10, 0, 0, 0, 30, 10, 0, 0]),
];

const MIDDLE_THIRD: &[Rule] = &[
    Rule::weights(OPEN_PLAY, [0, 20, 30, 20, 0, 0, 0, 20, 0, 10, 0]),
    Rule::weights(ELITE, [10, 10, 30, 0, 0, 0, 0, 30, 20, 0, 0]),
    Rule::weights(C::RoleIn(MIDFIELD), [0, 20, 30, 10, 0, 0, 0, 30, 10, 0, 0]),
    Rule::weights(C::RoleIn(STRIKER), [0, 20, 20, 0, 0, 0, 0, 30, 30, 0, 0]),
    Rule::weights(C::Always, [0, 10, 40, 0, 0, 0, 0, 30, 20, 0, 0]),
];

const DEFENSIVE_THIRD: &[Rule] = &[
    Rule::weights(OPEN_PLAY, [0, 0, 10, 0, 0, 0, 0, 0, 10, 40, 40]).noted("pressed deep"),
    Rule::weights(ELITE, [0, 10, 40, 0, 0, 0, 0, 30, 20, 0, 0]),
    Rule::weights(C::RoleIn(MIDFIELD), [0, 10, 40, 10, 0, 0, 0, 20, 20, 0, 0]),
    Rule::weights(C::RoleIn(STRIKER), [0, 20, 30, 0, 0, 0, 0, 20, 30, 0, 0]),
    Rule::weights(C::Always, [0, 0, 40, 0, 0, 0, 0, 30, 20, 10, 0]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::actions::rules::Outcome;
    use crate::engine::actions::{find_possible_actions, Action};
    use crate::engine::config::EngineConfig;
    use crate::engine::frame::Frame;
    use crate::engine::test_fixtures::{fixture_match, place, with_ctx};
    use crate::models::{Coord, PlayerRef, Side};

    fn leaves(table: &'static [Rule], out: &mut Vec<[u32; 11]>) {
        for rule in table {
            match rule.then {
                Outcome::Weights(w) => out.push(w.0),
                Outcome::Table(t) => leaves(t, out),
            }
        }
    }

    #[test]
    fn test_every_row_has_weight() {
        let mut rows = Vec::new();
        leaves(WITHOUT_BALL, &mut rows);
        leaves(WITH_BALL, &mut rows);
        assert!(rows.len() > 30);
        assert!(rows.iter().all(|r| r.iter().sum::<u32>() > 0));
    }

    #[test]
    fn test_tables_end_with_catch_all() {
        for table in [WITHOUT_BALL, WITH_BALL, THREAT, ATTACKING_THIRD, MIDDLE_THIRD, DEFENSIVE_THIRD] {
            assert!(matches!(table.last().map(|r| r.when), Some(C::Always)));
        }
    }

    #[test]
    fn test_no_ball_rows_never_kick() {
        let mut rows = Vec::new();
        leaves(WITHOUT_BALL, &mut rows);
        for row in rows {
            for action in Action::BALL_ACTIONS {
                assert_eq!(row[action.index()], 0, "{action} weighted without the ball");
            }
        }
    }

    #[test]
    fn test_goalkeeper_without_ball_only_moves() {
        let m = fixture_match();
        let keeper = PlayerRef::new(Side::Second, 0);
        with_ctx(1, &EngineConfig::default(), |ctx| {
            let d = find_possible_actions(&m, keeper, ctx).unwrap();
            assert_eq!(d.weights.0, [0, 0, 0, 0, 0, 0, 0, 60, 40, 0, 0]);
        });
    }

    #[test]
    fn test_carrier_in_corner_runs() {
        let mut m = fixture_match();
        let r = PlayerRef::new(Side::KickOff, 7);
        let corner = Coord::new(5.0, m.pitch_size.height - 5.0);
        place(&mut m, r, corner);
        m.give_ball_to(r).unwrap();
        with_ctx(2, &EngineConfig::default(), |ctx| {
            let d = find_possible_actions(&m, r, ctx).unwrap();
            assert_eq!(d.weights.0, [0, 0, 0, 0, 0, 0, 0, 20, 80, 0, 0]);
            assert_eq!(d.note, Some("boxed into the corner"));
        });
    }

    #[test]
    fn test_both_attacking_directions_see_the_same_table() {
        let mut m = fixture_match();
        let height = m.pitch_size.height;
        let a = PlayerRef::new(Side::KickOff, 9);
        let b = PlayerRef::new(Side::Second, 9);
        let fa = Frame::for_side(&m, Side::KickOff);
        let fb = Frame::for_side(&m, Side::Second);
        // Same frame position: middle third, far from everyone.
        place(&mut m, a, fa.to_pitch(Coord::new(100.0, height * 0.5)));
        place(&mut m, b, fb.to_pitch(Coord::new(580.0, height * 0.5)));
        m.give_ball_to(a).unwrap();
        let cfg = EngineConfig::default();
        let wa = with_ctx(3, &cfg, |ctx| find_possible_actions(&m, a, ctx).unwrap().weights);
        m.give_ball_to(b).unwrap();
        let wb = with_ctx(3, &cfg, |ctx| find_possible_actions(&m, b, ctx).unwrap().weights);
        assert_eq!(wa, wb);
    }
}
