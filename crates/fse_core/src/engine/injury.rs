//! Random injuries.

use super::common::is_injured;
use super::rng::SimContext;
use crate::models::{Match, PlayerRef};

/// Marks `r` injured. An injured carrier drops the ball where it stands.
pub fn injure(m: &mut Match, r: PlayerRef) {
    let player = m.player_mut(r);
    if player.injured {
        return;
    }
    player.injured = true;
    let (name, had_ball) = (player.name.clone(), player.has_ball);
    if had_ball {
        m.remove_ball_from_all_players();
    }
    m.log(format!("{} is injured", name));
    log::debug!("{} injured", name);
}

/// Per-iteration injury roll for every active, uninjured player.
pub fn check_injuries(m: &mut Match, ctx: &mut SimContext) {
    let odds = ctx.config.rules.iteration_injury_odds;
    for r in Match::all_refs() {
        let player = m.player(r);
        if !player.is_available() {
            continue;
        }
        if is_injured(ctx, odds) {
            injure(m, r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::test_fixtures::{fixture_match, with_ctx};
    use crate::models::Side;

    #[test]
    fn test_injured_carrier_drops_ball() {
        let mut m = fixture_match();
        let r = m.carrier().unwrap();
        injure(&mut m, r);
        assert!(m.player(r).injured);
        assert_eq!(m.carrier_count(), 0);
        assert!(!m.ball.with_player);
        assert_eq!(m.iteration_log.last().map(String::as_str), Some("Reds ST 9 is injured"));
    }

    #[test]
    fn test_no_injuries_with_test_config() {
        let mut m = fixture_match();
        with_ctx(1, &EngineConfig::test(), |ctx| {
            for _ in 0..50 {
                check_injuries(&mut m, ctx);
            }
        });
        assert!(Match::all_refs().all(|r| !m.player(r).injured));
    }

    #[test]
    fn test_certain_injury_odds_hit_everyone() {
        // `random_int(0, 23)` lands on 23 eventually for every player.
        let mut cfg = EngineConfig::default();
        cfg.rules.iteration_injury_odds = 23;
        let mut m = fixture_match();
        with_ctx(2, &cfg, |ctx| {
            for _ in 0..400 {
                check_injuries(&mut m, ctx);
            }
        });
        assert!(m.team(Side::Second).players.iter().all(|p| p.injured));
    }
}
