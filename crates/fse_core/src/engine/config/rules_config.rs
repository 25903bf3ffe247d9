//! Fouls, cards, injuries and offside

use serde::{Deserialize, Serialize};

/// Parameters of one tackle type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TackleRules {
    /// Upper bound of the foul draw `random_int(0, foul_draw)`
    pub foul_draw: i64,
    /// A foul is called when the draw falls strictly inside `(0, foul_window / 2 - 1)`
    pub foul_window: i64,
    /// Distance the losing player is pushed away after a clean tackle
    pub displacement: f64,
    /// Injury odds for the tackler (`1 in injury_high + 1`)
    pub injury_high: i64,
    /// Injury odds for the ball carrier (`1 in injury_low + 1`)
    pub injury_low: i64,
    /// Percent chance of a yellow card on a foul
    pub yellow_pct: f64,
    /// Percent chance of a straight red card on a foul
    pub red_pct: f64,
}

impl TackleRules {
    pub fn standing() -> Self {
        Self {
            foul_draw: 10,
            foul_window: 18,
            displacement: 1.0,
            injury_high: 1500,
            injury_low: 800,
            yellow_pct: 3.0,
            red_pct: 0.2,
        }
    }

    pub fn slide() -> Self {
        Self {
            foul_draw: 11,
            foul_window: 20,
            displacement: 3.0,
            injury_high: 1200,
            injury_low: 600,
            yellow_pct: 6.0,
            red_pct: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub standing_tackle: TackleRules,
    pub slide_tackle: TackleRules,
    /// Per-iteration injury odds for every active player (default: 1 in 40001)
    pub iteration_injury_odds: i64,
    /// Flag and punish offside positions (default: true)
    pub offside_enabled: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            standing_tackle: TackleRules::standing(),
            slide_tackle: TackleRules::slide(),
            iteration_injury_odds: 40_000,
            offside_enabled: true,
        }
    }
}
