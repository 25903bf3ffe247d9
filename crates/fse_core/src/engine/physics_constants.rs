//! Fixed constants for match simulation.
//!
//! These are tuned game-balance values. Values that are meant to be adjusted live in
//! `engine::config` instead.

// ============================================================
// Proximity windows (rectangular, |dx| < X and |dy| < Y)
// ============================================================
pub mod proximity {
    /// Ball-distance bands for players without the ball
    pub const BALL_CLOSE: f64 = 20.0;
    pub const BALL_NEAR: f64 = 40.0;
    pub const BALL_MID: f64 = 80.0;

    /// Opposition pressure inside the attacking box
    pub const THREAT_OPPOSITION: f64 = 6.0;

    /// Opposition pressure in open play
    pub const OPEN_PLAY_OPPOSITION: f64 = 10.0;

    /// Opposition pressure on a keeper in possession (x, y)
    pub const KEEPER_PRESSURE: (f64, f64) = (10.0, 25.0);

    /// Size of the square treated as a pitch corner
    pub const CORNER_ZONE: f64 = 15.0;
}

// ============================================================
// Skill thresholds
// ============================================================
pub mod skills {
    /// Shooting above this unlocks long-range shots in open play
    pub const ELITE_SHOOTING: f64 = 85.0;

    /// Upper bound of the on-target roll
    pub const SHOT_ROLL: f64 = 100.0;

    /// Upper bound of the keeper save roll
    pub const SAVE_ROLL: f64 = 100.0;

    /// Tackle and retention scores vary by +/- this much
    pub const TACKLE_VARIANCE: f64 = 5.0;
}

// ============================================================
// Kick power
// ============================================================
pub mod kick {
    /// `power = floor(strength) * uniform(MULTIPLIER_MIN, MULTIPLIER_MAX)`
    pub const MULTIPLIER_MIN: f64 = 1.0;
    pub const MULTIPLIER_MAX: f64 = 5.0;

    /// Distance covered per trajectory step is `uniform(STEP_MIN, STEP_MAX)`
    pub const STEP_MIN: f64 = 2.0;
    pub const STEP_MAX: f64 = 3.0;

    /// Lateral scatter of straight directional kicks
    pub const LATERAL_SCATTER: f64 = 20.0;

    /// Lateral scatter of straight deflections
    pub const DEFLECTION_SCATTER: f64 = 3.0;

    /// Furthest an off-target shot lands from the post
    pub const WIDE_MISS: f64 = 20.0;

    /// Pass scatter is `(100 - passing) / PASS_ERROR_DIVISOR` per axis
    pub const PASS_ERROR_DIVISOR: f64 = 5.0;

    /// How far ahead of the runner a through ball is played
    pub const THROUGH_BALL_LEAD: (f64, f64) = (20.0, 40.0);
}

// ============================================================
// Injuries
// ============================================================
pub mod injury {
    /// A draw of `random_int(0, odds)` equal to this value is an injury
    pub const HIT: i64 = 23;
}

// ============================================================
// Restarts
// ============================================================
pub mod restart {
    /// Free kicks closer than this to the kicking team's own byline
    pub const OWN_BAND: f64 = 100.0;

    /// Distance of the goal-kick spot from the byline
    pub const GOAL_KICK_DEPTH: f64 = 20.0;

    /// Players in a defensive wall
    pub const WALL_SIZE: usize = 4;

    /// Gap between wall players
    pub const WALL_SPACING: f64 = 3.0;

    /// Throw-in support distances from the touchline
    pub const THROW_SUPPORT: f64 = 15.0;
    pub const THROW_MARKER: f64 = 10.0;

    /// Offset of the second kick-off player from the centre spot
    pub const KICK_OFF_PARTNER: f64 = 20.0;

    /// Penalty spot distance from the byline as a fraction of pitch height
    pub const PENALTY_SPOT: f64 = 11.0 / 105.0;

    /// Distance outside the box where players wait during a penalty
    pub const PENALTY_ARC_GAP: f64 = 20.0;

    /// Inset of the penalty award zone from the box sides
    pub const PENALTY_ZONE_INSET: f64 = 5.0;
}

// ============================================================
// Intent positions
// ============================================================
pub mod intent {
    /// Forward shift of outfield players while attacking, as a fraction of pitch height
    pub const ATTACK_ADVANCE: f64 = 1.0 / 6.0;

    /// Forward shift of the keeper while attacking
    pub const KEEPER_ADVANCE: f64 = 1.0 / 20.0;

    /// Share of the horizontal gap to the ball closed by each intent
    pub const ATTACK_PULL: f64 = 0.2;
    pub const DEFEND_PULL: f64 = 0.35;
    pub const NEUTRAL_PULL: f64 = 0.1;
}
