//! Action decision tuning

use serde::{Deserialize, Serialize};

/// Decision engine parameters that are open to tuning.
///
/// The proximity bands of the weight tables themselves (6x6, 10x10, 20/40/80) are
/// fixed game-balance data and live in `physics_constants::proximity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Width of the rectangle searched for a free teammate ahead of the carrier
    /// inside the attacking box (default: 20)
    pub teammate_space_x: f64,
    /// Depth of the same rectangle (default: 20)
    pub teammate_space_y: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self { teammate_space_x: 20.0, teammate_space_y: 20.0 }
    }
}
