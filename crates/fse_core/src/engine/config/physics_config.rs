//! Ball and player movement tuning

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    // === Ball contact ===
    /// Half-size of the box in which a player can touch a passing ball (default: 3)
    pub reach: f64,
    /// Half-size of the box in which a keeper can attempt a save (default: 8)
    pub save_box: f64,
    /// Residual power below which a deflecting player keeps the ball (default: 75)
    pub deflection_control_power: f64,

    // === Player steps (units per iteration, per axis) ===
    /// Run step without the ball (default: 2)
    pub run_step: f64,
    /// Sprint step without the ball (default: 4)
    pub sprint_step: f64,
    /// Forward run step range with the ball (default: 2..4)
    pub dribble_step: (f64, f64),
    /// Forward sprint step range with the ball (default: 3..6)
    pub dribble_sprint_step: (f64, f64),

    // === Fitness ===
    /// Fitness cost per running iteration (default: 0.005)
    pub run_fitness_cost: f64,
    /// Fitness cost per sprinting iteration (default: 0.01)
    pub sprint_fitness_cost: f64,
    /// Below this fitness every step is halved (default: 20)
    pub tired_threshold: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            reach: 3.0,
            save_box: 8.0,
            deflection_control_power: 75.0,

            run_step: 2.0,
            sprint_step: 4.0,
            dribble_step: (2.0, 4.0),
            dribble_sprint_step: (3.0, 6.0),

            run_fitness_cost: 0.005,
            sprint_fitness_cost: 0.01,
            tired_threshold: 20.0,
        }
    }
}
