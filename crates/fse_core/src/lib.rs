//! # fse_core - Iteration-based Football Match Simulation Engine
//!
//! Two rosters and a pitch go in; every call to [`play_iteration`] advances the
//! match by one tick, moving players and the ball, resolving possession and
//! tackles, and restarting play when the ball goes out.
//!
//! ## Features
//! - Deterministic with a seeded generator (same seed = same match)
//! - Tuned decision tables for every player, every iteration
//! - Throw-ins, corners, goal kicks, free kicks and penalties
//! - JSON match state; compact binary snapshots in [`save`]

#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod setup;

pub use engine::actions::{set_player_action, Action, ActionWeights};
pub use engine::config::EngineConfig;
pub use engine::controller::{initiate_game, play_iteration, start_second_half};
pub use engine::rng::SimContext;
pub use engine::simulation::{
    simulate_batch, BatchJob, MatchSummary, Simulation, SimulationSnapshot,
};
pub use error::{MatchError, Result};
pub use models::{Match, PitchSize, Player, Team};
pub use save::{MatchSave, SaveError};
pub use setup::load_match;
