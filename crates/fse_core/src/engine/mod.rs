pub mod actions;
pub mod ball;
pub mod collision;
pub mod common;
pub mod config;
pub mod controller;
pub mod frame;
pub mod injury;
pub mod intent;
pub mod movement;
pub mod offside;
pub mod physics_constants;
pub mod rng;
pub mod set_pieces;
pub mod simulation;
pub mod tactics;

#[cfg(test)]
pub mod test_fixtures;

pub use config::EngineConfig;
pub use controller::{initiate_game, play_iteration, start_second_half};
pub use rng::SimContext;
pub use simulation::{simulate_batch, BatchJob, MatchSummary, Simulation, SimulationSnapshot};
