//! Ball physics and movement
//!
//! Kicks become a queued flight path on the ball; every iteration consumes one
//! point of it and hands the step to the collision resolver.

mod directions;
mod flight;
mod kicks;

pub use directions::{apply, deflection_offset, kick_offset, pick_direction, Span};
pub use flight::{advance_ball, flight_path, kick, move_ball, plan_flight, remaining_distance};
pub use kicks::{clear, cross, pass, shoot, through_ball};
