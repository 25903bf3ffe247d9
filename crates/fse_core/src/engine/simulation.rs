//! Seeded simulation driver
//!
//! [`Simulation`] owns one [`Match`], a `ChaCha8Rng` and the tuning. Seeding the
//! generator makes every run reproducible; snapshots carry the stream position so
//! a restored simulation continues with exactly the same draws.
//!
//! ```rust
//! use fse_core::engine::simulation::Simulation;
//! use fse_core::engine::config::EngineConfig;
//! use fse_core::setup::load_match;
//!
//! # fn demo(json: &str) -> fse_core::Result<()> {
//! let (first, second, pitch) = load_match(json)?;
//! let mut sim = Simulation::new(first, second, pitch, EngineConfig::default(), 42)?;
//! let summary = sim.run(500)?;
//! println!("{} {} - {} {}", summary.kick_off_team, summary.score.0, summary.score.1, summary.second_team);
//! # Ok(())
//! # }
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::EngineConfig;
use super::controller::{initiate_game, play_iteration, start_second_half};
use super::rng::SimContext;
use crate::error::Result;
use crate::models::{Match, PitchSize, Team, TeamStatistics};

/// Final score and team statistics of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: Uuid,
    pub kick_off_team: String,
    pub second_team: String,
    /// Goals as (kick-off team, second team).
    pub score: (u32, u32),
    pub iterations: u64,
    pub kick_off_team_statistics: TeamStatistics,
    pub second_team_statistics: TeamStatistics,
}

impl MatchSummary {
    pub fn from_match(m: &Match, iterations: u64) -> Self {
        Self {
            match_id: m.match_id,
            kick_off_team: m.kick_off_team.name.clone(),
            second_team: m.second_team.name.clone(),
            score: (m.kick_off_team_statistics.goals, m.second_team_statistics.goals),
            iterations,
            kick_off_team_statistics: m.kick_off_team_statistics,
            second_team_statistics: m.second_team_statistics,
        }
    }
}

/// Everything needed to resume a simulation: the match plus the RNG position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub state: Match,
    pub seed: u64,
    pub word_pos: u128,
    pub iteration: u64,
}

pub struct Simulation {
    state: Match,
    rng: ChaCha8Rng,
    seed: u64,
    config: EngineConfig,
    iteration: u64,
}

impl Simulation {
    /// Initiates a fresh match from two rosters. Ids and the kick-off side are
    /// drawn from the seeded stream.
    pub fn new(first: Team, second: Team, pitch: PitchSize, config: EngineConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = {
            let mut ctx = SimContext::new(&mut rng, &config);
            initiate_game(first, second, pitch, &mut ctx)?
        };
        Ok(Self { state, rng, seed, config, iteration: 0 })
    }

    /// Drives an existing match with a fresh stream.
    pub fn from_match(state: Match, config: EngineConfig, seed: u64) -> Self {
        Self { state, rng: ChaCha8Rng::seed_from_u64(seed), seed, config, iteration: 0 }
    }

    pub fn state(&self) -> &Match {
        &self.state
    }

    /// Mutable access between iterations, e.g. to queue a player action.
    pub fn state_mut(&mut self) -> &mut Match {
        &mut self.state
    }

    pub fn into_state(self) -> Match {
        self.state
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plays one iteration and returns the updated match.
    pub fn step(&mut self) -> Result<&Match> {
        let mut ctx = SimContext::new(&mut self.rng, &self.config);
        play_iteration(&mut self.state, &mut ctx)?;
        self.iteration += 1;
        Ok(&self.state)
    }

    pub fn second_half(&mut self) -> Result<()> {
        let mut ctx = SimContext::new(&mut self.rng, &self.config);
        start_second_half(&mut self.state, &mut ctx)
    }

    /// Plays both halves of `iterations_per_half` each. A simulation already in
    /// its second half only finishes that half.
    pub fn run(&mut self, iterations_per_half: u64) -> Result<MatchSummary> {
        if self.state.half < 2 {
            for _ in 0..iterations_per_half {
                self.step()?;
            }
            self.second_half()?;
        }
        for _ in 0..iterations_per_half {
            self.step()?;
        }
        let summary = MatchSummary::from_match(&self.state, self.iteration);
        log::debug!(
            "Full time: {} {} - {} {}",
            summary.kick_off_team,
            summary.score.0,
            summary.score.1,
            summary.second_team
        );
        Ok(summary)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            state: self.state.clone(),
            seed: self.seed,
            word_pos: self.rng.get_word_pos(),
            iteration: self.iteration,
        }
    }

    pub fn restore(snapshot: SimulationSnapshot, config: EngineConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(snapshot.seed);
        rng.set_word_pos(snapshot.word_pos);
        Self {
            state: snapshot.state,
            rng,
            seed: snapshot.seed,
            config,
            iteration: snapshot.iteration,
        }
    }
}

/// One independent match for [`simulate_batch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    pub first: Team,
    pub second: Team,
    pub pitch: PitchSize,
    pub seed: u64,
    pub iterations_per_half: u64,
}

/// Runs independent matches in parallel. Each match stays strictly sequential;
/// results come back in job order.
pub fn simulate_batch(jobs: &[BatchJob], config: &EngineConfig) -> Vec<Result<MatchSummary>> {
    jobs.par_iter()
        .map(|job| {
            let mut sim = Simulation::new(
                job.first.clone(),
                job.second.clone(),
                job.pitch,
                config.clone(),
                job.seed,
            )?;
            sim.run(job.iterations_per_half)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{fixture_team, PITCH};
    use sha2::{Digest, Sha256};

    fn new_sim(seed: u64, config: EngineConfig) -> Simulation {
        let reds = fixture_team("Reds", 0, true);
        let blues = fixture_team("Blues", 0, true);
        Simulation::new(reds, blues, PITCH, config, seed).unwrap()
    }

    fn state_hash(m: &Match) -> Vec<u8> {
        let json = serde_json::to_vec(m).unwrap();
        Sha256::digest(&json).to_vec()
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut a = new_sim(42, EngineConfig::default());
        let mut b = new_sim(42, EngineConfig::default());
        for _ in 0..200 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(state_hash(a.state()), state_hash(b.state()));
    }

    #[test]
    fn test_restored_snapshot_replays_identically() {
        let mut sim = new_sim(7, EngineConfig::default());
        for _ in 0..50 {
            sim.step().unwrap();
        }
        let snapshot = sim.snapshot();
        for _ in 0..100 {
            sim.step().unwrap();
        }

        let mut resumed = Simulation::restore(snapshot, EngineConfig::default());
        assert_eq!(resumed.iteration(), 50);
        for _ in 0..100 {
            resumed.step().unwrap();
        }
        assert_eq!(resumed.iteration(), sim.iteration());
        assert_eq!(state_hash(resumed.state()), state_hash(sim.state()));
    }

    #[test]
    fn test_snapshot_survives_json() {
        let mut sim = new_sim(3, EngineConfig::test());
        for _ in 0..30 {
            sim.step().unwrap();
        }
        let snapshot = sim.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SimulationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.word_pos, snapshot.word_pos);
        assert_eq!(back.state, snapshot.state);
    }

    #[test]
    fn test_run_plays_both_halves() {
        let mut sim = new_sim(5, EngineConfig::test());
        let summary = sim.run(40).unwrap();
        assert_eq!(summary.iterations, 80);
        assert_eq!(sim.state().half, 2);
        assert_eq!(summary.score.0, sim.state().kick_off_team_statistics.goals);
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let jobs: Vec<BatchJob> = (0..4)
            .map(|seed| BatchJob {
                first: fixture_team("Reds", 0, true),
                second: fixture_team("Blues", 0, true),
                pitch: PITCH,
                seed,
                iterations_per_half: 25,
            })
            .collect();
        let config = EngineConfig::default();
        let results = simulate_batch(&jobs, &config);
        assert_eq!(results.len(), 4);
        for (job, result) in jobs.iter().zip(results) {
            let mut sim = Simulation::new(
                job.first.clone(),
                job.second.clone(),
                job.pitch,
                config.clone(),
                job.seed,
            )
            .unwrap();
            assert_eq!(result.unwrap(), sim.run(job.iterations_per_half).unwrap());
        }
    }

    #[test]
    fn test_full_matches_rarely_end_short_handed() {
        let matches = 6;
        let mut red_cards = 0;
        for seed in 100..100 + matches {
            let mut sim = new_sim(seed, EngineConfig::default());
            sim.run(1500).unwrap();
            red_cards += Match::all_refs().map(|r| sim.state().player(r).stats.cards.red).sum::<u32>();
        }
        assert!(red_cards < 2 * matches as u32, "{} red cards in {} matches", red_cards, matches);
    }

    #[test]
    fn test_played_snapshot_survives_json_exactly() {
        let mut sim = new_sim(13, EngineConfig::default());
        for _ in 0..120 {
            sim.step().unwrap();
        }
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        let back: SimulationSnapshot = serde_json::from_str(&json).unwrap();
        let mut resumed = Simulation::restore(back, EngineConfig::default());
        for _ in 0..80 {
            sim.step().unwrap();
            resumed.step().unwrap();
        }
        assert_eq!(state_hash(resumed.state()), state_hash(sim.state()));
    }
}
