use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::SaveError;
use super::SAVE_VERSION;
use crate::engine::config::EngineConfig;
use crate::engine::simulation::{Simulation, SimulationSnapshot};
use crate::models::Match;

/// A paused simulation: match state, RNG position and the tuning it ran with.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MatchSave {
    /// Save format version
    pub version: u32,

    pub saved_at: DateTime<Utc>,

    pub snapshot: SimulationSnapshot,

    #[serde(default)]
    pub config: EngineConfig,
}

impl MatchSave {
    pub fn new(sim: &Simulation) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            snapshot: sim.snapshot(),
            config: sim.config().clone(),
        }
    }

    pub fn state(&self) -> &Match {
        &self.snapshot.state
    }

    /// Resumes the saved simulation on the exact random stream it left.
    pub fn into_simulation(self) -> Simulation {
        Simulation::restore(self.snapshot, self.config)
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        let state = self.state();
        if state.half == 0 || state.carrier_count() > 1 {
            return Err(SaveError::Corrupted);
        }
        let unique_ids = state.kick_off_team.team_id != state.second_team.team_id;
        if !unique_ids {
            return Err(SaveError::Corrupted);
        }
        Ok(())
    }
}

/// Serialize and compress a match save
pub fn serialize_and_compress(save: &MatchSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    let msgpack = to_vec_named(save)?;
    let compressed = compress_prepend_size(&msgpack);

    let checksum = Sha256::digest(&compressed);
    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Decompress and deserialize a match save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<MatchSave, SaveError> {
    // Size header plus checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);
    if Sha256::digest(payload)[..] != *checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: MatchSave = from_slice(&msgpack)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }
    save.validate()?;
    Ok(save)
}

/// Writes through a temp file and renames, so a crash never leaves half a save.
pub fn save_to_path(path: &Path, save: &MatchSave) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = serialize_and_compress(save)?;
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    log::debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<MatchSave, SaveError> {
    if !path.exists() {
        return Err(SaveError::FileNotFound { path: path.display().to_string() });
    }

    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;
    let save = decompress_and_deserialize(&data)?;

    log::debug!("Loaded {} bytes from {:?}", data.len(), path);
    Ok(save)
}
