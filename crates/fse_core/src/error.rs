use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    // Invariant violations: the engine reached a state valid input cannot produce.
    #[error("No player position for {player}")]
    NoPlayerPosition { player: String },

    #[error("Invalid action: {0}")]
    UnknownAction(String),

    #[error("Unhandled free kick position: y = {y}")]
    UnhandledFreeKickBand { y: f64 },

    #[error("Player not found: {0}")]
    PlayerNotFound(u64),

    // Setup validation
    #[error("Invalid team size: expected {expected}, found {found}")]
    InvalidTeamSize { expected: usize, found: usize },

    #[error("Invalid pitch: {0}")]
    InvalidPitch(String),

    #[error("Invalid player position: {0}")]
    InvalidPosition(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl MatchError {
    /// Invariant violations are defects, never conditions to recover from.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            MatchError::NoPlayerPosition { .. }
                | MatchError::UnknownAction(_)
                | MatchError::UnhandledFreeKickBand { .. }
                | MatchError::PlayerNotFound(_)
        )
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
