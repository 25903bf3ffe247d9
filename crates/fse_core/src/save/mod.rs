//! Match snapshot persistence: MessagePack + LZ4 with a SHA-256 trailer.

pub mod error;
pub mod format;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, load_from_path, save_to_path, serialize_and_compress, MatchSave};

pub const SAVE_VERSION: u32 = 1;
