pub mod types;
pub mod file;

pub use types::{normalize_name, Difficulty, Player, PlayerStatus, Profile, SessionState, SkillLevel, Team};
pub use file::SessionStore;
