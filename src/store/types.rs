use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "Coordinator";
pub const DEFAULT_CUTOFF_HOUR: u8 = 17;

/// Lowercased, trimmed form used for every name comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Pro,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Pro,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Contact details a player can edit from the profile view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub email: String,
    pub phone: String,
    pub slots: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub status: PlayerStatus,
    #[serde(alias = "joined_at")]
    pub joined_at: NaiveDateTime,
    #[serde(default)]
    pub points: u32,
    #[serde(default, alias = "skill_level")]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub profile: Profile,
}

impl Player {
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

/// Teams are seeded by hand in the data file; the API only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub members: Vec<String>,
}

/// The whole persisted document. Always read and written as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u8,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub court_status: serde_json::Map<String, serde_json::Value>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_cutoff_hour() -> u8 {
    DEFAULT_CUTOFF_HOUR
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(DEFAULT_HOST, DEFAULT_CUTOFF_HOUR)
    }
}

impl SessionState {
    pub fn new(host: impl Into<String>, cutoff_hour: u8) -> Self {
        SessionState {
            host: host.into(),
            cutoff_hour,
            players: Vec::new(),
            teams: Vec::new(),
            court_status: serde_json::Map::new(),
        }
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.matches(name))
    }

    pub fn find_player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.matches(name))
    }

    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|p| p.status == PlayerStatus::In).count()
    }
}
