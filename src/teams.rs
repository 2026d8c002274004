use crate::store::{normalize_name, Team};

/// Team name reported when no teams are configured.
pub const UNASSIGNED: &str = "Unassigned";

/// Stable 64-bit hash of a player name (first 8 bytes of BLAKE3, little endian).
/// Case and surrounding whitespace do not change the result.
pub fn name_hash(name: &str) -> u64 {
    let digest = blake3::hash(normalize_name(name).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Index of the team a name maps to, or `None` when there are no teams.
pub fn team_index(name: &str, team_count: usize) -> Option<usize> {
    if team_count == 0 {
        return None;
    }
    Some((name_hash(name) % team_count as u64) as usize)
}

/// Full team record for a player name.
pub fn resolve<'a>(name: &str, teams: &'a [Team]) -> Option<&'a Team> {
    team_index(name, teams.len()).map(|i| &teams[i])
}

/// Team name for a player name; [`UNASSIGNED`] when `teams` is empty.
pub fn assign<'a>(name: &str, teams: &'a [Team]) -> &'a str {
    resolve(name, teams).map(|t| t.name.as_str()).unwrap_or(UNASSIGNED)
}
