pub mod types;
pub mod courts;
pub mod mock;

use rand::Rng;
use serde::Serialize;

use crate::store::{Player, SessionState, Team};

pub use courts::{derive_status, generate_courts};
pub use mock::generate_stats;
pub use types::{Court, CourtState, DashboardStats, DerivedCourtStatus};

/// Payload of `GET /api/dashboard`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub court_status: DerivedCourtStatus,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub active_players: usize,
    pub total_players: usize,
}

/// Combines the stored session with freshly generated stats.
#[derive(Debug, Clone, Copy)]
pub struct DashboardAggregator {
    sort_teams_by_wins: bool,
}

impl DashboardAggregator {
    pub fn new(sort_teams_by_wins: bool) -> Self {
        DashboardAggregator { sort_teams_by_wins }
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R, state: &SessionState, user: Option<&str>) -> DashboardResponse {
        let stats = generate_stats(rng, state, user);
        // Counts come from the same board the stats carry
        let court_status = derive_status(&stats.detailed_courts);

        let mut teams = state.teams.clone();
        if self.sort_teams_by_wins {
            // Stable, so equal wins keep their stored order
            teams.sort_by(|a, b| b.wins.cmp(&a.wins));
        }

        DashboardResponse {
            stats,
            court_status,
            teams,
            players: state.players.clone(),
            active_players: state.active_players(),
            total_players: state.players.len(),
        }
    }
}
