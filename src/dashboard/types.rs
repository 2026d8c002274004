use serde::Serialize;

use crate::store::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CourtType {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CourtState {
    Free,
    Booked,
    Maintenance,
}

/// One court on the board, regenerated for every dashboard request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: u8,
    #[serde(rename = "type")]
    pub court_type: CourtType,
    pub status: CourtState,
    pub waiting: u8,
    pub next_slot: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourtCounts {
    pub total: usize,
    pub available: usize,
}

/// Aggregate counts over the detailed courts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedCourtStatus {
    pub total: usize,
    pub available: usize,
    pub indoor: CourtCounts,
    pub outdoor: CourtCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct Weather {
    pub condition: &'static str,
    pub temp: String,
    pub wind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextMatch {
    pub teams: &'static str,
    pub time: &'static str,
    pub court: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tournament {
    pub name: &'static str,
    pub stage: &'static str,
    pub prize: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManOfTheMatch {
    pub name: &'static str,
    pub points: u32,
    pub avatar: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTeam {
    pub name: String,
    pub rank: u8,
    pub wins: u32,
    pub difficulty: Difficulty,
    pub next_match: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub weather: Weather,
    pub next_match: NextMatch,
    pub man_of_the_match: ManOfTheMatch,
    pub discount: &'static str,
    pub waiting_list: u8,
    pub detailed_courts: Vec<Court>,
    pub tournaments: Vec<Tournament>,
    pub my_team: Option<MyTeam>,
}
