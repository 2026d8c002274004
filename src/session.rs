//! Session operations: join, leave, profile, reset and the read views.
//!
//! Every mutation is a single [`SessionStore::update`] call, so the
//! read-modify-write of one request never interleaves with another.

use chrono::{DateTime, Local, NaiveDateTime, SubsecRound, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dashboard::{DashboardAggregator, DashboardResponse};
use crate::error::ApiError;
use crate::store::{Player, PlayerStatus, Profile, SessionState, SessionStore, SkillLevel};
use crate::teams;

const MAX_STARTER_POINTS: u32 = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub players: Vec<Player>,
    pub cutoff_hour: u8,
    pub server_time: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub status: &'static str,
    pub team: String,
    pub data: SessionState,
}

#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub success: bool,
    pub profile: Profile,
}

/// Body of `POST /api/profile`. Fields left out keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub slots: Option<String>,
}

pub struct SessionService {
    store: SessionStore,
    aggregator: DashboardAggregator,
}

/// Trimmed name, or a validation error when it is missing or blank.
fn required_name(name: Option<&str>) -> Result<&str, ApiError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ApiError::validation("Name required")),
    }
}

/// Local time at microsecond precision, the resolution timestamps are stored with.
fn local_now() -> DateTime<Local> {
    Local::now().trunc_subsecs(6)
}

fn new_player<R: Rng + ?Sized>(rng: &mut R, name: &str, joined_at: NaiveDateTime) -> Player {
    Player {
        name: name.to_string(),
        status: PlayerStatus::In,
        joined_at,
        points: rng.gen_range(0..=MAX_STARTER_POINTS),
        skill_level: SkillLevel::ALL.choose(rng).copied().unwrap_or_default(),
        profile: Profile::default(),
    }
}

impl SessionService {
    pub fn new(store: SessionStore, aggregator: DashboardAggregator) -> Self {
        SessionService { store, aggregator }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn session(&self) -> Result<SessionView, ApiError> {
        let state = self.store.load()?;
        Ok(SessionView {
            players: state.players,
            cutoff_hour: state.cutoff_hour,
            server_time: local_now().naive_local(),
        })
    }

    pub fn dashboard<R: Rng + ?Sized>(&self, rng: &mut R, user: Option<&str>) -> Result<DashboardResponse, ApiError> {
        let state = self.store.load()?;
        Ok(self.aggregator.build(rng, &state, user))
    }

    /// Marks the player as in, creating the record on first join.
    pub fn join<R: Rng + ?Sized>(&self, rng: &mut R, name: Option<&str>) -> Result<JoinResponse, ApiError> {
        let name = required_name(name)?;
        let now = local_now();

        self.store.update(|state| {
            match state.find_player_mut(name) {
                Some(player) => {
                    player.status = PlayerStatus::In;
                    log::info!("{} is back in", player.name);
                }
                None => {
                    state.players.push(new_player(rng, name, now.naive_local()));
                    log::info!("{} joined the session", name);
                }
            }
            if now.hour() >= u32::from(state.cutoff_hour) {
                log::info!("{} joined after the {}:00 cutoff", name, state.cutoff_hour);
            }

            Ok(JoinResponse {
                status: "joined",
                team: teams::assign(name, &state.teams).to_string(),
                data: state.clone(),
            })
        })
    }

    /// Marks the player as out. Unknown names are ignored.
    pub fn leave(&self, name: Option<&str>) -> Result<LeaveResponse, ApiError> {
        let name = required_name(name)?;

        self.store.update(|state| {
            match state.find_player_mut(name) {
                Some(player) => {
                    player.status = PlayerStatus::Out;
                    log::info!("{} left the session", player.name);
                }
                None => log::debug!("Leave for unknown player {}", name),
            }
            Ok(LeaveResponse { status: "left" })
        })
    }

    pub fn profile(&self, name: Option<&str>) -> Result<Profile, ApiError> {
        let name = required_name(name)?;
        let state = self.store.load()?;
        state
            .find_player(name)
            .map(|p| p.profile.clone())
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> Result<ProfileUpdated, ApiError> {
        let name = required_name(update.name.as_deref())?;

        self.store.update(|state| {
            let player = state
                .find_player_mut(name)
                .ok_or_else(|| ApiError::not_found("User not found"))?;

            if let Some(email) = update.email {
                player.profile.email = email;
            }
            if let Some(phone) = update.phone {
                player.profile.phone = phone;
            }
            if let Some(slots) = update.slots {
                player.profile.slots = slots;
            }

            Ok(ProfileUpdated {
                success: true,
                profile: player.profile.clone(),
            })
        })
    }

    /// Drops every player. Host, cutoff hour and teams stay.
    pub fn reset(&self) -> Result<SessionState, ApiError> {
        self.store.update(|state| {
            log::info!("Resetting session ({} players removed)", state.players.len());
            state.players.clear();
            Ok(state.clone())
        })
    }
}
