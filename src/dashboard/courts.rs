use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Court, CourtCounts, CourtState, CourtType, DerivedCourtStatus};

pub const COURT_COUNT: u8 = 8;
/// Courts 1..=INDOOR_COURTS are indoor, the rest outdoor.
pub const INDOOR_COURTS: u8 = 4;

/// Status mix dealt across the courts on every refresh: 5 booked, 2 free, 1 in maintenance.
const STATUS_MIX: [CourtState; COURT_COUNT as usize] = [
    CourtState::Booked,
    CourtState::Booked,
    CourtState::Booked,
    CourtState::Booked,
    CourtState::Booked,
    CourtState::Free,
    CourtState::Free,
    CourtState::Maintenance,
];

pub fn court_type(id: u8) -> CourtType {
    if id <= INDOOR_COURTS {
        CourtType::Indoor
    } else {
        CourtType::Outdoor
    }
}

/// Shuffles the fixed status mix over the courts, so a board never shows
/// every court in the same state.
pub fn generate_courts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Court> {
    let mut statuses = STATUS_MIX;
    statuses.shuffle(rng);

    statuses
        .iter()
        .zip(1..=COURT_COUNT)
        .map(|(&status, id)| {
            let waiting = match status {
                CourtState::Free => 0,
                _ => rng.gen_range(1..=3),
            };
            Court {
                id,
                court_type: court_type(id),
                status,
                waiting,
                next_slot: if status == CourtState::Booked { "18:00" } else { "Now" },
            }
        })
        .collect()
}

/// Counts totals and free courts, overall and per court type.
pub fn derive_status(courts: &[Court]) -> DerivedCourtStatus {
    let mut derived = DerivedCourtStatus::default();
    for court in courts {
        let free = court.status == CourtState::Free;
        let bucket = match court.court_type {
            CourtType::Indoor => &mut derived.indoor,
            CourtType::Outdoor => &mut derived.outdoor,
        };
        bump(bucket, free);
        derived.total += 1;
        if free {
            derived.available += 1;
        }
    }
    derived
}

fn bump(counts: &mut CourtCounts, free: bool) {
    counts.total += 1;
    if free {
        counts.available += 1;
    }
}
