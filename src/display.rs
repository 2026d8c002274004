use std::fmt::Write;

use crate::dashboard::{Court, CourtState, DerivedCourtStatus};
use crate::store::{PlayerStatus, SessionState};
use crate::teams;

/// Formats a player name with the team tag, e.g. `[Lahore Lions] Ali`
pub fn format_player_name(team: &str, name: &str) -> String {
    if team.is_empty() {
        name.to_string()
    } else {
        format!("[{}] {}", team, name)
    }
}

fn status_label(status: PlayerStatus) -> &'static str {
    match status {
        PlayerStatus::In => "IN",
        PlayerStatus::Out => "OUT",
    }
}

/// Renders the stored session: host, roster with team tags and the team table.
pub fn render_session(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Session hosted by {} ===", state.host);
    let _ = writeln!(out, "Cutoff: {:02}:00", state.cutoff_hour);
    let _ = writeln!(
        out,
        "Players: {} in / {} total",
        state.active_players(),
        state.players.len()
    );

    if state.players.is_empty() {
        let _ = writeln!(out, "  [EMPTY]");
    }
    for player in &state.players {
        let team = teams::assign(&player.name, &state.teams);
        let _ = writeln!(
            out,
            "  {:<4} {} ({:?}, {} pts)",
            status_label(player.status),
            format_player_name(team, &player.name),
            player.skill_level,
            player.points
        );
    }

    let mut ranked: Vec<_> = state.teams.iter().collect();
    ranked.sort_by(|a, b| b.wins.cmp(&a.wins));
    let _ = writeln!(out, "\nTeams by wins:");
    for (rank, team) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  #{} {} - {} wins ({:?}, {} members)",
            rank + 1,
            team.name,
            team.wins,
            team.difficulty,
            team.members.len()
        );
    }
    out
}

/// Renders one court board and its derived counts.
pub fn render_courts(courts: &[Court], derived: &DerivedCourtStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nCourts:");
    for court in courts {
        let waiting = match court.status {
            CourtState::Free => String::new(),
            _ => format!(", {} waiting", court.waiting),
        };
        let _ = writeln!(
            out,
            "  Court {} ({:?}) -> {:?}, next slot {}{}",
            court.id, court.court_type, court.status, court.next_slot, waiting
        );
    }
    let _ = writeln!(
        out,
        "Available: {}/{} (indoor {}/{}, outdoor {}/{})",
        derived.available,
        derived.total,
        derived.indoor.available,
        derived.indoor.total,
        derived.outdoor.available,
        derived.outdoor.total
    );
    out
}
