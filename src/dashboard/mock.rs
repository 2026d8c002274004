use rand::seq::SliceRandom;
use rand::Rng;

use super::courts::generate_courts;
use super::types::{DashboardStats, ManOfTheMatch, MyTeam, NextMatch, Tournament, Weather};
use crate::store::SessionState;
use crate::teams;

const WEATHER_CONDITIONS: [&str; 4] = ["Clear Night", "Breezy", "Humid", "Perfect Padel Weather"];

const DISCOUNTS: [&str; 3] = [
    "20% Off for Students",
    "Buy 1 Get 1 Hour Free",
    "Weekend Special: Free Gatorade",
];

/// Opponent shown when the player's team is the only one configured.
const NO_OPPONENT: &str = "TBD";

pub fn tournaments() -> Vec<Tournament> {
    vec![
        Tournament {
            name: "Winter Open 2026",
            stage: "Quarter Finals",
            prize: "50,000 PKR",
        },
        Tournament {
            name: "Corporate League",
            stage: "Group Stage",
            prize: "100,000 PKR",
        },
    ]
}

pub fn man_of_the_match() -> ManOfTheMatch {
    ManOfTheMatch {
        name: "Babar Azam",
        points: 1500,
        avatar: "👑",
    }
}

pub fn weather<R: Rng + ?Sized>(rng: &mut R) -> Weather {
    Weather {
        condition: pick(rng, &WEATHER_CONDITIONS),
        temp: format!("{}°C", rng.gen_range(18..=28)),
        wind: format!("{} km/h", rng.gen_range(5..=15)),
    }
}

pub fn next_match<R: Rng + ?Sized>(rng: &mut R) -> NextMatch {
    NextMatch {
        teams: "Lahore Lions vs Karachi Kings",
        time: "20:00",
        court: format!("Court {}", rng.gen_range(1..=4)),
    }
}

/// The caller's team card. `None` without a user name or without teams.
pub fn my_team<R: Rng + ?Sized>(rng: &mut R, state: &SessionState, user: Option<&str>) -> Option<MyTeam> {
    let user = user.map(str::trim).filter(|u| !u.is_empty())?;
    let team = teams::resolve(user, &state.teams)?;

    let opponents: Vec<&str> = state
        .teams
        .iter()
        .filter(|t| t.name != team.name)
        .map(|t| t.name.as_str())
        .collect();
    let opponent = opponents.choose(rng).copied().unwrap_or(NO_OPPONENT);

    Some(MyTeam {
        name: team.name.clone(),
        rank: rng.gen_range(1..=5),
        wins: team.wins,
        difficulty: team.difficulty,
        next_match: format!("vs {} @ 20:00", opponent),
        members: team.members.clone(),
    })
}

/// Builds a fresh set of dashboard stats. Only cosmetic values are random;
/// the team card comes from the stored teams.
pub fn generate_stats<R: Rng + ?Sized>(rng: &mut R, state: &SessionState, user: Option<&str>) -> DashboardStats {
    DashboardStats {
        weather: weather(rng),
        next_match: next_match(rng),
        man_of_the_match: man_of_the_match(),
        discount: pick(rng, &DISCOUNTS),
        waiting_list: rng.gen_range(2..=8),
        detailed_courts: generate_courts(rng),
        tournaments: tournaments(),
        my_team: my_team(rng, state, user),
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Difficulty, Team};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with_teams(names: &[(&str, u32)]) -> SessionState {
        let mut state = SessionState::default();
        state.teams = names
            .iter()
            .map(|(name, wins)| Team {
                name: name.to_string(),
                wins: *wins,
                difficulty: Difficulty::Hard,
                members: vec!["Ali".to_string(), "Sara".to_string()],
            })
            .collect();
        state
    }

    #[test]
    fn cosmetic_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let stats = generate_stats(&mut rng, &SessionState::default(), None);
            let temp: u32 = stats.weather.temp.trim_end_matches("°C").parse().unwrap();
            let wind: u32 = stats.weather.wind.trim_end_matches(" km/h").parse().unwrap();

            assert!((18..=28).contains(&temp));
            assert!((5..=15).contains(&wind));
            assert!(WEATHER_CONDITIONS.contains(&stats.weather.condition));
            assert!(DISCOUNTS.contains(&stats.discount));
            assert!((2..=8).contains(&stats.waiting_list));
            assert_eq!(stats.detailed_courts.len(), 8);
            assert_eq!(stats.tournaments.len(), 2);
        }
    }

    #[test]
    fn no_user_or_no_teams_means_no_team_card() {
        let mut rng = StdRng::seed_from_u64(12);
        let teams = state_with_teams(&[("Lahore Lions", 3)]);

        assert!(my_team(&mut rng, &teams, None).is_none());
        assert!(my_team(&mut rng, &teams, Some("  ")).is_none());
        assert!(my_team(&mut rng, &SessionState::default(), Some("Ali")).is_none());
    }

    #[test]
    fn team_card_uses_assigned_team() {
        let mut rng = StdRng::seed_from_u64(13);
        let state = state_with_teams(&[("Lahore Lions", 3), ("Karachi Kings", 7), ("Multan Sultans", 1)]);
        let expected = teams::assign("Ali", &state.teams);

        let card = my_team(&mut rng, &state, Some("Ali")).unwrap();
        assert_eq!(card.name, expected);
        assert!((1..=5).contains(&card.rank));
        assert_eq!(card.difficulty, Difficulty::Hard);
        assert_eq!(card.members, vec!["Ali".to_string(), "Sara".to_string()]);
        assert!(card.next_match.starts_with("vs "));
        assert!(card.next_match.ends_with(" @ 20:00"));
        assert!(!card.next_match.contains(expected));
    }

    #[test]
    fn single_team_has_no_opponent() {
        let mut rng = StdRng::seed_from_u64(14);
        let state = state_with_teams(&[("Lahore Lions", 3)]);

        let card = my_team(&mut rng, &state, Some("Ali")).unwrap();
        assert_eq!(card.name, "Lahore Lions");
        assert_eq!(card.wins, 3);
        assert_eq!(card.next_match, "vs TBD @ 20:00");
    }

    #[test]
    fn stats_serialize_with_frontend_keys() {
        let mut rng = StdRng::seed_from_u64(15);
        let value = serde_json::to_value(generate_stats(&mut rng, &SessionState::default(), None)).unwrap();

        assert!(value["myTeam"].is_null());
        assert_eq!(value["manOfTheMatch"]["points"], 1500);
        assert!(value["detailedCourts"][0]["nextSlot"].is_string());
        assert!(value["detailedCourts"][0]["type"].is_string());
        assert!(value["waitingList"].is_u64());
    }
}
