use std::env;
use std::path::PathBuf;

use crate::store::types::{DEFAULT_CUTOFF_HOUR, DEFAULT_HOST};

pub const DEFAULT_PORT: u16 = 5000;

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run the HTTP server on the given port
    Web { port: u16 },
    /// Print the stored session to the console
    Summary,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub bind_addr: String,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub host: String,
    pub cutoff_hour: u8,
    pub sort_teams_by_wins: bool,
}

impl Config {
    /// Reads the mode and port from `args` (program name first) and the rest
    /// from the environment.
    pub fn from_env(args: &[String]) -> Config {
        Config::from_lookup(args, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(args: &[String], lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = if args.len() > 1 && args[1] == "web" {
            let port = args
                .get(2)
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
            Mode::Web { port }
        } else {
            Mode::Summary
        };

        let cutoff_hour = match lookup("CUTOFF_HOUR") {
            Some(raw) => parse_cutoff_hour(&raw).unwrap_or_else(|| {
                log::warn!(
                    "Ignoring CUTOFF_HOUR={:?}, expected an hour from 0 to 23; using {}",
                    raw,
                    DEFAULT_CUTOFF_HOUR
                );
                DEFAULT_CUTOFF_HOUR
            }),
            None => DEFAULT_CUTOFF_HOUR,
        };

        let sort_teams_by_wins = lookup("SORT_TEAMS_BY_WINS")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Config {
            mode,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            data_file: lookup("SESSION_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data.json")),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            host: lookup("SESSION_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            cutoff_hour,
            sort_teams_by_wins,
        }
    }
}

fn parse_cutoff_hour(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|h| *h <= 23)
}
