use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "../stats.json";
const DEFAULT_DIST_DIR: &str = "../dist/";
const DEFAULT_TOP_ACTOR_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        Ok(ServerConfig {
            address: parse_or(&lookup, "ADDRESS", defaults.address)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            data_file: lookup("DATA_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            dist_dir: lookup("FRONTEND_DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dist_dir),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub list_owner: String,
    pub list_slug: String,
    pub club_users: Vec<String>,
    pub output_path: PathBuf,
    pub top_actor_count: usize,
    pub log_level: String,
}

impl ScrapeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let club_users = required(&lookup, "CLUB_USERS")?
            .split(',')
            .map(|user| user.trim().to_string())
            .filter(|user| !user.is_empty())
            .collect();

        Ok(ScrapeConfig {
            list_owner: required(&lookup, "LIST_OWNER")?,
            list_slug: required(&lookup, "LIST_SLUG")?,
            club_users,
            output_path: PathBuf::from(required(&lookup, "OUTPUT_PATH")?),
            top_actor_count: parse_or(&lookup, "TOP_ACTOR_COUNT", DEFAULT_TOP_ACTOR_COUNT)?,
            log_level: lookup("LOGLEVEL").unwrap_or_else(|| "INFO".to_string()),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var).ok_or(ConfigError::Missing(var))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn server_defaults() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_file, PathBuf::from("../stats.json"));
    }

    #[test]
    fn server_overrides() {
        let config = ServerConfig::from_lookup(env(&[
            ("PORT", "8080"),
            ("ADDRESS", "127.0.0.1"),
            ("DATA_FILE_PATH", "/srv/stats.json"),
            ("FRONTEND_DIST_DIR", "/srv/dist"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.data_file, PathBuf::from("/srv/stats.json"));
        assert_eq!(config.dist_dir, PathBuf::from("/srv/dist"));
    }

    #[test]
    fn server_rejects_bad_port() {
        let err = ServerConfig::from_lookup(env(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn scrape_requires_list_and_users() {
        let err = ScrapeConfig::from_lookup(env(&[("LIST_OWNER", "club")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("CLUB_USERS"));
    }

    #[test]
    fn scrape_parses_users_and_defaults() {
        let config = ScrapeConfig::from_lookup(env(&[
            ("LIST_OWNER", "club"),
            ("LIST_SLUG", "watched"),
            ("CLUB_USERS", "alice, bob,,carol"),
            ("OUTPUT_PATH", "stats.json"),
        ]))
        .unwrap();

        assert_eq!(config.club_users, vec!["alice", "bob", "carol"]);
        assert_eq!(config.top_actor_count, 4);
        assert_eq!(config.log_level, "INFO");
    }

    #[test]
    fn scrape_rejects_bad_actor_count() {
        let err = ScrapeConfig::from_lookup(env(&[
            ("LIST_OWNER", "club"),
            ("LIST_SLUG", "watched"),
            ("CLUB_USERS", "alice"),
            ("OUTPUT_PATH", "stats.json"),
            ("TOP_ACTOR_COUNT", "four"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { var: "TOP_ACTOR_COUNT", .. }));
    }
}
