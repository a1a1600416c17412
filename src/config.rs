use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_or_default("PORT", env::var("PORT").ok(), DEFAULT_PORT),
            data_path: resolve_data_path(env::var("APP_DATA_PATH").ok()),
        }
    }
}

pub fn resolve_data_path(raw: Option<String>) -> PathBuf {
    match raw {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}

/// Unset falls back quietly; set but unparsable falls back with a warning.
pub fn parse_or_default<T>(var: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(value) = raw else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(var, value = %value, default = %default, "invalid env var value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_parses_or_falls_back() {
        assert_eq!(parse_or_default("PORT", Some("3000".into()), DEFAULT_PORT), 3000);
        assert_eq!(parse_or_default("PORT", Some(" 3001 ".into()), DEFAULT_PORT), 3001);
        assert_eq!(parse_or_default("PORT", Some("banana".into()), DEFAULT_PORT), DEFAULT_PORT);
        assert_eq!(parse_or_default("PORT", Some("70000".into()), DEFAULT_PORT), DEFAULT_PORT);
        assert_eq!(parse_or_default("PORT", None, DEFAULT_PORT), DEFAULT_PORT);
    }

    #[test]
    fn data_path_defaults_when_blank() {
        assert_eq!(resolve_data_path(None), PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(resolve_data_path(Some("  ".into())), PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(resolve_data_path(Some("/tmp/dt.json".into())), PathBuf::from("/tmp/dt.json"));
    }
}
