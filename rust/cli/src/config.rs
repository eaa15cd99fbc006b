use serde::{Deserialize, Serialize};
use std::fs;

use cribbage_engine::game::MatchConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub points_to_win: u32,
    pub skunk_enabled: bool,
    pub skunk_threshold: u32,
    pub double_skunk_enabled: bool,
    pub double_skunk_threshold: u32,
    pub seed: Option<u64>,
    pub bot_type: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub points_to_win: ValueSource,
    pub skunks: ValueSource,
    pub seed: ValueSource,
    pub bot_type: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            points_to_win: ValueSource::Default,
            skunks: ValueSource::Default,
            seed: ValueSource::Default,
            bot_type: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let rules = MatchConfig::default();
        Self {
            points_to_win: rules.points_to_win,
            skunk_enabled: rules.skunk_enabled,
            skunk_threshold: rules.skunk_threshold,
            double_skunk_enabled: rules.double_skunk_enabled,
            double_skunk_threshold: rules.double_skunk_threshold,
            seed: None,
            bot_type: "baseline".into(),
        }
    }
}

impl Config {
    /// The engine-side rules carried on every dealt hand.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            points_to_win: self.points_to_win,
            skunk_enabled: self.skunk_enabled,
            skunk_threshold: self.skunk_threshold,
            double_skunk_enabled: self.double_skunk_enabled,
            double_skunk_threshold: self.double_skunk_threshold,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[allow(dead_code)]
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CRIBBAGE_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.points_to_win {
            cfg.points_to_win = v;
            sources.points_to_win = ValueSource::File;
        }
        if f.skunk_enabled.is_some()
            || f.skunk_threshold.is_some()
            || f.double_skunk_enabled.is_some()
            || f.double_skunk_threshold.is_some()
        {
            sources.skunks = ValueSource::File;
        }
        if let Some(v) = f.skunk_enabled {
            cfg.skunk_enabled = v;
        }
        if let Some(v) = f.skunk_threshold {
            cfg.skunk_threshold = v;
        }
        if let Some(v) = f.double_skunk_enabled {
            cfg.double_skunk_enabled = v;
        }
        if let Some(v) = f.double_skunk_threshold {
            cfg.double_skunk_threshold = v;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bot_type {
            cfg.bot_type = v;
            sources.bot_type = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("CRIBBAGE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(points) = std::env::var("CRIBBAGE_POINTS_TO_WIN")
        && !points.is_empty()
    {
        cfg.points_to_win = points
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid points_to_win".into()))?;
        sources.points_to_win = ValueSource::Env;
    }
    if let Ok(skunks) = std::env::var("CRIBBAGE_SKUNKS")
        && !skunks.is_empty()
    {
        let enabled = parse_bool(&skunks)
            .ok_or_else(|| ConfigError::Invalid("Invalid skunks flag".into()))?;
        cfg.skunk_enabled = enabled;
        cfg.double_skunk_enabled = enabled;
        sources.skunks = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    points_to_win: Option<u32>,
    #[serde(default)]
    skunk_enabled: Option<bool>,
    #[serde(default)]
    skunk_threshold: Option<u32>,
    #[serde(default)]
    double_skunk_enabled: Option<bool>,
    #[serde(default)]
    double_skunk_threshold: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bot_type: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.match_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "CRIBBAGE_CONFIG",
            "CRIBBAGE_SEED",
            "CRIBBAGE_POINTS_TO_WIN",
            "CRIBBAGE_SKUNKS",
        ] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults_match_the_engine_rules() {
        clear_env();
        let resolved = load_with_sources().expect("defaults are valid");
        assert_eq!(resolved.config.points_to_win, 121);
        assert_eq!(resolved.config.skunk_threshold, 91);
        assert_eq!(resolved.config.double_skunk_threshold, 61);
        assert_eq!(resolved.config.bot_type, "baseline");
        assert!(matches!(
            resolved.sources.points_to_win,
            ValueSource::Default
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides_take_effect() {
        clear_env();
        unsafe {
            std::env::set_var("CRIBBAGE_SEED", "42");
            std::env::set_var("CRIBBAGE_POINTS_TO_WIN", "61");
            std::env::set_var("CRIBBAGE_SKUNKS", "off");
        }
        let resolved = load_with_sources().expect("valid overrides");
        assert_eq!(resolved.config.seed, Some(42));
        assert_eq!(resolved.config.points_to_win, 61);
        assert!(!resolved.config.skunk_enabled);
        assert!(matches!(resolved.sources.seed, ValueSource::Env));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_seed_is_rejected() {
        clear_env();
        unsafe { std::env::set_var("CRIBBAGE_SEED", "not-a-number") };
        assert!(load_with_sources().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_file_is_read_and_tracked() {
        clear_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cribbage.toml");
        std::fs::write(&path, "points_to_win = 61\nskunk_threshold = 46\ndouble_skunk_threshold = 31\nbot_type = \"baseline\"\n").unwrap();
        unsafe { std::env::set_var("CRIBBAGE_CONFIG", &path) };
        let resolved = load_with_sources().expect("file config is valid");
        assert_eq!(resolved.config.points_to_win, 61);
        assert_eq!(resolved.config.skunk_threshold, 46);
        assert!(matches!(resolved.sources.points_to_win, ValueSource::File));
        assert!(matches!(resolved.sources.skunks, ValueSource::File));
        clear_env();
    }
}
