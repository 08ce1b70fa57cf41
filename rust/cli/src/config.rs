use namewheel_engine::settings::{
    DEFAULT_SPIN_DURATION_SECS, WheelSettings, validate_spin_duration,
};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "NAMEWHEEL_CONFIG";
pub const SEED_ENV: &str = "NAMEWHEEL_SEED";
pub const SPIN_DURATION_ENV: &str = "NAMEWHEEL_SPIN_DURATION";
pub const SOUND_ENV: &str = "NAMEWHEEL_SOUND";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub spin_duration_secs: f64,
    pub sound_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            spin_duration_secs: DEFAULT_SPIN_DURATION_SECS,
            sound_enabled: true,
        }
    }
}

impl Config {
    pub fn settings(&self) -> WheelSettings {
        WheelSettings {
            sound_enabled: self.sound_enabled,
            spin_duration_secs: self.spin_duration_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub spin_duration_secs: ValueSource,
    pub sound_enabled: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            spin_duration_secs: ValueSource::Default,
            sound_enabled: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
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
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `NAMEWHEEL_CONFIG`, then the
/// individual environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.spin_duration_secs {
            cfg.spin_duration_secs = v;
            sources.spin_duration_secs = ValueSource::File;
        }
        if let Some(v) = f.sound_enabled {
            cfg.sound_enabled = v;
            sources.sound_enabled = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(duration) = std::env::var(SPIN_DURATION_ENV)
        && !duration.is_empty()
    {
        cfg.spin_duration_secs = duration
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid spin duration".into()))?;
        sources.spin_duration_secs = ValueSource::Env;
    }
    if let Ok(sound) = std::env::var(SOUND_ENV)
        && !sound.is_empty()
    {
        cfg.sound_enabled =
            parse_bool(&sound).ok_or_else(|| ConfigError::Invalid("Invalid sound flag".into()))?;
        sources.sound_enabled = ValueSource::Env;
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
    seed: Option<u64>,
    #[serde(default)]
    spin_duration_secs: Option<f64>,
    #[serde(default)]
    sound_enabled: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_spin_duration(cfg.spin_duration_secs)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
