use crate::api::Credits;
use crate::coupon::DEFAULT_STAKE;
use crate::gesture::GestureConfig;
use crate::stack::DEFAULT_CAPACITY;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

const ENV_PREFIX: &str = "APUESTA";

/// The three card themes, which differ only in their engine parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Classic,
    Neo,
    Elegant,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub max_drag: f64,
    pub direction_threshold: f64,
    pub commit_threshold: f64,
    pub capacity: usize,
    pub boost_enabled: bool,
    pub wrap_feed: bool,
    pub default_stake: Credits,
}
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown variant '{0}', expected classic, neo or elegant")]
    UnknownVariant(String),
    #[error("max_drag must be positive but was {0}")]
    MaxDrag(f64),
    #[error("direction threshold {direction} must be between 0 and the commit threshold {commit}")]
    DirectionThreshold { direction: f64, commit: f64 },
    #[error("commit threshold {commit} must be below max_drag {max_drag}")]
    CommitThreshold { commit: f64, max_drag: f64 },
    #[error("capacity must be at least 1")]
    Capacity,
    #[error("default stake must be at least 1")]
    DefaultStake,
}

impl Variant {
    pub fn preset(self) -> EngineConfig {
        let (max_drag, direction_threshold, commit_threshold, boost_enabled, wrap_feed) =
            match self {
                Variant::Classic => (150.0, 50.0, 80.0, false, true),
                Variant::Neo => (200.0, 60.0, 100.0, true, true),
                Variant::Elegant => (250.0, 80.0, 120.0, false, false),
            };
        EngineConfig {
            max_drag,
            direction_threshold,
            commit_threshold,
            capacity: DEFAULT_CAPACITY,
            boost_enabled,
            wrap_feed,
            default_stake: DEFAULT_STAKE,
        }
    }
}
impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Classic => "classic",
            Self::Neo => "neo",
            Self::Elegant => "elegant",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for Variant {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "neo" => Ok(Self::Neo),
            "elegant" => Ok(Self::Elegant),
            e => Err(SettingsError::UnknownVariant(e.to_string())),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Variant::default().preset()
    }
}
impl EngineConfig {
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            max_drag: self.max_drag,
            direction_threshold: self.direction_threshold,
            commit_threshold: self.commit_threshold,
        }
    }
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.max_drag.is_finite() && self.max_drag > 0.0) {
            return Err(SettingsError::MaxDrag(self.max_drag));
        }
        if !(self.direction_threshold >= 0.0 && self.direction_threshold <= self.commit_threshold)
        {
            return Err(SettingsError::DirectionThreshold {
                direction: self.direction_threshold,
                commit: self.commit_threshold,
            });
        }
        if !(self.commit_threshold < self.max_drag) {
            return Err(SettingsError::CommitThreshold {
                commit: self.commit_threshold,
                max_drag: self.max_drag,
            });
        }
        if self.capacity == 0 {
            return Err(SettingsError::Capacity);
        }
        if self.default_stake == 0 {
            return Err(SettingsError::DefaultStake);
        }
        Ok(())
    }
}

fn with_sources(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&str>,
) -> ConfigBuilder<DefaultState> {
    let builder = match path {
        Some(path) => builder.add_source(File::with_name(path)),
        None => builder,
    };
    builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}

/// Loads the engine settings. The variant comes from the argument, else from
/// a `variant` key in the file or environment, else Classic. Its preset fills
/// every field the file and environment leave out.
pub fn load(path: Option<&str>, variant: Option<Variant>) -> Result<EngineConfig, SettingsError> {
    let variant = match variant {
        Some(variant) => variant,
        None => {
            let probe = with_sources(Config::builder(), path).build()?;
            match probe.get_string("variant") {
                Ok(name) => name.parse()?,
                Err(ConfigError::NotFound(_)) => Variant::default(),
                Err(e) => return Err(e.into()),
            }
        }
    };
    let preset = variant.preset();
    let builder = Config::builder()
        .set_default("max_drag", preset.max_drag)?
        .set_default("direction_threshold", preset.direction_threshold)?
        .set_default("commit_threshold", preset.commit_threshold)?
        .set_default("capacity", preset.capacity as i64)?
        .set_default("boost_enabled", preset.boost_enabled)?
        .set_default("wrap_feed", preset.wrap_feed)?
        .set_default("default_stake", i64::from(preset.default_stake))?;
    let engine: EngineConfig = with_sources(builder, path).build()?.try_deserialize()?;
    engine.validate()?;
    debug!("Loaded {} settings: {:?}", variant, engine);
    Ok(engine)
}
