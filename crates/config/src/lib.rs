#![forbid(unsafe_code)]

mod error;
mod sampler;
mod source_kind;

pub use error::Error;
pub use sampler::{MAX_CPU_WINDOW, MIN_CYCLE, Sampler};
pub use source_kind::SourceKind;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables starting with this prefix override file values.
/// Nested keys are separated by `__`, e.g. `TASKMON_SAMPLER__CYCLE=5`.
pub const ENV_PREFIX: &str = "TASKMON_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sampler: Sampler,
}

impl Config {
    /// Defaults overlaid with the environment, reporting malformed values.
    pub fn from_env() -> Result<Self, Error> {
        Self::extract(Self::base())
    }

    /// Defaults, then the TOML file at `path`, then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Render the config as a TOML document.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, Error> {
        let config: Config = figment.extract()?;
        Ok(Self {
            sampler: config.sampler.sanitized(),
        })
    }
}
