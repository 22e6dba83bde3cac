//! Layered configuration: defaults, then `docingest.toml`, then
//! `DOCINGEST_*` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "docingest.toml";
pub const ENV_PREFIX: &str = "DOCINGEST_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for JSON artifacts.
    pub output_dir: PathBuf,
    /// Parent for per-archive scratch directories; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Persist per-entry extraction diagnostics as artifacts instead of only logging them.
    pub record_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output_jsons"),
            scratch_dir: None,
            log_level: "info".to_string(),
            record_failures: false,
        }
    }
}

impl Config {
    /// Provider stack used by [`Config::load`]. `file` replaces the default
    /// `docingest.toml` lookup in the working directory.
    pub fn figment(file: Option<&Path>) -> Figment {
        let file = file.unwrap_or(Path::new(CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration. An explicitly named file must exist; the
    /// default one is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        if let Some(file) = file {
            if !file.is_file() {
                return Err(Error::MissingConfig(file.to_path_buf()));
            }
        }
        Ok(Self::figment(file).extract()?)
    }
}
