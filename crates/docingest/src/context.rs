use docingest_extract::Capabilities;

use crate::config::Config;

/// Configuration and capability registry, built once at startup and passed
/// by reference into the reader.
#[derive(Clone, Debug)]
pub struct Context {
    config: Config,
    capabilities: Capabilities,
}

impl Context {
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Context with every capability compiled into this build.
    pub fn from_config(config: Config) -> Self {
        Self::new(config, Capabilities::detect())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}
