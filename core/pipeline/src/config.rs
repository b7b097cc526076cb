//! Pipeline configuration.

use solace_common::{Error, Result};
use solace_crypto::{KdfParams, MasterKey};

/// Environment variable holding the master encryption secret.
pub const MASTER_KEY_ENV: &str = "SOLACE_MASTER_KEY";

/// Configuration for the safety pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub master_key: MasterKey,
    pub kdf_params: KdfParams,
}

impl PipelineConfig {
    /// Create a configuration from an already validated master key.
    pub fn new(master_key: MasterKey) -> Self {
        Self {
            master_key,
            kdf_params: KdfParams::default(),
        }
    }

    /// Load the configuration from the process environment.
    ///
    /// Called lazily, the first time a caller needs encryption; there
    /// is no fallback key of any kind.
    ///
    /// # Errors
    /// - `Error::Configuration` when [`MASTER_KEY_ENV`] is unset or
    ///   shorter than the required minimum
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(MASTER_KEY_ENV)
            .map_err(|_| Error::Configuration(format!("{} is not set", MASTER_KEY_ENV)))?;
        Ok(Self::new(MasterKey::new(secret)?))
    }

    /// Override the KDF parameters.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.kdf_params = params;
        self
    }
}
