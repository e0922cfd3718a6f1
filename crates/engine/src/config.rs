use anyhow::{anyhow, bail, Context, Result};
use sensemaker_protocol::AgentId;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "SENSEMAKER_CONFIG";
pub const COMMUNITY_ACTIVATOR_ENV: &str = "SENSEMAKER_COMMUNITY_ACTIVATOR";

/// Process-wide engine configuration.
///
/// ```toml
/// community_activator = "uhCAk..."
/// publish_context_results_by_default = false
/// validate_assessment_bounds = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The single agent allowed to write shared configuration, fixed at genesis.
    pub community_activator: AgentId,

    /// Used by `compute_context` when the caller leaves `can_publish_result` unset.
    #[serde(default)]
    pub publish_context_results_by_default: bool,

    /// Reject hand-entered assessments outside their dimension's range.
    #[serde(default = "default_true")]
    pub validate_assessment_bounds: bool,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    pub fn new(community_activator: AgentId) -> Self {
        Self {
            community_activator,
            publish_context_results_by_default: false,
            validate_assessment_bounds: true,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.community_activator.is_empty() {
            return Err("community_activator must not be empty".to_string());
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse engine config")?;
        config.validate().map_err(|err| anyhow!(err))?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading engine config from {:?}", path);
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid engine config {}", path.display()))
    }

    /// `SENSEMAKER_CONFIG` (a TOML path) wins over `SENSEMAKER_COMMUNITY_ACTIVATOR`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        let activator = std::env::var(COMMUNITY_ACTIVATOR_ENV).ok();
        Self::from_env_values(path.as_deref(), activator.as_deref())
    }

    fn from_env_values(path: Option<&str>, activator: Option<&str>) -> Result<Self> {
        if let Some(path) = path.map(str::trim).filter(|v| !v.is_empty()) {
            return Self::load(path);
        }
        let Some(activator) = activator.map(str::trim).filter(|v| !v.is_empty()) else {
            bail!("neither {CONFIG_PATH_ENV} nor {COMMUNITY_ACTIVATOR_ENV} is set");
        };
        Ok(Self::new(AgentId::new(activator)))
    }
}
