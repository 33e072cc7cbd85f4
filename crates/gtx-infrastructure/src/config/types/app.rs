//! Main application configuration

use gtx_domain::ProviderConfig;
use serde::{Deserialize, Serialize};

use super::{LoggingConfig, RoutingConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Failover and batching configuration
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Translation providers, registered in this order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    /// Look up a configured provider by name
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }
}
