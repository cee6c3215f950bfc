//! Shared state handed to handlers and the gate middleware.

use std::sync::Arc;

use super::config::GateConfig;
use super::provider::AuthProvider;

pub struct GateState {
    config: GateConfig,
    provider: Arc<dyn AuthProvider>,
}

impl GateState {
    #[must_use]
    pub fn new(config: GateConfig, provider: Arc<dyn AuthProvider>) -> Self {
        Self { config, provider }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn provider(&self) -> &dyn AuthProvider {
        self.provider.as_ref()
    }
}
