//! Application state shared by all handlers.

use moonly_core::RelayConfig;
use moonly_relay::CdnRelay;

pub struct AppState {
    pub relay: CdnRelay,
}

impl AppState {
    pub fn new(relay: CdnRelay) -> Self {
        Self { relay }
    }

    pub fn config(&self) -> &RelayConfig {
        self.relay.config()
    }
}
