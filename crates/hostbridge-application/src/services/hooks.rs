//! Hooks capability façade

use std::sync::Arc;

use hostbridge_domain::Result;
use hostbridge_domain::ports::HooksPort;
use serde_json::Value;

use super::HostService;

/// Version-independent host hook registration
#[derive(Debug)]
pub struct HostHooksService {
    service: Arc<HostService<dyn HooksPort>>,
}

impl HostHooksService {
    pub fn new(service: Arc<HostService<dyn HooksPort>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<HostService<dyn HooksPort>> {
        &self.service
    }
}

impl HooksPort for HostHooksService {
    fn on(&self, hook: &str, listener: &str) -> Result<u64> {
        self.service.call("on", |port| port.on(hook, listener))
    }

    fn off(&self, hook: &str, listener_id: u64) -> Result<()> {
        self.service.call("off", |port| port.off(hook, listener_id))
    }

    fn call_all(&self, hook: &str, payload: &Value) -> Result<bool> {
        self.service
            .call("call_all", |port| port.call_all(hook, payload))
    }
}
