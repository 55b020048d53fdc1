//! Game capability façade

use std::sync::Arc;

use hostbridge_domain::Result;
use hostbridge_domain::ports::GamePort;

use super::HostService;

/// Version-independent access to the host game object
#[derive(Debug)]
pub struct HostGameService {
    service: Arc<HostService<dyn GamePort>>,
}

impl HostGameService {
    pub fn new(service: Arc<HostService<dyn GamePort>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<HostService<dyn GamePort>> {
        &self.service
    }
}

impl GamePort for HostGameService {
    fn world_id(&self) -> Result<String> {
        self.service.call("world_id", |port| port.world_id())
    }

    fn system_id(&self) -> Result<String> {
        self.service.call("system_id", |port| port.system_id())
    }

    /// `false` when no compatible game port can be selected
    fn is_ready(&self) -> bool {
        self.service.port().is_ok_and(|port| port.is_ready())
    }
}
