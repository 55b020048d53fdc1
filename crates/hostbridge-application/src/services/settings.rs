//! Settings capability façade

use std::sync::Arc;

use async_trait::async_trait;
use hostbridge_domain::Result;
use hostbridge_domain::ports::SettingsPort;
use serde_json::Value;

use super::HostService;

/// Version-independent host settings access
#[derive(Debug)]
pub struct HostSettingsService {
    service: Arc<HostService<dyn SettingsPort>>,
}

impl HostSettingsService {
    pub fn new(service: Arc<HostService<dyn SettingsPort>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<HostService<dyn SettingsPort>> {
        &self.service
    }
}

#[async_trait]
impl SettingsPort for HostSettingsService {
    fn register(&self, namespace: &str, key: &str, default: Value) -> Result<()> {
        self.service.call("register", |port| {
            port.register(namespace, key, default.clone())
        })
    }

    fn get(&self, namespace: &str, key: &str) -> Result<Value> {
        self.service.call("get", |port| port.get(namespace, key))
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<Value> {
        self.service
            .call_async("set", |port| {
                let namespace = namespace.to_string();
                let key = key.to_string();
                let value = value.clone();
                async move { port.set(&namespace, &key, value).await }
            })
            .await
    }
}
