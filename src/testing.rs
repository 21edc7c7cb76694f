//! In-memory transport for exercising the client and aggregator without a
//! network.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::transport::{HttpResponse, Transport, TransportError};

type Routes = HashMap<String, Result<HttpResponse, TransportError>>;

/// A small roster used across tests.
pub const HEROES_JSON: &str = r#"[
    {"id": 1, "localized_name": "Anti-Mage"},
    {"id": 2, "localized_name": "Axe"},
    {"id": 3, "localized_name": "Bane"},
    {"id": 14, "localized_name": "Pudge"},
    {"id": 39, "localized_name": "Queen of Pain"}
]"#;

/// Serves canned responses per path and counts requests. Paths without a
/// canned response answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Routes>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, status: u16, body: &str) -> Self {
        self.set(path, status, body);
        self
    }

    pub fn failing(self, path: &str) -> Self {
        self.lock_routes().insert(
            path.to_string(),
            Err(TransportError::Connection("connection refused".to_string())),
        );
        self
    }

    pub fn timing_out(self, path: &str) -> Self {
        self.lock_routes()
            .insert(path.to_string(), Err(TransportError::Timeout));
        self
    }

    /// Every request sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set(&self, path: &str, status: u16, body: &str) {
        self.lock_routes()
            .insert(path.to_string(), Ok(HttpResponse::new(status, body)));
    }

    pub fn calls(&self, path: &str) -> usize {
        self.lock_calls().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.lock_calls().values().sum()
    }

    fn lock_routes(&self) -> MutexGuard<'_, Routes> {
        self.routes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, TransportError> {
        *self.lock_calls().entry(path.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.lock_routes()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "{}")))
    }
}
