use jiff::Timestamp;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub cache: &'static str,
    pub store: &'static str,
    pub timestamp: Timestamp,
}

impl HealthResponse {
    pub fn new(cache_ready: bool, store_ready: bool) -> Self {
        Self {
            service: "minilink",
            cache: if cache_ready { "OK" } else { "ERROR" },
            store: if store_ready { "OK" } else { "ERROR" },
            timestamp: Timestamp::now(),
        }
    }
}
