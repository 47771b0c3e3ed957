//! Health probe DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00Z",
    "checks": {
        "database": {"status": "healthy", "message": "Connected", "response_time_ms": 3}
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339 instant of the check
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Reachable, but not usable for requests (e.g. no pool configured)
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn new(status: HealthStatus, message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status,
            message: Some(message.into()),
            response_time_ms: Some(elapsed_ms),
        }
    }
}

impl HealthResponse {
    /// Worst status across all component checks.
    pub fn overall(checks: &BTreeMap<String, ComponentHealth>) -> HealthStatus {
        checks
            .values()
            .map(|c| c.status)
            .fold(HealthStatus::Healthy, |acc, s| match (acc, s) {
                (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => {
                    HealthStatus::Unhealthy
                }
                (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
                _ => HealthStatus::Healthy,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_overall_takes_worst_status() {
        let mut checks = BTreeMap::new();
        assert_eq!(HealthResponse::overall(&checks), HealthStatus::Healthy);

        checks.insert("a".to_string(), ComponentHealth::new(HealthStatus::Healthy, "ok", 1));
        checks.insert("b".to_string(), ComponentHealth::new(HealthStatus::Degraded, "slow", 1));
        assert_eq!(HealthResponse::overall(&checks), HealthStatus::Degraded);

        checks.insert("c".to_string(), ComponentHealth::new(HealthStatus::Unhealthy, "down", 1));
        assert_eq!(HealthResponse::overall(&checks), HealthStatus::Unhealthy);
    }
}
