use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client type that opts a host into ICMP liveness checking.
pub const HEALTH_CHECK_CLIENT_TYPE: &str = "health-check";

fn default_method() -> String {
    "GET".to_string()
}

fn default_expected_status() -> u16 {
    200
}

/// Per-service HTTP health check configuration, as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckConfig {
    #[serde(default)]
    pub enabled: bool,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Per-target timeout in milliseconds; overrides the settings-level default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

/// A catalogued external service (an HTTP endpoint on the dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckConfig>,
    /// Durable timestamp of the last confirmed-alive observation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Whether the scheduler should probe this service at all.
    pub fn is_checkable(&self) -> bool {
        self.health_check.as_ref().is_some_and(|hc| hc.enabled)
    }
}

/// A catalogued networked host (a machine on the dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub client_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wol_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wol_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Whether this client participates in ICMP liveness checking.
    pub fn is_pingable(&self) -> bool {
        self.client_type == HEALTH_CHECK_CLIENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_config_fills_defaults() {
        let config: HealthCheckConfig =
            serde_json::from_str(r#"{"enabled": true, "url": "http://nas.lan/health"}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.method, "GET");
        assert_eq!(config.expected_status, 200);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn service_without_check_is_not_checkable() {
        let service: Service = serde_json::from_str(
            r#"{
                "id": "service-1",
                "name": "Files",
                "url": "http://nas.lan",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(!service.is_checkable());
    }

    #[test]
    fn client_type_field_round_trips_as_type() {
        let client: Client = serde_json::from_str(
            r#"{
                "id": "client-1",
                "name": "Desk",
                "type": "health-check",
                "ipAddress": "10.0.0.5",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(client.is_pingable());
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["type"], "health-check");
    }
}
