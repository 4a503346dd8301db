use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a monitored target.
///
/// Services report `healthy`/`unhealthy` from HTTP probes, clients report
/// `online`/`offline` from ICMP probes. `unknown` means no probe was sent
/// (checking disabled or the target is not configured for it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Unknown,
    Healthy,
    Unhealthy,
    Online,
    Offline,
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetStatus::Unknown => write!(f, "unknown"),
            TargetStatus::Healthy => write!(f, "healthy"),
            TargetStatus::Unhealthy => write!(f, "unhealthy"),
            TargetStatus::Online => write!(f, "online"),
            TargetStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Which catalog a target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Service,
    Client,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Service => write!(f, "service"),
            TargetKind::Client => write!(f, "client"),
        }
    }
}

/// Latest check outcome for a single target.
///
/// No history is kept: each completed check overwrites the previous record
/// for that target id, whichever path (scheduled or on-demand) produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub status: TargetStatus,
    pub last_checked: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusRecord {
    /// Record for a target that was not probed at all.
    pub fn unknown() -> Self {
        Self {
            status: TargetStatus::Unknown,
            last_checked: None,
            last_seen: None,
            status_code: None,
            latency_ms: None,
            error: None,
        }
    }

    /// HTTP response delivered with the expected status code.
    pub fn healthy(checked: DateTime<Utc>, status_code: u16) -> Self {
        Self {
            status: TargetStatus::Healthy,
            last_checked: Some(checked),
            status_code: Some(status_code),
            ..Self::unknown()
        }
    }

    /// HTTP response delivered, but with the wrong status code.
    pub fn unhealthy_status(checked: DateTime<Utc>, status_code: u16) -> Self {
        Self {
            status: TargetStatus::Unhealthy,
            last_checked: Some(checked),
            status_code: Some(status_code),
            ..Self::unknown()
        }
    }

    /// Transport failure before any HTTP response was delivered.
    pub fn failed(checked: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            status: TargetStatus::Unhealthy,
            last_checked: Some(checked),
            error: Some(error.into()),
            ..Self::unknown()
        }
    }

    /// ICMP echo answered within the deadline.
    pub fn online(checked: DateTime<Utc>, latency_ms: u64) -> Self {
        Self {
            status: TargetStatus::Online,
            last_checked: Some(checked),
            latency_ms: Some(latency_ms),
            ..Self::unknown()
        }
    }

    /// ICMP echo unanswered or the probe itself failed.
    pub fn offline(checked: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            status: TargetStatus::Offline,
            last_checked: Some(checked),
            error: Some(error.into()),
            ..Self::unknown()
        }
    }

    pub fn with_last_seen(mut self, last_seen: Option<DateTime<Utc>>) -> Self {
        self.last_seen = last_seen;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// A status record tagged with the target id, as returned by bulk checks.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub id: String,
    #[serde(flatten)]
    pub record: StatusRecord,
}

fn default_service_frequency() -> u64 {
    30
}

fn default_service_timeout() -> u64 {
    5000
}

fn default_client_frequency() -> u64 {
    60
}

fn default_client_timeout() -> u64 {
    3
}

/// Runtime-tunable check cadences and timeouts.
///
/// Frequencies are seconds, the service timeout is milliseconds and the
/// client timeout is seconds, matching what the admin UI stores. Fields
/// missing from the settings store fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckSettings {
    #[serde(default = "default_service_frequency")]
    pub service_frequency: u64,
    #[serde(default = "default_service_timeout")]
    pub service_timeout: u64,
    #[serde(default = "default_client_frequency")]
    pub client_frequency: u64,
    #[serde(default = "default_client_timeout")]
    pub client_timeout: u64,
}

impl Default for HealthCheckSettings {
    fn default() -> Self {
        Self {
            service_frequency: default_service_frequency(),
            service_timeout: default_service_timeout(),
            client_frequency: default_client_frequency(),
            client_timeout: default_client_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_when_absent() {
        let settings: HealthCheckSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, HealthCheckSettings::default());
    }

    #[test]
    fn settings_partial_document_keeps_defaults() {
        let settings: HealthCheckSettings =
            serde_json::from_str(r#"{"serviceFrequency": 10}"#).unwrap();
        assert_eq!(settings.service_frequency, 10);
        assert_eq!(settings.service_timeout, 5000);
        assert_eq!(settings.client_frequency, 60);
        assert_eq!(settings.client_timeout, 3);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TargetStatus::Unhealthy).unwrap();
        assert_eq!(json, r#""unhealthy""#);
        assert_eq!(TargetStatus::Online.to_string(), "online");
    }

    #[test]
    fn record_omits_empty_diagnostics() {
        let json = serde_json::to_value(StatusRecord::unknown()).unwrap();
        assert!(json.get("statusCode").is_none());
        assert!(json.get("error").is_none());
        assert!(json["status"] == "unknown");
    }
}
