//! Bounds checking for runtime-configurable cadences and timeouts.
//!
//! Settings come from the admin UI unvalidated; a cadence of zero would
//! degenerate into a busy probe loop, so out-of-range values are replaced
//! with their defaults before a schedule is derived from them.

use tracing::warn;

use crate::types::HealthCheckSettings;

/// Frequencies below this are treated as misconfigured.
pub const MIN_FREQUENCY_SECS: u64 = 1;

/// Timeouts of zero can never be satisfied by a real probe.
pub const MIN_TIMEOUT_MS: u64 = 1;
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Replace out-of-range values with their defaults, warning once per field.
pub fn sanitize_settings(mut settings: HealthCheckSettings) -> HealthCheckSettings {
    let defaults = HealthCheckSettings::default();

    if settings.service_frequency < MIN_FREQUENCY_SECS {
        warn!(
            value = settings.service_frequency,
            "service check frequency out of range, using default"
        );
        settings.service_frequency = defaults.service_frequency;
    }
    if settings.client_frequency < MIN_FREQUENCY_SECS {
        warn!(
            value = settings.client_frequency,
            "client check frequency out of range, using default"
        );
        settings.client_frequency = defaults.client_frequency;
    }
    if settings.service_timeout < MIN_TIMEOUT_MS {
        warn!(
            value = settings.service_timeout,
            "service check timeout out of range, using default"
        );
        settings.service_timeout = defaults.service_timeout;
    }
    if settings.client_timeout < MIN_TIMEOUT_SECS {
        warn!(
            value = settings.client_timeout,
            "client check timeout out of range, using default"
        );
        settings.client_timeout = defaults.client_timeout;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_settings_pass_through() {
        let settings = HealthCheckSettings {
            service_frequency: 10,
            service_timeout: 2000,
            client_frequency: 120,
            client_timeout: 5,
        };
        assert_eq!(sanitize_settings(settings.clone()), settings);
    }

    #[test]
    fn zero_frequency_falls_back_to_default() {
        let settings = HealthCheckSettings {
            service_frequency: 0,
            ..HealthCheckSettings::default()
        };
        assert_eq!(sanitize_settings(settings).service_frequency, 30);
    }

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let settings = HealthCheckSettings {
            service_timeout: 0,
            client_timeout: 0,
            ..HealthCheckSettings::default()
        };
        let sanitized = sanitize_settings(settings);
        assert_eq!(sanitized.service_timeout, 5000);
        assert_eq!(sanitized.client_timeout, 3);
    }
}
