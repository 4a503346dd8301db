use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

use crate::monitor::HealthMonitor;
use crate::types::HealthCheckSettings;

/// How often the scheduler re-reads settings to pick up cadence changes.
pub const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(300);

struct TimerSet {
    service: JoinHandle<()>,
    client: JoinHandle<()>,
}

/// Owns the two periodic check timers (service cadence, client cadence) and
/// the low-frequency settings poll that re-derives them.
///
/// Frequencies are captured at reschedule time; timeouts are re-read inside
/// every tick, so timeout changes take effect immediately while cadence
/// changes wait for the next reschedule. Rescheduling is serialized by the
/// mutex around the timer set and always cancels the old timers before
/// spawning their replacements, so duplicate timer pairs never coexist.
/// In-flight checks are not cancelled; they complete and write their
/// results, and only the next tick runs on the new cadence.
pub struct HealthScheduler {
    monitor: Arc<HealthMonitor>,
    timers: Mutex<Option<TimerSet>>,
    poll: Mutex<Option<JoinHandle<()>>>,
}

impl HealthScheduler {
    pub fn new(monitor: Arc<HealthMonitor>) -> Arc<Self> {
        Arc::new(Self {
            monitor,
            timers: Mutex::new(None),
            poll: Mutex::new(None),
        })
    }

    /// Install the initial timers and start the settings poll.
    pub async fn start(self: &Arc<Self>) {
        self.reschedule().await;

        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut poll = interval(SETTINGS_POLL_INTERVAL);
            // The first tick of an interval completes immediately; the
            // initial schedule is already installed, so skip it.
            poll.tick().await;
            loop {
                poll.tick().await;
                scheduler.reschedule().await;
            }
        });
        *self.poll.lock().await = Some(handle);
    }

    /// Derive fresh timers from the latest settings.
    ///
    /// Safe to call concurrently (the settings poll racing a manual trigger
    /// from the API): calls apply one at a time. When the settings store is
    /// unavailable the previous schedule stays in force.
    pub async fn reschedule(&self) {
        let mut timers = self.timers.lock().await;

        let settings = match self.monitor.settings().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!("settings unavailable, keeping previous check schedule: {err:#}");
                return;
            }
        };

        if let Some(old) = timers.take() {
            old.service.abort();
            old.client.abort();
        }

        info!(
            service_frequency_secs = settings.service_frequency,
            client_frequency_secs = settings.client_frequency,
            "scheduling periodic health checks"
        );

        *timers = Some(TimerSet {
            service: self.spawn_service_timer(&settings),
            client: self.spawn_client_timer(&settings),
        });
    }

    /// Cancel the timers and the settings poll.
    pub async fn shutdown(&self) {
        if let Some(poll) = self.poll.lock().await.take() {
            poll.abort();
        }
        if let Some(timers) = self.timers.lock().await.take() {
            timers.service.abort();
            timers.client.abort();
        }
    }

    fn spawn_service_timer(&self, settings: &HealthCheckSettings) -> JoinHandle<()> {
        let monitor = Arc::clone(&self.monitor);
        let period = Duration::from_secs(settings.service_frequency);
        tokio::spawn(async move {
            let mut timer = interval(period);
            loop {
                timer.tick().await;
                monitor.run_service_sweep().await;
            }
        })
    }

    fn spawn_client_timer(&self, settings: &HealthCheckSettings) -> JoinHandle<()> {
        let monitor = Arc::clone(&self.monitor);
        let period = Duration::from_secs(settings.client_frequency);
        tokio::spawn(async move {
            let mut timer = interval(period);
            loop {
                timer.tick().await;
                monitor.run_client_sweep().await;
            }
        })
    }
}
