use std::net::IpAddr;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use surge_ping::{Client as PingClient, Config as PingConfig, ICMP, PingIdentifier, PingSequence};

use crate::target::HealthCheckConfig;

/// Outcome of a single HTTP probe.
///
/// Any delivered response is `Delivered`, whatever its status code;
/// classification against the expected status happens in the executor.
#[derive(Debug)]
pub enum HttpProbeOutcome {
    Delivered { status_code: u16 },
    Failed { error: String },
}

/// HTTP prober with a shared connection pool and per-request deadlines.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// The client carries no global timeout; the deadline is applied per
    /// request so settings changes take effect on the very next probe.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    pub async fn probe(&self, check: &HealthCheckConfig, timeout: Duration) -> HttpProbeOutcome {
        // Stored methods come from the admin UI in either case.
        let method =
            Method::from_bytes(check.method.to_uppercase().as_bytes()).unwrap_or(Method::GET);

        match self
            .client
            .request(method, check.url.as_str())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => HttpProbeOutcome::Delivered {
                status_code: response.status().as_u16(),
            },
            Err(err) if err.is_timeout() => HttpProbeOutcome::Failed {
                error: "request timed out".to_string(),
            },
            Err(err) => HttpProbeOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PingError {
    #[error("ping timed out")]
    Timeout,
    #[error("{0}")]
    Probe(String),
}

/// One ICMP liveness attempt against one address.
///
/// Behind a trait so the executor can be exercised without raw-socket
/// privileges; the real implementation is [`IcmpPinger`].
#[async_trait]
pub trait Pinger: Send + Sync {
    /// Send a single echo request and wait up to `timeout` for the reply.
    /// Resolves to the round-trip time when the echo is answered.
    async fn ping(&self, addr: IpAddr, timeout: Duration) -> Result<Duration, PingError>;
}

/// ICMP pinger backed by surge-ping.
///
/// Opening the echo sockets requires CAP_NET_RAW (or an unprivileged ICMP
/// socket where the platform allows one).
pub struct IcmpPinger {
    v4: PingClient,
    v6: PingClient,
}

impl IcmpPinger {
    pub fn new() -> Result<Self> {
        let v4 = PingClient::new(&PingConfig::default())?;
        let v6 = PingClient::new(&PingConfig::builder().kind(ICMP::V6).build())?;
        Ok(Self { v4, v6 })
    }
}

#[async_trait]
impl Pinger for IcmpPinger {
    async fn ping(&self, addr: IpAddr, timeout: Duration) -> Result<Duration, PingError> {
        let client = match addr {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };

        let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &[0u8; 56]).await {
            Ok((_packet, rtt)) => Ok(rtt),
            Err(surge_ping::SurgeError::Timeout { .. }) => Err(PingError::Timeout),
            Err(err) => Err(PingError::Probe(err.to_string())),
        }
    }
}

/// Stand-in used when the ICMP sockets cannot be opened at startup; every
/// probe fails with the recorded reason, so pingable clients classify as
/// offline instead of the whole process refusing to run.
pub struct UnavailablePinger {
    reason: String,
}

impl UnavailablePinger {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Pinger for UnavailablePinger {
    async fn ping(&self, _addr: IpAddr, _timeout: Duration) -> Result<Duration, PingError> {
        Err(PingError::Probe(self.reason.clone()))
    }
}
