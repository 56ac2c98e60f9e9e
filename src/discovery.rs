//! # Robot discovery
//!
//! The Mebo firmware advertises a `_camera._tcp` service over mDNS on the local
//! network. [discover()] browses for that service type and resolves the first
//! announcement into a [DeviceAddress]. Discovery is best-effort and
//! time-bounded: the advertisement protocol gives no delivery guarantee, one
//! successful response is sufficient and further responses are ignored.
//!
//! The multicast socket is owned by the mDNS daemon and scoped to the call: it
//! is released on every exit path, including timeout.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use log::{debug, trace, warn};
use mdns_sd::{Receiver, ServiceDaemon, ServiceEvent, ServiceInfo};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// mDNS service type advertised by the robot.
pub const SERVICE_TYPE: &str = "_camera._tcp.local.";

/// Port of the firmware's HTTP command server.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Network endpoint of one robot on the local network.
///
/// Obtained once from [discover()] or supplied directly by the caller, and
/// immutable once a session is created from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceAddress {
    /// IP address of the robot.
    pub host: IpAddr,
    /// Port of the command server, [DEFAULT_HTTP_PORT] unless overridden.
    pub port: u16,
}

impl DeviceAddress {
    /// Address with the default command port.
    pub fn new(host: IpAddr) -> Self {
        Self {
            host,
            port: DEFAULT_HTTP_PORT,
        }
    }

    /// Address with an explicit command port.
    pub fn with_port(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host {
            IpAddr::V4(ip) => write!(f, "{}:{}", ip, self.port),
            IpAddr::V6(ip) => write!(f, "[{}]:{}", ip, self.port),
        }
    }
}

impl From<IpAddr> for DeviceAddress {
    fn from(host: IpAddr) -> Self {
        Self::new(host)
    }
}

impl From<Ipv4Addr> for DeviceAddress {
    fn from(host: Ipv4Addr) -> Self {
        Self::new(host.into())
    }
}

impl From<SocketAddr> for DeviceAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::with_port(addr.ip(), addr.port())
    }
}

impl From<(IpAddr, u16)> for DeviceAddress {
    fn from((host, port): (IpAddr, u16)) -> Self {
        Self::with_port(host, port)
    }
}

/// Browses mDNS for a robot and returns the first address resolved.
///
/// Returns [Error::DiscoveryTimeout] if no announcement is resolved within
/// `timeout`; the caller may retry or fall back to a manually supplied
/// address. A failure to set up the local mDNS stack is reported as
/// [Error::Discovery] instead.
pub async fn discover(timeout: Duration) -> Result<DeviceAddress> {
    let daemon = ServiceDaemon::new()?;
    debug!("browsing {SERVICE_TYPE} for up to {timeout:?}");

    let result = match daemon.browse(SERVICE_TYPE) {
        Ok(events) => match tokio::time::timeout(timeout, first_resolved(events)).await {
            Ok(found) => found,
            Err(_) => Err(Error::DiscoveryTimeout { timeout }),
        },
        Err(e) => Err(e.into()),
    };

    let _ = daemon.stop_browse(SERVICE_TYPE);
    let _ = daemon.shutdown();

    result
}

async fn first_resolved(events: Receiver<ServiceEvent>) -> Result<DeviceAddress> {
    loop {
        match events.recv_async().await {
            Ok(ServiceEvent::ServiceResolved(info)) => {
                if let Some(address) = address_from(&info) {
                    debug!("resolved {} to {address}", info.get_fullname());
                    return Ok(address);
                }
                warn!(
                    "service {} resolved without a usable address, ignoring",
                    info.get_fullname()
                );
            }
            Ok(event) => trace!("mDNS event: {event:?}"),
            Err(_) => return Err(Error::Discovery("mDNS event channel closed".to_owned())),
        }
    }
}

fn address_from(info: &ServiceInfo) -> Option<DeviceAddress> {
    // The firmware publishes its control address in the `ip` TXT record; the
    // resolved A record is the fallback.
    if let Some(ip) = info.get_property_val_str("ip") {
        match ip.parse::<IpAddr>() {
            Ok(host) => return Some(DeviceAddress::new(host)),
            Err(_) => warn!("ignoring malformed `ip` TXT record {ip:?}"),
        }
    }
    info.get_addresses()
        .iter()
        .next()
        .map(|addr| DeviceAddress::new((*addr).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn device_address_display() {
        let v4 = DeviceAddress::new("192.168.1.100".parse().unwrap());
        assert_eq!(v4.to_string(), "192.168.1.100:80");
        let v6 = DeviceAddress::with_port("::1".parse().unwrap(), 8080);
        assert_eq!(v6.to_string(), "[::1]:8080");
    }

    // No robot advertises itself in the test environment; discovery must give
    // control back shortly after the timeout, never hang.
    #[tokio::test]
    async fn discover_returns_within_the_timeout() {
        let timeout = Duration::from_millis(300);
        let started = Instant::now();
        let result = discover(timeout).await;
        let elapsed = started.elapsed();

        match result {
            Err(Error::DiscoveryTimeout { timeout: t }) => {
                assert_eq!(t, timeout);
                assert!(elapsed >= timeout, "returned before the timeout: {elapsed:?}");
            }
            // Hosts without multicast networking fail during daemon setup.
            Err(Error::Discovery(_)) => {}
            other => panic!("expected a discovery failure, got {other:?}"),
        }
        assert!(elapsed < timeout + Duration::from_secs(2), "took {elapsed:?}");
    }
}
