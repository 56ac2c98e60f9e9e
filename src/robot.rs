use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::command::{Component, Params};
use crate::discovery::{self, DeviceAddress};
use crate::session::Session;
use crate::subsystems::arm::Arm;
use crate::subsystems::claw::Claw;
use crate::subsystems::speaker::Speaker;
use crate::subsystems::wheels::Wheels;
use crate::subsystems::wrist::Wrist;
use crate::{Error, Result};

/// Connection settings for [Mebo].
///
/// `address` skips discovery when set; `discovery_timeout` bounds automatic
/// discovery; `request_timeout` bounds each HTTP command.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit robot address. When `None`, mDNS discovery runs at connection
    /// time.
    pub address: Option<DeviceAddress>,
    /// How long automatic discovery may take before failing with
    /// [Error::DiscoveryTimeout](crate::Error::DiscoveryTimeout).
    pub discovery_timeout: Duration,
    /// Upper bound for each HTTP command round-trip.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: None,
            discovery_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// # The Mebo robot
///
/// This struct represents a single physical robot. Creating it opens an HTTP
/// session against the robot's command server and probes the firmware once to
/// verify the robot is actually answering; the components are then available
/// as public fields, all bound to that one session.
///
/// See the [mebo crate root documentation](crate) for more context and
/// information.
pub struct Mebo {
    /// Wheel base access
    pub wheels: Wheels,
    /// Arm access
    pub arm: Arm,
    /// Wrist access
    pub wrist: Wrist,
    /// Claw access
    pub claw: Claw,
    /// Speaker access
    pub speaker: Speaker,
    session: Arc<Session>,
    address: DeviceAddress,
    version: String,
}

impl Mebo {
    /// Connects to a robot at a known address, with default timeouts.
    pub async fn connect(address: impl Into<DeviceAddress>) -> Result<Self> {
        Self::connect_with_config(Config {
            address: Some(address.into()),
            ..Config::default()
        })
        .await
    }

    /// Discovers a robot over mDNS and connects to the first one found.
    ///
    /// If no robot announces itself within `discovery_timeout` this returns
    /// [Error::DiscoveryTimeout](crate::Error::DiscoveryTimeout) and no
    /// session is created; there is no implicit fallback address.
    pub async fn discover_and_connect(discovery_timeout: Duration) -> Result<Self> {
        Self::connect_with_config(Config {
            discovery_timeout,
            ..Config::default()
        })
        .await
    }

    /// Connects with explicit [Config] settings.
    pub async fn connect_with_config(config: Config) -> Result<Self> {
        let address = match config.address {
            Some(address) => address,
            None => discovery::discover(config.discovery_timeout).await?,
        };

        let session = Arc::new(Session::new(&address, config.request_timeout)?);

        // Probe the command server before handing out any facade, so that a
        // wrong address fails here rather than on the first motion command.
        let version = session
            .dispatch(Component::System, "version", &Params::new())
            .await?
            .value()?
            .to_owned();
        info!("connected to Mebo {version} at {address}");

        Ok(Self {
            wheels: Wheels::new(session.clone()),
            arm: Arm::new(session.clone()),
            wrist: Wrist::new(session.clone()),
            claw: Claw::new(session.clone()),
            speaker: Speaker::new(session.clone()),
            session,
            address,
            version,
        })
    }

    /// The address this robot was connected at.
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Firmware version string, fetched once at connection time.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Movement limits of the four axes as reported by the firmware.
    ///
    /// The returned map contains `name = position` entries such as `s_up` /
    /// `s_down` (arm), `c_open` / `c_close` (claw), `w_left` / `w_right`
    /// (wrist rotation) and `h_up` / `h_down` (wrist elevation).
    pub async fn boundary_position(&self) -> Result<BTreeMap<String, i64>> {
        let response = self
            .session
            .dispatch(Component::System, "boundary", &Params::new())
            .await?;
        let raw = response.value()?;

        let mut positions = BTreeMap::new();
        for pair in raw.split('&') {
            let (name, value) = pair.trim().split_once('=').ok_or_else(|| {
                Error::Protocol(format!("malformed boundary entry {:?}", pair.trim()))
            })?;
            let value = value.trim().parse::<i64>().map_err(|_| {
                Error::Protocol(format!("non-numeric boundary position {:?}", pair.trim()))
            })?;
            positions.insert(name.trim().to_owned(), value);
        }
        Ok(positions)
    }

    /// Wireless networks visible to the robot, as the raw firmware payload.
    pub async fn visible_networks(&self) -> Result<String> {
        let response = self
            .session
            .dispatch(Component::System, "wifi_list", &Params::new())
            .await?;
        Ok(response.into_body())
    }

    /// Restarts the robot. The session becomes useless until the robot is back
    /// on the network; connect again afterwards.
    pub async fn restart(&self) -> Result<()> {
        self.session
            .dispatch(Component::System, "restart", &Params::new())
            .await?;
        Ok(())
    }
}
