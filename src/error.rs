use std::time::Duration;

use reqwest::StatusCode;

use crate::command::Component;

/// [Result] alias for return types of the crate API
pub type Result<T> = std::result::Result<T, Error>;

/// Error enum type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No robot answered the mDNS query before the discovery timeout elapsed.
    /// Recoverable by retrying or by supplying the address explicitly.
    #[error("no robot discovered within {timeout:?}")]
    DiscoveryTimeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },
    /// The local mDNS stack failed (socket setup, daemon error). Distinct from
    /// [Error::DiscoveryTimeout]: the network was never actually searched.
    #[error("mDNS discovery failed: {0}")]
    Discovery(String),
    /// Network-level failure reaching the robot (connection refused, request
    /// timeout, interrupted transfer). The robot never reported an answer, so
    /// blindly retrying a motion command may re-issue motion.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The robot answered with a non-success HTTP status. Carries the status and
    /// body for diagnostics.
    #[error("robot reported failure: HTTP {status}: {body:?}")]
    Device {
        /// HTTP status returned by the firmware.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
    /// The robot's response did not match the expected shape. Usually a firmware
    /// version mismatch, not locally recoverable.
    #[error("unexpected response from robot: {0}")]
    Protocol(String),
    /// The (component, action) pair does not exist in the command table. This is
    /// a caller programming error, detected before any network call.
    #[error("unsupported command: {component}.{action}")]
    UnsupportedCommand {
        /// Component the command was addressed to.
        component: Component,
        /// Action name that was not recognized.
        action: String,
    },
    /// A command parameter is missing, out of range or not accepted by the
    /// action. Detected before any network call, never worth retrying.
    #[error("invalid `{name}` for {component}.{action}: {reason}")]
    InvalidParameter {
        /// Component the command was addressed to.
        component: Component,
        /// Action the parameter belongs to.
        action: String,
        /// Canonical parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Invalid address or connection settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<mdns_sd::Error> for Error {
    fn from(error: mdns_sd::Error) -> Self {
        Self::Discovery(error.to_string())
    }
}
