//! HTTP session plumbing.
//!
//! The session is the sole path by which commands reach the robot: it owns the
//! HTTP client, the base URL built from the device address, and the per-request
//! timeout. It does not retry anything, the firmware's command semantics are
//! not idempotent (repeating a `move` re-issues motion).

use std::time::Duration;

use log::{debug, trace};
use reqwest::{Client, Url};

use crate::command::{self, Component, Params, ResolvedCommand};
use crate::discovery::DeviceAddress;
use crate::{Error, Result};

/// One HTTP session against one robot. Shared read-only between the component
/// facades; nothing here is mutable after construction.
#[derive(Debug)]
pub(crate) struct Session {
    client: Client,
    base_url: Url,
}

impl Session {
    pub(crate) fn new(address: &DeviceAddress, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let base_url = Url::parse(&format!("http://{address}/"))
            .map_err(|e| Error::Config(format!("invalid device address {address}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Resolves a symbolic command against the table and sends it.
    pub(crate) async fn dispatch(
        &self,
        component: Component,
        action: &str,
        params: &Params,
    ) -> Result<DeviceResponse> {
        let resolved = command::resolve(component, action, params)?;
        self.send(&resolved).await
    }

    /// Issues the request described by a resolved command, one blocking
    /// round-trip bounded by the request timeout.
    pub(crate) async fn send(&self, command: &ResolvedCommand) -> Result<DeviceResponse> {
        let mut url = self.base_url.clone();
        url.set_path(command.path);
        debug!("{} {url} {:?}", command.method, command.query);

        let response = self
            .client
            .request(command.method.clone(), url)
            .query(&command.query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Device { status, body });
        }
        trace!("robot answered: {body:?}");
        Ok(DeviceResponse { body })
    }
}

/// A successful answer from the robot. The firmware replies with a small text
/// payload, typically `name: value`.
#[derive(Debug, Clone)]
pub(crate) struct DeviceResponse {
    body: String,
}

impl DeviceResponse {
    pub(crate) fn into_body(self) -> String {
        self.body
    }

    /// The part after the first `:` of the `name: value` payload shape.
    pub(crate) fn value(&self) -> Result<&str> {
        self.body
            .split_once(':')
            .map(|(_, value)| value.trim())
            .ok_or_else(|| {
                Error::Protocol(format!(
                    "expected a `name: value` payload, got {:?}",
                    self.body
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_strips_the_payload_name() {
        let response = DeviceResponse {
            body: "version: 03.02.37".to_owned(),
        };
        assert_eq!(response.value().unwrap(), "03.02.37");
    }

    #[test]
    fn malformed_payload_is_a_protocol_error() {
        let response = DeviceResponse {
            body: "garbage".to_owned(),
        };
        assert!(matches!(response.value(), Err(Error::Protocol(_))));
    }
}
