//! # Arm shoulder
//!
//! Raises and lowers the arm. The firmware reports the reachable range through
//! [Mebo::boundary_position()](crate::Mebo::boundary_position) as the `s_up`
//! and `s_down` limits.

use std::sync::Arc;
use std::time::Duration;

use crate::command::{Component, Params};
use crate::session::Session;
use crate::Result;

/// # Access to the arm
///
/// See the [arm module documentation](crate::subsystems::arm) for more context
/// and information.
#[derive(Debug)]
pub struct Arm {
    session: Arc<Session>,
}

impl Arm {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Raises the arm for the given duration.
    pub async fn up(&self, duration: Duration) -> Result<()> {
        self.session
            .dispatch(Component::Arm, "up", &Params::new().duration(duration))
            .await?;
        Ok(())
    }

    /// Lowers the arm for the given duration.
    pub async fn down(&self, duration: Duration) -> Result<()> {
        self.session
            .dispatch(Component::Arm, "down", &Params::new().duration(duration))
            .await?;
        Ok(())
    }

    /// Stops the arm where it is.
    pub async fn stop(&self) -> Result<()> {
        self.session
            .dispatch(Component::Arm, "stop", &Params::new())
            .await?;
        Ok(())
    }
}
