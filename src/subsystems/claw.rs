//! # Claw

use std::sync::Arc;
use std::time::Duration;

use crate::command::{Component, Params};
use crate::session::Session;
use crate::Result;

/// # Access to the claw
///
/// The claw opens and closes at the end of the wrist. Durations below the
/// firmware floor are clamped up.
#[derive(Debug)]
pub struct Claw {
    session: Arc<Session>,
}

impl Claw {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Opens the claw for the given duration.
    pub async fn open(&self, duration: Duration) -> Result<()> {
        self.session
            .dispatch(Component::Claw, "open", &Params::new().duration(duration))
            .await?;
        Ok(())
    }

    /// Closes the claw for the given duration.
    pub async fn close(&self, duration: Duration) -> Result<()> {
        self.session
            .dispatch(Component::Claw, "close", &Params::new().duration(duration))
            .await?;
        Ok(())
    }

    /// Stops the claw where it is.
    pub async fn stop(&self) -> Result<()> {
        self.session
            .dispatch(Component::Claw, "stop", &Params::new())
            .await?;
        Ok(())
    }
}
