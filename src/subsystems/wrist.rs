//! # Wrist
//!
//! The wrist has two axes: rotation (left/right, endless) and elevation
//! (up/down, limited by the `h_up`/`h_down` boundary positions). Rotation also
//! has small fixed-step nudges for fine positioning.

use std::sync::Arc;
use std::time::Duration;

use crate::command::{Component, Params};
use crate::session::Session;
use crate::Result;

/// # Access to the wrist
///
/// See the [wrist module documentation](crate::subsystems::wrist) for more
/// context and information.
#[derive(Debug)]
pub struct Wrist {
    session: Arc<Session>,
}

impl Wrist {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Rotates the wrist left for the given duration.
    pub async fn rotate_left(&self, duration: Duration) -> Result<()> {
        self.timed("rotate_left", duration).await
    }

    /// Rotates the wrist right for the given duration.
    pub async fn rotate_right(&self, duration: Duration) -> Result<()> {
        self.timed("rotate_right", duration).await
    }

    /// Rotates a very small, fixed amount to the left.
    pub async fn inch_left(&self) -> Result<()> {
        self.simple("inch_left").await
    }

    /// Rotates a very small, fixed amount to the right.
    pub async fn inch_right(&self) -> Result<()> {
        self.simple("inch_right").await
    }

    /// Stops the rotation axis.
    pub async fn rotate_stop(&self) -> Result<()> {
        self.simple("rotate_stop").await
    }

    /// Raises the wrist for the given duration.
    pub async fn up(&self, duration: Duration) -> Result<()> {
        self.timed("up", duration).await
    }

    /// Lowers the wrist for the given duration.
    pub async fn down(&self, duration: Duration) -> Result<()> {
        self.timed("down", duration).await
    }

    /// Stops the elevation axis.
    pub async fn lift_stop(&self) -> Result<()> {
        self.simple("lift_stop").await
    }

    async fn timed(&self, action: &str, duration: Duration) -> Result<()> {
        self.session
            .dispatch(Component::Wrist, action, &Params::new().duration(duration))
            .await?;
        Ok(())
    }

    async fn simple(&self, action: &str) -> Result<()> {
        self.session
            .dispatch(Component::Wrist, action, &Params::new())
            .await?;
        Ok(())
    }
}
