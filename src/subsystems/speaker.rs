//! # Speaker
//!
//! Playback of audio streams is not covered by this crate; only the volume
//! setting and the firmware's built-in sound are exposed.

use std::sync::Arc;

use crate::command::{Component, Params};
use crate::session::Session;
use crate::Result;

/// # Access to the speaker
#[derive(Debug)]
pub struct Speaker {
    session: Arc<Session>,
}

impl Speaker {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Sets the speaker volume. The firmware's usable range is undocumented;
    /// small values (around 6) are typical.
    pub async fn set_volume(&self, level: u8) -> Result<()> {
        self.session
            .dispatch(
                Component::Speaker,
                "set_volume",
                &Params::new().volume(level),
            )
            .await?;
        Ok(())
    }

    /// Plays the built-in sound.
    pub async fn play_sound(&self) -> Result<()> {
        self.session
            .dispatch(Component::Speaker, "play_sound", &Params::new())
            .await?;
        Ok(())
    }
}
