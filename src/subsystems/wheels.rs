//! # Wheel base
//!
//! The wheel base moves along eight compass directions, each backed by its own
//! firmware endpoint: [Direction::North] drives forward, [Direction::South]
//! backward, east/west spin in place and the diagonals curve. A motion command
//! carries a speed in `[0, 255]` and a duration; the firmware ignores motions
//! shorter than [MIN_DURATION_MS](crate::MIN_DURATION_MS) milliseconds, so
//! shorter durations are clamped up to that floor.
//!
//! The following example code drives a square:
//! ``` no_run
//! # use std::time::Duration;
//! # async fn square(robot: mebo::Mebo) -> Result<(), Box<dyn std::error::Error>> {
//! use mebo::Direction;
//!
//! for direction in [Direction::North, Direction::East, Direction::South, Direction::West] {
//!     robot.wheels.drive(direction, 200, Duration::from_millis(1500)).await?;
//! }
//! robot.wheels.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::command::{Component, Direction, Params};
use crate::session::Session;
use crate::Result;

/// # Access to the wheel base
///
/// See the [wheels module documentation](crate::subsystems::wheels) for more
/// context and information.
#[derive(Debug)]
pub struct Wheels {
    session: Arc<Session>,
}

impl Wheels {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Drives in the given compass direction.
    ///
    /// # Arguments
    /// * `direction` - One of the eight compass directions
    /// * `speed` - Wheel speed, 0 to 255
    /// * `duration` - How long the wheels spin; values below the firmware
    ///   floor are clamped up, not rejected
    pub async fn drive(
        &self,
        direction: Direction,
        speed: u16,
        duration: Duration,
    ) -> Result<()> {
        let params = Params::new().speed(speed).duration(duration);
        self.session
            .dispatch(Component::Wheels, direction.symbol(), &params)
            .await?;
        Ok(())
    }

    /// Turns a very small, fixed amount to the left.
    pub async fn turn_left(&self) -> Result<()> {
        self.session
            .dispatch(Component::Wheels, "inch_left", &Params::new())
            .await?;
        Ok(())
    }

    /// Turns a very small, fixed amount to the right.
    pub async fn turn_right(&self) -> Result<()> {
        self.session
            .dispatch(Component::Wheels, "inch_right", &Params::new())
            .await?;
        Ok(())
    }

    /// Stops any motion in progress.
    pub async fn stop(&self) -> Result<()> {
        self.session
            .dispatch(Component::Wheels, "stop", &Params::new())
            .await?;
        Ok(())
    }
}
