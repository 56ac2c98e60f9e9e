//! # Mebo robot library
//!
//! This crate allows to discover, connect and control the Mebo toy robot over its
//! local-network HTTP API. The robot advertises itself with mDNS and every command
//! is a small parameterized HTTP request against the firmware's web server, so the
//! crate is a thin convenience layer: find the robot, open a session, and map a
//! handful of motion and component verbs onto the endpoints the firmware expects.
//!
//! ## Status
//!
//! The robot functionalities are implemented as components. The current status is:
//!
//! | Component | Support |
//! |-----------|---------|
//! | Wheels | Full |
//! | Arm | Full |
//! | Claw | Full |
//! | Wrist | Full |
//! | Speaker | Partial (volume and the built-in sound) |
//! | Camera / media streaming | None |
//! | Microphone | None |
//!
//! Media streaming (RTSP) and audio capture are firmware features this crate does
//! not cover; the command path is independent of them.
//!
//! ## Usage
//!
//! The basic procedure to use the lib is:
//!  - Find the robot address, either with [discover()] / [Mebo::discover_and_connect()]
//!    or from configuration or user input
//!  - Create a [Mebo] object, this will probe the robot and initialize the components
//!  - Components are available as public fields of the [Mebo] struct
//!  - Use the components to control the robot
//!
//! All component functions only take an un-mutable reference to self (`&self`), the
//! intention is for the [Mebo] object to be shared between tasks using `Arc<>`.
//! Commands are strictly sequential within one session: each call is one awaited
//! HTTP round-trip, there is no pipelining and no automatic retry.
//!
//! For example:
//! ``` no_run
//! # async fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//!
//! // Browse mDNS for a Mebo and connect to the first one found
//! let robot = mebo::Mebo::discover_and_connect(Duration::from_secs(10)).await?;
//! println!("Connected to Mebo {} at {}", robot.version(), robot.address());
//!
//! // Drive north (forward) for a second at full speed
//! robot.wheels.drive(mebo::Direction::North, 255, Duration::from_millis(1000)).await?;
//!
//! // Grab something
//! robot.claw.open(Duration::from_millis(1000)).await?;
//! robot.arm.down(Duration::from_millis(1500)).await?;
//! robot.claw.close(Duration::from_millis(1000)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod command;
mod discovery;
mod error;
mod robot;
mod session;

pub mod subsystems;

pub use crate::command::{Component, Direction, MAX_SPEED, MIN_DURATION_MS};
pub use crate::discovery::{discover, DeviceAddress, DEFAULT_HTTP_PORT, SERVICE_TYPE};
pub use crate::error::{Error, Result};
pub use crate::robot::{Config, Mebo};
