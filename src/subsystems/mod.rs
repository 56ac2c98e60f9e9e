//! # Mebo components
//!
//! The robot is a small collection of physical subsystems: the wheel base, the
//! arm shoulder, the wrist and the claw at its end, plus a speaker. Each module
//! here exposes one facade with a handful of verbs for its subsystem, bound to
//! the shared HTTP session at connection time.
//!
//! Facades hold no state beyond the session reference. Every call is an
//! independent request; repeating a call re-issues the command to the robot.

pub mod arm;
pub mod claw;
pub mod speaker;
pub mod wheels;
pub mod wrist;
