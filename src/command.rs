//! Command table and resolution.
//!
//! The firmware exposes one HTTP endpoint per verb, selected by the `req` query
//! parameter, with a couple of numeric parameters under firmware-specific names
//! (`dur` for durations, `value` for speeds and volumes). This module is the
//! single source of truth for that contract: a static table maps each
//! `(component, action)` pair to its request shape, and [resolve()] turns a
//! symbolic command plus canonical parameters (`speed`, `duration`, `volume`)
//! into the concrete method/path/query the session sends. The firmware wire
//! names are applied here and nowhere else.
//!
//! Resolution is pure and stateless. Parameter validation also lives here so
//! that caller mistakes are caught before any network traffic:
//! - `speed` outside `[0, 255]` is rejected,
//! - `duration` below [MIN_DURATION_MS] is clamped up to the floor, because the
//!   firmware silently ignores shorter motions,
//! - parameters that an action does not declare are rejected.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shortest motion duration the firmware acts on, in milliseconds.
///
/// Requests with a shorter `duration` are not rejected: the resolved command
/// carries the floor instead, since the physical robot silently no-ops on
/// sub-threshold durations.
pub const MIN_DURATION_MS: u64 = 1000;

/// Highest motor speed accepted by the firmware.
pub const MAX_SPEED: u16 = 255;

/// One physical subsystem of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// The wheel base.
    Wheels,
    /// The arm shoulder.
    Arm,
    /// The claw at the end of the arm.
    Claw,
    /// The wrist (rotation and elevation).
    Wrist,
    /// The built-in speaker.
    Speaker,
    /// Device-wide operations (version, restart, limits).
    System,
}

impl Component {
    fn as_str(self) -> &'static str {
        match self {
            Component::Wheels => "wheels",
            Component::Arm => "arm",
            Component::Claw => "claw",
            Component::Wrist => "wrist",
            Component::Speaker => "speaker",
            Component::System => "system",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compass direction for the wheel base.
///
/// The firmware exposes one endpoint per direction rather than a single
/// endpoint with a direction parameter; the eight symbols below map one-to-one
/// onto those endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `n`, forward.
    North,
    /// `ne`, forward-right.
    NorthEast,
    /// `e`, spin right.
    East,
    /// `se`, backward-right.
    SouthEast,
    /// `s`, backward.
    South,
    /// `sw`, backward-left.
    SouthWest,
    /// `w`, spin left.
    West,
    /// `nw`, forward-left.
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from [Direction::North].
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The compass symbol, as used in the command table (`n`, `ne`, ...).
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedCommand {
                component: Component::Wheels,
                action: s.to_owned(),
            })
    }
}

/// Canonical parameters for one command, built per call by the facades.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Params {
    speed: Option<u16>,
    duration: Option<Duration>,
    volume: Option<u8>,
}

impl Params {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    pub(crate) fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub(crate) fn volume(mut self, volume: u8) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// The parameters an action declares, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Duration,
    Speed,
    Volume,
}

impl ParamKind {
    /// Name used in the query string. The firmware vocabulary differs from the
    /// canonical one: durations travel as `dur`, speeds and volumes as `value`.
    fn wire_name(self) -> &'static str {
        match self {
            ParamKind::Duration => "dur",
            ParamKind::Speed | ParamKind::Volume => "value",
        }
    }

    fn canonical_name(self) -> &'static str {
        match self {
            ParamKind::Duration => "duration",
            ParamKind::Speed => "speed",
            ParamKind::Volume => "volume",
        }
    }
}

/// One entry of the firmware contract: how a symbolic command becomes a request.
struct CommandSpec {
    component: Component,
    action: &'static str,
    method: Method,
    path: &'static str,
    req: &'static str,
    params: &'static [ParamKind],
}

const DUR: &[ParamKind] = &[ParamKind::Duration];
const DUR_SPEED: &[ParamKind] = &[ParamKind::Duration, ParamKind::Speed];
const VOLUME: &[ParamKind] = &[ParamKind::Volume];
const NONE: &[ParamKind] = &[];

macro_rules! spec {
    ($component:ident, $action:expr, $req:expr, $params:expr) => {
        CommandSpec {
            component: Component::$component,
            action: $action,
            method: Method::GET,
            path: "/",
            req: $req,
            params: $params,
        }
    };
}

/// The full command table. Mirrors the firmware's endpoint set; kept in sync
/// with it by hand.
static COMMANDS: &[CommandSpec] = &[
    // Wheel base. One endpoint per compass direction.
    spec!(Wheels, "n", "move_forward", DUR_SPEED),
    spec!(Wheels, "ne", "move_forward_right", DUR_SPEED),
    spec!(Wheels, "e", "move_right", DUR_SPEED),
    spec!(Wheels, "se", "move_backward_right", DUR_SPEED),
    spec!(Wheels, "s", "move_backward", DUR_SPEED),
    spec!(Wheels, "sw", "move_backward_left", DUR_SPEED),
    spec!(Wheels, "w", "move_left", DUR_SPEED),
    spec!(Wheels, "nw", "move_forward_left", DUR_SPEED),
    spec!(Wheels, "inch_left", "inch_left", NONE),
    spec!(Wheels, "inch_right", "inch_right", NONE),
    spec!(Wheels, "stop", "fb_stop", NONE),
    // Arm shoulder.
    spec!(Arm, "up", "s_up", DUR),
    spec!(Arm, "down", "s_down", DUR),
    spec!(Arm, "stop", "s_stop", NONE),
    // Claw.
    spec!(Claw, "open", "c_open", DUR),
    spec!(Claw, "close", "c_close", DUR),
    spec!(Claw, "stop", "c_stop", NONE),
    // Wrist rotation and elevation.
    spec!(Wrist, "rotate_left", "w_left", DUR),
    spec!(Wrist, "rotate_right", "w_right", DUR),
    spec!(Wrist, "inch_left", "inch_w_left", NONE),
    spec!(Wrist, "inch_right", "inch_w_right", NONE),
    spec!(Wrist, "rotate_stop", "w_stop", NONE),
    spec!(Wrist, "up", "h_up", DUR),
    spec!(Wrist, "down", "h_down", DUR),
    spec!(Wrist, "lift_stop", "h_stop", NONE),
    // Speaker.
    spec!(Speaker, "set_volume", "set_spk_volume", VOLUME),
    spec!(Speaker, "play_sound", "audio_out0", NONE),
    // Device-wide.
    spec!(System, "version", "get_version", NONE),
    spec!(System, "restart", "restart_system", NONE),
    spec!(System, "boundary", "get_boundary_position", NONE),
    spec!(System, "wifi_list", "get_rt_list", NONE),
];

/// A command resolved against the table: everything the session needs to build
/// the HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedCommand {
    pub(crate) method: Method,
    pub(crate) path: &'static str,
    pub(crate) query: Vec<(&'static str, String)>,
}

/// Looks up the `(component, action)` pair and validates/normalizes the
/// parameters against the entry's declared list.
pub(crate) fn resolve(
    component: Component,
    action: &str,
    params: &Params,
) -> Result<ResolvedCommand> {
    let spec = COMMANDS
        .iter()
        .find(|spec| spec.component == component && spec.action == action)
        .ok_or_else(|| Error::UnsupportedCommand {
            component,
            action: action.to_owned(),
        })?;

    for kind in [ParamKind::Duration, ParamKind::Speed, ParamKind::Volume] {
        let supplied = match kind {
            ParamKind::Duration => params.duration.is_some(),
            ParamKind::Speed => params.speed.is_some(),
            ParamKind::Volume => params.volume.is_some(),
        };
        if supplied && !spec.params.contains(&kind) {
            return Err(invalid(
                spec,
                kind.canonical_name(),
                "not accepted by this action".to_owned(),
            ));
        }
    }

    let mut query = Vec::with_capacity(1 + spec.params.len());
    query.push(("req", spec.req.to_owned()));
    for kind in spec.params {
        let value = match kind {
            ParamKind::Duration => {
                let duration = params
                    .duration
                    .ok_or_else(|| missing(spec, kind.canonical_name()))?;
                let millis = u64::try_from(duration.as_millis()).map_err(|_| {
                    invalid(spec, "duration", format!("{duration:?} is too large"))
                })?;
                millis.max(MIN_DURATION_MS).to_string()
            }
            ParamKind::Speed => {
                let speed = params
                    .speed
                    .ok_or_else(|| missing(spec, kind.canonical_name()))?;
                if speed > MAX_SPEED {
                    return Err(invalid(
                        spec,
                        "speed",
                        format!("{speed} is outside [0, {MAX_SPEED}]"),
                    ));
                }
                speed.to_string()
            }
            ParamKind::Volume => params
                .volume
                .ok_or_else(|| missing(spec, kind.canonical_name()))?
                .to_string(),
        };
        query.push((kind.wire_name(), value));
    }

    Ok(ResolvedCommand {
        method: spec.method.clone(),
        path: spec.path,
        query,
    })
}

fn missing(spec: &CommandSpec, name: &'static str) -> Error {
    Error::InvalidParameter {
        component: spec.component,
        action: spec.action.to_owned(),
        name,
        reason: "required but not supplied".to_owned(),
    }
}

fn invalid(spec: &CommandSpec, name: &'static str, reason: String) -> Error {
    Error::InvalidParameter {
        component: spec.component,
        action: spec.action.to_owned(),
        name,
        reason,
    }
}
