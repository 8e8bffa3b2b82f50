//! Orientations of placed objects.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An orientation: an optional reflection about the x-axis followed by a
/// counter-clockwise rotation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Reflect vertically, i.e. negate y-coordinates.
    pub reflect_vert: bool,
    /// Counter-clockwise rotation in degrees, in `[0, 360)`.
    pub angle: f64,
}

/// Named right-angle orientations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Named {
    #[default]
    R0,
    R90,
    R180,
    R270,
    /// Mirror about the x-axis.
    MX,
    /// Mirror about the y-axis.
    MY,
    /// Mirror about the x-axis, then rotate 90 degrees.
    MXR90,
    /// Mirror about the y-axis, then rotate 90 degrees.
    MYR90,
}

impl Named {
    pub const ALL: [Named; 8] = [
        Named::R0,
        Named::R90,
        Named::R180,
        Named::R270,
        Named::MX,
        Named::MY,
        Named::MXR90,
        Named::MYR90,
    ];

    pub fn into_orientation(self) -> Orientation {
        let (reflect_vert, angle) = match self {
            Named::R0 => (false, 0.),
            Named::R90 => (false, 90.),
            Named::R180 => (false, 180.),
            Named::R270 => (false, 270.),
            Named::MX => (true, 0.),
            Named::MY => (true, 180.),
            Named::MXR90 => (true, 90.),
            Named::MYR90 => (true, 270.),
        };
        Orientation {
            reflect_vert,
            angle,
        }
    }
}

impl From<Named> for Orientation {
    fn from(value: Named) -> Self {
        value.into_orientation()
    }
}

impl Display for Named {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown orientation `{0}`")]
pub struct OrientationParseError(String);

impl FromStr for Named {
    type Err = OrientationParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R0" => Ok(Self::R0),
            "R90" => Ok(Self::R90),
            "R180" => Ok(Self::R180),
            "R270" => Ok(Self::R270),
            "MX" => Ok(Self::MX),
            "MY" => Ok(Self::MY),
            "MXR90" => Ok(Self::MXR90),
            "MYR90" => Ok(Self::MYR90),
            _ => Err(OrientationParseError(s.to_string())),
        }
    }
}

/// Wraps `angle` degrees into `[0, 360)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.);
    // -0.0 and rounding up to 360 both collapse to 0.
    if wrapped == 0. || wrapped >= 360. {
        0.
    } else {
        wrapped
    }
}
