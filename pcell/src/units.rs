use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SiValue {
    value: i64,
    prefix: SiPrefix,
}

impl SiValue {
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new(value: i64, prefix: SiPrefix) -> Self {
        Self { value, prefix }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn prefix(&self) -> SiPrefix {
        self.prefix
    }

    /// Creates a new [`SiValue`] by rounding to the given precision.
    ///
    /// For example, if [`SiPrefix::Nano`] is given and `value` is in meters,
    /// `value` is rounded to the nearest nanometer.
    pub fn with_precision(value: f64, precision: SiPrefix) -> Self {
        let value = (value / precision.multiplier()).round() as i64;
        Self {
            value,
            prefix: precision,
        }
    }

    /// Re-expresses the value with a finer or coarser prefix, rounding as needed.
    pub fn convert(self, precision: SiPrefix) -> Self {
        Self::with_precision(f64::from(self), precision)
    }
}

impl From<SiValue> for f64 {
    #[inline]
    fn from(value: SiValue) -> Self {
        value.value as f64 * value.prefix.multiplier()
    }
}

#[derive(
    Copy, Clone, Default, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum SiPrefix {
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    #[default]
    None,
    Kilo,
    Mega,
}

impl SiPrefix {
    pub fn multiplier(&self) -> f64 {
        match self {
            SiPrefix::Femto => 1e-15,
            SiPrefix::Pico => 1e-12,
            SiPrefix::Nano => 1e-9,
            SiPrefix::Micro => 1e-6,
            SiPrefix::Milli => 1e-3,
            SiPrefix::None => 1e0,
            SiPrefix::Kilo => 1e3,
            SiPrefix::Mega => 1e6,
        }
    }

    /// Parses the suffix used in SPICE-style numbers, such as the `u` in `150u`.
    pub fn from_suffix(s: &str) -> Option<Self> {
        Some(match s {
            "f" => Self::Femto,
            "p" => Self::Pico,
            "n" => Self::Nano,
            "u" => Self::Micro,
            "m" => Self::Milli,
            "" => Self::None,
            "k" | "K" => Self::Kilo,
            "MEG" | "meg" => Self::Mega,
            _ => return None,
        })
    }
}

impl Display for SiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.prefix)
    }
}

impl Display for SiPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match *self {
            Self::Femto => "f",
            Self::Pico => "p",
            Self::Nano => "n",
            Self::Micro => "u",
            Self::Milli => "m",
            Self::None => "",
            Self::Kilo => "K",
            Self::Mega => "MEG",
        };

        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DistanceParseError {
    #[error("`{0}` is not a number with an optional SI suffix")]
    Malformed(String),
    #[error("distance `{0}` is negative")]
    Negative(String),
    #[error("distance `{0}` does not fit in 64-bit nanometers")]
    OutOfRange(String),
}

/// A non-negative length in integer nanometers.
///
/// Written as an SI string in meters (`"150u"`, `"1.5e-4"`). Bare numbers
/// in configuration files are read as microns.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Distance(i64);

impl Distance {
    #[inline]
    pub fn from_nm(nm: i64) -> Self {
        Self(nm)
    }

    #[inline]
    pub fn nm(&self) -> i64 {
        self.0
    }

    pub fn microns(&self) -> f64 {
        self.0 as f64 * 1e-3
    }

    /// Converts `meters` to nanometers, rejecting values that are not finite,
    /// do not fit in an `i64` or are negative.
    fn checked_from_meters(meters: f64, original: &str) -> Result<Self, DistanceParseError> {
        let nm = (meters / SiPrefix::Nano.multiplier()).round();
        if !nm.is_finite() || nm.abs() >= i64::MAX as f64 {
            return Err(DistanceParseError::OutOfRange(original.to_string()));
        }
        if nm < 0.0 {
            return Err(DistanceParseError::Negative(original.to_string()));
        }
        Ok(Self(nm as i64))
    }
}

impl FromStr for Distance {
    type Err = DistanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
            .unwrap_or(trimmed.len());
        let (num, suffix) = trimmed.split_at(split);
        let prefix = SiPrefix::from_suffix(suffix)
            .ok_or_else(|| DistanceParseError::Malformed(s.to_string()))?;
        let value: f64 = num
            .parse()
            .map_err(|_| DistanceParseError::Malformed(s.to_string()))?;
        Self::checked_from_meters(value * prefix.multiplier(), s)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}u", self.microns())
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Microns(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Microns(um) => {
                Distance::checked_from_meters(um * SiPrefix::Micro.multiplier(), &um.to_string())
                    .map_err(serde::de::Error::custom)
            }
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
