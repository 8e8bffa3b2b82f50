//! Technology parameters.
//!
//! Defaults are embedded from `data/tech.toml`. A user file may override
//! any subset of keys; the two tables are merged before deserializing.

use std::path::Path;

use pcell::error::{with_err_context, ErrorContext, ErrorSource, Result};
use pcell::io::read_to_string;
use pcell::units::Distance;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TECH: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/tech.toml"));

/// Technology parameters, keyed the way the PDK names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechParams {
    /// Contact size.
    #[serde(rename = "Cnt_a")]
    pub cnt_a: Distance,
    /// Via1 to Via4 size.
    #[serde(rename = "Vn_a")]
    pub vn_a: Distance,
    #[serde(rename = "TV1_a")]
    pub tv1_a: Distance,
    #[serde(rename = "TV2_a")]
    pub tv2_a: Distance,

    /// Active and poly filler distance to the seal ring.
    #[serde(rename = "GFil_d")]
    pub gfil_d: Distance,
    /// Metal filler height.
    #[serde(rename = "MFil_a1")]
    pub mfil_a1: Distance,
    /// Metal filler width.
    #[serde(rename = "MFil_a2")]
    pub mfil_a2: Distance,
    /// Metal filler distance to the seal ring.
    #[serde(rename = "MFil_b")]
    pub mfil_b: Distance,
    #[serde(rename = "TM1Fil_a")]
    pub tm1fil_a: Distance,
    #[serde(rename = "TM1Fil_a1")]
    pub tm1fil_a1: Distance,
    #[serde(rename = "TM1Fil_c")]
    pub tm1fil_c: Distance,

    pub sealring: SealRingTech,
}

/// Seal ring construction constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SealRingTech {
    pub corner_width: Distance,
    /// Gap between the passivation band and the metal band.
    pub metal_gap: Distance,
    pub via_gap: Distance,
    pub via_shift: Distance,
    pub corner_steps: usize,
    /// Where the corner staircase ends along each edge.
    pub corner_end: Distance,
    pub l_min: Distance,
    pub w_min: Distance,
    pub metal_fill_space: Distance,
    pub top_metal_fill_space: Distance,
    pub top_metal_corner_fill: Distance,
    pub slit_width: Distance,
    pub slit_length: Distance,
    pub slit_space: Distance,
    /// Slit lane inset from the outer edge of the metal band.
    pub slit_inset: Distance,
    pub label: String,
}

impl TechParams {
    /// The SG13G2 defaults embedded in the crate.
    pub fn embedded() -> Result<Self> {
        with_err_context(Self::from_toml(DEFAULT_TECH), || {
            ErrorContext::Task(arcstr::literal!("loading embedded technology parameters"))
        })
    }

    /// Parses a complete parameter table.
    pub fn from_toml(s: &str) -> Result<Self> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Applies the keys in `overrides` on top of `self`.
    pub fn with_overrides(&self, overrides: &str) -> Result<Self> {
        let mut base = toml::Value::try_from(self)
            .map_err(|e| ErrorSource::Internal(format!("serializing tech params: {e}")))?;
        let overrides: toml::Value = toml::from_str(overrides)?;
        merge(&mut base, overrides);
        let params: Self = base.try_into()?;
        params.validate()?;
        Ok(params)
    }

    /// Reads overrides from the TOML file at `path`.
    pub fn with_override_file(&self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path)?;
        with_err_context(self.with_overrides(&contents), || {
            ErrorContext::Task(arcstr::format!("applying technology overrides from {:?}", path))
        })
    }

    /// Bar width of the via with stack index `idx`, counting the contact as 0.
    pub fn via_size(&self, idx: usize) -> Option<Distance> {
        match idx {
            0 => Some(self.cnt_a),
            1..=4 => Some(self.vn_a),
            5 => Some(self.tv1_a),
            6 => Some(self.tv2_a),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        let sr = &self.sealring;
        let positive = [
            ("Cnt_a", self.cnt_a),
            ("Vn_a", self.vn_a),
            ("TV1_a", self.tv1_a),
            ("TV2_a", self.tv2_a),
            ("MFil_a1", self.mfil_a1),
            ("MFil_a2", self.mfil_a2),
            ("TM1Fil_a", self.tm1fil_a),
            ("TM1Fil_a1", self.tm1fil_a1),
            ("sealring.corner_width", sr.corner_width),
            ("sealring.corner_end", sr.corner_end),
            ("sealring.top_metal_corner_fill", sr.top_metal_corner_fill),
            ("sealring.slit_width", sr.slit_width),
            ("sealring.slit_length", sr.slit_length),
        ];
        for (name, value) in positive {
            if value.nm() <= 0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if sr.corner_steps == 0 {
            return Err(invalid("sealring.corner_steps must be at least 1"));
        }
        let widest_via = [self.cnt_a, self.vn_a, self.tv1_a, self.tv2_a]
            .into_iter()
            .max()
            .unwrap_or_default();
        if widest_via > sr.corner_width {
            return Err(invalid(format!(
                "via size {widest_via} exceeds the corner width {}",
                sr.corner_width
            )));
        }
        if sr.via_shift > sr.via_gap {
            return Err(invalid("sealring.via_shift exceeds sealring.via_gap"));
        }
        if sr.slit_inset.nm() + sr.slit_width.nm() > sr.corner_width.nm() {
            return Err(invalid("slit lane does not fit in the metal band"));
        }
        if sr.label.is_empty() {
            return Err(invalid("sealring.label must not be empty"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> pcell::error::PcellError {
    ErrorSource::InvalidPdk(msg.into()).into()
}

/// Recursively merges `overrides` into `base`. Tables merge key by key;
/// any other value replaces the base value.
fn merge(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}
