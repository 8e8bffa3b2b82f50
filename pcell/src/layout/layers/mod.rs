//! Utilities and types for managing layers in a PDK.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

use arcstr::ArcStr;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use self::selector::Selector;
use crate::error::{ErrorSource, Result as PcellResult};

pub mod selector;

new_key_type! {
    /// A unique identifier for a layer in a PDK.
    pub struct LayerKey;
}

/// A GDS layer specification.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct GdsLayerSpec(pub i16, pub i16);

impl From<gds21::GdsLayerSpec> for GdsLayerSpec {
    fn from(other: gds21::GdsLayerSpec) -> Self {
        Self(other.layer, other.xtype)
    }
}

#[allow(clippy::from_over_into)]
impl Into<gds21::GdsLayerSpec> for GdsLayerSpec {
    fn into(self) -> gds21::GdsLayerSpec {
        gds21::GdsLayerSpec {
            layer: self.0,
            xtype: self.1,
        }
    }
}

#[derive(Deserialize)]
struct CsvLayerRecord {
    layernum: i16,
    datatype: i16,
    name: String,
    purpose: String,
}

/// An enumeration of layer purposes.
///
/// Includes the purposes a seal ring draws on,
/// and two "escape hatches", one named and one not.
#[derive(Debug, Clone, Serialize, Deserialize, Ord, PartialOrd, PartialEq, Eq, Hash)]
pub enum LayerPurpose {
    Drawing,
    Pin,
    /// Text labels.
    Label,
    /// Density filler shapes.
    Filler,
    /// Regions excluded from automatic fill.
    NoFill,
    /// Stress-relief slots cut into wide metal.
    Slit,
    /// Named purpose, not first-class supported
    Named(ArcStr),
    /// Other purpose, not first-class supported nor named
    Other(i16),
}

impl FromStr for LayerPurpose {
    type Err = std::convert::Infallible;
    fn from_str(purp: &str) -> Result<Self, Self::Err> {
        Ok(match purp {
            "drawing" => Self::Drawing,
            "pin" => Self::Pin,
            "label" | "text" => Self::Label,
            "filler" => Self::Filler,
            "nofill" => Self::NoFill,
            "slit" => Self::Slit,
            _ => match purp.parse::<i16>() {
                Ok(other) => Self::Other(other),
                Err(_) => Self::Named(ArcStr::from(purp)),
            },
        })
    }
}

impl std::fmt::Display for LayerPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drawing => write!(f, "drawing"),
            Self::Pin => write!(f, "pin"),
            Self::Label => write!(f, "label"),
            Self::Filler => write!(f, "filler"),
            Self::NoFill => write!(f, "nofill"),
            Self::Slit => write!(f, "slit"),
            Self::Named(name) => write!(f, "{name}"),
            Self::Other(num) => write!(f, "{num}"),
        }
    }
}

/// A unique identifier for a specific GDS layer based on its definition in a PDK.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LayerSpec(LayerKey, LayerPurpose);

impl LayerSpec {
    #[inline]
    pub fn new(key: LayerKey, purpose: LayerPurpose) -> Self {
        Self(key, purpose)
    }

    /// Returns the spec for the drawing purpose of the layer associated with key `key`.
    pub fn drawing(key: LayerKey) -> Self {
        Self(key, LayerPurpose::Drawing)
    }

    pub fn label(key: LayerKey) -> Self {
        Self(key, LayerPurpose::Label)
    }

    pub fn filler(key: LayerKey) -> Self {
        Self(key, LayerPurpose::Filler)
    }

    pub fn slit(key: LayerKey) -> Self {
        Self(key, LayerPurpose::Slit)
    }

    #[inline]
    pub fn layer(&self) -> LayerKey {
        self.0
    }

    #[inline]
    pub fn purpose(&self) -> &LayerPurpose {
        &self.1
    }
}

/// A manager for layers in a PDK.
///
/// Keeps track of layers in the order they were added and indexes them by
/// name and by metal/via number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layers {
    slots: SlotMap<LayerKey, Layer>,
    order: Vec<LayerKey>,
    names: HashMap<ArcStr, LayerKey>,
    gds_to_layout: HashMap<GdsLayerSpec, LayerSpec>,
    metal_idxs: HashMap<usize, LayerKey>,
    via_idxs: HashMap<usize, LayerKey>,
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layer_infos(layer_infos: Vec<LayerInfo>) -> Self {
        let mut layers = Self::new();
        for info in layer_infos {
            layers.add(info);
        }
        layers
    }

    /// Creates a [`Layers`] from purposes specified in a CSV file.
    ///
    /// Rows sharing a name are merged into one layer. The `base` closure
    /// fills out the metadata not stored in the CSV, such as metal indices.
    pub fn from_csv(
        csv: &str,
        mut base: impl FnMut(&str) -> LayerInfo,
    ) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let mut layer_infos: Vec<LayerInfo> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in reader.deserialize() {
            let record: CsvLayerRecord = record?;
            let purp = match LayerPurpose::from_str(record.purpose.trim()) {
                Ok(purp) => purp,
                Err(never) => match never {},
            };
            let gds_spec = GdsLayerSpec(record.layernum, record.datatype);
            let name = record.name.trim();
            match positions.get(name) {
                Some(&idx) => layer_infos[idx].add_purpose(purp, gds_spec),
                None => {
                    let mut layer_info = base(name);
                    layer_info.name = ArcStr::from(name);
                    layer_info.add_purpose(purp, gds_spec);
                    positions.insert(name.to_string(), layer_infos.len());
                    layer_infos.push(layer_info);
                }
            }
        }

        Ok(Self::from_layer_infos(layer_infos))
    }

    /// Adds a layer, indexing it by name, GDS spec, and metal/via number.
    pub fn add(&mut self, layer: LayerInfo) -> LayerKey {
        let name = layer.name.clone();
        let key = self.slots.insert_with_key(|k| Layer::new(k, layer));
        for (purp, gds_spec) in self.slots[key].info.purps.iter() {
            self.gds_to_layout
                .insert(*gds_spec, LayerSpec::new(key, purp.clone()));
        }
        self.names.insert(name, key);
        self.order.push(key);

        if let Some(via_idx) = self.slots[key].info.via_idx {
            self.via_idxs.insert(via_idx, key);
        }
        if let Some(metal_idx) = self.slots[key].info.metal_idx {
            self.metal_idxs.insert(metal_idx, key);
        }

        key
    }

    /// Gets a [`LayerKey`] based on the provided [`Selector`].
    pub fn get(&self, sel: Selector) -> PcellResult<LayerKey> {
        let key = match sel {
            Selector::Metal(n) => self.metal_idxs.get(&n).copied(),
            Selector::Via(n) => self.via_idxs.get(&n).copied(),
            Selector::Name(n) => self.names.get(n).copied(),
        };
        key.ok_or_else(|| ErrorSource::LayerNotFound(format!("{sel:?}")).into())
    }

    pub fn get_key<Q>(&self, name: &Q) -> Option<LayerKey>
    where
        Q: Hash + Eq + ?Sized,
        ArcStr: Borrow<Q>,
    {
        self.names.get(name).cloned()
    }

    #[inline]
    pub fn layer(&self, key: LayerKey) -> Option<&Layer> {
        self.slots.get(key)
    }

    /// Gets the [`LayerInfo`] associated with [`LayerKey`] `key`.
    pub fn info(&self, key: LayerKey) -> PcellResult<&LayerInfo> {
        self.slots
            .get(key)
            .map(|l| &l.info)
            .ok_or_else(|| ErrorSource::LayerNotFound(format!("{key:?}")).into())
    }

    /// Gets the name of `key`.
    pub fn name(&self, key: LayerKey) -> PcellResult<&ArcStr> {
        Ok(&self.info(key)?.name)
    }

    /// Gets the metal index of `key`, or an error if it is not a metal layer.
    pub fn which_metal(&self, key: LayerKey) -> PcellResult<usize> {
        let info = self.info(key)?;
        info.metal_idx
            .ok_or_else(|| ErrorSource::LayerNotFound(format!("metal layer {}", info.name)).into())
    }

    /// Gets the via index of `key`, or an error if it is not a via layer.
    pub fn which_via(&self, key: LayerKey) -> PcellResult<usize> {
        let info = self.info(key)?;
        info.via_idx
            .ok_or_else(|| ErrorSource::LayerNotFound(format!("via layer {}", info.name)).into())
    }

    /// Gets the [`LayerSpec`] corresponding to [`GdsLayerSpec`] `spec`.
    pub fn get_from_spec(&self, spec: GdsLayerSpec) -> Option<&LayerSpec> {
        self.gds_to_layout.get(&spec)
    }

    /// Converts a [`LayerSpec`] into its corresponding [`GdsLayerSpec`].
    pub fn to_gds_spec(&self, spec: &LayerSpec) -> Option<GdsLayerSpec> {
        self.layer(spec.layer())
            .and_then(|layer| layer.info.spec(spec.purpose()))
    }

    /// Formats a layer spec as `name/purpose` for reports.
    pub fn describe(&self, spec: &LayerSpec) -> String {
        match self.name(spec.layer()) {
            Ok(name) => format!("{name}/{}", spec.purpose()),
            Err(_) => format!("{:?}/{}", spec.layer(), spec.purpose()),
        }
    }

    /// Position of `key` in the order layers were added.
    pub fn position(&self, key: LayerKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// Iterates over layers in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.order.iter().filter_map(|key| self.slots.get(*key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A layer in a PDK.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Layer {
    pub id: LayerKey,
    pub info: LayerInfo,
}

impl Layer {
    pub(crate) fn new(id: LayerKey, info: LayerInfo) -> Self {
        Self { id, info }
    }
}

/// Metadata associated with a layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Builder)]
#[builder(pattern = "owned")]
pub struct LayerInfo {
    /// The layer name.
    #[builder(setter(into), default)]
    pub name: ArcStr,
    /// A layer purpose to GDS spec lookup table.
    #[builder(setter(into), default)]
    pub purps: HashMap<LayerPurpose, GdsLayerSpec>,
    /// Position in the metal stack, counting from 1.
    #[builder(setter(strip_option), default)]
    pub metal_idx: Option<usize>,
    /// Position in the via stack; the contact layer is 0.
    ///
    /// See [`Selector::Via`] for more information.
    #[builder(setter(strip_option), default)]
    pub via_idx: Option<usize>,
    #[builder(default)]
    pub layer_type: LayerType,
}

/// An enumeraton of layer types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, Serialize, Deserialize)]
pub enum LayerType {
    Metal,
    Via,
    Diffusion,
    Gate,
    Implant,
    Passivation,
    #[default]
    Other,
}

impl LayerInfo {
    #[inline]
    pub fn builder() -> LayerInfoBuilder {
        LayerInfoBuilder::default()
    }

    #[inline]
    pub fn add_purpose(&mut self, purp: LayerPurpose, spec: GdsLayerSpec) {
        self.purps.insert(purp, spec);
    }

    /// Retrieves the spec for this layer and [`purpose`](LayerPurpose).
    pub fn spec(&self, purpose: &LayerPurpose) -> Option<GdsLayerSpec> {
        self.purps.get(purpose).copied()
    }
}
