//! KiCad layer name → EasyEDA layer mapping

use crate::error::UnmappableValueError;

/// KiCad layers the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KicadLayer {
    /// `F.Cu`
    FrontCopper,
    /// `B.Cu`
    BackCopper,
    /// `*.Cu` wildcard, every copper layer
    AllCopper,
    /// `F.SilkS`
    FrontSilkscreen,
    /// `Cmts.User`
    UserComment,
}

/// An EasyEDA footprint layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EasyedaLayer {
    pub id: u8,
    pub name: &'static str,
}

impl EasyedaLayer {
    pub const TOP: Self = Self { id: 1, name: "TopLayer" };
    pub const BOTTOM: Self = Self { id: 2, name: "BottomLayer" };
    pub const TOP_SILK: Self = Self { id: 3, name: "TopSilkLayer" };
    pub const MULTI: Self = Self { id: 11, name: "Multi-Layer" };
    pub const DOCUMENT: Self = Self { id: 12, name: "Document" };
}

struct LayerEntry {
    layer: KicadLayer,
    name: &'static str,
    easyeda: EasyedaLayer,
}

static LAYER_TABLE: &[LayerEntry] = &[
    LayerEntry {
        layer: KicadLayer::FrontCopper,
        name: "F.Cu",
        easyeda: EasyedaLayer::TOP,
    },
    LayerEntry {
        layer: KicadLayer::BackCopper,
        name: "B.Cu",
        easyeda: EasyedaLayer::BOTTOM,
    },
    LayerEntry {
        layer: KicadLayer::AllCopper,
        name: "*.Cu",
        easyeda: EasyedaLayer::MULTI,
    },
    LayerEntry {
        layer: KicadLayer::FrontSilkscreen,
        name: "F.SilkS",
        easyeda: EasyedaLayer::TOP_SILK,
    },
    LayerEntry {
        layer: KicadLayer::UserComment,
        name: "Cmts.User",
        easyeda: EasyedaLayer::DOCUMENT,
    },
];

impl KicadLayer {
    /// Look up a KiCad layer by its canonical name (`F.Cu`, `Cmts.User`, ...)
    pub fn from_name(name: &str) -> Result<Self, UnmappableValueError> {
        LAYER_TABLE
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.layer)
            .ok_or_else(|| UnmappableValueError::new("layer", name))
    }

    /// Silkscreen and comment layers, the only ones reference circles are drawn on
    pub fn is_documentation(self) -> bool {
        matches!(self, KicadLayer::FrontSilkscreen | KicadLayer::UserComment)
    }

    pub fn name(self) -> &'static str {
        entry(self).name
    }
}

fn entry(layer: KicadLayer) -> &'static LayerEntry {
    LAYER_TABLE
        .iter()
        .find(|e| e.layer == layer)
        .unwrap_or_else(|| unreachable!("every KicadLayer has a table entry"))
}

/// Map a single KiCad layer to its EasyEDA counterpart
pub fn map_layer(layer: KicadLayer) -> EasyedaLayer {
    entry(layer).easyeda
}

/// Map a KiCad layer name straight to EasyEDA, rejecting anything outside the table
pub fn map_layer_name(name: &str) -> Result<EasyedaLayer, UnmappableValueError> {
    KicadLayer::from_name(name).map(map_layer)
}

/// Resolve the single EasyEDA layer a pad lives on.
///
/// A pad that lands on more than one EasyEDA layer is one Multi-Layer shape, never split.
/// Returns `None` for an empty layer list.
pub fn map_pad_layers(layers: &[KicadLayer]) -> Option<EasyedaLayer> {
    let mut mapped = layers.iter().map(|l| map_layer(*l));
    let first = mapped.next()?;

    if mapped.all(|l| l == first) {
        Some(first)
    } else {
        Some(EasyedaLayer::MULTI)
    }
}
