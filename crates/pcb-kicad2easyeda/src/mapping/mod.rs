//! Fixed vocabularies for KiCad → EasyEDA translation

mod layers;
mod pads;

pub use layers::{map_layer, map_layer_name, map_pad_layers, EasyedaLayer, KicadLayer};
pub use pads::{map_pad_kind, map_shape, PadKind, PadShape, ShapeKind, ShapeType};
