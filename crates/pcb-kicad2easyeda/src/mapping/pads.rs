//! Pad type and pad shape vocabularies

use serde::Serialize;

use crate::error::UnmappableValueError;

/// KiCad pad type keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadKind {
    /// `thru_hole`
    ThroughHole,
    /// `smd`
    Smd,
    /// `connect` (mechanical only, no net)
    Connect,
}

/// KiCad pad shape keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadShape {
    Circle,
    Rect,
    Oval,
}

/// EasyEDA pad primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    /// Plated pad with a drilled hole
    #[serde(rename = "HOLE")]
    Hole,
    /// Surface pad on a copper layer
    #[serde(rename = "PAD")]
    Pad,
}

/// EasyEDA pad outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeType {
    #[serde(rename = "ELLIPSE")]
    Ellipse,
    #[serde(rename = "RECT")]
    Rect,
    #[serde(rename = "OVAL")]
    Oval,
}

/// Pad type table: keyword, source kind, EasyEDA primitive, carries a net
static PAD_KIND_TABLE: &[(&str, PadKind, ShapeKind, bool)] = &[
    ("thru_hole", PadKind::ThroughHole, ShapeKind::Hole, true),
    ("smd", PadKind::Smd, ShapeKind::Pad, true),
    ("connect", PadKind::Connect, ShapeKind::Pad, false),
];

static PAD_SHAPE_TABLE: &[(&str, PadShape, ShapeType)] = &[
    ("circle", PadShape::Circle, ShapeType::Ellipse),
    ("rect", PadShape::Rect, ShapeType::Rect),
    ("oval", PadShape::Oval, ShapeType::Oval),
];

impl PadKind {
    pub fn from_keyword(keyword: &str) -> Result<Self, UnmappableValueError> {
        PAD_KIND_TABLE
            .iter()
            .find(|(k, ..)| *k == keyword)
            .map(|(_, kind, ..)| *kind)
            .ok_or_else(|| UnmappableValueError::new("pad type", keyword))
    }

    pub fn keyword(self) -> &'static str {
        kind_entry(self).0
    }

    /// Whether pads of this kind take part in a net
    pub fn is_electrical(self) -> bool {
        kind_entry(self).3
    }
}

impl PadShape {
    pub fn from_keyword(keyword: &str) -> Result<Self, UnmappableValueError> {
        PAD_SHAPE_TABLE
            .iter()
            .find(|(k, ..)| *k == keyword)
            .map(|(_, shape, _)| *shape)
            .ok_or_else(|| UnmappableValueError::new("pad shape", keyword))
    }

    pub fn keyword(self) -> &'static str {
        shape_entry(self).0
    }
}

fn kind_entry(kind: PadKind) -> &'static (&'static str, PadKind, ShapeKind, bool) {
    PAD_KIND_TABLE
        .iter()
        .find(|e| e.1 == kind)
        .unwrap_or_else(|| unreachable!("every PadKind has a table entry"))
}

fn shape_entry(shape: PadShape) -> &'static (&'static str, PadShape, ShapeType) {
    PAD_SHAPE_TABLE
        .iter()
        .find(|e| e.1 == shape)
        .unwrap_or_else(|| unreachable!("every PadShape has a table entry"))
}

/// Map a KiCad pad type to the EasyEDA pad primitive
pub fn map_pad_kind(kind: PadKind) -> ShapeKind {
    kind_entry(kind).2
}

/// Map a KiCad pad shape to the EasyEDA outline
pub fn map_shape(shape: PadShape) -> ShapeType {
    shape_entry(shape).2
}
