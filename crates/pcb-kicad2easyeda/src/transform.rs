//! Unit conversion and origin derivation
//!
//! KiCad works in millimeters; EasyEDA footprints are drawn in units of 10 mil.
//! Every length goes through [`mm_to_easyeda`] so a record never mixes scaled and
//! unscaled values. Bounds are accumulated in millimeters and only the final
//! center is scaled.

use crate::error::FormatError;
use crate::mapping::{map_layer, map_pad_kind, map_pad_layers, map_shape, EasyedaLayer, ShapeKind, ShapeType};
use crate::parser::{FootprintElement, Pad, ReferenceCircle};

/// Mils per millimeter
pub const MILS_PER_MM: f64 = 39.3701;

/// EasyEDA units per millimeter (one EasyEDA unit is 10 mil)
pub const MM_TO_EASYEDA: f64 = MILS_PER_MM / 10.0;

pub fn mm_to_easyeda(mm: f64) -> f64 {
    mm * MM_TO_EASYEDA
}

/// Document-level anchor point in EasyEDA units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounds in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl BoundingBox {
    /// Bounds of a centered box with the given half extents
    fn around(center: (f64, f64), half_w: f64, half_h: f64) -> Self {
        Self {
            min: (center.0 - half_w, center.1 - half_h),
            max: (center.0 + half_w, center.1 + half_h),
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            min: (self.min.0.min(other.min.0), self.min.1.min(other.min.1)),
            max: (self.max.0.max(other.max.0), self.max.1.max(other.max.1)),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min.0 + self.max.0) / 2.0,
            (self.min.1 + self.max.1) / 2.0,
        )
    }

    /// Bounds covering every element, or `None` when there are none
    pub fn of(elements: &[FootprintElement]) -> Option<Self> {
        elements
            .iter()
            .map(|element| match element {
                FootprintElement::Pad(pad) => pad_bounds(pad),
                FootprintElement::ReferenceCircle(circle) => {
                    Self::around(circle.center, circle.radius, circle.radius)
                }
            })
            .reduce(Self::union)
    }
}

/// Pad outline bounds, accounting for rotation
fn pad_bounds(pad: &Pad) -> BoundingBox {
    let (w, h) = pad.size;
    let (sin, cos) = pad.rotation.to_radians().sin_cos();
    let half_w = (w * cos).abs() / 2.0 + (h * sin).abs() / 2.0;
    let half_h = (w * sin).abs() / 2.0 + (h * cos).abs() / 2.0;
    BoundingBox::around(pad.center, half_w, half_h)
}

/// A footprint element in EasyEDA units with EasyEDA vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum TransformedElement {
    Pad(TransformedPad),
    Circle(TransformedCircle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedPad {
    pub number: String,
    pub kind: ShapeKind,
    pub shape: ShapeType,
    pub center: (f64, f64),
    pub size: (f64, f64),
    pub rotation: f64,
    /// Hole diameter; set only for [`ShapeKind::Hole`]
    pub hole: Option<f64>,
    pub layer: EasyedaLayer,
    /// `false` for mounting-only pads that never carry a net
    pub electrical: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedCircle {
    pub center: (f64, f64),
    pub radius: f64,
    pub stroke_width: f64,
    pub layer: EasyedaLayer,
}

/// Scale every element to EasyEDA units and derive the origin.
pub fn transform(
    elements: Vec<FootprintElement>,
) -> Result<(Vec<TransformedElement>, Origin), FormatError> {
    let origin = match BoundingBox::of(&elements) {
        Some(bounds) => {
            let (x, y) = scale_point(bounds.center(), "footprint", "origin")?;
            Origin { x, y }
        }
        None => Origin::default(),
    };

    let transformed = elements
        .into_iter()
        .map(|element| match element {
            FootprintElement::Pad(pad) => transform_pad(pad).map(TransformedElement::Pad),
            FootprintElement::ReferenceCircle(circle) => {
                transform_circle(circle).map(TransformedElement::Circle)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((transformed, origin))
}

fn transform_pad(pad: Pad) -> Result<TransformedPad, FormatError> {
    let layer = map_pad_layers(&pad.layers).ok_or(FormatError::MissingField {
        construct: "pad",
        field: "layers",
    })?;
    let kind = map_pad_kind(pad.kind);

    Ok(TransformedPad {
        kind,
        shape: map_shape(pad.shape),
        center: scale_point(pad.center, "pad", "at")?,
        size: scale_point(pad.size, "pad", "size")?,
        rotation: pad.rotation,
        hole: pad
            .drill
            .filter(|_| kind == ShapeKind::Hole)
            .map(|drill| scale(drill, "pad", "drill"))
            .transpose()?,
        layer,
        electrical: pad.kind.is_electrical(),
        number: pad.number,
    })
}

fn transform_circle(circle: ReferenceCircle) -> Result<TransformedCircle, FormatError> {
    Ok(TransformedCircle {
        center: scale_point(circle.center, "fp_circle", "center")?,
        radius: scale(circle.radius, "fp_circle", "end")?,
        stroke_width: scale(circle.stroke_width, "fp_circle", "width")?,
        layer: map_layer(circle.layer),
    })
}

/// Scale one length; values that overflow to infinity are rejected
fn scale(mm: f64, construct: &'static str, field: &'static str) -> Result<f64, FormatError> {
    let value = mm_to_easyeda(mm);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::InvalidField {
            construct,
            field,
            reason: format!("{mm} mm is out of range"),
        })
    }
}

fn scale_point(
    (x, y): (f64, f64),
    construct: &'static str,
    field: &'static str,
) -> Result<(f64, f64), FormatError> {
    Ok((scale(x, construct, field)?, scale(y, construct, field)?))
}
