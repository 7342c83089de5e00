//! Parser for `.kicad_mod` footprint files

use log::debug;

use super::sexpr::{self, Sexpr};
use crate::error::{FormatError, ParseError};
use crate::mapping::{KicadLayer, PadKind, PadShape};

/// Stroke width KiCad uses for documentation circles when none is given
const DEFAULT_STROKE_WIDTH_MM: f64 = 0.15;

/// Parsed KiCad footprint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KicadFootprint {
    /// Footprint name (e.g., "MountingHole_2.5mm_Pad_TopBottom")
    pub name: String,
    /// Free-form description from `(descr ...)`
    pub description: String,
    /// Recognized elements in source order
    pub elements: Vec<FootprintElement>,
}

/// A geometric primitive extracted from the footprint, in millimeters
#[derive(Debug, Clone, PartialEq)]
pub enum FootprintElement {
    Pad(Pad),
    ReferenceCircle(ReferenceCircle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Pad number/name (e.g., "1", "A1"); may repeat across pads of one pin
    pub number: String,
    pub kind: PadKind,
    pub shape: PadShape,
    pub center: (f64, f64),
    /// (width, height)
    pub size: (f64, f64),
    /// Rotation in degrees
    pub rotation: f64,
    /// Drill diameter, present only on through-hole pads
    pub drill: Option<f64>,
    pub layers: Vec<KicadLayer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCircle {
    pub center: (f64, f64),
    pub radius: f64,
    pub stroke_width: f64,
    pub layer: KicadLayer,
}

impl KicadFootprint {
    /// Parse footprint source text
    pub fn parse_str(content: &str) -> Result<Self, ParseError> {
        Self::parse_with(content, &[])
    }

    /// Parse footprint source text, discarding the named pad layers before validation
    ///
    /// Blank text is an empty footprint with no name and no elements.
    pub fn parse_with(content: &str, ignored_layers: &[String]) -> Result<Self, ParseError> {
        if content.trim().is_empty() {
            debug!("blank footprint source");
            return Ok(Self::default());
        }
        let root = sexpr::parse(content)?;

        let list = root.as_list().ok_or(FormatError::NotAFootprint)?;
        if !matches!(root.tag(), Some("footprint") | Some("module")) {
            return Err(FormatError::NotAFootprint.into());
        }

        // The name is optional; a list in its place is already the first construct
        let name = list.get(1).and_then(Sexpr::as_text);
        let body = if name.is_some() { &list[2..] } else { &list[1..] };

        let mut footprint = KicadFootprint {
            name: name.unwrap_or_default().to_string(),
            ..Default::default()
        };

        for item in body {
            let Some(items) = item.as_list() else {
                continue;
            };

            match item.tag() {
                Some("descr") => {
                    footprint.description = items
                        .get(1)
                        .and_then(Sexpr::as_text)
                        .unwrap_or_default()
                        .to_string();
                }
                Some("pad") => {
                    let pad = parse_pad(item, ignored_layers)?;
                    footprint.elements.push(FootprintElement::Pad(pad));
                }
                Some("fp_circle") => {
                    if let Some(circle) = parse_circle(item)? {
                        footprint
                            .elements
                            .push(FootprintElement::ReferenceCircle(circle));
                    }
                }
                Some(other) => debug!("skipping unsupported construct '{other}'"),
                None => {}
            }
        }

        Ok(footprint)
    }

    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.elements.iter().filter_map(|e| match e {
            FootprintElement::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &ReferenceCircle> {
        self.elements.iter().filter_map(|e| match e {
            FootprintElement::ReferenceCircle(circle) => Some(circle),
            _ => None,
        })
    }
}

fn parse_pad(pad: &Sexpr, ignored_layers: &[String]) -> Result<Pad, ParseError> {
    let list = pad.as_list().unwrap_or_default();

    let number = list
        .get(1)
        .and_then(Sexpr::as_text)
        .ok_or(missing("pad", "number"))?
        .to_string();
    let kind = list
        .get(2)
        .and_then(Sexpr::as_sym)
        .ok_or(missing("pad", "type"))?;
    let kind = PadKind::from_keyword(kind)?;
    let shape = list
        .get(3)
        .and_then(Sexpr::as_sym)
        .ok_or(missing("pad", "shape"))?;
    let shape = PadShape::from_keyword(shape)?;

    let at = pad.child("at").ok_or(missing("pad", "at"))?;
    let center = point(at, "pad", "at")?;
    let rotation = at.get(3).and_then(Sexpr::as_float).unwrap_or(0.0);

    let size = pad.child("size").ok_or(missing("pad", "size"))?;
    let size = point(size, "pad", "size")?;
    if size.0 <= 0.0 || size.1 <= 0.0 {
        return Err(invalid("pad", "size", format!("{} x {}", size.0, size.1)).into());
    }
    if shape == PadShape::Circle && size.0 != size.1 {
        return Err(invalid(
            "pad",
            "size",
            format!("circle pad must be round, got {} x {}", size.0, size.1),
        )
        .into());
    }

    let drill = pad.child("drill").map(parse_drill).transpose()?;
    match (kind, drill) {
        (PadKind::ThroughHole, None) => return Err(missing("pad", "drill").into()),
        (PadKind::ThroughHole, Some(_)) => {}
        (_, Some(_)) => {
            return Err(invalid(
                "pad",
                "drill",
                format!("{} pad cannot have a drill", kind.keyword()),
            )
            .into())
        }
        (_, None) => {}
    }

    let names = pad.child("layers").ok_or(missing("pad", "layers"))?;
    let mut layers = Vec::new();
    for name in names.iter().skip(1).filter_map(Sexpr::as_text) {
        if ignored_layers.iter().any(|ignored| ignored == name) {
            debug!("pad {number}: ignoring layer '{name}'");
            continue;
        }
        let layer = KicadLayer::from_name(name)?;
        if !layers.contains(&layer) {
            layers.push(layer);
        }
    }
    if layers.is_empty() {
        return Err(missing("pad", "layers").into());
    }

    Ok(Pad {
        number,
        kind,
        shape,
        center,
        size,
        rotation,
        drill,
        layers,
    })
}

/// `(drill D)`, `(drill oval W H)`, `(drill D (offset X Y))`; oval drills use their width.
fn parse_drill(drill: &[Sexpr]) -> Result<f64, FormatError> {
    let diameter = drill
        .iter()
        .skip(1)
        .filter(|s| s.as_sym() != Some("oval"))
        .find_map(Sexpr::as_float)
        .ok_or(missing("pad", "drill"))?;

    if diameter <= 0.0 {
        return Err(invalid("pad", "drill", diameter.to_string()));
    }
    Ok(diameter)
}

/// Returns `None` for circles off the documentation layers (copper, courtyard, fab, ...).
fn parse_circle(circle: &Sexpr) -> Result<Option<ReferenceCircle>, FormatError> {
    let center = circle
        .child("center")
        .ok_or(missing("fp_circle", "center"))?;
    let center = point(center, "fp_circle", "center")?;
    let end = circle.child("end").ok_or(missing("fp_circle", "end"))?;
    let end = point(end, "fp_circle", "end")?;

    let layer = circle
        .child("layer")
        .and_then(|l| l.get(1))
        .and_then(Sexpr::as_text)
        .ok_or(missing("fp_circle", "layer"))?;
    let layer = match KicadLayer::from_name(layer) {
        Ok(layer) if layer.is_documentation() => layer,
        _ => {
            debug!("skipping fp_circle on unsupported layer '{layer}'");
            return Ok(None);
        }
    };

    let stroke_width = circle
        .child("stroke")
        .and_then(|stroke| {
            stroke
                .iter()
                .find(|s| s.tag() == Some("width"))
                .and_then(|w| w.as_list())
        })
        .or_else(|| circle.child("width"))
        .and_then(|w| w.get(1))
        .and_then(Sexpr::as_float)
        .unwrap_or(DEFAULT_STROKE_WIDTH_MM);

    let radius = (end.0 - center.0).hypot(end.1 - center.1);

    Ok(Some(ReferenceCircle {
        center,
        radius,
        stroke_width,
        layer,
    }))
}

fn point(list: &[Sexpr], construct: &'static str, field: &'static str) -> Result<(f64, f64), FormatError> {
    match (
        list.get(1).and_then(Sexpr::as_float),
        list.get(2).and_then(Sexpr::as_float),
    ) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(invalid(construct, field, "expected two numbers".to_string())),
    }
}

fn missing(construct: &'static str, field: &'static str) -> FormatError {
    FormatError::MissingField { construct, field }
}

fn invalid(construct: &'static str, field: &'static str, reason: String) -> FormatError {
    FormatError::InvalidField {
        construct,
        field,
        reason,
    }
}
