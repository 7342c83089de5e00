//! EasyEDA footprint document model

use serde::Serialize;

use crate::error::ValidationError;
use crate::mapping::{ShapeKind, ShapeType};
use crate::transform::{Origin, TransformedCircle, TransformedElement, TransformedPad};

const DOC_TYPE_FOOTPRINT: &str = "4";
const EDITOR_VERSION: &str = "6.5.0";
const CONTRIBUTOR: &str = "KiCad Converter";

/// Layer definitions EasyEDA expects in every footprint document
const LAYERS: &[&str] = &[
    "1~TopLayer~#FF0000~true~true~true~",
    "2~BottomLayer~#0000FF~true~false~true~",
    "3~TopSilkLayer~#FFCC00~true~false~true~",
    "4~BottomSilkLayer~#66CC33~true~false~true~",
    "5~TopPasteMaskLayer~#808080~true~false~true~",
    "6~BottomPasteMaskLayer~#800000~true~false~true~",
    "7~TopSolderMaskLayer~#800080~true~false~true~0.3",
    "8~BottomSolderMaskLayer~#AA00FF~true~false~true~0.3",
    "9~Ratlines~#6464FF~false~false~true~",
    "10~BoardOutLine~#FF00FF~true~true~true~",
    "11~Multi-Layer~#C0C0C0~true~false~true~",
    "12~Document~#FFFFFF~true~false~true~",
    "13~TopAssembly~#33CC99~false~false~false~",
    "14~BottomAssembly~#5555FF~false~false~false~",
    "15~Mechanical~#33CC99~false~false~false~",
];

/// Object visibility flags
const OBJECTS: &[&str] = &[
    "All~true~false",
    "Component~true~true",
    "Prefix~true~true",
    "Name~true~false",
    "Track~true~true",
    "Pad~true~true",
    "Via~true~true",
    "Hole~true~true",
    "Copper_Area~true~true",
    "Circle~true~true",
    "Arc~true~true",
    "Solid_Region~true~true",
    "Text~true~true",
    "Dimension~true~true",
    "Rect~true~true",
];

/// Top-level EasyEDA footprint document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EasyedaDocument {
    pub head: Head,
    /// Canvas settings; the last two fields carry the origin
    pub canvas: String,
    pub shape: Vec<ShapeRecord>,
    #[serde(rename = "shapeCount")]
    pub shape_count: usize,
    pub layers: &'static [&'static str],
    pub objects: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Head {
    #[serde(rename = "docType")]
    pub doc_type: &'static str,
    #[serde(rename = "editorVersion")]
    pub editor_version: &'static str,
    #[serde(rename = "newgId")]
    pub newg_id: bool,
    pub c_para: ComponentParams,
    #[serde(rename = "hasIdFlag")]
    pub has_id_flag: bool,
    /// Origin, in EasyEDA units. The importer fails with "origin not in graphics" without it.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentParams {
    pub package: String,
    pub pre: &'static str,
    #[serde(rename = "Contributor")]
    pub contributor: &'static str,
}

/// One entry of the `shape` array, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ShapeRecord {
    #[serde(rename = "HOLE")]
    Hole(HolePadRecord),
    #[serde(rename = "PAD")]
    Pad(SurfacePadRecord),
    #[serde(rename = "ELLIPSE")]
    Ellipse(EllipseRecord),
}

/// Plated through-hole pad with its drill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolePadRecord {
    pub shape: ShapeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub layerid: u8,
    pub net: Option<String>,
    pub number: String,
    pub rotation: f64,
    pub hole: Hole,
    pub plated: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hole {
    pub diameter: f64,
}

/// Surface pad; `net` is null on mounting-only pads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfacePadRecord {
    pub shape: ShapeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub layerid: u8,
    pub net: Option<String>,
    pub number: String,
    pub rotation: f64,
    pub plated: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseRecord {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    pub layerid: u8,
    pub id: String,
}

impl EasyedaDocument {
    /// Assemble the document from transformed elements, pads first in source order, then circles
    pub fn new(
        elements: &[TransformedElement],
        origin: Origin,
        package: &str,
    ) -> Result<Self, ValidationError> {
        let ordered = elements
            .iter()
            .filter(|e| matches!(e, TransformedElement::Pad(_)))
            .chain(
                elements
                    .iter()
                    .filter(|e| matches!(e, TransformedElement::Circle(_))),
            );

        let shape = ordered
            .enumerate()
            .map(|(index, element)| {
                let id = format!("gge{}", index + 1);
                match element {
                    TransformedElement::Pad(pad) => pad_record(pad, id),
                    TransformedElement::Circle(circle) => Ok(circle_record(circle, id)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EasyedaDocument {
            head: Head {
                doc_type: DOC_TYPE_FOOTPRINT,
                editor_version: EDITOR_VERSION,
                newg_id: true,
                c_para: ComponentParams {
                    package: package.to_string(),
                    pre: "FP?",
                    contributor: CONTRIBUTOR,
                },
                has_id_flag: true,
                x: origin.x,
                y: origin.y,
            },
            canvas: canvas(origin),
            shape_count: shape.len(),
            shape,
            layers: LAYERS,
            objects: OBJECTS,
        })
    }
}

fn canvas(origin: Origin) -> String {
    format!(
        "CA~2000~2000~#000000~yes~#FFFFFF~10~1000~1000~line~0.5~mil~1~45~visible~0.5~{}~{}",
        origin.x, origin.y
    )
}

fn pad_record(pad: &TransformedPad, id: String) -> Result<ShapeRecord, ValidationError> {
    let record = match (pad.kind, pad.hole) {
        (ShapeKind::Hole, Some(diameter)) => ShapeRecord::Hole(HolePadRecord {
            shape: pad.shape,
            x: pad.center.0,
            y: pad.center.1,
            width: pad.size.0,
            height: pad.size.1,
            layerid: pad.layer.id,
            net: pad.electrical.then(String::new),
            number: pad.number.clone(),
            rotation: pad.rotation,
            hole: Hole { diameter },
            plated: "Y",
            id,
        }),
        (ShapeKind::Hole, None) => return Err(ValidationError::MissingHole(pad.number.clone())),
        (ShapeKind::Pad, _) => ShapeRecord::Pad(SurfacePadRecord {
            shape: pad.shape,
            x: pad.center.0,
            y: pad.center.1,
            width: pad.size.0,
            height: pad.size.1,
            layerid: pad.layer.id,
            net: pad.electrical.then(String::new),
            number: pad.number.clone(),
            rotation: pad.rotation,
            plated: "N",
            id,
        }),
    };
    Ok(record)
}

fn circle_record(circle: &TransformedCircle, id: String) -> ShapeRecord {
    ShapeRecord::Ellipse(EllipseRecord {
        cx: circle.center.0,
        cy: circle.center.1,
        rx: circle.radius,
        ry: circle.radius,
        stroke_width: circle.stroke_width,
        layerid: circle.layer.id,
        id,
    })
}
