//! KiCad to EasyEDA footprint converter
//!
//! Converts a single KiCad footprint (`.kicad_mod`) into an EasyEDA footprint document.
//! The pipeline is pure: parse → transform (units, origin, vocabulary) → serialize →
//! self-validate. File handling lives in the `pcb` CLI.

pub mod emit;
pub mod error;
pub mod mapping;
pub mod parser;
pub mod transform;

use log::debug;

pub use error::{ConversionError, FormatError, ParseError, UnmappableValueError, ValidationError};
pub use parser::{FootprintElement, KicadFootprint};
pub use transform::{Origin, TransformedElement, MM_TO_EASYEDA};

/// Conversion settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// KiCad layer names to drop from pad layer lists before mapping (e.g. `F.Mask`).
    ///
    /// Layers outside the mapping table are errors unless listed here.
    pub ignored_layers: Vec<String>,
}

/// Everything produced by one conversion run
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Parsed source footprint, in millimeters
    pub footprint: KicadFootprint,
    /// Elements in EasyEDA units and vocabulary
    pub elements: Vec<TransformedElement>,
    pub origin: Origin,
    /// Rendered EasyEDA JSON
    pub json: String,
}

/// Convert KiCad footprint text to EasyEDA footprint JSON
pub fn convert(source: &str) -> Result<String, ConversionError> {
    convert_with(source, &ConvertOptions::default())
}

/// Convert with explicit [`ConvertOptions`]
pub fn convert_with(source: &str, options: &ConvertOptions) -> Result<String, ConversionError> {
    convert_footprint(source, options).map(|c| c.json)
}

/// Run the full pipeline and keep the intermediate results
pub fn convert_footprint(
    source: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConversionError> {
    let footprint = KicadFootprint::parse_with(source, &options.ignored_layers)?;
    debug!(
        "parsed footprint '{}' with {} elements",
        footprint.name,
        footprint.elements.len()
    );

    let (elements, origin) = transform::transform(footprint.elements.clone())?;
    let json = emit::serialize(&elements, origin, &footprint.name)?;
    debug!("origin at ({}, {})", origin.x, origin.y);

    Ok(Conversion {
        footprint,
        elements,
        origin,
        json,
    })
}
