//! EasyEDA JSON emitter

mod document;
mod validate;

pub use document::{
    ComponentParams, EasyedaDocument, EllipseRecord, Head, Hole, HolePadRecord, ShapeRecord,
    SurfacePadRecord,
};
pub use validate::validate;

use crate::error::ValidationError;
use crate::transform::{Origin, TransformedElement};

/// Render transformed elements as EasyEDA footprint JSON and self-check the result
pub fn serialize(
    elements: &[TransformedElement],
    origin: Origin,
    package: &str,
) -> Result<String, ValidationError> {
    let document = EasyedaDocument::new(elements, origin, package)?;
    let text = serde_json::to_string_pretty(&document)
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

    validate(&text)?;
    Ok(text)
}
