//! Schema self-check for rendered documents
//!
//! The rendered text is read back with a generic JSON parser and checked for the
//! fields the EasyEDA importer requires. A document without `head.x`/`head.y` imports
//! as "origin not in graphics", so those are checked first.

use serde_json::Value;

use crate::error::ValidationError;

pub fn validate(text: &str) -> Result<(), ValidationError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

    let head = doc.get("head").ok_or(ValidationError::MissingField("head"))?;
    for (key, field) in [("x", "head.x"), ("y", "head.y")] {
        match head.get(key) {
            None | Some(Value::Null) => return Err(ValidationError::MissingField(field)),
            Some(v) if !v.is_number() => return Err(ValidationError::WrongType(field)),
            Some(_) => {}
        }
    }
    if !head.get("docType").is_some_and(Value::is_string) {
        return Err(ValidationError::MissingField("head.docType"));
    }

    match doc.get("canvas") {
        None => return Err(ValidationError::MissingField("canvas")),
        Some(v) if !v.is_string() => return Err(ValidationError::WrongType("canvas")),
        Some(_) => {}
    }

    let shapes = doc
        .get("shape")
        .ok_or(ValidationError::MissingField("shape"))?
        .as_array()
        .ok_or(ValidationError::WrongType("shape"))?;
    let declared = doc
        .get("shapeCount")
        .ok_or(ValidationError::MissingField("shapeCount"))?
        .as_u64()
        .ok_or(ValidationError::WrongType("shapeCount"))?;
    if declared != shapes.len() as u64 {
        return Err(ValidationError::ShapeCountMismatch {
            declared,
            actual: shapes.len(),
        });
    }

    for (index, shape) in shapes.iter().enumerate() {
        let kind = shape
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ValidationError::UntypedShape(index))?;

        for &field in numeric_fields(kind) {
            let value = match field.split_once('.') {
                Some((outer, inner)) => shape.get(outer).and_then(|v| v.get(inner)),
                None => shape.get(field),
            };
            if !value.is_some_and(Value::is_number) {
                return Err(ValidationError::NonNumericShapeField { index, field });
            }
        }
    }

    Ok(())
}

/// Geometry fields each shape type must carry as numbers
fn numeric_fields(kind: &str) -> &'static [&'static str] {
    match kind {
        "HOLE" => &["x", "y", "width", "height", "rotation", "hole.diameter"],
        "PAD" => &["x", "y", "width", "height", "rotation"],
        "ELLIPSE" => &["cx", "cy", "rx", "ry", "strokeWidth"],
        _ => &[],
    }
}
