use pcb_kicad2easyeda::{
    convert, convert_with, ConversionError, ConvertOptions, FormatError, UnmappableValueError,
};
use serde_json::Value;
use std::path::Path;

const EPSILON: f64 = 1e-9;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap()
}

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).expect("output should be valid JSON")
}

fn number(value: &Value) -> f64 {
    value.as_f64().expect("expected a number")
}

fn shapes(doc: &Value) -> &Vec<Value> {
    doc["shape"].as_array().expect("shape array")
}

#[test]
fn test_deterministic_output() {
    let src = fixture("MountingHole_2.5mm_Pad_TopBottom.kicad_mod");
    let options = ConvertOptions {
        ignored_layers: vec!["*.Mask".into(), "F.Mask".into(), "B.Mask".into()],
    };

    let first = convert_with(&src, &options).unwrap();
    let second = convert_with(&src, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unit_scale() {
    let src = r#"(footprint "P" (pad "1" smd rect (at 1.0 0.0) (size 0.5 0.5) (layers "F.Cu")))"#;
    let doc = parse_json(&convert(src).unwrap());
    let pad = &shapes(&doc)[0];

    assert!((number(&pad["x"]) - 1.0 * 39.3701 / 10.0).abs() < EPSILON);
    assert!(number(&pad["y"]).abs() < EPSILON);
    assert!((number(&pad["width"]) - 0.5 * 3.93701).abs() < EPSILON);
}

#[test]
fn test_origin_centering() {
    let src = r#"(footprint "Circles"
        (fp_circle (center 0 0) (end 0 0) (layer "Cmts.User"))
        (fp_circle (center 10 0) (end 10 0) (layer "Cmts.User")))"#;
    let doc = parse_json(&convert(src).unwrap());

    assert!((number(&doc["head"]["x"]) - 5.0 * 3.93701).abs() < EPSILON);
    assert!(number(&doc["head"]["y"]).abs() < EPSILON);
    assert_eq!(shapes(&doc).len(), 2);
}

#[test]
fn test_multi_layer_consolidation() {
    let src = r#"(footprint "P" (pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu" "B.Cu")))"#;
    let doc = parse_json(&convert(src).unwrap());
    let shapes = shapes(&doc);

    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0]["layerid"], Value::from(11));
}

#[test]
fn test_drill_preservation() {
    let src = r#"(footprint "H" (pad "1" thru_hole circle (at 0 0) (size 4 4) (drill 2.5) (layers "*.Cu")))"#;
    let doc = parse_json(&convert(src).unwrap());
    let hole = &shapes(&doc)[0];

    assert_eq!(hole["type"], "HOLE");
    assert!((number(&hole["hole"]["diameter"]) - 2.5 * 39.3701 / 10.0).abs() < EPSILON);
}

#[test]
fn test_empty_footprint() {
    let doc = parse_json(&convert(r#"(footprint "Nothing" (layer "F.Cu"))"#).unwrap());

    assert!(shapes(&doc).is_empty());
    assert_eq!(doc["shapeCount"], Value::from(0));
    assert_eq!(number(&doc["head"]["x"]), 0.0);
    assert_eq!(number(&doc["head"]["y"]), 0.0);
}

#[test]
fn test_origin_always_present() {
    let sources = [
        r#"(footprint "A")"#,
        r#"(footprint "B" (pad "1" smd oval (at -3 2) (size 1 2) (layers "B.Cu")))"#,
        r#"(footprint "C" (fp_circle (center 1 1) (end 2 1) (layer "F.SilkS")))"#,
    ];

    for src in sources {
        let doc = parse_json(&convert(src).unwrap());
        assert!(doc["head"]["x"].is_number(), "{src}");
        assert!(doc["head"]["y"].is_number(), "{src}");
        assert!(doc["canvas"].is_string(), "{src}");
        assert_eq!(
            doc["shapeCount"].as_u64(),
            Some(shapes(&doc).len() as u64),
            "{src}"
        );
    }
}

#[test]
fn test_unknown_layer_rejected() {
    let src = r#"(footprint "P" (pad "1" smd rect (at 0 0) (size 1 1) (layers "In1.Cu")))"#;
    assert_eq!(
        convert(src),
        Err(ConversionError::Unmappable(UnmappableValueError {
            kind: "layer",
            value: "In1.Cu".to_string(),
        }))
    );
}

#[test]
fn test_mounting_hole_end_to_end() {
    let src = r#"(footprint "MountingHole_2.5mm_Pad_TopBottom"
        (pad "1" thru_hole circle (at 0 0) (size 2.5 2.5) (drill 2.5) (layers "*.Cu"))
        (pad "1" connect circle (at 0 0) (size 2.5 2.5) (layers "F.Cu"))
        (pad "1" connect circle (at 0 0) (size 2.5 2.5) (layers "B.Cu"))
        (fp_circle (center 0 0) (end 1.25 0) (layer "Cmts.User")))"#;
    let doc = parse_json(&convert(src).unwrap());
    let shapes = shapes(&doc);

    assert_eq!(shapes.len(), 4);
    assert_eq!(doc["shapeCount"], Value::from(4));

    let types: Vec<_> = shapes.iter().map(|s| s["type"].as_str().unwrap()).collect();
    assert_eq!(types, ["HOLE", "PAD", "PAD", "ELLIPSE"]);

    assert!(shapes[0]["hole"].is_object());
    assert!(shapes[1]["net"].is_null());
    assert_eq!(shapes[1]["layerid"], Value::from(1));
    assert_eq!(shapes[2]["layerid"], Value::from(2));
    assert_eq!(shapes[3]["layerid"], Value::from(12));
    assert!((number(&shapes[3]["rx"]) - 1.25 * 3.93701).abs() < EPSILON);

    assert_eq!(number(&doc["head"]["x"]), 0.0);
    assert_eq!(number(&doc["head"]["y"]), 0.0);
}

#[test]
fn test_kicad8_fixture() {
    let src = fixture("MountingHole_2.5mm_Pad_TopBottom.kicad_mod");

    // Mask layers have no EasyEDA mapping
    assert!(matches!(convert(&src), Err(ConversionError::Unmappable(_))));

    let options = ConvertOptions {
        ignored_layers: vec!["*.Mask".into(), "F.Mask".into(), "B.Mask".into()],
    };
    let doc = parse_json(&convert_with(&src, &options).unwrap());
    let shapes = shapes(&doc);

    // property, fp_text and the courtyard circle are dropped
    let types: Vec<_> = shapes.iter().map(|s| s["type"].as_str().unwrap()).collect();
    assert_eq!(types, ["PAD", "PAD", "HOLE", "ELLIPSE"]);

    let layers: Vec<_> = shapes.iter().map(|s| s["layerid"].as_u64().unwrap()).collect();
    assert_eq!(layers, [2, 1, 11, 12]);

    assert_eq!(doc["head"]["c_para"]["package"], "MountingHole_2.5mm_Pad_TopBottom");
    assert!((number(&shapes[2]["hole"]["diameter"]) - 2.5 * 3.93701).abs() < EPSILON);
    assert!((number(&shapes[3]["strokeWidth"]) - 0.15 * 3.93701).abs() < EPSILON);
}

#[test]
fn test_malformed_source() {
    assert!(matches!(
        convert(r#"(footprint "X" (pad "1" smd rect (at 0 0)"#),
        Err(ConversionError::Format(_))
    ));
    assert!(matches!(
        convert(r#"(footprint "X" (pad "1" smd rect (size 1 1) (layers "F.Cu")))"#),
        Err(ConversionError::Format(_))
    ));
}

#[test]
fn test_blank_source_is_empty_document() {
    for src in ["", "  \n\t "] {
        let doc = parse_json(&convert(src).unwrap());
        assert_eq!(shapes(&doc).len(), 0);
        assert_eq!(doc["shapeCount"], 0);
        assert_eq!(doc["head"]["x"], 0.0);
        assert_eq!(doc["head"]["y"], 0.0);
        assert_eq!(doc["head"]["c_para"]["package"], "");
    }
}

#[test]
fn test_overflowing_geometry_fails() {
    let src = r#"(footprint "X" (pad "1" smd rect (at 0 0) (size 1e308 1e308) (layers "F.Cu")))"#;
    assert!(matches!(
        convert(src),
        Err(ConversionError::Format(FormatError::InvalidField { field: "size", .. }))
    ));
}

#[test]
fn test_deep_nesting_fails() {
    let src = format!(
        "(footprint \"X\" {}{})",
        "(".repeat(200_000),
        ")".repeat(200_000)
    );
    assert!(matches!(
        convert(&src),
        Err(ConversionError::Format(FormatError::TooDeep(_)))
    ));
}

#[test]
fn test_copper_circle_not_emitted() {
    let src = r#"(footprint "X"
        (pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu"))
        (fp_circle (center 0 0) (end 1 0) (layer "F.Cu")))"#;
    let doc = parse_json(&convert(src).unwrap());
    let types: Vec<_> = shapes(&doc).iter().map(|s| s["type"].clone()).collect();
    assert_eq!(types, ["PAD"]);
}

#[test]
fn test_unsupported_constructs_dropped() {
    let src = r#"(footprint "X"
        (fp_line (start 0 0) (end 1 1) (layer "F.SilkS"))
        (fp_arc (start 0 0) (mid 1 1) (end 2 0) (layer "F.SilkS"))
        (fp_poly (pts (xy 0 0) (xy 1 0) (xy 1 1)) (layer "F.SilkS"))
        (fp_text reference "REF**" (at 0 0) (layer "F.SilkS"))
        (model "${KICAD8_3DMODEL_DIR}/x.wrl")
        (pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu")))"#;
    let doc = parse_json(&convert(src).unwrap());
    assert_eq!(shapes(&doc).len(), 1);
}
