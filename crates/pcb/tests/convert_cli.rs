//! CLI tests for `pcb convert easyeda`

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;

const MASK_LAYERS: [&str; 6] = [
    "--ignore-layer",
    "*.Mask",
    "--ignore-layer",
    "F.Mask",
    "--ignore-layer",
    "B.Mask",
];

fn pcb() -> Command {
    Command::cargo_bin("pcb").unwrap()
}

fn mounting_hole() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../pcb-kicad2easyeda/tests/fixtures/MountingHole_2.5mm_Pad_TopBottom.kicad_mod")
}

#[test]
fn test_convert_to_stdout() {
    let output = pcb()
        .args(["convert", "easyeda"])
        .arg(mounting_hole())
        .arg("--stdout")
        .args(MASK_LAYERS)
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["shapeCount"], Value::from(4));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Found 3 pads, 1 circles"));
    assert!(stderr.contains("Generated 4 shape elements"));
}

#[test]
fn test_default_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("MountingHole.kicad_mod");
    std::fs::copy(mounting_hole(), &input).unwrap();

    pcb()
        .args(["convert", "easyeda"])
        .arg(&input)
        .args(MASK_LAYERS)
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("MountingHole_easyeda.json")).unwrap();
    let doc: Value = serde_json::from_str(&written).unwrap();
    assert!(doc["head"]["x"].is_number());
}

#[test]
fn test_explicit_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    pcb()
        .args(["convert", "easyeda"])
        .arg(mounting_hole())
        .arg("-o")
        .arg(&output)
        .args(MASK_LAYERS)
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn test_unmappable_layer_fails() {
    let output = pcb()
        .args(["convert", "easyeda"])
        .arg(mounting_hole())
        .arg("--stdout")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unmappable layer"));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    pcb()
        .args(["convert", "easyeda"])
        .arg(dir.path().join("nope.kicad_mod"))
        .assert()
        .failure();
}
