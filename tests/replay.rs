//! Replay scripts and catalog files loaded from disk.

use std::io::Write;

use finrings::config::Config;
use finrings::error::AppError;
use finrings::models::ContentCatalog;
use finrings::stage::{PanelKind, ReplayScript, Stage};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_hover_then_away_script() {
    let file = write_temp(
        r#"{
            "frame_ms": 10,
            "steps": [
                {"at_ms": 0, "action": {"type": "activate", "layer": "automation"}},
                {"at_ms": 700, "action": {"type": "hover", "item": "Invoice Processing"}},
                {"at_ms": 900, "action": {"type": "pointer_away"}},
                {"at_ms": 1000, "action": {"type": "hover", "item": "Compliance Checks"}}
            ]
        }"#,
    );
    let script = ReplayScript::from_file(file.path()).unwrap();
    let mut stage = Stage::new(ContentCatalog::builtin(), &Config::default());
    let snapshot = script.run(&mut stage).unwrap();

    assert_eq!(snapshot.clock_ms, 1000);
    assert_eq!(snapshot.hovered.as_deref(), Some("Compliance Checks"));
    assert_eq!(snapshot.outlined.as_deref(), Some("Compliance Checks"));
    assert_eq!(snapshot.panel.kind, PanelKind::Layer);
}

#[test]
fn test_reset_script_returns_to_overview() {
    let script = ReplayScript::parse(
        r#"{
            "frame_ms": 20,
            "until_ms": 8000,
            "steps": [
                {"at_ms": 0, "action": {"type": "activate", "layer": "cognitive"}},
                {"at_ms": 1000, "action": {"type": "hover", "item": "Scenario Modeling"}},
                {"at_ms": 3000, "action": {"type": "reset"}},
                {"at_ms": 3500, "action": {"type": "resize", "width": 1920, "height": 1080}}
            ]
        }"#,
    )
    .unwrap();
    let mut stage = Stage::new(ContentCatalog::builtin(), &Config::default());
    let snapshot = script.run(&mut stage).unwrap();

    assert_eq!(snapshot.clock_ms, 8000);
    assert_eq!(snapshot.active_layer, None);
    assert_eq!(snapshot.hovered, None);
    assert_eq!(snapshot.outlined, None);
    assert!(snapshot.labels_shown.is_empty());
    assert!(snapshot.pending_reveals.is_empty());
    assert_eq!(snapshot.panel.kind, PanelKind::Overview);
    assert_eq!(stage.scene().viewport(), (1920.0, 1080.0));
}

#[test]
fn test_unknown_item_is_reported() {
    let script = ReplayScript::parse(
        r#"{"steps": [{"at_ms": 0, "action": {"type": "hover", "item": "Crystal Ball"}}]}"#,
    )
    .unwrap();
    let mut stage = Stage::new(ContentCatalog::builtin(), &Config::default());
    let err = script.run(&mut stage).unwrap_err();
    assert!(matches!(err, AppError::UnknownSubItem(ref item) if item == "Crystal Ball"));
}

#[test]
fn test_missing_script_file() {
    let err = ReplayScript::from_file(std::path::Path::new("/nonexistent/script.json")).unwrap_err();
    assert!(matches!(err, AppError::Io { .. }));
}

#[test]
fn test_custom_catalog_file_drives_session() {
    let builtin = ContentCatalog::builtin();
    let mut data = builtin.data().clone();
    data.layers.truncate(1);
    data.layers[0].functions.truncate(2);
    let file = write_temp(&serde_json::to_string(&data).unwrap());

    let catalog = ContentCatalog::from_file(file.path()).unwrap();
    assert_eq!(catalog.layer_count(), 1);
    assert_eq!(catalog.sub_item_count(), 2);

    let script = ReplayScript::parse(
        r#"{"frame_ms": 50, "until_ms": 2500, "steps": [
            {"at_ms": 0, "action": {"type": "activate", "layer": "AUTOMATION"}}
        ]}"#,
    )
    .unwrap();
    let mut stage = Stage::new(catalog, &Config::default());
    let snapshot = script.run(&mut stage).unwrap();

    assert_eq!(snapshot.active_layer.as_deref(), Some("automation"));
    assert_eq!(snapshot.labels_shown.len(), 2);
    assert_eq!(snapshot.layers.len(), 1);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let script = ReplayScript::parse(
        r#"{"frame_ms": 16, "until_ms": 100, "steps": [
            {"at_ms": 0, "action": {"type": "activate", "layer": "generative"}}
        ]}"#,
    )
    .unwrap();
    let mut stage = Stage::new(ContentCatalog::builtin(), &Config::default());
    let snapshot = script.run(&mut stage).unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["active_layer"], "generative");
    assert_eq!(json["panel"]["kind"], "layer");
    assert_eq!(json["pending_reveals"].as_array().unwrap().len(), 7);
}

#[test]
fn test_catalog_with_shared_function_is_rejected() {
    let builtin = ContentCatalog::builtin();
    let mut data = builtin.data().clone();
    let borrowed = data.layers[0].functions[0].clone();
    data.layers[1].functions[0] = borrowed;
    let file = write_temp(&serde_json::to_string(&data).unwrap());

    let err = ContentCatalog::from_file(file.path()).unwrap_err();
    assert!(matches!(err, AppError::InvalidCatalog(_)));
}
