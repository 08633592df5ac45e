//! Catalog documents on disk

use serde_json::json;
use streamui_catalog::{space_mission, Catalog, CatalogError, SchemaError};

#[test]
fn test_saved_catalog_loads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, space_mission().to_json_pretty()).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded, space_mission());
    assert_eq!(
        loaded.component_names().take(3).collect::<Vec<_>>(),
        vec!["MissionCard", "Stack", "Grid"]
    );
}

#[test]
fn test_loaded_catalog_validates_like_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, space_mission().to_json_pretty()).unwrap();
    let loaded = Catalog::load(&path).unwrap();

    assert!(loaded
        .validate("MissionStat", &json!({"value": "384K", "label": "KM"}))
        .is_ok());
    assert!(matches!(
        loaded.validate("MissionStat", &json!({"value": "384K"})),
        Err(SchemaError::InvalidProp { .. })
    ));
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Catalog::load(dir.path().join("absent.json")),
        Err(CatalogError::Io(_))
    ));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"name\": ").unwrap();
    assert!(matches!(Catalog::load(&path), Err(CatalogError::Json(_))));
}
