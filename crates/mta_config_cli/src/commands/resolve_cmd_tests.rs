use super::*;
use configuration_entries::StoreError;
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, value.to_string()).expect("Failed to write input");
    path.display().to_string()
}

fn empty_config(dir: &TempDir) -> String {
    let path = dir.path().join("mta-config.toml");
    fs::write(&path, "[resolver]\n").expect("Failed to write config");
    path.display().to_string()
}

fn descriptor() -> Value {
    json!({
        "_schema-version": "3.3",
        "ID": "consumer",
        "modules": [{
            "name": "app",
            "type": "nodejs",
            "requires": [{ "name": "p1-config" }]
        }],
        "resources": [{
            "name": "p1-config",
            "type": "configuration",
            "parameters": { "provider-id": "p1", "version": ">=1.0.0" }
        }]
    })
}

#[tokio::test]
async fn test_resolve_prints_resolved_descriptor() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let entries = json!([{
        "providerNid": "mta",
        "providerId": "p1",
        "providerVersion": "1.2.0",
        "targetSpace": { "org": "o1", "space": "s1" },
        "content": "{\"url\":\"https://p1\"}"
    }]);
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &descriptor()),
        entries: write_json(&dir, "entries.json", &entries),
        target: "o1 s1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let output = execute(&args).await.expect("Resolution failed");
    let report: Value = serde_json::from_str(&output).expect("Output is not JSON");

    let resource = &report["descriptor"]["resources"][0];
    assert_eq!(resource["name"], json!("p1-config"));
    assert_eq!(resource["properties"]["url"], json!("https://p1"));
    assert_eq!(
        report["resolvedReferences"][0]["sourceResource"]["name"],
        json!("p1-config")
    );
}

#[tokio::test]
async fn test_resolve_reports_unresolved_reference() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &descriptor()),
        entries: write_json(&dir, "entries.json", &json!([])),
        target: "o1 s1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let result = execute(&args).await;

    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[tokio::test]
async fn test_resolve_rejects_malformed_target() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &descriptor()),
        entries: write_json(&dir, "entries.json", &json!([])),
        target: "o1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let result = execute(&args).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[tokio::test]
async fn test_resolve_missing_entries_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &descriptor()),
        entries: dir.path().join("missing.json").display().to_string(),
        target: "o1 s1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let result = execute(&args).await;

    assert!(matches!(result, Err(Error::LoadFile { .. })));
}

#[tokio::test]
async fn test_resolve_invalid_descriptor() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &json!({ "modules": "nope" })),
        entries: write_json(&dir, "entries.json", &json!([])),
        target: "o1 s1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let result = execute(&args).await;

    if let Err(Error::ParseInput { path, .. }) = result {
        assert!(path.ends_with("mtad.json"));
    } else {
        panic!("Expected ParseInput error");
    }
}

#[tokio::test]
async fn test_resolve_rejects_entry_with_non_object_content() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let entries = json!([{
        "providerNid": "mta",
        "providerId": "p1",
        "providerVersion": "1.2.0",
        "targetSpace": { "org": "o1", "space": "s1" },
        "content": "\"just a string\""
    }]);
    let args = ResolveArgs {
        descriptor: write_json(&dir, "mtad.json", &descriptor()),
        entries: write_json(&dir, "entries.json", &entries),
        target: "o1 s1".to_string(),
        config: Some(empty_config(&dir)),
    };

    let result = execute(&args).await;

    match result {
        Err(Error::Resolution(ResolutionError::Store(StoreError::MalformedEntry {
            entry, ..
        }))) => {
            assert!(entry.starts_with("mta:p1"));
        }
        other => panic!("Expected a malformed entry error, got {other:?}"),
    }
}
