//! Common test utilities for building catalog documents.
use serde_json::{Value, json};

/// A block that passes validation with no findings.
#[allow(dead_code)]
pub fn valid_block(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Test Block",
        "category": "custom",
        "icon": "📦",
        "color": "#6366F1",
        "inputs": { "min": 1, "max": 1, "labels": ["input"] },
        "outputs": { "min": 1, "max": 1, "mode": "fixed", "labels": ["next"] },
        "properties": []
    })
}

/// A valid block carrying the given properties.
#[allow(dead_code)]
pub fn block_with_properties(id: &str, properties: Vec<Value>) -> Value {
    let mut block = valid_block(id);
    block["properties"] = Value::Array(properties);
    block
}

/// A catalog holding the given blocks under their keys, in order.
#[allow(dead_code)]
pub fn catalog_of(blocks: Vec<(&str, Value)>) -> Value {
    let mut map = serde_json::Map::new();
    for (key, block) in blocks {
        map.insert(key.to_string(), block);
    }
    json!({ "blockTypes": Value::Object(map) })
}

/// A catalog with one block, `b1`, carrying the given properties.
#[allow(dead_code)]
pub fn catalog_with_properties(properties: Vec<Value>) -> Value {
    catalog_of(vec![("b1", block_with_properties("b1", properties))])
}

/// A realistic catalog exercising every property type, dependent dropdowns,
/// optgroups and system variables. Validates with zero errors and zero
/// warnings.
#[allow(dead_code)]
pub const SAMPLE_CATALOG_JSON: &str = r##"{
  "blockTypes": {
    "start": {
      "id": "start",
      "name": "Start",
      "category": "call_control",
      "icon": "📞",
      "color": "#22C55E",
      "inputs": { "min": 0, "max": 0, "labels": [] },
      "outputs": { "min": 1, "max": 1, "mode": "fixed", "labels": ["next"] },
      "properties": []
    },
    "play_audio": {
      "id": "play_audio",
      "name": "Play Audio",
      "category": "playback",
      "icon": "🔊",
      "color": "#3b82f6",
      "inputs": { "min": 1, "max": -1, "labels": ["input"] },
      "outputs": { "min": 1, "max": 2, "mode": "fixed", "labels": ["next", "error"] },
      "properties": [
        {
          "key": "folder",
          "label": "Folder",
          "type": "select_database",
          "query": "SELECT id, name FROM folders ORDER BY name",
          "valueField": "id",
          "labelField": "name",
          "searchable": true
        },
        {
          "key": "audio_file",
          "label": "Audio File",
          "type": "select_database",
          "query": "SELECT id, name, url FROM audios WHERE folder_id = {{folder}}",
          "valueField": "id",
          "labelField": "name",
          "previewField": "url",
          "propertyType": "media_audio",
          "dependsOn": "folder",
          "disabledPlaceholder": "Select a folder first"
        },
        {
          "key": "repeat",
          "label": "Repeat",
          "type": "number",
          "min": 1,
          "max": 10,
          "step": 1,
          "default": 1
        },
        {
          "key": "interruptible",
          "label": "Interruptible",
          "type": "boolean",
          "default": false
        }
      ]
    },
    "menu": {
      "id": "menu",
      "name": "Menu",
      "category": "functions",
      "icon": "🔀",
      "color": "#F59E0B",
      "inputs": { "min": 1, "max": 1, "labels": ["input"] },
      "outputs": { "min": 1, "max": -1, "mode": "dynamic", "labels": ["option_1"] },
      "properties": [
        {
          "key": "prompt",
          "label": "Prompt",
          "type": "textarea",
          "showPredefinedVariables": true
        },
        {
          "key": "language",
          "label": "Language",
          "type": "select",
          "options": [
            { "value": "en", "label": "English" },
            "pt"
          ]
        },
        {
          "key": "voice",
          "label": "Voice",
          "type": "select",
          "groups": [
            { "label": "Female", "options": ["ana", "maria"] },
            { "label": "Male", "options": [{ "value": "joao", "label": "João" }] }
          ]
        },
        {
          "key": "target",
          "label": "Target",
          "type": "select_database",
          "groups": [
            {
              "label": "Queues",
              "query": "SELECT id, name FROM queues",
              "valueField": "id",
              "labelField": "name"
            },
            {
              "label": "Videos",
              "query": "SELECT id, title, thumb FROM videos",
              "valueField": "id",
              "labelField": "title",
              "previewField": "thumb",
              "propertyType": "media_video"
            }
          ]
        }
      ]
    }
  },
  "systemVariables": [
    { "key": "{{caller_id}}", "description": "Number of the caller" },
    { "key": "{{call_uuid}}", "description": "Unique id of the call" }
  ]
}"##;

#[allow(dead_code)]
pub fn sample_catalog() -> Value {
    serde_json::from_str(SAMPLE_CATALOG_JSON).expect("sample catalog is valid JSON")
}

/// Scratch directory for tests that touch the filesystem.
#[allow(dead_code)]
pub fn setup_test_dir() -> std::path::PathBuf {
    std::env::temp_dir().join("kensa-tests")
}
