//! Tests for the typed catalog model built from a validated document.
mod common;
use common::*;
use kensa::schema::{
    Choices, MediaType, OutputMode, PortLimit, PortSpec, PropertyKind, PropertyType, QuerySource,
    placeholders,
};
use kensa::prelude::*;
use serde_json::json;

fn sample() -> Catalog {
    Catalog::from_value(&sample_catalog()).expect("sample catalog maps onto the model")
}

#[test]
fn test_block_order_follows_document() {
    let catalog = sample();
    let ids: Vec<_> = catalog.block_types.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["start", "play_audio", "menu"]);
    assert_eq!(catalog.system_variables.len(), 2);
}

#[test]
fn test_port_specs() {
    let catalog = sample();
    let start = catalog.get("start").unwrap();
    assert_eq!(start.inputs.max, PortLimit::AtMost(0));
    assert!(start.inputs.accepts(0));
    assert!(!start.inputs.accepts(1));

    let play = catalog.get("play_audio").unwrap();
    assert_eq!(play.inputs.max, PortLimit::Unlimited);
    assert!(play.inputs.accepts(500));
    assert!(!play.inputs.accepts(0));
    assert_eq!(play.outputs.label(1), Some("error"));
    assert_eq!(play.outputs.label(2), None);

    let menu = catalog.get("menu").unwrap();
    assert_eq!(menu.outputs.mode(), OutputMode::Dynamic);
}

#[test]
fn test_missing_mode_defaults_to_fixed() {
    let port = PortSpec::new(0, PortLimit::AtMost(2), &[]);
    assert_eq!(port.mode(), OutputMode::Fixed);
    assert!(port.is_ordered());
    assert!(!PortSpec::new(3, PortLimit::AtMost(2), &[]).is_ordered());
    assert!(PortSpec::new(3, PortLimit::Unlimited, &[]).is_ordered());
}

#[test]
fn test_port_limit_wire_form() {
    assert_eq!(PortLimit::try_from(-1), Ok(PortLimit::Unlimited));
    assert_eq!(PortLimit::try_from(4), Ok(PortLimit::AtMost(4)));
    assert!(PortLimit::try_from(-2).is_err());
    assert_eq!(i64::from(PortLimit::Unlimited), -1);
    assert_eq!(serde_json::to_value(PortLimit::AtMost(3)).unwrap(), json!(3));
}

#[test]
fn test_property_kinds() {
    let catalog = sample();
    let play = catalog.get("play_audio").unwrap();

    let repeat = play.property("repeat").unwrap();
    assert_eq!(repeat.property_type(), PropertyType::Number);
    let PropertyKind::Number(spec) = &repeat.kind else {
        panic!("repeat should be a number property");
    };
    assert_eq!(spec.clamp(42.0), 10.0);
    assert_eq!(spec.clamp(-3.0), 1.0);

    let audio = play.property("audio_file").unwrap();
    assert_eq!(audio.depends_on(), Some("folder"));
    let PropertyKind::SelectDatabase(spec) = &audio.kind else {
        panic!("audio_file should be a database select");
    };
    assert_eq!(spec.property_type, Some(MediaType::Audio));
    assert_eq!(spec.preview_field.as_deref(), Some("url"));
    let names: Vec<_> = spec.placeholders().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["folder"]);

    let menu = catalog.get("menu").unwrap();
    assert!(menu.property("prompt").unwrap().offers_system_variables());
    assert!(!play.property("interruptible").unwrap().offers_system_variables());
}

#[test]
fn test_select_choices() {
    let catalog = sample();
    let menu = catalog.get("menu").unwrap();

    let PropertyKind::Select(language) = &menu.property("language").unwrap().kind else {
        panic!("language should be a select");
    };
    assert!(matches!(language.choices, Choices::Flat { .. }));
    let labels: Vec<_> = language.choices.options().iter().map(|o| o.label()).collect();
    assert_eq!(labels, vec!["English", "pt"]);

    let PropertyKind::Select(voice) = &menu.property("voice").unwrap().kind else {
        panic!("voice should be a select");
    };
    let values: Vec<_> = voice.choices.options().iter().map(|o| o.value()).collect();
    assert_eq!(values, vec!["ana", "maria", "joao"]);
}

#[test]
fn test_grouped_database_select() {
    let catalog = sample();
    let target = catalog.get("menu").unwrap().property("target").unwrap();
    let PropertyKind::SelectDatabase(spec) = &target.kind else {
        panic!("target should be a database select");
    };
    let QuerySource::Grouped { groups } = &spec.source else {
        panic!("target should use optgroups");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].property_type, Some(MediaType::Video));
    let fields: Vec<_> = spec.queries().iter().map(|q| q.label_field.as_str()).collect();
    assert_eq!(fields, vec!["name", "title"]);
}

#[test]
fn test_by_category_keeps_first_seen_order() {
    let in_category = |id: &str, category: &str| {
        let mut block = valid_block(id);
        block["category"] = json!(category);
        block
    };
    let document = catalog_of(vec![
        ("a", in_category("a", "x")),
        ("b", in_category("b", "y")),
        ("c", in_category("c", "x")),
    ]);
    let catalog = Catalog::from_value(&document).unwrap();

    let grouped = catalog.by_category();
    let categories: Vec<_> = grouped.keys().copied().collect();
    assert_eq!(categories, vec!["x", "y"]);
    let ids: Vec<_> = grouped["x"].iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let catalog = sample();
    let hits: Vec<_> = catalog.search("AUDIO").iter().map(|b| b.id.as_str()).collect();
    assert_eq!(hits, vec!["play_audio"]);
    let hits: Vec<_> = catalog.search("call_").iter().map(|b| b.id.as_str()).collect();
    assert_eq!(hits, vec!["start"]);
    assert_eq!(catalog.search("").len(), 3);
    assert!(catalog.search("nothing matches").is_empty());
}

#[test]
fn test_system_variable_name() {
    let catalog = sample();
    let names: Vec<_> = catalog.system_variables.iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["caller_id", "call_uuid"]);
}

#[test]
fn test_model_rejects_malformed_document() {
    let mut document = sample_catalog();
    document["blockTypes"]["start"]["inputs"]["max"] = json!(-5);
    let err = Catalog::from_value(&document).unwrap_err();
    assert!(matches!(err, CatalogLoadError::Model(_)));
}

#[test]
fn test_placeholders_in_text() {
    let found = placeholders("Hello {{caller_id}}, file {{audio_file.url}} and {{ folder }}");
    let rendered: Vec<_> = found.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["{{caller_id}}", "{{audio_file.url}}", "{{folder}}"]
    );
    assert!(placeholders("no tokens {here}").is_empty());
}

#[test]
fn test_model_round_trips_through_validator() {
    let catalog = sample();
    let document = serde_json::to_value(&catalog).unwrap();
    let report = validate(&document);
    assert!(
        report.is_clean(),
        "serialized model should validate cleanly: {:?} / {:?}",
        report.error_messages(),
        report.warning_messages()
    );
}
