use std::fs;
use std::path::PathBuf;

use serde_json::json;

use fc_terminal::api_client::{
    parse_leaderboard_json, parse_match_detail_json, parse_matches_json, CreateMatchRequest,
    ImportPlayer,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn match_detail_fixture_round_trips() {
    let detail = parse_match_detail_json(&read_fixture("match_detail.json"))
        .expect("fixture should parse");

    assert_eq!(detail.summary.id, 42);
    assert_eq!(detail.summary.date_label(), "2024-03-15");
    assert_eq!(detail.summary.time_label(), "19:00");
    assert_eq!(detail.summary.format, "5v5");
    assert_eq!(detail.summary.formation.as_deref(), Some("1-2-1"));
    assert!(detail.summary.is_completed());

    assert_eq!(detail.registrations.len(), 4);
    // Either name key works on the wire.
    assert_eq!(detail.registrations[0].display_name(), "张三");
    assert_eq!(detail.registrations[1].display_name(), "李四");
    assert_eq!(detail.registrations[1].rating, None);
    assert_eq!(detail.registrations[2].position_index, None);
    assert!(!detail.registrations[3].is_starter);

    assert_eq!(detail.stats.len(), 2);
    assert_eq!(detail.stats[0].goals, 2);
    assert!(detail.stats[0].is_mvp);
    assert_eq!(detail.stats[1].yellow_cards, 1);
}

#[test]
fn null_and_empty_list_bodies_are_tolerated() {
    assert!(parse_matches_json("null").expect("null is an empty list").is_empty());
    assert!(parse_matches_json("  ").expect("blank is an empty list").is_empty());
    assert!(parse_leaderboard_json("null").expect("null is an empty list").is_empty());
}

#[test]
fn missing_match_detail_is_an_error() {
    assert!(parse_match_detail_json("null").is_err());
    assert!(parse_match_detail_json("{not json").is_err());
}

#[test]
fn bench_import_rows_serialize_an_explicit_null_index() {
    let starter = ImportPlayer {
        name: "张三".to_string(),
        preferred_position: "DF".to_string(),
        rating: 80,
        position_index: Some(0),
        is_starter: true,
    };
    let sub = ImportPlayer {
        name: "李四".to_string(),
        preferred_position: "FW".to_string(),
        rating: 75,
        position_index: None,
        is_starter: false,
    };

    let value = serde_json::to_value([&starter, &sub]).expect("players should serialize");
    assert_eq!(value[0]["position_index"], 0);
    assert_eq!(value[1]["position_index"], json!(null));
    assert!(value[1]
        .as_object()
        .expect("player row is an object")
        .contains_key("position_index"));
}

#[test]
fn create_match_request_drops_absent_fields() {
    let request = CreateMatchRequest {
        match_date: "2024-03-15".to_string(),
        match_time: None,
        location: None,
        format: "5v5".to_string(),
    };
    let value = serde_json::to_value(&request).expect("request should serialize");
    let object = value.as_object().expect("request is an object");
    assert!(!object.contains_key("match_time"));
    assert!(!object.contains_key("location"));
    assert_eq!(value["format"], "5v5");
}
