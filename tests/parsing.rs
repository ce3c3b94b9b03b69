use std::fs;
use std::path::PathBuf;

use fc_terminal::formations::SquadFormat;
use fc_terminal::roster_parse::{parse_roster, MAX_INPUT_CHARS};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_full_signup_message() {
    let text = read_fixture("signup.txt");
    let roster = parse_roster(&text, SquadFormat::FiveASide);

    assert_eq!(roster.date, "2024-03-15");
    assert_eq!(roster.time, "19:00");
    assert_eq!(roster.location, "世纪公园5号场");

    let names: Vec<&str> = roster.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["张三", "李四", "王五", "赵六", "钱七", "孙八", "周九"]
    );
}

#[test]
fn positions_follow_template_then_overflow_cycle() {
    let text = read_fixture("signup.txt");
    let roster = parse_roster(&text, SquadFormat::FiveASide);

    let positions: Vec<&str> = roster.players.iter().map(|p| p.position.as_str()).collect();
    // Five template positions, then the sixth and seventh sign-up roll over.
    assert_eq!(positions, ["DF", "DF", "MF", "FW", "FW", "DF", "MF"]);
}

#[test]
fn single_digit_date_parts_are_zero_padded() {
    let roster = parse_roster("2024年3月5日 8点", SquadFormat::FiveASide);
    assert_eq!(roster.date, "2024-03-05");
    assert_eq!(roster.time, "08:00");
}

#[test]
fn header_only_message_has_no_players() {
    let roster = parse_roster("2024年3月15日 18点 地点：河畔球场", SquadFormat::FiveASide);
    assert!(!roster.has_players());
    assert_eq!(roster.location, "河畔球场");
}

#[test]
fn garbage_input_yields_empty_roster() {
    let roster = parse_roster("hello, nothing to see here", SquadFormat::SevenASide);
    assert_eq!(roster.date, "");
    assert_eq!(roster.time, "");
    assert_eq!(roster.location, "");
    assert!(!roster.has_players());
}

#[test]
fn input_is_clipped_before_parsing() {
    let mut text = "x".repeat(MAX_INPUT_CHARS);
    text.push_str("\n2024年3月15日\n1. 张三");
    let roster = parse_roster(&text, SquadFormat::FiveASide);
    assert_eq!(roster.date, "");
    assert!(!roster.has_players());
}

#[test]
fn numbers_in_header_lines_are_not_players() {
    let text = "2024年3月15日 19点\n地点：世纪公园5号场\n1. 张三";
    let roster = parse_roster(text, SquadFormat::FiveASide);
    assert_eq!(roster.players.len(), 1);
    assert_eq!(roster.players[0].name, "张三");
}

#[test]
fn ideographic_ordinal_marker_is_accepted() {
    let roster = parse_roster("1、张三\n2、李四", SquadFormat::FiveASide);
    let names: Vec<&str> = roster.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["张三", "李四"]);
}
