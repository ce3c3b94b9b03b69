use fc_terminal::rating::{
    adjust_stat, display_rating, evaluate_mvp, rating, PlayerStat, StatField, Stats,
};

fn stat(player_id: i64, name: &str) -> PlayerStat {
    PlayerStat::baseline(player_id, name)
}

#[test]
fn blank_stat_line_scores_the_baseline() {
    assert_eq!(rating(Stats::default()), 6.0);
}

#[test]
fn positive_and_negative_contributions() {
    let two_goals = Stats {
        goals: 2,
        ..Stats::default()
    };
    assert_eq!(rating(two_goals), 8.0);

    let red_card = Stats {
        red_cards: 1,
        ..Stats::default()
    };
    assert_eq!(rating(red_card), 4.5);

    let mixed = Stats {
        goals: 1,
        assists: 1,
        yellow_cards: 1,
        ..Stats::default()
    };
    assert_eq!(rating(mixed), 7.0);
}

#[test]
fn rating_clamps_to_the_one_to_ten_band() {
    let hat_tricks = Stats {
        goals: 9,
        ..Stats::default()
    };
    assert_eq!(rating(hat_tricks), 10.0);

    let disaster = Stats {
        red_cards: 4,
        ..Stats::default()
    };
    assert_eq!(rating(disaster), 1.0);
}

#[test]
fn display_rating_maps_to_badge_scale() {
    assert_eq!(display_rating(6.0), 85);
    assert_eq!(display_rating(10.0), 100);
    assert_eq!(display_rating(1.0), 66);
}

#[test]
fn mvp_goes_to_the_top_rated_contributor() {
    let mut stats = vec![stat(1, "张三"), stat(2, "李四"), stat(3, "王五")];
    stats[0].goals = 2;
    stats[1].assists = 1;
    stats[2].interceptions = 3;
    evaluate_mvp(&mut stats);

    assert!(stats[0].is_mvp);
    assert!(!stats[1].is_mvp);
    assert!(!stats[2].is_mvp);
}

#[test]
fn all_top_ties_are_flagged() {
    let mut stats = vec![stat(1, "张三"), stat(2, "李四")];
    stats[0].goals = 1;
    stats[1].assists = 2;
    evaluate_mvp(&mut stats);

    assert_eq!(stats[0].rating, 7.0);
    assert_eq!(stats[1].rating, 7.0);
    assert!(stats[0].is_mvp);
    assert!(stats[1].is_mvp);
}

#[test]
fn card_only_and_blank_lines_never_take_mvp() {
    // Everyone idle except one yellow card: nobody qualifies.
    let mut stats = vec![stat(1, "张三"), stat(2, "李四")];
    stats[1].yellow_cards = 1;
    evaluate_mvp(&mut stats);
    assert!(stats.iter().all(|s| !s.is_mvp));

    // A qualifying player wins even with a lower rating than the baseline
    // of an idle teammate.
    let mut stats = vec![stat(1, "张三"), stat(2, "李四")];
    stats[0].goals = 1;
    stats[0].red_cards = 1;
    evaluate_mvp(&mut stats);
    assert_eq!(stats[0].rating, 5.5);
    assert!(stats[0].is_mvp);
    assert!(!stats[1].is_mvp);
}

#[test]
fn adjustments_floor_at_zero_and_reevaluate() {
    let mut stats = vec![stat(1, "张三"), stat(2, "李四")];
    adjust_stat(&mut stats, 0, StatField::Goals, 1);
    assert_eq!(stats[0].goals, 1);
    assert!(stats[0].is_mvp);

    adjust_stat(&mut stats, 0, StatField::Goals, -1);
    adjust_stat(&mut stats, 0, StatField::Goals, -1);
    assert_eq!(stats[0].goals, 0);
    assert!(!stats[0].is_mvp);

    // Out-of-range index is a no-op.
    adjust_stat(&mut stats, 9, StatField::Assists, 1);
    assert!(stats.iter().all(|s| s.assists == 0));
}

#[test]
fn wire_form_uses_camel_case_and_is_mvp() {
    let mut row = stat(7, "张三");
    row.goals = 1;
    row.yellow_cards = 2;
    evaluate_mvp(std::slice::from_mut(&mut row));

    let value = serde_json::to_value(&row).expect("stat row should serialize");
    assert_eq!(value["playerId"], 7);
    assert_eq!(value["playerName"], "张三");
    assert_eq!(value["yellowCards"], 2);
    assert_eq!(value["isMVP"], true);
}
