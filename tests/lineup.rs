use fc_terminal::api_client::Registration;
use fc_terminal::lineup::{LineupBoard, Selection, TapOutcome};

fn reg(player_id: i64, name: &str, index: Option<usize>, is_starter: bool) -> Registration {
    Registration {
        player_id,
        player_name: Some(name.to_string()),
        name: None,
        preferred_position: Some("MF".to_string()),
        rating: Some(80),
        position_index: index,
        is_starter,
    }
}

fn five_a_side() -> LineupBoard {
    LineupBoard::from_registrations(
        &[
            reg(1, "张三", Some(0), true),
            reg(2, "李四", Some(1), true),
            reg(3, "王五", Some(2), true),
            reg(4, "赵六", None, false),
            reg(5, "钱七", None, false),
        ],
        5,
        true,
    )
}

#[test]
fn starters_land_on_their_slots_and_the_rest_sit_out() {
    let board = five_a_side();
    assert_eq!(board.slot(0).map(|p| p.id), Some(1));
    assert_eq!(board.slot(1).map(|p| p.id), Some(2));
    assert_eq!(board.slot(2).map(|p| p.id), Some(3));
    assert!(board.slot(3).is_none());
    assert!(board.slot(4).is_none());
    assert_eq!(board.bench().len(), 2);
}

#[test]
fn starter_without_an_index_takes_the_first_open_slot() {
    let board = LineupBoard::from_registrations(
        &[
            reg(1, "张三", Some(1), true),
            reg(2, "李四", None, true),
        ],
        5,
        true,
    );
    assert_eq!(board.slot(0).map(|p| p.id), Some(2));
    assert_eq!(board.slot(1).map(|p| p.id), Some(1));
}

#[test]
fn out_of_range_index_falls_back_to_an_open_slot() {
    let board = LineupBoard::from_registrations(&[reg(1, "张三", Some(99), true)], 5, true);
    assert_eq!(board.slot(0).map(|p| p.id), Some(1));
}

#[test]
fn overflow_starters_spill_onto_the_bench() {
    let regs: Vec<Registration> = (0..7)
        .map(|i| reg(i + 1, "队员", Some(i as usize), true))
        .collect();
    let board = LineupBoard::from_registrations(&regs, 5, true);
    assert_eq!(board.bench().len(), 2);
    assert_eq!(board.player_ids(), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn lineup_swap_exchanges_two_slots() {
    let mut board = five_a_side();
    assert_eq!(board.tap_lineup(0), TapOutcome::Selected);
    assert_eq!(board.tap_lineup(2), TapOutcome::Swapped);
    assert_eq!(board.slot(0).map(|p| p.id), Some(3));
    assert_eq!(board.slot(2).map(|p| p.id), Some(1));
    assert_eq!(board.selection(), Selection::Idle);
    assert!(board.is_dirty());
}

#[test]
fn lineup_to_empty_slot_is_a_move() {
    let mut board = five_a_side();
    board.tap_lineup(0);
    assert_eq!(board.tap_lineup(4), TapOutcome::Swapped);
    assert!(board.slot(0).is_none());
    assert_eq!(board.slot(4).map(|p| p.id), Some(1));
}

#[test]
fn bench_player_replaces_a_starter() {
    let mut board = five_a_side();
    assert_eq!(board.tap_bench(0), TapOutcome::Selected);
    assert_eq!(board.tap_lineup(1), TapOutcome::Swapped);
    assert_eq!(board.slot(1).map(|p| p.id), Some(4));
    // The outgoing starter takes the bench seat.
    assert_eq!(board.bench()[0].id, 2);
}

#[test]
fn bench_player_fills_an_empty_slot_and_leaves_the_bench() {
    let mut board = five_a_side();
    board.tap_bench(1);
    assert_eq!(board.tap_lineup(3), TapOutcome::Swapped);
    assert_eq!(board.slot(3).map(|p| p.id), Some(5));
    assert_eq!(board.bench().len(), 1);
}

#[test]
fn starter_moves_to_the_bench() {
    let mut board = five_a_side();
    board.tap_lineup(0);
    assert_eq!(board.tap_bench(0), TapOutcome::Swapped);
    assert_eq!(board.slot(0).map(|p| p.id), Some(4));
    assert_eq!(board.bench()[0].id, 1);
}

#[test]
fn tapping_the_selected_bench_entry_clears_the_selection() {
    let mut board = five_a_side();
    board.tap_bench(0);
    assert_eq!(board.tap_bench(0), TapOutcome::Cleared);
    assert_eq!(board.selection(), Selection::Idle);
    assert!(!board.is_dirty());
}

#[test]
fn empty_slot_cannot_be_selected() {
    let mut board = five_a_side();
    assert_eq!(board.tap_lineup(4), TapOutcome::Ignored);
    assert_eq!(board.selection(), Selection::Idle);
}

#[test]
fn player_multiset_is_invariant_under_tap_sequences() {
    let mut board = five_a_side();
    let before = board.player_ids();

    board.tap_lineup(0);
    board.tap_lineup(3);
    board.tap_bench(0);
    board.tap_lineup(2);
    board.tap_lineup(1);
    board.tap_bench(0);
    board.tap_bench(1);
    board.tap_bench(0);

    assert_eq!(board.player_ids(), before);
}

#[test]
fn read_only_board_only_flips_cards() {
    let mut board = LineupBoard::from_registrations(
        &[reg(1, "张三", Some(0), true), reg(2, "李四", None, false)],
        5,
        false,
    );
    assert_eq!(board.tap_lineup(0), TapOutcome::Flipped);
    assert!(board.is_flipped(0));
    assert_eq!(board.selection(), Selection::Idle);

    assert_eq!(board.tap_lineup(0), TapOutcome::Flipped);
    assert!(!board.is_flipped(0));

    assert_eq!(board.tap_bench(0), TapOutcome::Ignored);
    assert!(!board.is_dirty());
}

#[test]
fn import_payload_mirrors_the_board() {
    let mut board = five_a_side();
    board.tap_lineup(0);
    board.tap_bench(0);

    let payload = board.import_payload();
    assert_eq!(payload.len(), 5);
    let starters: Vec<(usize, &str)> = payload
        .iter()
        .filter(|p| p.is_starter)
        .map(|p| (p.position_index.expect("starter has an index"), p.name.as_str()))
        .collect();
    assert_eq!(starters, [(0, "赵六"), (1, "李四"), (2, "王五")]);
    assert!(payload
        .iter()
        .filter(|p| !p.is_starter)
        .all(|p| p.position_index.is_none()));
}
