use battleship_tournament::{Board, Coordinate, Game, GuessResult, Orientation};

fn two_cell_board() -> Board {
    let mut board = Board::new(10);
    board
        .place_ship(Coordinate::new(0, 0), 2, Orientation::Vertical)
        .unwrap();
    board
}

#[test]
fn end_to_end_two_cell_fleets() {
    let mut game = Game::new(two_cell_board(), two_cell_board());
    assert_eq!(game.current_turn(), 0);

    assert_eq!(game.attack(0, Coordinate::new(0, 0)), GuessResult::Hit);
    assert_eq!(game.current_turn(), 1);

    assert_eq!(game.attack(1, Coordinate::new(0, 0)), GuessResult::Hit);
    assert_eq!(game.current_turn(), 0);

    assert_eq!(game.attack(0, Coordinate::new(0, 0)), GuessResult::Guessed);
    assert_eq!(game.current_turn(), 0);
    assert_eq!(game.check_winner(), None);

    assert_eq!(game.attack(0, Coordinate::new(1, 0)), GuessResult::Hit);
    assert_eq!(game.check_winner(), Some(0));
    // Stays settled once decided.
    assert_eq!(game.check_winner(), Some(0));
    assert!(game.board(1).all_ships_sunk());
    assert!(!game.board(0).all_ships_sunk());
}

#[test]
fn guessed_keeps_the_turn_with_the_attacker() {
    let mut game = Game::new(two_cell_board(), two_cell_board());
    assert_eq!(game.attack(0, Coordinate::new(5, 5)), GuessResult::Miss);
    assert_eq!(game.attack(1, Coordinate::new(0, 0)), GuessResult::Hit);
    assert_eq!(game.current_turn(), 0);
    assert_eq!(game.attack(0, Coordinate::new(3, 3)), GuessResult::Miss);
    assert_eq!(game.current_turn(), 1);

    assert_eq!(game.attack(1, Coordinate::new(0, 0)), GuessResult::Guessed);
    assert_eq!(game.current_turn(), 1);
}

#[test]
fn player_one_wins_by_sinking_board_zero() {
    let mut game = Game::new(two_cell_board(), two_cell_board());
    game.attack(1, Coordinate::new(0, 0));
    game.attack(1, Coordinate::new(1, 0));
    assert_eq!(game.check_winner(), Some(1));
}

#[test]
fn both_fleets_sunk_reports_player_zero() {
    let game = Game::new(Board::new(3), Board::new(3));
    assert_eq!(game.check_winner(), Some(0));
}

#[test]
#[should_panic]
fn attacking_as_a_third_player_panics() {
    let mut game = Game::new(two_cell_board(), two_cell_board());
    game.attack(2, Coordinate::new(0, 0));
}

#[test]
fn display_shows_both_boards_and_turn() {
    let mut left = Board::new(2);
    left.place_ship(Coordinate::new(0, 0), 1, Orientation::Horizontal);
    let right = Board::new(2);
    let mut game = Game::new(left, right);
    game.attack(1, Coordinate::new(0, 0));

    let dump = game.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert!(lines[0].starts_with("Player 0's Board"));
    assert!(lines[0].ends_with("| Player 1's Board"));
    assert_eq!(lines[1], format!("{}+{}", "-".repeat(25), "-".repeat(25)));
    assert_eq!(lines[2], format!("{:<25} |   0 1", "  0 1"));
    assert_eq!(lines[3], format!("{:<25} | 0 . .", "0 H ."));
    assert!(dump.ends_with("Current turn: Player 0"));
}
