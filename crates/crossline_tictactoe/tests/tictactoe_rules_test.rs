//! Tests for positions, the game engine and win detection.

use crossline_tictactoe::{
    Board, Evaluation, Game, GameStatus, Move, MoveError, Player, Position, Square, evaluate,
};

fn play(game: &mut Game, cells: &[usize]) {
    for &cell in cells {
        let pos = Position::from_index(cell).expect("cell in range");
        game.place(Move::new(game.current_turn(), pos))
            .expect("legal move");
    }
}

#[test]
fn test_position_index_round_trip() {
    for (i, pos) in Position::ALL.iter().enumerate() {
        assert_eq!(pos.to_index(), i);
        assert_eq!(Position::from_index(i), Some(*pos));
    }
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_position_from_cell_rejects_out_of_range() {
    assert_eq!(Position::from_cell(-1), None);
    assert_eq!(Position::from_cell(9), None);
    assert_eq!(Position::from_cell(i64::MAX), None);
    assert_eq!(Position::from_cell(4), Some(Position::Center));
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::X));
    board.set(Position::Center, Square::Occupied(Player::O));

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_full_game_to_draw() {
    // X O X / X O O / O X X
    let mut game = Game::new();
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.status(), &GameStatus::Draw);
    assert_eq!(evaluate(game.board()), Evaluation::Draw);
    assert_eq!(game.history().len(), 9);
}

#[test]
fn test_o_can_win() {
    let mut game = Game::new();
    play(&mut game, &[0, 2, 1, 4, 8, 6]);
    assert_eq!(
        game.status(),
        &GameStatus::Won {
            winner: Player::O,
            line: [2, 4, 6]
        }
    );
}

#[test]
fn test_moves_after_draw_rejected() {
    let mut game = Game::new();
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    let result = game.place(Move::new(Player::O, Position::Center));
    assert_eq!(result, Err(MoveError::GameOver));
}

#[test]
fn test_turn_alternates_strictly() {
    let mut game = Game::new();
    let mut expected = Player::X;
    for cell in [4, 0, 8, 2, 1] {
        assert_eq!(game.current_turn(), expected);
        play(&mut game, &[cell]);
        expected = expected.opponent();
    }
}
