//! Tests for the typestate game lifecycle.

use tictactoe_engine::{
    Board, GameInProgress, GameResult, GameSetup, Move, MoveError, Outcome, Player, Position,
    Square,
};

#[test]
fn test_typestate_lifecycle() {
    // Setup phase
    let game = GameSetup::new();

    // Start game
    let game = game.start(Player::X);
    assert_eq!(game.to_move(), Player::X);

    // Make a move
    let action = Move::new(Player::X, Position::Center);
    let result = game.make_move(action).expect("Valid move");

    let game = match result {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Game shouldn't finish after one move"),
    };

    assert_eq!(game.to_move(), Player::O);
}

#[test]
fn test_occupied_square_rejected() {
    let game = GameSetup::new().start(Player::X);

    let result = game.make_move(Move::new(Player::X, Position::Center));
    let game = match result.unwrap() {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Unexpected finish"),
    };

    let result = game.make_move(Move::new(Player::O, Position::Center));
    assert!(matches!(result, Err(MoveError::SquareOccupied(_))));
}

#[test]
fn test_wrong_player_rejected() {
    let game = GameSetup::new().start(Player::X);

    let result = game.make_move(Move::new(Player::O, Position::Center));
    assert!(matches!(result, Err(MoveError::WrongPlayer(Player::O))));
}

#[test]
fn test_either_mark_can_open() {
    let game = GameSetup::new().start(Player::O);
    assert_eq!(game.to_move(), Player::O);

    let result = game.make_move(Move::new(Player::O, Position::TopLeft));
    let game = match result.unwrap() {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Unexpected finish"),
    };

    assert_eq!(game.to_move(), Player::X);
}

#[test]
fn test_replay_from_moves() {
    let moves = vec![
        Move::new(Player::X, Position::Center),
        Move::new(Player::O, Position::TopLeft),
        Move::new(Player::X, Position::BottomRight),
        Move::new(Player::O, Position::TopRight),
        Move::new(Player::X, Position::BottomLeft),
    ];

    let result = GameInProgress::replay(&moves).expect("Valid replay");

    match result {
        GameResult::InProgress(game) => {
            assert_eq!(game.to_move(), Player::O);
            assert_eq!(game.valid_moves().len(), 4);
        }
        GameResult::Finished(_) => panic!("Game shouldn't finish"),
    }
}

#[test]
fn test_win_detection() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::TopRight), // X wins top row
    ];

    let result = GameInProgress::replay(&moves).expect("Valid replay");

    match result {
        GameResult::Finished(game) => {
            assert_eq!(game.outcome(), Outcome::Winner(Player::X));
            assert_eq!(game.outcome().winner(), Some(Player::X));
        }
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_draw_detection() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopRight),
        Move::new(Player::O, Position::TopCenter),
        Move::new(Player::X, Position::MiddleLeft),
        Move::new(Player::O, Position::MiddleRight),
        Move::new(Player::X, Position::BottomCenter),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::BottomRight), // Draw
    ];

    let result = GameInProgress::replay(&moves).expect("Valid replay");

    match result {
        GameResult::Finished(game) => {
            assert!(game.outcome().is_draw());
        }
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_restart() {
    let moves = vec![
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::TopRight),
    ];

    let result = GameInProgress::replay(&moves).unwrap();

    if let GameResult::Finished(game) = result {
        let fresh = game.restart().start(Player::O);
        assert_eq!(fresh.to_move(), Player::O);
        assert_eq!(fresh.valid_moves().len(), 9);
    } else {
        panic!("Game should be finished");
    }
}

#[test]
fn test_domain_types_serialize() {
    let action = Move::new(Player::X, Position::Center);
    let json = serde_json::to_string(&action).expect("serialize move");
    let back: Move = serde_json::from_str(&json).expect("deserialize move");
    assert_eq!(action, back);

    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::O));
    let json = serde_json::to_string(&board).expect("serialize board");
    let back: Board = serde_json::from_str(&json).expect("deserialize board");
    assert_eq!(board, back);
}
