//! Session integration tests: confirmed moves, robots, snapshots.

use rust_board::board::{Location, Phase};
use rust_board::core::{EngineError, PlayerId};
use rust_board::games::{Breakthrough, Gobblet};
use rust_board::mcts::UctConfig;
use rust_board::moves::{Move, MoveOp};
use rust_board::rules::GameResult;
use rust_board::search::{AlphaBetaConfig, SearchStrategy};
use rust_board::session::Session;

fn p(n: u8) -> PlayerId {
    PlayerId::new(n)
}

#[test]
fn test_robots_play_a_game_to_the_end() {
    let mut session = Session::new(Breakthrough::new(5, 5))
        .with_strategy(SearchStrategy::AlphaBeta(AlphaBetaConfig::default().with_depth(2)));

    let mut turns = 0;
    while session.board().phase != Phase::GameOver {
        let mover = session.board().turn;
        let mv = session.play_robot_move().unwrap().unwrap();
        assert_eq!(mv.player, mover);
        turns += 1;
        assert!(turns < 200, "game did not finish");
    }

    assert!(session.board().result().is_some());
    assert_eq!(session.play_robot_move().unwrap(), None);
    assert!(session.legal_moves().is_empty());
}

#[test]
fn test_uct_robot_against_alpha_beta() {
    let mut session = Session::new(Gobblet::new());
    let uct = SearchStrategy::Uct(UctConfig::default().with_iterations(300));
    let ab = SearchStrategy::AlphaBeta(AlphaBetaConfig::default().with_depth(2));

    for _ in 0..30 {
        if session.board().phase == Phase::GameOver {
            break;
        }
        let strategy = if session.board().turn == p(0) { &uct } else { &ab };
        session.set_strategy(strategy.clone());
        session.play_robot_move().unwrap();
    }
    // Every confirmed move left a history entry with the digest after it.
    let last = session.history().back().unwrap();
    assert_eq!(last.digest, session.digest());
}

#[test]
fn test_text_protocol() {
    let mut session = Session::for_variant("gobblet").unwrap();

    session.apply_text("pick 0 pool 0 2").unwrap();
    assert!(session
        .legal_moves()
        .contains(&"drop 0 b 2".parse::<Move>().unwrap()));
    session.apply_text("drop 0 b 2").unwrap();
    assert_eq!(session.board().phase, Phase::Confirm);
    session.apply_text("done 0").unwrap();
    assert_eq!(session.board().turn, p(1));

    assert!(matches!(
        session.apply_text("jump 1 a 1"),
        Err(EngineError::Parse { .. })
    ));
    // Blue cannot cover orange's large piece.
    assert!(session
        .apply_text("move 1 pool 1 1 b 2")
        .unwrap_err()
        .is_rejection());
}

#[test]
fn test_resign_ends_the_game() {
    let mut session = Session::new(Breakthrough::new(5, 5));
    session.apply_text("resign 0").unwrap();
    assert_eq!(session.board().phase, Phase::Resign);
    assert_eq!(
        session.legal_moves(),
        vec![Move::done(p(0)), Move::resign(p(0))]
    );
    session.apply_text("done 0").unwrap();
    assert_eq!(session.board().result(), Some(GameResult::Winner(p(1))));
}

#[test]
fn test_edit_then_start() {
    let mut session = Session::new(Breakthrough::new(5, 5));
    session.apply_text("edit 0").unwrap();
    assert_eq!(session.board().phase, Phase::Puzzle);
    assert!(session.legal_moves().is_empty());

    // Move a white pawn next to the far row, then hand the move to white.
    session.apply_text("pick 0 a 2").unwrap();
    session.apply_text("drop 0 a 3").unwrap();
    session.apply_text("start 0").unwrap();
    assert_eq!(session.board().phase, Phase::Play);
    assert_eq!(session.repetition_count(), 1);
    assert!(session
        .legal_moves()
        .iter()
        .any(|m| m.from == Some(Location::cell(0, 2))));

    let ops: Vec<MoveOp> = session.history().iter().map(|h| h.mv.op).collect();
    assert_eq!(
        ops,
        vec![MoveOp::Edit, MoveOp::Pick, MoveOp::Drop, MoveOp::Start]
    );
}

#[test]
fn test_snapshot_mid_turn_resumes_identically() {
    let mut session = Session::new(Gobblet::new());
    session.apply_text("move 0 pool 0 1 b 2").unwrap();
    let bytes = session.snapshot().unwrap();

    let mut resumed = Session::for_variant("gobblet").unwrap();
    resumed.restore(&bytes).unwrap();
    assert_eq!(resumed.board().phase, Phase::Confirm);
    assert_eq!(resumed.legal_moves(), session.legal_moves());

    session.apply_text("done 0").unwrap();
    resumed.apply_text("done 0").unwrap();
    assert_eq!(resumed.digest(), session.digest());
}
