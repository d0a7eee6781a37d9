//! Drives `UciEngine` against a scripted stand-in engine.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chess_core::agent::{Engine, EngineKind, UciEngine};
use chess_core::error::EngineError;
use chess_core::game_repr::STARTING_FEN;
use chess_core::EngineConfig;
use crossbeam_channel::{bounded, Receiver};
use once_cell::sync::Lazy;

const FAKE_ENGINE: &str = r#"#!/bin/sh
none=0
while read -r line; do
  case "$line" in
    uci) echo "id name fake"; echo "option name Hash type spin default 16"; echo "uciok" ;;
    isready) echo "readyok" ;;
    "position fen k7"*) none=1 ;;
    position*) none=0 ;;
    go*)
      echo "info depth 1 score cp 20"
      if [ "$none" = 1 ]; then echo "bestmove (none)"; else echo "bestmove e2e4 ponder e7e5"; fi
      ;;
    quit) exit 0 ;;
  esac
done
"#;

// Written once before any test spawns a process
static SCRIPT: Lazy<PathBuf> = Lazy::new(|| {
    let path = std::env::temp_dir().join(format!("fake-uci-{}.sh", std::process::id()));
    fs::write(&path, FAKE_ENGINE).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
});

fn started() -> UciEngine {
    let mut engine = UciEngine::new(SCRIPT.clone(), EngineConfig::default());
    engine.start().unwrap();
    engine
}

fn request(engine: &mut dyn Engine, min_delay: Duration) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    engine
        .get_best_moves(
            3,
            Box::new(move |mv| {
                let _ = tx.send(mv);
            }),
            min_delay,
        )
        .unwrap();
    rx
}

#[test]
fn test_best_move_round_trip() {
    let mut engine = started();
    engine.set_fen(STARTING_FEN).unwrap();
    let rx = request(&mut engine, Duration::ZERO);
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "e2e4");
    assert_eq!(engine.name(), "UCI");
}

#[test]
fn test_minimum_delay() {
    let mut engine = started();
    engine.set_fen(STARTING_FEN).unwrap();
    let started_at = Instant::now();
    let rx = request(&mut engine, Duration::from_millis(250));
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(started_at.elapsed() >= Duration::from_millis(250));
}

#[test]
fn test_no_move_means_no_callback() {
    let mut engine = started();
    engine.set_fen("k7/2Q5/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    let rx = request(&mut engine, Duration::ZERO);
    assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());
}

#[test]
fn test_searches_run_back_to_back() {
    let mut engine = started();
    engine.set_fen(STARTING_FEN).unwrap();
    let first = request(&mut engine, Duration::ZERO);
    let second = request(&mut engine, Duration::ZERO);
    assert_eq!(first.recv_timeout(Duration::from_secs(5)).unwrap(), "e2e4");
    assert_eq!(second.recv_timeout(Duration::from_secs(5)).unwrap(), "e2e4");
}

#[test]
fn test_stop_releases_the_process() {
    let mut engine = EngineKind::Uci(SCRIPT.clone()).create(&EngineConfig::default());
    engine.start().unwrap();
    engine.set_fen(STARTING_FEN).unwrap();
    let rx = request(engine.as_mut(), Duration::from_millis(300));
    engine.stop();
    assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
    assert!(matches!(
        engine.get_best_moves(1, Box::new(|_| {}), Duration::ZERO),
        Err(EngineError::NotStarted)
    ));
}

#[test]
fn test_engine_that_exits_fails_handshake() {
    Lazy::force(&SCRIPT);
    let mut engine = UciEngine::new(PathBuf::from("false"), EngineConfig::default());
    assert!(matches!(engine.start(), Err(EngineError::Process(_))));
}
