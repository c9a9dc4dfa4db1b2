//! End-to-end command scenarios against the engine and the session runner.

use std::io::Cursor;
use undofs::collections::{BoundedStack, Set};
use undofs::config::EngineConfig;
use undofs::namespace::{Command, NamespaceEngine};
use undofs::script::{Mode, Script};
use undofs::tooling::session::{OutputFormat, OutputLine, Session};

fn small_engine(history: usize) -> NamespaceEngine {
    NamespaceEngine::with_table_capacity(history, 12301).unwrap()
}

fn apply_all(engine: &mut NamespaceEngine, lines: &[&str]) -> Vec<Result<(), String>> {
    lines
        .iter()
        .map(|line| {
            let command: Command = line.parse().map_err(|e: undofs::error::CommandError| e.to_string())?;
            engine.apply(&command).map_err(|e| e.to_string())
        })
        .collect()
}

#[test]
fn capacity_two_undo_after_eviction() {
    let mut engine = small_engine(2);

    engine.apply(&Command::New("a".to_string())).unwrap();
    assert_eq!(engine.list(), vec!["a"]);

    engine.apply(&Command::New("b".to_string())).unwrap();
    let mut entries = engine.list();
    entries.sort();
    assert_eq!(entries, vec!["a", "b"]);
    // The seeded empty snapshot was evicted: [{a,b}, {a}]
    assert_eq!(engine.history_depth(), 2);
    assert_eq!(engine.evictions(), 1);

    engine.apply(&Command::Undo(None)).unwrap();
    assert_eq!(engine.list(), vec!["a"]);
}

#[test]
fn undo_beyond_live_history_is_rejected() {
    let mut engine = small_engine(4);
    engine.create("x");
    assert_eq!(engine.history_depth(), 2);

    let err = engine.apply(&Command::Undo(Some(5))).unwrap_err();
    assert_eq!(err.to_string(), "ERROR: cannot execute UNDO 5");
    assert_eq!(engine.list(), vec!["x"]);
    assert_eq!(engine.history_depth(), 2);
}

#[test]
fn path_and_file_aliases_conflict_in_both_orders() {
    let mut engine = small_engine(8);
    let results = apply_all(&mut engine, &["NEW /a/", "NEW /a", "NEW /b", "NEW /b/"]);
    assert_eq!(
        results,
        vec![
            Ok(()),
            Err("ERROR: cannot execute NEW /a".to_string()),
            Ok(()),
            Err("ERROR: cannot execute NEW /b/".to_string()),
        ]
    );
    let mut entries = engine.list();
    entries.sort();
    assert_eq!(entries, vec!["/a/", "/b"]);
}

#[test]
fn rejected_commands_leave_history_depth_untouched() {
    let mut engine = small_engine(3);
    engine.create("a");
    let depth = engine.history_depth();

    let results = apply_all(&mut engine, &["NEW a", "REMOVE b", "UNDO 3", "BOGUS"]);
    assert!(results.iter().all(|r| r.is_err()));
    assert_eq!(engine.history_depth(), depth);
    assert_eq!(engine.list(), vec!["a"]);
}

#[test]
fn remove_then_undo_restores_entry() {
    let mut engine = small_engine(5);
    apply_all(&mut engine, &["NEW docs/", "NEW readme", "REMOVE docs/"]);
    assert_eq!(engine.list(), vec!["readme"]);

    engine.undo(1);
    let mut entries = engine.list();
    entries.sort();
    assert_eq!(entries, vec!["docs/", "readme"]);
}

#[test]
fn snapshots_on_history_are_not_aliased() {
    let mut engine = small_engine(5);
    engine.create("a");
    let before = engine.current().unwrap().clone();

    engine.create("b");
    engine.delete("a");

    assert!(before.contains("a"));
    assert!(!before.contains("b"));
    assert_eq!(before.len(), 1);

    engine.undo(2);
    assert_eq!(engine.current().unwrap().len(), 1);
    assert!(engine.current().unwrap().contains("a"));
}

#[test]
fn history_capacity_one_keeps_only_latest() {
    let mut engine = small_engine(1);
    engine.create("a");
    engine.create("b");
    assert_eq!(engine.history_depth(), 1);
    assert_eq!(engine.history_capacity(), 1);

    // Undoing the only snapshot falls back to the empty namespace.
    assert!(engine.undo(1));
    assert!(engine.list().is_empty());
}

#[test]
fn session_transcript_matches_expected_lines() {
    let input = "8 3\nNEW a\nNEW a\nNEW d/\nREMOVE a\nUNDO 2\nLIST\nUNDO 4\nLIST\n";
    let script = Script::read(Cursor::new(input), Mode::History).unwrap();
    let config = EngineConfig {
        table_capacity: 12301,
        ..EngineConfig::default()
    };
    let report = Session::new(config).run(Mode::History, &script).unwrap();

    let text: Vec<String> = report.lines.iter().map(OutputLine::to_text).collect();
    assert_eq!(text[0], "a");
    assert_eq!(text[1], "ERROR: cannot execute NEW a");
    let mut third: Vec<&str> = text[2].split(' ').collect();
    third.sort();
    assert_eq!(third, vec!["a", "d/"]);
    assert_eq!(text[3], "d/");
    assert_eq!(text[4], "a");
    assert_eq!(text[5], "ERROR: cannot execute UNDO 4");
    assert_eq!(text[6], "a");
    assert_eq!(text.len(), 7);

    assert_eq!(report.summary.commands, 8);
    assert_eq!(report.summary.rejected, 2);
    assert_eq!(report.render(OutputFormat::Text).unwrap().lines().count(), 7);
}

#[test]
fn stack_trait_is_usable_generically() {
    fn depth<S: BoundedStack<u32>>(stack: &S) -> usize {
        stack.len()
    }
    let mut stack = undofs::collections::BoundedHistoryStack::new(2).unwrap();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(depth(&stack), 2);
}
