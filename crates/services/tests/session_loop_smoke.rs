mod support;

use std::sync::Arc;

use quiz_core::time::fixed_clock;
use services::{QuizService, SessionEnd, Shell};
use storage::repository::{QuizRepository, Storage};

use support::{Event, ScriptedIo, shell_with};

#[tokio::test]
async fn session_greets_serves_and_quits() {
    let (shell, _) = shell_with(&[("Capital of Italy", "Rome")]).await;
    let mut session = shell.session(ScriptedIo::new(["list", "", "bogus", "quit", "list"]));

    let end = session.run().await.unwrap();

    assert_eq!(end, SessionEnd::Quit);
    let io = session.into_io();
    assert_eq!(io.events[0], Event::Banner("Quiz".to_owned()));
    assert_eq!(
        io.lines(),
        vec![
            "[1]: Capital of Italy",
            "Error: Unknown command: 'bogus'",
            "Use help to see all available commands.",
        ]
    );
    assert_eq!(io.prompts().len(), 4);
    assert!(io.prompts().iter().all(|(p, _)| p == "quiz > "));
    assert_eq!(io.events.last(), Some(&Event::Closed));
    assert_eq!(io.unread(), 1);
}

#[tokio::test]
async fn end_of_input_disconnects() {
    let (shell, _) = shell_with(&[]).await;
    let mut session = shell.session(ScriptedIo::new(["help"]));

    assert_eq!(session.run().await.unwrap(), SessionEnd::Disconnected);
}

#[tokio::test]
async fn disconnect_mid_add_stores_nothing() {
    let (shell, repo) = shell_with(&[]).await;
    let mut session = shell.session(ScriptedIo::new(["add", "Capital of Spain"]));

    assert_eq!(session.run().await.unwrap(), SessionEnd::Disconnected);
    assert_eq!(repo.count_quizzes().await.unwrap(), 0);
}

#[tokio::test]
async fn sessions_share_one_store() {
    let (shell, _) = shell_with(&[]).await;
    let mut writer = shell.session(ScriptedIo::new(["add", "2+2", "4", "q"]));
    let mut reader = shell.session(ScriptedIo::new(["show 1", "q"]));

    assert_eq!(writer.run().await.unwrap(), SessionEnd::Quit);
    assert_eq!(reader.run().await.unwrap(), SessionEnd::Quit);

    assert_ne!(writer.id(), reader.id());
    assert_eq!(reader.io().lines(), vec!["[1]: 2+2 => 4"]);
}

#[tokio::test]
async fn sqlite_backed_session_add_edit_delete() {
    let storage = Storage::sqlite("sqlite:file:memdb_session_smoke?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let service = QuizService::new(fixed_clock(), Arc::clone(&storage.quizzes));
    let shell = Shell::new(service).with_seed(Some(9));

    let mut session = shell.session(ScriptedIo::new([
        "add",
        "What is Rust?",
        "A language",
        "edit 1",
        "What is Rust?",
        "A systems language",
        "test 1",
        "a SYSTEMS language",
        "delete 1",
        "list",
        "quit",
    ]));

    assert_eq!(session.run().await.unwrap(), SessionEnd::Quit);
    let io = session.into_io();
    assert_eq!(
        io.lines(),
        vec![
            "Added: What is Rust? => A language",
            "Quiz 1 changed to: What is Rust? => A systems language",
            "[1]: What is Rust?",
            "Your answer is correct.",
        ]
    );
    assert_eq!(io.banners(), vec!["Quiz", "Correct"]);
    assert_eq!(storage.quizzes.count_quizzes().await.unwrap(), 0);
}
