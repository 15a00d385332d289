//! Task file persistence tests.

use cadence_core::SongId;
use cadence_generation::{GeneratedTrack, GenerationError, Task, TaskFile, TaskState};
use tempfile::TempDir;

fn track() -> GeneratedTrack {
    GeneratedTrack {
        url: "https://cdn.test/clip.mp3".to_string(),
        duration: 200.5,
        image_url: "https://cdn.test/clip.jpeg".to_string(),
    }
}

fn task_file(dir: &TempDir) -> TaskFile {
    TaskFile::new(dir.path().join("tasks.json"))
}

#[tokio::test]
async fn missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);

    assert!(file.load().await.unwrap().is_empty());
    assert!(file.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_pending_accumulates() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);

    file.append_pending("t1", &SongId::new("s1")).await.unwrap();
    file.append_pending("t2", &SongId::new("s2")).await.unwrap();

    let tasks = file.load().await.unwrap();
    assert_eq!(
        tasks,
        vec![
            Task::pending("t1", SongId::new("s1")),
            Task::pending("t2", SongId::new("s2")),
        ]
    );
}

#[tokio::test]
async fn file_is_pretty_printed_json() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);

    file.append_pending("t1", &SongId::new("s1")).await.unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"id\": \"t1\""));
    assert!(raw.contains("\"songId\": \"s1\""));
    assert!(!dir.path().join("tasks.json.tmp").exists());
}

#[tokio::test]
async fn mark_success_replaces_in_place() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    let first = file.append_pending("t1", &SongId::new("s1")).await.unwrap();
    file.append_pending("t2", &SongId::new("s2")).await.unwrap();

    let finished = file.mark_success(&first, track()).await.unwrap();

    let tasks = file.load().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], finished);
    assert_eq!(tasks[0].song_id, SongId::new("s1"));
    assert_eq!(tasks[0].state, TaskState::Success { data: track() });

    let pending = file.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "t2");
}

#[tokio::test]
async fn mark_success_keeps_entries_added_meanwhile() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    let task = file.append_pending("t1", &SongId::new("s1")).await.unwrap();

    // A producer appends while the poller is waiting on the API
    let producer_view = TaskFile::new(file.path());
    producer_view
        .append_pending("t2", &SongId::new("s2"))
        .await
        .unwrap();

    file.mark_success(&task, track()).await.unwrap();

    let ids: Vec<String> = file.load().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
}

#[tokio::test]
async fn mark_success_appends_vanished_task() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    let task = Task::pending("gone", SongId::new("s9"));

    file.mark_success(&task, track()).await.unwrap();

    let tasks = file.load().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].is_pending());
}

#[tokio::test]
async fn malformed_file_is_an_error_and_untouched() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    std::fs::write(file.path(), r#"[{"id": "t1"}]"#).unwrap();

    let result = file.append_pending("t2", &SongId::new("s2")).await;

    assert!(matches!(result, Err(GenerationError::MalformedTaskFile { .. })));
    assert_eq!(
        std::fs::read_to_string(file.path()).unwrap(),
        r#"[{"id": "t1"}]"#
    );
}

#[tokio::test]
async fn invalid_record_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    std::fs::write(
        file.path(),
        r#"[{"id": "t1", "songId": "s1", "state": {"state": "success", "data": {"url": "not a url", "duration": 1, "imageUrl": "https://cdn.test/x.jpeg"}}}]"#,
    )
    .unwrap();

    let result = file.load().await;
    assert!(matches!(result, Err(GenerationError::InvalidTask(_))));
}

#[tokio::test]
async fn reads_files_written_by_hand() {
    let dir = TempDir::new().unwrap();
    let file = task_file(&dir);
    std::fs::write(
        file.path(),
        r#"[
  {"id": "a", "songId": "s1", "state": {"state": "pending"}},
  {"id": "b", "songId": "s2", "state": {"state": "success", "data": {"url": "https://cdn.test/b.mp3", "duration": 99, "imageUrl": "https://cdn.test/b.jpeg"}}}
]"#,
    )
    .unwrap();

    let tasks = file.load().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0].is_pending());
    match &tasks[1].state {
        TaskState::Success { data } => assert_eq!(data.duration, 99.0),
        TaskState::Pending => panic!("Expected success state"),
    }
}
