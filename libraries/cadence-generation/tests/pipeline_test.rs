//! Producer and poller against a mock generation API.

use cadence_core::SongId;
use cadence_generation::{
    ClientConfig, GenerationClient, PollSummary, Poller, Producer, TaskFile, TaskState,
};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GenerationClient {
    GenerationClient::new(ClientConfig::new(server.uri(), "key")).unwrap()
}

#[tokio::test]
async fn produce_then_poll_until_ready() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let tasks = TaskFile::new(dir.path().join("tasks.json"));

    Mock::given(method("POST"))
        .and(path("/api/v1/generate"))
        .and(body_partial_json(json!({"style": "Ambient", "instrumental": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"taskId": "job-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let producer = Producer::new(client(&server), tasks.clone());
    let task = producer
        .generate(&SongId::new("song-7"), "Ambient", None)
        .await
        .unwrap();
    assert_eq!(task.id, "job-1");
    assert_eq!(tasks.pending().await.unwrap().len(), 1);

    // First lookup: still rendering
    Mock::given(method("GET"))
        .and(path("/api/v1/generate/record-info"))
        .and(query_param("taskId", "job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status": "GENERATING", "response": {"sunoData": []}}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let poller = Poller::new(client(&server), tasks.clone()).with_check_delay(Duration::ZERO);
    let summary = poller.poll_once().await.unwrap();
    assert_eq!(
        summary,
        PollSummary {
            checked: 1,
            resolved: 0,
            still_pending: 1,
        }
    );

    // Second lookup: done
    Mock::given(method("GET"))
        .and(path("/api/v1/generate/record-info"))
        .and(query_param("taskId", "job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status": "SUCCESS", "response": {"sunoData": [{
                "audioUrl": "https://cdn.test/job-1.mp3",
                "imageUrl": "https://cdn.test/job-1.jpeg",
                "duration": 240
            }]}}
        })))
        .mount(&server)
        .await;

    let summary = poller.poll_once().await.unwrap();
    assert_eq!(summary.resolved, 1);

    let stored = tasks.load().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].song_id, SongId::new("song-7"));
    match &stored[0].state {
        TaskState::Success { data } => {
            assert_eq!(data.url, "https://cdn.test/job-1.mp3");
            assert_eq!(data.duration, 240.0);
        }
        TaskState::Pending => panic!("Expected success state"),
    }
}

#[tokio::test]
async fn failing_lookups_leave_tasks_pending() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let tasks = TaskFile::new(dir.path().join("tasks.json"));
    tasks.append_pending("job-1", &SongId::new("s1")).await.unwrap();
    tasks.append_pending("job-2", &SongId::new("s2")).await.unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(2)
        .mount(&server)
        .await;

    let poller = Poller::new(client(&server), tasks.clone()).with_check_delay(Duration::ZERO);
    let summary = poller.poll_once().await.unwrap();

    assert_eq!(summary.still_pending, 2);
    assert_eq!(tasks.pending().await.unwrap().len(), 2);
}
