/*
[INPUT]:  Mock HTTP backend
[OUTPUT]: Test results for dashboards driven through the HTTP client
[POS]:    Integration tests - end-to-end over wiremock
[UPDATE]: When endpoint usage of the dashboards changes
*/

mod common;

use amdash_adapter::{AmdashClient, ClientConfig};
use amdash_dashboard::leaderboard::fetch_overall;
use amdash_dashboard::{MenteeDashboard, MissingPredecessor, TaskStatus};
use common::{MENTEE_EMAIL, mentee_session};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend() -> (MockServer, AmdashClient) {
    let server = MockServer::start().await;
    let client = AmdashClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    (server, client)
}

#[tokio::test]
async fn mentee_dashboard_over_http() {
    let (server, client) = backend().await;

    Mock::given(method("GET"))
        .and(path("/tracks/1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 102, "track_id": 1, "task_no": 2, "title": "Project", "points": "30", "deadline": 3},
            {"id": 100, "track_id": 1, "task_no": 0, "title": "Setup", "points": 10, "deadline": 5},
            {"id": 101, "track_id": 1, "task_no": 1, "title": "Hello world", "points": 20.0, "deadline": null}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/"))
        .and(query_param("email", MENTEE_EMAIL))
        .and(query_param("track_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "task_id": 100, "status": "submitted", "mentor_feedback": ""}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaderboard/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leaderboard": [{"mentee_name": "Asha", "total_points": 10}]
        })))
        .mount(&server)
        .await;

    let view = MenteeDashboard::load(&client, &mentee_session(), MissingPredecessor::Locked)
        .await
        .unwrap();

    let order: Vec<_> = view.board.states().iter().map(|s| s.task.task_no).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(view.board.get(0).unwrap().status, TaskStatus::Submitted);
    assert!(view.board.states().iter().all(|state| state.unlocked));
    assert_eq!(view.board.current_task().unwrap().task.points, 20);
    assert_eq!(view.standing.rank, 1);
    assert!(view.feedback.is_empty());
}

#[tokio::test]
async fn missing_submissions_mean_not_started() {
    let (server, client) = backend().await;

    Mock::given(method("GET"))
        .and(path("/tracks/1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 100, "track_id": 1, "task_no": 0, "title": "Setup", "points": 10, "deadline": 5}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "No submissions found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaderboard/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let view = MenteeDashboard::load(&client, &mentee_session(), MissingPredecessor::Locked)
        .await
        .unwrap();
    assert_eq!(view.board.get(0).unwrap().status, TaskStatus::NotStarted);
    assert!(!view.standing.is_ranked());
}

#[tokio::test]
async fn overall_leaderboard_over_http() {
    let (server, client) = backend().await;

    Mock::given(method("GET"))
        .and(path("/leaderboard/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leaderboard": [
                {"mentee_name": "Asha", "total_points": 10},
                {"mentee_name": "Ravi", "total_points": 40}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaderboard/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leaderboard": [{"mentee_name": "Asha", "total_points": 35}]
        })))
        .mount(&server)
        .await;

    let tracks = vec![
        amdash_adapter::Track {
            id: 1,
            title: "AI".to_string(),
        },
        amdash_adapter::Track {
            id: 2,
            title: "Web".to_string(),
        },
    ];
    let overall = fetch_overall(&client, &tracks).await.unwrap();

    assert_eq!(overall[0].name, "Asha");
    assert_eq!(overall[0].points, 45);
    assert_eq!(overall[0].participated_tracks, 2);
    assert_eq!(overall[1].name, "Ravi");
    assert_eq!(overall[1].position, 2);
}
