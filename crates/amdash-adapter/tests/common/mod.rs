/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for amdash-adapter tests

use amdash_adapter::{AmdashClient, ClientConfig};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> AmdashClient {
    AmdashClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Three-task track used across tests: deadline, no deadline, deadline
#[allow(dead_code)]
pub fn sample_tasks_json(track_id: i64) -> serde_json::Value {
    serde_json::json!([
        {"id": 100, "track_id": track_id, "task_no": 0, "title": "Setup", "description": "", "points": 10, "deadline": 5},
        {"id": 101, "track_id": track_id, "task_no": 1, "title": "Hello world", "description": "", "points": 20, "deadline": null},
        {"id": 102, "track_id": track_id, "task_no": 2, "title": "Project", "description": "", "points": 30, "deadline": 3}
    ])
}
