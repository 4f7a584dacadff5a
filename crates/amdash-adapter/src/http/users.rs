/*
[INPUT]:  User and mentor email addresses
[OUTPUT]: User profiles and mentor-mentee mappings
[POS]:    HTTP layer - user directory endpoints
[UPDATE]: When adding new user endpoints or changing response format
*/

use reqwest::Method;
use tracing::instrument;

use crate::http::error::or_empty;
use crate::http::{AmdashClient, Result};
use crate::types::{Mentee, MenteesResponse, User};

impl AmdashClient {
    /// Profile for an email address
    ///
    /// GET /auth/user/{email}
    #[instrument(skip(self))]
    pub async fn user_by_email(&self, email: &str) -> Result<User> {
        let url = self.endpoint_url(&["auth", "user", email])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Mentees assigned to a mentor. An unknown mentor has none.
    ///
    /// GET /mentors/{mentor_email}/mentees
    #[instrument(skip(self))]
    pub async fn mentor_mentees(&self, mentor_email: &str) -> Result<Vec<Mentee>> {
        let url = self.endpoint_url(&["mentors", mentor_email, "mentees"])?;
        let response: Option<MenteesResponse> =
            or_empty(self.send_json(self.request(Method::GET, url)).await)?;
        Ok(response.map(|body| body.mentees).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{AmdashClient, ClientConfig};
    use crate::types::{Mentee, Role};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AmdashClient {
        AmdashClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_user_by_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/user/mentor@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 5, "name": "Meera", "email": "mentor@example.com", "role": "mentor"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server)
            .user_by_email("mentor@example.com")
            .await
            .expect("user lookup failed");

        assert_eq!(user.id, Some(5));
        assert_eq!(user.role, Role::Mentor);
    }

    #[tokio::test]
    async fn test_mentor_mentees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mentors/mentor@example.com/mentees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "mentees": [{"name": "Asha", "email": "asha@example.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mentees = client(&server)
            .mentor_mentees("mentor@example.com")
            .await
            .expect("mentees failed");

        assert_eq!(
            mentees,
            vec![Mentee {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_mentor_has_no_mentees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mentors/ghost@example.com/mentees"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Mentor not found"})),
            )
            .mount(&server)
            .await;

        let mentees = client(&server)
            .mentor_mentees("ghost@example.com")
            .await
            .expect("404 should be empty");
        assert!(mentees.is_empty());
    }
}
