/*
[INPUT]:  HTTP client, email, OTP code, expected role
[OUTPUT]: Verified User (identity + role)
[POS]:    Auth layer - orchestrates the email OTP login flow
[UPDATE]: When auth endpoints or flow steps change
*/

use reqwest::Method;
use tracing::{info, instrument, warn};

use crate::http::{AmdashClient, AmdashError, Result};
use crate::types::{Acknowledgement, Role, User};

/// Manages the two-step email OTP flow
#[derive(Debug, Clone)]
pub struct OtpAuthManager {
    client: AmdashClient,
}

impl OtpAuthManager {
    pub fn new(client: AmdashClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AmdashClient {
        &self.client
    }

    /// Step 1: ask the backend to mail a one-time password
    ///
    /// GET /auth/send-otp/{email}
    #[instrument(skip(self))]
    pub async fn send_otp(&self, email: &str) -> Result<Acknowledgement> {
        let email = validate_email(email)?;
        let url = self.client.endpoint_url(&["auth", "send-otp", email])?;
        let ack = self
            .client
            .send_json(self.client.request(Method::GET, url))
            .await?;
        info!("otp sent");
        Ok(ack)
    }

    /// Step 2: exchange the password for the user's profile
    ///
    /// GET /auth/verify-otp/{email}?otp={otp}
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<User> {
        let email = validate_email(email)?;
        let otp = otp.trim();
        if otp.is_empty() {
            return Err(AmdashError::Validation("OTP cannot be empty".to_string()));
        }

        let mut url = self.client.endpoint_url(&["auth", "verify-otp", email])?;
        url.query_pairs_mut().append_pair("otp", otp);
        self.client
            .send_json(self.client.request(Method::GET, url))
            .await
            .map_err(|err| match err {
                AmdashError::Api { code, message } if code == 400 || code == 401 => {
                    AmdashError::Authentication { message }
                }
                other => other,
            })
    }

    /// Verify the OTP and check the account holds the role the user picked
    pub async fn login(&self, email: &str, otp: &str, role: Role) -> Result<User> {
        let user = self.verify_otp(email, otp).await?;
        if user.role != role {
            warn!(registered = %user.role, requested = %role, "role mismatch on login");
            return Err(AmdashError::Authentication {
                message: format!("Registered as {}, not {}", user.role, role),
            });
        }
        info!(role = %user.role, "login verified");
        Ok(user)
    }
}

/// Minimal shape check applied before an OTP is requested.
pub fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if email.contains('@') && email.contains('.') {
        Ok(email)
    } else {
        Err(AmdashError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::ClientConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager(server: &MockServer) -> OtpAuthManager {
        let client =
            AmdashClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .unwrap();
        OtpAuthManager::new(client)
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" a@b.co ").unwrap(), "a@b.co");
        assert!(matches!(
            validate_email("not-an-email"),
            Err(AmdashError::Validation(_))
        ));
        assert!(validate_email("a@localhost").is_err());
    }

    #[tokio::test]
    async fn test_send_otp_rejects_invalid_email_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = manager(&server).send_otp("bogus").await.unwrap_err();
        assert!(matches!(err, AmdashError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/send-otp/mentee@example.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "OTP sent"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/verify-otp/mentee@example.com"))
            .and(query_param("otp", "123456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Asha", "email": "mentee@example.com", "role": "mentee"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = manager(&server);
        let ack = auth.send_otp("mentee@example.com").await.unwrap();
        assert_eq!(ack.message(), Some("OTP sent"));

        let user = auth
            .login("mentee@example.com", " 123456 ", Role::Mentee)
            .await
            .unwrap();
        assert_eq!(user.name, "Asha");
        assert_eq!(user.role, Role::Mentee);
    }

    #[tokio::test]
    async fn test_login_role_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/verify-otp/mentee@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Asha", "email": "mentee@example.com", "role": "mentee"
            })))
            .mount(&server)
            .await;

        let err = manager(&server)
            .login("mentee@example.com", "123456", Role::Mentor)
            .await
            .unwrap_err();

        match err {
            AmdashError::Authentication { message } => {
                assert_eq!(message, "Registered as Mentee, not Mentor");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_otp_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/verify-otp/mentee@example.com"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"detail": "Invalid OTP"})),
            )
            .mount(&server)
            .await;

        let err = manager(&server)
            .verify_otp("mentee@example.com", "000000")
            .await
            .unwrap_err();
        assert!(err.is_auth_error());
    }
}
