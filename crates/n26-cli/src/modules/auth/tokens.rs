use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::modules::auth::{
    CredentialStore, Credentials, Prompter, TokenErrorResponse, TokenResponse,
};
use crate::modules::system::ApiError;
use crate::{CLIENT_ID, CLIENT_SECRET, DEFAULT_TOKEN_LIFETIME_SECONDS};

/// The token an authenticated request is sent with.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: Credentials,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn access_token(&self) -> &str {
        &self.credentials.access_token
    }

    pub fn is_expired(&self) -> bool {
        self.credentials.is_expired()
    }
}

pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    store: CredentialStore,
    prompter: Arc<dyn Prompter>,
    refresh_margin: ChronoDuration,
}

impl TokenManager {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        store: CredentialStore,
        prompter: Arc<dyn Prompter>,
        refresh_margin: ChronoDuration,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}/oauth/token", base_url.trim_end_matches('/')),
            store,
            prompter,
            refresh_margin,
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Stored token if still valid, otherwise a refresh grant, otherwise an
    /// interactive password login.
    pub async fn acquire(&self) -> Result<Session, ApiError> {
        self.resolve(false).await
    }

    /// Like [`acquire`](Self::acquire), but a rejected refresh grant drops the
    /// record and falls back to an interactive login.
    pub async fn reauthenticate(&self) -> Result<Session, ApiError> {
        self.resolve(true).await
    }

    /// Replaces a session whose access token ran out during this invocation.
    pub async fn renew(&self, session: Session) -> Result<Session, ApiError> {
        if !session.credentials().can_refresh() {
            return self.login().await;
        }
        info!("access token expired; refreshing");
        let creds = self.refresh(session.credentials()).await?;
        Ok(Session::new(creds))
    }

    async fn resolve(&self, fallback_to_login: bool) -> Result<Session, ApiError> {
        let Some(stored) = self.store.load() else {
            return self.login().await;
        };
        if stored.is_valid_at(Utc::now()) {
            debug!("using stored access token");
            return Ok(Session::new(stored));
        }
        if !stored.can_refresh() {
            return self.login().await;
        }

        info!("stored access token expired; refreshing");
        match self.refresh(&stored).await {
            Ok(creds) => Ok(Session::new(creds)),
            Err(err) if err.is_rejected_grant() => {
                // A refused refresh token is dead; the next run must prompt.
                self.store.delete()?;
                if !fallback_to_login {
                    return Err(err);
                }
                warn!("refresh grant rejected ({err}); asking for credentials");
                self.login().await
            }
            Err(err) => Err(err),
        }
    }

    pub async fn login(&self) -> Result<Session, ApiError> {
        let username = self
            .prompter
            .read_line("N26 email address: ")
            .map_err(|source| ApiError::Prompt {
                what: "email address",
                source,
            })?;
        if username.trim().is_empty() {
            return Err(ApiError::AuthenticationFailure {
                message: "an email address is required".to_string(),
                rejected: false,
            });
        }
        let password = self
            .prompter
            .read_secret("N26 password: ")
            .map_err(|source| ApiError::Prompt {
                what: "password",
                source,
            })?;

        info!("requesting access token with password grant");
        let response = self
            .request_token(&[
                ("grant_type", "password"),
                ("username", username.trim()),
                ("password", password.as_str()),
            ])
            .await?;
        let creds = self.credentials_from(response, None);
        self.store.save(&creds)?;
        Ok(Session::new(creds))
    }

    async fn refresh(&self, current: &Credentials) -> Result<Credentials, ApiError> {
        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", current.refresh_token.as_str()),
            ])
            .await?;
        let creds = self.credentials_from(response, Some(&current.refresh_token));
        self.store.save(&creds)?;
        Ok(creds)
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse, ApiError> {
        let start = std::time::Instant::now();
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(params)
            .send()
            .await
            .map_err(|err| ApiError::AuthenticationFailure {
                message: format!("could not reach the token endpoint: {err}"),
                rejected: false,
            })?;
        let status = response.status();
        debug!(
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "token response"
        );

        if status.is_success() {
            return response
                .json::<TokenResponse>()
                .await
                .map_err(|err| ApiError::AuthenticationFailure {
                    message: format!("could not unmarshal token response: {err}"),
                    rejected: false,
                });
        }

        if status == StatusCode::UNAUTHORIZED {
            self.store.delete()?;
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TokenErrorResponse>(&body)
            .map(TokenErrorResponse::into_message)
            .unwrap_or_else(|_| format!("authentication failed: {status}"));
        Err(ApiError::AuthenticationFailure {
            message,
            rejected: status.is_client_error(),
        })
    }

    fn credentials_from(
        &self,
        response: TokenResponse,
        previous_refresh: Option<&str>,
    ) -> Credentials {
        let lifetime = response
            .expires_in
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECONDS);
        let lifetime = ChronoDuration::seconds(lifetime);
        let margin = effective_margin(lifetime, self.refresh_margin);
        if margin < self.refresh_margin {
            warn!(
                lifetime_secs = lifetime.num_seconds(),
                margin_secs = self.refresh_margin.num_seconds(),
                "refresh margin exceeds token lifetime; using half the lifetime"
            );
        }
        let refresh_token = response
            .refresh_token
            .filter(|token| !token.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default();

        Credentials {
            token_type: response.token_type.unwrap_or_else(|| "bearer".to_string()),
            access_token: response.access_token,
            refresh_token,
            expiry: Utc::now() + lifetime - margin,
        }
    }
}

/// The configured margin, capped at half the lifetime so a fresh token is
/// never stored already expired.
fn effective_margin(lifetime: ChronoDuration, margin: ChronoDuration) -> ChronoDuration {
    if margin >= lifetime {
        lifetime / 2
    } else {
        margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::ScriptedPrompter;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    const BASIC_AUTH: &str = "Basic YW5kcm9pZDpzZWNyZXQ=";

    fn manager(server_url: &str, dir: &TempDir, prompter: Arc<dyn Prompter>) -> TokenManager {
        TokenManager::new(
            reqwest::Client::new(),
            server_url,
            CredentialStore::new(dir.path().join("n26.auth")),
            prompter,
            ChronoDuration::minutes(10),
        )
    }

    fn stored(access: &str, refresh: &str, expiry: chrono::DateTime<Utc>) -> Credentials {
        Credentials {
            token_type: "bearer".to_string(),
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expiry,
        }
    }

    #[tokio::test]
    async fn valid_record_is_used_without_network() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth/token")
            .expect(0)
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let tokens = manager(&server.url(), &dir, Arc::new(ScriptedPrompter::default()));
        let creds = stored("abc", "def", Utc::now() + ChronoDuration::minutes(30));
        tokens.store().save(&creds).expect("seed");

        let session = tokens.acquire().await.expect("acquire");

        assert_eq!(session.credentials(), &creds);
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn expired_record_is_refreshed_and_persisted() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth/token")
            .match_header("authorization", BASIC_AUTH)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                Matcher::UrlEncoded("refresh_token".into(), "def".into()),
            ]))
            .with_status(200)
            .with_body(json!({"access_token": "fresh", "expires_in": 3600}).to_string())
            .expect(1)
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let prompter = Arc::new(ScriptedPrompter::default());
        let tokens = manager(&server.url(), &dir, prompter.clone());
        tokens
            .store()
            .save(&stored("stale", "def", Utc::now() - ChronoDuration::minutes(1)))
            .expect("seed");

        let session = tokens.acquire().await.expect("acquire");

        assert_eq!(session.access_token(), "fresh");
        let saved = tokens.store().load().expect("saved");
        assert_eq!(saved.access_token, "fresh");
        assert_eq!(saved.refresh_token, "def");
        assert!(!saved.is_expired());
        assert!(prompter.asked().is_empty());
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_record_prompts_and_applies_margin() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth/token")
            .match_header("authorization", BASIC_AUTH)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "password".into()),
                Matcher::UrlEncoded("username".into(), "user@example.com".into()),
                Matcher::UrlEncoded("password".into(), "hunter2".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "access_token": "abc",
                    "refresh_token": "def",
                    "token_type": "bearer",
                    "expires_in": 3600
                })
                .to_string(),
            )
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let prompter = Arc::new(ScriptedPrompter::new(["user@example.com", "hunter2"]));
        let tokens = manager(&server.url(), &dir, prompter.clone());

        let before = Utc::now();
        let session = tokens.acquire().await.expect("acquire");

        assert_eq!(session.access_token(), "abc");
        let saved = tokens.store().load().expect("saved");
        assert_eq!(saved.refresh_token, "def");
        let expected = before + ChronoDuration::seconds(3600) - ChronoDuration::minutes(10);
        assert!(saved.expiry >= expected);
        assert!(saved.expiry <= Utc::now() + ChronoDuration::seconds(3000));
        assert_eq!(prompter.asked(), vec!["N26 email address: ", "N26 password: "]);
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreadable_password_surfaces_prompt_error() {
        let server = Server::new_async().await;
        let dir = tempdir().expect("tempdir");
        let tokens = manager(
            &server.url(),
            &dir,
            Arc::new(ScriptedPrompter::new(["user@example.com"])),
        );

        let err = tokens.acquire().await.expect_err("no password");

        assert_eq!(err.to_string(), "could not read password");
        assert!(tokens.store().load().is_none());
    }

    #[tokio::test]
    async fn unauthorized_grant_deletes_record() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body(
                json!({"error": "invalid_token", "error_description": "Invalid refresh token"})
                    .to_string(),
            )
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let tokens = manager(&server.url(), &dir, Arc::new(ScriptedPrompter::default()));
        tokens
            .store()
            .save(&stored("stale", "dead", Utc::now() - ChronoDuration::minutes(1)))
            .expect("seed");

        let err = tokens.acquire().await.expect_err("rejected");

        assert!(err.is_rejected_grant());
        assert_eq!(err.to_string(), "Invalid refresh token");
        assert!(tokens.store().load().is_none());
    }

    #[tokio::test]
    async fn reauthenticate_falls_back_to_login_after_rejected_refresh() {
        let mut server = Server::new_async().await;
        let refresh_mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(400)
            .with_body(json!({"error": "invalid_grant"}).to_string())
            .expect(1)
            .create_async()
            .await;
        let password_mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .with_status(200)
            .with_body(
                json!({"access_token": "new", "refresh_token": "r2", "expires_in": 3600})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let tokens = manager(
            &server.url(),
            &dir,
            Arc::new(ScriptedPrompter::new(["user@example.com", "hunter2"])),
        );
        tokens
            .store()
            .save(&stored("stale", "dead", chrono::DateTime::<Utc>::UNIX_EPOCH))
            .expect("seed");

        let session = tokens.reauthenticate().await.expect("reauthenticate");

        assert_eq!(session.access_token(), "new");
        assert_eq!(tokens.store().load().expect("saved").refresh_token, "r2");
        refresh_mock.assert_async().await;
        password_mock.assert_async().await;
    }

    #[tokio::test]
    async fn acquire_does_not_fall_back_after_rejected_refresh() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(400)
            .with_body(json!({"error": "invalid_grant"}).to_string())
            .expect(1)
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let prompter = Arc::new(ScriptedPrompter::default());
        let tokens = manager(&server.url(), &dir, prompter.clone());
        tokens
            .store()
            .save(&stored("stale", "dead", chrono::DateTime::<Utc>::UNIX_EPOCH))
            .expect("seed");

        let err = tokens.acquire().await.expect_err("rejected");

        assert_eq!(err.to_string(), "invalid_grant");
        assert!(prompter.asked().is_empty());
        assert!(tokens.store().load().is_none());
    }

    #[tokio::test]
    async fn short_lived_token_is_stored_unexpired() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(json!({"access_token": "abc", "expires_in": 600}).to_string())
            .create_async()
            .await;
        let dir = tempdir().expect("tempdir");
        let tokens = manager(&server.url(), &dir, Arc::new(ScriptedPrompter::default()));
        tokens
            .store()
            .save(&stored("stale", "def", chrono::DateTime::<Utc>::UNIX_EPOCH))
            .expect("seed");

        let before = Utc::now();
        let session = tokens.acquire().await.expect("acquire");

        assert!(!session.is_expired());
        let saved = tokens.store().load().expect("saved");
        assert!(saved.expiry > Utc::now());
        assert!(saved.expiry >= before + ChronoDuration::seconds(300));
        assert!(saved.expiry <= Utc::now() + ChronoDuration::seconds(300));
    }

    #[test]
    fn margin_is_capped_at_half_the_lifetime() {
        let hour = ChronoDuration::seconds(3600);
        let ten_minutes = ChronoDuration::minutes(10);

        assert_eq!(effective_margin(hour, ten_minutes), ten_minutes);
        assert_eq!(
            effective_margin(ChronoDuration::seconds(600), ten_minutes),
            ChronoDuration::seconds(300)
        );
        assert_eq!(
            effective_margin(ChronoDuration::seconds(60), ten_minutes),
            ChronoDuration::seconds(30)
        );
    }
}
