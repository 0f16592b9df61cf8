use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::modules::auth::{Session, TokenManager};
use crate::modules::system::{ApiError, ApiRequest, RetryState, UpstreamError};

/// Authenticated executor for the account API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
    session: Option<Session>,
    diagnostics: bool,
}

impl ApiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: TokenManager,
        diagnostics: bool,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
            session: None,
            diagnostics,
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Sends `request` and decodes a successful body into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &mut self,
        request: &ApiRequest,
    ) -> Result<T, ApiError> {
        let body = self.dispatch(request).await?;
        serde_json::from_slice(&body).map_err(ApiError::Decoding)
    }

    /// Sends `request` when the caller has no use for the response body.
    pub async fn execute_empty(&mut self, request: &ApiRequest) -> Result<(), ApiError> {
        self.dispatch(request).await.map(|_| ())
    }

    async fn dispatch(&mut self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        let mut state = RetryState::Fresh;
        loop {
            let bearer = self.bearer().await?;
            let response = self.send_once(request, &bearer).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                info!(
                    method = %request.method(),
                    path = %request.path(),
                    retry = ?state,
                    "http request unauthorized; invalidating stored token"
                );
                self.session = None;
                self.tokens.store().invalidate()?;
                let Some(next) = state.after_unauthorized() else {
                    return Err(ApiError::AuthenticationExpired);
                };
                self.session = Some(self.tokens.reauthenticate().await?);
                state = next;
                continue;
            }

            let body = response.bytes().await?.to_vec();
            if self.diagnostics {
                info!(
                    method = %request.method(),
                    path = %request.path(),
                    status = status.as_u16(),
                    body = %String::from_utf8_lossy(&body),
                    "upstream response"
                );
            }

            if status.as_u16() >= 400 {
                return Err(classify_error(&body));
            }

            // The access token may have been rotated during the call.
            if let Some(session) = self.session.as_ref() {
                self.tokens.store().save(session.credentials())?;
            }
            return Ok(body);
        }
    }

    async fn bearer(&mut self) -> Result<String, ApiError> {
        let session = match self.session.take() {
            Some(session) if !session.is_expired() => session,
            Some(session) => self.tokens.renew(session).await?,
            None => self.tokens.acquire().await?,
        };
        let token = session.access_token().to_string();
        self.session = Some(session);
        Ok(token)
    }

    async fn send_once(
        &self,
        request: &ApiRequest,
        bearer: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let url = request.url(&self.base_url);
        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .bearer_auth(bearer);
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }
        debug!(method = %request.method(), path = %request.path(), "http request");
        let start = std::time::Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %request.method(),
            path = %request.path(),
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }
}

pub(crate) fn classify_error(body: &[u8]) -> ApiError {
    match serde_json::from_slice::<UpstreamError>(body) {
        Ok(err) if !err.message.trim().is_empty() => ApiError::Upstream(err.message),
        Ok(err) if !err.title.trim().is_empty() => ApiError::Upstream(err.title),
        _ => ApiError::UnknownUpstream,
    }
}
