//! Authenticated API client with single-shot token refresh

use std::sync::Arc;
use std::time::{Duration, Instant};

use fitdesk_core::{LoginView, SessionEvent, SessionEvents, SessionStore};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::{self, RefreshRequest, RefreshResponse};
use crate::config::{self, ClientConfig, REQUEST_TIMEOUT};
use crate::error::ApiError;

const USER_AGENT: &str = concat!("fitdesk-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Fitdesk backend.
///
/// Attaches the stored access token to every request and recovers from a
/// single 401 per request by exchanging the refresh token for a new access
/// token and re-issuing the request exactly once. Session-fatal failures
/// clear the [`SessionStore`] and emit a [`SessionEvent`]; those are the only
/// global mutations this type performs.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    events: Arc<SessionEvents>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Build a client configured from the process environment
    /// (`FITDESK_API_URL`, `FITDESK_HTTP_DEBUG`).
    pub fn from_env(store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let config = ClientConfig::from_env();
        Self::builder()
            .base_url(&config.base_url)
            .log_latency(config.log_latency)
            .store(store)
            .build()
    }

    /// The resolved base URL, ending in exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Session event registry; the application shell subscribes here to
    /// handle navigation on session-fatal failures.
    pub fn events(&self) -> &Arc<SessionEvents> {
        &self.events
    }

    /// Build a request for a path relative to the base URL. Credentials are
    /// attached at send time, not here.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path.trim_start_matches('/'));
        self.http.request(method, url)
    }

    /// Execute a request and deserialize its 2xx body.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute_raw(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::from)
    }

    /// Execute a request whose success body is irrelevant or empty.
    pub async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute_raw(request).await.map(drop)
    }

    async fn execute_raw(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        // The retry slot: cloned before the first send and consumed by at
        // most one refresh-and-retry cycle, so recursion depth is capped at
        // one without marking shared request state. Streaming bodies have no
        // clone and therefore no retry.
        let retry = request.try_clone();

        let response = self.send_with_token(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return self.check(response).await;
        }

        let Some(retry) = retry else {
            return self.check(response).await;
        };

        self.refresh_access_token().await?;
        let retried = self.send_with_token(retry).await?;
        self.check(retried).await
    }

    /// Pass 2xx responses through untouched; everything else becomes `Http`.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::FORBIDDEN {
            // Permission failure, not a session failure: the session store
            // stays untouched and no event is emitted.
            warn!(url = %response.url(), "request forbidden");
        }

        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ApiError::from_status(status, body))
    }

    /// Attach the stored access token (when present) and send.
    async fn send_with_token(&self, mut request: RequestBuilder) -> Result<Response, ApiError> {
        if let Some(token) = self.store.access_token() {
            request = request.bearer_auth(token);
        }
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let started = Instant::now();
        let result = self.http.execute(request).await;

        if self.config.log_latency {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &result {
                Ok(response) => {
                    debug!(%method, %url, status = %response.status(), elapsed_ms, "request completed");
                }
                Err(err) => debug!(%method, %url, %err, elapsed_ms, "request failed"),
            }
        }

        result.map_err(ApiError::from)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Session-fatal outcomes (no refresh token stored, refresh rejected,
    /// account deleted) clear the store and emit the matching event.
    /// Transient refresh-endpoint failures propagate without touching the
    /// session, so a flaky refresh endpoint cannot log users out.
    async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let login = LoginView::for_role(self.store.role());

        let Some(refresh_token) = self.store.refresh_token() else {
            debug!("received 401 with no refresh token stored");
            return Err(self.expire_session(login));
        };

        // The refresh token is the credential here: no bearer header, and
        // this call itself is never retried.
        let response = self
            .request(Method::POST, auth::REFRESH_PATH)
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let refreshed: RefreshResponse = serde_json::from_str(&body)?;
            self.store.set_access_token(&refreshed.access);
            debug!("access token refreshed");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        if status == StatusCode::UNAUTHORIZED {
            if auth::is_account_deleted(&body) {
                self.store.clear();
                self.events.emit(&SessionEvent::AccountDeleted { login });
                return Err(ApiError::AccountDeleted);
            }
            return Err(self.expire_session(login));
        }

        Err(ApiError::from_status(status, body))
    }

    /// The single session-expiry path: clear everything, tell the shell.
    fn expire_session(&self, login: LoginView) -> ApiError {
        self.store.clear();
        self.events.emit(&SessionEvent::Expired { login });
        ApiError::AuthExpired
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    log_latency: bool,
    user_agent: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
    events: Option<Arc<SessionEvents>>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn log_latency(mut self, enabled: bool) -> Self {
        self.log_latency = enabled;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn events(mut self, events: Arc<SessionEvents>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Configuration("base_url is required".into()))?;
        let base_url = config::normalize_base_url(&base_url)?;
        let store = self
            .store
            .ok_or_else(|| ApiError::Configuration("session store is required".into()))?;

        let config = ClientConfig {
            base_url,
            timeout: self.timeout.unwrap_or(REQUEST_TIMEOUT),
            log_latency: self.log_latency,
        };

        let http = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned()))
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(ApiClient {
            http,
            config,
            store,
            events: self.events.unwrap_or_default(),
        })
    }
}
