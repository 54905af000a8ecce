//! Cloud Foundry REST dispatch layer.
//!
//! Low-level HTTP client that builds authenticated requests against the
//! fixed v2 endpoints and returns raw responses. Status-code interpretation
//! and payload conversion happen in the operation layer on top of this.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::credentials::CfCredentials;
use crate::error::{CfError, Result};

const USER_AGENT: &str = concat!("cfapi/", env!("CARGO_PKG_VERSION"));

/// The constant `cf:` client credentials used for the OAuth token exchange.
const TOKEN_EXCHANGE_AUTH: &str = "Basic Y2Y6";

/// Low-level Cloud Foundry API client.
///
/// Builds one HTTP request per logical operation: resource calls carry a
/// `bearer` token obtained from the token exchange, `/info` goes out
/// unauthenticated, and the token exchange itself uses the fixed
/// `Basic Y2Y6` header. Responses come back uninterpreted; callers check the
/// status with [`expect_status`] and convert the body.
///
/// This struct is cheaply cloneable; clones share the same connection pool
/// and the same access token slot.
#[derive(Clone)]
pub struct CfClient {
    http: Client,
    credentials: CfCredentials,
    base_url: Arc<Url>,
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for CfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CfClient {
    /// Create a client for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(credentials: CfCredentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CfError::HttpError)?;

        let base_url = Arc::new(credentials.target().clone());

        Ok(Self {
            http,
            credentials,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from the `CF_TARGET`/`CF_USERNAME`/`CF_PASSWORD`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(CfCredentials::from_env()?)
    }

    /// Get the Cloud Controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The current bearer access token, if authenticated.
    pub fn access_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Install a pre-obtained bearer token, bypassing the token exchange.
    pub fn set_access_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
    }

    fn bearer(&self) -> Result<String> {
        self.access_token().ok_or(CfError::NotAuthenticated)
    }

    /// Exchange the username/password for a bearer token.
    ///
    /// POSTs the OAuth password grant to `{authorization_endpoint}/oauth/token`
    /// with the constant `Basic Y2Y6` header and overwrites the stored access
    /// token in place. Callers are expected to serialize authentication.
    #[tracing::instrument(skip(self))]
    pub async fn token_exchange(&self, authorization_endpoint: &str) -> Result<()> {
        let base = if authorization_endpoint.ends_with('/') {
            authorization_endpoint.to_string()
        } else {
            format!("{authorization_endpoint}/")
        };
        let url = Url::parse(&base)?.join("oauth/token")?;

        let form = [
            ("grant_type", "password"),
            ("username", self.credentials.username()),
            ("password", self.credentials.password()),
        ];

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, TOKEN_EXCHANGE_AUTH)
            .form(&form)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        let body = expect_status(response, StatusCode::OK).await?;

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| CfError::format(format!("token response is not JSON: {e}"), &body))?;
        let token = json
            .get("access_token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CfError::format("missing 'access_token' property", &body))?;

        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }

        tracing::debug!("obtained bearer token");
        Ok(())
    }

    /// Make an unauthenticated GET request (the `/info` call).
    #[tracing::instrument(skip(self))]
    pub async fn get_unauthenticated(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .get(url)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Make a bearer-authenticated GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .get(url)
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Make a bearer-authenticated GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .get(url)
            .bearer_auth(self.bearer()?)
            .query(query)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Make a bearer-authenticated POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .post(url)
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Make a bearer-authenticated PUT request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .put(url)
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Make a bearer-authenticated PUT request with no body
    /// (the route-to-app binding call).
    #[tracing::instrument(skip(self))]
    pub async fn put_empty(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        self.http
            .put(url)
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(CfError::HttpError)
    }

    /// Upload application package bits as multipart form data.
    ///
    /// The form carries the three parts the Cloud Controller expects:
    /// `async` = `"true"`, `resources` = an empty JSON array, and
    /// `application` = the zipped package.
    #[tracing::instrument(skip(self, package))]
    pub async fn upload_bits(&self, path: &str, package: Vec<u8>) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let form = multipart::Form::new()
            .text("async", "true")
            .text("resources", "[]")
            .part(
                "application",
                multipart::Part::bytes(package)
                    .file_name("application.zip")
                    .mime_str("application/zip")
                    .map_err(CfError::HttpError)?,
            );

        self.http
            .put(url)
            .bearer_auth(self.bearer()?)
            .multipart(form)
            .send()
            .await
            .map_err(CfError::HttpError)
    }
}

/// Check a response against the single status code the operation expects.
///
/// On a match, returns the body text for the payload converter. Any other
/// status is surfaced as [`CfError::UnexpectedStatus`] embedding the
/// received code and body.
pub async fn expect_status(response: Response, expected: StatusCode) -> Result<String> {
    let received = response.status();
    let body = response.text().await.unwrap_or_default();

    if received == expected {
        return Ok(body);
    }

    Err(CfError::UnexpectedStatus {
        expected: expected.as_u16(),
        received: received.as_u16(),
        body,
    })
}
