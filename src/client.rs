use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{ApiError, ConfigurationError},
    navigation::{NavigatorState, Redirect},
    session::SessionCell,
};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Credentials
///
/// Whether a request opts into bearer attachment. Only login and signup go out
/// without credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Attach,
    Omit,
}

/// ApiClient
///
/// The transport to the REST backend with the credential interceptor built in.
///
/// *Pre-request*: attaches `Authorization: Bearer <token>` when the request opts
/// in and a session exists, plus a fresh `x-request-id`.
///
/// *Post-response*: a 401 on a request that carried a token expires the session
/// through `SessionCell::expire`, which only succeeds if that token still belongs
/// to the current session. The first such 401 redirects to login; later ones for
/// the same session find it already gone and stay quiet. The caller still gets
/// `ApiError::Unauthorized` either way.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionCell>,
    navigator: NavigatorState,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        session: Arc<SessionCell>,
        navigator: NavigatorState,
    ) -> Result<Self, ConfigurationError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        let invalid_url = || ConfigurationError::InvalidVar {
            name: "HOUSING_HUB_API_URL",
            value: config.api_url.clone(),
        };
        let base_url = Url::parse(config.api_url.trim_end_matches('/')).map_err(|_| invalid_url())?;
        if base_url.cannot_be_a_base() {
            return Err(invalid_url());
        }

        Ok(Self {
            http,
            base_url,
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// endpoint
    ///
    /// Appends `segments` to the base URL. Each segment is percent-encoded on
    /// its own, so an id containing `/`, `?` or `#` stays inside its segment.
    /// Empty, `.` and `..` segments are rejected since they would address a
    /// different resource once the path is normalised.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ApiError::Invalid(format!("invalid path segment `{}`", bad)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Invalid(format!("`{}` cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts a request against the base URL extended by `segments`.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// send
    ///
    /// Runs one request through both interceptor stages. Non-success statuses
    /// come back as errors; the response is returned only for 2xx.
    pub async fn send(
        &self,
        builder: RequestBuilder,
        credentials: Credentials,
    ) -> Result<Response, ApiError> {
        // 1. Pre-request: snapshot token and epoch together.
        let carried = match credentials {
            Credentials::Attach => self.session.credentials(),
            Credentials::Omit => None,
        };

        let request_id = Uuid::new_v4();
        let mut builder = builder.header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some((token, _)) = &carried {
            builder = builder.bearer_auth(token.expose());
        }
        let request = builder.build().map_err(ApiError::Transport)?;

        let span = tracing::debug_span!(
            "api_request",
            method = %request.method(),
            path = %request.url().path(),
            req_id = %request_id,
            authenticated = carried.is_some(),
        );

        // 2. Transport
        let response = self
            .http
            .execute(request)
            .instrument(span.clone())
            .await
            .map_err(|e| {
                tracing::warn!(parent: &span, error = %e, "request failed in transit");
                ApiError::Transport(e)
            })?;

        // 3. Post-response
        let status = response.status();
        tracing::debug!(parent: &span, status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            if let Some((_, epoch)) = carried {
                if self.session.expire(epoch) {
                    tracing::warn!(parent: &span, "credential rejected, session expired");
                    self.navigator.redirect(Redirect::Login);
                }
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response)
    }

    /// Sends an optional JSON body and decodes a JSON response.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        credentials: Credentials,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method, segments)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(builder, credentials).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Authenticated GET decoding a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self
            .send(self.request(Method::GET, segments)?, Credentials::Attach)
            .await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Authenticated GET with query parameters.
    pub async fn get_json_with_query<Q, T>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, segments)?.query(query);
        let response = self.send(builder, Credentials::Attach).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Authenticated call whose response body is ignored.
    pub async fn execute<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        credentials: Credentials,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, segments)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder, credentials).await?;
        Ok(())
    }
}
