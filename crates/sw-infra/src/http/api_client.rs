//! HTTP client for the media server setup API.
//!
//! Implements both [`SetupApiPort`] and [`PathProbePort`]; path checks run on
//! the server so the reported facts are those of the server host.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sw_core::config::WizardConfig;
use sw_core::ports::{
    ApiError, LibraryCreated, LibraryRequest, OwnerCreated, OwnerRequest, PathCreated,
    PathProbePort, SetupApiPort,
};
use sw_core::setup::{PathCheck, PrivacyLevel, SetupStatus};
use tracing::{debug, warn};

const STATUS_ROUTE: &str = "/api/setup/status";
const OWNER_ROUTE: &str = "/api/setup/owner";
const PATH_CHECK_ROUTE: &str = "/api/setup/path/check";
const PATH_CREATE_ROUTE: &str = "/api/setup/path/create";
const LIBRARIES_ROUTE: &str = "/api/libraries";
const PRIVACY_ROUTE: &str = "/api/settings/privacy";
const COMPLETE_ROUTE: &str = "/api/setup/complete";

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Serialize)]
struct PathBody<'a> {
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct PrivacyBody {
    level: PrivacyLevel,
}

pub struct HttpSetupApi {
    client: Client,
    base_url: String,
}

impl HttpSetupApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WizardConfig) -> anyhow::Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.api_timeout_secs),
        )
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    /// Send and decode a JSON response body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        route: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(route, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("invalid response from {route}: {e}")))
    }

    async fn send(
        &self,
        route: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| transport_error(route, e))?;
        let status = response.status();
        debug!(route, status = status.as_u16(), "setup api response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let err = map_status(status, body);
        warn!(route, status = status.as_u16(), error = %err, "setup api request failed");
        Err(err)
    }
}

fn transport_error(route: &str, error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Network(format!("request to {route} timed out"))
    } else {
        ApiError::Network(error.to_string())
    }
}

/// Map a non-2xx response onto the port's error kinds.
fn map_status(status: StatusCode, body: ErrorBody) -> ApiError {
    let message = body
        .message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("server responded with {status}"));

    if status == StatusCode::INSUFFICIENT_STORAGE || body.code.as_deref() == Some("io") {
        return ApiError::Io(message);
    }

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        _ => ApiError::Network(format!("HTTP {}: {message}", status.as_u16())),
    }
}

#[async_trait]
impl SetupApiPort for HttpSetupApi {
    async fn get_setup_status(&self) -> Result<SetupStatus, ApiError> {
        self.send_json(STATUS_ROUTE, self.client.get(self.url(STATUS_ROUTE)))
            .await
    }

    async fn create_owner(&self, request: OwnerRequest) -> Result<OwnerCreated, ApiError> {
        self.send_json(
            OWNER_ROUTE,
            self.client.post(self.url(OWNER_ROUTE)).json(&request),
        )
        .await
    }

    async fn create_library(&self, request: LibraryRequest) -> Result<LibraryCreated, ApiError> {
        self.send_json(
            LIBRARIES_ROUTE,
            self.client.post(self.url(LIBRARIES_ROUTE)).json(&request),
        )
        .await
    }

    async fn save_privacy_settings(&self, level: PrivacyLevel) -> Result<(), ApiError> {
        let body = PrivacyBody { level };
        self.send(PRIVACY_ROUTE, self.client.put(self.url(PRIVACY_ROUTE)).json(&body))
            .await?;
        Ok(())
    }

    async fn complete_setup(&self) -> Result<(), ApiError> {
        self.send(COMPLETE_ROUTE, self.client.post(self.url(COMPLETE_ROUTE)))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PathProbePort for HttpSetupApi {
    async fn check_path(&self, path: &str) -> Result<PathCheck, ApiError> {
        self.send_json(
            PATH_CHECK_ROUTE,
            self.client
                .post(self.url(PATH_CHECK_ROUTE))
                .json(&PathBody { path }),
        )
        .await
    }

    async fn create_path(&self, path: &str) -> Result<PathCreated, ApiError> {
        self.send_json(
            PATH_CREATE_ROUTE,
            self.client
                .post(self.url(PATH_CREATE_ROUTE))
                .json(&PathBody { path }),
        )
        .await
    }
}
