use crate::auth::{AuthOutcome, AuthRequest, AuthResponse};
use crate::health::{HealthFlags, HealthReport, Readiness};
use crate::insights::Insights;
use crate::{ClientError, Result as ClientResult};

use lexa_core::{AccessibilityProfile, ProfileRecord};

use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Per-endpoint deadlines.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub health: Duration,
    pub insights: Duration,
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            health: Duration::from_millis(2000),
            insights: Duration::from_millis(5000),
            request: Duration::from_millis(10000),
        }
    }
}

/// HTTP client for the assistant backend.
///
/// Calls are single-attempt; delivery retry belongs to the bus layer, not
/// here.
pub struct BackendClient {
    pub base_url: String,
    http: ReqwestClient,
    timeouts: Timeouts,
}

impl BackendClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://localhost:5000")
    /// * `timeouts` - Per-endpoint deadlines
    pub fn new(base_url: &str, timeouts: Timeouts) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: ReqwestClient::new(),
            timeouts,
        }
    }

    /// Build a request with the given deadline
    fn request(&self, method: Method, path: &str, timeout: Duration) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, &url).timeout(timeout)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Probe `/health` and classify the result.
    ///
    /// An HTTP error status classifies as degraded regardless of body; the
    /// flag classification only applies to success responses.
    pub async fn health(&self) -> ClientResult<HealthReport> {
        let start = Instant::now();
        let response = self
            .request(Method::GET, "/health", self.timeouts.health)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if !status.is_success() {
            return Ok(HealthReport {
                readiness: Readiness::Degraded,
                gemini_enabled: false,
                mongodb_enabled: false,
                latency_ms,
                status: status.as_u16(),
            });
        }

        let flags: HealthFlags = response.json().await.map_err(ClientError::from_body)?;

        Ok(HealthReport {
            readiness: Readiness::classify(flags.gemini_enabled, flags.mongodb_enabled),
            gemini_enabled: flags.gemini_enabled,
            mongodb_enabled: flags.mongodb_enabled,
            latency_ms,
            status: status.as_u16(),
        })
    }

    /// Poll the health endpoint until the backend is usable.
    ///
    /// Returns the first non-degraded report, `Timeout` when the deadline
    /// expires, or `Aborted` on shutdown.
    pub async fn wait_ready(
        &self,
        deadline: Duration,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> ClientResult<HealthReport> {
        let start = Instant::now();

        while start.elapsed() < deadline {
            let probe = tokio::select! {
                result = self.health() => result,
                _ = shutdown.recv() => return Err(ClientError::aborted()),
            };

            match probe {
                Ok(report) if report.is_usable() => return Ok(report),
                Ok(report) => {
                    debug!("Backend degraded (HTTP {}), waiting", report.status);
                }
                Err(e) if e.is_retryable() => {
                    debug!("Backend not reachable yet: {e}");
                }
                Err(e) => return Err(e),
            }

            tokio::select! {
                _ = tokio::time::sleep(READY_POLL_INTERVAL) => {}
                _ = shutdown.recv() => return Err(ClientError::aborted()),
            }
        }

        Err(ClientError::Timeout {
            message: format!("backend not ready after {}s", deadline.as_secs()),
            location: error_location::ErrorLocation::from(std::panic::Location::caller()),
        })
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthOutcome> {
        self.auth("/api/auth/login", email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<AuthOutcome> {
        self.auth("/api/auth/register", email, password).await
    }

    async fn auth(&self, path: &str, email: &str, password: &str) -> ClientResult<AuthOutcome> {
        if email.trim().is_empty() {
            return Err(ClientError::validation("email", "must not be empty"));
        }
        if password.is_empty() {
            return Err(ClientError::validation("password", "must not be empty"));
        }

        let response = self
            .request(Method::POST, path, self.timeouts.request)
            .json(&AuthRequest { email, password })
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        let body: AuthResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                // Error status with no parseable body
                return Err(ClientError::api(status.as_u16(), e.to_string()));
            }
            Err(e) => return Err(ClientError::from_body(e)),
        };

        if body.success {
            let user_id = body
                .user_id
                .ok_or_else(|| ClientError::api(status.as_u16(), "auth response missing userId"))?;
            Ok(AuthOutcome::Granted { user_id })
        } else {
            Ok(AuthOutcome::Denied {
                reason: body
                    .error
                    .unwrap_or_else(|| String::from("invalid credentials")),
            })
        }
    }

    // =========================================================================
    // Accessibility profile
    // =========================================================================

    /// Push the profile selection to the backend.
    pub async fn save_profile(&self, user_id: &str, record: &ProfileRecord) -> ClientResult<()> {
        #[derive(Serialize)]
        struct SaveRequest<'a> {
            #[serde(rename = "userId")]
            user_id: &'a str,
            profile: &'a ProfileRecord,
        }

        #[derive(Deserialize)]
        struct SaveResponse {
            success: bool,
        }

        let response = self
            .request(
                Method::POST,
                "/api/accessibility/profile/save",
                self.timeouts.request,
            )
            .json(&SaveRequest { user_id, profile: record })
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), "profile save failed"));
        }

        let body: SaveResponse = response.json().await.map_err(ClientError::from_body)?;
        if !body.success {
            return Err(ClientError::api(status.as_u16(), "profile save rejected"));
        }

        Ok(())
    }

    /// Fetch the remotely stored profile, if any.
    pub async fn get_profile(&self, user_id: &str) -> ClientResult<Option<AccessibilityProfile>> {
        #[derive(Deserialize)]
        struct ProfileBody {
            mode: Option<String>,
        }

        #[derive(Deserialize)]
        struct GetResponse {
            success: bool,
            profile: Option<ProfileBody>,
        }

        let path = format!("/api/accessibility/profile/get/{user_id}");
        let response = self
            .request(Method::GET, &path, self.timeouts.request)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), "profile fetch failed"));
        }

        let body: GetResponse = response.json().await.map_err(ClientError::from_body)?;
        if !body.success {
            return Ok(None);
        }

        let mode = match body.profile.and_then(|p| p.mode) {
            Some(mode) => mode,
            None => return Ok(None),
        };

        // A mode outside the catalog is a forward-compat case, not a failure.
        match AccessibilityProfile::from_str(&mode) {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => {
                warn!("Backend returned unrecognized profile mode: {mode}");
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Fetch usage insights for the side panel.
    pub async fn insights(&self, user_id: &str) -> ClientResult<Insights> {
        #[derive(Deserialize)]
        struct InsightsResponse {
            success: bool,
            #[serde(flatten)]
            insights: Insights,
        }

        let path = format!("/api/analytics/insights/{user_id}");
        let response = self
            .request(Method::GET, &path, self.timeouts.insights)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), "insights fetch failed"));
        }

        let body: InsightsResponse = response.json().await.map_err(ClientError::from_body)?;
        if !body.success {
            return Err(ClientError::api(status.as_u16(), "insights not available"));
        }

        Ok(body.insights)
    }
}
