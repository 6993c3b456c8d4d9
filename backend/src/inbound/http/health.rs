//! Health endpoints: the monitoring report plus liveness and readiness
//! probes for orchestration and load balancers.
//!
//! ```text
//! GET /health        {"status":"healthy","database":"healthy",...}
//! GET /health/ready
//! GET /health/live
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::state::HttpState;

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks, e.g. while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthReport {
    /// `healthy` or `unhealthy`.
    #[schema(example = "healthy")]
    pub status: String,
    /// Outcome of the database round trip.
    #[schema(example = "healthy")]
    pub database: String,
    /// RFC 3339 UTC timestamp of the check.
    pub timestamp: String,
    /// Application version.
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Monitoring report. Return 200 when the database answers, 503 otherwise.
///
/// The failure reason is logged but never included in the response.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Application and database healthy", body = HealthReport),
        (status = 503, description = "Database unreachable", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let database = match state.database.ping().await {
        Ok(()) => HEALTHY,
        Err(err) => {
            error!(error = %err, "health check failed");
            UNHEALTHY
        }
    };
    let report = HealthReport {
        status: database.to_owned(),
        database: database.to_owned(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    };

    let mut response = if database == HEALTHY {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.json(report)
}

/// Readiness probe. Return 200 once the server is initialised, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Arc;

    use crate::domain::ports::{DatabaseHealth, DatabaseHealthError};
    use crate::inbound::http::test_utils::{fixture_ports, fixture_state};
    use crate::inbound::http::state::SiteSettings;

    struct DownDatabase;

    #[async_trait]
    impl DatabaseHealth for DownDatabase {
        async fn ping(&self) -> Result<(), DatabaseHealthError> {
            Err(DatabaseHealthError::connection("password authentication failed"))
        }
    }

    async fn call_health(state: HttpState) -> (StatusCode, HealthReport) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn healthy_database_reports_ok() {
        let (status, report) = call_health(fixture_state()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.status, "healthy");
        assert_eq!(report.database, "healthy");
        assert_eq!(report.version, "1.0.0");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn failing_database_reports_503_without_detail() {
        let mut ports = fixture_ports();
        ports.database = Arc::new(DownDatabase);
        let (status, report) = call_health(HttpState::new(ports, SiteSettings::default())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, "unhealthy");
        assert_eq!(report.database, "unhealthy");
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] ready_flag: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new());
        if ready_flag {
            state.mark_ready();
        }
        let app = test::init_service(App::new().app_data(state).service(ready).service(live))
            .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        state.mark_unhealthy();
        let app = test::init_service(App::new().app_data(state).service(live)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
