//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] describes the JSON surface of the site: the calculator API,
//! the API status endpoint and the health probes. HTML pages are not part
//! of the document.
//!
//! The generated document is served by Swagger UI in debug builds.

use crate::domain::Equivalents;
use crate::inbound::http::api::{
    ApiEndpoints, ApiStatus, CalculationFailure, CalculationRequest, CalculationResponse,
};
use crate::inbound::http::health::HealthReport;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Describe the browser session cookie for clients that share it with the
/// HTML pages.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Vidensbank API",
        description = "CO2 calculator, API status and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::api::api_status,
        crate::inbound::http::api::calculate,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiStatus,
        ApiEndpoints,
        CalculationRequest,
        CalculationResponse,
        CalculationFailure,
        Equivalents,
        HealthReport
    )),
    tags(
        (name = "api", description = "Calculator and API status"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
