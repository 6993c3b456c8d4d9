//! JSON API handlers.
//!
//! ```text
//! GET  /api/status
//! POST /api/calculate-co2 {"food_type":"beef","quantity":2}
//! ```
//!
//! Calculator responses keep the `{success, ...}` envelope browser scripts
//! expect instead of the generic error schema.

use std::fmt;

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{EMISSION_UNIT, EmissionError, Equivalents, calculate_co2};

use super::error::INTERNAL_ERROR_MESSAGE;

const NO_DATA_MESSAGE: &str = "No data provided";
const TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Endpoint directory returned by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiEndpoints {
    pub calculate_co2: String,
    pub search: String,
    pub health: String,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiStatus {
    #[schema(example = "online")]
    pub status: String,
    #[schema(example = "1.0")]
    pub api_version: String,
    pub endpoints: ApiEndpoints,
}

/// Report that the API is up and list its endpoints.
#[utoipa::path(
    get,
    path = "/api/status",
    tags = ["api"],
    security([]),
    responses((status = 200, description = "API online", body = ApiStatus))
)]
#[get("/api/status")]
pub async fn api_status() -> web::Json<ApiStatus> {
    web::Json(ApiStatus {
        status: "online".to_owned(),
        api_version: "1.0".to_owned(),
        endpoints: ApiEndpoints {
            calculate_co2: "/api/calculate-co2".to_owned(),
            search: "/search".to_owned(),
            health: "/health".to_owned(),
        },
    })
}

/// Calculator request.
///
/// `quantity` may be a JSON number or a numeric string and defaults to 0.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CalculationRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "beef")]
    pub food_type: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 2.0)]
    pub quantity: Option<Value>,
}

/// Successful calculator response.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CalculationResponse {
    pub success: bool,
    pub co2_emissions: f64,
    pub food_type: String,
    pub quantity: f64,
    #[schema(example = "kg CO2e")]
    pub unit: String,
    pub equivalents: Equivalents,
}

/// Failed calculator response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CalculationFailure {
    pub success: bool,
    pub error: String,
}

/// Calculator failure rendered in the `{success: false, error}` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationError {
    status: StatusCode,
    message: String,
}

impl CalculationError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ResponseError for CalculationError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(CalculationFailure {
            success: false,
            error: self.message.clone(),
        })
    }
}

impl From<EmissionError> for CalculationError {
    fn from(err: EmissionError) -> Self {
        match err {
            EmissionError::NonFiniteResult => {
                error!(error = %err, "Error in CO2 calculation");
                Self::internal()
            }
            other => Self::bad_request(other.to_string()),
        }
    }
}

/// JSON extractor settings for the API.
///
/// Oversized bodies answer 413 and unreadable ones 400, both in the
/// calculator envelope.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            let failure = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    warn!(path = req.path(), "JSON body too large");
                    CalculationError {
                        status: StatusCode::PAYLOAD_TOO_LARGE,
                        message: TOO_LARGE_MESSAGE.to_owned(),
                    }
                }
                other => {
                    warn!(path = req.path(), error = %other, "unreadable JSON body");
                    CalculationError::bad_request(NO_DATA_MESSAGE)
                }
            };
            failure.into()
        })
}

fn parse_food_type(raw: Option<&Value>) -> Result<&str, CalculationError> {
    match raw {
        Some(Value::String(food_type)) if !food_type.trim().is_empty() => Ok(food_type),
        _ => Err(EmissionError::MissingFoodType.into()),
    }
}

fn parse_quantity(raw: Option<&Value>) -> Result<f64, CalculationError> {
    let quantity = match raw {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    quantity.ok_or_else(|| EmissionError::InvalidQuantity.into())
}

/// Estimate the emissions of a food quantity.
#[utoipa::path(
    post,
    path = "/api/calculate-co2",
    tags = ["api"],
    security([]),
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Estimate", body = CalculationResponse),
        (status = 400, description = "Invalid input", body = CalculationFailure),
        (status = 413, description = "Body too large", body = CalculationFailure),
        (status = 500, description = "Internal server error", body = CalculationFailure)
    )
)]
#[post("/api/calculate-co2")]
pub async fn calculate(
    payload: web::Json<CalculationRequest>,
) -> Result<web::Json<CalculationResponse>, CalculationError> {
    let request = payload.into_inner();
    if request.food_type.is_none() && request.quantity.is_none() {
        return Err(CalculationError::bad_request(NO_DATA_MESSAGE));
    }
    let food_type = parse_food_type(request.food_type.as_ref())?;
    let quantity = parse_quantity(request.quantity.as_ref())?;

    let estimate = calculate_co2(food_type, quantity)?;
    Ok(web::Json(CalculationResponse {
        success: true,
        co2_emissions: estimate.co2_emissions(),
        food_type: estimate.food_type().to_owned(),
        quantity: estimate.quantity(),
        unit: EMISSION_UNIT.to_owned(),
        equivalents: estimate.equivalents(),
    }))
}
