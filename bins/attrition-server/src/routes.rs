use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use attrition_rs::{Attrition, AttritionError, KernelType, ScoringModel};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

#[derive(Clone)]
pub struct AppState {
    model: Arc<ScoringModel>,
    model_path: Arc<str>,
    scaler_path: Arc<str>,
}

impl AppState {
    pub fn new(model: ScoringModel, model_path: &Path, scaler_path: &Path) -> Self {
        Self {
            model: Arc::new(model),
            model_path: model_path.display().to_string().into(),
            scaler_path: scaler_path.display().to_string().into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_path: String,
    scaler_path: String,
    kernel: &'static str,
    support_vectors: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PredictResponse {
    #[serde(rename = "Attrition")]
    attrition: Attrition,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

/// A request failure mapped to an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    field: Option<&'static str>,
}

impl From<AttritionError> for ApiError {
    fn from(err: AttritionError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            field: err.field(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict_handler))
        .with_state(state)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Employee Attrition API Running",
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = state.model.classifier();
    Json(HealthResponse {
        status: "ok",
        model_path: state.model_path.to_string(),
        scaler_path: state.scaler_path.to_string(),
        kernel: kernel_name(classifier.kernel.kernel_type),
        support_vectors: classifier.support_vector_count(),
    })
}

fn kernel_name(kernel_type: KernelType) -> &'static str {
    match kernel_type {
        KernelType::Linear => "linear",
        KernelType::Polynomial => "polynomial",
        KernelType::Rbf => "rbf",
        KernelType::Sigmoid => "sigmoid",
    }
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Some(payload) = body.as_object() else {
        warn!("rejected predict request: body is not a JSON object");
        return Err(ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "request body must be a JSON object".to_string(),
            field: None,
        });
    };

    let started = Instant::now();
    match state.model.predict_json(payload) {
        Ok(attrition) => {
            debug!(
                label = %attrition,
                elapsed_us = started.elapsed().as_micros() as u64,
                "scored record"
            );
            Ok(Json(PredictResponse { attrition }))
        }
        Err(err) if err.is_client_error() => {
            warn!(field = err.field().unwrap_or("-"), "rejected predict request");
            Err(err.into())
        }
        Err(err) => {
            error!(error = %err, "scoring failed");
            Err(err.into())
        }
    }
}
