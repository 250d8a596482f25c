use std::collections::HashMap;

use axum::{
    Json,
    extract::{RawQuery, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use distill_core::{ArticleData, DistillError, ExtractionRequest, ExtractionResponse, Result, validate};
use url::form_urlencoded;

use crate::app::AppState;

/// Envelope plus status, rendered as JSON.
///
/// Successful responses carry the shared-cache directive; failures carry none.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ExtractionResponse,
}

impl From<Result<ArticleData>> for ApiResponse {
    fn from(result: Result<ArticleData>) -> Self {
        let (status, body) = ExtractionResponse::from_result(result);
        Self { status, body }
    }
}

impl From<DistillError> for ApiResponse {
    fn from(err: DistillError) -> Self {
        Self::from(Err(err))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let cache_control = self.body.cache_control();
        let mut response = (self.status, Json(self.body)).into_response();

        if let Some(value) = cache_control {
            response.headers_mut().insert(header::CACHE_CONTROL, HeaderValue::from_static(value));
        }

        response
    }
}

/// Extraction endpoint
///
/// Registered for every method so that non-GET requests get the JSON 405
/// envelope rather than the router's empty one.
pub async fn extract_handler(State(state): State<AppState>, method: Method, RawQuery(query): RawQuery) -> ApiResponse {
    let params = query_params(query.as_deref());

    let result = match validate(method.as_str(), &params) {
        Ok(request) => run_with_timeout(&state, &request).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        let status = err.status_code().as_u16();
        if err.is_client_error() {
            tracing::warn!(status, error = %err, "extraction request failed");
        } else {
            tracing::error!(status, error = %err, "extraction request failed");
        }
    }

    ApiResponse::from(result)
}

/// Runs the pipeline, failing with [`DistillError::Timeout`] once the request lifetime is spent.
async fn run_with_timeout(state: &AppState, request: &ExtractionRequest) -> Result<ArticleData> {
    let timeout = state.request_timeout;

    tokio::time::timeout(timeout, state.pipeline.run(request))
        .await
        .unwrap_or_else(|_| Err(DistillError::Timeout { timeout: timeout.as_secs() }))
}

/// Decodes a raw query string. The first occurrence of a key wins.
fn query_params(raw: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }

    params
}
