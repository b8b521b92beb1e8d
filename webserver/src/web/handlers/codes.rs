//! Tuition code endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use registry::TuitionStore;
use shared::TuitionCode;

use crate::error::WebServerResult;
use crate::types::{AvailabilityResponse, NextCodeResponse, NormalizeRequest, NormalizeResponse};
use crate::webserver_impl::WebServer;

/// Preview the next code - GET /api/codes/next
///
/// The code is not reserved; a tuition posted afterwards may receive a
/// different one.
pub async fn next_code<S>(State(webserver): State<WebServer<S>>) -> Json<NextCodeResponse>
where
    S: TuitionStore + 'static,
{
    let allocation = webserver.registry().preview_next_code().await;
    Json(NextCodeResponse::from(allocation))
}

/// Check whether a code is free - GET /api/codes/:code/available
pub async fn code_available<S>(
    State(webserver): State<WebServer<S>>,
    Path(code): Path<String>,
) -> WebServerResult<Json<AvailabilityResponse>>
where
    S: TuitionStore + 'static,
{
    let code = TuitionCode::parse(&code)?;
    let available = webserver.registry().is_code_available(&code).await;
    Ok(Json(AvailabilityResponse {
        code: code.into_string(),
        available,
    }))
}

/// Normalize user input into an `ST` code - POST /api/codes/normalize
pub async fn normalize_code<S>(
    State(webserver): State<WebServer<S>>,
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> WebServerResult<Json<NormalizeResponse>>
where
    S: TuitionStore + 'static,
{
    let Json(request) = payload?;
    let code = webserver.registry().normalize_code(&request.input);
    Ok(Json(NormalizeResponse {
        input: request.input,
        code,
    }))
}
