//! REST API handlers for tuitions

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use registry::TuitionStore;
use serde_json::{json, Value};
use shared::{NewTuition, Tuition, TuitionCode};

use crate::error::WebServerResult;
use crate::types::{StatusUpdateRequest, TuitionListResponse};
use crate::webserver_impl::WebServer;

/// Post a tuition - POST /api/tuitions
pub async fn create_tuition<S>(
    State(webserver): State<WebServer<S>>,
    payload: Result<Json<NewTuition>, JsonRejection>,
) -> WebServerResult<(StatusCode, Json<Tuition>)>
where
    S: TuitionStore + 'static,
{
    let Json(request) = payload?;
    let tuition = webserver.registry().create_tuition(request).await?;
    webserver.state().record_tuition_created();
    Ok((StatusCode::CREATED, Json(tuition)))
}

/// List tuitions - GET /api/tuitions
pub async fn list_tuitions<S>(
    State(webserver): State<WebServer<S>>,
) -> WebServerResult<Json<TuitionListResponse>>
where
    S: TuitionStore + 'static,
{
    let tuitions = webserver.registry().list_tuitions().await?;
    Ok(Json(TuitionListResponse {
        count: tuitions.len(),
        tuitions,
    }))
}

/// Look up a tuition - GET /api/tuitions/:code
pub async fn get_tuition<S>(
    State(webserver): State<WebServer<S>>,
    Path(code): Path<String>,
) -> WebServerResult<Json<Tuition>>
where
    S: TuitionStore + 'static,
{
    let code = TuitionCode::parse(&code)?;
    let tuition = webserver.registry().get_tuition(&code).await?;
    Ok(Json(tuition))
}

/// Change a tuition's status - PUT /api/tuitions/:code/status
pub async fn update_tuition_status<S>(
    State(webserver): State<WebServer<S>>,
    Path(code): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> WebServerResult<Json<Tuition>>
where
    S: TuitionStore + 'static,
{
    let code = TuitionCode::parse(&code)?;
    let Json(update) = payload?;
    let tuition = webserver.registry().update_status(&code, update.status).await?;
    Ok(Json(tuition))
}

/// Delete a tuition - DELETE /api/tuitions/:code
pub async fn delete_tuition<S>(
    State(webserver): State<WebServer<S>>,
    Path(code): Path<String>,
) -> WebServerResult<StatusCode>
where
    S: TuitionStore + 'static,
{
    let code = TuitionCode::parse(&code)?;
    webserver.registry().delete_tuition(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
pub async fn health_check<S>(State(webserver): State<WebServer<S>>) -> Json<Value>
where
    S: TuitionStore + 'static,
{
    let state = webserver.state();
    let (store_reachable, tuition_count) = match webserver.registry().count().await {
        Ok(count) => (true, Some(count)),
        Err(_) => (false, None),
    };

    Json(json!({
        "status": if store_reachable { "healthy" } else { "degraded" },
        "uptime_seconds": state.get_uptime_seconds(),
        "tuitions_created": state.get_tuitions_created(),
        "tuition_count": tuition_count,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
