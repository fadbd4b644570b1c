//! Employee endpoint handlers
//!
//! Each handler takes the shared state, touches the store under its lock
//! and returns either a finished response or an [`ApiError`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::employees::Employee;
use crate::error::{ApiError, ApiResult};
use crate::http;
use crate::logger;

/// `GET /employees`: one `name: position` line per record
pub async fn list(state: &AppState) -> Response<Full<Bytes>> {
    let employees = state.store.read().await.list();
    let body: String = employees
        .iter()
        .map(|e| format!("{}\r\n", e.summary_line()))
        .collect();
    http::build_text_response(StatusCode::OK, body)
}

/// `GET /employees?id=<n>`
pub async fn get(state: &AppState, query: Option<&str>) -> ApiResult<Response<Full<Bytes>>> {
    let id = http::parse_id(query).map_err(ApiError::InvalidId)?;
    let employee = state
        .store
        .read()
        .await
        .get_by_id(id)
        .ok_or(ApiError::NotFound(id))?;
    Ok(http::build_text_response(StatusCode::OK, employee.detail()))
}

/// `POST /employees`
pub async fn add(state: &AppState, body: &Bytes) -> ApiResult<Response<Full<Bytes>>> {
    let employee = decode_employee(body)?;
    if employee.id <= 0 {
        return Err(ApiError::NonPositiveId(employee.id));
    }

    let id = employee.id;
    let mut store = state.store.write().await;
    store.add(employee);
    logger::log_store_change("Added", id, store.len());

    Ok(http::build_text_response(
        StatusCode::CREATED,
        "Employee added successfully.".to_string(),
    ))
}

/// `PUT /employees`
///
/// Success is a 204, so the confirmation only goes to the log.
pub async fn update(state: &AppState, body: &Bytes) -> ApiResult<Response<Full<Bytes>>> {
    let employee = decode_employee(body)?;
    let id = employee.id;

    let mut store = state.store.write().await;
    if !store.update(employee) {
        return Err(ApiError::NotFound(id));
    }
    logger::log_store_change("Updated", id, store.len());

    Ok(http::build_empty_response(StatusCode::NO_CONTENT))
}

/// `DELETE /employees?id=<n>`
///
/// Authorization is checked before the id is even parsed.
pub async fn delete(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> ApiResult<Response<Full<Bytes>>> {
    state.authorizer.authorize(headers)?;
    let id = http::parse_id(query).map_err(ApiError::InvalidId)?;

    let mut store = state.store.write().await;
    if !store.delete(id) {
        return Err(ApiError::NotFound(id));
    }
    logger::log_store_change("Deleted", id, store.len());

    Ok(http::build_text_response(
        StatusCode::OK,
        "Employee is deleted successfully.".to_string(),
    ))
}

/// Decode a JSON employee; a literal `null` counts as a missing payload
fn decode_employee(body: &Bytes) -> ApiResult<Employee> {
    serde_json::from_slice::<Option<Employee>>(body)?.ok_or(ApiError::MissingPayload)
}
