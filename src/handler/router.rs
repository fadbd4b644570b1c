//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size check, route table
//! lookup, endpoint dispatch, error mapping and access logging.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::http::request::Parts;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::{employees, inspect};
use crate::config::AppState;
use crate::error::{ApiError, ApiResult};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Endpoint, RouteMatch};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let mut response = match check_body_size(&parts, state.config.http.max_body_size) {
        Err(err) => error_response(&parts, &err),
        Ok(()) => route_request(&parts, body, &state).await,
    };

    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if state.access_log_enabled() {
        log_access(&parts, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Reject requests whose declared `Content-Length` exceeds the limit
fn check_body_size(parts: &Parts, max_body_size: u64) -> ApiResult<()> {
    let Some(content_length) = parts.headers.get("content-length") else {
        return Ok(());
    };
    match content_length.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => Err(ApiError::PayloadTooLarge(max_body_size)),
        Some(_) => Ok(()),
        None => {
            logger::log_warning("Invalid Content-Length header, skipping size check");
            Ok(())
        }
    }
}

/// Look the request up in the route table and run the matching endpoint
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let path = parts.uri.path();
    let query = parts.uri.query();

    match routing::match_route(&parts.method, path, query, &routing::ROUTES) {
        RouteMatch::Found(endpoint) => dispatch_endpoint(endpoint, parts, body, state)
            .await
            .unwrap_or_else(|err| error_response(parts, &err)),
        RouteMatch::MethodNotAllowed(allow) => http::build_405_response(&allow),
        RouteMatch::NotFound => http::build_404_response(),
    }
}

async fn dispatch_endpoint<B>(
    endpoint: Endpoint,
    parts: &Parts,
    body: B,
    state: &AppState,
) -> ApiResult<Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let query = parts.uri.query();

    match endpoint {
        Endpoint::Inspect => Ok(inspect::inspect(
            &parts.method,
            parts.uri.path(),
            &parts.headers,
        )),
        Endpoint::ListEmployees => Ok(employees::list(state).await),
        Endpoint::GetEmployee => employees::get(state, query).await,
        Endpoint::AddEmployee => {
            let bytes = read_body(body, state.config.http.max_body_size).await?;
            employees::add(state, &bytes).await
        }
        Endpoint::UpdateEmployee => {
            let bytes = read_body(body, state.config.http.max_body_size).await?;
            employees::update(state, &bytes).await
        }
        Endpoint::DeleteEmployee => employees::delete(state, &parts.headers, query).await,
        Endpoint::Redirect => Ok(http::build_redirect_response("/employees")),
    }
}

/// Collect the whole body, enforcing the size limit for chunked uploads too
async fn read_body<B>(body: B, max_body_size: u64) -> ApiResult<Bytes>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ApiError::PayloadTooLarge(max_body_size)),
        Err(e) => Err(ApiError::BodyRead(e.to_string())),
    }
}

fn error_response(parts: &Parts, err: &ApiError) -> Response<Full<Bytes>> {
    logger::log_warning(&format!(
        "{} {} -> {}: {err}",
        parts.method,
        parts.uri,
        err.status().as_u16()
    ));
    http::build_error_response(err)
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthError, Authorizer};
    use crate::config::Config;
    use crate::employees::EmployeeStore;
    use hyper::header::HeaderMap;
    use hyper::{Method, StatusCode};

    fn test_state() -> Arc<AppState> {
        let mut cfg = Config::load_from("does-not-exist/employee-server").unwrap();
        cfg.logging.access_log = false;
        cfg.http.max_body_size = 1024;
        Arc::new(AppState::new(&cfg))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("host", "localhost")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    fn authorized(method: Method, uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", "frank")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn send(state: &Arc<AppState>, req: Request<Full<Bytes>>) -> (StatusCode, String) {
        let resp = handle_request(req, Arc::clone(state), peer()).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_inspect_root() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("The method is: GET"));
        assert!(body.contains("The Url is: /"));
        assert!(body.contains("host: localhost"));
    }

    #[tokio::test]
    async fn test_list_seeded_employees_in_order() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/employees", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "John Doe: Engineer\r\nJane Smith: Manager\r\nSam Brown: Technician\r\n"
        );
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/employees?id=2", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Name: Jane Smith\r\nPosition: Manager\r\nSalary: 75000\r\n");

        let (status, body) = send(&state, request(Method::GET, "/employees?id=9", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Employee not found.");
    }

    #[tokio::test]
    async fn test_get_with_non_numeric_id_is_bad_request() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/employees?id=abc", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid employee id.");
        assert_eq!(state.store.read().await.len(), 3);
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                Method::POST,
                "/employees",
                r#"{"id":4,"name":"X","position":"Y","salary":1}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Employee added successfully.");

        let (status, body) = send(&state, request(Method::GET, "/employees?id=4", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Name: X\r\nPosition: Y\r\nSalary: 1\r\n");
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_id() {
        let state = test_state();
        let (status, _) = send(
            &state,
            request(
                Method::POST,
                "/employees",
                r#"{"id":0,"name":"X","position":"Y","salary":1}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.store.read().await.len(), 3);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_payloads_without_leaking_detail() {
        let state = test_state();
        for body in ["{not json", "null", "", r#"{"id":5,"name":"X"}"#] {
            let (status, text) = send(&state, request(Method::POST, "/employees", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(text, "Invalid employee payload.", "{body}");
        }
        assert_eq!(state.store.read().await.len(), 3);
    }

    #[tokio::test]
    async fn test_add_accepts_duplicate_id() {
        let state = test_state();
        let (status, _) = send(
            &state,
            request(
                Method::POST,
                "/employees",
                r#"{"id":1,"name":"Twin","position":"Copy","salary":5}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.store.read().await.len(), 4);
    }

    #[tokio::test]
    async fn test_update_existing() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                Method::PUT,
                "/employees",
                r#"{"id":3,"name":"Sam Brown","position":"Lead","salary":65000}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let updated = state.store.read().await.get_by_id(3).unwrap();
        assert_eq!(updated.position, "Lead");
        assert!((updated.salary - 65000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_unchanged() {
        let state = test_state();
        let before = state.store.read().await.list();
        let (status, body) = send(
            &state,
            request(
                Method::PUT,
                "/employees",
                r#"{"id":42,"name":"N","position":"P","salary":1}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Employee not found.");
        assert_eq!(state.store.read().await.list(), before);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_json() {
        let state = test_state();
        let (status, _) = send(&state, request(Method::PUT, "/employees", "[1,2]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_requires_authorization() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::DELETE, "/employees?id=1", "")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "You are not authorized to delete.");
        assert!(state.store.read().await.get_by_id(1).is_some());

        let wrong = Request::builder()
            .method(Method::DELETE)
            .uri("/employees?id=1")
            .header("Authorization", "bob")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, _) = send(&state, wrong).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.store.read().await.get_by_id(1).is_some());
    }

    #[tokio::test]
    async fn test_delete_authorized() {
        let state = test_state();
        let (status, body) = send(&state, authorized(Method::DELETE, "/employees?id=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Employee is deleted successfully.");

        let (status, _) = send(&state, request(Method::GET, "/employees?id=1", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&state, authorized(Method::DELETE, "/employees?id=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Employee not found.");
    }

    #[tokio::test]
    async fn test_delete_with_bad_id() {
        let state = test_state();
        for uri in ["/employees", "/employees?id=", "/employees?id=one"] {
            let (status, body) = send(&state, authorized(Method::DELETE, uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, "Invalid employee id.");
        }
        assert_eq!(state.store.read().await.len(), 3);
    }

    #[tokio::test]
    async fn test_custom_authorizer_is_consulted() {
        struct DenyAll;
        impl Authorizer for DenyAll {
            fn authorize(&self, _headers: &HeaderMap) -> Result<(), AuthError> {
                Err(AuthError::Rejected)
            }
        }

        let cfg = Config::load_from("does-not-exist/employee-server").unwrap();
        let state = Arc::new(AppState::with_parts(
            &cfg,
            EmployeeStore::seeded(),
            Arc::new(DenyAll),
        ));
        let (status, _) = send(&state, authorized(Method::DELETE, "/employees?id=1")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_redirection_for_any_method() {
        let state = test_state();
        for method in [Method::GET, Method::POST, Method::PUT] {
            let resp = handle_request(request(method, "/redirection", ""), Arc::clone(&state), peer())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(resp.headers()["location"], "/employees");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_empty_404() {
        let state = test_state();
        let (status, body) = send(&state, request(Method::GET, "/nowhere", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_method_on_known_path() {
        let state = test_state();
        let resp = handle_request(
            request(Method::PATCH, "/employees", ""),
            Arc::clone(&state),
            peer(),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, POST, PUT, DELETE");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let state = test_state();
        let big = format!(
            r#"{{"id":9,"name":"{}","position":"P","salary":1}}"#,
            "x".repeat(2048)
        );

        // Declared length over the limit
        let req = Request::builder()
            .method(Method::POST)
            .uri("/employees")
            .header("content-length", big.len().to_string())
            .body(Full::new(Bytes::from(big.clone())))
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        // No declared length, caught while reading
        let (status, _) = send(&state, request(Method::POST, "/employees", &big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(state.store.read().await.len(), 3);
    }

    #[tokio::test]
    async fn test_server_header() {
        let state = test_state();
        let resp = handle_request(request(Method::GET, "/", ""), Arc::clone(&state), peer())
            .await
            .unwrap();
        assert_eq!(resp.headers()["server"], "employee-server");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_and_deletes_on_shared_state() {
        let state = test_state();
        let mut tasks = Vec::new();

        for id in 100..150 {
            let state = Arc::clone(&state);
            tasks.push(tokio::spawn(async move {
                let body = format!(r#"{{"id":{id},"name":"N{id}","position":"P","salary":1}}"#);
                send(&state, request(Method::POST, "/employees", &body)).await
            }));
        }
        for id in 1..=3 {
            let state = Arc::clone(&state);
            tasks.push(tokio::spawn(async move {
                send(&state, authorized(Method::DELETE, &format!("/employees?id={id}"))).await
            }));
        }

        for task in tasks {
            let (status, _) = task.await.unwrap();
            assert!(status == StatusCode::CREATED || status == StatusCode::OK);
        }

        let store = state.store.read().await;
        assert_eq!(store.len(), 50);
        let mut ids: Vec<i32> = store.list().into_iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (100..150).collect::<Vec<_>>());
    }
}
