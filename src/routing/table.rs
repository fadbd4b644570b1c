//! Route table module
//!
//! Maps (method, path, query) to an [`Endpoint`]. Routes are evaluated in
//! order and the first match wins.

use hyper::Method;

/// Handler a request is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Echo method, path and headers
    Inspect,
    ListEmployees,
    GetEmployee,
    AddEmployee,
    UpdateEmployee,
    DeleteEmployee,
    /// 302 to the employee listing
    Redirect,
}

/// Path matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRule {
    /// Path must equal the pattern
    Exact(&'static str),
    /// Path equals the pattern or continues it with a `/` segment
    Segment(&'static str),
}

impl PathRule {
    pub fn matches(self, path: &str) -> bool {
        match self {
            Self::Exact(pattern) => path == pattern,
            Self::Segment(pattern) => path
                .strip_prefix(pattern)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

/// Single entry of the route table
#[derive(Debug)]
pub struct Route {
    /// `None` accepts any method
    pub method: Option<Method>,
    pub path: PathRule,
    /// Query parameter that must be present for the route to match
    pub required_query: Option<&'static str>,
    pub endpoint: Endpoint,
}

impl Route {
    const fn new(method: Option<Method>, path: PathRule, endpoint: Endpoint) -> Self {
        Self {
            method,
            path,
            required_query: None,
            endpoint,
        }
    }

    const fn with_query(mut self, name: &'static str) -> Self {
        self.required_query = Some(name);
        self
    }

    fn accepts_method(&self, method: &Method) -> bool {
        self.method.as_ref().is_none_or(|m| m == method)
    }

    fn accepts_query(&self, query: Option<&str>) -> bool {
        self.required_query
            .is_none_or(|name| crate::http::query_param(query, name).is_some())
    }
}

/// Outcome of matching a request against the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Endpoint),
    /// Path is known but not for this method; carries the `Allow` header value
    MethodNotAllowed(String),
    NotFound,
}

/// Route table of the employee service
pub static ROUTES: [Route; 7] = [
    Route::new(Some(Method::GET), PathRule::Exact("/"), Endpoint::Inspect),
    Route::new(
        Some(Method::GET),
        PathRule::Segment("/employees"),
        Endpoint::GetEmployee,
    )
    .with_query("id"),
    Route::new(
        Some(Method::GET),
        PathRule::Segment("/employees"),
        Endpoint::ListEmployees,
    ),
    Route::new(
        Some(Method::POST),
        PathRule::Segment("/employees"),
        Endpoint::AddEmployee,
    ),
    Route::new(
        Some(Method::PUT),
        PathRule::Segment("/employees"),
        Endpoint::UpdateEmployee,
    ),
    Route::new(
        Some(Method::DELETE),
        PathRule::Segment("/employees"),
        Endpoint::DeleteEmployee,
    ),
    Route::new(None, PathRule::Segment("/redirection"), Endpoint::Redirect),
];

/// Find the endpoint for a request
pub fn match_route(method: &Method, path: &str, query: Option<&str>, routes: &[Route]) -> RouteMatch {
    let mut allowed: Vec<&Method> = Vec::new();

    for route in routes.iter().filter(|r| r.path.matches(path)) {
        if !route.accepts_method(method) {
            if let Some(m) = route.method.as_ref() {
                if !allowed.contains(&m) {
                    allowed.push(m);
                }
            }
            continue;
        }
        if route.accepts_query(query) {
            return RouteMatch::Found(route.endpoint);
        }
    }

    if allowed.is_empty() {
        RouteMatch::NotFound
    } else {
        let allow = allowed
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        RouteMatch::MethodNotAllowed(allow)
    }
}
