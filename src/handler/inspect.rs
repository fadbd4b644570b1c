// Request inspection endpoint

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Method, Response, StatusCode};

use crate::http;

/// `GET /`: echo method, path and every header back as plain text
///
/// Repeated headers are joined with `, ` on one line.
pub fn inspect(method: &Method, path: &str, headers: &HeaderMap) -> Response<Full<Bytes>> {
    let mut body = format!("The method is: {method}\r\nThe Url is: {path}\r\n\r\nHeaders:\r\n");

    let header_lines: String = headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{name}: {values}\r\n")
        })
        .collect();
    body.push_str(&header_lines);

    http::build_text_response(StatusCode::OK, body)
}
