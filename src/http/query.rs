//! Query string helpers

/// Raw value of the first `name=value` pair in `query`
///
/// A bare `name` (no `=`) yields an empty value. No percent-decoding is done;
/// the only consumer parses integers.
pub fn query_param<'a>(query: Option<&'a str>, name: &str) -> Option<&'a str> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then_some(value)
    })
}

/// Parse the `id` query parameter
///
/// `Err` carries the raw value (or `None` when the parameter is absent).
pub fn parse_id(query: Option<&str>) -> Result<i32, Option<String>> {
    let raw = query_param(query, "id").ok_or(None)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| Some(raw.to_string()))
}
