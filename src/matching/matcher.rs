use crate::models::MockEndpoint;

use super::path::{self, ParsedPath};

/// Pick the endpoint that answers `method` on `request`.
///
/// `candidates` must be ordered most recently created first: the first
/// endpoint that matches wins, so a catch-all created after a narrower
/// definition for the same base path shadows it.
pub fn find_match<'a>(
    method: &str,
    request: &ParsedPath,
    candidates: &'a [MockEndpoint],
) -> Option<&'a MockEndpoint> {
    let method = method.to_ascii_uppercase();

    candidates
        .iter()
        .filter(|endpoint| endpoint.method == method)
        .find(|endpoint| matches(endpoint, request))
}

/// Same base path, and every stored query pair present in the request with
/// the same value. Extra request parameters are ignored.
pub fn matches(endpoint: &MockEndpoint, request: &ParsedPath) -> bool {
    let stored = path::parse(&endpoint.path);

    stored.base_path == request.base_path
        && stored
            .query
            .iter()
            .all(|(key, value)| request.query.get(key) == Some(value))
}
