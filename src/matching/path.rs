use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Decoded query parameters. Keys are unique; the last occurrence wins.
pub type QueryParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub base_path: String,
    pub query: QueryParams,
}

impl ParsedPath {
    /// Build from an already split request URI, as handed out by the HTTP layer.
    pub fn from_parts(base_path: &str, query: Option<&str>) -> Self {
        Self {
            base_path: base_path.to_string(),
            query: query.map(parse_query).unwrap_or_default(),
        }
    }
}

/// Split a raw path on the first `?` into a base path and its query parameters.
///
/// Never fails: malformed escapes are decoded leniently so that a bad query
/// string cannot keep an endpoint from matching.
pub fn parse(raw: &str) -> ParsedPath {
    match raw.split_once('?') {
        Some((base_path, query)) => ParsedPath {
            base_path: base_path.to_string(),
            query: parse_query(query),
        },
        None => ParsedPath {
            base_path: raw.to_string(),
            query: QueryParams::new(),
        },
    }
}

/// Parse `a=1&b=2` style query strings.
///
/// Tokens without a key are skipped, tokens without `=` get an empty value.
/// `+` is kept literally.
pub fn parse_query(query: &str) -> QueryParams {
    let mut params = QueryParams::new();

    for token in query.split('&') {
        let (key, value) = token.split_once('=').unwrap_or((token, ""));
        if key.is_empty() {
            continue;
        }
        params.insert(decode(key), decode(value));
    }

    params
}

/// Percent-decode, falling back to the raw text if the result is not UTF-8.
fn decode(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}
