//! Request matching: turning a stored `path` and an incoming request into
//! comparable base paths and query maps, then picking the endpoint to serve.

pub mod matcher;
pub mod path;

pub use matcher::find_match;
pub use path::{ParsedPath, QueryParams, parse, parse_query};
