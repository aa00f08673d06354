//! HTTP span helpers.

use uuid::Uuid;

/// Route label with identifiers collapsed, e.g. `GET /api/products/{id}`.
#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_path(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        normalised.push('/');

        if previous == "products" || looks_like_id(segment) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

fn looks_like_id(segment: &str) -> bool {
    let numeric = !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit());
    let object_id = segment.len() == 24 && segment.bytes().all(|byte| byte.is_ascii_hexdigit());

    numeric || object_id || Uuid::parse_str(segment).is_ok()
}
