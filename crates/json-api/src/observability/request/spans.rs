//! Low-cardinality names for request spans and metric labels.

/// Shared label for requests no route matched.
pub(super) const UNMATCHED_ROUTE: &str = "unmatched";

/// Turns salvo's matched path (`api/product/{product}`) into a route label.
/// Paths that matched nothing collapse into [`UNMATCHED_ROUTE`].
pub(super) fn route_label(matched_path: &str, path: &str) -> String {
    if !matched_path.is_empty() {
        format!("/{matched_path}")
    } else if path == "/" {
        "/".to_owned()
    } else {
        UNMATCHED_ROUTE.to_owned()
    }
}

pub(super) fn span_name(method: &str, route: &str) -> String {
    format!("{method} {route}")
}
