//! W3C trace context carried on incoming requests.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Request headers seen through the propagator's [`Extractor`] interface.
#[derive(Debug, Clone, Copy)]
struct TraceHeaders<'a>(&'a HeaderMap);

impl Extractor for TraceHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// The caller's span when the request carries a valid `traceparent`.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract(propagator, headers))
}

fn extract(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // An empty base keeps header-less requests from adopting the in-process span.
    let context = propagator.extract_with_context(&Context::new(), &TraceHeaders(headers));
    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::TraceId;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn headers(traceparent: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(value) = traceparent {
            headers.insert("traceparent", HeaderValue::from_static(value));
        }

        headers
    }

    #[test]
    fn valid_traceparent_becomes_the_parent() {
        let context = extract(&TraceContextPropagator::new(), &headers(Some(TRACEPARENT)));

        let trace_id = context.map(|context| context.span().span_context().trace_id());

        assert_eq!(
            trace_id,
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").ok()
        );
    }

    #[test]
    fn missing_or_garbled_traceparent_is_ignored() {
        let propagator = TraceContextPropagator::new();

        assert!(extract(&propagator, &headers(None)).is_none());
        assert!(extract(&propagator, &headers(Some("00-not-a-trace-01"))).is_none());
    }
}
