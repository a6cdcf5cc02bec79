//! Metrics for Looker API calls.
//!
//! Recorded through the `metrics` facade:
//! - Request latency histograms
//! - Request and error counters
//! - Query cache hits and misses
//!
//! # What this module does NOT handle:
//! - Exposition (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - Labels are always `endpoint`, `method`, `status` and `error_category`.
//! - Recording is a no-op when no recorder is installed.

use std::time::Duration;

use crate::error::ClientError;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "looker_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "looker_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "looker_api_errors_total";

/// Metric name for query cache hit counter.
pub const METRIC_CACHE_HITS: &str = "looker_query_cache_hits_total";

/// Metric name for query cache miss counter.
pub const METRIC_CACHE_MISSES: &str = "looker_query_cache_misses_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS and other transport failures
    Transport,
    Http4xx,
    Http5xx,
    /// Login or token problems
    Auth,
    /// Malformed response body
    Decode,
    Timeout,
    Tls,
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Tls => "tls",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::ConnectionRefused(_) => ErrorCategory::Transport,
            ClientError::TlsError(_) => ErrorCategory::Tls,
            ClientError::AuthFailed(_) | ClientError::Unauthorized(_) => ErrorCategory::Auth,
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            ClientError::NotFound(_) => ErrorCategory::Http4xx,
            ClientError::ApiError { status, .. } => match status {
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Unknown,
            },
            ClientError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(_) | ClientError::InvalidUrl(_) => ErrorCategory::Unknown,
        }
    }
}

/// Record one finished request attempt.
///
/// `status` is `None` when no response arrived.
pub fn record_request(endpoint: &str, method: &str, duration: Duration, status: Option<u16>) {
    let status_label = status.map_or("error".to_string(), |s| s.to_string());

    metrics::counter!(METRIC_REQUESTS_TOTAL,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
    )
    .increment(1);

    metrics::histogram!(METRIC_REQUEST_DURATION,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status_label,
    )
    .record(duration.as_secs_f64());
}

pub fn record_client_error(endpoint: &str, method: &str, error: &ClientError) {
    metrics::counter!(METRIC_ERRORS_TOTAL,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "error_category" => ErrorCategory::from(error).as_str(),
    )
    .increment(1);
}

/// Record whether an inline query was answered from the cache.
pub fn record_cache_lookup(hit: bool) {
    if hit {
        metrics::counter!(METRIC_CACHE_HITS).increment(1);
    } else {
        metrics::counter!(METRIC_CACHE_MISSES).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_error_categorization() {
        let timeout = ClientError::Timeout("https://looker.example.com".to_string());
        assert_eq!(ErrorCategory::from(&timeout), ErrorCategory::Timeout);

        let refused = ClientError::ConnectionRefused("looker.example.com:19999".to_string());
        assert_eq!(ErrorCategory::from(&refused), ErrorCategory::Transport);

        let api = |status| ClientError::ApiError {
            status,
            url: "lookml_models".to_string(),
            message: "nope".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api(422)), ErrorCategory::Http4xx);
        assert_eq!(ErrorCategory::from(&api(503)), ErrorCategory::Http5xx);
        assert_eq!(ErrorCategory::from(&api(302)), ErrorCategory::Unknown);

        let auth = ClientError::AuthFailed("bad secret".to_string());
        assert_eq!(ErrorCategory::from(&auth).as_str(), "auth");
    }

    #[test]
    fn test_request_and_error_metrics_are_labeled() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_request("lookml_models", "GET", Duration::from_millis(12), Some(200));
            record_request("queries/run/json", "POST", Duration::from_millis(3), None);
            record_client_error(
                "queries/run/json",
                "POST",
                &ClientError::ConnectionRefused("looker.example.com".to_string()),
            );
        });

        let rendered = handle.render();
        assert!(rendered.contains(METRIC_REQUEST_DURATION));
        assert!(rendered.contains(r#"endpoint="lookml_models""#));
        assert!(rendered.contains(r#"status="error""#));
        assert!(rendered.contains(r#"error_category="transport""#));
    }
}
