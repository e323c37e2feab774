//! HTTP response building module
//!
//! Provides builders for the status code responses the site produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 405 Method Not Allowed response listing the permitted methods
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", allow)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(allow: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large")
}

/// Build health check response
pub fn build_health_response(body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build plain text response with the given status
pub fn build_text_response(status: StatusCode, text: impl Into<String>) -> Response<Full<Bytes>> {
    let text = text.into();
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(text.clone())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build compact JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from_static(
                    br#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build success response with cache control
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    cache_control: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Stamp the `Server` header onto a finished response
pub fn with_server_header(mut resp: Response<Full<Bytes>>, server_name: &str) -> Response<Full<Bytes>> {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            resp.headers_mut().insert(SERVER, value);
        }
        Err(e) => log_build_error("Server header", &e),
    }
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &impl std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Body;

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response("POST, OPTIONS");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "POST, OPTIONS");
    }

    #[test]
    fn test_options_cors_headers() {
        let plain = build_options_response("GET, HEAD, OPTIONS", false);
        assert_eq!(plain.status(), StatusCode::NO_CONTENT);
        assert!(plain.headers().get("Access-Control-Allow-Origin").is_none());

        let cors = build_options_response("GET, HEAD, OPTIONS", true);
        assert_eq!(cors.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            cors.headers()["Access-Control-Allow-Methods"],
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn test_html_head_has_length_but_no_body() {
        let resp = build_html_response("<p>hi</p>".to_string(), true);
        assert_eq!(resp.headers()["Content-Length"], "9");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_json_response_is_compact() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({"a": 1}));
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.body().size_hint().exact(), Some(7));
    }

    #[test]
    fn test_server_header() {
        let resp = with_server_header(build_404_response(), "portfolio-site");
        assert_eq!(resp.headers()[SERVER], "portfolio-site");
    }
}
