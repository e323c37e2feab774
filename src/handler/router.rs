//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! method validation and dispatching to the page, contact and asset handlers.

use crate::config::{AppState, Config};
use crate::error::SiteError;
use crate::handler::{contact, home, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context for handlers that only need request metadata
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Routes known to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Contact,
    Asset,
    Health,
    NotFound,
}

impl Route {
    /// Match a request path against the site's routes
    pub fn resolve(path: &str, config: &Config) -> Self {
        if config.health.enabled
            && (path == config.health.liveness_path || path == config.health.readiness_path)
        {
            return Self::Health;
        }

        match path {
            "/" => Self::Home,
            "/contact" => Self::Contact,
            p if p.starts_with(static_files::STATIC_PREFIX) => Self::Asset,
            _ => Self::NotFound,
        }
    }

    /// Value of the `Allow` header for this route
    pub const fn allow(self) -> &'static str {
        match self {
            Self::Contact => "POST, OPTIONS",
            Self::Home | Self::Asset | Self::Health | Self::NotFound => "GET, HEAD, OPTIONS",
        }
    }

    fn permits(self, method: &Method) -> bool {
        match self {
            Self::Contact => method == Method::POST,
            Self::Home | Self::Asset | Self::Health => {
                method == Method::GET || method == Method::HEAD
            }
            Self::NotFound => false,
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails at the service level: handler errors become error responses.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    logger::log_debug(&format!(
        "{} {} {:?}",
        req.method(),
        req.uri(),
        req.version()
    ));
    logger::log_headers_count(
        req.headers().len(),
        state.config.logging.show_headers || state.debug(),
    );

    let response = match dispatch(req, &state).await {
        Ok(resp) => resp,
        Err(err) => {
            if err.is_server_error() {
                logger::log_error(&err.to_string());
            } else {
                logger::log_debug(&format!("Rejected request: {err}"));
            }
            err.into_response(state.debug())
        }
    };

    Ok(http::with_server_header(
        response,
        &state.config.http.server_name,
    ))
}

async fn dispatch<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, SiteError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let route = Route::resolve(&path, &state.config);

    if route == Route::NotFound {
        return Ok(http::build_404_response());
    }

    if method == Method::OPTIONS {
        return Ok(http::build_options_response(
            route.allow(),
            state.config.http.enable_cors,
        ));
    }

    if !route.permits(&method) {
        logger::log_warning(&format!("Method not allowed: {method} {path}"));
        return Ok(http::build_405_response(route.allow()));
    }

    check_body_size(&req, state.config.http.max_body_size)?;

    let is_head = method == Method::HEAD;
    match route {
        Route::Home => home::handle_home(is_head),
        Route::Contact => contact::handle_contact(req, state).await,
        Route::Asset => {
            let ctx = RequestContext {
                path: &path,
                is_head,
                if_none_match: req
                    .headers()
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            Ok(static_files::serve_asset(
                &ctx,
                &state.config.assets.dir,
                &state.asset_cache_control,
            )
            .await)
        }
        Route::Health => Ok(http::build_health_response("ok")),
        Route::NotFound => Ok(http::build_404_response()),
    }
}

/// Validate Content-Length header before reading any body
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Result<(), SiteError> {
    let Some(content_length) = req.headers().get("content-length") else {
        return Ok(());
    };
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Err(SiteError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Ok(_) => Ok(()),
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_TYPE, SERVER};
    use hyper::StatusCode;

    fn state() -> Arc<AppState> {
        let cfg = Config::load_from("does/not/exist/config").unwrap();
        Arc::new(AppState::new(&cfg))
    }

    fn request(method: &str, uri: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    async fn send(req: Request<Full<Bytes>>, state: &Arc<AppState>) -> (StatusCode, String) {
        let resp = handle_request(req, Arc::clone(state)).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_route_resolution() {
        let cfg = Config::load_from("does/not/exist/config").unwrap();
        assert_eq!(Route::resolve("/", &cfg), Route::Home);
        assert_eq!(Route::resolve("/contact", &cfg), Route::Contact);
        assert_eq!(Route::resolve("/static/js/main.js", &cfg), Route::Asset);
        assert_eq!(Route::resolve("/healthz", &cfg), Route::Health);
        assert_eq!(Route::resolve("/readyz", &cfg), Route::Health);
        assert_eq!(Route::resolve("/contact/", &cfg), Route::NotFound);
        assert_eq!(Route::resolve("/static", &cfg), Route::NotFound);
    }

    #[test]
    fn test_health_route_can_be_disabled() {
        let mut cfg = Config::load_from("does/not/exist/config").unwrap();
        cfg.health.enabled = false;
        assert_eq!(Route::resolve("/healthz", &cfg), Route::NotFound);
    }

    #[tokio::test]
    async fn test_home_page() {
        let state = state();
        let (status, body) = send(request("GET", "/?utm=ignored", ""), &state).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Vaishavi P Rao"));
        for title in [
            "First Portrait Session",
            "Fitness Progress Photos",
            "Personal Blog",
            "Fashion Practice Shoot",
            "Collaboration Shoots",
            "My Words",
        ] {
            assert!(body.contains(title), "missing {title}");
        }
    }

    #[tokio::test]
    async fn test_home_preserves_order() {
        let state = state();
        let (_, body) = send(request("GET", "/", ""), &state).await;
        let positions: Vec<usize> = ["Student Modeling", "Creative Writing", "Fitness Journey"]
            .iter()
            .map(|t| body.find(t).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let positions: Vec<usize> = crate::content::portfolio_data()
            .achievements
            .iter()
            .map(|a| body.find(&crate::templates::escape_html(&a.label)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_contact_scenarios() {
        let state = state();
        let expected = r#"{"status":"success","message":"Thank you for reaching out! I'll get back to you soon. 😊"}"#;

        let (status, body) = send(
            request(
                "POST",
                "/contact",
                r#"{"name":"Test","email":"a@b.com","message":"hi"}"#,
            ),
            &state,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);

        let (status, body) = send(request("POST", "/contact", "{}"), &state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_contact_not_persisted() {
        let state = state();
        send(
            request("POST", "/contact", r#"{"message":"remember-me-42"}"#),
            &state,
        )
        .await;
        let (_, home) = send(request("GET", "/", ""), &state).await;
        assert!(!home.contains("remember-me-42"));
    }

    #[tokio::test]
    async fn test_malformed_contact_is_client_error() {
        let state = state();
        let (status, body) = send(request("POST", "/contact", "not json"), &state).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains(r#""status":"error""#));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let state = state();
        let resp = handle_request(request("GET", "/contact", ""), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "POST, OPTIONS");

        let resp = handle_request(request("DELETE", "/", ""), state).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_options_and_not_found() {
        let state = state();
        let resp = handle_request(request("OPTIONS", "/contact", ""), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let (status, _) = send(request("GET", "/admin", ""), &state).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_declared_oversize_rejected() {
        let state = state();
        let req = Request::builder()
            .method("POST")
            .uri("/contact")
            .header(CONTENT_TYPE, "application/json")
            .header("content-length", "10000000")
            .body(Full::new(Bytes::from_static(b"{}")))
            .unwrap();
        let (status, _) = send(req, &state).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_front_end_assets_served() {
        let state = state();
        let resp = handle_request(
            request("GET", "/static/images/placeholder.svg", ""),
            Arc::clone(&state),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "image/svg+xml");

        let (status, script) = send(request("GET", "/static/js/main.js", ""), &state).await;
        assert_eq!(status, StatusCode::OK);
        for needle in ["openLightbox", "closeLightbox", "placeholder.svg", "'Escape'"] {
            assert!(script.contains(needle), "missing {needle}");
        }
    }

    #[tokio::test]
    async fn test_health_and_server_header() {
        let state = state();
        let resp = handle_request(request("GET", "/healthz", ""), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[SERVER], "portfolio-site");
    }
}
