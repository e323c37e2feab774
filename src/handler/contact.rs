//! Contact form handler
//!
//! Accepts any well-formed JSON document and answers with a fixed
//! acknowledgment. The submission is parsed and dropped: nothing is stored,
//! forwarded or echoed back.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{Request, Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::error::{Result, SiteError};
use crate::http::{self, mime};
use crate::logger;

/// Thank-you text returned for every accepted submission
pub const THANK_YOU_MESSAGE: &str = "Thank you for reaching out! I'll get back to you soon. 😊";

/// Acknowledgment body; serialized as `{"status":"success","message":...}`
#[derive(Debug, Serialize)]
pub struct ContactAck {
    pub status: &'static str,
    pub message: &'static str,
}

impl ContactAck {
    pub const fn success() -> Self {
        Self {
            status: "success",
            message: THANK_YOU_MESSAGE,
        }
    }
}

/// Handle `POST /contact`
pub async fn handle_contact<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    check_content_type(&req)?;

    let limit = state.config.http.max_body_size;
    let body = read_body(req.into_body(), limit).await?;

    // Parsed only to prove it is well-formed JSON, then discarded
    let _: serde_json::Value = serde_json::from_slice(&body)?;

    logger::log_debug(&format!("Contact submission accepted ({} bytes)", body.len()));

    Ok(http::build_json_response(StatusCode::OK, &ContactAck::success()))
}

/// Reject bodies explicitly labelled as something other than JSON
///
/// A missing `Content-Type` is tolerated; the body still has to parse.
fn check_content_type<B>(req: &Request<B>) -> Result<()> {
    let Some(value) = req.headers().get(CONTENT_TYPE) else {
        return Ok(());
    };
    let content_type = value.to_str().unwrap_or_default();
    if mime::is_json_content_type(content_type) {
        Ok(())
    } else {
        Err(SiteError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        })
    }
}

/// Collect the request body, failing once it exceeds `limit` bytes
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(SiteError::PayloadTooLarge { limit })
        }
        Err(e) => Err(SiteError::BodyRead {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        let mut cfg = Config::load_from("does/not/exist/config").unwrap();
        cfg.http.max_body_size = 64;
        AppState::new(&cfg)
    }

    fn post(body: &'static str, content_type: Option<&str>) -> Request<Full<Bytes>> {
        let mut builder = Request::builder().method("POST").uri("/contact");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Full::new(Bytes::from_static(body.as_bytes()))).unwrap()
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const EXPECTED: &str = r#"{"status":"success","message":"Thank you for reaching out! I'll get back to you soon. 😊"}"#;

    #[tokio::test]
    async fn test_ack_for_full_submission() {
        let req = post(
            r#"{"name":"Test","email":"a@b.com","message":"hi"}"#,
            Some("application/json"),
        );
        let resp = handle_contact(req, &state()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_of(resp).await, EXPECTED);
    }

    #[tokio::test]
    async fn test_ack_for_empty_object() {
        let resp = handle_contact(post("{}", Some("application/json")), &state())
            .await
            .unwrap();
        assert_eq!(body_of(resp).await, EXPECTED);
    }

    #[tokio::test]
    async fn test_submission_not_echoed() {
        let req = post(r#"{"message":"secret-token-123"}"#, None);
        let resp = handle_contact(req, &state()).await.unwrap();
        assert!(!body_of(resp).await.contains("secret-token-123"));
    }

    #[tokio::test]
    async fn test_non_object_json_accepted() {
        let resp = handle_contact(post("[1, 2, 3]", Some("application/json")), &state())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let err = handle_contact(post("{\"name\":", Some("application/json")), &state())
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::InvalidPayload(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let err = handle_contact(post("", Some("application/json")), &state())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_form_encoding_rejected() {
        let err = handle_contact(
            post("name=Test", Some("application/x-www-form-urlencoded")),
            &state(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let big = r#"{"message":"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}"#;
        let err = handle_contact(post(big, Some("application/json")), &state())
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::PayloadTooLarge { limit: 64 }));
    }
}
