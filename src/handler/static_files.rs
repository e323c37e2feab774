//! Static file serving module
//!
//! Serves the stylesheets, scripts and gallery images under `/static`.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// URL prefix the asset directory is mounted under
pub const STATIC_PREFIX: &str = "/static/";

/// Serve a file from the asset directory
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    static_dir: &str,
    cache_control: &str,
) -> Response<Full<Bytes>> {
    let Some(relative) = ctx.path.strip_prefix(STATIC_PREFIX) else {
        return http::build_404_response();
    };

    match load_asset(static_dir, relative).await {
        Some((content, content_type)) => build_asset_response(
            content,
            content_type,
            cache_control,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
        ),
        None => http::build_404_response(),
    }
}

/// Resolve a request path inside `static_dir`, refusing anything outside it
async fn resolve_asset_path(static_dir: &str, relative: &str) -> Option<PathBuf> {
    if relative.is_empty() || relative.ends_with('/') {
        return None;
    }

    let static_dir_canonical = match fs::canonicalize(static_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let file_path = fs::canonicalize(Path::new(static_dir).join(relative))
        .await
        .ok()?;
    if !file_path.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_path.display()
        ));
        return None;
    }

    fs::metadata(&file_path)
        .await
        .ok()
        .filter(std::fs::Metadata::is_file)
        .map(|_| file_path)
}

/// Load an asset and determine its content type
pub async fn load_asset(static_dir: &str, relative: &str) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve_asset_path(static_dir, relative).await?;

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build asset response with `ETag` revalidation
fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    cache_control: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag, cache_control);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, cache_control, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    struct TempAssets(PathBuf);

    impl TempAssets {
        fn new(tag: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "portfolio-assets-{tag}-{}",
                std::process::id()
            ));
            std::fs::create_dir_all(root.join("site/css")).unwrap();
            std::fs::write(root.join("site/css/style.css"), "body { margin: 0; }").unwrap();
            std::fs::write(root.join("secret.txt"), "top secret").unwrap();
            Self(root)
        }

        fn dir(&self) -> String {
            self.0.join("site").to_string_lossy().into_owned()
        }
    }

    impl Drop for TempAssets {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn ctx<'a>(path: &'a str, if_none_match: Option<String>) -> RequestContext<'a> {
        RequestContext {
            path,
            is_head: false,
            if_none_match,
        }
    }

    #[tokio::test]
    async fn test_serves_css_with_etag() {
        let assets = TempAssets::new("css");
        let resp = serve_asset(
            &ctx("/static/css/style.css", None),
            &assets.dir(),
            "public, max-age=3600",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/css; charset=utf-8");
        assert_eq!(resp.headers()["Cache-Control"], "public, max-age=3600");
        assert!(resp.headers().contains_key("ETag"));
    }

    #[tokio::test]
    async fn test_etag_revalidation() {
        let assets = TempAssets::new("etag");
        let etag = cache::generate_etag(b"body { margin: 0; }");
        let resp = serve_asset(
            &ctx("/static/css/style.css", Some(etag)),
            &assets.dir(),
            "no-cache",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_missing_and_directory_paths() {
        let assets = TempAssets::new("missing");
        for path in ["/static/css/nope.css", "/static/css/", "/static/css"] {
            let resp = serve_asset(&ctx(path, None), &assets.dir(), "no-cache").await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        }
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let assets = TempAssets::new("traversal");
        let resp = serve_asset(
            &ctx("/static/../secret.txt", None),
            &assets.dir(),
            "no-cache",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
