//! MIME type module
//!
//! Maps asset file extensions to `Content-Type` values and recognises JSON
//! request bodies.

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use portfolio_site::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("css")), "text/css; charset=utf-8");
/// assert_eq!(get_content_type(Some("jpg")), "image/jpeg");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension.map(str::to_ascii_lowercase).as_deref() {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}

/// Whether a `Content-Type` header value names a JSON media type
///
/// Matches `application/json` and structured suffixes such as
/// `application/ld+json`, ignoring parameters and case.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.contains('/') && essence.ends_with("+json"))
}
