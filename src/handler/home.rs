//! Home page handler

use askama::Template;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::content;
use crate::error::Result;
use crate::http;
use crate::templates::IndexTemplate;

/// Handle `GET /` and `HEAD /`
///
/// The content record is built fresh for every request.
pub fn handle_home(is_head: bool) -> Result<Response<Full<Bytes>>> {
    let html = IndexTemplate::new(content::portfolio_data()).render()?;
    Ok(http::build_html_response(html, is_head))
}
