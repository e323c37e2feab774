//! Single-page portfolio site server
//!
//! Serves a rendered portfolio page at `/`, acknowledges contact form
//! submissions at `POST /contact` and serves the page's assets from
//! `/static/`.

pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod templates;

pub use error::{Result, SiteError};
