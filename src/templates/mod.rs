//! Askama templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;

use crate::content::PortfolioData;

/// Home page template; the content record is exposed as `data`.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub data: PortfolioData,
}

impl IndexTemplate {
    pub const fn new(data: PortfolioData) -> Self {
        Self { data }
    }
}

/// Escape text exactly as the page templates do
#[cfg(test)]
pub(crate) fn escape_html(text: &str) -> String {
    #[derive(Template)]
    #[template(source = "{{ text }}", ext = "html")]
    struct Escaped<'a> {
        text: &'a str,
    }

    Escaped { text }.render().unwrap()
}
