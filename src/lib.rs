//! Renders API Blueprint parse results as styled HTML documentation.
//!
//! The input is a refract parse tree as emitted by an API Blueprint
//! parser; the output is a standalone HTML page. In between sits the
//! decoration pass, which derives the template-ready view model:
//! deduplicated examples, stable navigation anchors, and resolved URI
//! templates.

pub mod decorating;
pub mod markdown;
pub mod refract;
pub mod templating;
pub mod view;

use decorating::{Decorator, TemplateError};
use refract::Element;
use templating::{PageError, RenderOptions};
use std::fmt;

/// A failure of the whole render: either the parse tree could not be
/// decorated, or the page could not be assembled. Scoped to a single
/// render invocation.
#[derive(Debug)]
pub enum RenderError {
    Decorate(TemplateError),
    Page(PageError),
}

impl RenderError {
    pub fn message(&self) -> String {
        match self {
            RenderError::Decorate(error) => error.message(),
            RenderError::Page(error) => error.message(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Decorate(error) => write!(f, "{}", error),
            RenderError::Page(error) => write!(f, "{}", error),
        }
    }
}

/// Decorate a parse tree and render it into a complete HTML page. Each
/// call is an independent render pass with its own slug registry, so
/// concurrent callers each get stable, self-consistent anchors.
pub fn render(parse_result: &Element, options: &RenderOptions) -> Result<String, RenderError> {
    let api = Decorator::new()
        .decorate(parse_result)
        .map_err(RenderError::Decorate)?;
    templating::render_page(&api, options).map_err(RenderError::Page)
}
