//! Markdown rendering for description blocks

use crate::decorating::{NavAccumulator, Slugger};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::cell::RefCell;
use std::rc::Rc;

/// Renders markdown description blocks to HTML. Headings get stable
/// anchor ids minted from the shared slug registry, and every heading
/// rendered is reported to the shared navigation accumulator so the
/// decorator can attach per-block navigation lists.
pub struct Renderer {
    slugger: Rc<RefCell<Slugger>>,
    nav: Rc<RefCell<NavAccumulator>>,
}

impl Renderer {
    pub fn new(slugger: Rc<RefCell<Slugger>>, nav: Rc<RefCell<NavAccumulator>>) -> Renderer {
        Renderer { slugger, nav }
    }

    /// Render markdown to HTML in a single pass over the event stream.
    pub fn render(&self, text: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(text, options);

        let mut events: Vec<Event> = Vec::new();

        // Inline events and plain text of the heading being collected.
        let mut heading: Option<(u32, Vec<Event>, String)> = None;

        let mut code_language = String::new();
        let mut code_text = String::new();
        let mut in_code_block = false;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some((level as u32, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    let Some((level, inner, text)) = heading.take() else {
                        continue;
                    };
                    events.push(Event::Html(CowStr::from(self.heading_html(
                        level, inner, text,
                    ))));
                }
                other if heading.is_some() => {
                    let (_, inner, text) = heading
                        .as_mut()
                        .expect("heading collection in progress");
                    match &other {
                        Event::Text(chunk) | Event::Code(chunk) => text.push_str(chunk),
                        _ => {}
                    }
                    inner.push(other);
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_text.clear();
                    code_language = match &kind {
                        CodeBlockKind::Fenced(language) => language.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let class = if code_language.is_empty() {
                        String::new()
                    } else {
                        format!(" class=\"language-{}\"", code_language)
                    };
                    events.push(Event::Html(CowStr::from(format!(
                        "<pre><code{}>{}</code></pre>\n",
                        class,
                        html_escape(&code_text)
                    ))));
                }
                Event::Text(chunk) if in_code_block => {
                    code_text.push_str(&chunk);
                }
                other => events.push(other),
            }
        }

        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        html
    }

    fn heading_html(&self, level: u32, inner: Vec<Event>, text: String) -> String {
        let slug = self
            .slugger
            .borrow_mut()
            .slugify(&format!("header-{}", text), true);

        self.nav
            .borrow_mut()
            .push(text, format!("#{}", slug));

        let mut inner_html = String::new();
        pulldown_cmark::html::push_html(&mut inner_html, inner.into_iter());

        format!(
            "<h{level} id=\"{slug}\">{inner}<a class=\"permalink\" href=\"#{slug}\">&para;</a></h{level}>\n",
            level = level,
            slug = slug,
            inner = inner_html
        )
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod check {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(
            Rc::new(RefCell::new(Slugger::new())),
            Rc::new(RefCell::new(NavAccumulator::new())),
        )
    }

    #[test]
    fn paragraphs_pass_through() {
        let html = renderer().render("Some *emphasized* text.");
        assert_eq!(html, "<p>Some <em>emphasized</em> text.</p>\n");
    }

    #[test]
    fn headings_get_anchors_and_nav_items() {
        let slugger = Rc::new(RefCell::new(Slugger::new()));
        let nav = Rc::new(RefCell::new(NavAccumulator::new()));
        let renderer = Renderer::new(slugger, nav.clone());

        let html = renderer.render("# Getting Started\n\nWelcome.");
        assert!(html.contains("<h1 id=\"header-getting-started\">"));
        assert!(html.contains(
            "<a class=\"permalink\" href=\"#header-getting-started\">&para;</a></h1>"
        ));

        let items = nav
            .borrow_mut()
            .take();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Getting Started");
        assert_eq!(items[0].href, "#header-getting-started");
    }

    #[test]
    fn repeated_headings_stay_unique() {
        let renderer = renderer();
        let html = renderer.render("# Notes\n\n# Notes");
        assert!(html.contains("id=\"header-notes\""));
        assert!(html.contains("id=\"header-notes-1\""));
    }

    #[test]
    fn fenced_code_blocks_carry_language_class() {
        let html = renderer().render("```json\n{\"a\": 1}\n```");
        assert!(html.contains("<pre><code class=\"language-json\">"));
        assert!(html.contains("{&quot;a&quot;: 1}"));
    }

    #[test]
    fn inline_markup_survives_inside_headings() {
        let renderer = renderer();
        let html = renderer.render("## The `id` field");
        assert!(html.contains("<code>id</code>"));
        assert!(html.contains("id=\"header-the-id-field\""));
    }
}
