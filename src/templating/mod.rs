//! Assembly of the decorated view model into a standalone HTML page

use crate::view::Api;
use serde::Serialize;
use std::fmt;
use tinytemplate::TinyTemplate;
use tracing::debug;

static TEMPLATE: &'static str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{api.name}</title>
<style>{css | unescaped}</style>
</head>
<body class="{bodyClass}">
<nav class="sidebar">
  <h1 class="brand"><a href="#top">{api.name}</a></h1>
  {{ for item in api.navItems }}
  <a class="nav-heading" href="{item.href}">{item.text}</a>
  {{ endfor }}
  {{ for group in api.resourceGroups }}
  <a class="nav-group" href="{group.elementLink}">{group.name}</a>
    {{ for resource in group.resources }}
    <a class="nav-resource" href="{resource.elementLink}">{resource.name}</a>
    {{ endfor }}
  {{ endfor }}
</nav>
<main id="top">
<header>
  <h1>{api.name}</h1>
  {{ if api.host }}<p class="host"><code>{api.host}</code></p>{{ endif }}
  {{ for entry in api.metadata }}
  <span class="metadata"><strong>{entry.name}</strong> {entry.value}</span>
  {{ endfor }}
</header>
<section class="description">{api.descriptionHtml | unescaped}</section>
{{ for group in api.resourceGroups }}
<section class="resource-group" id="{group.elementId}">
  <h2><a href="{group.elementLink}">{group.name}</a></h2>
  <div class="description">{group.descriptionHtml | unescaped}</div>
  {{ for resource in group.resources }}
  <div class="resource" id="{resource.elementId}">
    <h3><a href="{resource.elementLink}">{resource.name}</a></h3>
    {{ if resource.description }}<p class="description">{resource.description}</p>{{ endif }}
    {{ for action in resource.actions }}
    <article class="action {action.methodLower}" id="{action.elementId}">
      <h4>
        <span class="method {action.methodLower}">{action.method}</span>
        <a href="{action.elementLink}">{action.name}</a>
      </h4>
      <code class="uri-template">{action.uriTemplate}</code>
      <code class="uri-example">{action.colorizedUriTemplate | unescaped}</code>
      {{ if action.description }}<p class="description">{action.description}</p>{{ endif }}
      {{ if action.parameters }}
      <table class="parameters">
        <thead><tr><th>Name</th><th>Type</th><th>Description</th></tr></thead>
        <tbody>
        {{ for parameter in action.parameters }}
        <tr>
          <td><code>{parameter.name}</code>{{ if parameter.required }} <em>required</em>{{ endif }}</td>
          <td>{parameter.type}</td>
          <td>{parameter.description}{{ if parameter.example }} <span class="example">Example: <code>{parameter.example}</code></span>{{ endif }}</td>
        </tr>
        {{ endfor }}
        </tbody>
      </table>
      {{ endif }}
      {{ for example in action.examples }}
      <div class="example">
        {{ for request in example.requests }}
        {{ if request.hasContent }}
        <div class="request">
          <h5>Request {request.name}</h5>
          {{ for header in request.headers }}
          <code class="header">{header.name}: {header.value}</code>
          {{ endfor }}
          {{ if request.body }}<pre><code>{request.body}</code></pre>{{ endif }}
          {{ if request.schema }}<pre class="schema"><code>{request.schema}</code></pre>{{ endif }}
        </div>
        {{ endif }}
        {{ endfor }}
        {{ for response in example.responses }}
        {{ if response.hasContent }}
        <div class="response">
          <h5>Response {response.name}</h5>
          {{ for header in response.headers }}
          <code class="header">{header.name}: {header.value}</code>
          {{ endfor }}
          {{ if response.body }}<pre><code>{response.body}</code></pre>{{ endif }}
          {{ if response.schema }}<pre class="schema"><code>{response.schema}</code></pre>{{ endif }}
        </div>
        {{ endif }}
        {{ endfor }}
      </div>
      {{ endfor }}
    </article>
    {{ endfor }}
  </div>
  {{ endfor }}
</section>
{{ endfor }}
</main>
</body>
</html>
"##;

/// Options accepted by the theme, with the defaults the option listing
/// advertises.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub variables: String,
    pub condense_nav: bool,
    pub full_width: bool,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            variables: "default".to_string(),
            condense_nav: true,
            full_width: false,
        }
    }
}

/// A problem assembling the final page.
#[derive(Debug)]
pub enum PageError {
    UnknownScheme(String),
    Template(tinytemplate::error::Error),
}

impl PageError {
    pub fn message(&self) -> String {
        match self {
            PageError::UnknownScheme(name) => format!("unknown color scheme '{}'", name),
            PageError::Template(error) => format!("template rendering failed: {}", error),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Description of one supported option, as reported by `config()`.
#[derive(Debug, Clone, Serialize)]
pub struct OptionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub boolean: bool,
    pub default: &'static str,
}

/// The theme's configuration: supported blueprint format versions and
/// the options it accepts.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub formats: &'static [&'static str],
    pub options: &'static [OptionInfo],
}

pub fn config() -> Config {
    Config {
        formats: &["1A"],
        options: &[
            OptionInfo {
                name: "variables",
                description: "Color scheme name",
                boolean: false,
                default: "default",
            },
            OptionInfo {
                name: "condense-nav",
                description: "Condense navigation links",
                boolean: true,
                default: "true",
            },
            OptionInfo {
                name: "full-width",
                description: "Use full window width",
                boolean: true,
                default: "false",
            },
        ],
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Context<'a> {
    api: &'a Api,
    css: String,
    body_class: String,
}

/// Render the decorated view model into a complete HTML document.
pub fn render_page(api: &Api, options: &RenderOptions) -> Result<String, PageError> {
    let css = stylesheet(&options.variables)?;
    debug!(scheme = options.variables.as_str(), "using color scheme");

    let mut body_class = String::new();
    if options.condense_nav {
        body_class.push_str("condense-nav ");
    }
    if options.full_width {
        body_class.push_str("full-width ");
    }

    let mut templates = TinyTemplate::new();
    templates
        .add_template("page", TEMPLATE)
        .map_err(PageError::Template)?;

    let context = Context {
        api,
        css,
        body_class: body_class
            .trim_end()
            .to_string(),
    };

    templates
        .render("page", &context)
        .map_err(PageError::Template)
}

/// The embedded stylesheet for a named color scheme: shared layout rules
/// followed by the scheme's palette.
fn stylesheet(scheme: &str) -> Result<String, PageError> {
    let palette = match scheme {
        "default" => DEFAULT_PALETTE,
        "flatly" => FLATLY_PALETTE,
        "slate" => SLATE_PALETTE,
        other => return Err(PageError::UnknownScheme(other.to_string())),
    };
    Ok(format!("{}{}", BASE_CSS, palette))
}

static BASE_CSS: &'static str = r#"
body { margin: 0; font-family: "Helvetica Neue", Helvetica, Arial, sans-serif; line-height: 1.5; }
nav.sidebar { position: fixed; top: 0; bottom: 0; width: 16rem; overflow-y: auto; padding: 1rem; box-sizing: border-box; }
nav.sidebar a { display: block; text-decoration: none; padding: 0.15rem 0; }
nav.sidebar .nav-resource { padding-left: 1rem; }
body.condense-nav nav.sidebar .nav-resource { display: none; }
main { margin-left: 16rem; max-width: 60rem; padding: 1rem 2rem; }
body.full-width main { max-width: none; }
code { font-family: Menlo, Consolas, monospace; }
code.uri-template, code.uri-example, code.header { display: block; padding: 0.35rem 0.6rem; margin: 0.25rem 0; border-radius: 3px; }
pre { padding: 0.6rem; border-radius: 3px; overflow-x: auto; }
table.parameters { border-collapse: collapse; width: 100%; }
table.parameters th, table.parameters td { text-align: left; padding: 0.35rem 0.6rem; border-bottom: 1px solid rgba(0,0,0,0.1); }
span.method { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 3px; font-weight: bold; }
a.permalink { margin-left: 0.3rem; text-decoration: none; opacity: 0.4; }
"#;

static DEFAULT_PALETTE: &'static str = r#"
body { background: #fff; color: #333; }
nav.sidebar { background: #f5f5f5; }
nav.sidebar a { color: #444; }
a { color: #0088cc; }
code.uri-template, code.uri-example, pre { background: #f5f5f5; }
span.method { background: #0088cc; color: #fff; }
span.method.get { background: #0f6ab4; }
span.method.post { background: #10a54a; }
span.method.put { background: #c5862b; }
span.method.delete { background: #a41e22; }
.hljs-attribute { color: #0f6ab4; }
.hljs-literal { color: #10a54a; }
"#;

static FLATLY_PALETTE: &'static str = r#"
body { background: #fff; color: #2c3e50; }
nav.sidebar { background: #2c3e50; }
nav.sidebar a { color: #ecf0f1; }
a { color: #18bc9c; }
code.uri-template, code.uri-example, pre { background: #ecf0f1; }
span.method { background: #18bc9c; color: #fff; }
span.method.get { background: #3498db; }
span.method.post { background: #18bc9c; }
span.method.put { background: #f39c12; }
span.method.delete { background: #e74c3c; }
.hljs-attribute { color: #3498db; }
.hljs-literal { color: #18bc9c; }
"#;

static SLATE_PALETTE: &'static str = r#"
body { background: #1b1f23; color: #d1d5da; }
nav.sidebar { background: #14171a; }
nav.sidebar a { color: #d1d5da; }
a { color: #58a6ff; }
code.uri-template, code.uri-example, pre { background: #24292e; }
span.method { background: #58a6ff; color: #14171a; }
span.method.get { background: #388bfd; }
span.method.post { background: #3fb950; }
span.method.put { background: #d29922; }
span.method.delete { background: #f85149; }
.hljs-attribute { color: #79c0ff; }
.hljs-literal { color: #7ee787; }
"#;

#[cfg(test)]
mod check {
    use super::*;
    use crate::view::NavItem;

    fn minimal_api() -> Api {
        Api {
            name: "Test API".to_string(),
            metadata: Vec::new(),
            description_html: "<p>Welcome.</p>".to_string(),
            nav_items: vec![NavItem {
                text: "Overview".to_string(),
                href: "#header-overview".to_string(),
            }],
            host: "https://api.example.com".to_string(),
            resource_groups: Vec::new(),
            data_structures: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn config_lists_options() {
        let config = config();
        assert_eq!(config.formats, &["1A"]);
        assert!(config.options.len() > 1);
        assert!(!config.options[0]
            .name
            .is_empty());
        assert!(!config.options[0]
            .description
            .is_empty());
    }

    #[test]
    fn page_contains_title_host_and_nav() {
        let api = minimal_api();
        let html = render_page(&api, &RenderOptions::default()).unwrap();
        assert!(html.contains("<title>Test API</title>"));
        assert!(html.contains("<code>https://api.example.com</code>"));
        assert!(html.contains("href=\"#header-overview\""));
        assert!(html.contains("<p>Welcome.</p>"));
        assert!(html.contains("condense-nav"));
    }

    #[test]
    fn full_width_toggles_body_class() {
        let api = minimal_api();
        let options = RenderOptions {
            full_width: true,
            condense_nav: false,
            ..RenderOptions::default()
        };
        let html = render_page(&api, &options).unwrap();
        assert!(html.contains("class=\"full-width\""));
    }

    #[test]
    fn unknown_scheme_is_an_error() {
        let api = minimal_api();
        let options = RenderOptions {
            variables: "neon".to_string(),
            ..RenderOptions::default()
        };
        let result = render_page(&api, &options);
        assert!(matches!(result, Err(PageError::UnknownScheme(_))));
    }
}
