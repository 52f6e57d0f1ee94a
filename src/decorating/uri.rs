//! URI template resolution against declared parameters

use crate::view::Parameter;
use std::borrow::Cow;
use std::fmt;

/// A malformed URI template. Decoration stops on the first one; there is
/// no partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    UnterminatedExpression(usize),
}

impl TemplateError {
    pub fn offset(&self) -> usize {
        match self {
            TemplateError::UnterminatedExpression(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TemplateError::UnterminatedExpression(_) => {
                "unterminated expression in URI template".to_string()
            }
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message(), self.offset())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Query,
    Form,
    Reserved,
}

enum Segment<'t> {
    Literal(&'t str),
    Block {
        operator: Operator,
        names: Vec<&'t str>,
    },
}

/// Rewrite a URI template to only mention the given parameters, rendering
/// either the canonical template or an HTML-annotated version of it.
///
/// Expressions whose parameters are all unknown vanish entirely, operator
/// included; a final pass collapses the doubled slashes that can leave
/// behind. In colorized mode braces and the `+` operator are never
/// emitted, and each parameter becomes a styled span carrying its example
/// value.
pub fn resolve(
    template_uri: &str,
    parameters: &[Parameter],
    colorize: bool,
) -> Result<String, TemplateError> {
    let segments = scan(template_uri, parameters)?;

    let mut out = String::with_capacity(template_uri.len());
    for segment in &segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Block { operator, names } => {
                if !colorize {
                    out.push('{');
                }
                match operator {
                    Operator::Query => out.push('?'),
                    Operator::Form => out.push('&'),
                    Operator::Reserved => {
                        if !colorize {
                            out.push('+');
                        }
                    }
                    Operator::Simple => {}
                }
                let rendered: Vec<Cow<str>> = names
                    .iter()
                    .map(|name| {
                        if colorize {
                            Cow::Owned(colorized(name, *operator, parameters))
                        } else {
                            Cow::Borrowed(*name)
                        }
                    })
                    .collect();
                out.push_str(&rendered.join(if colorize { "&" } else { "," }));
                if !colorize {
                    out.push('}');
                }
            }
        }
    }

    Ok(collapse_slashes(&out))
}

fn scan<'t>(
    template_uri: &'t str,
    parameters: &[Parameter],
) -> Result<Vec<Segment<'t>>, TemplateError> {
    let mut segments = Vec::new();
    let mut last = 0;

    while let Some(found) = template_uri[last..].find('{') {
        let open = last + found;
        let close = template_uri[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or(TemplateError::UnterminatedExpression(open))?;

        segments.push(Segment::Literal(&template_uri[last..open]));

        let mut inner = open + 1;
        let operator = match template_uri
            .as_bytes()
            .get(inner)
        {
            Some(b'?') => Operator::Query,
            Some(b'&') => Operator::Form,
            Some(b'+') => Operator::Reserved,
            _ => Operator::Simple,
        };
        if operator != Operator::Simple {
            inner += 1;
        }

        let names: Vec<&str> = template_uri[inner..close]
            .split(',')
            .filter(|name| lookup(parameters, name).is_some())
            .collect();
        if !names.is_empty() {
            segments.push(Segment::Block { operator, names });
        }

        last = close + 1;
    }

    segments.push(Segment::Literal(&template_uri[last..]));
    Ok(segments)
}

fn colorized(name: &str, operator: Operator, parameters: &[Parameter]) -> String {
    let name = strip_modifier(name);
    let example = lookup(parameters, name)
        .map(|parameter| parameter.example.as_str())
        .unwrap_or("");

    match operator {
        Operator::Query | Operator::Form => format!(
            "<span class=\"hljs-attribute\">{}=</span><span class=\"hljs-literal\">{}</span>",
            name, example
        ),
        Operator::Simple | Operator::Reserved => {
            let visible = if example.is_empty() { name } else { example };
            format!(
                "<span class=\"hljs-attribute\" title=\"{}\">{}</span>",
                name, visible
            )
        }
    }
}

/// Find the declared parameter a template name refers to. The explode
/// modifier is stripped and the name percent-decoded before comparison;
/// names with no declared counterpart are dropped by the caller.
fn lookup<'p>(parameters: &'p [Parameter], name: &str) -> Option<&'p Parameter> {
    let stripped = strip_modifier(name);
    let decoded = urlencoding::decode(stripped).unwrap_or(Cow::Borrowed(stripped));
    parameters
        .iter()
        .find(|parameter| parameter.name == decoded)
}

fn strip_modifier(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('*') {
        rest
    } else if let Some(rest) = name.strip_suffix('*') {
        rest
    } else {
        name
    }
}

fn collapse_slashes(uri: &str) -> String {
    let mut result = String::with_capacity(uri.len());
    let mut previous_slash = false;
    for c in uri.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod check {
    use super::*;

    fn parameter(name: &str, example: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            description: String::new(),
            kind: "string".to_string(),
            required: false,
            example: example.to_string(),
            values: Vec::new(),
        }
    }

    #[test]
    fn keeps_declared_parameters() {
        let parameters = vec![parameter("path", "")];
        let result = resolve("/resource/{path}", &parameters, false).unwrap();
        assert_eq!(result, "/resource/{path}");
    }

    #[test]
    fn drops_undeclared_parameters_and_collapses() {
        let result = resolve("/resource/{path}", &[], false).unwrap();
        assert_eq!(result, "/resource/");

        let result = resolve("/resource/{path}/", &[], false).unwrap();
        assert_eq!(result, "/resource/");
    }

    #[test]
    fn preserves_query_expression_with_modifiers() {
        let parameters = vec![parameter("greeting", "hello"), parameter("name", "world")];
        let result = resolve("/resource{?greeting,name*}", &parameters, false).unwrap();
        assert_eq!(result, "/resource{?greeting,name*}");

        let parameters = vec![parameter("greeting", "hello")];
        let result = resolve("/resource{?greeting,name*}", &parameters, false).unwrap();
        assert_eq!(result, "/resource{?greeting}");
    }

    #[test]
    fn empty_expression_leaves_no_operator_behind() {
        let result = resolve("/resource{?greeting}", &[], false).unwrap();
        assert_eq!(result, "/resource");
    }

    #[test]
    fn no_expressions_passes_through() {
        let result = resolve("/resource", &[], false).unwrap();
        assert_eq!(result, "/resource");
    }

    #[test]
    fn reserved_operator_kept_in_plain_mode_only() {
        let parameters = vec![parameter("reserved", "this/that")];
        let result = resolve("/resource/{+reserved}", &parameters, false).unwrap();
        assert_eq!(result, "/resource/{+reserved}");

        let result = resolve("/resource/{+reserved}", &parameters, true).unwrap();
        assert_eq!(
            result,
            "/resource/<span class=\"hljs-attribute\" title=\"reserved\">this/that</span>"
        );
    }

    #[test]
    fn colorized_query_renders_name_value_spans() {
        let parameters = vec![parameter("greeting", "hello"), parameter("name", "world")];
        let result = resolve("/resource{?greeting,name*}", &parameters, true).unwrap();
        assert_eq!(
            result,
            "/resource?<span class=\"hljs-attribute\">greeting=</span>\
             <span class=\"hljs-literal\">hello</span>&\
             <span class=\"hljs-attribute\">name=</span>\
             <span class=\"hljs-literal\">world</span>"
        );
    }

    #[test]
    fn colorized_simple_falls_back_to_name() {
        let parameters = vec![parameter("path", "")];
        let result = resolve("/resource/{path}", &parameters, true).unwrap();
        assert_eq!(
            result,
            "/resource/<span class=\"hljs-attribute\" title=\"path\">path</span>"
        );
    }

    #[test]
    fn colorized_never_contains_braces() {
        let parameters = vec![parameter("greeting", "hello"), parameter("id", "7")];
        for template in [
            "/pages/{id}{?greeting}",
            "/pages{?greeting}{&id}",
            "/{+id}/deep/{id}",
        ] {
            let result = resolve(template, &parameters, true).unwrap();
            assert!(!result.contains('{'), "braces in {}", result);
            assert!(!result.contains('}'), "braces in {}", result);
        }
    }

    #[test]
    fn percent_decodes_names_before_matching() {
        let parameters = vec![parameter("a b", "x")];
        let result = resolve("/thing/{a%20b}", &parameters, false).unwrap();
        assert_eq!(result, "/thing/{a%20b}");
    }

    #[test]
    fn unterminated_expression_is_an_error() {
        let result = resolve("/resource/{path", &[], false);
        assert_eq!(result, Err(TemplateError::UnterminatedExpression(10)));
    }
}
