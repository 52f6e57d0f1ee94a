use olio::decorating::{resolve, TemplateError};
use olio::view::Parameter;

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

fn attribute(name: &str) -> String {
    format!(
        "<span class=\"hljs-attribute\" title=\"{}\">{}</span>",
        name, name
    )
}

fn attribute_with_example(name: &str, example: &str) -> String {
    format!(
        "<span class=\"hljs-attribute\" title=\"{}\">{}</span>",
        name, example
    )
}

fn query_pair(name: &str, example: &str) -> String {
    format!(
        "<span class=\"hljs-attribute\">{}=</span><span class=\"hljs-literal\">{}</span>",
        name, example
    )
}

#[test]
fn simple_path_parameter() {
    let parameters = vec![parameter("path", "")];
    assert_eq!(
        resolve("/resource/{path}", &parameters, false).unwrap(),
        "/resource/{path}"
    );
    assert_eq!(
        resolve("/resource/{path}", &parameters, true).unwrap(),
        format!("/resource/{}", attribute("path"))
    );
}

#[test]
fn reserved_parameter_shows_example() {
    let parameters = vec![parameter("reserved", "this/that")];
    assert_eq!(
        resolve("/resource/{+reserved}", &parameters, false).unwrap(),
        "/resource/{+reserved}"
    );
    assert_eq!(
        resolve("/resource/{+reserved}", &parameters, true).unwrap(),
        format!(
            "/resource/{}",
            attribute_with_example("reserved", "this/that")
        )
    );
}

#[test]
fn query_block_with_explode_modifier() {
    let parameters = vec![parameter("greeting", "hello"), parameter("name", "world")];
    assert_eq!(
        resolve("/resource{?greeting,name*}", &parameters, false).unwrap(),
        "/resource{?greeting,name*}"
    );
    assert_eq!(
        resolve("/resource{?greeting,name*}", &parameters, true).unwrap(),
        format!(
            "/resource?{}&{}",
            query_pair("greeting", "hello"),
            query_pair("name", "world")
        )
    );
}

#[test]
fn separate_query_and_form_blocks() {
    let parameters = vec![parameter("greeting", "hello"), parameter("name", "world")];
    assert_eq!(
        resolve("/resource{?greeting}{&name}", &parameters, false).unwrap(),
        "/resource{?greeting}{&name}"
    );
    assert_eq!(
        resolve("/resource{?greeting}{&name}", &parameters, true).unwrap(),
        format!(
            "/resource?{}&{}",
            query_pair("greeting", "hello"),
            query_pair("name", "world")
        )
    );
}

#[test]
fn query_block_followed_by_reserved_block() {
    let parameters = vec![
        parameter("greeting", "hello"),
        parameter("something", "with/slash"),
    ];
    assert_eq!(
        resolve("/resource{?greeting}{+something}", &parameters, true).unwrap(),
        format!(
            "/resource?{}{}",
            query_pair("greeting", "hello"),
            attribute_with_example("something", "with/slash")
        )
    );
}

#[test]
fn partial_filtering_keeps_only_declared_names() {
    let parameters = vec![parameter("greeting", "hello")];
    assert_eq!(
        resolve("/resource{?greeting,name*}", &parameters, false).unwrap(),
        "/resource{?greeting}"
    );
}

#[test]
fn filtered_out_block_vanishes() {
    assert_eq!(resolve("/resource/{path}", &[], false).unwrap(), "/resource/");
    assert_eq!(resolve("/resource{?verbose}", &[], false).unwrap(), "/resource");
}

#[test]
fn literal_templates_pass_through() {
    assert_eq!(resolve("/resource/", &[], false).unwrap(), "/resource/");
    assert_eq!(resolve("/resource", &[], false).unwrap(), "/resource");
}

#[test]
fn trailing_slash_collapses_after_removal() {
    let parameters = vec![parameter("path", "")];
    assert_eq!(
        resolve("/resource/{path}/", &parameters, false).unwrap(),
        "/resource/{path}/"
    );
    assert_eq!(resolve("/resource/{path}/", &[], false).unwrap(), "/resource/");
}

#[test]
fn unterminated_block_is_a_malformed_template() {
    assert_eq!(
        resolve("/resource/{path", &[], false),
        Err(TemplateError::UnterminatedExpression(10))
    );
    assert_eq!(
        resolve("/a/{x}/b/{y", &[parameter("x", "")], true),
        Err(TemplateError::UnterminatedExpression(9))
    );
}
