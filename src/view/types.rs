//! Types representing the decorated view model consumed by page templates

use crate::refract::Element;
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry in a navigation list: heading text plus the anchor that jumps
/// to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub text: String,
    pub href: String,
}

/// A metadata key/value pair declared at the top of the blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}

/// The fully decorated API, ready for direct field access by a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub name: String,
    pub metadata: Vec<Metadata>,
    pub description_html: String,
    pub nav_items: Vec<NavItem>,
    pub host: String,
    pub resource_groups: Vec<ResourceGroup>,
    /// Data structure definitions declared in the blueprint, keyed by
    /// their declared id and kept for schema resolution downstream.
    pub data_structures: BTreeMap<String, Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub name: String,
    pub element_id: String,
    pub element_link: String,
    pub description_html: String,
    pub nav_items: Vec<NavItem>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    pub element_id: String,
    pub element_link: String,
    pub description: String,
    pub uri_template: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    pub description: String,
    pub element_id: String,
    pub element_link: String,
    pub method: String,
    pub method_lower: String,
    pub has_request: bool,
    pub parameters: Vec<Parameter>,
    pub uri_template: String,
    pub colorized_uri_template: String,
    pub examples: Vec<Example>,
}

/// A URI template parameter, from the resource's or action's declared
/// href variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub example: String,
    pub values: Vec<ParameterValue>,
}

/// One member of an enumerated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterValue {
    pub value: String,
}

/// A group of requests and the responses documented for them. Repeated
/// identical requests in the source collapse into one example with
/// several responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub name: String,
    pub description: String,
    pub requests: Vec<Message>,
    pub responses: Vec<Message>,
}

/// A single HTTP request or response record. For requests `name` is the
/// declared title and `method` the HTTP method; for responses `name` is
/// the status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub name: String,
    pub description: String,
    pub method: String,
    pub headers: Vec<Header>,
    pub body: String,
    pub schema: String,
    pub content: Vec<String>,
    pub has_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}
