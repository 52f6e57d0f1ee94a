//! Decoration of a parse tree into the template-ready view model

mod examples;
mod parameters;
mod slug;
mod uri;

pub use examples::{merge_examples, request_message, response_message};
pub use parameters::extract_parameters;
pub use slug::{NavAccumulator, Slugger};
pub use uri::{resolve, TemplateError};

use crate::markdown::Renderer;
use crate::refract::{query, query_first, Element, Pattern};
use crate::view::{Action, Api, Metadata, Resource, ResourceGroup};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

/// One decoration pass. Owns the slug registry and navigation accumulator
/// for the pass and the markdown renderer wired up to them; create a
/// fresh one per render, since slug uniqueness is only meaningful within
/// a single pass.
pub struct Decorator {
    markdown: Renderer,
    slugger: Rc<RefCell<Slugger>>,
    nav: Rc<RefCell<NavAccumulator>>,
}

impl Decorator {
    pub fn new() -> Decorator {
        let slugger = Rc::new(RefCell::new(Slugger::new()));
        let nav = Rc::new(RefCell::new(NavAccumulator::new()));
        let markdown = Renderer::new(slugger.clone(), nav.clone());
        Decorator {
            markdown,
            slugger,
            nav,
        }
    }

    /// Walk the parse tree and derive the view model: title and metadata,
    /// rendered descriptions with their navigation lists, host, resource
    /// groups with resources and actions, merged examples, resolved URI
    /// templates. The input tree is never modified.
    pub fn decorate(&self, parse_result: &Element) -> Result<Api, TemplateError> {
        let api = query_first(parse_result, &Pattern::element("category").class("api"));

        let name = api
            .map(|category| category.title())
            .unwrap_or("")
            .to_string();

        let metadata = api
            .map(metadata_pairs)
            .unwrap_or_default();

        let data_structures = data_structure_map(parse_result);
        debug!(data_structures = ?data_structures.keys());

        let description_html = self
            .markdown
            .render(api.map(leading_copy).unwrap_or(""));
        let nav_items = if description_html.is_empty() {
            Vec::new()
        } else {
            self.nav
                .borrow_mut()
                .take()
        };

        let host = api
            .and_then(host_metadata)
            .unwrap_or("")
            .to_string();

        let mut resource_groups = Vec::new();
        for group in query(parse_result, &Pattern::element("category").class("resourceGroup")) {
            resource_groups.push(self.resource_group(group)?);
        }

        // Bare resources sitting directly under the api category belong
        // to no declared group; they get an anonymous one, listed first.
        if let Some(api) = api {
            let bare: Vec<&Element> = api
                .children()
                .iter()
                .filter(|child| child.element == "resource")
                .collect();
            if !bare.is_empty() {
                let mut resources = Vec::new();
                for element in bare {
                    resources.push(self.resource(element, "")?);
                }
                resource_groups.insert(
                    0,
                    ResourceGroup {
                        name: String::new(),
                        element_id: String::new(),
                        element_link: String::new(),
                        description_html: String::new(),
                        nav_items: Vec::new(),
                        resources,
                    },
                );
            }
        }

        Ok(Api {
            name,
            metadata,
            description_html,
            nav_items,
            host,
            resource_groups,
            data_structures,
        })
    }

    fn resource_group(&self, group: &Element) -> Result<ResourceGroup, TemplateError> {
        let title = group.title();
        let element_id = self
            .slugger
            .borrow_mut()
            .slugify(title, true);

        let description_html = self
            .markdown
            .render(leading_copy(group));
        let nav_items = if description_html.is_empty() {
            Vec::new()
        } else {
            self.nav
                .borrow_mut()
                .take()
        };

        let mut resources = Vec::new();
        for element in query(group, &Pattern::element("resource")) {
            resources.push(self.resource(element, &element_id)?);
        }

        Ok(ResourceGroup {
            name: title.to_string(),
            element_link: format!("#{}", element_id),
            element_id,
            description_html,
            nav_items,
            resources,
        })
    }

    fn resource(&self, element: &Element, parent_id: &str) -> Result<Resource, TemplateError> {
        let title = element.title();
        let element_id = self
            .slugger
            .borrow_mut()
            .slugify(&format!("{}-{}", parent_id, title), true);

        let mut actions = Vec::new();
        for transition in query(element, &Pattern::element("transition")) {
            actions.push(self.action(transition, element, &element_id)?);
        }

        Ok(Resource {
            name: title.to_string(),
            element_link: format!("#{}", element_id),
            element_id,
            description: leading_copy(element).to_string(),
            uri_template: element
                .attribute_text("href")
                .to_string(),
            actions,
        })
    }

    fn action(
        &self,
        transition: &Element,
        resource: &Element,
        parent_id: &str,
    ) -> Result<Action, TemplateError> {
        let method = request_method(transition);

        let examples = merge_examples(transition);
        let has_request = examples
            .iter()
            .any(|example| !example.requests.is_empty());

        // The action's own description is its last copy child; leading
        // copy children belong to preceding prose.
        let description = transition
            .children()
            .iter()
            .filter(|child| child.element == "copy")
            .last()
            .map(|copy| copy.text())
            .unwrap_or("")
            .to_string();

        let element_id = self
            .slugger
            .borrow_mut()
            .slugify(&format!("{}-{}", parent_id, method), true);

        let parameters = extract_parameters(transition, resource);

        let href = transition
            .attribute("href")
            .or_else(|| resource.attribute("href"))
            .map(|attribute| attribute.text())
            .unwrap_or("");
        let uri_template = resolve(href, &parameters, false)?;
        let colorized_uri_template = resolve(href, &parameters, true)?;

        Ok(Action {
            name: transition
                .title()
                .to_string(),
            description,
            element_link: format!("#{}", element_id),
            element_id,
            method_lower: method.to_lowercase(),
            method,
            has_request,
            parameters,
            uri_template,
            colorized_uri_template,
            examples,
        })
    }
}

impl Default for Decorator {
    fn default() -> Decorator {
        Decorator::new()
    }
}

/// The text of the node's first child when that child is a `copy`
/// element, otherwise the empty string.
fn leading_copy(element: &Element) -> &str {
    match element.children().first() {
        Some(child) if child.element == "copy" => child.text(),
        _ => "",
    }
}

// The method of the first request that declares one.
fn request_method(transition: &Element) -> String {
    for request in query(transition, &Pattern::element("httpRequest")) {
        let method = request.attribute_text("method");
        if !method.is_empty() {
            return method.to_string();
        }
    }
    String::new()
}

fn metadata_pairs(api: &Element) -> Vec<Metadata> {
    let Some(metadata) = api.attribute("metadata") else {
        return Vec::new();
    };
    metadata
        .children()
        .iter()
        .filter_map(|member| member.pair())
        .map(|pair| Metadata {
            name: pair
                .key
                .text()
                .to_string(),
            value: pair
                .value
                .as_ref()
                .map(|value| value.text())
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}

fn host_metadata(api: &Element) -> Option<&str> {
    let metadata = api.attribute("metadata")?;
    metadata
        .children()
        .iter()
        .filter_map(|member| member.pair())
        .find(|pair| {
            pair.key
                .text()
                == "HOST"
        })
        .and_then(|pair| pair.value.as_ref())
        .map(|value| value.text())
}

// Definitions keyed by declared id, so schemas can be resolved against
// them downstream. Definitions without an id are unusable as targets and
// are skipped.
fn data_structure_map(parse_result: &Element) -> BTreeMap<String, Element> {
    query(parse_result, &Pattern::element("dataStructure"))
        .into_iter()
        .filter_map(|structure| {
            structure
                .children()
                .first()
        })
        .filter_map(|definition| {
            definition
                .meta
                .id
                .as_ref()
                .map(|id| {
                    (
                        id.text()
                            .to_string(),
                        definition.clone(),
                    )
                })
        })
        .collect()
}
