//! Extraction and grouping of HTTP transactions into examples

use crate::refract::{query, query_first, Element, Pattern};
use crate::view::{Example, Header, Message};

/// Walk the action's HTTP transactions and group them into examples.
/// Blueprints commonly repeat an identical request once per documented
/// response (200 vs 404, say); those collapse into one example carrying
/// several responses, and a fresh example starts only when the request
/// itself changes.
pub fn merge_examples(action: &Element) -> Vec<Example> {
    let mut examples = vec![blank_example()];

    for transaction in query(action, &Pattern::element("httpTransaction")) {
        let request = query(transaction, &Pattern::element("httpRequest"))
            .into_iter()
            .last()
            .map(request_message);
        let response = query(transaction, &Pattern::element("httpResponse"))
            .into_iter()
            .last()
            .map(response_message);

        let (same_request, same_response, holds_request) = {
            let current = examples
                .last()
                .expect("at least one example accumulator");
            (
                current.requests.last() == request.as_ref(),
                current.responses.last() == response.as_ref(),
                !current.requests.is_empty(),
            )
        };

        if same_request {
            if !same_response {
                if let Some(response) = response {
                    examples
                        .last_mut()
                        .expect("at least one example accumulator")
                        .responses
                        .push(response);
                }
            }
            continue;
        }

        if holds_request {
            examples.push(blank_example());
        }
        let current = examples
            .last_mut()
            .expect("at least one example accumulator");
        if let Some(request) = request {
            // A transaction with no real request data is not a distinct
            // request.
            if !is_empty_message(&request) {
                current.requests.push(request);
            }
        }
        if !same_response {
            if let Some(response) = response {
                current.responses.push(response);
            }
        }
    }

    examples
}

fn blank_example() -> Example {
    Example {
        name: String::new(),
        description: String::new(),
        requests: Vec::new(),
        responses: Vec::new(),
    }
}

/// Build a request record from an `httpRequest` element.
pub fn request_message(request: &Element) -> Message {
    let copy = query_first(request, &Pattern::element("copy"));
    let body = message_asset(request, "messageBody");
    let schema = message_asset(request, "messageBodySchema");
    let headers = headers(request);

    let has_content = copy.is_some() || !headers.is_empty() || body.is_some() || schema.is_some();

    Message {
        name: request
            .title()
            .to_string(),
        description: copy
            .map(|element| element.text())
            .unwrap_or("")
            .to_string(),
        method: request
            .attribute_text("method")
            .to_string(),
        headers,
        body: body
            .unwrap_or("")
            .to_string(),
        schema: schema
            .unwrap_or("")
            .to_string(),
        content: Vec::new(),
        has_content,
    }
}

/// Build a response record from an `httpResponse` element. The status
/// code stands in as the name.
pub fn response_message(response: &Element) -> Message {
    let copy = query_first(response, &Pattern::element("copy"));
    let body = message_asset(response, "messageBody");
    let schema = message_asset(response, "messageBodySchema");
    let headers = headers(response);

    let has_content = copy.is_some() || !headers.is_empty() || body.is_some() || schema.is_some();

    Message {
        name: response
            .attribute_text("statusCode")
            .to_string(),
        description: copy
            .map(|element| element.text())
            .unwrap_or("")
            .to_string(),
        method: String::new(),
        headers,
        body: body
            .unwrap_or("")
            .to_string(),
        schema: schema
            .unwrap_or("")
            .to_string(),
        content: Vec::new(),
        has_content,
    }
}

fn message_asset<'e>(message: &'e Element, class: &str) -> Option<&'e str> {
    query_first(message, &Pattern::element("asset").class(class)).map(|asset| asset.text())
}

fn headers(message: &Element) -> Vec<Header> {
    let Some(headers) = message.attribute("headers") else {
        return Vec::new();
    };
    headers
        .children()
        .iter()
        .filter_map(|member| member.pair())
        .map(|pair| Header {
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

// A message whose every field is empty carries no documentation value.
fn is_empty_message(message: &Message) -> bool {
    message.name.is_empty()
        && message.headers.is_empty()
        && message.description.is_empty()
        && message.body.is_empty()
        && message.schema.is_empty()
        && message.content.is_empty()
}
