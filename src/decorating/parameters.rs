//! URI parameter extraction from declared href variables

use crate::refract::Element;
use crate::view::{Parameter, ParameterValue};

/// Collect the parameters declared for an action: the resource's href
/// variables followed by the action's own. The two lists are concatenated
/// as-is; a name declared at both levels appears twice, and downstream
/// rendering shows both.
pub fn extract_parameters(action: &Element, resource: &Element) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    for scope in [resource, action] {
        let Some(href_variables) = scope.attribute("hrefVariables") else {
            continue;
        };
        for variable in href_variables.children() {
            if let Some(parameter) = extract_parameter(variable) {
                parameters.push(parameter);
            }
        }
    }

    parameters
}

fn extract_parameter(variable: &Element) -> Option<Parameter> {
    let pair = variable.pair()?;

    let required = variable
        .attribute("typeAttributes")
        .map(|attributes| {
            attributes
                .children()
                .iter()
                .any(|entry| entry.text() == "required")
        })
        .unwrap_or(false);

    let (example, values) = match &pair.value {
        Some(value) if value.element == "enum" => {
            let values = value
                .attribute("enumerations")
                .map(|enumerations| {
                    enumerations
                        .children()
                        .iter()
                        .map(|member| ParameterValue {
                            value: member
                                .text()
                                .to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            let example = value
                .children()
                .first()
                .map(|sample| sample.text())
                .unwrap_or("")
                .to_string();
            (example, values)
        }
        Some(value) => (
            value
                .text()
                .to_string(),
            Vec::new(),
        ),
        None => (String::new(), Vec::new()),
    };

    Some(Parameter {
        name: pair
            .key
            .text()
            .to_string(),
        description: variable
            .description()
            .to_string(),
        kind: variable
            .title()
            .to_string(),
        required,
        example,
        values,
    })
}
