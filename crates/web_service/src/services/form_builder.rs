//! HTML forms generated from a tool's JSON parameter schema, and the
//! reverse mapping from submitted form fields to tool arguments.

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::{Map, Value};
use thiserror::Error;
use toolbox_core::{Locale, MessageCatalog};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Multiline,
    Select(Vec<String>),
    Checkbox,
    Integer { min: Option<i64>, max: Option<i64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub required: bool,
    pub hint: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{field}: '{value}' is not a whole number")]
    NotAnInteger { field: String, value: String },
    #[error("{field}: '{value}' is not one of the allowed options")]
    UnknownOption { field: String, value: String },
}

/// Read the `properties` of an object schema, in declaration order.
pub fn fields_from_schema(schema: &Value) -> Vec<FormField> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| {
            let kind = match property.get("type").and_then(Value::as_str) {
                Some("boolean") => FieldKind::Checkbox,
                Some("integer") => FieldKind::Integer {
                    min: property.get("minimum").and_then(Value::as_i64),
                    max: property.get("maximum").and_then(Value::as_i64),
                },
                _ => match property.get("enum").and_then(Value::as_array) {
                    Some(options) => FieldKind::Select(
                        options
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect(),
                    ),
                    None if property.get("format").and_then(Value::as_str) == Some("multiline") => {
                        FieldKind::Multiline
                    }
                    None => FieldKind::Text,
                },
            };

            FormField {
                name: name.clone(),
                kind,
                default: property.get("default").cloned(),
                required: required.contains(&name.as_str()),
                hint: property
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }
        })
        .collect()
}

/// Build tool arguments from a submitted form.
///
/// Unchecked checkboxes are absent from form posts, so a missing checkbox
/// means `false`. Empty optional fields are left out so the tool's own
/// defaults apply.
pub fn args_from_form(
    fields: &[FormField],
    form: &HashMap<String, String>,
) -> Result<Value, FormError> {
    let mut args = Map::new();

    for field in fields {
        let submitted = form.get(&field.name);
        let value = match &field.kind {
            FieldKind::Checkbox => Some(Value::Bool(submitted.is_some_and(|v| is_checked(v)))),
            FieldKind::Integer { .. } => match submitted.map(|v| v.trim()) {
                Some("") | None => None,
                Some(raw) => Some(Value::from(raw.parse::<i64>().map_err(|_| {
                    FormError::NotAnInteger {
                        field: field.name.clone(),
                        value: raw.to_string(),
                    }
                })?)),
            },
            FieldKind::Select(options) => match submitted {
                Some(v) if v.is_empty() => None,
                Some(v) if options.contains(v) => Some(Value::String(v.clone())),
                Some(v) => {
                    return Err(FormError::UnknownOption {
                        field: field.name.clone(),
                        value: v.clone(),
                    })
                }
                None => None,
            },
            FieldKind::Text | FieldKind::Multiline => match submitted {
                Some(v) if !v.is_empty() || field.required => Some(Value::String(v.clone())),
                None if field.required => Some(Value::String(String::new())),
                _ => None,
            },
        };

        if let Some(value) = value {
            args.insert(field.name.clone(), value);
        }
    }

    Ok(Value::Object(args))
}

fn is_checked(value: &str) -> bool {
    matches!(value, "on" | "true" | "1" | "yes")
}

fn field_label(messages: &MessageCatalog, locale: Locale, name: &str) -> String {
    messages
        .lookup(locale, &format!("field.{name}"))
        .unwrap_or(name)
        .to_string()
}

fn option_label(messages: &MessageCatalog, locale: Locale, option: &str) -> String {
    messages
        .lookup(locale, &format!("option.{option}"))
        .unwrap_or(option)
        .to_string()
}

/// Current value of a field as a string: submitted value first, then the
/// schema default.
fn current_value(field: &FormField, values: Option<&HashMap<String, String>>) -> String {
    if let Some(v) = values.and_then(|values| values.get(&field.name)) {
        return v.clone();
    }
    match &field.default {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn is_checked_now(field: &FormField, values: Option<&HashMap<String, String>>) -> bool {
    match values {
        Some(values) => values.get(&field.name).is_some_and(|v| is_checked(v)),
        None => field.default.as_ref().and_then(Value::as_bool).unwrap_or(false),
    }
}

/// Render the fields of one tool form. `values` is `None` for a fresh page
/// and the submitted form after a POST.
pub fn render_fields(
    fields: &[FormField],
    values: Option<&HashMap<String, String>>,
    messages: &MessageCatalog,
    locale: Locale,
) -> String {
    let mut html = String::new();

    for field in fields {
        let id = format!("field-{}", field.name);
        let name = encode_double_quoted_attribute(&field.name);
        let label = encode_text(&field_label(messages, locale, &field.name)).into_owned();
        let value = current_value(field, values);
        let placeholder = field
            .hint
            .as_deref()
            .map(|hint| format!(r#" placeholder="{}""#, encode_double_quoted_attribute(hint)))
            .unwrap_or_default();
        let required = if field.required { " required" } else { "" };

        let control = match &field.kind {
            FieldKind::Multiline => format!(
                r#"<textarea id="{id}" name="{name}" rows="8"{placeholder}{required}>{}</textarea>"#,
                encode_text(&value)
            ),
            FieldKind::Text => format!(
                r#"<input id="{id}" type="text" name="{name}" value="{}"{placeholder}{required}>"#,
                encode_double_quoted_attribute(&value)
            ),
            FieldKind::Integer { min, max } => {
                let min = min.map(|m| format!(r#" min="{m}""#)).unwrap_or_default();
                let max = max.map(|m| format!(r#" max="{m}""#)).unwrap_or_default();
                format!(
                    r#"<input id="{id}" type="number" name="{name}" value="{}"{min}{max}{required}>"#,
                    encode_double_quoted_attribute(&value)
                )
            }
            FieldKind::Select(options) => {
                let options: String = options
                    .iter()
                    .map(|option| {
                        let selected = if *option == value { " selected" } else { "" };
                        format!(
                            r#"<option value="{}"{selected}>{}</option>"#,
                            encode_double_quoted_attribute(option),
                            encode_text(&option_label(messages, locale, option))
                        )
                    })
                    .collect();
                format!(r#"<select id="{id}" name="{name}">{options}</select>"#)
            }
            FieldKind::Checkbox => {
                let checked = if is_checked_now(field, values) { " checked" } else { "" };
                format!(r#"<input id="{id}" type="checkbox" name="{name}"{checked}>"#)
            }
        };

        let class = if field.kind == FieldKind::Checkbox {
            "field field-checkbox"
        } else {
            "field"
        };
        html.push_str(&format!(
            r#"<div class="{class}"><label for="{id}">{label}</label>{control}</div>"#
        ));
        html.push('\n');
    }

    html
}
