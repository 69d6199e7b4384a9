//! Decoding and encoding of ulimits from generic structured config values.
//!
//! A single limit may be written as a number, a `soft[:hard]` string, a one
//! or two element list, or an object with `soft` and optional `hard` fields.
//! A collection may be a list of `name=soft[:hard]` strings or a map of
//! resource name to any single limit form. Encoding always emits the object
//! form.

use crate::error::{Error, Result};
use crate::text;
use crate::ulimit::Ulimit;
use crate::ulimits::Ulimits;
use jsonschema::{Draft, JSONSchema};
use log::trace;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Number, Value};

static ULIMIT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "soft": { "type": ["number", "string"] },
            "hard": { "type": ["number", "string", "null"] }
        },
        "required": ["soft"],
        "additionalProperties": false
    })
});

static ULIMIT_VALIDATOR: Lazy<JSONSchema> = Lazy::new(|| {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&ULIMIT_SCHEMA)
        .expect("ulimit object schema compiles")
});

/// JSON schema of the canonical `{soft, hard?}` object form.
pub fn ulimit_schema() -> &'static Value {
    &ULIMIT_SCHEMA
}

/// The accepted single limit shapes, in the order they are tried.
#[derive(Debug)]
enum Shape<'a> {
    Number(&'a Number),
    Text(&'a str),
    ShortList(&'a [Value]),
    Object(&'a Value),
}

impl<'a> Shape<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Number(number) => Shape::Number(number),
            Value::String(text) => Shape::Text(text),
            Value::Array(items) => Shape::ShortList(items),
            // anything else must convert to the object form
            _ => Shape::Object(value),
        }
    }
}

/// Decodes a collection: a list of `name=soft[:hard]` strings or a map of
/// resource name to single limit.
pub fn decode_ulimits(value: &Value) -> Result<Ulimits> {
    match value {
        Value::Array(items) => {
            let mut ulimits = Ulimits::new();
            for item in items {
                let token = match item {
                    Value::String(token) => token,
                    _ => return Err(Error::type_mismatch("string", item)),
                };
                let (name, ulimit) = text::parse_ulimit(token)?;
                ulimits.insert(name, ulimit);
            }
            Ok(ulimits)
        }
        Value::Object(entries) => entries
            .iter()
            .map(|(name, value)| Ok::<_, Error>((name.clone(), decode_ulimit(value)?)))
            .collect(),
        _ => Err(Error::type_mismatch("list of strings or map of ulimits", value)),
    }
}

/// Decodes a single limit from any of its accepted shapes.
pub fn decode_ulimit(value: &Value) -> Result<Ulimit> {
    let shape = Shape::of(value);
    trace!("Decoding ulimit from {:?}", shape);

    match shape {
        Shape::Number(number) => Ok(Ulimit::single(number_to_limit(number))),
        Shape::Text(text) => from_text(text),
        Shape::ShortList(items) => from_list(items),
        Shape::Object(value) => from_object(value),
    }
}

fn from_text(value: &str) -> Result<Ulimit> {
    let parts = value
        .split(':')
        .map(text::parse_limit)
        .collect::<std::result::Result<Vec<i64>, _>>()?;
    from_number_list(&parts)
}

fn from_list(items: &[Value]) -> Result<Ulimit> {
    let parts = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            to_limit(item)
                .ok_or_else(|| Error::Conversion(format!("element {}: number required", index)))
        })
        .collect::<Result<Vec<i64>>>()?;
    from_number_list(&parts)
}

fn from_number_list(parts: &[i64]) -> Result<Ulimit> {
    match parts {
        [] => Err(Error::Validation(format!(
            "too few limit value arguments - {:?}, must have at least one, `soft[:hard]`",
            parts
        ))),
        [soft] => Ok(Ulimit::single(*soft)),
        [soft, hard] => Ok(Ulimit::new(*soft, *hard)),
        _ => Err(Error::Validation(format!(
            "too many limit value arguments - {:?}, can only have up to two, `soft[:hard]`",
            parts
        ))),
    }
}

fn from_object(value: &Value) -> Result<Ulimit> {
    if let Err(errors) = ULIMIT_VALIDATOR.validate(value) {
        let messages: Vec<String> = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect();
        return Err(Error::Conversion(messages.join("; ")));
    }

    let soft = attribute(value, "soft")?;
    let hard = match value.get("hard") {
        None | Some(Value::Null) => soft,
        Some(_) => attribute(value, "hard")?,
    };
    Ok(Ulimit::new(soft, hard))
}

fn attribute(value: &Value, name: &str) -> Result<i64> {
    value
        .get(name)
        .and_then(to_limit)
        .ok_or_else(|| Error::Conversion(format!("attribute {:?}: number required", name)))
}

/// Converts a number or numeric string, truncating fractions toward zero and
/// saturating outside the `i64` range.
fn to_limit(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => Some(number_to_limit(number)),
        Value::String(text) => text.parse::<i64>().ok().or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .map(|float| float as i64)
        }),
        _ => None,
    }
}

fn number_to_limit(number: &Number) -> i64 {
    if let Some(integer) = number.as_i64() {
        integer
    } else if number.as_u64().is_some() {
        i64::MAX
    } else {
        number.as_f64().map(|float| float as i64).unwrap_or_default()
    }
}

/// Encodes a collection as a map of name to object form. An empty collection
/// yields an empty map, never null.
pub fn encode_ulimits(ulimits: &Ulimits) -> Value {
    let mut entries = Map::new();
    for (name, ulimit) in ulimits {
        entries.insert(name.clone(), encode_ulimit(Some(ulimit)));
    }
    Value::Object(entries)
}

/// Encodes a single limit in the object form, `None` yields null.
pub fn encode_ulimit(ulimit: Option<&Ulimit>) -> Value {
    match ulimit {
        None => Value::Null,
        Some(ulimit) => json!({
            "soft": ulimit.soft,
            "hard": ulimit.hard
        }),
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
