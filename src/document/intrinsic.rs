//! Conversion of the YAML tree into plain JSON
//!
//! CloudFormation short-form intrinsics are flattened into their long form:
//!
//! - `!Ref Bucket` becomes `{"Ref": "Bucket"}`
//! - `!Condition IsProd` becomes `{"Condition": "IsProd"}`
//! - `!GetAtt Queue.Arn` becomes `{"Fn::GetAtt": ["Queue", "Arn"]}`
//! - any other `!Name value` becomes `{"Fn::Name": value}`

use serde_json::{Map, Value as JsonValue};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Number, Value};

use crate::error::{MergeError, Result};

/// Convert a document tree to a JSON value.
pub fn to_json(value: &Value) -> Result<JsonValue> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number_to_json(n),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Sequence(items) => {
            JsonValue::Array(items.iter().map(to_json).collect::<Result<Vec<_>>>()?)
        }
        Value::Mapping(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(key_to_string(key)?, to_json(value)?);
            }
            JsonValue::Object(object)
        }
        Value::Tagged(tagged) => flatten_intrinsic(tagged)?,
    })
}

fn number_to_json(n: &Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::from(i)
    } else if let Some(u) = n.as_u64() {
        JsonValue::from(u)
    } else {
        // NaN and infinities have no JSON form
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(JsonValue::Null, JsonValue::Number)
    }
}

pub(crate) fn key_to_string(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(MergeError::UnsupportedKey(format!("{:?}", other))),
    }
}

fn flatten_intrinsic(tagged: &TaggedValue) -> Result<JsonValue> {
    let tag = tagged.tag.to_string();
    let name = tag.trim_start_matches('!');

    let key = match name {
        "Ref" | "Condition" => name.to_string(),
        _ => format!("Fn::{}", name),
    };

    let value = match (name, &tagged.value) {
        ("GetAtt", Value::String(s)) => match s.split_once('.') {
            Some((resource, attribute)) => JsonValue::Array(vec![
                JsonValue::String(resource.to_string()),
                JsonValue::String(attribute.to_string()),
            ]),
            None => JsonValue::String(s.clone()),
        },
        (_, inner) => to_json(inner)?,
    };

    let mut object = Map::with_capacity(1);
    object.insert(key, value);
    Ok(JsonValue::Object(object))
}
