//! Payload conversion for Cloud Foundry v2 JSON envelopes.
//!
//! Single resources arrive as `{ "metadata": {...}, "entity": {...} }`;
//! collections wrap resources in a `resources` array. Conversion is
//! fail-fast: an empty payload, a parse failure, or any missing required
//! member fails the whole conversion with a [`CfError::Format`] that names
//! the property and echoes the offending payload. Partial objects are never
//! produced.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{CfError, Result};

/// Conversion from one parsed v2 resource node into a typed domain object.
pub(crate) trait FromResource: Sized {
    fn from_resource(resource: &Value) -> Result<Self>;
}

/// Parse raw payload text, rejecting empty input.
pub(crate) fn parse(payload: &str) -> Result<Value> {
    if payload.trim().is_empty() {
        return Err(CfError::format("empty payload", payload));
    }

    serde_json::from_str(payload)
        .map_err(|e| CfError::format(format!("payload is not valid JSON: {e}"), payload))
}

/// Convert a single-resource payload.
pub(crate) fn single<T: FromResource>(payload: &str) -> Result<T> {
    let value = parse(payload)?;
    T::from_resource(&value)
}

/// Convert a collection payload, preserving `resources` array order.
pub(crate) fn collection<T: FromResource>(payload: &str) -> Result<Vec<T>> {
    let value = parse(payload)?;
    resources(&value)?.iter().map(T::from_resource).collect()
}

/// Convert a collection payload and report `total_results` when present.
pub(crate) fn collection_with_total<T: FromResource>(
    payload: &str,
) -> Result<(Vec<T>, Option<u64>)> {
    let value = parse(payload)?;
    let items = resources(&value)?
        .iter()
        .map(T::from_resource)
        .collect::<Result<Vec<T>>>()?;
    let total = value.get("total_results").and_then(Value::as_u64);
    Ok((items, total))
}

/// The `metadata` and `entity` members of one resource envelope.
pub(crate) struct ResourceParts<'a> {
    pub metadata: &'a Value,
    pub entity: &'a Value,
}

/// Split a resource into its `metadata` and `entity` members.
pub(crate) fn parts(resource: &Value) -> Result<ResourceParts<'_>> {
    let metadata = member(resource, "metadata")?;
    let entity = member(resource, "entity")?;
    Ok(ResourceParts { metadata, entity })
}

/// Extract the resource guid from its metadata.
pub(crate) fn guid(parts: &ResourceParts<'_>, resource: &Value) -> Result<String> {
    required_str(parts.metadata, "guid", resource).map(str::to_string)
}

/// The `created_at` timestamp, defaulting to the Unix epoch when absent.
pub(crate) fn created_at(parts: &ResourceParts<'_>, resource: &Value) -> Result<DateTime<Utc>> {
    match parts.metadata.get("created_at") {
        None | Some(Value::Null) => Ok(DateTime::<Utc>::UNIX_EPOCH),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                CfError::format(
                    format!("invalid 'created_at' timestamp: {e}"),
                    resource.to_string(),
                )
            }),
        Some(_) => Err(CfError::format(
            "'created_at' is not a string",
            resource.to_string(),
        )),
    }
}

fn member<'a>(resource: &'a Value, property: &str) -> Result<&'a Value> {
    match resource.get(property) {
        Some(v) if v.is_object() => Ok(v),
        _ => Err(CfError::format(
            format!("missing '{property}' property"),
            resource.to_string(),
        )),
    }
}

fn resources(value: &Value) -> Result<&Vec<Value>> {
    value
        .get("resources")
        .and_then(Value::as_array)
        .ok_or_else(|| CfError::format("missing 'resources' property", value.to_string()))
}

/// A required non-empty string property.
pub(crate) fn required_str<'a>(node: &'a Value, property: &str, resource: &Value) -> Result<&'a str> {
    match node.get(property).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(CfError::format(
            format!("missing '{property}' property"),
            resource.to_string(),
        )),
    }
}

/// A required unsigned integer property.
pub(crate) fn required_u64(node: &Value, property: &str, resource: &Value) -> Result<u64> {
    node.get(property).and_then(Value::as_u64).ok_or_else(|| {
        CfError::format(
            format!("missing '{property}' property"),
            resource.to_string(),
        )
    })
}

/// A required unsigned integer property that must fit in 32 bits.
pub(crate) fn required_u32(node: &Value, property: &str, resource: &Value) -> Result<u32> {
    let v = required_u64(node, property, resource)?;
    u32::try_from(v).map_err(|_| {
        CfError::format(
            format!("'{property}' value out of range"),
            resource.to_string(),
        )
    })
}

/// An optional string property; null and absent read the same.
pub(crate) fn optional_str(node: &Value, property: &str) -> Option<String> {
    node.get(property)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// An optional unsigned integer property.
pub(crate) fn optional_u64(node: &Value, property: &str) -> Option<u64> {
    node.get(property).and_then(Value::as_u64)
}

/// An optional float property.
pub(crate) fn optional_f64(node: &Value, property: &str) -> Option<f64> {
    node.get(property).and_then(Value::as_f64)
}
