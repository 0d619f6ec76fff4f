//! Voyage embedding payloads

use super::{str_at, u64_at, Extracted, VendorError};
use crate::error::{Error, Result};
use crate::response::Usage;
use serde_json::Value;

pub(crate) fn error(raw: &Value) -> Option<VendorError> {
    let detail = raw.get("detail").filter(|d| !d.is_null())?;
    let message = detail
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| detail.to_string());
    Some(VendorError {
        message,
        status: None,
    })
}

pub(crate) fn extract(raw: &Value) -> Result<Extracted> {
    let data = raw
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidResponse("voyage response has no data".to_string()))?;

    let mut indexed: Vec<(u64, Vec<f64>)> = data
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let index = u64_at(item, "/index").unwrap_or(position as u64);
            let vector = item
                .get("embedding")
                .and_then(Value::as_array)
                .map(|values| values.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default();
            (index, vector)
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    let usage = raw.get("usage").filter(|u| u.is_object()).map(|u| {
        let total = u64_at(u, "/total_tokens");
        Usage {
            input_tokens: total,
            total_tokens: total,
            ..Default::default()
        }
    });

    Ok(Extracted {
        id: str_at(raw, "/id").unwrap_or_default(),
        model: str_at(raw, "/model").unwrap_or_default(),
        usage,
        embeddings: Some(indexed.into_iter().map(|(_, vector)| vector).collect()),
        ..Default::default()
    })
}
