// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON chart data.
//!
//! The accepted document is an array of objects:
//!
//! ```json
//! [
//!   { "label": "A", "percentage": 0.3, "hex": "#123456" },
//!   { "label": "B", "percentage": 0.7, "hex": "#654321" }
//! ]
//! ```
//!
//! Fields are type-checked one by one so the error names the offending item. `label` is optional
//! and defaults to the item's color string.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::model::{ChartData, SegmentInput};

fn item_from_json(index: usize, value: &Value) -> Result<SegmentInput, ValidationError> {
    let Value::Object(fields) = value else {
        return Err(ValidationError::Malformed(alloc::format!(
            "item {index} is not an object"
        )));
    };

    let percentage = match field(fields, index, "percentage")? {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::NonNumericPercentage { index })?,
        _ => return Err(ValidationError::NonNumericPercentage { index }),
    };
    let hex = match field(fields, index, "hex")? {
        Value::String(s) => s.clone(),
        _ => return Err(ValidationError::NonStringColor { index }),
    };
    let label = match fields.get("label") {
        None | Some(Value::Null) => hex.clone(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationError::NonStringLabel { index }),
    };

    Ok(SegmentInput {
        label,
        percentage,
        hex,
    })
}

fn field<'a>(
    fields: &'a Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<&'a Value, ValidationError> {
    fields
        .get(name)
        .ok_or(ValidationError::MissingField { index, field: name })
}

fn items_from_json(json: &str) -> Result<Vec<SegmentInput>, ValidationError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ValidationError::Malformed("expected an array of items".into()));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| item_from_json(index, item))
        .collect()
}

impl ChartData {
    /// Parses and validates a JSON array of `{label, percentage, hex}` items (fractions).
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Self::new(items_from_json(json)?)
    }

    /// Like [`ChartData::from_json`], but percentages run from 0 to 100.
    pub fn from_legacy_json(json: &str) -> Result<Self, ValidationError> {
        Self::from_legacy_percentages(items_from_json(json)?)
    }
}
