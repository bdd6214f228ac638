//! Schema validation for incoming chart request bodies.
//!
//! The body is first parsed into a generic JSON value and walked field by
//! field so that every problem is reported with its location, instead of
//! stopping at the first serde error. Only a body that passes the walk is
//! deserialized into [`ChartRequest`].
//!
//! Amounts are read leniently: numeric strings and booleans are coerced to
//! numbers before the range checks, and written back into the value.

use serde_json::{Map, Value};

use crate::error::{FieldError, LocSegment, ReportError, ReportResult};
use crate::request::{ChartRequest, Period};

/// Parse and validate a raw request body.
pub fn validate_chart_request(body: &[u8]) -> ReportResult<ChartRequest> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| ReportError::Validation(vec![json_invalid(body, &e)]))?;

    let mut checker = SchemaChecker::default();
    checker.check_request(&value);
    if !checker.errors.is_empty() {
        return Err(ReportError::Validation(checker.errors));
    }
    for (pointer, amount) in checker.coerced {
        if let Some(slot) = value.pointer_mut(&pointer) {
            *slot = Value::from(amount);
        }
    }

    let request: ChartRequest = serde_json::from_value(value)?;
    request.validate()?;
    Ok(request)
}

fn json_invalid(body: &[u8], err: &serde_json::Error) -> FieldError {
    let offset = byte_offset(body, err.line(), err.column());
    FieldError::new(
        vec!["body".into(), offset.into()],
        "json_invalid",
        format!("JSON decode error: {}", err),
    )
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, text) in body.split(|b| *b == b'\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(body.len());
        }
        offset += text.len() + 1;
    }
    body.len()
}

#[derive(Default)]
struct SchemaChecker {
    errors: Vec<FieldError>,
    /// JSON pointer and number for every amount that was not already a number.
    coerced: Vec<(String, f64)>,
}

impl SchemaChecker {
    fn push(&mut self, loc: &[LocSegment], kind: &'static str, msg: impl Into<String>) {
        self.errors.push(FieldError::new(loc.to_vec(), kind, msg));
    }

    fn check_request(&mut self, value: &Value) {
        let root = [LocSegment::from("body")];
        let Some(obj) = value.as_object() else {
            self.push(
                &root,
                "model_attributes_type",
                "Input should be a valid dictionary or object to extract fields from",
            );
            return;
        };

        if let Some(period) = self.field(obj, &root, "period") {
            self.check_period(period, &child(&root, "period"));
        }
        if let Some(v) = self.field(obj, &root, "incomeTotal") {
            self.check_amount(v, &child(&root, "incomeTotal"));
        }
        if let Some(v) = self.field(obj, &root, "expenseTotal") {
            self.check_amount(v, &child(&root, "expenseTotal"));
        }

        if let Some(v) = self.field(obj, &root, "categoryBreakdown") {
            let loc = child(&root, "categoryBreakdown");
            if let Some(items) = self.list(v, &loc) {
                for (i, item) in items.iter().enumerate() {
                    let item_loc = child(&loc, i);
                    if let Some(point) = self.object(item, &item_loc) {
                        if let Some(v) = self.field(point, &item_loc, "category") {
                            self.check_string(v, &child(&item_loc, "category"));
                        }
                        if let Some(v) = self.field(point, &item_loc, "total") {
                            self.check_amount(v, &child(&item_loc, "total"));
                        }
                    }
                }
            }
        }

        if let Some(v) = self.field(obj, &root, "trend") {
            let loc = child(&root, "trend");
            if let Some(items) = self.list(v, &loc) {
                for (i, item) in items.iter().enumerate() {
                    let item_loc = child(&loc, i);
                    if let Some(point) = self.object(item, &item_loc) {
                        if let Some(v) = self.field(point, &item_loc, "date") {
                            self.check_string(v, &child(&item_loc, "date"));
                        }
                        for key in ["income", "expense"] {
                            if let Some(v) = self.field(point, &item_loc, key) {
                                self.check_amount(v, &child(&item_loc, key));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Look up a required key, recording `missing` when absent.
    fn field<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        parent: &[LocSegment],
        key: &str,
    ) -> Option<&'a Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.push(&child(parent, key), "missing", "Field required");
        }
        value
    }

    fn object<'a>(
        &mut self,
        value: &'a Value,
        loc: &[LocSegment],
    ) -> Option<&'a Map<String, Value>> {
        let obj = value.as_object();
        if obj.is_none() {
            self.push(
                loc,
                "model_type",
                "Input should be a valid dictionary or instance of the model",
            );
        }
        obj
    }

    fn list<'a>(&mut self, value: &'a Value, loc: &[LocSegment]) -> Option<&'a Vec<Value>> {
        let items = value.as_array();
        if items.is_none() {
            self.push(loc, "list_type", "Input should be a valid list");
        }
        items
    }

    fn check_string(&mut self, value: &Value, loc: &[LocSegment]) {
        if !value.is_string() {
            self.push(loc, "string_type", "Input should be a valid string");
        }
    }

    fn check_amount(&mut self, value: &Value, loc: &[LocSegment]) {
        let amount = match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    self.push(
                        loc,
                        "float_parsing",
                        "Input should be a valid number, unable to parse string as a number",
                    );
                    return;
                }
            },
            _ => None,
        };
        if !value.is_number() {
            if let Some(v) = amount.filter(|v| v.is_finite()) {
                self.coerced.push((json_pointer(loc), v));
            }
        }
        match amount {
            None => self.push(loc, "float_type", "Input should be a valid number"),
            Some(v) if !v.is_finite() => {
                self.push(loc, "finite_number", "Input should be a finite number")
            }
            Some(v) if v < 0.0 => self.push(
                loc,
                "greater_than_equal",
                "Input should be greater than or equal to 0",
            ),
            Some(_) => {}
        }
    }

    fn check_period(&mut self, value: &Value, loc: &[LocSegment]) {
        let valid = value.as_str().and_then(Period::parse).is_some();
        if !valid {
            self.push(
                loc,
                "literal_error",
                "Input should be 'daily', 'weekly' or 'monthly'",
            );
        }
    }
}

/// JSON pointer for a body-rooted location, dropping the leading `body`.
fn json_pointer(loc: &[LocSegment]) -> String {
    loc.iter().skip(1).map(|seg| format!("/{}", seg)).collect()
}

fn child(parent: &[LocSegment], segment: impl Into<LocSegment>) -> Vec<LocSegment> {
    let mut loc = parent.to_vec();
    loc.push(segment.into());
    loc
}
