//! Declarative request validation: per-route field rules evaluated against path params and body.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Where a rule reads its field from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One check in a field's chain, carrying the message reported when it fails.
#[derive(Clone, Copy, Debug)]
pub enum Check {
    NotEmpty(&'static str),
    Numeric(&'static str),
    GreaterThanZero(&'static str),
    /// Absent values pass; present ones must be a string, number or boolean.
    Scalar(&'static str),
    /// Absent values pass; present ones must coerce to a boolean.
    OptionalBoolean(&'static str),
}

impl Check {
    fn message(&self) -> &'static str {
        match self {
            Check::NotEmpty(m)
            | Check::Numeric(m)
            | Check::GreaterThanZero(m)
            | Check::Scalar(m)
            | Check::OptionalBoolean(m) => m,
        }
    }

    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Check::NotEmpty(_) => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            Check::Numeric(_) => match value {
                Some(Value::Number(_)) => true,
                Some(Value::String(s)) => is_numeric_str(s),
                _ => false,
            },
            Check::GreaterThanZero(_) => numeric_value(value).is_some_and(|n| n > 0.0),
            Check::Scalar(_) => match value {
                None | Some(Value::Null) => true,
                Some(v) => coerce_text(v).is_some(),
            },
            Check::OptionalBoolean(_) => match value {
                None | Some(Value::Null) => true,
                Some(v) => coerce_bool(v).is_some(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub location: Location,
    pub checks: &'static [Check],
}

impl FieldRule {
    pub const fn body(field: &'static str, checks: &'static [Check]) -> Self {
        FieldRule { field, location: Location::Body, checks }
    }

    pub const fn param(field: &'static str, checks: &'static [Check]) -> Self {
        FieldRule { field, location: Location::Params, checks }
    }
}

/// A single failed check, shaped the way API clients already consume it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Ordered rules bound to one route.
#[derive(Clone, Copy, Debug)]
pub struct RuleSet(pub &'static [FieldRule]);

impl RuleSet {
    pub fn needs_body(&self) -> bool {
        self.0.iter().any(|r| r.location == Location::Body)
    }

    /// Run every check of every rule; failures are collected in declaration order.
    pub fn evaluate(
        &self,
        params: &HashMap<String, String>,
        body: &Value,
    ) -> Result<(), ValidationErrors> {
        let mut out = ValidationErrors::default();
        for rule in self.0 {
            let value = match rule.location {
                Location::Params => params.get(rule.field).map(|s| Value::String(s.clone())),
                Location::Body => body.get(rule.field).cloned(),
            };
            for check in rule.checks {
                if !check.passes(value.as_ref()) {
                    out.errors.push(FieldError {
                        kind: "field",
                        value: value.clone(),
                        msg: check.message(),
                        path: rule.field,
                        location: rule.location,
                    });
                }
            }
        }
        if out.is_empty() {
            Ok(())
        } else {
            Err(out)
        }
    }
}

pub const MSG_NAME_EMPTY: &str = "product name must not be empty";
pub const MSG_NAME_TEXT: &str = "product name must be text";
pub const MSG_PRICE_EMPTY: &str = "product price must not be empty";
pub const MSG_PRICE_NUMERIC: &str = "price must be numeric";
// Wording kept for client compatibility; the check is strictly greater than zero.
pub const MSG_PRICE_POSITIVE: &str = "price must be greater than or equal to zero";
pub const MSG_ID_NUMERIC: &str = "id must be numeric";
pub const MSG_AVAILABILITY_BOOLEAN: &str = "availability must be a boolean";

const ID_RULE: FieldRule = FieldRule::param("id", &[Check::Numeric(MSG_ID_NUMERIC)]);
const NAME_RULE: FieldRule = FieldRule::body(
    "name",
    &[Check::NotEmpty(MSG_NAME_EMPTY), Check::Scalar(MSG_NAME_TEXT)],
);
const PRICE_RULE: FieldRule = FieldRule::body(
    "price",
    &[
        Check::NotEmpty(MSG_PRICE_EMPTY),
        Check::Numeric(MSG_PRICE_NUMERIC),
        Check::GreaterThanZero(MSG_PRICE_POSITIVE),
    ],
);
const AVAILABILITY_RULE: FieldRule = FieldRule::body(
    "availability",
    &[Check::OptionalBoolean(MSG_AVAILABILITY_BOOLEAN)],
);

pub const PRODUCT_ID: RuleSet = RuleSet(&[ID_RULE]);
pub const PRODUCT_BODY: RuleSet = RuleSet(&[NAME_RULE, PRICE_RULE, AVAILABILITY_RULE]);
pub const PRODUCT_UPDATE: RuleSet = RuleSet(&[ID_RULE, NAME_RULE, PRICE_RULE, AVAILABILITY_RULE]);

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("static numeric pattern"))
}

pub fn is_numeric_str(s: &str) -> bool {
    numeric_re().is_match(s)
}

/// Boolean forms accepted for `availability`: JSON booleans, "true"/"false", 1/0.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Scalar text form of a value, so a numeric `name` is stored as its digits.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Loose comparison against zero: booleans count as 1/0.
fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if is_numeric_str(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_params() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn valid_body_passes() {
        let body = json!({ "name": "Monitor", "price": 300.5 });
        assert!(PRODUCT_BODY.evaluate(&no_params(), &body).is_ok());
    }

    #[test]
    fn numeric_strings_are_accepted_for_price() {
        let body = json!({ "name": "Monitor", "price": "89" });
        assert!(PRODUCT_BODY.evaluate(&no_params(), &body).is_ok());
    }

    #[test]
    fn empty_body_reports_every_failed_check_in_order() {
        let err = PRODUCT_BODY.evaluate(&no_params(), &json!({})).unwrap_err();
        let msgs: Vec<_> = err.errors.iter().map(|e| e.msg).collect();
        assert_eq!(
            msgs,
            vec![MSG_NAME_EMPTY, MSG_PRICE_EMPTY, MSG_PRICE_NUMERIC, MSG_PRICE_POSITIVE]
        );
        assert!(err.errors.iter().all(|e| e.location == Location::Body));
    }

    #[test]
    fn zero_price_only_fails_the_positive_check() {
        let body = json!({ "name": "Tes", "price": 0 });
        let err = PRODUCT_BODY.evaluate(&no_params(), &body).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].msg, MSG_PRICE_POSITIVE);
        assert_eq!(err.errors[0].path, "price");
        assert_eq!(err.errors[0].value, Some(json!(0)));
    }

    #[test]
    fn negative_and_non_numeric_prices_fail() {
        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": "a", "price": -3 }))
            .unwrap_err();
        assert_eq!(err.errors[0].msg, MSG_PRICE_POSITIVE);

        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": "a", "price": "cheap" }))
            .unwrap_err();
        let msgs: Vec<_> = err.errors.iter().map(|e| e.msg).collect();
        assert_eq!(msgs, vec![MSG_PRICE_NUMERIC, MSG_PRICE_POSITIVE]);
    }

    #[test]
    fn empty_name_string_fails() {
        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": "", "price": 10 }))
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].msg, MSG_NAME_EMPTY);
    }

    #[test]
    fn id_param_must_be_numeric() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "abc".to_string());
        let err = PRODUCT_ID.evaluate(&params, &Value::Null).unwrap_err();
        assert_eq!(err.errors[0].msg, MSG_ID_NUMERIC);
        assert_eq!(err.errors[0].location, Location::Params);

        params.insert("id".to_string(), "42".to_string());
        assert!(PRODUCT_ID.evaluate(&params, &Value::Null).is_ok());
    }

    #[test]
    fn update_rules_collect_param_and_body_failures_together() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "x".to_string());
        let err = PRODUCT_UPDATE
            .evaluate(&params, &json!({ "name": "ok", "price": 0 }))
            .unwrap_err();
        let paths: Vec<_> = err.errors.iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["id", "price"]);
    }

    #[test]
    fn boolean_price_only_fails_the_numeric_check() {
        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": "a", "price": true }))
            .unwrap_err();
        let msgs: Vec<_> = err.errors.iter().map(|e| e.msg).collect();
        assert_eq!(msgs, vec![MSG_PRICE_NUMERIC]);
    }

    #[test]
    fn availability_must_coerce_to_boolean_when_present() {
        for ok in [json!(true), json!("false"), json!(0), Value::Null] {
            let body = json!({ "name": "a", "price": 1, "availability": ok });
            assert!(PRODUCT_BODY.evaluate(&no_params(), &body).is_ok(), "{body}");
        }
        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": "a", "price": 1, "availability": "yes" }))
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].msg, MSG_AVAILABILITY_BOOLEAN);
        assert_eq!(err.errors[0].path, "availability");
    }

    #[test]
    fn scalar_names_coerce_to_text() {
        assert_eq!(coerce_text(&json!(123)).as_deref(), Some("123"));
        assert_eq!(coerce_text(&json!("Lamp")).as_deref(), Some("Lamp"));
        assert_eq!(coerce_text(&json!(["x"])), None);

        let err = PRODUCT_BODY
            .evaluate(&no_params(), &json!({ "name": { "en": "Lamp" }, "price": 1 }))
            .unwrap_err();
        let msgs: Vec<_> = err.errors.iter().map(|e| e.msg).collect();
        assert_eq!(msgs, vec![MSG_NAME_TEXT]);
    }

    #[test]
    fn numeric_pattern() {
        for ok in ["1", "-2", "+3", "4.5", ".5"] {
            assert!(is_numeric_str(ok), "{ok}");
        }
        for bad in ["", "1.", "1e3", "abc", "1 2"] {
            assert!(!is_numeric_str(bad), "{bad}");
        }
    }
}
