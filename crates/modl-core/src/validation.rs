// ============================================================================
// modl Core - Registration Input Validation
// File: crates/modl-core/src/validation.rs
// ============================================================================
//! Turns an untrusted JSON payload into a [`RegistrationRequest`].
//!
//! Every field is checked on every call so the caller gets the complete list
//! of problems at once. Violations are reported in a fixed field order:
//! `email`, `serverName`, `customDomain`, `plan`, `agreeTerms`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use modl_shared::constants::MAX_SUBDOMAIN_LENGTH;
use modl_shared::Plan;

use crate::domain::RegistrationRequest;

pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_SERVER_NAME_REQUIRED: &str = "Server name is required";
pub const MSG_SERVER_NAME_TOO_SHORT: &str = "Server name must be at least 3 characters";
pub const MSG_SUBDOMAIN_REQUIRED: &str = "Subdomain is required";
pub const MSG_SUBDOMAIN_TOO_SHORT: &str = "Subdomain must be at least 3 characters";
pub const MSG_SUBDOMAIN_TOO_LONG: &str = "Subdomain must be at most 63 characters";
pub const MSG_SUBDOMAIN_CHARSET: &str =
    "Subdomain may only contain lowercase letters, numbers and hyphens";
pub const MSG_PLAN_INVALID: &str = "Plan must be either 'free' or 'premium'";
pub const MSG_TERMS_REQUIRED: &str = "You must agree to the terms to continue";
pub const MSG_EXPECTED_STRING: &str = "Expected string";
pub const MSG_EXPECTED_OBJECT: &str = "Expected a JSON object";

static SUBDOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("subdomain pattern is valid")
});

/// One offending field and a message suitable for showing next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// String-typed fields after extraction, checked with `validator` rules.
#[derive(Debug, Default, Validate)]
struct RegistrationForm {
    #[validate(
        required(message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    email: Option<String>,

    #[validate(
        required(message = "Server name is required"),
        length(min = 3, message = "Server name must be at least 3 characters")
    )]
    server_name: Option<String>,

    #[validate(
        required(message = "Subdomain is required"),
        length(min = 3, message = "Subdomain must be at least 3 characters")
    )]
    custom_domain: Option<String>,
}

/// (struct field, wire field) in reporting order.
const FORM_FIELDS: [(&str, &str); 3] = [
    ("email", "email"),
    ("server_name", "serverName"),
    ("custom_domain", "customDomain"),
];

/// Validates a raw registration payload.
///
/// Pure: no I/O. On success `plan` defaults to `free` when absent or null and
/// the subdomain is trimmed and lowercased.
pub fn validate_registration(payload: &Value) -> Result<RegistrationRequest, Vec<FieldViolation>> {
    let Some(obj) = payload.as_object() else {
        return Err(vec![FieldViolation::new("body", MSG_EXPECTED_OBJECT)]);
    };

    let mut type_errors: Vec<FieldViolation> = Vec::new();
    let form = RegistrationForm {
        email: string_field(obj, "email", &mut type_errors),
        server_name: string_field(obj, "serverName", &mut type_errors),
        custom_domain: string_field(obj, "customDomain", &mut type_errors)
            .map(|s| s.to_lowercase()),
    };

    let mut violations: Vec<FieldViolation> = Vec::new();
    let form_errors = form.validate().err();

    for (struct_field, wire_field) in FORM_FIELDS {
        if let Some(type_error) = type_errors.iter().find(|v| v.field == wire_field) {
            violations.push(type_error.clone());
            continue;
        }
        let field_errors = form_errors
            .as_ref()
            .and_then(|errors| errors.field_errors().get(struct_field).map(|list| list.to_vec()));
        match field_errors {
            Some(list) if !list.is_empty() => {
                violations.extend(list.iter().map(|err| FieldViolation {
                    field: wire_field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                }));
            }
            _ if wire_field == "customDomain" => {
                if let Some(label) = form.custom_domain.as_deref() {
                    violations.extend(check_subdomain_label(label));
                }
            }
            _ => {}
        }
    }

    let plan = match obj.get("plan") {
        None | Some(Value::Null) => Some(Plan::default()),
        Some(Value::String(s)) => Plan::parse(s.trim()),
        Some(_) => None,
    };
    if plan.is_none() {
        violations.push(FieldViolation::new("plan", MSG_PLAN_INVALID));
    }

    if !matches!(obj.get("agreeTerms"), Some(Value::Bool(true))) {
        violations.push(FieldViolation::new("agreeTerms", MSG_TERMS_REQUIRED));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    match (form.email, form.server_name, form.custom_domain, plan) {
        (Some(email), Some(server_name), Some(custom_domain), Some(plan)) => Ok(RegistrationRequest {
            email,
            server_name,
            custom_domain,
            plan,
        }),
        // Unreachable when no violation was recorded; keep the contract anyway.
        _ => Err(vec![FieldViolation::new("body", MSG_EXPECTED_OBJECT)]),
    }
}

/// Reads an optional string field, trimming it. Wrong JSON types are recorded.
fn string_field(
    obj: &Map<String, Value>,
    key: &str,
    type_errors: &mut Vec<FieldViolation>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            type_errors.push(FieldViolation::new(key, MSG_EXPECTED_STRING));
            None
        }
    }
}

fn check_subdomain_label(label: &str) -> Option<FieldViolation> {
    if label.chars().count() > MAX_SUBDOMAIN_LENGTH {
        return Some(FieldViolation::new("customDomain", MSG_SUBDOMAIN_TOO_LONG));
    }
    if !SUBDOMAIN_LABEL.is_match(label) {
        return Some(FieldViolation::new("customDomain", MSG_SUBDOMAIN_CHARSET));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "email": "a@b.com",
            "serverName": "My Server",
            "customDomain": "myserver",
            "plan": "free",
            "agreeTerms": true
        })
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn accepts_valid_payload() {
        let request = validate_registration(&valid_payload()).unwrap();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.server_name, "My Server");
        assert_eq!(request.custom_domain, "myserver");
        assert_eq!(request.plan, Plan::Free);
    }

    #[test]
    fn plan_defaults_to_free_when_missing_or_null() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("plan");
        assert_eq!(validate_registration(&payload).unwrap().plan, Plan::Free);

        payload["plan"] = Value::Null;
        assert_eq!(validate_registration(&payload).unwrap().plan, Plan::Free);
    }

    #[test]
    fn accepts_premium_plan() {
        let mut payload = valid_payload();
        payload["plan"] = json!("premium");
        assert_eq!(validate_registration(&payload).unwrap().plan, Plan::Premium);
    }

    #[test]
    fn rejects_unknown_plan() {
        let mut payload = valid_payload();
        payload["plan"] = json!("enterprise");
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(violations, vec![FieldViolation::new("plan", MSG_PLAN_INVALID)]);
    }

    #[test]
    fn terms_must_be_literally_true() {
        for terms in [json!(false), json!("true"), json!(1), Value::Null] {
            let mut payload = valid_payload();
            payload["agreeTerms"] = terms;
            let violations = validate_registration(&payload).unwrap_err();
            assert_eq!(violations, vec![FieldViolation::new("agreeTerms", MSG_TERMS_REQUIRED)]);
        }

        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("agreeTerms");
        assert_eq!(fields(&validate_registration(&payload).unwrap_err()), vec!["agreeTerms"]);
    }

    #[test]
    fn short_server_name_names_the_field() {
        let mut payload = valid_payload();
        payload["serverName"] = json!("ab");
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(
            violations,
            vec![FieldViolation::new("serverName", MSG_SERVER_NAME_TOO_SHORT)]
        );
    }

    #[test]
    fn short_subdomain_names_the_field() {
        let mut payload = valid_payload();
        payload["customDomain"] = json!("ab");
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(
            violations,
            vec![FieldViolation::new("customDomain", MSG_SUBDOMAIN_TOO_SHORT)]
        );
    }

    #[test]
    fn whitespace_does_not_count_towards_length() {
        let mut payload = valid_payload();
        payload["serverName"] = json!("  ab  ");
        assert_eq!(fields(&validate_registration(&payload).unwrap_err()), vec!["serverName"]);
    }

    #[test]
    fn malformed_email_rejected_independently() {
        let mut payload = valid_payload();
        payload["email"] = json!("not-an-email");
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(violations, vec![FieldViolation::new("email", MSG_EMAIL_INVALID)]);

        // Still reported alongside other failures.
        payload["serverName"] = json!("x");
        payload["agreeTerms"] = json!(false);
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(fields(&violations), vec!["email", "serverName", "agreeTerms"]);
    }

    #[test]
    fn missing_fields_are_required() {
        let violations = validate_registration(&json!({})).unwrap_err();
        assert_eq!(
            violations,
            vec![
                FieldViolation::new("email", MSG_EMAIL_REQUIRED),
                FieldViolation::new("serverName", MSG_SERVER_NAME_REQUIRED),
                FieldViolation::new("customDomain", MSG_SUBDOMAIN_REQUIRED),
                FieldViolation::new("agreeTerms", MSG_TERMS_REQUIRED),
            ]
        );
    }

    #[test]
    fn wrong_types_are_reported_per_field() {
        let mut payload = valid_payload();
        payload["serverName"] = json!(42);
        payload["plan"] = json!(true);
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(
            violations,
            vec![
                FieldViolation::new("serverName", MSG_EXPECTED_STRING),
                FieldViolation::new("plan", MSG_PLAN_INVALID),
            ]
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        for payload in [json!([]), json!("register me"), Value::Null] {
            let violations = validate_registration(&payload).unwrap_err();
            assert_eq!(violations, vec![FieldViolation::new("body", MSG_EXPECTED_OBJECT)]);
        }
    }

    #[test]
    fn subdomain_is_normalized_to_lowercase() {
        let mut payload = valid_payload();
        payload["customDomain"] = json!("  MyServer ");
        assert_eq!(validate_registration(&payload).unwrap().custom_domain, "myserver");
    }

    #[test]
    fn subdomain_must_be_a_dns_label() {
        for label in ["my_server", "-acme", "acme-", "acme.gg", "ac me"] {
            let mut payload = valid_payload();
            payload["customDomain"] = json!(label);
            let violations = validate_registration(&payload).unwrap_err();
            assert_eq!(
                violations,
                vec![FieldViolation::new("customDomain", MSG_SUBDOMAIN_CHARSET)],
                "label {:?}",
                label
            );
        }

        let mut payload = valid_payload();
        payload["customDomain"] = json!("my-server-01");
        assert!(validate_registration(&payload).is_ok());
    }

    #[test]
    fn subdomain_longer_than_a_label_is_rejected() {
        let mut payload = valid_payload();
        payload["customDomain"] = json!("a".repeat(64));
        let violations = validate_registration(&payload).unwrap_err();
        assert_eq!(violations, vec![FieldViolation::new("customDomain", MSG_SUBDOMAIN_TOO_LONG)]);
    }
}
