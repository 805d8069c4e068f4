//! Submission validation.
//!
//! Turns an untyped payload into a [`ContactRequest`]. Only shape is
//! checked: required fields must be strings, `nome` must not be blank, and
//! `empresa` may be a string, `null`, or missing. Every offending field is
//! reported, not just the first.

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};
use crate::model::ContactRequest;

const REQUIRED: &str = "field required";
const NOT_A_STRING: &str = "must be a string";

/// Parses a raw request body and validates it.
pub fn parse_submission(body: &[u8]) -> Result<ContactRequest, ValidationError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
    validate(&payload)
}

/// Validates an already-decoded JSON payload.
///
/// Unknown fields, including any client-supplied `id`, are ignored.
pub fn validate(payload: &Value) -> Result<ContactRequest, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;
    let mut errors = Vec::new();

    let nome = required_string(object, "nome", &mut errors);
    if let Some(nome) = &nome
        && nome.trim().is_empty()
    {
        errors.push(FieldError::new("nome", "must not be empty"));
    }
    let email = required_string(object, "email", &mut errors);
    let telefone = required_string(object, "telefone", &mut errors);
    let empresa = optional_string(object, "empresa", &mut errors);

    match (nome, email, telefone) {
        (Some(nome), Some(email), Some(telefone)) if errors.is_empty() => Ok(ContactRequest {
            id: None,
            nome,
            email,
            telefone,
            empresa,
        }),
        _ => Err(ValidationError::Fields(errors)),
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, REQUIRED));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, NOT_A_STRING));
            None
        }
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, NOT_A_STRING));
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_without_empresa() {
        let contact = validate(&json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "telefone": "11999999999"
        }))
        .unwrap();
        assert_eq!(contact.nome, "Ana");
        assert_eq!(contact.email, "ana@x.com");
        assert_eq!(contact.telefone, "11999999999");
        assert_eq!(contact.empresa, None);
        assert_eq!(contact.id, None);
    }

    #[test]
    fn test_null_empresa_is_absent() {
        let contact = validate(&json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "telefone": "1",
            "empresa": null
        }))
        .unwrap();
        assert_eq!(contact.empresa, None);
    }

    #[test]
    fn test_empty_empresa_is_kept() {
        let contact = validate(&json!({
            "nome": "Ana",
            "email": "ana@x.com",
            "telefone": "1",
            "empresa": ""
        }))
        .unwrap();
        assert_eq!(contact.empresa, Some(String::new()));
    }

    #[test]
    fn test_client_id_ignored() {
        let contact = validate(&json!({
            "id": 99,
            "nome": "Ana",
            "email": "ana@x.com",
            "telefone": "1"
        }))
        .unwrap();
        assert_eq!(contact.id, None);
    }

    #[test]
    fn test_email_format_not_checked() {
        let contact = validate(&json!({
            "nome": "Ana",
            "email": "not an email",
            "telefone": "1"
        }))
        .unwrap();
        assert_eq!(contact.email, "not an email");
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let err = validate(&json!({ "empresa": "ACME" })).unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["nome", "email", "telefone"]);
    }

    #[test]
    fn test_wrong_types_rejected() {
        let err = validate(&json!({
            "nome": "Ana",
            "email": 42,
            "telefone": ["1"],
            "empresa": true
        }))
        .unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "telefone", "empresa"]);
        assert!(
            err.field_errors()
                .iter()
                .all(|f| f.message == NOT_A_STRING)
        );
    }

    #[test]
    fn test_blank_nome_rejected() {
        let err = validate(&json!({
            "nome": "   ",
            "email": "ana@x.com",
            "telefone": "1"
        }))
        .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "nome");
        assert_eq!(err.field_errors()[0].message, "must not be empty");
    }

    #[test]
    fn test_non_object_rejected() {
        let err = validate(&json!(["Ana", "ana@x.com"])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn test_parse_submission_malformed_json() {
        let err = parse_submission(b"{nome: Ana").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedJson(_)));
    }

    #[test]
    fn test_parse_submission_valid() {
        let contact =
            parse_submission(br#"{"nome":"Ana","email":"ana@x.com","telefone":"1"}"#).unwrap();
        assert_eq!(contact, ContactRequest::new("Ana", "ana@x.com", "1"));
    }
}
