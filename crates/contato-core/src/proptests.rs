//! Property-based tests for submission validation.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::validate::validate;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn test_valid_submission_echoes_fields(
            nome in "\\PC*[a-zA-Z]\\PC*",
            email in "\\PC*",
            telefone in "[0-9 ()+-]{0,20}",
            empresa in proptest::option::of("\\PC*"),
        ) {
            let payload = json!({
                "nome": nome,
                "email": email,
                "telefone": telefone,
                "empresa": empresa,
            });
            let contact = validate(&payload).unwrap();
            prop_assert_eq!(contact.nome, nome);
            prop_assert_eq!(contact.email, email);
            prop_assert_eq!(contact.telefone, telefone);
            prop_assert_eq!(contact.empresa, empresa);
            prop_assert_eq!(contact.id, None);
        }

        #[test]
        fn test_dropping_a_required_field_always_fails(
            missing in prop::sample::select(vec!["nome", "email", "telefone"]),
        ) {
            let mut payload = json!({
                "nome": "Ana",
                "email": "ana@x.com",
                "telefone": "11999999999",
            });
            payload.as_object_mut().unwrap().remove(missing);
            let err = validate(&payload).unwrap_err();
            prop_assert!(err.field_errors().iter().any(|f| f.field == missing));
        }
    }
}
