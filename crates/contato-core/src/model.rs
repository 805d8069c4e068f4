//! The contact record.

use serde::{Deserialize, Serialize};

/// A single contact-form submission.
///
/// `id` is only set once an id-assigning backend has persisted the record.
/// It is left out of the JSON form while absent, whereas `empresa` is always
/// serialized (as `null` when the submitter left it blank).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Identifier assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Submitter name.
    pub nome: String,
    /// Submitter email. Not format-checked.
    pub email: String,
    /// Submitter phone number.
    pub telefone: String,
    /// Company, if given.
    #[serde(default)]
    pub empresa: Option<String>,
}

impl ContactRequest {
    /// Creates an unsaved record without a company.
    pub fn new(
        nome: impl Into<String>,
        email: impl Into<String>,
        telefone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            email: email.into(),
            telefone: telefone.into(),
            empresa: None,
        }
    }

    /// Sets the company.
    pub fn with_empresa(mut self, empresa: impl Into<String>) -> Self {
        self.empresa = Some(empresa.into());
        self
    }

    /// Returns a copy carrying the given store-assigned id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// The row written to a spreadsheet: `[nome, email, telefone, empresa]`.
    ///
    /// A missing company becomes an empty cell.
    pub fn to_row(&self) -> [String; 4] {
        [
            self.nome.clone(),
            self.email.clone(),
            self.telefone.clone(),
            self.empresa.clone().unwrap_or_default(),
        ]
    }
}
