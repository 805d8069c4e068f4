//! Spreadsheet-backed [`ContactStore`].

use std::time::Duration;

use async_trait::async_trait;
use contato_core::{ContactRequest, ContactStore, StoreError, StoreResult};

use crate::auth::TokenProvider;
use crate::client::{GoogleEndpoints, SheetsClient};
use crate::credentials::ServiceAccountKey;
use crate::error::Result;
use crate::reference::SheetReference;

/// Default timeout for each Google API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Appends each submission as a row `[nome, email, telefone, empresa]` to
/// the first worksheet of the configured spreadsheet.
///
/// Without credentials the store still constructs, but every
/// [`append`](ContactStore::append) fails with
/// [`StoreError::CredentialsMissing`] before touching the network.
#[derive(Debug)]
pub struct SpreadsheetStore {
    client: Option<SheetsClient>,
    reference: SheetReference,
}

impl SpreadsheetStore {
    /// Builds the store against Google's production endpoints.
    pub fn new(credentials: Option<ServiceAccountKey>, reference: SheetReference) -> Result<Self> {
        Self::with_endpoints(credentials, reference, GoogleEndpoints::default())
    }

    /// Builds the store against explicit API endpoints.
    pub fn with_endpoints(
        credentials: Option<ServiceAccountKey>,
        reference: SheetReference,
        endpoints: GoogleEndpoints,
    ) -> Result<Self> {
        let client = match credentials {
            Some(key) => {
                let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
                let auth = TokenProvider::new(key, http.clone())?;
                tracing::info!(
                    reference = %reference,
                    client_email = %auth.client_email(),
                    "Spreadsheet store ready"
                );
                Some(SheetsClient::new(http, endpoints, auth))
            }
            None => {
                tracing::warn!(
                    reference = %reference,
                    "Spreadsheet store has no credentials; every write will be rejected"
                );
                None
            }
        };
        Ok(Self { client, reference })
    }

    /// Whether credentials were available at startup.
    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl ContactStore for SpreadsheetStore {
    fn backend(&self) -> &'static str {
        match self.reference {
            SheetReference::Name(_) => "sheets-by-name",
            SheetReference::Key(_) => "sheets-by-key",
        }
    }

    async fn append(&self, contact: ContactRequest) -> StoreResult<ContactRequest> {
        let client = self.client.as_ref().ok_or(StoreError::CredentialsMissing)?;

        let key = client.resolve(&self.reference).await?;
        let title = client.first_sheet_title(&key).await?;
        client.append_row(&key, &title, &contact.to_row()).await?;

        tracing::info!(spreadsheet = %key, sheet = %title, "Appended contact row");
        Ok(contact)
    }
}
