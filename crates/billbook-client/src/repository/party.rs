//! # Party Repository
//!
//! Backend operations for parties.
//!
//! ```text
//! POST   /api/party                      { userEmail, partyName, code }
//! GET    /api/party/{email}              → { codes: [...], partyNames: [...] }
//! DELETE /api/party/{name}/{code}?email=
//! ```

use billbook_core::validation::{validate_party_form, validate_party_selection};
use billbook_core::Party;
use tracing::info;

use crate::client::BillbookClient;
use crate::error::ClientResult;
use crate::wire::{CreatePartyBody, PartyListBody};

/// Repository for party operations.
#[derive(Debug, Clone)]
pub struct PartyRepository {
    client: BillbookClient,
}

impl PartyRepository {
    pub fn new(client: BillbookClient) -> Self {
        PartyRepository { client }
    }

    /// Registers a party. Returns the backend's confirmation message.
    ///
    /// The form is validated locally first; uniqueness of the code is the
    /// backend's call and comes back as `ClientError::Rejected`.
    pub async fn create(&self, name: &str, code: &str) -> ClientResult<String> {
        validate_party_form(name, code)?;
        let (name, code) = (name.trim(), code.trim());

        let url = self.client.endpoint(&["api", "party"])?;
        let body = CreatePartyBody {
            user_email: self.client.owner_email(),
            party_name: name,
            code,
        };
        let message = self
            .client
            .execute_message(self.client.http().post(url).json(&body))
            .await?
            .unwrap_or_else(|| "Party added successfully".to_string());

        info!(party = name, code, "party created");
        Ok(message)
    }

    /// Every party of the owner, sorted by name.
    pub async fn list(&self) -> ClientResult<Vec<Party>> {
        let url = self
            .client
            .endpoint(&["api", "party", self.client.owner_email()])?;
        let body: PartyListBody = self.client.execute_json(self.client.http().get(url)).await?;
        body.into_parties()
    }

    /// Deletes a party by name and code.
    pub async fn delete(&self, name: &str, code: &str) -> ClientResult<String> {
        validate_party_selection(name, code)?;
        let url = self
            .client
            .endpoint(&["api", "party", name.trim(), code.trim()])?;
        let request = self
            .client
            .http()
            .delete(url)
            .query(&[("email", self.client.owner_email())]);
        let message = self
            .client
            .execute_message(request)
            .await?
            .unwrap_or_else(|| "Party deleted successfully".to_string());

        info!(party = name, code, "party deleted");
        Ok(message)
    }
}
