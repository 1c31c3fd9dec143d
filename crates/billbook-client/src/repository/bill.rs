//! # Bill Repository
//!
//! Backend operations for weekly bills.
//!
//! ## Endpoints
//! ```text
//! ┌────────┬────────────────────────────────────────────┬─────────────────────┐
//! │ Method │ Path                                       │ Used by             │
//! ├────────┼────────────────────────────────────────────┼─────────────────────┤
//! │ POST   │ /api/bills                 [bill, ...]     │ create_week         │
//! │ GET    │ /api/bills/week?email&startDate&endDate    │ week                │
//! │ GET    │ /api/bills/year?email&startDate&endDate    │ year                │
//! │ GET    │ /api/bills?email&code&partyName&start..    │ for_party           │
//! │ GET    │ /api/bills/date-range/{email}?start&end    │ in_range            │
//! │ GET    │ /api/bills/final/{email}/{name}/{code}     │ for_party_all       │
//! │ PUT    │ /api/bills/{id}                            │ update              │
//! │ PUT    │ /api/bills/update/TotalNP                  │ update_total_np     │
//! │ DELETE │ /api/bills/{id}                            │ delete              │
//! └────────┴────────────────────────────────────────────┴─────────────────────┘
//! ```

use billbook_core::validation::{validate_party_selection, validate_record_id};
use billbook_core::{Bill, CoreError, DateRange, Money, NewBill};
use tracing::info;

use crate::client::BillbookClient;
use crate::error::{ClientError, ClientResult};
use crate::wire::{into_bills, BillRecord, NewBillBody, TotalNpBody, UpdateBillBody};

/// Repository for bill operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    client: BillbookClient,
}

impl BillRepository {
    pub fn new(client: BillbookClient) -> Self {
        BillRepository { client }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Submits one week of bills in a single request.
    ///
    /// ## Errors
    /// A rejection here means the week was already entered; the backend
    /// message is kept and prefixed so the user knows which step failed.
    pub async fn create_week(&self, bills: &[NewBill]) -> ClientResult<String> {
        if bills.is_empty() {
            return Err(CoreError::EmptySheet.into());
        }
        let email = self.client.owner_email();
        let body: Vec<NewBillBody<'_>> = bills.iter().map(|b| NewBillBody::new(b, email)).collect();

        let url = self.client.endpoint(&["api", "bills"])?;
        let result = self
            .client
            .execute_message(self.client.http().post(url).json(&body))
            .await;

        match result {
            Ok(message) => {
                info!(count = bills.len(), range = %bills[0].range, "weekly bills created");
                Ok(message.unwrap_or_else(|| "Bills added successfully".to_string()))
            }
            Err(ClientError::Rejected { status, message }) => Err(ClientError::Rejected {
                status,
                message: format!("Error adding bills: {message}"),
            }),
            Err(other) => Err(other),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every party's bill for one week.
    pub async fn week(&self, range: DateRange) -> ClientResult<Vec<Bill>> {
        let url = self.client.endpoint(&["api", "bills", "week"])?;
        self.fetch(url, &self.range_query(range), range).await
    }

    /// Per-party aggregates over a long range (typically a financial year).
    pub async fn year(&self, range: DateRange) -> ClientResult<Vec<Bill>> {
        let url = self.client.endpoint(&["api", "bills", "year"])?;
        self.fetch(url, &self.range_query(range), range).await
    }

    /// One party's weekly bills inside `range`.
    pub async fn for_party(&self, code: &str, party_name: &str, range: DateRange) -> ClientResult<Vec<Bill>> {
        validate_party_selection(party_name, code)?;
        let url = self.client.endpoint(&["api", "bills"])?;
        let mut query = self.range_query(range);
        query.push(("code", code.trim().to_string()));
        query.push(("partyName", party_name.trim().to_string()));
        self.fetch(url, &query, range).await
    }

    /// Every bill whose week falls inside `range`.
    pub async fn in_range(&self, range: DateRange) -> ClientResult<Vec<Bill>> {
        let url = self
            .client
            .endpoint(&["api", "bills", "date-range", self.client.owner_email()])?;
        let query = [("start", range.start_str()), ("end", range.end_str())];
        self.fetch(url, &query, range).await
    }

    /// Every bill ever entered for one party.
    pub async fn for_party_all(&self, party_name: &str, code: &str) -> ClientResult<Vec<Bill>> {
        validate_party_selection(party_name, code)?;
        let url = self.client.endpoint(&[
            "api",
            "bills",
            "final",
            self.client.owner_email(),
            party_name.trim(),
            code.trim(),
        ])?;
        let records: Vec<BillRecord> = self.client.execute_json(self.client.http().get(url)).await?;
        into_bills(records, None)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces a stored bill with `bill` (matched by id).
    pub async fn update(&self, bill: &Bill) -> ClientResult<String> {
        validate_record_id(&bill.id)?;
        let url = self.client.endpoint(&["api", "bills", bill.id.as_str()])?;
        let body = UpdateBillBody::new(bill, self.client.owner_email());
        let message = self
            .client
            .execute_message(self.client.http().put(url).json(&body))
            .await?
            .unwrap_or_else(|| "Bill updated successfully!".to_string());

        info!(id = %bill.id, code = %bill.code, "bill updated");
        Ok(message)
    }

    /// Sets the carried N/P figure stored with a week.
    pub async fn update_total_np(&self, range: DateRange, total_np: Money) -> ClientResult<String> {
        let url = self.client.endpoint(&["api", "bills", "update", "TotalNP"])?;
        let body = TotalNpBody {
            total_np,
            start_date: range.start_str(),
            end_date: range.end_str(),
            email: self.client.owner_email(),
        };
        let message = self
            .client
            .execute_message(self.client.http().put(url).json(&body))
            .await?
            .unwrap_or_else(|| "Total N/P updated successfully!".to_string());

        info!(%range, %total_np, "total N/P updated");
        Ok(message)
    }

    /// Deletes a bill by id.
    pub async fn delete(&self, id: &str) -> ClientResult<String> {
        validate_record_id(id)?;
        let url = self.client.endpoint(&["api", "bills", id])?;
        let message = self
            .client
            .execute_message(self.client.http().delete(url))
            .await?
            .unwrap_or_else(|| "Bill deleted successfully".to_string());

        info!(id, "bill deleted");
        Ok(message)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn range_query(&self, range: DateRange) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.client.owner_email().to_string()),
            ("startDate", range.start_str()),
            ("endDate", range.end_str()),
        ]
    }

    async fn fetch(
        &self,
        url: url::Url,
        query: &[(&'static str, String)],
        range: DateRange,
    ) -> ClientResult<Vec<Bill>> {
        let records: Vec<BillRecord> = self
            .client
            .execute_json(self.client.http().get(url).query(query))
            .await?;
        into_bills(records, Some(range))
    }
}
