//! # Dashboard Repository
//!
//! `GET /api/dashboard?email=` returns the owner-wide summary: total
//! payments, the CASH/BANK split, outstanding dues, recent transactions and
//! the highest payments.

use billbook_core::Dashboard;

use crate::client::BillbookClient;
use crate::error::ClientResult;
use crate::wire::DashboardBody;

/// Repository for the dashboard summary.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    client: BillbookClient,
}

impl DashboardRepository {
    pub fn new(client: BillbookClient) -> Self {
        DashboardRepository { client }
    }

    pub async fn fetch(&self) -> ClientResult<Dashboard> {
        let url = self.client.endpoint(&["api", "dashboard"])?;
        let request = self
            .client
            .http()
            .get(url)
            .query(&[("email", self.client.owner_email())]);
        let body: DashboardBody = self.client.execute_json(request).await?;
        Dashboard::try_from(body)
    }
}
