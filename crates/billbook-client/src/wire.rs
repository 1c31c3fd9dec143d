//! # Wire Format
//!
//! JSON shapes exchanged with the backend, and their conversion to and from
//! billbook-core types.
//!
//! ## Conventions
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Field                │ On the wire                                      │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ record id            │ "_id"                                            │
//! │ names                │ camelCase: partyName, startDate, userEmail       │
//! │ amount columns       │ payment, PWT, CASH, BANK, DUE, N_P, TCS, TDS,    │
//! │                      │ S_TDS, ATD (numbers; strings and null tolerated) │
//! │ dates (sent)         │ "YYYY-MM-DD"                                     │
//! │ dates (received)     │ "YYYY-MM-DD" or ISO timestamp                    │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are decoded leniently because the backend stores whatever the
//! browser form posted: numbers, numeric strings, or empty strings.

use billbook_core::validation::parse_wire_date;
use billbook_core::{
    Bill, BillAmounts, BillColumn, Dashboard, DateRange, Money, NewBill, Party, PartyAmount,
    RecentTransaction,
};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Amount Encoding
// =============================================================================

/// `#[serde(with = "amount")]` for [`Money`] fields.
pub(crate) mod amount {
    use billbook_core::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        from_value(raw.as_ref()).map_err(D::Error::custom)
    }

    pub(crate) fn from_value(value: Option<&Value>) -> Result<Money, String> {
        match value {
            None | Some(Value::Null) => Ok(Money::zero()),
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(Money::from_f64)
                .ok_or_else(|| format!("amount out of range: {n}")),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(Money::zero()),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Money::from_f64)
                .ok_or_else(|| format!("not an amount: {s:?}")),
            Some(other) => Err(format!("not an amount: {other}")),
        }
    }
}

/// The ten amount columns as they appear inside bill objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireAmounts {
    #[serde(default, with = "amount")]
    pub payment: Money,
    #[serde(rename = "PWT", default, with = "amount")]
    pub pwt: Money,
    #[serde(rename = "CASH", default, with = "amount")]
    pub cash: Money,
    #[serde(rename = "BANK", default, with = "amount")]
    pub bank: Money,
    #[serde(rename = "DUE", default, with = "amount")]
    pub due: Money,
    #[serde(rename = "N_P", default, with = "amount")]
    pub n_p: Money,
    #[serde(rename = "TCS", default, with = "amount")]
    pub tcs: Money,
    #[serde(rename = "TDS", default, with = "amount")]
    pub tds: Money,
    #[serde(rename = "S_TDS", default, with = "amount")]
    pub s_tds: Money,
    #[serde(rename = "ATD", default, with = "amount")]
    pub atd: Money,
}

impl From<&BillAmounts> for WireAmounts {
    fn from(amounts: &BillAmounts) -> Self {
        WireAmounts {
            payment: amounts.get(BillColumn::Payment),
            pwt: amounts.get(BillColumn::Pwt),
            cash: amounts.get(BillColumn::Cash),
            bank: amounts.get(BillColumn::Bank),
            due: amounts.get(BillColumn::Due),
            n_p: amounts.get(BillColumn::NP),
            tcs: amounts.get(BillColumn::Tcs),
            tds: amounts.get(BillColumn::Tds),
            s_tds: amounts.get(BillColumn::STds),
            atd: amounts.get(BillColumn::Atd),
        }
    }
}

impl From<&WireAmounts> for BillAmounts {
    fn from(wire: &WireAmounts) -> Self {
        BillAmounts::default()
            .with(BillColumn::Payment, wire.payment)
            .with(BillColumn::Pwt, wire.pwt)
            .with(BillColumn::Cash, wire.cash)
            .with(BillColumn::Bank, wire.bank)
            .with(BillColumn::Due, wire.due)
            .with(BillColumn::NP, wire.n_p)
            .with(BillColumn::Tcs, wire.tcs)
            .with(BillColumn::Tds, wire.tds)
            .with(BillColumn::STds, wire.s_tds)
            .with(BillColumn::Atd, wire.atd)
    }
}

// =============================================================================
// Messages
// =============================================================================

/// `{ "message": ... }` returned by most mutations and by errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageBody {
    /// Best human-readable text in the body, if any.
    pub fn text(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

// =============================================================================
// Parties
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyBody<'a> {
    pub user_email: &'a str,
    pub party_name: &'a str,
    pub code: &'a str,
}

/// Parallel arrays: `codes[i]` belongs to `partyNames[i]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyListBody {
    #[serde(default)]
    pub codes: Option<Vec<String>>,
    #[serde(default)]
    pub party_names: Option<Vec<String>>,
}

impl PartyListBody {
    /// Zips the arrays into parties, sorted by name (then code).
    pub fn into_parties(self) -> ClientResult<Vec<Party>> {
        let (Some(codes), Some(names)) = (self.codes, self.party_names) else {
            return Err(ClientError::decode("Invalid party names data format"));
        };
        if codes.len() != names.len() {
            return Err(ClientError::decode(format!(
                "party list has {} codes but {} names",
                codes.len(),
                names.len()
            )));
        }
        let mut parties: Vec<Party> = names
            .into_iter()
            .zip(codes)
            .map(|(name, code)| Party::new(name, code))
            .collect();
        parties.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(parties)
    }
}

// =============================================================================
// Bills
// =============================================================================

/// One element of the `POST /api/bills` array.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillBody<'a> {
    pub code: &'a str,
    pub start_date: String,
    pub end_date: String,
    pub party_name: &'a str,
    #[serde(flatten)]
    pub amounts: WireAmounts,
    pub email: &'a str,
}

impl<'a> NewBillBody<'a> {
    pub fn new(bill: &'a NewBill, email: &'a str) -> Self {
        NewBillBody {
            code: &bill.code,
            start_date: bill.range.start_str(),
            end_date: bill.range.end_str(),
            party_name: &bill.party_name,
            amounts: WireAmounts::from(&bill.amounts),
            email,
        }
    }
}

/// Full record sent with `PUT /api/bills/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillBody<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub code: &'a str,
    pub party_name: &'a str,
    pub start_date: String,
    pub end_date: String,
    #[serde(flatten)]
    pub amounts: WireAmounts,
    #[serde(with = "amount")]
    pub total: Money,
    #[serde(rename = "totalNP", with = "amount")]
    pub total_np: Money,
    pub email: &'a str,
}

impl<'a> UpdateBillBody<'a> {
    pub fn new(bill: &'a Bill, email: &'a str) -> Self {
        UpdateBillBody {
            id: &bill.id,
            code: &bill.code,
            party_name: &bill.party_name,
            start_date: bill.range.start_str(),
            end_date: bill.range.end_str(),
            amounts: WireAmounts::from(&bill.amounts),
            total: bill.total(),
            total_np: bill.total_np,
            email,
        }
    }
}

/// A bill as the backend returns it.
///
/// Aggregated (yearly) rows carry no id and no dates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub party_name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub amounts: WireAmounts,
    #[serde(rename = "totalNP", default, with = "amount")]
    pub total_np: Money,
}

impl BillRecord {
    /// Converts to a [`Bill`], using `fallback` when the record has no dates.
    ///
    /// Any `total` the backend sent is ignored; [`Bill::total`] recomputes it.
    pub fn into_bill(self, fallback: Option<DateRange>) -> ClientResult<Bill> {
        let range = match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
                DateRange::new(
                    parse_wire_date("startDate", start)?,
                    parse_wire_date("endDate", end)?,
                )?
            }
            _ => fallback.ok_or_else(|| {
                ClientError::decode(format!("bill for party {} has no dates", self.code))
            })?,
        };

        Ok(Bill {
            id: self.id.unwrap_or_default(),
            amounts: BillAmounts::from(&self.amounts),
            code: self.code,
            party_name: self.party_name,
            range,
            total_np: self.total_np,
        })
    }
}

/// Decodes a list of records.
pub fn into_bills(records: Vec<BillRecord>, fallback: Option<DateRange>) -> ClientResult<Vec<Bill>> {
    records
        .into_iter()
        .map(|record| record.into_bill(fallback))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalNpBody<'a> {
    #[serde(rename = "totalNP", with = "amount")]
    pub total_np: Money,
    pub start_date: String,
    pub end_date: String,
    pub email: &'a str,
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBody {
    #[serde(default, with = "amount")]
    pub total_payments: Money,
    #[serde(default)]
    pub payment_distribution: PaymentDistribution,
    #[serde(default)]
    pub outstanding_dues: Vec<DueEntry>,
    #[serde(default)]
    pub recent_transactions: Vec<TransactionEntry>,
    #[serde(default)]
    pub highest_payments: Vec<PaymentEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentDistribution {
    #[serde(rename = "CASH", default, with = "amount")]
    pub cash: Money,
    #[serde(rename = "BANK", default, with = "amount")]
    pub bank: Money,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueEntry {
    #[serde(default)]
    pub party_name: String,
    #[serde(rename = "DUE", default, with = "amount")]
    pub due: Money,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    #[serde(default)]
    pub party_name: String,
    #[serde(default, with = "amount")]
    pub payment: Money,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    #[serde(default)]
    pub party_name: String,
    #[serde(default, with = "amount")]
    pub payment: Money,
}

impl TryFrom<DashboardBody> for Dashboard {
    type Error = ClientError;

    fn try_from(body: DashboardBody) -> ClientResult<Self> {
        let recent_transactions = body
            .recent_transactions
            .into_iter()
            .map(|t| -> ClientResult<RecentTransaction> {
                let end_date = match t.end_date.as_deref().map(str::trim) {
                    Some(raw) if !raw.is_empty() => Some(parse_wire_date("endDate", raw)?),
                    _ => None,
                };
                Ok(RecentTransaction {
                    party_name: t.party_name,
                    payment: t.payment,
                    end_date,
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        Ok(Dashboard {
            total_payments: body.total_payments,
            cash: body.payment_distribution.cash,
            bank: body.payment_distribution.bank,
            outstanding_dues: body
                .outstanding_dues
                .into_iter()
                .map(|d| PartyAmount {
                    party_name: d.party_name,
                    amount: d.due,
                })
                .collect(),
            recent_transactions,
            highest_payments: body
                .highest_payments
                .into_iter()
                .map(|p| PartyAmount {
                    party_name: p.party_name,
                    amount: p.payment,
                })
                .collect(),
        })
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody<'a> {
    pub amount: i64,
    pub currency: &'a str,
    pub receipt: String,
    pub plan: &'a str,
    pub user_email: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderBody {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentBody<'a> {
    pub razorpay_order_id: &'a str,
    pub razorpay_payment_id: &'a str,
    pub razorpay_signature: &'a str,
    #[serde(rename = "userEmail")]
    pub user_email: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
