//! # Payment Repository
//!
//! Subscription payments go through the backend, which talks to the payment
//! gateway:
//!
//! ```text
//! create_order(plan) ──► POST /api/payment/create-order ──► PaymentOrder { id }
//!        │
//!        ▼  (user pays in the gateway checkout, outside this tool)
//! verify(order, payment, signature) ──► POST /api/payment/verify-payment
//!        └── status == "success"  → subscription active
//! ```

use billbook_core::{PaymentOrder, PaymentVerification, SubscriptionPlan, ValidationError};
use tracing::info;
use uuid::Uuid;

use crate::client::BillbookClient;
use crate::error::{ClientError, ClientResult};
use crate::wire::{CreateOrderBody, OrderBody, VerifyPaymentBody, VerifyPaymentResponse};

/// What the order charges, in the gateway's minor unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub plan: SubscriptionPlan,
    pub amount: i64,
    pub currency: String,
}

/// Repository for subscription payments.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    client: BillbookClient,
}

impl PaymentRepository {
    pub fn new(client: BillbookClient) -> Self {
        PaymentRepository { client }
    }

    /// Creates a gateway order for a plan.
    ///
    /// ## Errors
    /// - `Validation` for a plan that is not yet purchasable or a
    ///   non-positive amount
    pub async fn create_order(&self, order: &OrderRequest) -> ClientResult<PaymentOrder> {
        if !order.plan.is_available() {
            return Err(ValidationError::NotAllowed {
                field: "plan".to_string(),
                allowed: SubscriptionPlan::ALL
                    .iter()
                    .filter(|p| p.is_available())
                    .map(|p| p.wire_name().to_string())
                    .collect(),
            }
            .into());
        }
        if order.amount <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }

        let url = self
            .client
            .endpoint(&["api", "payment", "create-order"])?;
        let body = CreateOrderBody {
            amount: order.amount,
            currency: &order.currency,
            receipt: format!("receipt_{}", Uuid::new_v4().simple()),
            plan: order.plan.wire_name(),
            user_email: self.client.owner_email(),
        };
        let created: OrderBody = self
            .client
            .execute_json(self.client.http().post(url).json(&body))
            .await?;

        info!(order = %created.id, plan = order.plan.wire_name(), "payment order created");
        Ok(PaymentOrder {
            id: created.id,
            amount: created.amount,
            currency: created.currency,
        })
    }

    /// Submits the gateway's callback values. `Ok(())` means verified.
    pub async fn verify(&self, verification: &PaymentVerification) -> ClientResult<()> {
        for (field, value) in [
            ("order id", &verification.order_id),
            ("payment id", &verification.payment_id),
            ("signature", &verification.signature),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                }
                .into());
            }
        }

        let url = self
            .client
            .endpoint(&["api", "payment", "verify-payment"])?;
        let body = VerifyPaymentBody {
            razorpay_order_id: verification.order_id.trim(),
            razorpay_payment_id: verification.payment_id.trim(),
            razorpay_signature: verification.signature.trim(),
            user_email: self.client.owner_email(),
        };
        let response: VerifyPaymentResponse = self
            .client
            .execute_json(self.client.http().post(url).json(&body))
            .await?;

        if response.status == "success" {
            info!(order = %verification.order_id, "payment verified");
            Ok(())
        } else {
            Err(ClientError::Rejected {
                status: 200,
                message: response
                    .message
                    .unwrap_or_else(|| "Payment verification failed".to_string()),
            })
        }
    }
}
