//! # Subscription
//!
//! ```text
//! subscription plans    pricing table, no request
//! subscription order    POST create-order ──► order id for the checkout
//! subscription verify   POST verify-payment with the checkout's callback
//! ```
//!
//! The hosted checkout itself happens outside the CLI; `verify` takes the
//! three values it hands back.

use std::io::Write;

use billbook_client::{BillbookClient, OrderRequest};
use billbook_core::{PaymentVerification, SubscriptionPlan};

use crate::error::CliResult;
use crate::render;
use crate::state::config::SubscriptionSettings;

pub fn plans(currency_symbol: &str, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "{}", render::plans_table(currency_symbol))?;
    Ok(())
}

pub async fn order(
    client: &BillbookClient,
    settings: &SubscriptionSettings,
    plan: SubscriptionPlan,
    out: &mut impl Write,
) -> CliResult<()> {
    let request = OrderRequest {
        plan,
        amount: settings.amount,
        currency: settings.currency.clone(),
    };
    let order = client.payments().create_order(&request).await?;

    writeln!(out, "Order created for the {} plan", plan.display_name())?;
    writeln!(out, "  order id: {}", order.id)?;
    writeln!(out, "  amount:   {} {}", order.amount, order.currency)?;
    writeln!(
        out,
        "Complete the payment, then run:\n  billbook subscription verify --order-id {} --payment-id <id> --signature <sig>",
        order.id
    )?;
    Ok(())
}

pub async fn verify(
    client: &BillbookClient,
    verification: &PaymentVerification,
    out: &mut impl Write,
) -> CliResult<()> {
    client.payments().verify(verification).await?;
    writeln!(out, "Payment successful! Your subscription is active.")?;
    Ok(())
}
