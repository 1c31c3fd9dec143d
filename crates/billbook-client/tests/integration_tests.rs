//! Integration tests for billbook-client.
//!
//! Uses wiremock to stand in for the billing backend.

#![allow(clippy::unwrap_used, clippy::panic)]

use billbook_client::{BillbookClient, ClientConfig, ClientError, OrderRequest};
use billbook_core::validation::validate_date_range;
use billbook_core::{
    BillAmounts, BillColumn, DateRange, Money, NewBill, Party, PaymentVerification,
    SubscriptionPlan,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "owner@example.com";

fn client(server: &MockServer) -> BillbookClient {
    BillbookClient::new(ClientConfig::new(server.uri(), EMAIL)).unwrap()
}

fn week() -> DateRange {
    validate_date_range(Some("2024-01-01"), Some("2024-01-07")).unwrap()
}

// =============================================================================
// PARTY TESTS
// =============================================================================

#[tokio::test]
async fn test_create_party_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/party"))
        .and(body_json(json!({
            "userEmail": EMAIL,
            "partyName": "Ravi",
            "code": "R01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Party added"})))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server).parties().create(" Ravi ", "R01").await.unwrap();
    assert_eq!(message, "Party added");
}

#[tokio::test]
async fn test_create_party_duplicate_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/party"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Party code already exists"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).parties().create("Ravi", "R01").await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    assert_eq!(err.to_string(), "Party code already exists");
}

#[tokio::test]
async fn test_create_party_invalid_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).parties().create("Ravi & Co", "R01").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Party Name and Party Code should only contain alphanumeric characters"
    );
}

#[tokio::test]
async fn test_list_parties_sorted_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/party/owner@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "codes": ["M07", "A01"],
            "partyNames": ["Meena", "Anil"]
        })))
        .mount(&server)
        .await;

    let parties = client(&server).parties().list().await.unwrap();
    assert_eq!(parties, vec![Party::new("Anil", "A01"), Party::new("Meena", "M07")]);
}

#[tokio::test]
async fn test_list_parties_bad_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/party/owner@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"parties": []})))
        .mount(&server)
        .await;

    let err = client(&server).parties().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_delete_party() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/party/Ravi/R01"))
        .and(query_param("email", EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Party deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server).parties().delete("Ravi", "R01").await.unwrap();
    assert_eq!(message, "Party deleted");
}

// =============================================================================
// BILL TESTS
// =============================================================================

fn new_bill(code: &str, name: &str, cash: i64) -> NewBill {
    NewBill {
        code: code.to_string(),
        party_name: name.to_string(),
        range: week(),
        amounts: BillAmounts::default().with(BillColumn::Cash, Money::from_major(cash)),
    }
}

#[tokio::test]
async fn test_create_week_posts_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bills"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let bills = vec![new_bill("R01", "Ravi", 20), new_bill("M07", "Meena", 5)];
    let message = client(&server).bills().create_week(&bills).await.unwrap();
    assert_eq!(message, "Bills added successfully");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["code"], "R01");
    assert_eq!(rows[0]["partyName"], "Ravi");
    assert_eq!(rows[0]["startDate"], "2024-01-01");
    assert_eq!(rows[0]["endDate"], "2024-01-07");
    assert_eq!(rows[0]["email"], EMAIL);
    assert_eq!(rows[0]["CASH"], 20.0);
    assert_eq!(rows[1]["CASH"], 5.0);
    assert_eq!(rows[1]["ATD"], 0.0);
}

#[tokio::test]
async fn test_create_week_already_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bills"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "bills already exist"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .bills()
        .create_week(&[new_bill("R01", "Ravi", 1)])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error adding bills: bills already exist");
}

#[tokio::test]
async fn test_week_decodes_and_recomputes_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bills/week"))
        .and(query_param("email", EMAIL))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "b1", "code": "R01", "partyName": "Ravi",
                "startDate": "2024-01-01T00:00:00.000Z", "endDate": "2024-01-07T00:00:00.000Z",
                "payment": 500, "CASH": "20", "BANK": 10.5, "N_P": 4, "total": 1
            }
        ])))
        .mount(&server)
        .await;

    let bills = client(&server).bills().week(week()).await.unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].id, "b1");
    assert_eq!(bills[0].range, week());
    assert_eq!(bills[0].total(), Money::from_minor(3450));
}

#[tokio::test]
async fn test_year_rows_without_dates_use_requested_range() {
    let server = MockServer::start().await;
    let year = validate_date_range(Some("2023-04-01"), Some("2024-03-31")).unwrap();
    Mock::given(method("GET"))
        .and(path("/api/bills/year"))
        .and(query_param("startDate", "2023-04-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "R01", "partyName": "Ravi", "payment": 100, "totalNP": 25},
            {"code": "A01", "partyName": "Anil", "payment": 50, "totalNP": 25}
        ])))
        .mount(&server)
        .await;

    let bills = client(&server).bills().year(year).await.unwrap();
    assert_eq!(bills.len(), 2);
    assert!(bills.iter().all(|b| b.range == year));
    assert_eq!(bills[0].total_np, Money::from_major(25));
}

#[tokio::test]
async fn test_for_party_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bills"))
        .and(query_param("code", "R01"))
        .and(query_param("partyName", "Ravi"))
        .and(query_param("email", EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let bills = client(&server).bills().for_party("R01", "Ravi", week()).await.unwrap();
    assert!(bills.is_empty());
}

#[tokio::test]
async fn test_in_range_and_for_party_all_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bills/date-range/owner@example.com"))
        .and(query_param("start", "2024-01-01"))
        .and(query_param("end", "2024-01-07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bills/final/owner@example.com/Ravi/R01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "b9", "code": "R01", "partyName": "Ravi",
             "startDate": "2024-01-08", "endDate": "2024-01-14", "DUE": 3}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server);
    assert!(c.bills().in_range(week()).await.unwrap().is_empty());
    let all = c.bills().for_party_all("Ravi", "R01").await.unwrap();
    assert_eq!(all[0].range.to_string(), "2024-01-08 to 2024-01-14");
}

#[tokio::test]
async fn test_for_party_all_requires_selection() {
    let server = MockServer::start().await;
    let err = client(&server).bills().for_party_all("", "R01").await.unwrap_err();
    assert_eq!(err.to_string(), "Please select a party and a code");
}

#[tokio::test]
async fn test_update_bill_sends_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/bills/b1"))
        .and(body_partial_json(json!({
            "_id": "b1", "code": "R01", "partyName": "Ravi", "TDS": 2.5, "total": 2.5,
            "totalNP": 15.25, "startDate": "2024-01-01", "endDate": "2024-01-07"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let bill = billbook_core::Bill {
        id: "b1".to_string(),
        code: "R01".to_string(),
        party_name: "Ravi".to_string(),
        range: week(),
        amounts: BillAmounts::default()
            .with(BillColumn::Tds, Money::from_minor(250))
            .with(BillColumn::Payment, Money::from_major(100)),
        total_np: Money::from_minor(1525),
    };
    let message = client(&server).bills().update(&bill).await.unwrap();
    assert_eq!(message, "Bill updated successfully!");
}

#[tokio::test]
async fn test_update_total_np() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/bills/update/TotalNP"))
        .and(body_json(json!({
            "totalNP": 120.75,
            "startDate": "2024-01-01",
            "endDate": "2024-01-07",
            "email": EMAIL
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server)
        .bills()
        .update_total_np(week(), Money::from_minor(12075))
        .await
        .unwrap();
    assert_eq!(message, "Total N/P updated successfully!");
}

#[tokio::test]
async fn test_delete_missing_bill_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bills/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Bill not found"})))
        .mount(&server)
        .await;

    let err = client(&server).bills().delete("gone").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_rejects_unsafe_id() {
    let server = MockServer::start().await;
    let err = client(&server).bills().delete("../party").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// =============================================================================
// DASHBOARD AND PAYMENT TESTS
// =============================================================================

#[tokio::test]
async fn test_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .and(query_param("email", EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalPayments": 1500.5,
            "paymentDistribution": {"CASH": 1000, "BANK": 500.5},
            "outstandingDues": [{"partyName": "Ravi", "DUE": 40}],
            "recentTransactions": [
                {"partyName": "Ravi", "payment": 500, "endDate": "2024-01-07T00:00:00.000Z"}
            ],
            "highestPayments": [{"partyName": "Meena", "payment": 900}]
        })))
        .mount(&server)
        .await;

    let dashboard = client(&server).dashboard().fetch().await.unwrap();
    assert_eq!(dashboard.total_payments, Money::from_minor(150050));
    assert_eq!(dashboard.bank, Money::from_minor(50050));
    assert_eq!(dashboard.total_outstanding(), Money::from_major(40));
    assert_eq!(
        dashboard.recent_transactions[0].end_date.map(|d| d.to_string()),
        Some("2024-01-07".to_string())
    );
    assert_eq!(dashboard.highest_payments[0].party_name, "Meena");
}

#[tokio::test]
async fn test_create_order_and_verify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payment/create-order"))
        .and(body_partial_json(json!({
            "amount": 500, "currency": "INR", "plan": "monthly", "userEmail": EMAIL
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "order_1", "amount": 500, "currency": "INR"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payment/verify-payment"))
        .and(body_json(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "sig",
            "userEmail": EMAIL
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let c = client(&server);
    let order = c
        .payments()
        .create_order(&OrderRequest {
            plan: SubscriptionPlan::Monthly,
            amount: 500,
            currency: "INR".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(order.id, "order_1");

    c.payments()
        .verify(&PaymentVerification {
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature: "sig".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_verify_failure_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payment/verify-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "failure"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .payments()
        .verify(&PaymentVerification {
            order_id: "o".to_string(),
            payment_id: "p".to_string(),
            signature: "s".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Payment verification failed");
}

#[tokio::test]
async fn test_unavailable_plan_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client(&server)
        .payments()
        .create_order(&OrderRequest {
            plan: SubscriptionPlan::HalfYearly,
            amount: 800000,
            currency: "INR".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// =============================================================================
// TRANSPORT TESTS
// =============================================================================

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let c = BillbookClient::new(
        ClientConfig::new(server.uri(), EMAIL).api_token(Some("secret-token".to_string())),
    )
    .unwrap();
    let dashboard = c.dashboard().fetch().await.unwrap();
    assert_eq!(dashboard.total_payments, Money::zero());
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/party/owner@example.com"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).parties().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_connection_refused() {
    let c = BillbookClient::new(ClientConfig::new("http://127.0.0.1:1", EMAIL)).unwrap();
    let result = c.parties().list().await;
    assert!(matches!(result, Err(ClientError::Connection(_))));
}
