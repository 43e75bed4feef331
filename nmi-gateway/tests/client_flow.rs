//! End-to-end client flows against a recording transport.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use nmi_gateway::{
    Gateway, NmiError, SecurityKey,
    config::GatewayConfig,
    request::{
        Call, LineItem, Overrides,
        customer_vault::{CustomerRecord, VaultTransaction},
        invoice::InvoiceRequest,
        product::ProductRecord,
        query::{CustomerVaultQuery, RecurringPlansQuery},
        recurring::{RecurringPlan, SubscriptionRequest},
        transaction::{CaptureRequest, RefundRequest, TransactionRequest, VoidRequest},
    },
    response::ResponseCode,
    transport::{AuthenticatedRequest, Transport, TransportResponse},
    wire::CustomFieldMap,
};
use rust_decimal::Decimal;

#[derive(Debug)]
enum Reply {
    Body(&'static str),
    Fail(&'static str),
}

#[derive(Debug)]
struct Recorded {
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
    pairs: Mutex<Vec<Vec<(String, String)>>>,
}

#[derive(Debug)]
struct RecordingTransport {
    reply: Reply,
    recorded: Arc<Recorded>,
}

impl Transport for RecordingTransport {
    async fn post_form<'a>(
        &'a self,
        url: &'a str,
        request: &'a AuthenticatedRequest,
    ) -> nmi_gateway::Result<TransportResponse> {
        self.recorded.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.urls.lock().unwrap().push(url.to_owned());
        self.recorded.pairs.lock().unwrap().push(request.form_pairs());

        match self.reply {
            Reply::Body(body) => Ok(TransportResponse { status: 200, body: body.to_owned() }),
            Reply::Fail(reason) => Err(NmiError::TransportError(reason.to_owned())),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "recording"
    }
}

fn gateway(reply: Reply) -> (Gateway<RecordingTransport>, Arc<Recorded>) {
    let recorded = Arc::new(Recorded {
        calls: AtomicUsize::new(0),
        urls: Mutex::new(Vec::new()),
        pairs: Mutex::new(Vec::new()),
    });
    let transport = RecordingTransport { reply, recorded: Arc::clone(&recorded) };
    let key = SecurityKey::new("test-key").unwrap();
    (Gateway::with_transport(key, transport, &GatewayConfig::default()), recorded)
}

fn card_sale(amount: Decimal) -> TransactionRequest {
    TransactionRequest {
        ccnumber: Some("4111111111111111".into()),
        ccexp: Some("1025".into()),
        amount: Some(amount),
        ..TransactionRequest::default()
    }
}

fn sent(recorded: &Recorded, index: usize) -> Vec<(String, String)> {
    recorded.pairs.lock().unwrap()[index].clone()
}

fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_owned(), value.to_owned())
}

fn widget(sku: &str, cost: Decimal) -> LineItem {
    LineItem {
        item_product_code: Some(sku.to_owned()),
        item_description: Some("Widget".to_owned()),
        item_unit_cost: Some(cost),
        item_quantity: Some(Decimal::ONE),
        ..LineItem::default()
    }
}

#[tokio::test]
async fn test_add_customer_success() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=SUCCESS&customer_vault_id=999"));

    let response = gateway
        .customer_vault()
        .add_customer(CustomerRecord {
            ccnumber: Some("4111111111111111".into()),
            ccexp: Some("1025".into()),
            first_name: Some("Ada".into()),
            ..CustomerRecord::default()
        })
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "SUCCESS");
    let data = response.data.unwrap();
    assert_eq!(data.response, ResponseCode::Approved);
    assert_eq!(data.customer_vault_id.as_deref(), Some("999"));
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 1);
    assert!(recorded.urls.lock().unwrap()[0].ends_with("/api/transact.php"));
}

#[tokio::test]
async fn test_credential_and_discriminant_lead_the_form() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=OK"));

    let _ = gateway.transactions().sale(card_sale(Decimal::new(1000, 2))).await;

    let pairs = recorded.pairs.lock().unwrap();
    let sent = &pairs[0];
    assert_eq!(sent[0], ("security_key".to_owned(), "test-key".to_owned()));
    assert_eq!(sent[1], ("type".to_owned(), "sale".to_owned()));
    assert!(sent.contains(&("amount".to_owned(), "10.00".to_owned())));
    assert!(sent.contains(&("currency".to_owned(), "USD".to_owned())));
}

#[tokio::test]
async fn test_declined_sale_is_data() {
    let (gateway, _) = gateway(Reply::Body("response=2&responsetext=DECLINE&response_code=200"));

    let response = gateway.transactions().sale(card_sale(Decimal::ONE)).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "DECLINE");
    let data = response.data.unwrap();
    assert_eq!(data.response, ResponseCode::Declined);
    assert!(!data.is_approved());
}

#[tokio::test]
async fn test_missing_responsetext_uses_default_message() {
    let (gateway, _) = gateway(Reply::Body("response=1&transactionid=42"));

    let response = gateway.transactions().sale(card_sale(Decimal::ONE)).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "sale succeeded");
}

#[tokio::test]
async fn test_mixed_recurrence_groups_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let response = gateway
        .recurring()
        .add_custom_subscription(SubscriptionRequest {
            plan_payments: Some(12),
            plan_amount: Some(Decimal::TEN),
            day_frequency: Some(30),
            month_frequency: Some(1),
            day_of_month: Some(15),
            ccnumber: Some("4111111111111111".into()),
            ccexp: Some("1025".into()),
            ..SubscriptionRequest::default()
        })
        .await;

    assert_eq!(response.status, 400);
    assert!(response.data.is_none());
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_plan_with_both_schedules_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let response = gateway
        .recurring()
        .add_plan(RecurringPlan {
            plan_id: Some("gold".into()),
            plan_name: Some("Gold".into()),
            plan_payments: Some(0),
            plan_amount: Some(Decimal::new(2500, 2)),
            day_frequency: Some(7),
            month_frequency: Some(1),
            day_of_month: Some(1),
            ..RecurringPlan::default()
        })
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_override_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let call = Call::new(card_sale(Decimal::ONE)).with_overrides(Overrides::new().set("not_a_field", 1));
    let response = gateway.transactions().sale(call).await;

    assert_eq!(response.status, 400);
    assert!(response.message.starts_with("sale failed: Invalid input"));
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_override_replaces_field() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let call = Call::new(card_sale(Decimal::ONE)).with_overrides(Overrides::new().set("currency", "EUR"));
    let response = gateway.transactions().sale(call).await;

    assert_eq!(response.status, 200);
    let pairs = recorded.pairs.lock().unwrap();
    assert!(pairs[0].contains(&("currency".to_owned(), "EUR".to_owned())));
    assert!(!pairs[0].contains(&("currency".to_owned(), "USD".to_owned())));
}

#[tokio::test]
async fn test_custom_fields_are_numbered() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let mut custom_fields = CustomFieldMap::new();
    custom_fields.insert("zeta", "first");
    custom_fields.insert("alpha", "second");
    let request = TransactionRequest { custom_fields, ..card_sale(Decimal::ONE) };

    let _ = gateway.transactions().sale(request).await;

    let pairs = recorded.pairs.lock().unwrap();
    let sent = &pairs[0];
    assert!(sent.contains(&("merchant_defined_field_1".to_owned(), "first".to_owned())));
    assert!(sent.contains(&("merchant_defined_field_2".to_owned(), "second".to_owned())));
    assert!(!sent.iter().any(|(name, _)| name == "zeta" || name == "custom_fields"));
}

#[tokio::test]
async fn test_empty_vault_report() {
    let (gateway, recorded) = gateway(Reply::Body("<nm_response></nm_response>"));

    let response = gateway.query().customer_vault(CustomerVaultQuery::default()).await;

    assert_eq!(response.status, 200);
    assert!(response.data.unwrap().customer_vault.customer.is_empty());
    assert!(recorded.urls.lock().unwrap()[0].ends_with("/api/query.php"));
    let pairs = recorded.pairs.lock().unwrap();
    assert!(pairs[0].contains(&("report_type".to_owned(), "customer_vault".to_owned())));
}

#[tokio::test]
async fn test_error_envelope_is_failure() {
    let (gateway, _) = gateway(Reply::Body(
        "<nm_response><error_response>Invalid Security Key</error_response></nm_response>",
    ));

    let response = gateway.query().recurring_plans(RecurringPlansQuery::default()).await;

    assert_eq!(response.status, 500);
    assert!(response.data.is_none());
    assert!(response.message.contains("Invalid Security Key"));
}

#[tokio::test]
async fn test_transport_failure() {
    let (gateway, recorded) = gateway(Reply::Fail("connection reset"));

    let response = gateway.transactions().sale(card_sale(Decimal::ONE)).await;

    assert_eq!(response.status, 500);
    assert!(response.message.contains("connection reset"));
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_undecodable_response() {
    let (gateway, _) = gateway(Reply::Body("<html>maintenance</html>"));

    let response = gateway.query().test_mode_status().await;

    assert_eq!(response.status, 500);
    assert!(response.message.starts_with("query_test_mode_status failed: Unexpected response shape"));
}

#[tokio::test]
async fn test_invoice_defaults_and_line_items_reach_the_wire() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=Invoice Created&invoice_id=77"));

    let response = gateway
        .invoices()
        .create(InvoiceRequest {
            amount: Some(Decimal::new(2500, 2)),
            email: Some("ada@example.com".into()),
            products: vec![widget("A-1", Decimal::new(1000, 2)), widget("B-2", Decimal::new(1500, 2))],
            ..InvoiceRequest::default()
        })
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.data.unwrap().invoice_id.as_deref(), Some("77"));
    let sent = sent(&recorded, 0);
    assert_eq!(sent[1], pair("invoicing", "add_invoice"));
    assert!(sent.contains(&pair("payment_terms", "upon_receipt")));
    assert!(sent.contains(&pair("payment_terms_allowed", "cc,ck,cs")));
    assert!(sent.contains(&pair("amount", "25.00")));
    assert!(sent.contains(&pair("item_product_code_1", "A-1")));
    assert!(sent.contains(&pair("item_unit_cost_1", "10.00")));
    assert!(sent.contains(&pair("item_product_code_2", "B-2")));
    assert!(sent.contains(&pair("item_unit_cost_2", "15.00")));
    assert!(!sent.iter().any(|(name, _)| name == "products" || name.ends_with("_3")));
}

#[tokio::test]
async fn test_sale_line_items_are_numbered() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let request = TransactionRequest {
        products: vec![widget("SKU-9", Decimal::new(500, 2))],
        ..card_sale(Decimal::new(500, 2))
    };
    let _ = gateway.transactions().sale(request).await;

    let sent = sent(&recorded, 0);
    assert!(sent.contains(&pair("item_product_code_1", "SKU-9")));
    assert!(sent.contains(&pair("item_description_1", "Widget")));
    assert!(sent.contains(&pair("item_quantity_1", "1")));
}

#[tokio::test]
async fn test_product_defaults_reach_the_wire() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=Product Added&product_id=5"));

    let response = gateway
        .products()
        .add(ProductRecord {
            product_sku: Some("SKU-1".into()),
            product_description: Some("Widget".into()),
            product_cost: Some(Decimal::new(1999, 2)),
            ..ProductRecord::default()
        })
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.data.unwrap().product_id.as_deref(), Some("5"));
    let sent = sent(&recorded, 0);
    assert_eq!(sent[1], pair("products", "add_product"));
    assert!(sent.contains(&pair("product_unit_of_measure", "NAR")));
    assert!(sent.contains(&pair("product_currency", "USD")));
    assert!(sent.contains(&pair("product_cost", "19.99")));
}

#[tokio::test]
async fn test_capture_refund_void_follow_up_by_id() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=SUCCESS&transactionid=42"));
    let transactions = gateway.transactions();

    let capture = transactions
        .capture(CaptureRequest {
            transactionid: "42".into(),
            amount: Some(Decimal::new(1000, 2)),
            ..CaptureRequest::default()
        })
        .await;
    let refund = transactions
        .refund(RefundRequest { transactionid: "42".into(), ..RefundRequest::default() })
        .await;
    let void = transactions.void(VoidRequest { transactionid: "42".into(), ..VoidRequest::default() }).await;

    for response in [&capture, &refund, &void] {
        assert_eq!(response.status, 200);
        assert_eq!(response.message, "SUCCESS");
    }
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 3);

    let capture = sent(&recorded, 0);
    assert_eq!(capture[1], pair("type", "capture"));
    assert!(capture.contains(&pair("transactionid", "42")));
    assert!(capture.contains(&pair("amount", "10.00")));

    let refund = sent(&recorded, 1);
    assert_eq!(refund[1], pair("type", "refund"));
    assert!(!refund.iter().any(|(name, _)| name == "amount"));

    assert_eq!(sent(&recorded, 2)[1], pair("type", "void"));
}

#[tokio::test]
async fn test_capture_without_id_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let response = gateway
        .transactions()
        .capture(CaptureRequest { amount: Some(Decimal::ONE), ..CaptureRequest::default() })
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_vault_funded_sale() {
    let (gateway, recorded) = gateway(Reply::Body("response=1&responsetext=SUCCESS&transactionid=9&customer_vault_id=999"));

    let response = gateway.customer_vault().sale(VaultTransaction::new("999", Decimal::new(500, 2))).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.data.unwrap().transactionid.as_deref(), Some("9"));
    let sent = sent(&recorded, 0);
    assert_eq!(sent[1], pair("type", "sale"));
    assert!(sent.contains(&pair("customer_vault_id", "999")));
    assert!(sent.contains(&pair("amount", "5.00")));
    assert!(!sent.iter().any(|(name, _)| name == "ccnumber"));
}

#[tokio::test]
async fn test_impossible_query_dates_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("<nm_response></nm_response>"));

    let response = gateway
        .query()
        .customer_vault(CustomerVaultQuery {
            start_date: Some("20241399".into()),
            end_date: Some("20249999999999".into()),
            ..CustomerVaultQuery::default()
        })
        .await;

    assert_eq!(response.status, 400);
    assert!(response.message.contains("start_date"));
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_add_plan_with_edit_target_never_sent() {
    let (gateway, recorded) = gateway(Reply::Body("response=1"));

    let response = gateway
        .recurring()
        .add_plan(RecurringPlan {
            current_plan_id: Some("silver".into()),
            plan_id: Some("gold".into()),
            plan_name: Some("Gold".into()),
            plan_payments: Some(0),
            plan_amount: Some(Decimal::new(2500, 2)),
            day_frequency: Some(30),
            ..RecurringPlan::default()
        })
        .await;

    assert_eq!(response.status, 400);
    assert!(response.message.contains("current_plan_id is not accepted by add_plan"));
    assert_eq!(recorded.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_error_envelope_is_failure() {
    let (gateway, _) = gateway(Reply::Body("<nm_response><error_response></error_response></nm_response>"));

    let response = gateway.query().recurring_plans(RecurringPlansQuery::default()).await;

    assert_eq!(response.status, 500);
    assert!(response.data.is_none());
    assert!(response.message.contains("empty error_response"));
    assert!(response.message.contains("<error_response></error_response>"));
}
