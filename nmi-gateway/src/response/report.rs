//! XML reports of the query endpoint.
//!
//! Each record lists the fields callers commonly need; everything else the
//! gateway sends is kept in `other`. Values stay text, as the gateway sends
//! them.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::normalize::{Container, Encoding, ResponseSchema};

/// Reads an optional nested record, treating an empty element as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom),
    }
}

/// `<transaction>` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionReport {
    /// Matching transactions.
    #[serde(default)]
    pub transaction: Vec<QueriedTransaction>,
}

impl ResponseSchema for TransactionReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] =
        &[Container::list(&["transaction"]), Container::list(&["transaction", "*", "action"])];
}

/// One transaction with its action history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueriedTransaction {
    /// Transaction id.
    pub transaction_id: Option<String>,
    /// Partial payment id.
    pub partial_payment_id: Option<String>,
    /// Payment type code (`cc`, `ck`, `cs`).
    pub transaction_type: Option<String>,
    /// Current condition.
    pub condition: Option<String>,
    /// Order id.
    pub order_id: Option<String>,
    /// Authorization code.
    pub authorization_code: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Masked card number.
    pub cc_number: Option<String>,
    /// Card expiry.
    pub cc_exp: Option<String>,
    /// Card brand.
    pub cc_type: Option<String>,
    /// Vault customer.
    pub customer_vault_id: Option<String>,
    /// Processor.
    pub processor_id: Option<String>,
    /// Currency.
    pub currency: Option<String>,
    /// Actions, oldest first.
    #[serde(default)]
    pub action: Vec<TransactionAction>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One step in a transaction's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionAction {
    /// Amount.
    pub amount: Option<String>,
    /// Action (`sale`, `settle`, ...).
    pub action_type: Option<String>,
    /// Timestamp, `YYYYMMDDhhmmss`.
    pub date: Option<String>,
    /// `1` on success.
    pub success: Option<String>,
    /// Origin.
    pub source: Option<String>,
    /// Gateway message.
    pub response_text: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `<customer_vault>` report. Also returned for account updater queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerVaultReport {
    /// Vault contents.
    #[serde(default)]
    pub customer_vault: CustomerVault,
}

/// Wrapper element around vault customers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerVault {
    /// Customers.
    #[serde(default)]
    pub customer: Vec<VaultCustomer>,
}

impl ResponseSchema for CustomerVaultReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::wrapped(&["customer_vault"], "customer")];
}

/// A stored customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultCustomer {
    /// Vault id.
    pub customer_vault_id: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Masked card number.
    pub cc_number: Option<String>,
    /// Card expiry.
    pub cc_exp: Option<String>,
    /// Masked account number.
    pub check_account: Option<String>,
    /// Creation timestamp.
    pub created: Option<String>,
    /// Last update timestamp.
    pub updated: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `<subscription>` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringReport {
    /// Subscriptions.
    #[serde(default)]
    pub subscription: Vec<Subscription>,
}

impl ResponseSchema for RecurringReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::list(&["subscription"])];
}

/// A subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription id.
    pub subscription_id: Option<String>,
    /// Plan the subscription follows.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub plan: Option<Plan>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Next billing date.
    pub next_charge_date: Option<String>,
    /// Payments made.
    pub completed_payments: Option<String>,
    /// Payments attempted.
    pub attempted_payments: Option<String>,
    /// Payments left.
    pub remaining_payments: Option<String>,
    /// Vault customer billed.
    pub customer_vault_id: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `<plan>` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringPlansReport {
    /// Plans.
    #[serde(default)]
    pub plan: Vec<Plan>,
}

impl ResponseSchema for RecurringPlansReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::list(&["plan"])];
}

/// A recurring plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan id.
    pub plan_id: Option<String>,
    /// Name.
    pub plan_name: Option<String>,
    /// Amount per payment.
    pub plan_amount: Option<String>,
    /// Number of payments.
    pub plan_payments: Option<String>,
    /// Day interval.
    pub day_frequency: Option<String>,
    /// Month interval.
    pub month_frequency: Option<String>,
    /// Billing day of month.
    pub day_of_month: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `<invoice_report>` report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceReport {
    /// Report contents.
    #[serde(default)]
    pub invoice_report: InvoiceList,
}

/// Wrapper element around invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceList {
    /// Invoices.
    #[serde(default)]
    pub invoice: Vec<Invoice>,
}

impl ResponseSchema for InvoiceReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::wrapped(&["invoice_report"], "invoice")];
}

/// An invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice id.
    pub invoice_id: Option<String>,
    /// Creation timestamp.
    pub created: Option<String>,
    /// Status.
    pub status: Option<String>,
    /// Amount.
    pub amount: Option<String>,
    /// Outstanding balance.
    pub balance: Option<String>,
    /// Currency.
    pub currency: Option<String>,
    /// Recipient.
    pub email: Option<String>,
    /// Terms.
    pub payment_terms: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `<gateway_processor>` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayProcessorsReport {
    /// Processors.
    #[serde(default)]
    pub gateway_processor: Vec<GatewayProcessor>,
}

impl ResponseSchema for GatewayProcessorsReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::list(&["gateway_processor"])];
}

/// A configured processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayProcessor {
    /// Processor id.
    pub processor_id: Option<String>,
    /// Display name.
    pub description: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Merchant profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// API protocol version.
    pub protocol: Option<String>,
    /// Merchant details.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub merchant: Option<Merchant>,
    /// Processor details, when requested.
    #[serde(default)]
    pub processors: Processors,
}

/// Wrapper element around profile processors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Processors {
    /// Processors.
    #[serde(default)]
    pub processor: Vec<Map<String, Value>>,
}

impl ResponseSchema for ProfileReport {
    const ENCODING: Encoding = Encoding::Xml;
    const CONTAINERS: &'static [Container] = &[Container::wrapped(&["processors"], "processor")];
}

/// Merchant account details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    /// Merchant id.
    pub id: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Time zone.
    pub timezone: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Test mode flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestModeReport {
    /// `1` when test mode is on.
    pub test_mode_status: Option<String>,
}

impl TestModeReport {
    /// Whether the account is in test mode.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self.test_mode_status.as_deref(), Some("1" | "true" | "enabled"))
    }
}

impl ResponseSchema for TestModeReport {
    const ENCODING: Encoding = Encoding::Xml;
}

/// Printable receipt, passed through as the gateway sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(pub String);

impl ResponseSchema for Receipt {
    const ENCODING: Encoding = Encoding::Text;
}
